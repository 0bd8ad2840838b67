#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for building and resolving local `$ref` targets of the form
//! `#/components/{section}/{name}`.
//!
//! Resolution never leaves the current document. References into other documents
//! are reported as [`AppError::ForeignReference`].

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use openapiv3::{Components, ReferenceOr, Response, Schema};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashSet;

/// Characters escaped when a name is placed in a URI fragment.
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%');

/// Component section holding reusable schemas.
pub const SCHEMAS: &str = "schemas";

/// Component section holding reusable responses.
pub const RESPONSES: &str = "responses";

/// Builds the local JSON Pointer naming `name` inside `components.{section}`.
pub fn component_ref(section: &str, name: &str) -> String {
    format!("#/components/{}/{}", section, encode_pointer_segment(name))
}

/// Builds a `ReferenceOr::Reference` to the schema registered under `name`.
pub fn schema_ref<T>(name: &str) -> ReferenceOr<T> {
    ReferenceOr::Reference {
        reference: component_ref(SCHEMAS, name),
    }
}

/// Builds a `ReferenceOr::Reference` to the response registered under `name`.
pub fn response_ref<T>(name: &str) -> ReferenceOr<T> {
    ReferenceOr::Reference {
        reference: component_ref(RESPONSES, name),
    }
}

/// Extracts the component name from a `$ref` pointing to `#/components/{section}/{name}`.
///
/// # Errors
///
/// Returns [`AppError::ForeignReference`] when the reference targets another
/// document, another section, or a location nested below a component.
pub fn component_name(ref_str: &str, section: &str) -> AppResult<String> {
    let foreign = || AppError::ForeignReference(ref_str.to_string());

    let pointer = ref_str.strip_prefix("#/").ok_or_else(foreign)?;
    let segments: Vec<&str> = pointer.split('/').collect();
    if segments.len() != 3 || segments[0] != "components" || segments[1] != section {
        return Err(foreign());
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        Err(foreign())
    } else {
        Ok(name)
    }
}

/// Resolves a response reference against `components.responses`.
///
/// Chains of references between response components are followed until an inline
/// response is reached.
///
/// # Errors
///
/// Returns [`AppError::UnresolvedReference`] for a missing target or a cycle, and
/// [`AppError::ForeignReference`] for a non-local pointer.
pub fn resolve_response<'a>(components: &'a Components, ref_str: &str) -> AppResult<&'a Response> {
    resolve_in(&components.responses, RESPONSES, ref_str)
}

/// Resolves a schema reference against `components.schemas`.
///
/// # Errors
///
/// Same conditions as [`resolve_response`].
pub fn resolve_schema<'a>(components: &'a Components, ref_str: &str) -> AppResult<&'a Schema> {
    resolve_in(&components.schemas, SCHEMAS, ref_str)
}

fn resolve_in<'a, T>(
    table: &'a IndexMap<String, ReferenceOr<T>>,
    section: &str,
    ref_str: &str,
) -> AppResult<&'a T> {
    let mut seen = HashSet::new();
    let mut current = ref_str.to_string();

    loop {
        let name = component_name(&current, section)?;
        if !seen.insert(name.clone()) {
            return Err(AppError::UnresolvedReference(ref_str.to_string()));
        }
        match table.get(&name) {
            Some(ReferenceOr::Item(item)) => return Ok(item),
            Some(ReferenceOr::Reference { reference }) => current = reference.clone(),
            None => return Err(AppError::UnresolvedReference(ref_str.to_string())),
        }
    }
}

/// Decodes a JSON Pointer segment taken from a URI fragment: percent-decoding
/// first, then `~1` and `~0`.
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace("~1", "/")
        .replace("~0", "~")
}

fn encode_pointer_segment(segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    utf8_percent_encode(&escaped, FRAGMENT).to_string()
}
