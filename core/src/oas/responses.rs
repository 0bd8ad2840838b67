#![deny(missing_docs)]

//! # Response Installation
//!
//! Builds responses from declared schemas and installs them under a status code
//! across a selection of operations.
//!
//! Schemas registered while building the response are merged into
//! `components.schemas` before the response is installed, so every `$ref` it
//! carries resolves in the resulting document.

use crate::declare::{run_declare, Declare, Definitions};
use crate::oas::refs::resolve_response;
use crate::oas::traversal::{all_operations, OperationSelector};
use crate::schema::{declare_schema_ref, ToSchema};
use openapiv3::{
    Components, MediaType, OpenAPI, Operation, ReferenceOr, Response, Schema, StatusCode,
};

/// A response with empty description whose `content` holds the schema of `T`
/// under `media_type`.
pub fn declare_response<'a, T>(media_type: &str) -> Declare<'a, Response>
where
    T: ToSchema + ?Sized + 'a,
{
    declare_response_with(media_type, declare_schema_ref::<T>())
}

/// Like [`declare_response`], for a schema computation supplied by the caller.
pub fn declare_response_with<'a>(
    media_type: &str,
    schema: Declare<'a, ReferenceOr<Schema>>,
) -> Declare<'a, Response> {
    let media_type = media_type.to_string();
    schema.map(move |schema| {
        let mut response = Response::default();
        response.content.insert(
            media_type,
            MediaType {
                schema: Some(schema),
                ..Default::default()
            },
        );
        response
    })
}

/// Installs the declared response on every operation, replacing what was there.
pub fn set_response(status: u16, declared: Declare<'_, Response>, openapi: OpenAPI) -> OpenAPI {
    set_response_for(&all_operations(), status, declared, openapi)
}

/// Installs the declared response on every operation, combining it with any
/// existing response via `combine(old, new)`.
pub fn set_response_with<F>(
    combine: F,
    status: u16,
    declared: Declare<'_, Response>,
    openapi: OpenAPI,
) -> OpenAPI
where
    F: FnMut(Response, Response) -> Response,
{
    set_response_for_with(&all_operations(), combine, status, declared, openapi)
}

/// Installs the declared response on the selected operations, replacing what was there.
pub fn set_response_for<S>(
    selector: &S,
    status: u16,
    declared: Declare<'_, Response>,
    openapi: OpenAPI,
) -> OpenAPI
where
    S: OperationSelector + ?Sized,
{
    set_response_for_with(selector, |_old, new| new, status, declared, openapi)
}

/// Installs the declared response at `status` on the selected operations.
///
/// The declaration runs once from an empty table; its definitions overwrite
/// same-named entries of `components.schemas`. Then, per operation:
/// - no response at `status`: the new response is installed;
/// - an inline response: `combine(old, new)` is installed;
/// - a reference resolving in `components.responses`: `combine(resolved, new)`;
/// - a reference that does not resolve: treated as absent.
///
/// The installed value is always inline.
pub fn set_response_for_with<S, F>(
    selector: &S,
    mut combine: F,
    status: u16,
    declared: Declare<'_, Response>,
    mut openapi: OpenAPI,
) -> OpenAPI
where
    S: OperationSelector + ?Sized,
    F: FnMut(Response, Response) -> Response,
{
    let (definitions, response) = run_declare(declared, Definitions::new());
    let merged = merge_definitions(&mut openapi, definitions);

    // Snapshot for resolving `$ref` responses; the document keeps its own copy.
    let components = openapi.components.clone();
    let key = StatusCode::Code(status);

    let updated = selector.update(&mut openapi, &mut |operation: &mut Operation| {
        let installed = match operation.responses.responses.get(&key) {
            None => response.clone(),
            Some(ReferenceOr::Item(old)) => combine(old.clone(), response.clone()),
            Some(ReferenceOr::Reference { reference }) => {
                match components
                    .as_ref()
                    .and_then(|c| resolve_response(c, reference).ok())
                {
                    Some(found) => combine(found.clone(), response.clone()),
                    None => response.clone(),
                }
            }
        };
        operation
            .responses
            .responses
            .insert(key.clone(), ReferenceOr::Item(installed));
    });

    log::debug!(
        "installed response {} on {} operations ({} schema definitions merged)",
        status,
        updated,
        merged
    );
    openapi
}

fn merge_definitions(openapi: &mut OpenAPI, definitions: Definitions) -> usize {
    if definitions.is_empty() {
        return 0;
    }
    let count = definitions.len();
    let components = openapi.components.get_or_insert_with(Components::default);
    for (name, schema) in definitions {
        components.schemas.insert(name, ReferenceOr::Item(schema));
    }
    count
}
