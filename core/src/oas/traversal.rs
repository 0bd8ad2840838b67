#![deny(missing_docs)]

//! # Operation Traversals
//!
//! Selectors focusing on the `Operation`s nested inside a document.
//!
//! A `PathItem` is viewed as a fixed array of method slots
//! (`get, put, post, delete, options, head, patch, trace`). Selectors are
//! expressed in terms of slot positions, so matching one document against
//! another never depends on method names.
//!
//! Only inline path items are visited; `$ref` path items are left untouched.

use openapiv3::{OpenAPI, Operation, PathItem, ReferenceOr};
use std::fmt::{Display, Formatter};

/// Number of method slots carried by every `PathItem`.
pub const SLOT_COUNT: usize = 8;

/// HTTP methods, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `HEAD`
    Head,
    /// `PATCH`
    Patch,
    /// `TRACE`
    Trace,
}

impl HttpMethod {
    /// All methods indexed by slot position.
    pub const ALL: [HttpMethod; SLOT_COUNT] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lowercase name, as used for `PathItem` keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Views a `PathItem` as its ordered method slots.
pub fn slots(item: &PathItem) -> [&Option<Operation>; SLOT_COUNT] {
    [
        &item.get,
        &item.put,
        &item.post,
        &item.delete,
        &item.options,
        &item.head,
        &item.patch,
        &item.trace,
    ]
}

/// Mutable counterpart of [`slots`].
pub fn slots_mut(item: &mut PathItem) -> [&mut Option<Operation>; SLOT_COUNT] {
    [
        &mut item.get,
        &mut item.put,
        &mut item.post,
        &mut item.delete,
        &mut item.options,
        &mut item.head,
        &mut item.patch,
        &mut item.trace,
    ]
}

/// Positions of the slots holding an operation.
pub fn occupied_slots(item: &PathItem) -> Vec<usize> {
    slots(item)
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_some())
        .map(|(position, _)| position)
        .collect()
}

/// A selected operation together with its location in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRef<'a> {
    /// Key in `paths`.
    pub path: &'a str,
    /// Method slot holding the operation.
    pub method: HttpMethod,
    /// The operation itself.
    pub operation: &'a Operation,
}

/// A composable selection of operations inside a document.
///
/// Implementors provide both modes: reading the focused operations and
/// rewriting them in place. Order is deterministic: path insertion order, then
/// slot order.
pub trait OperationSelector {
    /// Lazily yields the selected operations.
    ///
    /// Yielded items borrow only the document, so they may outlive the selector.
    fn operations<'s, 'd: 's>(
        &'s self,
        openapi: &'d OpenAPI,
    ) -> Box<dyn Iterator<Item = OperationRef<'d>> + 's>;

    /// Applies `f` to every selected operation, returning how many were visited.
    ///
    /// The whole document, `components` included, is visible to the selector
    /// while it runs.
    fn update(&self, openapi: &mut OpenAPI, f: &mut dyn FnMut(&mut Operation)) -> usize;
}

/// Selects every operation of the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllOperations;

/// Selects the operations of a document that also exist in a sub-document.
#[derive(Debug, Clone, Copy)]
pub struct OperationsOf<'s> {
    sub: &'s OpenAPI,
}

/// Selector over every operation.
pub fn all_operations() -> AllOperations {
    AllOperations
}

/// Selector over the operations whose `(path, slot)` is occupied in `sub`.
///
/// Paths missing from `sub` are not visited, and neither are slots that `sub`
/// fills but the target document leaves empty.
pub fn operations_of(sub: &OpenAPI) -> OperationsOf<'_> {
    OperationsOf { sub }
}

impl OperationSelector for AllOperations {
    fn operations<'s, 'd: 's>(
        &'s self,
        openapi: &'d OpenAPI,
    ) -> Box<dyn Iterator<Item = OperationRef<'d>> + 's> {
        Box::new(inline_items(openapi).flat_map(|(path, item)| {
            slots(item)
                .into_iter()
                .zip(HttpMethod::ALL)
                .filter_map(move |(slot, method)| {
                    slot.as_ref().map(|operation| OperationRef {
                        path,
                        method,
                        operation,
                    })
                })
        }))
    }

    fn update(&self, openapi: &mut OpenAPI, f: &mut dyn FnMut(&mut Operation)) -> usize {
        let mut visited = 0;
        for item in openapi.paths.paths.values_mut() {
            let ReferenceOr::Item(item) = item else {
                continue;
            };
            for slot in slots_mut(item) {
                if let Some(operation) = slot.as_mut() {
                    f(operation);
                    visited += 1;
                }
            }
        }
        visited
    }
}

impl OperationsOf<'_> {
    fn positions_for(&self, path: &str) -> Vec<usize> {
        match self.sub.paths.paths.get(path) {
            Some(ReferenceOr::Item(sub_item)) => occupied_slots(sub_item),
            _ => Vec::new(),
        }
    }
}

impl OperationSelector for OperationsOf<'_> {
    fn operations<'s, 'd: 's>(
        &'s self,
        openapi: &'d OpenAPI,
    ) -> Box<dyn Iterator<Item = OperationRef<'d>> + 's> {
        let sub = *self;
        Box::new(inline_items(openapi).flat_map(move |(path, item)| {
            let slots = slots(item);
            sub.positions_for(path)
                .into_iter()
                .filter_map(move |position| {
                    slots[position].as_ref().map(|operation| OperationRef {
                        path,
                        method: HttpMethod::ALL[position],
                        operation,
                    })
                })
        }))
    }

    fn update(&self, openapi: &mut OpenAPI, f: &mut dyn FnMut(&mut Operation)) -> usize {
        let mut visited = 0;
        for (path, item) in openapi.paths.paths.iter_mut() {
            let ReferenceOr::Item(item) = item else {
                continue;
            };
            let positions = self.positions_for(path);
            if positions.is_empty() {
                continue;
            }
            let slots = slots_mut(item);
            for position in positions {
                if let Some(operation) = slots[position].as_mut() {
                    f(operation);
                    visited += 1;
                }
            }
        }
        visited
    }
}

/// Applies `f` to every operation chosen by `selector` and returns the updated document.
pub fn over<S, F>(selector: &S, mut openapi: OpenAPI, mut f: F) -> OpenAPI
where
    S: OperationSelector + ?Sized,
    F: FnMut(&mut Operation),
{
    selector.update(&mut openapi, &mut f);
    openapi
}

fn inline_items(openapi: &OpenAPI) -> impl Iterator<Item = (&str, &PathItem)> {
    openapi
        .paths
        .paths
        .iter()
        .filter_map(|(path, item)| match item {
            ReferenceOr::Item(item) => Some((path.as_str(), item)),
            ReferenceOr::Reference { .. } => None,
        })
}
