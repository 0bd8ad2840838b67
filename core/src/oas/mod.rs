#![deny(missing_docs)]

//! # OpenAPI Document Operations
//!
//! - **paths**: Prefixing of path keys.
//! - **refs**: Local `$ref` construction and resolution.
//! - **traversal**: Operation selectors.
//! - **tags**: Tag application through a selector.
//! - **responses**: Response installation through a selector.

pub mod paths;
pub mod refs;
pub mod responses;
pub mod tags;
pub mod traversal;

pub use paths::prepend_path;
pub use responses::{
    declare_response, declare_response_with, set_response, set_response_for,
    set_response_for_with, set_response_with,
};
pub use tags::{apply_tags, apply_tags_for};
pub use traversal::{
    all_operations, operations_of, over, AllOperations, HttpMethod, OperationRef,
    OperationSelector, OperationsOf,
};
