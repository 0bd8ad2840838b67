#![deny(missing_docs)]

//! # OAS Ops Core
//!
//! Transformations over parsed OpenAPI documents: path prefixing, operation
//! selectors, tag application and response installation, plus the declaration
//! machinery that collects named schemas while responses are built.
//!
//! Every operation takes the document by value and returns the updated one.

/// Shared error types.
pub mod error;

/// Schema definition accumulation.
pub mod declare;

/// Rust type -> OpenAPI schema derivation.
pub mod schema;

/// OpenAPI (OAS) document operations.
pub mod oas;

pub use declare::{
    declare, eval_declare, exec_declare, look, looks, run_declare, Declarations, Declare,
    Definitions,
};
pub use error::{AppError, AppResult};
pub use oas::{
    all_operations, apply_tags, apply_tags_for, declare_response, declare_response_with,
    operations_of, over, prepend_path, set_response, set_response_for, set_response_for_with,
    set_response_with, AllOperations, HttpMethod, OperationRef, OperationSelector, OperationsOf,
};
pub use schema::{
    declare_schema, declare_schema_ref, declare_schema_ref_in, schema_name, to_named_schema,
    to_schema, to_schema_ref, NamedSchema, ObjectSchema, ToSchema,
};
