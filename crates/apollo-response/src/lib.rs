//! A GraphQL [response](https://spec.graphql.org/October2021/#sec-Response-Format) envelope
//! that always writes a well-formed message.
//!
//! An executor builds a [`Response`] from its errors and already-serialized [`ResponseData`],
//! then calls [`Response::write_to`]. If the data turns out not to be valid JSON,
//! the fault is reported to a [`DiagnosticSink`] and a fixed error response is written instead,
//! so the client still receives a valid GraphQL response.
//!
//! Example usage:
//!
//! ```
#![doc = include_str!("../tests/doc_example.rs")]
//! ```

pub mod diagnostics;
mod graphql_error;
mod response;

pub use self::diagnostics::DiagnosticSink;
pub use self::diagnostics::LogDiagnostics;
pub use self::graphql_error::GraphQLError;
pub use self::graphql_error::Location;
pub use self::graphql_error::ResponseDataPathSegment;
pub use self::response::Response;
pub use self::response::ResponseData;
pub use self::response::WriteError;
pub use self::response::FALLBACK_ERROR_MESSAGE;
/// Re-export of the version of the `serde_json_bytes` crate used for [`JsonValue`] and [`JsonMap`]
pub use serde_json_bytes;

/// A JSON-compatible dynamically-typed value.
pub type JsonValue = serde_json_bytes::Value;

/// A JSON object, as used for [`GraphQLError::extensions`]
pub type JsonMap = serde_json_bytes::Map<serde_json_bytes::ByteString, JsonValue>;
