//! GraphQL [responses](https://spec.graphql.org/October2021/#sec-Response-Format)
//! and writing them out.

use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::LogDiagnostics;
use crate::GraphQLError;
use serde::ser::Error as _;
use serde::Serialize;
use serde::Serializer;
use serde_json::value::RawValue;
use std::fmt;
use std::io;

/// Message of the single error in the response written when a [`Response`]
/// fails to serialize.
pub const FALLBACK_ERROR_MESSAGE: &str = "failed to produce a valid response";

/// The outer structure of a GraphQL response: errors and/or result data.
///
/// `data` has three meaningful states:
///
/// * `None`: the `data` key is omitted.
///   This is a [request error] response where execution did not start.
/// * `Some(ResponseData::null())`: `"data": null`.
///   Execution started but a field error was propagated all the way to the root.
/// * `Some(data)` with other contents: the result of execution, embedded verbatim.
///
/// A response is meant to be built once, written once with [`write_to`][Self::write_to],
/// then dropped.
///
/// [request error]: https://spec.graphql.org/October2021/#sec-Errors.Request-errors
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    // <https://spec.graphql.org/October2021/#note-6f005> suggests serializing this first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

/// Response data that was already serialized to JSON.
///
/// The bytes are not parsed into a value, only checked when the enclosing [`Response`]
/// is serialized. If they are not valid UTF-8 or not exactly one JSON value,
/// [`Response::write_to`] writes a fallback response instead.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ResponseData(Vec<u8>);

/// Error returned by [`Response::write_to`].
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The sink returned an error. `written` bytes were accepted before that.
    #[error("failed to write GraphQL response ({written} bytes written)")]
    Io {
        written: usize,
        #[source]
        source: io::Error,
    },

    /// Even the fallback response could not be serialized. Nothing was written.
    #[error("failed to serialize the fallback GraphQL response")]
    Fallback(#[source] serde_json::Error),
}

impl Response {
    pub fn new(errors: Vec<GraphQLError>, data: Option<ResponseData>) -> Self {
        Self { errors, data }
    }

    /// A response with a single error and no `data` key.
    ///
    /// Use [`format_args!`] for an interpolated message:
    ///
    /// ```
    /// # use apollo_response::Response;
    /// let field = "id";
    /// let response = Response::error(format_args!("missing field {field}"));
    /// assert_eq!(response.errors[0].message, "missing field id");
    /// ```
    pub fn error(message: impl fmt::Display) -> Self {
        Self::from_errors(vec![GraphQLError::new(message.to_string())])
    }

    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self { errors, data: None }
    }

    pub fn from_data(data: ResponseData) -> Self {
        Self {
            errors: Vec::new(),
            data: Some(data),
        }
    }

    /// Makes subsequent writes emit `"data": null`, replacing any previous data.
    pub fn set_null_data(&mut self) {
        self.data = Some(ResponseData::null())
    }

    pub fn with_null_data(mut self) -> Self {
        self.set_null_data();
        self
    }

    /// Whether the serialized response has a `data` key (possibly `null`)
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Whether this is a [request error](https://spec.graphql.org/October2021/#sec-Errors.Request-errors)
    /// response: at least one error and no `data` key.
    pub fn is_request_error(&self) -> bool {
        self.data.is_none() && !self.errors.is_empty()
    }

    /// Writes this response as compact JSON to `sink`,
    /// returning how many bytes were written.
    ///
    /// If this response cannot be serialized (because of invalid [`ResponseData`]),
    /// the failure is logged with [`LogDiagnostics`] and a response with a single
    /// [`FALLBACK_ERROR_MESSAGE`] error and `"data": null` is written instead.
    pub fn write_to(&self, sink: &mut impl io::Write) -> Result<usize, WriteError> {
        self.write_to_with(sink, &LogDiagnostics)
    }

    /// Like [`write_to`][Self::write_to], but serialization failures are reported to `diagnostics`.
    ///
    /// All bytes are handed to `sink` in a single logical write:
    /// partial writes and [`io::ErrorKind::Interrupted`] are retried as with
    /// [`write_all`][io::Write::write_all], any other error is returned as is.
    ///
    /// Rendering the same response concurrently is not part of the contract:
    /// a response is owned by one caller and written once.
    pub fn write_to_with<D>(
        &self,
        sink: &mut impl io::Write,
        diagnostics: &D,
    ) -> Result<usize, WriteError>
    where
        D: DiagnosticSink + ?Sized,
    {
        let bytes = self.to_bytes_with(diagnostics)?;
        write_fully(sink, &bytes)
    }

    /// Serializes this response as compact JSON,
    /// substituting the fallback response as [`write_to`][Self::write_to] does.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        self.to_bytes_with(&LogDiagnostics)
    }

    pub fn to_bytes_with<D>(&self, diagnostics: &D) -> Result<Vec<u8>, WriteError>
    where
        D: DiagnosticSink + ?Sized,
    {
        match serde_json::to_vec(self) {
            Ok(bytes) => Ok(bytes),
            Err(cause) => {
                // Most likely a bug in whatever produced `self.data`
                diagnostics.report(FALLBACK_ERROR_MESSAGE, &cause);
                serde_json::to_vec(&Self::fallback()).map_err(WriteError::Fallback)
            }
        }
    }

    fn fallback() -> Self {
        Self::error(FALLBACK_ERROR_MESSAGE).with_null_data()
    }
}

impl ResponseData {
    /// The JSON literal `null`
    pub fn null() -> Self {
        Self(b"null".to_vec())
    }

    /// Wraps bytes that are expected to be one serialized JSON value. They are not checked here.
    pub fn from_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Serializes `value` with `serde_json`.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Whether this is exactly the JSON literal `null`
    pub fn is_null(&self) -> bool {
        self.0 == b"null"
    }
}

impl fmt::Debug for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResponseData")
            .field(&String::from_utf8_lossy(&self.0))
            .finish()
    }
}

impl Serialize for ResponseData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = std::str::from_utf8(&self.0)
            .map_err(|err| S::Error::custom(format_args!("response data is not UTF-8: {err}")))?;
        let raw: &RawValue = serde_json::from_str(text)
            .map_err(|err| S::Error::custom(format_args!("response data is not JSON: {err}")))?;
        raw.serialize(serializer)
    }
}

impl WriteError {
    /// The error returned by the sink, if that is what failed
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            WriteError::Io { source, .. } => Some(source),
            WriteError::Fallback(_) => None,
        }
    }

    /// How many bytes the sink accepted before failing
    pub fn written(&self) -> usize {
        match self {
            WriteError::Io { written, .. } => *written,
            WriteError::Fallback(_) => 0,
        }
    }
}

/// [`io::Write::write_all`] that keeps count of accepted bytes for the error case.
fn write_fully(sink: &mut impl io::Write, mut buf: &[u8]) -> Result<usize, WriteError> {
    let mut written = 0;
    while !buf.is_empty() {
        match sink.write(buf) {
            Ok(0) => {
                return Err(WriteError::Io {
                    written,
                    source: io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole GraphQL response",
                    ),
                })
            }
            Ok(n) => {
                written += n;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => return Err(WriteError::Io { written, source }),
        }
    }
    Ok(written)
}
