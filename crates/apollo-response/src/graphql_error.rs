use crate::JsonMap;
use crate::JsonValue;
use serde::Deserialize;
use serde::Serialize;

/// A serializable [error](https://spec.graphql.org/October2021/#sec-Errors.Error-result-format),
/// as found in a GraphQL response.
///
/// The response envelope does not interpret any of these fields,
/// they are serialized as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,

    /// Locations in the request document relevant to the error, if any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub locations: Vec<Location>,

    /// If non-empty, the error is a [field error]
    /// for the particular field found at this path in the response data.
    ///
    /// [field error]: https://spec.graphql.org/October2021/#sec-Errors.Field-errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub path: Vec<ResponseDataPathSegment>,

    /// Reserved for any additional information
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    #[serde(default)]
    pub extensions: JsonMap,
}

/// A line and column in a GraphQL source, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// One step of a [path](https://spec.graphql.org/draft/#sec-Errors.Error-Result-Format)
/// into the response data, as in [`GraphQLError::path`].
///
/// In a response like this:
///
/// ```json
/// {
///   "errors": [
///     {
///       "message": "Something went wrong",
///       "path": ["players", 1, "name"]
///     }
///   ],
///   "data": {
///     "players": [
///       {"name": "Alice"},
///       {"name": "Bob"}
///     ]
///   }
/// }
/// ```
///
/// the error path is `vec![Field("players"), ListIndex(1), Field("name")]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseDataPathSegment {
    /// The relevant key in an object value
    Field(String),

    /// The index of the relevant item in a list value
    ListIndex(usize),
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: JsonMap::new(),
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.locations.push(Location { line, column });
        self
    }

    pub fn with_path(mut self, path: impl IntoIterator<Item = ResponseDataPathSegment>) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    /// Adds an entry to [`extensions`][Self::extensions], replacing any previous value for `key`.
    pub fn with_extension(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.extensions.insert(key, value.into());
        self
    }
}

impl From<&str> for ResponseDataPathSegment {
    fn from(field: &str) -> Self {
        Self::Field(field.to_owned())
    }
}

impl From<String> for ResponseDataPathSegment {
    fn from(field: String) -> Self {
        Self::Field(field)
    }
}

impl From<usize> for ResponseDataPathSegment {
    fn from(index: usize) -> Self {
        Self::ListIndex(index)
    }
}
