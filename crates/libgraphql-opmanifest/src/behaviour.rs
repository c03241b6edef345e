use crate::ast;
use crate::loc;
use crate::OperationManifestBuildError;
use indexmap::IndexMap;

/// Declarative metadata extracted from an operation's behaviour directives.
///
/// Keys are kept in the order they were first written so that serialized
/// output is stable across runs.
pub type Behaviour = IndexMap<String, BehaviourValue>;

/// A value stored in a [`Behaviour`] map.
///
/// Serializes to plain JSON (`true`, `5`, `"str"`, `null`, `{...}`). Lists are
/// deliberately not representable.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum BehaviourValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
    Object(IndexMap<String, BehaviourValue>),
}

impl BehaviourValue {
    /// Decode a literal directive-argument value.
    ///
    /// Enum values decode to their name as a string. Variables, lists, and
    /// input objects are rejected with
    /// [`OperationManifestBuildError::UnsupportedArgumentType`].
    pub fn from_argument(
        ast_value: &ast::Value,
        directive_name: &str,
        location: &loc::SourceLocation,
    ) -> Result<Self, OperationManifestBuildError> {
        let unsupported = |value_kind: &str| {
            OperationManifestBuildError::UnsupportedArgumentType {
                directive_name: directive_name.to_string(),
                location: location.to_owned(),
                value_kind: value_kind.to_string(),
            }
        };

        Ok(match ast_value {
            ast::Value::Int(number) =>
                BehaviourValue::Int(number.as_i64().ok_or_else(|| unsupported("Int"))?),

            ast::Value::Float(value) =>
                BehaviourValue::Float(*value),

            ast::Value::String(value) =>
                BehaviourValue::String(value.clone()),

            ast::Value::Boolean(value) =>
                BehaviourValue::Bool(*value),

            ast::Value::Null =>
                BehaviourValue::Null,

            ast::Value::Enum(value) =>
                BehaviourValue::String(value.clone()),

            ast::Value::Variable(_) => return Err(unsupported("Variable")),
            ast::Value::List(_) => return Err(unsupported("List")),
            ast::Value::Object(_) => return Err(unsupported("Object")),
        })
    }

    pub fn as_i64(&self) -> Option<i64> {
        if let Self::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

impl std::convert::From<bool> for BehaviourValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl std::convert::From<i64> for BehaviourValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl std::convert::From<&str> for BehaviourValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
