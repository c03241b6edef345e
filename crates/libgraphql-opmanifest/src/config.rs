use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, ManifestConfigError>;

pub const DEFAULT_DIRECTIVE_PREFIX: &str = "p__";

/// Settings for an [`OperationManifestBuilder`](crate::OperationManifestBuilder).
///
/// Deserializes from JSON such as `{ "directive_prefix": "x__" }`. Omitted
/// keys take their default values.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Directives named `{directive_prefix}{key}` are treated as generic
    /// behaviour annotations.
    pub directive_prefix: String,
}

impl ManifestConfig {
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = std::fs::read_to_string(file_path)
            .map_err(|err| ManifestConfigError::FileReadError {
                file_path: file_path.to_path_buf(),
                err: Arc::new(err),
            })?;
        Self::from_json_str(content)
    }

    pub fn from_json_str(content: impl AsRef<str>) -> Result<Self> {
        let config: Self = serde_json::from_str(content.as_ref())
            .map_err(|err| ManifestConfigError::DeserializeError(Arc::new(err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.directive_prefix.is_empty() {
            return Err(ManifestConfigError::EmptyDirectivePrefix);
        }
        Ok(())
    }

    pub fn with_directive_prefix(mut self, directive_prefix: impl Into<String>) -> Self {
        self.directive_prefix = directive_prefix.into();
        self
    }
}

impl std::default::Default for ManifestConfig {
    fn default() -> Self {
        Self {
            directive_prefix: DEFAULT_DIRECTIVE_PREFIX.to_string(),
        }
    }
}

#[derive(Clone, Debug, Error)]
pub enum ManifestConfigError {
    #[error("Invalid manifest config: {0}")]
    DeserializeError(Arc<serde_json::Error>),

    #[error("`directive_prefix` must not be empty")]
    EmptyDirectivePrefix,

    #[error("Failed to read config file at {file_path:?}: {err}")]
    FileReadError {
        file_path: PathBuf,
        err: Arc<std::io::Error>,
    },
}
