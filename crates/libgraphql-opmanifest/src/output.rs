use crate::OperationManifest;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, ManifestOutputError>;

pub const MANIFEST_FILE_EXTENSION: &str = "json";

/// Reject any output path whose extension is not `.json`.
///
/// Callers should check this before loading any documents so that a
/// misconfigured output path fails fast.
pub fn validate_output_path(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(MANIFEST_FILE_EXTENSION) => Ok(()),
        _ => Err(ManifestOutputError::InvalidOutputExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Write `manifest` to `path` as a pretty-printed JSON array.
pub fn write_manifest_file(
    path: impl AsRef<Path>,
    manifest: &OperationManifest,
) -> Result<()> {
    let path = path.as_ref();
    validate_output_path(path)?;

    let mut json = manifest
        .to_json_string()
        .map_err(|err| ManifestOutputError::SerializeError(Arc::new(err)))?;
    json.push('\n');

    std::fs::write(path, json)
        .map_err(|err| ManifestOutputError::FileWriteError {
            path: path.to_path_buf(),
            err: Arc::new(err),
        })?;

    log::debug!("Wrote {} operation(s) to {path:?}.", manifest.len());
    Ok(())
}

#[derive(Clone, Debug, Error)]
pub enum ManifestOutputError {
    #[error("Failed to write manifest to {path:?}: {err}")]
    FileWriteError {
        path: PathBuf,
        err: Arc<std::io::Error>,
    },

    #[error(
        "Invalid output path {path:?}: operation manifests must be written to \
        a `.json` file"
    )]
    InvalidOutputExtension {
        path: PathBuf,
    },

    #[error("Failed to serialize manifest: {0}")]
    SerializeError(Arc<serde_json::Error>),
}
