use crate::ast;
use crate::loc;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, SourceDocumentLoadError>;

/// A parsed executable document along with the path of the file it was
/// loaded from (if any).
///
/// `SourceDocument`s are read-only inputs to an
/// [`OperationManifestBuilder`](crate::OperationManifestBuilder). The file
/// path is only ever used for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceDocument {
    pub(crate) ast: ast::operation::Document,
    pub(crate) file_path: Option<PathBuf>,
}

impl SourceDocument {
    pub fn ast(&self) -> &ast::operation::Document {
        &self.ast
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn from_ast(
        ast: ast::operation::Document,
        file_path: Option<&Path>,
    ) -> Self {
        Self {
            ast,
            file_path: file_path.map(|p| p.to_path_buf()),
        }
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(SourceDocumentLoadError::PathIsNotAFile(
                file_path.to_path_buf(),
            ));
        }

        let content = std::fs::read_to_string(file_path)
            .map_err(|err| SourceDocumentLoadError::FileReadError {
                file_path: file_path.to_path_buf(),
                err: Arc::new(err),
            })?;

        Self::from_str(content, Some(file_path))
    }

    pub fn from_str(
        content: impl AsRef<str>,
        file_path: Option<&Path>,
    ) -> Result<Self> {
        let ast = ast::operation::parse(content.as_ref())
            .map_err(|err| SourceDocumentLoadError::ParseError {
                file_path: file_path.map(|p| p.to_path_buf()),
                err: Arc::new(err),
            })?;

        Ok(Self::from_ast(ast, file_path))
    }

    pub(crate) fn location_of(&self, pos: &ast::AstPos) -> loc::SourceLocation {
        loc::SourceLocation::from_execdoc_ast_position(
            self.file_path.as_deref(),
            pos,
        )
    }
}

#[derive(Clone, Debug, Error)]
pub enum SourceDocumentLoadError {
    #[error("Failed to read file at {file_path:?}: {err}")]
    FileReadError {
        file_path: PathBuf,
        err: Arc<std::io::Error>,
    },

    #[error("Error parsing executable document {file_path:?}: {err}")]
    ParseError {
        file_path: Option<PathBuf>,
        err: Arc<ast::operation::ParseError>,
    },

    #[error("Path is not a file: {0:?}")]
    PathIsNotAFile(PathBuf),
}
