use crate::ast;
use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes a PathBuf to the file the position was parsed from (if any).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl SourceLocation {
    pub(crate) fn from_execdoc_ast_position(
        file: Option<&Path>,
        pos: &ast::AstPos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.to_path_buf()),
            line: pos.line,
        }
    }

    /// Produce a location in the same file as `self`, but at `pos`.
    pub(crate) fn with_ast_position(&self, pos: &ast::AstPos) -> Self {
        Self {
            col: pos.column,
            file: self.file.clone(),
            line: pos.line,
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "<inline>:{}:{}", self.line, self.col),
        }
    }
}
