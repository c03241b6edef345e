use crate::annotation_extractor::AnnotationExtractor;
use crate::ast;
use crate::document_rewriter;
use crate::fragment_resolver;
use crate::loc;
use crate::operation_record;
use crate::query_printer;
use crate::FragmentIndex;
use crate::IndexedFragment;
use crate::ManifestConfig;
use crate::ManifestConfigError;
use crate::OperationKind;
use crate::OperationManifest;
use crate::OperationRecord;
use crate::SourceDocument;
use crate::SourceDocumentLoadError;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

type Result<T> = std::result::Result<T, OperationManifestBuildError>;

/// Builds an [`OperationManifest`] from a set of executable documents.
///
/// Every named operation across all added documents becomes one
/// [`OperationRecord`] whose `query` carries the operation plus exactly the
/// fragments it transitively spreads (found in any of the documents), with
/// behaviour directives stripped out and captured in `behaviour`.
///
/// ```
/// use libgraphql_opmanifest::ManifestConfig;
/// use libgraphql_opmanifest::OperationManifestBuilder;
///
/// let mut builder = OperationManifestBuilder::new(ManifestConfig::default());
/// builder.add_from_str(
///     "fragment UserFields on User { id name }",
///     None,
/// ).unwrap();
/// builder.add_from_str(
///     "query GetUser @pcached(ttl: 30) { me { ...UserFields } }",
///     None,
/// ).unwrap();
///
/// let manifest = builder.build().unwrap();
/// let record = manifest.get("GetUser").unwrap();
/// assert_eq!(record.behaviour["ttl"].as_i64(), Some(30));
/// assert!(record.query.contains("fragment UserFields on User"));
/// assert!(!record.query.contains("pcached"));
/// ```
#[derive(Debug)]
pub struct OperationManifestBuilder {
    pub(crate) config: ManifestConfig,
    pub(crate) documents: Vec<SourceDocument>,
}

impl OperationManifestBuilder {
    pub fn new(config: ManifestConfig) -> Self {
        Self {
            config,
            documents: vec![],
        }
    }

    /// Add a document after any previously added documents. Input order
    /// determines both fragment-index order and record order.
    pub fn add_document(&mut self, document: SourceDocument) {
        self.documents.push(document);
    }

    pub fn add_from_file(
        &mut self,
        file_path: impl AsRef<Path>,
    ) -> std::result::Result<(), SourceDocumentLoadError> {
        self.add_document(SourceDocument::from_file(file_path)?);
        Ok(())
    }

    pub fn add_from_str(
        &mut self,
        content: impl AsRef<str>,
        file_path: Option<&Path>,
    ) -> std::result::Result<(), SourceDocumentLoadError> {
        self.add_document(SourceDocument::from_str(content, file_path)?);
        Ok(())
    }

    pub fn build(self) -> Result<OperationManifest> {
        self.config.validate()?;

        let fragment_index = FragmentIndex::from_documents(&self.documents);
        let mut emitted: HashMap<String, loc::SourceLocation> = HashMap::new();
        let mut records = vec![];

        for document in &self.documents {
            for def in &document.ast.definitions {
                let ast::operation::Definition::Operation(op_def) = def else {
                    continue;
                };

                let op_location = document.location_of(
                    &operation_record::operation_position(op_def),
                );
                let Some(operation_name) = operation_record::operation_name(op_def) else {
                    return Err(OperationManifestBuildError::UnnamedOperation {
                        location: op_location,
                    });
                };

                let required_fragments = fragment_resolver::resolve_required_fragments(
                    op_def,
                    &fragment_index,
                    &op_location,
                )?;
                log::debug!(
                    "Operation `{operation_name}` requires {} fragment(s).",
                    required_fragments.len(),
                );

                let record = self.build_record(
                    operation_name,
                    op_def,
                    &required_fragments,
                    &op_location,
                )?;

                if let Some(first_def_location) = emitted.get(&record.operation_name) {
                    return Err(OperationManifestBuildError::DuplicateOperationName {
                        operation_name: record.operation_name,
                        first_def_location: first_def_location.to_owned(),
                        second_def_location: op_location,
                    });
                }
                emitted.insert(record.operation_name.clone(), op_location);
                records.push(record);
            }
        }

        log::debug!("Built manifest with {} operation(s).", records.len());
        Ok(OperationManifest { records })
    }

    fn build_record(
        &self,
        operation_name: &str,
        op_def: &ast::operation::OperationDefinition,
        required_fragments: &[&IndexedFragment],
        op_location: &loc::SourceLocation,
    ) -> Result<OperationRecord> {
        let mut document = ast::operation::Document {
            definitions: required_fragments
                .iter()
                .map(|fragment| ast::operation::Definition::Fragment(
                    fragment.definition.clone(),
                ))
                .chain(std::iter::once(
                    ast::operation::Definition::Operation(op_def.clone()),
                ))
                .collect(),
        };

        let mut extractor = AnnotationExtractor::new(
            self.config.directive_prefix.as_str(),
            op_location.to_owned(),
        );
        document_rewriter::rewrite_document(&mut document, &mut extractor)?;

        Ok(OperationRecord {
            operation_name: operation_name.to_string(),
            operation_type: OperationKind::from_ast(op_def),
            query: query_printer::print_document(&document),
            behaviour: extractor.into_behaviour(),
        })
    }
}

#[derive(Clone, Debug, Error)]
pub enum OperationManifestBuildError {
    #[error(
        "Duplicate operation name `{operation_name}` (first defined at \
        {first_def_location}, redefined at {second_def_location})"
    )]
    DuplicateOperationName {
        operation_name: String,
        first_def_location: loc::SourceLocation,
        second_def_location: loc::SourceLocation,
    },

    #[error(transparent)]
    InvalidConfig(#[from] ManifestConfigError),

    #[error(
        "Missing fragment `{fragment_name}` referenced from `{referenced_from}` \
        at {location}"
    )]
    MissingFragment {
        fragment_name: String,
        referenced_from: String,
        location: loc::SourceLocation,
    },

    #[error("Operations must be named; found an anonymous operation at {location}")]
    UnnamedOperation {
        location: loc::SourceLocation,
    },

    #[error(
        "Unsupported argument type `{value_kind}` on directive \
        `@{directive_name}` at {location}"
    )]
    UnsupportedArgumentType {
        directive_name: String,
        location: loc::SourceLocation,
        value_kind: String,
    },
}
