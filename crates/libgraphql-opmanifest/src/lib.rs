//! Flattens a set of GraphQL executable documents into an
//! [`OperationManifest`]: one self-contained [`OperationRecord`] per named
//! operation, carrying exactly the fragments that operation needs and the
//! "behaviour" metadata declared through custom directives.
//!
//! A request router can then load the manifest, index it by operation name,
//! and submit each record's `query` verbatim without re-resolving fragments
//! at request time.

mod annotation_extractor;
pub mod ast;
mod behaviour;
mod config;
mod document_rewriter;
mod fragment_index;
mod fragment_resolver;
pub mod loc;
mod operation_manifest;
mod operation_manifest_builder;
mod operation_record;
mod output;
mod query_printer;
mod source_document;

pub use annotation_extractor::AnnotationExtractor;
pub use annotation_extractor::PCACHED_DIRECTIVE_NAME;
pub use behaviour::Behaviour;
pub use behaviour::BehaviourValue;
pub use config::DEFAULT_DIRECTIVE_PREFIX;
pub use config::ManifestConfig;
pub use config::ManifestConfigError;
pub use document_rewriter::DocumentRewriter;
pub use document_rewriter::Rewrite;
pub use document_rewriter::rewrite_document;
pub use fragment_index::FragmentIndex;
pub use fragment_index::FragmentIndexBuilder;
pub use fragment_index::IndexedFragment;
pub use fragment_resolver::resolve_required_fragments;
pub use operation_manifest::OperationManifest;
pub use operation_manifest_builder::OperationManifestBuildError;
pub use operation_manifest_builder::OperationManifestBuilder;
pub use operation_record::OperationKind;
pub use operation_record::OperationRecord;
pub use output::MANIFEST_FILE_EXTENSION;
pub use output::ManifestOutputError;
pub use output::validate_output_path;
pub use output::write_manifest_file;
pub use query_printer::print_document;
pub use source_document::SourceDocument;
pub use source_document::SourceDocumentLoadError;
