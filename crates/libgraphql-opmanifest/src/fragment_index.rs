use crate::ast;
use crate::loc;
use crate::SourceDocument;
use std::collections::HashMap;

/// A named fragment definition as found at the top level of some
/// [`SourceDocument`], paired with where it was defined.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedFragment {
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) definition: ast::operation::FragmentDefinition,
}

impl IndexedFragment {
    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn definition(&self) -> &ast::operation::FragmentDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        self.definition.name.as_str()
    }
}

/// Flat, ordered lookup table of every named fragment definition across a set
/// of [`SourceDocument`]s.
///
/// Order is document input order, then definition order within each
/// document. Fragment names are not checked for uniqueness: lookups by name
/// resolve to the first fragment registered under that name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FragmentIndex {
    pub(crate) fragments: Vec<IndexedFragment>,
    first_index_by_name: HashMap<String, usize>,
}

impl FragmentIndex {
    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a SourceDocument>,
    ) -> Self {
        let mut builder = FragmentIndexBuilder::new();
        for document in documents {
            builder.add_document(document);
        }
        builder.build()
    }

    pub fn fragments(&self) -> &[IndexedFragment] {
        &self.fragments
    }

    pub fn get(&self, name: &str) -> Option<&IndexedFragment> {
        self.first_index_by_name
            .get(name)
            .map(|idx| &self.fragments[*idx])
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}

/// Builder for a [`FragmentIndex`].
///
/// ```
/// use libgraphql_opmanifest::FragmentIndexBuilder;
/// use libgraphql_opmanifest::SourceDocument;
///
/// let doc = SourceDocument::from_str(
///     "fragment UserFields on User { id name }",
///     None,
/// ).unwrap();
///
/// let mut builder = FragmentIndexBuilder::new();
/// builder.add_document(&doc);
/// let index = builder.build();
///
/// assert!(index.get("UserFields").is_some());
/// ```
#[derive(Debug, Default)]
pub struct FragmentIndexBuilder {
    fragments: Vec<IndexedFragment>,
}

impl FragmentIndexBuilder {
    pub fn new() -> Self {
        Self {
            fragments: vec![],
        }
    }

    /// Append every named top-level fragment definition in `document`.
    ///
    /// Operation definitions are ignored. Fragments without a name are
    /// dropped rather than reported.
    pub fn add_document(&mut self, document: &SourceDocument) {
        for def in &document.ast.definitions {
            let ast::operation::Definition::Fragment(frag_def) = def else {
                continue;
            };

            if frag_def.name.is_empty() {
                log::trace!(
                    "Skipping anonymous fragment definition at {}.",
                    document.location_of(&frag_def.position),
                );
                continue;
            }

            self.fragments.push(IndexedFragment {
                def_location: document.location_of(&frag_def.position),
                definition: frag_def.clone(),
            });
        }
    }

    pub fn build(self) -> FragmentIndex {
        let mut first_index_by_name = HashMap::new();
        for (idx, fragment) in self.fragments.iter().enumerate() {
            first_index_by_name
                .entry(fragment.name().to_string())
                .or_insert(idx);
        }

        log::debug!("Indexed {} fragment definitions.", self.fragments.len());

        FragmentIndex {
            fragments: self.fragments,
            first_index_by_name,
        }
    }
}
