use crate::ast;
use crate::loc;
use crate::operation_record;
use crate::FragmentIndex;
use crate::IndexedFragment;
use crate::OperationManifestBuildError;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, OperationManifestBuildError>;

/// Compute the fragments an operation transitively depends on via
/// fragment-spreads.
///
/// The returned fragments are filtered from `fragment_index` in index order
/// (not in order of first reference), so the result is independent of how the
/// operation's selections happen to be arranged.
///
/// Spreads that form cycles are tolerated: each fragment is only ever
/// traversed once.
pub fn resolve_required_fragments<'idx>(
    operation: &ast::operation::OperationDefinition,
    fragment_index: &'idx FragmentIndex,
    operation_location: &loc::SourceLocation,
) -> Result<Vec<&'idx IndexedFragment>> {
    let mut resolver = FragmentResolver {
        fragment_index,
        required: HashSet::new(),
    };

    let operation_name = operation_record::operation_name(operation)
        .unwrap_or("<anonymous>");
    resolver.visit_selection_set(
        operation_record::operation_selection_set(operation),
        operation_name,
        operation_location,
    )?;

    Ok(fragment_index.fragments
        .iter()
        .filter(|fragment| resolver.required.contains(fragment.name()))
        .collect())
}

struct FragmentResolver<'idx> {
    fragment_index: &'idx FragmentIndex,
    required: HashSet<String>,
}

impl<'idx> FragmentResolver<'idx> {
    fn visit_selection_set(
        &mut self,
        selection_set: &ast::operation::SelectionSet,
        referenced_from: &str,
        def_location: &loc::SourceLocation,
    ) -> Result<()> {
        for selection in &selection_set.items {
            use ast::operation::Selection;
            match selection {
                Selection::Field(field) => self.visit_selection_set(
                    &field.selection_set,
                    referenced_from,
                    def_location,
                )?,

                Selection::InlineFragment(inline_frag) => self.visit_selection_set(
                    &inline_frag.selection_set,
                    referenced_from,
                    def_location,
                )?,

                Selection::FragmentSpread(spread) => {
                    let fragment_name = spread.fragment_name.as_str();
                    if !self.required.insert(fragment_name.to_string()) {
                        continue;
                    }

                    let fragment_index = self.fragment_index;
                    let fragment = fragment_index
                        .get(fragment_name)
                        .ok_or_else(|| OperationManifestBuildError::MissingFragment {
                            fragment_name: fragment_name.to_string(),
                            referenced_from: referenced_from.to_string(),
                            location: def_location.with_ast_position(&spread.position),
                        })?;

                    self.visit_selection_set(
                        &fragment.definition.selection_set,
                        fragment.name(),
                        &fragment.def_location,
                    )?;
                },
            }
        }

        Ok(())
    }
}
