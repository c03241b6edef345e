use crate::ast;

/// Outcome of visiting a single node during [`rewrite_document`].
#[derive(Clone, Debug, PartialEq)]
pub enum Rewrite<T> {
    /// Leave the node as-is.
    Keep,

    /// Swap the node out for a different one.
    Replace(T),

    /// Remove the node from its parent.
    Delete,
}

/// Per-node-kind hooks invoked by [`rewrite_document`].
///
/// Every hook defaults to [`Rewrite::Keep`], so implementors only need to
/// override the node kinds they care about.
pub trait DocumentRewriter {
    type Error;

    fn rewrite_directive(
        &mut self,
        _directive: &ast::operation::Directive,
    ) -> Result<Rewrite<ast::operation::Directive>, Self::Error> {
        Ok(Rewrite::Keep)
    }

    fn rewrite_selection(
        &mut self,
        _selection: &ast::operation::Selection,
    ) -> Result<Rewrite<ast::operation::Selection>, Self::Error> {
        Ok(Rewrite::Keep)
    }
}

/// Walk `document` in source order and apply `rewriter` to every node it has
/// a hook for.
///
/// Definitions are visited in order. Within a definition the definition's own
/// directives are visited first, then its selection set depth-first: each
/// selection is offered to the rewriter, then its directives, then its
/// children. Nodes produced by [`Rewrite::Replace`] are descended into; nodes
/// removed by [`Rewrite::Delete`] are not.
///
/// If a hook fails the walk stops and the error is returned. Nodes visited
/// before the failure keep their rewrites. Nodes from the failure point on are
/// left in place untouched.
pub fn rewrite_document<R: DocumentRewriter>(
    document: &mut ast::operation::Document,
    rewriter: &mut R,
) -> Result<(), R::Error> {
    for def in document.definitions.iter_mut() {
        use ast::operation::Definition;
        use ast::operation::OperationDefinition;
        match def {
            Definition::Fragment(frag_def) => {
                rewrite_directives(&mut frag_def.directives, rewriter)?;
                rewrite_selection_set(&mut frag_def.selection_set, rewriter)?;
            },

            Definition::Operation(OperationDefinition::Query(query)) => {
                rewrite_directives(&mut query.directives, rewriter)?;
                rewrite_selection_set(&mut query.selection_set, rewriter)?;
            },

            Definition::Operation(OperationDefinition::Mutation(mutation)) => {
                rewrite_directives(&mut mutation.directives, rewriter)?;
                rewrite_selection_set(&mut mutation.selection_set, rewriter)?;
            },

            Definition::Operation(OperationDefinition::Subscription(subscription)) => {
                rewrite_directives(&mut subscription.directives, rewriter)?;
                rewrite_selection_set(&mut subscription.selection_set, rewriter)?;
            },

            Definition::Operation(OperationDefinition::SelectionSet(selection_set)) =>
                rewrite_selection_set(selection_set, rewriter)?,
        }
    }

    Ok(())
}

fn rewrite_directives<R: DocumentRewriter>(
    directives: &mut Vec<ast::operation::Directive>,
    rewriter: &mut R,
) -> Result<(), R::Error> {
    let mut original = std::mem::take(directives).into_iter();
    while let Some(directive) = original.next() {
        let rewrite = match rewriter.rewrite_directive(&directive) {
            Ok(rewrite) => rewrite,
            Err(err) => {
                directives.push(directive);
                directives.extend(original);
                return Err(err);
            },
        };

        match rewrite {
            Rewrite::Keep => directives.push(directive),
            Rewrite::Replace(replacement) => directives.push(replacement),
            Rewrite::Delete => (),
        }
    }
    Ok(())
}

fn rewrite_selection_set<R: DocumentRewriter>(
    selection_set: &mut ast::operation::SelectionSet,
    rewriter: &mut R,
) -> Result<(), R::Error> {
    let mut original = std::mem::take(&mut selection_set.items).into_iter();
    while let Some(selection) = original.next() {
        let mut selection = match rewriter.rewrite_selection(&selection) {
            Ok(Rewrite::Keep) => selection,
            Ok(Rewrite::Replace(replacement)) => replacement,
            Ok(Rewrite::Delete) => continue,
            Err(err) => {
                selection_set.items.push(selection);
                selection_set.items.extend(original);
                return Err(err);
            },
        };

        let result = rewrite_selection_children(&mut selection, rewriter);
        selection_set.items.push(selection);
        if let Err(err) = result {
            selection_set.items.extend(original);
            return Err(err);
        }
    }
    Ok(())
}

fn rewrite_selection_children<R: DocumentRewriter>(
    selection: &mut ast::operation::Selection,
    rewriter: &mut R,
) -> Result<(), R::Error> {
    use ast::operation::Selection;
    match selection {
        Selection::Field(field) => {
            rewrite_directives(&mut field.directives, rewriter)?;
            rewrite_selection_set(&mut field.selection_set, rewriter)
        },

        Selection::FragmentSpread(spread) =>
            rewrite_directives(&mut spread.directives, rewriter),

        Selection::InlineFragment(inline_frag) => {
            rewrite_directives(&mut inline_frag.directives, rewriter)?;
            rewrite_selection_set(&mut inline_frag.selection_set, rewriter)
        },
    }
}
