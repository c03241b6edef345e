use crate::ast;
use crate::Behaviour;

/// The kind of a GraphQL operation, serialized as `"query"`, `"mutation"`, or
/// `"subscription"`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub fn from_ast(operation: &ast::operation::OperationDefinition) -> Self {
        use ast::operation::OperationDefinition as OpDef;
        match operation {
            OpDef::Mutation(_) => Self::Mutation,
            OpDef::Query(_) | OpDef::SelectionSet(_) => Self::Query,
            OpDef::Subscription(_) => Self::Subscription,
        }
    }
}
impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        })
    }
}

/// A single entry in an [`OperationManifest`](crate::OperationManifest).
///
/// `query` is a self-contained executable document: the operation itself
/// preceded by exactly the fragments it transitively spreads, with all
/// behaviour directives removed.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub operation_name: String,
    pub operation_type: OperationKind,
    pub query: String,
    pub behaviour: Behaviour,
}

pub(crate) fn operation_name(
    operation: &ast::operation::OperationDefinition,
) -> Option<&str> {
    use ast::operation::OperationDefinition as OpDef;
    match operation {
        OpDef::Mutation(mutation) => mutation.name.as_deref(),
        OpDef::Query(query) => query.name.as_deref(),
        OpDef::SelectionSet(_) => None,
        OpDef::Subscription(subscription) => subscription.name.as_deref(),
    }
}

pub(crate) fn operation_position(
    operation: &ast::operation::OperationDefinition,
) -> ast::AstPos {
    use ast::operation::OperationDefinition as OpDef;
    match operation {
        OpDef::Mutation(mutation) => mutation.position,
        OpDef::Query(query) => query.position,
        OpDef::SelectionSet(selection_set) => selection_set.span.0,
        OpDef::Subscription(subscription) => subscription.position,
    }
}

pub(crate) fn operation_selection_set(
    operation: &ast::operation::OperationDefinition,
) -> &ast::operation::SelectionSet {
    use ast::operation::OperationDefinition as OpDef;
    match operation {
        OpDef::Mutation(mutation) => &mutation.selection_set,
        OpDef::Query(query) => &query.selection_set,
        OpDef::SelectionSet(selection_set) => selection_set,
        OpDef::Subscription(subscription) => &subscription.selection_set,
    }
}
