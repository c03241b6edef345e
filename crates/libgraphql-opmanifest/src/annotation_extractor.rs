use crate::ast;
use crate::loc;
use crate::Behaviour;
use crate::BehaviourValue;
use crate::DocumentRewriter;
use crate::OperationManifestBuildError;
use crate::Rewrite;
use indexmap::IndexMap;

/// Name of the directive whose `ttl: Int` argument is hoisted to a top-level
/// `ttl` behaviour field.
pub const PCACHED_DIRECTIVE_NAME: &str = "pcached";
pub const PCACHED_TTL_ARG_NAME: &str = "ttl";

/// [`DocumentRewriter`] that strips behaviour directives out of a document and
/// records their arguments in a [`Behaviour`] map.
///
/// Two kinds of directive are recognized:
///
/// * `@{prefix}{key}(...)` (e.g. `@p__cache(scope: PUBLIC)`) writes
///   `behaviour[key]` as an object of its decoded arguments, or `true` if it
///   has none.
/// * `@pcached(ttl: 5)` writes `behaviour.ttl = 5`. Any other arguments are
///   ignored, and the directive is removed even when `ttl` is absent.
///
/// All other directives are left in place. Later writes to the same key win.
#[derive(Debug)]
pub struct AnnotationExtractor<'a> {
    behaviour: Behaviour,
    directive_prefix: &'a str,
    document_location: loc::SourceLocation,
}

impl<'a> AnnotationExtractor<'a> {
    pub fn new(
        directive_prefix: &'a str,
        document_location: loc::SourceLocation,
    ) -> Self {
        Self {
            behaviour: Behaviour::new(),
            directive_prefix,
            document_location,
        }
    }

    pub fn into_behaviour(self) -> Behaviour {
        self.behaviour
    }

    fn extract_prefixed(
        &mut self,
        behaviour_key: &str,
        directive: &ast::operation::Directive,
    ) -> Result<(), OperationManifestBuildError> {
        let value = if directive.arguments.is_empty() {
            BehaviourValue::Bool(true)
        } else {
            let location =
                self.document_location.with_ast_position(&directive.position);
            let mut fields = IndexMap::new();
            for (arg_name, arg_value) in &directive.arguments {
                fields.insert(
                    arg_name.to_string(),
                    BehaviourValue::from_argument(
                        arg_value,
                        directive.name.as_str(),
                        &location,
                    )?,
                );
            }
            BehaviourValue::Object(fields)
        };

        log::trace!("Extracted behaviour `{behaviour_key}` from `@{}`.", directive.name);
        self.behaviour.insert(behaviour_key.to_string(), value);
        Ok(())
    }

    fn extract_pcached(&mut self, directive: &ast::operation::Directive) {
        let ttl = directive.arguments
            .iter()
            .find(|(arg_name, _)| arg_name == PCACHED_TTL_ARG_NAME)
            .and_then(|(_, arg_value)| match arg_value {
                ast::Value::Int(number) => number.as_i64(),
                _ => None,
            });

        if let Some(ttl) = ttl {
            self.behaviour.insert(
                PCACHED_TTL_ARG_NAME.to_string(),
                BehaviourValue::Int(ttl),
            );
        }
    }
}

impl<'a> DocumentRewriter for AnnotationExtractor<'a> {
    type Error = OperationManifestBuildError;

    fn rewrite_directive(
        &mut self,
        directive: &ast::operation::Directive,
    ) -> Result<Rewrite<ast::operation::Directive>, Self::Error> {
        let directive_name = directive.name.as_str();

        if let Some(behaviour_key) = directive_name.strip_prefix(self.directive_prefix)
            && !behaviour_key.is_empty() {
            self.extract_prefixed(behaviour_key, directive)?;
            return Ok(Rewrite::Delete);
        }

        if directive_name == PCACHED_DIRECTIVE_NAME {
            self.extract_pcached(directive);
            return Ok(Rewrite::Delete);
        }

        Ok(Rewrite::Keep)
    }
}
