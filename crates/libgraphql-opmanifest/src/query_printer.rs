use crate::ast;
use std::fmt;
use std::fmt::Display;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Print an executable document in `graphql_parser`'s layout (two-space
/// indentation, one blank line between definitions).
///
/// Unlike `graphql_parser`'s own `Display`, literal values are printed so
/// that parsing the output yields exactly the values that were printed:
///
/// * strings are always single-line quoted strings; characters outside the
///   BMP are written raw and control characters as hex `\uXXXX` escapes,
/// * floats keep a fractional part or an exponent (`1.0`, `1.5e+90`),
/// * variable definitions are comma-separated for every operation kind.
///
/// ```
/// use libgraphql_opmanifest::ast;
/// use libgraphql_opmanifest::print_document;
///
/// let doc = ast::operation::parse(r#"query Q { a(s: "😀", f: 1.0) }"#).unwrap();
/// assert_eq!(print_document(&doc), "query Q {\n  a(s: \"😀\", f: 1.0)\n}\n");
/// ```
pub fn print_document(document: &ast::operation::Document) -> String {
    DocumentDisplay(document).to_string()
}

struct DocumentDisplay<'a>(&'a ast::operation::Document);

impl Display for DocumentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, def) in self.0.definitions.iter().enumerate() {
            if idx > 0 {
                f.write_char('\n')?;
            }
            write_definition(f, def)?;
        }
        Ok(())
    }
}

fn write_definition(
    f: &mut fmt::Formatter<'_>,
    def: &ast::operation::Definition,
) -> fmt::Result {
    use ast::operation::Definition;
    use ast::operation::OperationDefinition as OpDef;
    match def {
        Definition::Fragment(frag_def) => {
            write!(f, "fragment {} ", frag_def.name)?;
            write_type_condition(f, &frag_def.type_condition)?;
            write_directives(f, &frag_def.directives)?;
            f.write_char(' ')?;
            write_selection_set(f, &frag_def.selection_set, 0)
        },

        Definition::Operation(OpDef::Query(query)) => write_operation(
            f,
            "query",
            query.name.as_deref(),
            &query.variable_definitions,
            &query.directives,
            &query.selection_set,
        ),

        Definition::Operation(OpDef::Mutation(mutation)) => write_operation(
            f,
            "mutation",
            mutation.name.as_deref(),
            &mutation.variable_definitions,
            &mutation.directives,
            &mutation.selection_set,
        ),

        Definition::Operation(OpDef::Subscription(subscription)) => write_operation(
            f,
            "subscription",
            subscription.name.as_deref(),
            &subscription.variable_definitions,
            &subscription.directives,
            &subscription.selection_set,
        ),

        Definition::Operation(OpDef::SelectionSet(selection_set)) =>
            write_selection_set(f, selection_set, 0),
    }
}

fn write_operation(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    name: Option<&str>,
    variable_definitions: &[ast::operation::VariableDefinition],
    directives: &[ast::operation::Directive],
    selection_set: &ast::operation::SelectionSet,
) -> fmt::Result {
    f.write_str(keyword)?;
    if let Some(name) = name {
        write!(f, " {name}")?;
    }

    if !variable_definitions.is_empty() {
        f.write_char('(')?;
        for (idx, var_def) in variable_definitions.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "${}: {}", var_def.name, var_def.var_type)?;
            if let Some(default_value) = &var_def.default_value {
                f.write_str(" = ")?;
                write_value(f, default_value)?;
            }
        }
        f.write_char(')')?;
    }

    write_directives(f, directives)?;
    f.write_char(' ')?;
    write_selection_set(f, selection_set, 0)
}

fn write_type_condition(
    f: &mut fmt::Formatter<'_>,
    type_condition: &ast::operation::TypeCondition,
) -> fmt::Result {
    let ast::operation::TypeCondition::On(type_name) = type_condition;
    write!(f, "on {type_name}")
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

/// Writes `{`, the selections one per line at `depth + 1`, then `}` and a
/// newline.
fn write_selection_set(
    f: &mut fmt::Formatter<'_>,
    selection_set: &ast::operation::SelectionSet,
    depth: usize,
) -> fmt::Result {
    f.write_str("{\n")?;
    for selection in &selection_set.items {
        write_selection(f, selection, depth + 1)?;
    }
    write_indent(f, depth)?;
    f.write_str("}\n")
}

fn write_selection(
    f: &mut fmt::Formatter<'_>,
    selection: &ast::operation::Selection,
    depth: usize,
) -> fmt::Result {
    write_indent(f, depth)?;

    use ast::operation::Selection;
    match selection {
        Selection::Field(field) => {
            if let Some(alias) = &field.alias {
                write!(f, "{alias}: ")?;
            }
            f.write_str(&field.name)?;
            write_arguments(f, &field.arguments)?;
            write_directives(f, &field.directives)?;
            if field.selection_set.items.is_empty() {
                f.write_char('\n')
            } else {
                f.write_char(' ')?;
                write_selection_set(f, &field.selection_set, depth)
            }
        },

        Selection::FragmentSpread(spread) => {
            write!(f, "...{}", spread.fragment_name)?;
            write_directives(f, &spread.directives)?;
            f.write_char('\n')
        },

        Selection::InlineFragment(inline_frag) => {
            f.write_str("...")?;
            if let Some(type_condition) = &inline_frag.type_condition {
                f.write_char(' ')?;
                write_type_condition(f, type_condition)?;
            }
            write_directives(f, &inline_frag.directives)?;
            f.write_char(' ')?;
            write_selection_set(f, &inline_frag.selection_set, depth)
        },
    }
}

fn write_directives(
    f: &mut fmt::Formatter<'_>,
    directives: &[ast::operation::Directive],
) -> fmt::Result {
    for directive in directives {
        write!(f, " @{}", directive.name)?;
        write_arguments(f, &directive.arguments)?;
    }
    Ok(())
}

fn write_arguments(
    f: &mut fmt::Formatter<'_>,
    arguments: &[(String, ast::Value)],
) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }

    f.write_char('(')?;
    for (idx, (arg_name, arg_value)) in arguments.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg_name}: ")?;
        write_value(f, arg_value)?;
    }
    f.write_char(')')
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &ast::Value) -> fmt::Result {
    match value {
        ast::Value::String(value) => write_quoted(f, value),
        ast::Value::Float(value) => write_float(f, *value),

        ast::Value::List(items) => {
            f.write_char('[')?;
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_char(']')
        },

        ast::Value::Object(fields) => {
            f.write_char('{')?;
            for (idx, (field_name, field_value)) in fields.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{field_name}: ")?;
                write_value(f, field_value)?;
            }
            f.write_char('}')
        },

        // Variables, ints, booleans, null and enums print correctly upstream.
        ast::Value::Variable(_)
        | ast::Value::Int(_)
        | ast::Value::Boolean(_)
        | ast::Value::Null
        | ast::Value::Enum(_) => write!(f, "{value}"),
    }
}

/// `{:?}` always keeps a `.0` or an exponent, so the output lexes as a float.
/// Positive exponents get an explicit `+`: the parser rejects exponents whose
/// first digit is `0` or `9`.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') =>
            write!(f, "{mantissa}e+{exponent}"),
        _ => f.write_str(&repr),
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\r' => f.write_str("\\r"),
            '\n' => f.write_str("\\n"),
            '\t' => f.write_str("\\t"),
            '\\' => f.write_str("\\\\"),
            '"' => f.write_str("\\\""),
            // `\b` and `\f` are avoided: the parser decodes `\b` as U+0010.
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32),
            c => f.write_char(c),
        }?
    }
    f.write_char('"')
}
