use crate::instance_key::InstanceKey;
use hcl_edit::expr::{Expression, TraversalOperator};
use hcl_edit::repr::{Decorated, Span};
use std::ops::Range;

/// One element of a flattened traversal
///
/// `a.b[0]` flattens to `[Attr(a), Attr(b), Index(0)]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Step {
    pub kind: StepKind,
    pub span: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StepKind {
    Attr(String),
    /// the error holds the reason why the index is not a valid instance key
    Index(Result<InstanceKey, &'static str>),
}

impl Step {
    pub fn attr(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Attr(name) => Some(name),
            StepKind::Index(_) => None,
        }
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.attr() == Some(keyword)
    }

    fn from_operator(
        operator: &Decorated<TraversalOperator>,
        source: &str,
    ) -> Result<Self, InvalidTraversal> {
        let span = operator.span();

        let kind = match operator.value() {
            TraversalOperator::GetAttr(ident) => StepKind::Attr(ident.value().as_str().to_string()),
            TraversalOperator::Index(expr) => StepKind::Index(index_key(expr, source)),
            TraversalOperator::LegacyIndex(index) => StepKind::Index(
                i64::try_from(*index.value())
                    .map(InstanceKey::Int)
                    .map_err(|_| INDEX_OUT_OF_RANGE),
            ),
            _ => {
                return Err(InvalidTraversal::new(
                    "Splat operators may not be used in an address.",
                    span,
                ))
            }
        };

        Ok(Self { kind, span })
    }
}

const INDEX_OUT_OF_RANGE: &str = "Index is out of range.";

/// Integer keys must be written as plain digits, `1.0` or `1e0` are rejected
fn index_key(expr: &Expression, source: &str) -> Result<InstanceKey, &'static str> {
    match expr {
        Expression::Number(number) => {
            let digits_only = expr
                .span()
                .and_then(|span| source.get(span))
                .map_or(true, |literal| literal.bytes().all(|b| b.is_ascii_digit()));

            let number = number.value();
            let int = number.as_u64().filter(|_| digits_only && !number.is_f64());
            let Some(int) = int else {
                return Err("Index must be a non-negative whole number.");
            };
            i64::try_from(int)
                .map(InstanceKey::Int)
                .map_err(|_| INDEX_OUT_OF_RANGE)
        }
        Expression::String(string) => Ok(InstanceKey::String(string.value().to_string())),
        _ => Err("Index must be a non-negative whole number or a quoted string."),
    }
}

/// The expression is not a plain traversal
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InvalidTraversal {
    pub detail: &'static str,
    pub span: Option<Range<usize>>,
}

impl InvalidTraversal {
    fn new(detail: &'static str, span: Option<Range<usize>>) -> Self {
        Self { detail, span }
    }
}

pub(crate) trait ExpressionExt {
    /// `source` is the text the expression was parsed from
    fn traversal_steps(&self, source: &str) -> Result<Vec<Step>, InvalidTraversal>;
}

impl ExpressionExt for Expression {
    /// Flattens a variable or traversal into its steps
    ///
    /// Nested traversals (`<foo.bar>.baz`) are flattened as if they were one.
    fn traversal_steps(&self, source: &str) -> Result<Vec<Step>, InvalidTraversal> {
        match self {
            Expression::Variable(var) => Ok(vec![Step {
                kind: StepKind::Attr(var.value().as_str().to_string()),
                span: var.span(),
            }]),
            Expression::Traversal(traversal) => {
                let mut steps = traversal.expr.traversal_steps(source)?;
                for operator in &traversal.operators {
                    steps.push(Step::from_operator(operator, source)?);
                }

                tracing::trace!(?steps, "traversal flattened");
                Ok(steps)
            }
            other => Err(InvalidTraversal::new(
                "An address must be a reference like module.name or type.name.",
                other.span(),
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<StepKind> {
        hcl_edit::parser::parse_expr(input)
            .expect("valid expression")
            .traversal_steps(input)
            .expect("valid traversal")
            .into_iter()
            .map(|step| step.kind)
            .collect()
    }

    #[test]
    fn flatten() {
        assert_eq!(
            kinds(r#"module.foo[1].test_resource.bar["x"]"#),
            vec![
                StepKind::Attr("module".to_string()),
                StepKind::Attr("foo".to_string()),
                StepKind::Index(Ok(InstanceKey::Int(1))),
                StepKind::Attr("test_resource".to_string()),
                StepKind::Attr("bar".to_string()),
                StepKind::Index(Ok(InstanceKey::from("x"))),
            ]
        );
    }

    #[test]
    fn invalid_index() {
        assert!(matches!(
            kinds("foo.bar[1.5]").as_slice(),
            [_, _, StepKind::Index(Err(_))]
        ));
        assert!(matches!(
            kinds("foo.bar[var.x]").as_slice(),
            [_, _, StepKind::Index(Err(_))]
        ));
    }

    #[test]
    fn integral_floats_are_not_integer_keys() {
        for input in ["foo.bar[1.0]", "foo.bar[1e0]", "foo.bar[10E1]"] {
            assert!(
                matches!(kinds(input).as_slice(), [_, _, StepKind::Index(Err(_))]),
                "{input}"
            );
        }

        assert_eq!(kinds("foo.bar[10]")[2], StepKind::Index(Ok(InstanceKey::Int(10))));
    }

    #[test]
    fn not_a_traversal() {
        let expr = hcl_edit::parser::parse_expr(r#""foo""#).expect("valid expression");
        assert!(expr.traversal_steps(r#""foo""#).is_err());
    }
}
