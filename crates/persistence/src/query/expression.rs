//! Single-column expressions and their boolean combinations.

use std::fmt;

use serde_json::Value;

use crate::error::QueryError;

use super::builder::{SqlFragment, SqlParam};
use super::scalar::Scalar;

/// Comparison operators available to expressions.
///
/// Operators are fixed literals, never taken from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// ` LIKE `
    Like,
}

impl Comparison {
    /// Returns the SQL text of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Like => " LIKE ",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A predicate over one column.
///
/// The column is a `'static` literal so request data can only ever reach the
/// value position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    column: &'static str,
    comparison: Comparison,
    value: Scalar,
}

impl Expression {
    /// Creates a new expression.
    pub fn new(column: &'static str, comparison: Comparison, value: impl Into<Scalar>) -> Self {
        Self {
            column,
            comparison,
            value: value.into(),
        }
    }

    /// Creates an expression from an untyped JSON value.
    ///
    /// Floats, booleans, arrays and objects are rejected.
    pub fn try_new(
        column: &'static str,
        comparison: Comparison,
        value: &Value,
    ) -> Result<Self, QueryError> {
        Ok(Self::new(column, comparison, Scalar::try_from(value)?))
    }

    /// `column = value`
    pub fn eq(column: &'static str, value: impl Into<Scalar>) -> Self {
        Self::new(column, Comparison::Eq, value)
    }

    /// `column >= value`
    pub fn ge(column: &'static str, value: impl Into<Scalar>) -> Self {
        Self::new(column, Comparison::Ge, value)
    }

    /// `column <= value`
    pub fn le(column: &'static str, value: impl Into<Scalar>) -> Self {
        Self::new(column, Comparison::Le, value)
    }

    /// Returns the column name.
    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Returns the comparison operator.
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Returns the compared value.
    pub fn value(&self) -> &Scalar {
        &self.value
    }

    /// Returns true if the expression renders to nothing.
    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }

    /// Renders the expression as literal SQL.
    ///
    /// Integers are emitted bare. Text is trimmed, HTML-escaped and single
    /// quoted. Absent or blank values render as an empty string.
    pub fn render(&self) -> String {
        match &self.value {
            Scalar::Absent => String::new(),
            Scalar::Int(value) => format!("{}{}{}", self.column, self.comparison, value),
            Scalar::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return String::new();
                }
                format!("{}{}'{}'", self.column, self.comparison, escape_html(text))
            }
        }
    }

    /// Renders the expression with a `?` placeholder and its bound value.
    ///
    /// Bound text is trimmed but not escaped.
    pub fn to_fragment(&self) -> SqlFragment {
        let param = match &self.value {
            Scalar::Absent => return SqlFragment::empty(),
            Scalar::Int(value) => SqlParam::Integer(*value),
            Scalar::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return SqlFragment::empty();
                }
                SqlParam::string(text)
            }
        };

        SqlFragment::with_params(
            format!("{}{}?", self.column, self.comparison),
            vec![param],
        )
    }
}

/// Escapes text the way HTML template engines do for attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&#34;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\0' => escaped.push('\u{FFFD}'),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Boolean operator joining the children of a composite predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    /// Logical conjunction.
    And,
    /// Logical disjunction.
    Or,
}

impl BoolOp {
    /// Returns the SQL keyword.
    pub fn as_sql(&self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
        }
    }
}

/// An expression or a boolean combination of predicates.
///
/// Composites drop children that render empty. One remaining child renders
/// as itself; two or more are joined and wrapped in a single pair of
/// parentheses: `( a AND b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// A single expression.
    Expr(Expression),
    /// A combination of child predicates.
    Composite {
        /// Operator placed between rendered children.
        op: BoolOp,
        /// Child predicates in rendering order.
        children: Vec<Predicate>,
    },
}

impl Predicate {
    /// Combines predicates with `AND`.
    pub fn and<I, P>(children: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        Self::combine(BoolOp::And, children)
    }

    /// Combines predicates with `OR`.
    pub fn or<I, P>(children: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        Self::combine(BoolOp::Or, children)
    }

    /// Combines predicates with the given operator.
    pub fn combine<I, P>(op: BoolOp, children: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        Predicate::Composite {
            op,
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// A predicate that matches everything and renders to nothing.
    pub fn empty() -> Self {
        Predicate::Composite {
            op: BoolOp::And,
            children: Vec::new(),
        }
    }

    /// Returns true if the predicate renders to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Predicate::Expr(expression) => expression.is_blank(),
            Predicate::Composite { children, .. } => children.iter().all(Predicate::is_blank),
        }
    }

    /// Renders the predicate as literal SQL.
    pub fn render(&self) -> String {
        match self {
            Predicate::Expr(expression) => expression.render(),
            Predicate::Composite { op, children } => {
                let mut parts: Vec<String> = children
                    .iter()
                    .map(Predicate::render)
                    .filter(|part| !part.is_empty())
                    .collect();

                if parts.len() <= 1 {
                    return parts.pop().unwrap_or_default();
                }

                format!("( {})", parts.join(&format!(" {} ", op.as_sql())))
            }
        }
    }

    /// Renders the predicate with placeholders and ordered bound values.
    pub fn to_fragment(&self) -> SqlFragment {
        match self {
            Predicate::Expr(expression) => expression.to_fragment(),
            Predicate::Composite { op, children } => {
                let mut parts: Vec<SqlFragment> = children
                    .iter()
                    .map(Predicate::to_fragment)
                    .filter(|part| !part.is_empty())
                    .collect();

                if parts.len() <= 1 {
                    return parts.pop().unwrap_or_default();
                }

                let separator = format!(" {} ", op.as_sql());
                let sql = parts
                    .iter()
                    .map(|part| part.sql.as_str())
                    .collect::<Vec<_>>()
                    .join(&separator);
                let params = parts.into_iter().flat_map(|part| part.params).collect();

                SqlFragment::with_params(format!("( {})", sql), params)
            }
        }
    }
}

impl From<Expression> for Predicate {
    fn from(expression: Expression) -> Self {
        Predicate::Expr(expression)
    }
}
