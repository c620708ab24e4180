//! Query assembly: base statement, optional WHERE clause, pagination.

use serde::{Deserialize, Serialize};

use super::expression::Predicate;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 1000;

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    /// The SQL clause, with `?` placeholders.
    pub sql: String,
    /// Bound parameter values, in placeholder order.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// SQL NULL.
    Null,
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a SQL fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// An empty fragment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Checks if the fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Appends another fragment's SQL and parameters.
    pub fn push(&mut self, other: SqlFragment) {
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
    }
}

#[cfg(feature = "sqlite")]
impl rusqlite::ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        match self {
            SqlParam::String(s) => s.to_sql(),
            SqlParam::Integer(i) => i.to_sql(),
            SqlParam::Null => rusqlite::types::Null.to_sql(),
        }
    }
}

/// Offset pagination appended to every listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of rows to return.
    pub limit: u32,
    /// Number of rows to skip.
    pub offset: u32,
}

impl Pagination {
    /// Creates a new pagination window.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Returns the window immediately after this one.
    pub fn next_page(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Binds a predicate and pagination onto a trusted base statement.
///
/// Stages always apply in the same order: base, `WHERE` (only when the
/// predicate renders non-empty), `ORDER BY`, then `LIMIT ... OFFSET ...`
/// exactly once at the end.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: String,
    predicate: Predicate,
    order_by: Option<&'static str>,
    pagination: Pagination,
}

impl QueryBuilder {
    /// Starts a query from a base `SELECT` statement.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            predicate: Predicate::empty(),
            order_by: None,
            pagination: Pagination::default(),
        }
    }

    /// Sets the filter predicate.
    pub fn filter(mut self, predicate: impl Into<Predicate>) -> Self {
        self.predicate = predicate.into();
        self
    }

    /// Sets an `ORDER BY` clause.
    pub fn order_by(mut self, order_by: &'static str) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Sets the pagination window.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Returns the pagination window.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Renders the query as literal SQL.
    pub fn render(&self) -> String {
        let mut sql = self.base.clone();

        let clause = self.predicate.render();
        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }

        if let Some(order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }

        sql.push_str(&format!(
            " LIMIT {} OFFSET {}",
            self.pagination.limit, self.pagination.offset
        ));
        sql
    }

    /// Builds the executable query with placeholders and bound parameters.
    pub fn build(&self) -> SqlFragment {
        let mut query = SqlFragment::new(self.base.clone());

        let clause = self.predicate.to_fragment();
        if !clause.is_empty() {
            query.sql.push_str(" WHERE ");
            query.push(clause);
        }

        if let Some(order_by) = self.order_by {
            query.sql.push_str(" ORDER BY ");
            query.sql.push_str(order_by);
        }

        query.push(SqlFragment::with_params(
            " LIMIT ? OFFSET ?",
            vec![
                SqlParam::Integer(i64::from(self.pagination.limit)),
                SqlParam::Integer(i64::from(self.pagination.offset)),
            ],
        ));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Expression, Scalar};

    const BASE: &str = "SELECT * FROM appointment";

    fn appointment_filter(
        patient_id: Scalar,
        dentist_id: Scalar,
        from_date: Scalar,
        to_date: Scalar,
    ) -> Predicate {
        Predicate::and([
            Expression::eq("patient_id", patient_id),
            Expression::eq("dentist_id", dentist_id),
            Expression::ge("date", from_date),
            Expression::le("date", to_date),
        ])
    }

    #[test]
    fn test_dentist_and_from_date() {
        let query = QueryBuilder::new(BASE).filter(appointment_filter(
            Scalar::Absent,
            Scalar::Int(3),
            Scalar::from("2024-01-01 00:00:00"),
            Scalar::Absent,
        ));

        assert_eq!(
            query.render(),
            "SELECT * FROM appointment WHERE ( dentist_id=3 AND date>='2024-01-01 00:00:00') LIMIT 1000 OFFSET 0"
        );
    }

    #[test]
    fn test_all_filters_absent_has_no_where() {
        let query = QueryBuilder::new(BASE).filter(appointment_filter(
            Scalar::Absent,
            Scalar::Absent,
            Scalar::Absent,
            Scalar::Absent,
        ));

        assert_eq!(query.render(), "SELECT * FROM appointment LIMIT 1000 OFFSET 0");
        let built = query.build();
        assert_eq!(built.sql, "SELECT * FROM appointment LIMIT ? OFFSET ?");
        assert_eq!(
            built.params,
            vec![SqlParam::Integer(1000), SqlParam::Integer(0)]
        );
    }

    #[test]
    fn test_single_filter_is_not_wrapped() {
        let query = QueryBuilder::new(BASE).filter(appointment_filter(
            Scalar::Absent,
            Scalar::Int(5),
            Scalar::Absent,
            Scalar::Absent,
        ));
        assert_eq!(
            query.render(),
            "SELECT * FROM appointment WHERE dentist_id=5 LIMIT 1000 OFFSET 0"
        );
    }

    #[test]
    fn test_pagination_appears_exactly_once() {
        let predicates = [
            Predicate::empty(),
            Predicate::from(Expression::eq("id", 1)),
            Predicate::or([Expression::eq("a", 1), Expression::eq("b", "LIMIT 5")]),
        ];

        for predicate in predicates {
            let query = QueryBuilder::new(BASE)
                .filter(predicate)
                .paginate(Pagination::new(25, 50));

            let rendered = query.render();
            assert!(rendered.ends_with(" LIMIT 25 OFFSET 50"), "{rendered}");
            assert_eq!(rendered.matches(" OFFSET ").count(), 1);

            let built = query.build();
            assert!(built.sql.ends_with(" LIMIT ? OFFSET ?"));
            assert_eq!(built.sql.matches("LIMIT").count(), 1);
        }
    }

    #[test]
    fn test_order_by_precedes_pagination() {
        let query = QueryBuilder::new(BASE)
            .filter(Expression::eq("dentist_id", 2))
            .order_by("id");
        assert_eq!(
            query.render(),
            "SELECT * FROM appointment WHERE dentist_id=2 ORDER BY id LIMIT 1000 OFFSET 0"
        );
        assert_eq!(
            query.build().sql,
            "SELECT * FROM appointment WHERE dentist_id=? ORDER BY id LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_build_params_follow_placeholder_order() {
        let query = QueryBuilder::new(BASE)
            .filter(appointment_filter(
                Scalar::Int(2),
                Scalar::Absent,
                Scalar::from("2024-01-01 00:00:00"),
                Scalar::from("2024-12-31 23:59:59"),
            ))
            .paginate(Pagination::new(10, 20));

        let built = query.build();
        assert_eq!(
            built.sql,
            "SELECT * FROM appointment WHERE ( patient_id=? AND date>=? AND date<=?) LIMIT ? OFFSET ?"
        );
        assert_eq!(
            built.params,
            vec![
                SqlParam::Integer(2),
                SqlParam::string("2024-01-01 00:00:00"),
                SqlParam::string("2024-12-31 23:59:59"),
                SqlParam::Integer(10),
                SqlParam::Integer(20),
            ]
        );
    }

    #[test]
    fn test_next_page() {
        let page = Pagination::default().next_page();
        assert_eq!(page, Pagination::new(1000, 1000));
    }
}
