//! Composable filter predicates and SQL query assembly.
//!
//! Listing endpoints accept a set of independently optional filters. Each
//! filter becomes an [`Expression`] whose value may be [`Scalar::Absent`];
//! absent or blank values make the expression vanish instead of producing a
//! `column = ''` clause. Expressions are combined with [`Predicate::and`] or
//! [`Predicate::or`] and bound onto a base `SELECT` by [`QueryBuilder`], which
//! always finishes with `LIMIT`/`OFFSET`.
//!
//! Every predicate has two renderings:
//!
//! - [`Predicate::render`] produces literal SQL text with quoted and
//!   HTML-escaped values. It is used for logging and for asserting the shape
//!   of a query.
//! - [`Predicate::to_fragment`] produces the same clause with `?` placeholders
//!   and an ordered list of [`SqlParam`]s. Only this form is executed.
//!
//! # Example
//!
//! ```
//! use clinic_persistence::query::{Expression, Pagination, Predicate, QueryBuilder, Scalar};
//!
//! let predicate = Predicate::and([
//!     Expression::eq("patient_id", Scalar::Absent),
//!     Expression::eq("dentist_id", 3),
//!     Expression::ge("date", "2024-01-01 00:00:00"),
//! ]);
//!
//! let query = QueryBuilder::new("SELECT * FROM appointment")
//!     .filter(predicate)
//!     .paginate(Pagination::default());
//!
//! assert_eq!(
//!     query.render(),
//!     "SELECT * FROM appointment WHERE ( dentist_id=3 AND date>='2024-01-01 00:00:00') LIMIT 1000 OFFSET 0"
//! );
//!
//! let fragment = query.build();
//! assert_eq!(
//!     fragment.sql,
//!     "SELECT * FROM appointment WHERE ( dentist_id=? AND date>=?) LIMIT ? OFFSET ?"
//! );
//! assert_eq!(fragment.params.len(), 4);
//! ```

mod builder;
mod expression;
mod scalar;

pub use builder::{DEFAULT_LIMIT, Pagination, QueryBuilder, SqlFragment, SqlParam};
pub use expression::{BoolOp, Comparison, Expression, Predicate};
pub use scalar::Scalar;
