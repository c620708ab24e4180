//! `DentistStore` implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use tracing::debug;

use crate::core::DentistStore;
use crate::error::StorageResult;
use crate::query::{Pagination, QueryBuilder};
use crate::types::{Dentist, DentistFilter, FilterCriteria, NewDentist};

use super::SqliteBackend;
use super::backend::{map_sqlite_error, not_found};

const RESOURCE: &str = "dentist";

const SELECT_DENTIST: &str = "SELECT id, first_name, last_name, registration_number FROM dentist";

fn dentist_from_row(row: &Row<'_>) -> rusqlite::Result<Dentist> {
    Ok(Dentist {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        registration_number: row.get(3)?,
    })
}

async fn find_one(
    backend: &SqliteBackend,
    column: &'static str,
    value: i64,
) -> StorageResult<Dentist> {
    backend
        .with_connection(move |conn| {
            conn.query_row(
                &format!("{SELECT_DENTIST} WHERE {column} = ?1"),
                [value],
                dentist_from_row,
            )
            .optional()
            .map_err(|e| map_sqlite_error(RESOURCE, e))?
            .ok_or_else(|| not_found(RESOURCE, value))
        })
        .await
}

#[async_trait]
impl DentistStore for SqliteBackend {
    async fn list_dentists(
        &self,
        filter: &DentistFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Dentist>> {
        let query = QueryBuilder::new(SELECT_DENTIST)
            .filter(filter.to_predicate())
            .order_by("id")
            .paginate(pagination);
        debug!(sql = %query.render(), "Listing dentists");
        let statement = query.build();

        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&statement.sql)
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;
            let rows = stmt
                .query_map(params_from_iter(statement.params.iter()), dentist_from_row)
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| map_sqlite_error(RESOURCE, e))
        })
        .await
    }

    async fn get_dentist(&self, id: i64) -> StorageResult<Dentist> {
        find_one(self, "id", id).await
    }

    async fn get_dentist_by_registration_number(
        &self,
        registration_number: i64,
    ) -> StorageResult<Dentist> {
        find_one(self, "registration_number", registration_number).await
    }

    async fn create_dentist(&self, dentist: NewDentist) -> StorageResult<Dentist> {
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO dentist (first_name, last_name, registration_number)
                 VALUES (?1, ?2, ?3)",
                params![
                    dentist.first_name,
                    dentist.last_name,
                    dentist.registration_number
                ],
            )
            .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            let id = conn.last_insert_rowid();
            debug!(id, "Created dentist");
            Ok(dentist.into_dentist(id))
        })
        .await
    }

    async fn update_dentist(&self, dentist: Dentist) -> StorageResult<Dentist> {
        self.with_connection(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE dentist
                     SET first_name = ?1, last_name = ?2, registration_number = ?3
                     WHERE id = ?4",
                    params![
                        dentist.first_name,
                        dentist.last_name,
                        dentist.registration_number,
                        dentist.id,
                    ],
                )
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            if changed == 0 {
                return Err(not_found(RESOURCE, dentist.id));
            }
            Ok(dentist)
        })
        .await
    }

    async fn delete_dentist(&self, id: i64) -> StorageResult<()> {
        self.with_connection(move |conn| {
            let changed = conn
                .execute("DELETE FROM dentist WHERE id = ?1", [id])
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            if changed == 0 {
                return Err(not_found(RESOURCE, id));
            }
            Ok(())
        })
        .await
    }
}
