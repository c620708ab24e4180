//! `PatientStore` implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use tracing::debug;

use crate::core::PatientStore;
use crate::error::StorageResult;
use crate::query::{Pagination, QueryBuilder};
use crate::types::{FilterCriteria, NewPatient, Patient, PatientFilter, datetime};

use super::SqliteBackend;
use super::backend::{datetime_column, map_sqlite_error, not_found};

const RESOURCE: &str = "patient";

const SELECT_PATIENT: &str =
    "SELECT id, first_name, last_name, address, dni, discharge_date FROM patient";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        address: row.get(3)?,
        dni: row.get(4)?,
        discharge_date: datetime_column(row, 5)?,
    })
}

async fn find_one(
    backend: &SqliteBackend,
    column: &'static str,
    value: i64,
) -> StorageResult<Patient> {
    backend
        .with_connection(move |conn| {
            conn.query_row(
                &format!("{SELECT_PATIENT} WHERE {column} = ?1"),
                [value],
                patient_from_row,
            )
            .optional()
            .map_err(|e| map_sqlite_error(RESOURCE, e))?
            .ok_or_else(|| not_found(RESOURCE, value))
        })
        .await
}

#[async_trait]
impl PatientStore for SqliteBackend {
    async fn list_patients(
        &self,
        filter: &PatientFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Patient>> {
        let query = QueryBuilder::new(SELECT_PATIENT)
            .filter(filter.to_predicate())
            .order_by("id")
            .paginate(pagination);
        debug!(sql = %query.render(), "Listing patients");
        let statement = query.build();

        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&statement.sql)
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;
            let rows = stmt
                .query_map(params_from_iter(statement.params.iter()), patient_from_row)
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| map_sqlite_error(RESOURCE, e))
        })
        .await
    }

    async fn get_patient(&self, id: i64) -> StorageResult<Patient> {
        find_one(self, "id", id).await
    }

    async fn get_patient_by_dni(&self, dni: i64) -> StorageResult<Patient> {
        find_one(self, "dni", dni).await
    }

    async fn create_patient(&self, patient: NewPatient) -> StorageResult<Patient> {
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO patient (first_name, last_name, address, dni, discharge_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    patient.first_name,
                    patient.last_name,
                    patient.address,
                    patient.dni,
                    datetime::format(&patient.discharge_date),
                ],
            )
            .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            let id = conn.last_insert_rowid();
            debug!(id, "Created patient");
            Ok(patient.into_patient(id))
        })
        .await
    }

    async fn update_patient(&self, patient: Patient) -> StorageResult<Patient> {
        self.with_connection(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE patient
                     SET first_name = ?1, last_name = ?2, address = ?3, dni = ?4,
                         discharge_date = ?5
                     WHERE id = ?6",
                    params![
                        patient.first_name,
                        patient.last_name,
                        patient.address,
                        patient.dni,
                        datetime::format(&patient.discharge_date),
                        patient.id,
                    ],
                )
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            if changed == 0 {
                return Err(not_found(RESOURCE, patient.id));
            }
            Ok(patient)
        })
        .await
    }

    async fn delete_patient(&self, id: i64) -> StorageResult<()> {
        self.with_connection(move |conn| {
            let changed = conn
                .execute("DELETE FROM patient WHERE id = ?1", [id])
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            if changed == 0 {
                return Err(not_found(RESOURCE, id));
            }
            Ok(())
        })
        .await
    }
}
