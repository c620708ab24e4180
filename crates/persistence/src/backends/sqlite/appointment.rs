//! `AppointmentStore` implementation for SQLite.
//!
//! Listing joins the patient table so appointments can be filtered by the
//! patient's DNI.

use async_trait::async_trait;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use tracing::debug;

use crate::core::AppointmentStore;
use crate::error::StorageResult;
use crate::query::{Pagination, QueryBuilder};
use crate::types::{Appointment, AppointmentFilter, FilterCriteria, NewAppointment, datetime};

use super::SqliteBackend;
use super::backend::{datetime_column, map_sqlite_error, not_found};

const RESOURCE: &str = "appointment";

const SELECT_APPOINTMENT: &str = "SELECT id, patient_id, dentist_id, date, description \
     FROM appointment";

const LIST_APPOINTMENTS: &str = "SELECT appointment.id, appointment.patient_id, \
     appointment.dentist_id, appointment.date, appointment.description \
     FROM appointment INNER JOIN patient ON patient.id = appointment.patient_id";

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        dentist_id: row.get(2)?,
        date: datetime_column(row, 3)?,
        description: row.get(4)?,
    })
}

#[async_trait]
impl AppointmentStore for SqliteBackend {
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Appointment>> {
        let query = QueryBuilder::new(LIST_APPOINTMENTS)
            .filter(filter.to_predicate())
            .order_by("appointment.id")
            .paginate(pagination);
        debug!(sql = %query.render(), "Listing appointments");
        let statement = query.build();

        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&statement.sql)
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;
            let rows = stmt
                .query_map(
                    params_from_iter(statement.params.iter()),
                    appointment_from_row,
                )
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| map_sqlite_error(RESOURCE, e))
        })
        .await
    }

    async fn get_appointment(&self, id: i64) -> StorageResult<Appointment> {
        self.with_connection(move |conn| {
            conn.query_row(
                &format!("{SELECT_APPOINTMENT} WHERE id = ?1"),
                [id],
                appointment_from_row,
            )
            .optional()
            .map_err(|e| map_sqlite_error(RESOURCE, e))?
            .ok_or_else(|| not_found(RESOURCE, id))
        })
        .await
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StorageResult<Appointment> {
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO appointment (patient_id, dentist_id, date, description)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    appointment.patient_id,
                    appointment.dentist_id,
                    datetime::format(&appointment.date),
                    appointment.description,
                ],
            )
            .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            let id = conn.last_insert_rowid();
            debug!(id, "Created appointment");
            Ok(appointment.into_appointment(id))
        })
        .await
    }

    async fn update_appointment(&self, appointment: Appointment) -> StorageResult<Appointment> {
        self.with_connection(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE appointment
                     SET patient_id = ?1, dentist_id = ?2, date = ?3, description = ?4
                     WHERE id = ?5",
                    params![
                        appointment.patient_id,
                        appointment.dentist_id,
                        datetime::format(&appointment.date),
                        appointment.description,
                        appointment.id,
                    ],
                )
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            if changed == 0 {
                return Err(not_found(RESOURCE, appointment.id));
            }
            Ok(appointment)
        })
        .await
    }

    async fn delete_appointment(&self, id: i64) -> StorageResult<()> {
        self.with_connection(move |conn| {
            let changed = conn
                .execute("DELETE FROM appointment WHERE id = ?1", [id])
                .map_err(|e| map_sqlite_error(RESOURCE, e))?;

            if changed == 0 {
                return Err(not_found(RESOURCE, id));
            }
            Ok(())
        })
        .await
    }
}
