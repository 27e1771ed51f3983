use clinicbook_core::models::appointment::{
    Appointment, AppointmentsResponse, AppointmentsSummary, BookingRecord, NewAppointment,
    UpdateAppointmentRequest,
};
use eyre::Result;
use serde_json::Value;
use tracing::warn;

use super::{ensure_success, read_json};
use crate::BackendClient;

/// Fetches the public snapshot of upcoming appointments.
///
/// Elements that do not decode as a [`BookingRecord`] are skipped so one bad
/// record cannot hide the availability of the whole clinic.
pub async fn get_future_appointments(client: &BackendClient) -> Result<Vec<BookingRecord>> {
    let response = client
        .authorize(client.http.get(client.url("appointments/future")))
        .send()
        .await?;
    let raw: Vec<Value> = read_json(response).await?;

    Ok(decode_snapshot(raw))
}

/// Decodes each snapshot element on its own, logging and dropping the ones
/// that are not a valid [`BookingRecord`].
pub(crate) fn decode_snapshot(raw: Vec<Value>) -> Vec<BookingRecord> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value::<BookingRecord>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(position, error = %err, "Skipping undecodable appointment in snapshot");
                None
            }
        })
        .collect()
}

pub async fn list_appointments(
    client: &BackendClient,
    params: &[(String, String)],
) -> Result<AppointmentsResponse> {
    let response = client
        .authorize(client.http.get(client.url("appointments")).query(params))
        .send()
        .await?;
    read_json(response).await
}

pub async fn get_appointments_summary(client: &BackendClient) -> Result<AppointmentsSummary> {
    let response = client
        .authorize(client.http.get(client.url("appointments/summary")))
        .send()
        .await?;
    read_json(response).await
}

pub async fn get_appointment_by_id(client: &BackendClient, id: &str) -> Result<Option<Appointment>> {
    let response = client
        .authorize(client.http.get(client.url(&format!("appointments/{}", id))))
        .send()
        .await?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    read_json(response).await.map(Some)
}

pub async fn create_appointment(client: &BackendClient, appointment: &NewAppointment) -> Result<Appointment> {
    let response = client
        .authorize(client.http.post(client.url("appointments")).json(appointment))
        .send()
        .await?;
    read_json(response).await
}

pub async fn update_appointment(
    client: &BackendClient,
    id: &str,
    update: &UpdateAppointmentRequest,
) -> Result<Appointment> {
    let response = client
        .authorize(
            client
                .http
                .patch(client.url(&format!("appointments/{}", id)))
                .json(update),
        )
        .send()
        .await?;
    read_json(response).await
}

pub async fn delete_appointment(client: &BackendClient, id: &str) -> Result<()> {
    let response = client
        .authorize(client.http.delete(client.url(&format!("appointments/{}", id))))
        .send()
        .await?;
    ensure_success(response).await?;

    Ok(())
}
