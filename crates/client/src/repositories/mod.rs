pub mod appointment;
pub mod user;

use eyre::{Result, eyre};
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Decodes a JSON body, turning non-success statuses into errors that carry
/// the backend's message.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}

pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(eyre!("Backend responded {}: {}", status, backend_message(&body)))
}

/// Extracts `message` from an error body. The backend sends either a string
/// or a list of validation messages.
fn backend_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    match value.get("message") {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(serde_json::Value::Array(messages)) => messages
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => body.to_string(),
    }
}
