use clinicbook_core::models::user::{CreateUserRequest, UpdateUserRequest, User};
use eyre::Result;

use super::{ensure_success, read_json};
use crate::BackendClient;

/// All users that are not soft-deleted.
pub async fn list_users(client: &BackendClient) -> Result<Vec<User>> {
    let response = client
        .authorize(client.http.get(client.url("users")))
        .send()
        .await?;
    read_json(response).await
}

pub async fn get_user_by_id(client: &BackendClient, id: &str) -> Result<Option<User>> {
    let response = client
        .authorize(client.http.get(client.url(&format!("users/{}", id))))
        .send()
        .await?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    read_json(response).await.map(Some)
}

pub async fn create_user(client: &BackendClient, user: &CreateUserRequest) -> Result<User> {
    let response = client
        .authorize(client.http.post(client.url("users")).json(user))
        .send()
        .await?;
    read_json(response).await
}

pub async fn update_user(client: &BackendClient, id: &str, update: &UpdateUserRequest) -> Result<User> {
    let response = client
        .authorize(client.http.patch(client.url(&format!("users/{}", id))).json(update))
        .send()
        .await?;
    read_json(response).await
}

/// Soft delete: the backend hides the user and blocks their login.
pub async fn soft_delete_user(client: &BackendClient, id: &str) -> Result<()> {
    let response = client
        .authorize(client.http.delete(client.url(&format!("users/{}", id))))
        .send()
        .await?;
    ensure_success(response).await?;

    Ok(())
}
