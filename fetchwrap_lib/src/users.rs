//! Example domain calls against a `/api/users` resource.

use fetchwrap::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Error;

const USERS_PATH: &str = "/api/users";

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Payload for creating or fully replacing a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update; unset fields are omitted from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

fn user_path(id: i64) -> String {
    format!("{}/{}", USERS_PATH, id)
}

/// Maps the 204 absence marker to an error for calls that need a body.
fn require<T>(client: &ApiClient, path: &str, value: Option<T>) -> Result<T, Error> {
    value.ok_or_else(|| Error::EmptyResponse {
        endpoint: client.url(path),
    })
}

/// Fetches all users. A 204 is treated as an empty list.
pub async fn list_users(client: &ApiClient) -> Result<Vec<User>, Error> {
    Ok(client.get(USERS_PATH).await?.unwrap_or_default())
}

pub async fn get_user(client: &ApiClient, id: i64) -> Result<User, Error> {
    let path = user_path(id);
    let user = client.get(&path).await?;
    require(client, &path, user)
}

pub async fn create_user(client: &ApiClient, user: &NewUser) -> Result<User, Error> {
    let created = client.post(USERS_PATH, user).await?;
    require(client, USERS_PATH, created)
}

/// Replaces a user (PUT).
pub async fn update_user(client: &ApiClient, id: i64, user: &NewUser) -> Result<User, Error> {
    let path = user_path(id);
    let updated = client.put(&path, user).await?;
    require(client, &path, updated)
}

/// Updates the given fields of a user (PATCH).
pub async fn patch_user(client: &ApiClient, id: i64, patch: &UserPatch) -> Result<User, Error> {
    let path = user_path(id);
    let updated = client.patch(&path, patch).await?;
    require(client, &path, updated)
}

/// Deletes a user. Succeeds on 204 and also on a 2xx that echoes a JSON body.
pub async fn delete_user(client: &ApiClient, id: i64) -> Result<(), Error> {
    client
        .delete::<serde_json::Value>(&user_path(id))
        .await
        .map(|_| ())
}

/// Uploads an avatar image as the `file` part of a multipart form.
pub async fn upload_avatar(
    client: &ApiClient,
    id: i64,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<User, Error> {
    let path = format!("{}/avatar", user_path(id));
    let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
    let updated = client.upload(&path, form).await?;
    require(client, &path, updated)
}
