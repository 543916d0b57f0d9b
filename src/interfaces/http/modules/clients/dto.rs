//! Client DTOs. The password hash never leaves the service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Client, ClientDraft, ClientUpdate};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: i32,
    pub login: String,
    pub name: String,
    #[schema(example = json!(["USER"]))]
    pub roles: Vec<String>,
}

impl From<&Client> for ClientDto {
    fn from(c: &Client) -> Self {
        Self {
            id: c.id,
            login: c.login.clone(),
            name: c.name.clone(),
            roles: c.roles.iter().map(|r| r.as_str().to_string()).collect(),
        }
    }
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self::from(&c)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[validate(length(min = 3, max = 50, code = "length"))]
    pub login: String,
    #[validate(length(min = 4, max = 100, code = "length"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, code = "length"))]
    pub name: String,
}

impl From<RegistrationRequest> for ClientDraft {
    fn from(r: RegistrationRequest) -> Self {
        Self {
            login: r.login,
            password: r.password,
            name: r.name,
        }
    }
}

/// Omit `password` to keep the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdateRequest {
    #[validate(length(min = 3, max = 50, code = "length"))]
    pub login: String,
    #[validate(length(min = 1, max = 100, code = "length"))]
    pub name: String,
    #[validate(length(min = 4, max = 100, code = "length"))]
    pub password: Option<String>,
}

impl From<ClientUpdateRequest> for ClientUpdate {
    fn from(r: ClientUpdateRequest) -> Self {
        Self {
            login: r.login,
            name: r.name,
            password: r.password,
        }
    }
}
