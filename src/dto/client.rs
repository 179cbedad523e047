//! Wire representation of a client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, TypeConstraintError};

/// JSON projection of [`Client`].
///
/// `id` is ignored on input and always filled on output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(equal = 11, message = "cpf must contain exactly 11 digits"))]
    pub cpf: String,
    #[validate(range(min = 0.0, message = "income cannot be negative"))]
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    #[serde(default)]
    #[validate(range(min = 0, message = "children cannot be negative"))]
    pub children: i32,
}

impl ClientDto {
    /// Rebuilds the entity this DTO was projected from.
    pub fn into_entity(self) -> Result<Client, TypeConstraintError> {
        let id = self
            .id
            .ok_or_else(|| TypeConstraintError::InvalidValue("client id is missing".to_string()))?;
        let id = ClientId::new(id)?;

        Ok(Client {
            id: id.get(),
            name: self.name,
            cpf: self.cpf,
            income: self.income,
            birth_date: self.birth_date,
            children: self.children,
        })
    }
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: Some(client.id),
            name: client.name,
            cpf: client.cpf,
            income: client.income,
            birth_date: client.birth_date,
            children: client.children,
        }
    }
}

impl From<&Client> for ClientDto {
    fn from(client: &Client) -> Self {
        client.clone().into()
    }
}

impl TryFrom<&ClientDto> for NewClient {
    type Error = TypeConstraintError;

    fn try_from(dto: &ClientDto) -> Result<Self, Self::Error> {
        NewClient::try_new(
            dto.name.as_str(),
            dto.cpf.as_str(),
            dto.income,
            dto.birth_date,
            dto.children,
        )
    }
}

impl TryFrom<&ClientDto> for UpdateClient {
    type Error = TypeConstraintError;

    fn try_from(dto: &ClientDto) -> Result<Self, Self::Error> {
        UpdateClient::try_new(
            dto.name.as_str(),
            dto.cpf.as_str(),
            dto.income,
            dto.birth_date,
            dto.children,
        )
    }
}
