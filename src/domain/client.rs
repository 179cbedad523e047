use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientName, Cpf, TypeConstraintError, validate_children, validate_income,
};

/// A persisted client record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl Client {
    #[must_use]
    pub fn new(
        id: i32,
        name: impl Into<String>,
        cpf: impl Into<String>,
        income: f64,
        birth_date: DateTime<Utc>,
        children: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cpf: cpf.into(),
            income,
            birth_date,
            children,
        }
    }
}

/// Validated payload for inserting a client.
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub name: ClientName,
    pub cpf: Cpf,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl NewClient {
    pub fn try_new(
        name: impl Into<String>,
        cpf: impl Into<String>,
        income: f64,
        birth_date: DateTime<Utc>,
        children: i32,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: ClientName::new(name)?,
            cpf: Cpf::new(cpf)?,
            income: validate_income(income)?,
            birth_date,
            children: validate_children(children)?,
        })
    }
}

/// Validated replacement values for every mutable client field.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClient {
    pub name: ClientName,
    pub cpf: Cpf,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl UpdateClient {
    pub fn try_new(
        name: impl Into<String>,
        cpf: impl Into<String>,
        income: f64,
        birth_date: DateTime<Utc>,
        children: i32,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: ClientName::new(name)?,
            cpf: Cpf::new(cpf)?,
            income: validate_income(income)?,
            birth_date,
            children: validate_children(children)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_normalizes_name_and_cpf() {
        let client = NewClient::try_new(
            "  Ana Maria Silva ",
            "00012345678",
            7000.0,
            Utc::now(),
            1,
        )
        .unwrap();
        assert_eq!(client.name.as_str(), "Ana Maria Silva");
        assert_eq!(client.cpf.as_str(), "00012345678");
    }

    #[test]
    fn new_client_rejects_negative_children() {
        let result = NewClient::try_new("Ana", "00012345678", 7000.0, Utc::now(), -1);
        assert!(matches!(result, Err(TypeConstraintError::InvalidValue(_))));
    }

    #[test]
    fn update_client_rejects_bad_cpf() {
        let result = UpdateClient::try_new("Ana", "123", 7000.0, Utc::now(), 0);
        assert_eq!(result, Err(TypeConstraintError::InvalidCpf));
    }
}
