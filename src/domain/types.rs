//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, non-empty
//! names, well-formed CPF numbers) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// CPF is not made of exactly eleven digits.
    #[error("cpf must contain exactly 11 digits")]
    InvalidCpf,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Unique identifier for a client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(i32);

impl ClientId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ClientId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for i32 {
    fn from(value: ClientId) -> Self {
        value.0
    }
}

/// Trimmed, non-empty client name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientName(String);

impl ClientName {
    pub fn new<S: Into<String>>(name: S) -> Result<Self, TypeConstraintError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for ClientName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Brazilian taxpayer number: exactly [`CPF_LENGTH`] ASCII digits, no punctuation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    pub fn new<S: Into<String>>(cpf: S) -> Result<Self, TypeConstraintError> {
        let cpf = cpf.into().trim().to_string();
        if cpf.len() != CPF_LENGTH || !cpf.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeConstraintError::InvalidCpf);
        }
        Ok(Self(cpf))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Cpf {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Cpf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks that an income is a finite, non-negative amount.
pub fn validate_income(income: f64) -> Result<f64, TypeConstraintError> {
    if income.is_finite() && income >= 0.0 {
        Ok(income)
    } else {
        Err(TypeConstraintError::InvalidValue(format!(
            "income must be a non-negative amount, got {income}"
        )))
    }
}

/// Checks that a children count is not negative.
pub fn validate_children(children: i32) -> Result<i32, TypeConstraintError> {
    if children >= 0 {
        Ok(children)
    } else {
        Err(TypeConstraintError::InvalidValue(format!(
            "children cannot be negative, got {children}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_rejects_non_positive_values() {
        assert_eq!(ClientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ClientId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ClientId::new(7).map(ClientId::get), Ok(7));
    }

    #[test]
    fn client_name_is_trimmed() {
        let name = ClientName::new("  Clarice Lispector ").unwrap();
        assert_eq!(name.as_str(), "Clarice Lispector");
        assert_eq!(ClientName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn cpf_requires_eleven_digits() {
        assert!(Cpf::new("10619244881").is_ok());
        assert!(Cpf::new(" 00012345678 ").is_ok());
        assert_eq!(Cpf::new("1061924488"), Err(TypeConstraintError::InvalidCpf));
        assert_eq!(Cpf::new("106.192.448-81"), Err(TypeConstraintError::InvalidCpf));
        assert_eq!(Cpf::new("1061924488a"), Err(TypeConstraintError::InvalidCpf));
    }

    #[test]
    fn income_and_children_bounds() {
        assert_eq!(validate_income(1500.0), Ok(1500.0));
        assert!(validate_income(-0.01).is_err());
        assert!(validate_income(f64::NAN).is_err());
        assert_eq!(validate_children(0), Ok(0));
        assert!(validate_children(-1).is_err());
    }
}
