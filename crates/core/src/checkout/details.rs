//! Customer Details

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters in a phone number.
pub const MIN_PHONE_LENGTH: usize = 10;

/// Minimum number of characters in a delivery address.
pub const MIN_ADDRESS_LENGTH: usize = 5;

/// Checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Contact email
    Email,

    /// Customer name
    Name,

    /// Contact phone number
    Phone,

    /// Delivery address
    Address,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
        })
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Field is blank
    Missing,

    /// Email has no `@` separating a local part and a domain
    MalformedEmail,

    /// Field is shorter than the required minimum
    TooShort {
        /// Required minimum length
        min: usize,
    },
}

/// A field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    /// Failing field
    pub field: Field,

    /// Failure reason
    pub reason: Reason,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("is required"),
            Self::MalformedEmail => f.write_str("must be a valid email address"),
            Self::TooShort { min } => write!(f, "must be at least {min} characters"),
        }
    }
}

/// Contact and delivery details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Contact email, also used as the payer email
    pub email: String,

    /// Customer name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Delivery address
    pub address: String,
}

impl CustomerDetails {
    /// Copy of these details with surrounding whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }

    /// Validate the form, reporting the first failing field in form order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the failing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let email = self.email.trim();
        let name = self.name.trim();
        let phone = self.phone.trim();
        let address = self.address.trim();

        require(Field::Email, email)?;
        require(Field::Name, name)?;
        require(Field::Phone, phone)?;
        require(Field::Address, address)?;

        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());

        if !well_formed {
            return Err(ValidationError {
                field: Field::Email,
                reason: Reason::MalformedEmail,
            });
        }

        min_length(Field::Phone, phone, MIN_PHONE_LENGTH)?;
        min_length(Field::Address, address, MIN_ADDRESS_LENGTH)?;

        Ok(())
    }
}

fn require(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError {
            field,
            reason: Reason::Missing,
        });
    }

    Ok(())
}

fn min_length(field: Field, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError {
            field,
            reason: Reason::TooShort { min },
        });
    }

    Ok(())
}
