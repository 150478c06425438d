//! Registration form model

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{validate_registration, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Account details collected on the registration screen.
///
/// Only email and password are sent to the identity provider; the remaining
/// fields are collected for display and validation.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub email: String,
    pub password: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            gender: Gender::default(),
            birth_date: chrono::Local::now().date_naive(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_registration(self)
    }

    /// Reset every field to its initial value (the "Cancel" action).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("gender", &self.gender)
            .field("birth_date", &self.birth_date)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
