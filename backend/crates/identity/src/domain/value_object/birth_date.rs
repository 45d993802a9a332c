//! Birth Date Value Object

use chrono::NaiveDate;

use crate::error::{IdentityError, IdentityResult};

/// Calendar date of birth, never later than the day it was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(date: NaiveDate, today: NaiveDate) -> IdentityResult<Self> {
        if date > today {
            return Err(IdentityError::validation(
                "Date of birth cannot be in the future",
            ));
        }
        Ok(Self(date))
    }

    pub fn from_db(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}
