//! Contacts belonging to a customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl NewContact {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate::positive_id("customer_id", self.customer_id)?;
        validate::required_text("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_is_checked_before_name() {
        let contact = NewContact::default();
        assert_eq!(contact.validate(), Err(DomainError::required("customer_id")));

        let contact = NewContact {
            customer_id: 4,
            ..Default::default()
        };
        assert_eq!(contact.validate(), Err(DomainError::required("name")));
    }
}
