use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::Entity;

/// A customer of the shop, mirrored from the e-commerce platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub woo_customer_id: Option<i64>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    /// Contact id at the accounting platform, filled by a lookup
    pub accounting_contact_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Customer {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            woo_customer_id: None,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            accounting_contact_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for Customer {
    const NAME: &'static str = "customer";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A contact as known by the accounting platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingContact {
    pub contact_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub customer_number: Option<i64>,
}
