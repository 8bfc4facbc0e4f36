//! Database model for customers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use backoffice_core::customers::Customer;

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CustomerDB {
    pub id: String,
    pub woo_customer_id: Option<i64>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub accounting_contact_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<CustomerDB> for Customer {
    fn from(db: CustomerDB) -> Self {
        Self {
            id: db.id,
            woo_customer_id: db.woo_customer_id,
            email: db.email,
            first_name: db.first_name,
            last_name: db.last_name,
            phone: db.phone,
            accounting_contact_id: db.accounting_contact_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Customer> for CustomerDB {
    fn from(domain: Customer) -> Self {
        Self {
            id: domain.id,
            woo_customer_id: domain.woo_customer_id,
            email: domain.email,
            first_name: domain.first_name,
            last_name: domain.last_name,
            phone: domain.phone,
            accounting_contact_id: domain.accounting_contact_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

crate::sqlite_entity!(Customer, CustomerDB, customers);
