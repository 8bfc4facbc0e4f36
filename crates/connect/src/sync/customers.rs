//! Customer resolution shared by the imports, plus customer maintenance.

use chrono::Utc;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

use super::models::CustomerCleanupSummary;
use super::service::SyncService;
use crate::woo::mapping::apply_customer;
use crate::woo::WooBilling;
use backoffice_core::customers::{AccountingContact, Customer};
use backoffice_core::errors::{DatabaseError, Result};
use backoffice_core::Repository;

/// In-memory view of the customer table for one task run.
///
/// Platform customers are matched by woo id first and email second; guest
/// checkouts (woo id 0) match by email only.
pub(crate) struct CustomerIndex {
    customers: Vec<Customer>,
    by_woo_id: HashMap<i64, usize>,
    by_email: HashMap<String, usize>,
}

impl CustomerIndex {
    pub(crate) fn load(repository: &dyn Repository<Customer>) -> Result<Self> {
        let mut index = Self {
            customers: Vec::new(),
            by_woo_id: HashMap::new(),
            by_email: HashMap::new(),
        };
        for customer in repository.find_all()? {
            index.insert(customer);
        }
        Ok(index)
    }

    fn insert(&mut self, customer: Customer) -> usize {
        let position = self.customers.len();
        self.remember(position, &customer);
        self.customers.push(customer);
        position
    }

    fn remember(&mut self, position: usize, customer: &Customer) {
        if let Some(woo_id) = customer.woo_customer_id {
            self.by_woo_id.insert(woo_id, position);
        }
        if !customer.email.is_empty() {
            self.by_email.insert(customer.email.to_lowercase(), position);
        }
    }

    fn position(&self, woo_customer_id: i64, email: &str) -> Option<usize> {
        let by_id = (woo_customer_id > 0)
            .then(|| self.by_woo_id.get(&woo_customer_id).copied())
            .flatten();
        by_id.or_else(|| self.by_email.get(&email.trim().to_lowercase()).copied())
    }

    /// Local id of the customer behind an order or subscription, creating
    /// or refreshing the record as needed. `None` for anonymous records.
    pub(crate) async fn resolve(
        &mut self,
        repository: &dyn Repository<Customer>,
        woo_customer_id: i64,
        billing: &WooBilling,
    ) -> Result<Option<String>> {
        if woo_customer_id <= 0 && billing.email.trim().is_empty() {
            return Ok(None);
        }

        match self.position(woo_customer_id, &billing.email) {
            Some(position) => {
                let current = &self.customers[position];
                let mut updated = current.clone();
                apply_customer(&mut updated, woo_customer_id, billing);
                if updated != *current {
                    updated.updated_at = Utc::now().naive_utc();
                    let saved = repository.save(updated).await?;
                    self.remember(position, &saved);
                    self.customers[position] = saved;
                }
                Ok(Some(self.customers[position].id.clone()))
            }
            None => {
                let mut customer = Customer::new("", "", "");
                apply_customer(&mut customer, woo_customer_id, billing);
                let created = repository.create(customer).await?;
                debug!("Created customer {} ({})", created.id, created.email);
                let id = created.id.clone();
                self.insert(created);
                Ok(Some(id))
            }
        }
    }
}

impl SyncService {
    pub(crate) async fn cleanup_customers_task(&self) -> Result<CustomerCleanupSummary> {
        let mut referenced: HashSet<String> = HashSet::new();
        referenced.extend(
            self.stores
                .orders
                .find_all()?
                .into_iter()
                .filter_map(|o| o.customer_id),
        );
        referenced.extend(
            self.stores
                .subscriptions
                .find_all()?
                .into_iter()
                .filter_map(|s| s.customer_id),
        );

        let mut summary = CustomerCleanupSummary::default();
        for customer in self.stores.customers.find_all()? {
            if referenced.contains(&customer.id) {
                continue;
            }
            summary.removed += self.stores.customers.delete(&customer.id).await?;
        }

        info!("Removed {} customers without orders or subscriptions", summary.removed);
        Ok(summary)
    }

    pub(crate) async fn lookup_accounting_contact_for(
        &self,
        customer_id: &str,
    ) -> Result<Option<AccountingContact>> {
        let customer = self.stores.customers.find(customer_id)?.ok_or_else(|| {
            DatabaseError::NotFound(format!("Customer {} not found", customer_id))
        })?;

        let contact = self
            .accounting
            .find_contact_by_email(&customer.email)
            .await?;

        if let Some(contact) = &contact {
            if customer.accounting_contact_id != Some(contact.contact_id) {
                let mut updated = customer;
                updated.accounting_contact_id = Some(contact.contact_id);
                updated.updated_at = Utc::now().naive_utc();
                self.stores.customers.save(updated).await?;
            }
        }

        Ok(contact)
    }
}
