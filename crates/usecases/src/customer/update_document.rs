use serde::Deserialize;

use customerhub_core::{AggregateRoot, CustomerId};
use customerhub_customers::Document;
use customerhub_infra::repository::CustomerRepository;

use super::load_customer;
use crate::dto::CustomerOutput;
use crate::error::{DOCUMENT_ALREADY_EXISTS, UseCaseError, UseCaseResult};

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerDocumentInput {
    pub customer_id: String,
    pub document: String,
    /// `cpf` or `cnpj`, any case.
    pub document_type: String,
}

/// Attach (or replace) a customer's tax document.
pub struct UpdateCustomerDocument<C> {
    customers: C,
}

impl<C: CustomerRepository> UpdateCustomerDocument<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }

    pub fn execute(&self, input: UpdateCustomerDocumentInput) -> UseCaseResult<CustomerOutput> {
        let customer_id = CustomerId::parse(&input.customer_id)?;
        let document = Document::create(&input.document, &input.document_type)?;

        if self.customers.exists_by_document(document.value())? {
            tracing::warn!(%customer_id, document_type = %document.document_type(), "document already registered");
            return Err(UseCaseError::business_rule(DOCUMENT_ALREADY_EXISTS));
        }

        let customer = load_customer(&self.customers, customer_id)?;
        let saved = self.customers.save(customer.update_document(document))?;

        tracing::info!(%customer_id, version = saved.version(), "customer document updated");
        Ok(CustomerOutput::from(&saved))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::{SpyCustomerRepository, customer};
    use customerhub_customers::DocumentType;

    fn input(customer_id: CustomerId, document: &str, document_type: &str) -> UpdateCustomerDocumentInput {
        UpdateCustomerDocumentInput {
            customer_id: customer_id.to_string(),
            document: document.to_string(),
            document_type: document_type.to_string(),
        }
    }

    #[test]
    fn stores_cleaned_document() {
        let repo = SpyCustomerRepository::new();
        let saved = repo.seed(customer("jane@example.com"));
        let use_case = UpdateCustomerDocument::new(repo.clone());

        let out = use_case
            .execute(input(saved.id_typed(), "479.993.810-04", "CPF"))
            .unwrap();

        let doc = out.document.unwrap();
        assert_eq!(doc.value, "47999381004");
        assert_eq!(doc.formatted_value, "479.993.810-04");
        assert_eq!(doc.document_type, DocumentType::Cpf);
        assert_eq!(out.version, 2);
    }

    #[test]
    fn invalid_document_fails_before_io() {
        let repo = SpyCustomerRepository::new();
        let use_case = UpdateCustomerDocument::new(repo.clone());

        // The customer does not exist, but validation runs first.
        let err = use_case
            .execute(input(CustomerId::new(), "479.993.810-00", "cpf"))
            .unwrap_err();
        assert_eq!(err, UseCaseError::validation("document", "Invalid CPF"));

        let err = use_case
            .execute(input(CustomerId::new(), "479.993.810-04", "passport"))
            .unwrap_err();
        assert_eq!(err, UseCaseError::validation("document_type", "Invalid document type"));
        assert_eq!(repo.saves(), 0);
    }

    #[test]
    fn document_owned_by_someone_else_is_rejected() {
        let repo = SpyCustomerRepository::new();
        let doc = Document::create("11.222.333/0001-81", "cnpj").unwrap();
        repo.seed(customer("owner@example.com").update_document(doc));
        let other = repo.seed(customer("other@example.com"));

        let err = UpdateCustomerDocument::new(repo.clone())
            .execute(input(other.id_typed(), "11222333000181", "cnpj"))
            .unwrap_err();

        assert_eq!(err, UseCaseError::BusinessRule("Document already exists".to_string()));
        assert_eq!(repo.saves(), 0);
    }

    #[test]
    fn concurrent_write_is_a_retryable_conflict() {
        let repo = SpyCustomerRepository::new();
        let saved = repo.seed(customer("jane@example.com"));
        repo.race_next_save.store(true, Ordering::SeqCst);
        let use_case = UpdateCustomerDocument::new(repo.clone());

        let err = use_case
            .execute(input(saved.id_typed(), "479.993.810-04", "cpf"))
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Conflict(_)));
        assert!(err.is_retryable());
        let stored = repo.inner.customer_of_id(saved.id_typed()).unwrap().unwrap();
        assert_eq!(stored.document(), None);
        assert_eq!(stored.version(), 2);

        // A fresh attempt reads the new version and goes through.
        let out = use_case
            .execute(input(saved.id_typed(), "479.993.810-04", "cpf"))
            .unwrap();
        assert_eq!(out.version, 3);
    }

    #[test]
    fn racing_duplicate_document_uses_the_same_message() {
        let repo = SpyCustomerRepository::new();
        let doc = Document::create("11.222.333/0001-81", "cnpj").unwrap();
        repo.seed(customer("owner@example.com").update_document(doc));
        let other = repo.seed(customer("other@example.com"));
        repo.stale_checks.store(true, Ordering::SeqCst);

        let err = UpdateCustomerDocument::new(repo.clone())
            .execute(input(other.id_typed(), "11222333000181", "cnpj"))
            .unwrap_err();

        assert_eq!(err, UseCaseError::BusinessRule("Document already exists".to_string()));
    }

    #[test]
    fn unknown_customer_is_not_found() {
        let err = UpdateCustomerDocument::new(SpyCustomerRepository::new())
            .execute(input(CustomerId::new(), "479.993.810-04", "cpf"))
            .unwrap_err();
        assert!(matches!(err, UseCaseError::NotFound(_)));
    }
}
