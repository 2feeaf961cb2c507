use serde::{Deserialize, Serialize};

use customerhub_core::{AggregateRoot, CustomerId};
use customerhub_customers::Telephone;
use customerhub_infra::gateway::{GatewayError, LocalTelephone, TelephoneGateway};
use customerhub_infra::repository::CustomerRepository;

use super::load_customer;
use crate::dto::CustomerOutput;
use crate::error::{INVALID_TELEPHONE, UseCaseError, UseCaseResult};

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerTelephoneInput {
    pub customer_id: String,
    pub telephone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomerTelephoneOutput {
    pub customer: CustomerOutput,
    /// Display form in the number's own region. Not persisted.
    pub local: LocalTelephone,
}

/// Validate, canonicalize and store a customer's telephone.
///
/// Validity and formatting belong to the telephone gateway; only the
/// canonical E.164 form is stored.
pub struct UpdateCustomerTelephone<C, T> {
    customers: C,
    telephones: T,
}

impl<C, T> UpdateCustomerTelephone<C, T>
where
    C: CustomerRepository,
    T: TelephoneGateway,
{
    pub fn new(customers: C, telephones: T) -> Self {
        Self {
            customers,
            telephones,
        }
    }

    pub fn execute(
        &self,
        input: UpdateCustomerTelephoneInput,
    ) -> UseCaseResult<UpdateCustomerTelephoneOutput> {
        let customer_id = CustomerId::parse(&input.customer_id)?;
        let customer = load_customer(&self.customers, customer_id)?;

        if !self.telephones.is_valid(&input.telephone)? {
            tracing::debug!(%customer_id, "telephone rejected by gateway");
            return Err(UseCaseError::validation("telephone", INVALID_TELEPHONE));
        }

        let canonical = self.telephones.format(&input.telephone)?;
        let telephone = Telephone::new(&canonical).map_err(|_| {
            GatewayError::Malformed(format!("telephone gateway returned `{canonical}`"))
        })?;

        let local = self.telephones.format_to_local(&canonical)?;
        let saved = self.customers.save(customer.update_telephone(telephone))?;

        tracing::info!(%customer_id, version = saved.version(), "customer telephone updated");
        Ok(UpdateCustomerTelephoneOutput {
            customer: CustomerOutput::from(&saved),
            local,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::{SpyCustomerRepository, StubTelephoneGateway, customer};

    fn input(customer_id: CustomerId, telephone: &str) -> UpdateCustomerTelephoneInput {
        UpdateCustomerTelephoneInput {
            customer_id: customer_id.to_string(),
            telephone: telephone.to_string(),
        }
    }

    #[test]
    fn stores_canonical_number_and_returns_local_form() {
        let repo = SpyCustomerRepository::new();
        let saved = repo.seed(customer("jane@example.com"));
        let phones = StubTelephoneGateway::new(true);
        let use_case = UpdateCustomerTelephone::new(repo.clone(), phones.clone());

        let out = use_case
            .execute(input(saved.id_typed(), "(11) 98765-4321"))
            .unwrap();

        assert_eq!(out.customer.telephone.as_deref(), Some("+5511987654321"));
        assert_eq!(out.local.phone_number, "(11) 987654321");
        assert_eq!(out.local.region_code, "BR");
        assert_eq!(phones.calls(), vec!["is_valid", "format", "format_to_local"]);
        assert_eq!(repo.saves(), 1);
    }

    #[test]
    fn rejected_number_stops_before_format_and_save() {
        let repo = SpyCustomerRepository::new();
        let saved = repo.seed(customer("jane@example.com"));
        let phones = StubTelephoneGateway::new(false);
        let use_case = UpdateCustomerTelephone::new(repo.clone(), phones.clone());

        let err = use_case.execute(input(saved.id_typed(), "123")).unwrap_err();

        assert_eq!(err, UseCaseError::validation("telephone", "Invalid telephone"));
        assert_eq!(phones.calls(), vec!["is_valid"]);
        assert_eq!(repo.saves(), 0);
    }

    #[test]
    fn local_format_failure_leaves_customer_untouched() {
        let repo = SpyCustomerRepository::new();
        let saved = repo.seed(customer("jane@example.com"));
        let phones = StubTelephoneGateway::new(true);
        phones.fail_local.store(true, Ordering::SeqCst);
        let use_case = UpdateCustomerTelephone::new(repo.clone(), phones.clone());

        let err = use_case
            .execute(input(saved.id_typed(), "(11) 98765-4321"))
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Internal(_)));
        assert_eq!(repo.saves(), 0);
        let stored = repo.inner.customer_of_id(saved.id_typed()).unwrap().unwrap();
        assert_eq!(stored.telephone(), None);
        assert_eq!(stored.version(), 1);
    }

    #[test]
    fn unknown_customer_is_not_found_before_gateway() {
        let phones = StubTelephoneGateway::new(true);
        let err = UpdateCustomerTelephone::new(SpyCustomerRepository::new(), phones.clone())
            .execute(input(CustomerId::new(), "11987654321"))
            .unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound(_)));
        assert!(phones.calls().is_empty());
    }
}
