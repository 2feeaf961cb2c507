use serde::Deserialize;

use customerhub_core::AggregateRoot;
use customerhub_customers::{Customer, Email, Name};
use customerhub_infra::gateway::{IdentityProviderGateway, NewIdentityUser};
use customerhub_infra::repository::CustomerRepository;

use crate::dto::CustomerOutput;
use crate::error::{EMAIL_ALREADY_EXISTS, UseCaseError, UseCaseResult};

#[derive(Clone, Deserialize)]
pub struct CreateCustomerInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl core::fmt::Debug for CreateCustomerInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreateCustomerInput")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Register a customer and open their identity account.
///
/// The identity account is created before the customer row. If the row cannot
/// be written the account is deleted again so no orphan login survives.
pub struct CreateCustomer<C, I> {
    customers: C,
    identity: I,
}

impl<C, I> CreateCustomer<C, I>
where
    C: CustomerRepository,
    I: IdentityProviderGateway,
{
    pub fn new(customers: C, identity: I) -> Self {
        Self {
            customers,
            identity,
        }
    }

    pub fn execute(&self, input: CreateCustomerInput) -> UseCaseResult<CustomerOutput> {
        let email = Email::new(&input.email)?;
        let name = Name::new(&input.first_name, &input.last_name)?;

        if self.customers.exists_by_email(&email)? {
            tracing::warn!("customer email already registered");
            return Err(UseCaseError::business_rule(EMAIL_ALREADY_EXISTS));
        }

        let user_id = self.identity.create(&NewIdentityUser {
            email: email.clone(),
            name: name.clone(),
            password: input.password,
        })?;

        let customer = Customer::new(self.customers.next_id(), user_id, email, name);
        let saved = match self.customers.save(customer) {
            Ok(saved) => saved,
            Err(err) => {
                if let Err(cleanup) = self.identity.delete_of_user_id(user_id) {
                    tracing::warn!(%user_id, error = %cleanup, "failed to remove identity account after save failure");
                }
                return Err(err.into());
            }
        };

        tracing::info!(
            customer_id = %saved.id_typed(),
            user_id = %saved.user_id(),
            version = saved.version(),
            "customer created"
        );
        Ok(CustomerOutput::from(&saved))
    }
}
