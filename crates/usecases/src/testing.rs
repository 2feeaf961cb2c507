//! Test doubles: in-memory stores wrapped with call recorders, and scripted
//! gateways.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use customerhub_core::{AddressId, AggregateRoot, CustomerId, UserId};
use customerhub_customers::{Address, AddressFields, Customer, Email, Name, Title};
use customerhub_infra::gateway::{
    AddressGateway, GatewayError, IdentityProviderGateway, InMemoryAddressGateway, LocalTelephone,
    NewIdentityUser, PostalAddress, TelephoneGateway,
};
use customerhub_infra::repository::{
    AddressRepository, CustomerRepository, InMemoryAddressRepository, InMemoryCustomerRepository,
    RepositoryError,
};
use customerhub_infra::{Page, PageRequest};

pub const ZIP: &str = "01310-100";

pub fn postal() -> PostalAddress {
    PostalAddress {
        zip_code: ZIP.to_string(),
        city: "São Paulo".to_string(),
        street: "Avenida Paulista".to_string(),
        district: "Bela Vista".to_string(),
        state: "SP".to_string(),
    }
}

pub fn other_postal() -> PostalAddress {
    PostalAddress {
        zip_code: "20040-002".to_string(),
        city: "Rio de Janeiro".to_string(),
        street: "Avenida Rio Branco".to_string(),
        district: "Centro".to_string(),
        state: "RJ".to_string(),
    }
}

pub fn fields(title: &str) -> AddressFields {
    let p = postal();
    AddressFields {
        title: Title::new(title).unwrap(),
        zip_code: p.zip_code,
        number: "1578".to_string(),
        street: p.street,
        city: p.city,
        district: p.district,
        country: "Brazil".to_string(),
        state: p.state,
        complement: None,
    }
}

pub fn customer(email: &str) -> Customer {
    Customer::new(
        CustomerId::new(),
        UserId::new(),
        Email::new(email).unwrap(),
        Name::new("Jane", "Doe").unwrap(),
    )
}

// -------------------------
// Repositories
// -------------------------

/// `stale_checks` makes the existence checks answer `false`, as if another
/// request wrote in between. `race_next_save` re-saves the stored row right
/// before the next save, bumping its version under the caller.
#[derive(Debug, Default)]
pub struct SpyCustomerRepository {
    pub inner: InMemoryCustomerRepository,
    pub saves: AtomicUsize,
    pub fail_saves: AtomicBool,
    pub stale_checks: AtomicBool,
    pub race_next_save: AtomicBool,
}

impl SpyCustomerRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, customer: Customer) -> Customer {
        self.inner.save(customer).unwrap()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CustomerRepository for SpyCustomerRepository {
    fn next_id(&self) -> CustomerId {
        self.inner.next_id()
    }

    fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        if self.stale_checks.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.inner.exists_by_email(email)
    }

    fn exists_by_document(&self, value: &str) -> Result<bool, RepositoryError> {
        if self.stale_checks.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.inner.exists_by_document(value)
    }

    fn save(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("disk on fire".to_string()));
        }
        if self.race_next_save.swap(false, Ordering::SeqCst) {
            if let Some(current) = self.inner.customer_of_id(customer.id_typed())? {
                self.inner.save(current)?;
            }
        }
        self.inner.save(customer)
    }

    fn customer_of_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.inner.customer_of_id(id)
    }

    fn customer_of_user_id(&self, user_id: UserId) -> Result<Option<Customer>, RepositoryError> {
        self.inner.customer_of_user_id(user_id)
    }
}

/// Records every saved address as `(id, is_default)` in call order.
/// `stale_checks` makes the count and default checks report an empty book.
#[derive(Debug, Default)]
pub struct SpyAddressRepository {
    pub inner: InMemoryAddressRepository,
    pub saved: Mutex<Vec<(AddressId, bool)>>,
    pub stale_checks: AtomicBool,
}

impl SpyAddressRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, customer_id: CustomerId, title: &str, is_default: bool) -> Address {
        let address = Address::new(AddressId::new(), customer_id, fields(title), is_default).unwrap();
        self.inner.save(address).unwrap()
    }

    pub fn saved(&self) -> Vec<(AddressId, bool)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

impl AddressRepository for SpyAddressRepository {
    fn save(&self, address: Address) -> Result<Address, RepositoryError> {
        self.saved
            .lock()
            .unwrap()
            .push((address.id_typed(), address.is_default()));
        self.inner.save(address)
    }

    fn count_by_customer_id(&self, customer_id: CustomerId) -> Result<u64, RepositoryError> {
        if self.stale_checks.load(Ordering::SeqCst) {
            return Ok(0);
        }
        self.inner.count_by_customer_id(customer_id)
    }

    fn exists_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError> {
        if self.stale_checks.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.inner.exists_by_customer_id_and_is_default_true(customer_id)
    }

    fn address_of_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        self.inner.address_of_id(id)
    }

    fn address_by_customer_id_and_is_default_true(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Address>, RepositoryError> {
        self.inner.address_by_customer_id_and_is_default_true(customer_id)
    }

    fn addresses_by_customer_id(
        &self,
        customer_id: CustomerId,
        search_query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Address>, RepositoryError> {
        self.inner.addresses_by_customer_id(customer_id, search_query, page)
    }

    fn delete(&self, id: AddressId) -> Result<(), RepositoryError> {
        self.inner.delete(id)
    }
}

// -------------------------
// Gateways
// -------------------------

#[derive(Debug, Default)]
pub struct SpyAddressGateway {
    pub inner: InMemoryAddressGateway,
    pub lookups: AtomicUsize,
}

impl SpyAddressGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryAddressGateway::with_entries([postal(), other_postal()]),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl AddressGateway for SpyAddressGateway {
    fn get_address_by_zip_code(
        &self,
        zip_code: &str,
    ) -> Result<Option<PostalAddress>, GatewayError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_address_by_zip_code(zip_code)
    }
}

/// Scripted telephone gateway: Brazilian numbers only, records calls by name.
#[derive(Debug)]
pub struct StubTelephoneGateway {
    pub valid: bool,
    pub calls: Mutex<Vec<&'static str>>,
    pub fail_local: AtomicBool,
}

impl StubTelephoneGateway {
    pub fn new(valid: bool) -> Arc<Self> {
        Arc::new(Self {
            valid,
            calls: Mutex::new(Vec::new()),
            fail_local: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TelephoneGateway for StubTelephoneGateway {
    fn is_valid(&self, _number: &str) -> Result<bool, GatewayError> {
        self.record("is_valid");
        Ok(self.valid)
    }

    fn format(&self, number: &str) -> Result<String, GatewayError> {
        self.record("format");
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        let national = digits.strip_prefix("55").unwrap_or(&digits);
        Ok(format!("+55{national}"))
    }

    fn format_to_local(&self, number: &str) -> Result<LocalTelephone, GatewayError> {
        self.record("format_to_local");
        if self.fail_local.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("phone metadata offline".to_string()));
        }
        let national = number.trim_start_matches("+55");
        Ok(LocalTelephone {
            phone_number: format!("({}) {}", &national[..2], &national[2..]),
            country_code: 55,
            region_code: "BR".to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct StubIdentityProvider {
    pub created: Mutex<Vec<UserId>>,
    pub deleted: Mutex<Vec<UserId>>,
    pub fail_deletes: AtomicBool,
}

impl StubIdentityProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn created(&self) -> Vec<UserId> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<UserId> {
        self.deleted.lock().unwrap().clone()
    }
}

impl IdentityProviderGateway for StubIdentityProvider {
    fn create(&self, _user: &NewIdentityUser) -> Result<UserId, GatewayError> {
        let id = UserId::new();
        self.created.lock().unwrap().push(id);
        Ok(id)
    }

    fn delete_of_user_id(&self, user_id: UserId) -> Result<(), GatewayError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("identity provider down".to_string()));
        }
        self.deleted.lock().unwrap().push(user_id);
        Ok(())
    }
}

// -------------------------
// Logs
// -------------------------

/// Runs `f` under a thread-local subscriber and returns everything it logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (out, logs)
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Current stored version of an address, for asserting writes.
pub fn stored_version(repo: &SpyAddressRepository, id: AddressId) -> Option<u64> {
    repo.inner.address_of_id(id).unwrap().map(|a| a.version())
}
