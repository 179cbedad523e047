use crate::{
    db::DbPool,
    domain::{
        client::{Client, NewClient, UpdateClient},
        types::ClientId,
    },
    pagination::{Page, PageRequest},
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Structured description of which clients a query selects.
///
/// Every predicate method on [`ClientReader`] and [`ClientWriter`] is
/// expressed as one of these and translated into SQL in a single place.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientFilter {
    All,
    /// Exact CPF match.
    Cpf(String),
    /// SQL `LIKE` pattern over the CPF; `%` and `_` act as wildcards.
    CpfLike(String),
    /// CPF begins with the given characters, taken literally.
    CpfStartingWith(String),
    /// Exact income match.
    Income(f64),
    /// Income strictly greater than the threshold.
    IncomeGreaterThan(f64),
}

pub trait ClientReader {
    fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn find_client_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Client>>;
    fn find_all_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn find_all_clients_paged(&self, request: &PageRequest) -> RepositoryResult<Page<Client>>;
    fn find_by_income_greater_than(&self, threshold: f64) -> RepositoryResult<Vec<Client>>;
    fn find_by_income_greater_than_paged(
        &self,
        threshold: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    fn find_by_cpf_like(&self, pattern: &str) -> RepositoryResult<Vec<Client>>;
    fn find_by_cpf_like_paged(
        &self,
        pattern: &str,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    fn find_by_cpf_starting_with(&self, prefix: &str) -> RepositoryResult<Vec<Client>>;
    fn find_by_cpf_starting_with_paged(
        &self,
        prefix: &str,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    fn find_by_income_paged(
        &self,
        income: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    fn count_clients(&self) -> RepositoryResult<usize>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    /// Fails with [`errors::RepositoryError::NotFound`] when no row has `id`.
    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
    /// Fails with [`errors::RepositoryError::NotFound`] when the row is already gone.
    fn delete_client(&self, client: &Client) -> RepositoryResult<()>;
    /// Fails with [`errors::RepositoryError::NotFound`] when no row has `id`.
    fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()>;
    /// Removes the client with this CPF if there is one.
    fn delete_client_by_cpf(&self, cpf: &str) -> RepositoryResult<()>;
    fn delete_by_income_greater_than(&self, threshold: f64) -> RepositoryResult<usize>;
    fn delete_all_clients(&self) -> RepositoryResult<usize>;
}

/// Diesel-backed repository shared by every request handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
