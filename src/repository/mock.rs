//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
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

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
        fn delete_client(&self, client: &Client) -> RepositoryResult<()>;
        fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()>;
        fn delete_client_by_cpf(&self, cpf: &str) -> RepositoryResult<()>;
        fn delete_by_income_greater_than(&self, threshold: f64) -> RepositoryResult<usize>;
        fn delete_all_clients(&self) -> RepositoryResult<usize>;
    }
}
