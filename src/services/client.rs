//! Client use cases: lookups, paged searches and the write operations behind
//! the REST endpoints.

use validator::Validate;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::dto::client::ClientDto;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::errors::ENTITY_NOT_FOUND;
use crate::services::{ServiceError, ServiceResult};

fn to_dto_page(page: Page<Client>) -> Page<ClientDto> {
    page.map(ClientDto::from)
}

/// Lists every client, one page at a time.
pub fn find_all_paged<R>(repo: &R, request: &PageRequest) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo.find_all_clients_paged(request)?;
    Ok(to_dto_page(page))
}

/// Fetches a single client.
pub fn find_by_id<R>(repo: &R, id: ClientId) -> ServiceResult<ClientDto>
where
    R: ClientReader + ?Sized,
{
    repo.find_client_by_id(id)?
        .map(ClientDto::from)
        .ok_or_else(|| ServiceError::NotFound(ENTITY_NOT_FOUND.to_string()))
}

/// Clients earning strictly more than `threshold`.
pub fn find_by_income_greater_than<R>(
    repo: &R,
    request: &PageRequest,
    threshold: f64,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo.find_by_income_greater_than_paged(threshold, request)?;
    Ok(to_dto_page(page))
}

/// Clients whose CPF matches a `LIKE` pattern such as `%447%`.
pub fn find_by_cpf_like<R>(
    repo: &R,
    request: &PageRequest,
    pattern: &str,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo.find_by_cpf_like_paged(pattern, request)?;
    Ok(to_dto_page(page))
}

/// Clients earning exactly `income`.
pub fn find_by_income<R>(
    repo: &R,
    request: &PageRequest,
    income: f64,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo.find_by_income_paged(income, request)?;
    Ok(to_dto_page(page))
}

/// Validates the payload and stores a new client. Any `id` in the payload is ignored.
pub fn insert_client<R>(repo: &R, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    dto.validate()?;
    let new_client = NewClient::try_from(dto)?;

    if repo.find_client_by_cpf(new_client.cpf.as_str())?.is_some() {
        return Err(ServiceError::Validation(format!(
            "CPF {} is already registered",
            new_client.cpf
        )));
    }

    let created = repo.create_client(&new_client)?;
    log::info!("Created client {}", created.id);
    Ok(created.into())
}

/// Replaces every mutable field of an existing client.
pub fn update_client<R>(repo: &R, id: ClientId, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    dto.validate()?;
    let updates = UpdateClient::try_from(dto)?;

    if repo.find_client_by_id(id)?.is_none() {
        return Err(ServiceError::id_not_found(id));
    }

    if let Some(owner) = repo.find_client_by_cpf(updates.cpf.as_str())? {
        if owner.id != id.get() {
            return Err(ServiceError::Validation(format!(
                "CPF {} is already registered",
                updates.cpf
            )));
        }
    }

    match repo.update_client(id, &updates) {
        Ok(updated) => Ok(updated.into()),
        Err(RepositoryError::NotFound) => Err(ServiceError::id_not_found(id)),
        Err(err) => Err(ServiceError::Storage(err)),
    }
}

/// Removes a client, reporting a missing id as [`ServiceError::NotFound`].
pub fn delete_client<R>(repo: &R, id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    match repo.delete_client_by_id(id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::id_not_found(id)),
        Err(err) => {
            log::error!("Failed to delete client {id}: {err}");
            Err(ServiceError::Storage(err))
        }
    }
}
