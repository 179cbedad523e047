use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::types::ClientId;
use crate::dto::client::ClientDto;
use crate::repository::DieselRepository;
use crate::routes::PageParams;
use crate::services::ServiceError;
use crate::services::client as client_service;

type HandlerResult = Result<HttpResponse, ServiceError>;

#[derive(Deserialize)]
struct IncomeParams {
    income: f64,
}

#[derive(Deserialize)]
struct CpfParams {
    cpf: String,
}

#[get("/clients")]
pub async fn list_clients(
    repo: web::Data<DieselRepository>,
    params: web::Query<PageParams>,
) -> HandlerResult {
    let request = params.to_page_request()?;
    let page = client_service::find_all_paged(repo.get_ref(), &request)?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/clients/income")]
pub async fn clients_by_income(
    repo: web::Data<DieselRepository>,
    income: web::Query<IncomeParams>,
    params: web::Query<PageParams>,
) -> HandlerResult {
    let request = params.to_page_request()?;
    let page = client_service::find_by_income(repo.get_ref(), &request, income.income)?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/clients/income-greater-than")]
pub async fn clients_by_income_greater_than(
    repo: web::Data<DieselRepository>,
    income: web::Query<IncomeParams>,
    params: web::Query<PageParams>,
) -> HandlerResult {
    let request = params.to_page_request()?;
    let page =
        client_service::find_by_income_greater_than(repo.get_ref(), &request, income.income)?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/clients/cpf-like")]
pub async fn clients_by_cpf_like(
    repo: web::Data<DieselRepository>,
    cpf: web::Query<CpfParams>,
    params: web::Query<PageParams>,
) -> HandlerResult {
    let request = params.to_page_request()?;
    let page = client_service::find_by_cpf_like(repo.get_ref(), &request, &cpf.cpf)?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/clients/{id}")]
pub async fn show_client(repo: web::Data<DieselRepository>, id: web::Path<i32>) -> HandlerResult {
    let id = ClientId::new(id.into_inner())?;
    let client = client_service::find_by_id(repo.get_ref(), id)?;
    Ok(HttpResponse::Ok().json(client))
}

#[post("/clients")]
pub async fn insert_client(
    repo: web::Data<DieselRepository>,
    web::Json(dto): web::Json<ClientDto>,
) -> HandlerResult {
    let created = client_service::insert_client(repo.get_ref(), &dto)?;
    let location = format!("/clients/{}", created.id.unwrap_or_default());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(created))
}

#[put("/clients/{id}")]
pub async fn update_client(
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
    web::Json(dto): web::Json<ClientDto>,
) -> HandlerResult {
    let id = ClientId::new(id.into_inner())?;
    let updated = client_service::update_client(repo.get_ref(), id, &dto)?;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/clients/{id}")]
pub async fn delete_client(
    repo: web::Data<DieselRepository>,
    id: web::Path<i32>,
) -> HandlerResult {
    let id = ClientId::new(id.into_inner())?;
    client_service::delete_client(repo.get_ref(), id)?;
    Ok(HttpResponse::NoContent().finish())
}
