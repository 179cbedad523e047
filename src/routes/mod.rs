//! HTTP layer: REST endpoints and the mapping of service errors to JSON responses.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Direction, PageRequest, Sort, SortField};
use crate::services::ServiceError;

pub mod client;

/// Body returned with every error status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error, message) = match self {
            ServiceError::NotFound(message) => ("Resource not found", message.clone()),
            ServiceError::Validation(message) => ("Validation error", message.clone()),
            ServiceError::Storage(err) => {
                log::error!("Storage failure: {err}");
                ("Internal server error", "Unexpected storage failure".to_string())
            }
        };

        HttpResponse::build(status).json(ErrorBody {
            error: error.to_string(),
            message,
            status: status.as_u16(),
        })
    }
}

/// Paging parameters shared by every list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
}

fn default_lines_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

impl PageParams {
    /// Builds the request; pages are ordered by name ascending unless told otherwise.
    pub fn to_page_request(&self) -> Result<PageRequest, TypeConstraintError> {
        let direction = match self.direction.as_deref() {
            Some(direction) => direction.parse()?,
            None => Direction::Asc,
        };
        let property = match self.order_by.as_deref() {
            Some(order_by) => order_by.parse()?,
            None => SortField::Name,
        };

        let request = PageRequest::of(self.page, self.lines_per_page)?;
        Ok(request.with_sort(Sort::new(property, direction)))
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServiceError::Validation(err.to_string()).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServiceError::Validation(err.to_string()).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ServiceError::Validation(err.to_string()).into()
}

/// Registers the client endpoints and JSON error handling for extractors.
///
/// Fixed paths are registered before `/clients/{id}` so they are matched first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(client::clients_by_income)
        .service(client::clients_by_income_greater_than)
        .service(client::clients_by_cpf_like)
        .service(client::list_clients)
        .service(client::insert_client)
        .service(client::show_client)
        .service(client::update_client)
        .service(client::delete_client);
}
