use actix_web::http::{StatusCode, header};
use actix_web::{App, middleware, test, web};
use serde_json::{Value, json};

use client_registry::routes;

mod common;

macro_rules! app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .wrap(middleware::NormalizePath::trim())
                .app_data(web::Data::new($test_db.repository()))
                .configure(routes::configure),
        )
        .await
    };
}

fn ids(body: &Value) -> Vec<i64> {
    body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|client| client["id"].as_i64().unwrap())
        .collect()
}

fn ana_maria() -> Value {
    json!({
        "name": "Ana Maria Silva",
        "cpf": "00012345678",
        "income": 7000.0,
        "birthDate": "2019-10-01T08:25:24Z",
        "children": 1
    })
}

#[actix_web::test]
async fn test_list_clients_defaults_to_name_order() {
    let test_db = common::TestDb::new("test_list_clients_defaults.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/clients").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["numberOfElements"], 11);
    assert_eq!(body["totalElements"], 11);
    assert_eq!(body["size"], 12);
    assert_eq!(ids(&body), vec![4, 9, 3, 1, 6, 5, 7, 2, 10, 8, 11]);
}

#[actix_web::test]
async fn test_list_clients_with_paging_parameters() {
    let test_db = common::TestDb::new("test_list_clients_paging.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/clients?page=0&linesPerPage=3&direction=DESC&orderBy=income")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![8, 4, 7]);
    assert_eq!(body["totalPages"], 4);
    assert_eq!(body["first"], true);
    assert_eq!(body["last"], false);
}

#[actix_web::test]
async fn test_list_clients_far_past_the_end_is_empty() {
    let test_db = common::TestDb::new("test_list_clients_far_past_the_end.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/clients?page=1000000000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["numberOfElements"], 0);
    assert_eq!(body["empty"], true);
    assert_eq!(body["totalElements"], 11);
}

#[actix_web::test]
async fn test_list_clients_rejects_unknown_order() {
    let test_db = common::TestDb::new("test_list_clients_unknown_order.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/clients?orderBy=salary")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation error");
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_show_client() {
    let test_db = common::TestDb::new("test_show_client.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/clients/3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["name"], "Clarice Lispector");
    assert_eq!(body["cpf"], "10919444522");
}

#[actix_web::test]
async fn test_show_missing_client_is_not_found() {
    let test_db = common::TestDb::new("test_show_missing_client.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/clients/300").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "error": "Resource not found",
            "message": "Entity not found",
            "status": 404
        })
    );
}

#[actix_web::test]
async fn test_show_client_rejects_non_positive_id() {
    let test_db = common::TestDb::new("test_show_client_non_positive.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/clients/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/clients/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_insert_client() {
    let test_db = common::TestDb::new("test_insert_client.db");
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(ana_maria())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/clients/12"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 12);
    assert_eq!(body["name"], "Ana Maria Silva");
    assert_eq!(body["cpf"], "00012345678");
    assert_eq!(body["birthDate"], "2019-10-01T08:25:24Z");

    let req = test::TestRequest::get().uri("/clients/12").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_insert_client_with_taken_cpf_is_rejected() {
    let test_db = common::TestDb::new("test_insert_client_taken_cpf.db");
    let app = app!(test_db);

    let mut payload = ana_maria();
    payload["cpf"] = json!("10619244881");
    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation error");
    assert_eq!(body["message"], "CPF 10619244881 is already registered");
}

#[actix_web::test]
async fn test_insert_invalid_client_is_rejected() {
    let test_db = common::TestDb::new("test_insert_invalid_client.db");
    let app = app!(test_db);

    let mut payload = ana_maria();
    payload["cpf"] = json!("123");
    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/clients")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation error");
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_update_client() {
    let test_db = common::TestDb::new("test_update_client.db");
    let app = app!(test_db);

    let payload = json!({
        "name": "Jose Saramago",
        "cpf": "10239254871",
        "income": 8000.0,
        "birthDate": "1922-11-16T00:00:00Z",
        "children": 1
    });
    let req = test::TestRequest::put()
        .uri("/clients/7")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["income"], 8000.0);

    let req = test::TestRequest::put()
        .uri("/clients/13")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Id not found 13");
}

#[actix_web::test]
async fn test_delete_client() {
    let test_db = common::TestDb::new("test_delete_client.db");
    let app = app!(test_db);

    let req = test::TestRequest::delete().uri("/clients/3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/clients/3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_missing_client_is_not_found() {
    let test_db = common::TestDb::new("test_delete_missing_client.db");
    let app = app!(test_db);

    let req = test::TestRequest::delete().uri("/clients/1000").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "error": "Resource not found",
            "message": "Id not found 1000",
            "status": 404
        })
    );
}

#[actix_web::test]
async fn test_clients_by_income_with_trailing_slash() {
    let test_db = common::TestDb::new("test_clients_by_income.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/clients/income/?income=1500.0&orderBy=id")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["numberOfElements"], 3);
    assert_eq!(ids(&body), vec![1, 9, 10]);
}

#[actix_web::test]
async fn test_clients_by_income_requires_income() {
    let test_db = common::TestDb::new("test_clients_by_income_missing.db");
    let app = app!(test_db);

    let req = test::TestRequest::get().uri("/clients/income").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_clients_by_income_greater_than() {
    let test_db = common::TestDb::new("test_clients_by_income_greater_than.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/clients/income-greater-than?income=4800&page=1&linesPerPage=2&orderBy=income")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![8]);
    assert_eq!(body["totalElements"], 3);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["number"], 1);
}

#[actix_web::test]
async fn test_clients_by_cpf_like() {
    let test_db = common::TestDb::new("test_clients_by_cpf_like.db");
    let app = app!(test_db);

    let req = test::TestRequest::get()
        .uri("/clients/cpf-like?cpf=%25447%25")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![4]);
    assert_eq!(body["content"][0]["name"], "Carolina Maria de Jesus");
}
