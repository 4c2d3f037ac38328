// src/handlers/states.rs
// DOCUMENTATION: HTTP handlers for state operations
// PURPOSE: Parse requests, call CatalogService, return responses

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use super::parse_body;
use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{State, UpdateStateRequest};
use crate::services::CatalogService;

/// GET /states
pub async fn list_states<S: EntityStore>(
    store: web::Data<S>,
) -> Result<HttpResponse, PlacesError> {
    let states = CatalogService::new(store.get_ref()).list::<State>().await?;
    Ok(HttpResponse::Ok().json(states))
}

/// POST /states
pub async fn create_state<S: EntityStore>(
    store: web::Data<S>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req = parse_body(body.into_inner())?;
    let state = CatalogService::new(store.get_ref()).create_state(req).await?;
    Ok(HttpResponse::Created().json(state))
}

/// GET /states/{id}
pub async fn get_state<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let state: State = CatalogService::new(store.get_ref()).get(&path).await?;
    Ok(HttpResponse::Ok().json(state))
}

/// PUT /states/{id}
pub async fn update_state<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req: UpdateStateRequest = parse_body(body.into_inner())?;
    let state: State = CatalogService::new(store.get_ref()).update(&path, req).await?;
    Ok(HttpResponse::Ok().json(state))
}

/// DELETE /states/{id}
/// Removes the state's cities and their places as well
pub async fn delete_state<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    CatalogService::new(store.get_ref()).delete_state(&path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/states")
            .route(web::get().to(list_states::<S>))
            .route(web::post().to(create_state::<S>)),
    )
    .service(
        web::resource("/states/{id}")
            .route(web::get().to(get_state::<S>))
            .route(web::put().to(update_state::<S>))
            .route(web::delete().to(delete_state::<S>)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::fixtures::world;
    use crate::handlers::config;
    use actix_web::{http::StatusCode, test, App};

    #[actix_rt::test]
    async fn test_create_then_get_state() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemoryStore::new()))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/states")
            .set_json(json!({ "name": "Oregon" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["name"], "Oregon");

        let id = created["id"].as_str().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/states/{}", id))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);

        let req = test::TestRequest::get().uri("/api/v1/states").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all, json!([created]));
    }

    #[actix_rt::test]
    async fn test_create_state_without_name() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemoryStore::new()))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/states")
            .set_json(json!({ "capital": "Salem" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "error": "Bad Request", "message": "Missing name" })
        );
    }

    #[actix_rt::test]
    async fn test_update_and_delete_state() {
        let w = world().await;
        let nevada_id = w.nevada.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/states/{}", nevada_id))
            .set_json(json!({ "id": "other", "name": "Silver State" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["id"], nevada_id.as_str());
        assert_eq!(updated["name"], "Silver State");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/states/{}", nevada_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({}));

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/states/{}", nevada_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["cities"], 2);
        assert_eq!(stats["places"], 2);
    }
}
