// src/handlers/cities.rs
// DOCUMENTATION: HTTP handlers for city operations
// PURPOSE: Cities are listed and created through their state

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use super::parse_body;
use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{City, State, UpdateCityRequest};
use crate::services::CatalogService;

/// GET /states/{state_id}/cities
pub async fn list_cities<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let cities = CatalogService::new(store.get_ref())
        .cities_of_state(&path)
        .await?;
    Ok(HttpResponse::Ok().json(cities))
}

/// POST /states/{state_id}/cities
pub async fn create_city<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let service = CatalogService::new(store.get_ref());
    // Unknown state wins over a bad body
    let state: State = service.get(&path).await?;

    let req = parse_body(body.into_inner())?;
    let city = service.create_city(&state, req).await?;
    Ok(HttpResponse::Created().json(city))
}

/// GET /cities/{id}
pub async fn get_city<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let city: City = CatalogService::new(store.get_ref()).get(&path).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// PUT /cities/{id}
pub async fn update_city<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req: UpdateCityRequest = parse_body(body.into_inner())?;
    let city: City = CatalogService::new(store.get_ref()).update(&path, req).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// DELETE /cities/{id}
pub async fn delete_city<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    CatalogService::new(store.get_ref()).delete_city(&path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/states/{id}/cities")
            .route(web::get().to(list_cities::<S>))
            .route(web::post().to(create_city::<S>)),
    )
    .service(
        web::resource("/cities/{id}")
            .route(web::get().to(get_city::<S>))
            .route(web::put().to(update_city::<S>))
            .route(web::delete().to(delete_city::<S>)),
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
    async fn test_cities_of_state() {
        let w = world().await;
        let california_id = w.california.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/states/{}/cities", california_id))
            .to_request();
        let cities: Vec<City> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["San Francisco", "Los Angeles"]);

        let req = test::TestRequest::get()
            .uri("/api/v1/states/missing/cities")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_create_city_in_state() {
        let w = world().await;
        let nevada_id = w.nevada.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/states/{}/cities", nevada_id))
            .set_json(json!({ "name": "Las Vegas" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let city: City = test::read_body_json(resp).await;
        assert_eq!(city.state_id, nevada_id);

        let req = test::TestRequest::post()
            .uri("/api/v1/states/missing/cities")
            .set_json(json!({ "name": "Nowhere" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/states/{}/cities", nevada_id))
            .set_json(json!({ "population": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_delete_city_removes_places() {
        let w = world().await;
        let sf_id = w.san_francisco.id.clone();
        let loft_id = w.loft.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/cities/{}", sf_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/places/{}", loft_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
