// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use super::parse_body;
use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{City, Place, PlaceResponse, SearchCriteria, UpdatePlaceRequest};
use crate::services::{CatalogService, PlaceSearchFilter};

/// GET /cities/{city_id}/places
pub async fn list_places<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let places = CatalogService::new(store.get_ref())
        .places_of_city(&path)
        .await?;
    Ok(HttpResponse::Ok().json(places))
}

/// POST /cities/{city_id}/places
/// Requires `user_id` naming an existing user and `name`
pub async fn create_place<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let service = CatalogService::new(store.get_ref());
    // Unknown city wins over a bad body
    let city: City = service.get(&path).await?;

    let req = parse_body(body.into_inner())?;
    let place = service.create_place(&city, req).await?;
    Ok(HttpResponse::Created().json(place))
}

/// GET /places/{id}
pub async fn get_place<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let place: Place = CatalogService::new(store.get_ref()).get(&path).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// PUT /places/{id}
pub async fn update_place<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req: UpdatePlaceRequest = parse_body(body.into_inner())?;
    let place: Place = CatalogService::new(store.get_ref()).update(&path, req).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// DELETE /places/{id}
pub async fn delete_place<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    CatalogService::new(store.get_ref()).delete_place(&path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// POST /places_search
/// DOCUMENTATION: Body is a JSON object with optional `states`, `cities` and
/// `amenities` id lists; `{}` returns every place. Results never carry the
/// `amenities` key.
pub async fn search_places<S: EntityStore>(
    store: web::Data<S>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let body = body.into_inner();
    if !body.is_object() {
        return Err(PlacesError::not_json());
    }
    let criteria: SearchCriteria =
        serde_json::from_value(body).map_err(|e| PlacesError::BadRequest(e.to_string()))?;

    let places = PlaceSearchFilter::new(store.get_ref())
        .search(&criteria)
        .await?;

    let results: Vec<PlaceResponse> = places.iter().map(Place::to_response).collect();
    Ok(HttpResponse::Ok().json(results))
}

pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/cities/{id}/places")
            .route(web::get().to(list_places::<S>))
            .route(web::post().to(create_place::<S>)),
    )
    .service(
        web::resource("/places/{id}")
            .route(web::get().to(get_place::<S>))
            .route(web::put().to(update_place::<S>))
            .route(web::delete().to(delete_place::<S>)),
    )
    .service(web::resource("/places_search").route(web::post().to(search_places::<S>)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::fixtures::world;
    use crate::handlers::config;
    use actix_web::{http::StatusCode, test, App};

    fn place_names(places: &[Value]) -> Vec<&str> {
        places.iter().filter_map(|p| p["name"].as_str()).collect()
    }

    #[actix_rt::test]
    async fn test_create_place_in_city() {
        let w = world().await;
        let reno_id = w.reno.id.clone();
        let owner_id = w.owner.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/cities/{}/places", reno_id))
            .set_json(json!({ "name": "Barn" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Missing user_id");

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/cities/{}/places", reno_id))
            .set_json(json!({ "user_id": "ghost", "name": "Barn" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/cities/{}/places", reno_id))
            .set_json(json!({ "user_id": owner_id, "name": "Barn", "price_by_night": 80 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let place: Place = test::read_body_json(resp).await;
        assert_eq!(place.city_id, reno_id);
        assert_eq!(place.price_by_night, 80);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/cities/{}/places", reno_id))
            .to_request();
        let places: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(place_names(&places), vec!["Cabin", "Barn"]);
    }

    #[actix_rt::test]
    async fn test_create_place_unknown_city_before_empty_body() {
        let w = world().await;
        let reno_id = w.reno.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cities/missing/places")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/cities/{}/places", reno_id))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Not a JSON");
    }

    #[actix_rt::test]
    async fn test_update_place_rejects_bad_latitude() {
        let w = world().await;
        let cabin_id = w.cabin.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/places/{}", cabin_id))
            .set_json(json!({ "latitude": 120.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/places/{}", cabin_id))
            .set_json(json!({ "latitude": 39.5, "city_id": "elsewhere" }))
            .to_request();
        let place: Place = test::call_and_read_body_json(&app, req).await;
        assert_eq!(place.latitude, Some(39.5));
        assert_ne!(place.city_id, "elsewhere");
    }

    #[actix_rt::test]
    async fn test_search_with_empty_object() {
        let w = world().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .set_json(json!({}))
            .to_request();
        let places: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(place_names(&places), vec!["Loft", "Studio", "Cabin"]);
        assert!(places.iter().all(|p| p.get("amenities").is_none()));
    }

    #[actix_rt::test]
    async fn test_search_by_state_and_amenity() {
        let w = world().await;
        let california_id = w.california.id.clone();
        let pool_id = w.pool.id.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .set_json(json!({ "states": [california_id], "amenities": [pool_id] }))
            .to_request();
        let places: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(place_names(&places), vec!["Loft"]);

        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .set_json(json!({ "states": ["nonexistent"] }))
            .to_request();
        let places: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(places.is_empty());
    }

    #[actix_rt::test]
    async fn test_search_rejects_non_object_body() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemoryStore::new()))
                .configure(config::<MemoryStore>),
        )
        .await;

        for payload in ["[1, 2]", "\"states\"", "not json"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/places_search")
                .insert_header(("content-type", "application/json"))
                .set_payload(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Bad Request");
        }
    }
}
