// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for user operations
// PURPOSE: Every response goes through UserResponse so password hashes stay server-side

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use super::parse_body;
use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{UpdateUserRequest, User, UserResponse};
use crate::services::CatalogService;

/// GET /users
pub async fn list_users<S: EntityStore>(store: web::Data<S>) -> Result<HttpResponse, PlacesError> {
    let users = CatalogService::new(store.get_ref()).list::<User>().await?;
    let users: Vec<UserResponse> = users.iter().map(User::to_response).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users
pub async fn create_user<S: EntityStore>(
    store: web::Data<S>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req = parse_body(body.into_inner())?;
    let user = CatalogService::new(store.get_ref()).create_user(req).await?;
    Ok(HttpResponse::Created().json(user.to_response()))
}

/// GET /users/{id}
pub async fn get_user<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let user: User = CatalogService::new(store.get_ref()).get(&path).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// PUT /users/{id}
pub async fn update_user<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req: UpdateUserRequest = parse_body(body.into_inner())?;
    let user: User = CatalogService::new(store.get_ref()).update(&path, req).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// DELETE /users/{id}
/// Removes the places the user owns
pub async fn delete_user<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    CatalogService::new(store.get_ref()).delete_user(&path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(list_users::<S>))
            .route(web::post().to(create_user::<S>)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::get().to(get_user::<S>))
            .route(web::put().to(update_user::<S>))
            .route(web::delete().to(delete_user::<S>)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::handlers::config;
    use actix_web::{http::StatusCode, test, App};

    #[actix_rt::test]
    async fn test_create_user_hides_password() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemoryStore::new()))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "guest@hbnb.io", "password": "pwd", "first_name": "Sam" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["email"], "guest@hbnb.io");
        assert_eq!(created["first_name"], "Sam");
        assert!(created.get("password").is_none());

        let req = test::TestRequest::get().uri("/api/v1/users").to_request();
        let users: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(users.len(), 1);
        assert!(users[0].get("password").is_none());
    }

    #[actix_rt::test]
    async fn test_create_user_missing_fields() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MemoryStore::new()))
                .configure(config::<MemoryStore>),
        )
        .await;

        let cases = [
            (json!({ "password": "pwd" }), "Missing email"),
            (json!({ "email": "guest@hbnb.io" }), "Missing password"),
        ];
        for (body, message) in cases {
            let req = test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], message);
        }
    }

    #[actix_rt::test]
    async fn test_update_user_keeps_email() {
        let store = MemoryStore::new();
        let user = User::new("owner@hbnb.io", "old");
        crate::fixtures::put(&store, user.clone()).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/users/{}", user.id))
            .set_json(json!({ "email": "new@hbnb.io", "last_name": "Doe" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["email"], "owner@hbnb.io");
        assert_eq!(updated["last_name"], "Doe");
    }
}
