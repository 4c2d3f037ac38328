// src/handlers/index.rs
// DOCUMENTATION: Service status and object counts
// PURPOSE: GET /status and GET /stats

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::services::CatalogService;

/// GET /status
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

/// GET /stats
/// Number of stored objects per kind
pub async fn stats<S: EntityStore>(store: web::Data<S>) -> Result<HttpResponse, PlacesError> {
    let stats = CatalogService::new(store.get_ref()).stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status))
        .route("/stats", web::get().to(stats::<S>));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::fixtures::world;
    use crate::handlers::config;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_rt::test]
    async fn test_status_and_stats() {
        let w = world().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(w.store))
                .configure(config::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/status").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": "OK" }));

        let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({ "amenities": 2, "cities": 3, "places": 3, "states": 2, "users": 1 })
        );
    }
}
