use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::config::DispatchConfig;
use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::dispatch::dtos::{DispatchPreviewDto, DispatchPreviewResponseDto};
use crate::features::dispatch::models::Location;
use crate::features::dispatch::services::DispatchResolver;
use crate::shared::types::ApiResponse;

/// State for dispatch handlers
#[derive(Clone)]
pub struct DispatchState {
    pub resolver: Arc<DispatchResolver>,
    pub config: Arc<DispatchConfig>,
}

/// Preview which providers would be notified for a location
///
/// Runs the proximity lookup without creating a request or sending anything.
#[utoipa::path(
    post,
    path = "/api/dispatch/preview",
    request_body = DispatchPreviewDto,
    responses(
        (status = 200, description = "Ranked providers, nearest first", body = ApiResponse<DispatchPreviewResponseDto>),
        (status = 400, description = "Invalid coordinates or radius")
    ),
    tag = "dispatch"
)]
pub async fn preview(
    State(state): State<DispatchState>,
    ValidatedJson(dto): ValidatedJson<DispatchPreviewDto>,
) -> Result<Json<ApiResponse<DispatchPreviewResponseDto>>> {
    let location = Location::from_parts(dto.latitude, dto.longitude)?;
    let request = state
        .config
        .request(location, dto.vehicle_type, dto.radius_km, dto.max_fanout)?;

    let matches = state.resolver.resolve(&request).await?;
    let message = matches
        .is_empty()
        .then(|| "Aucun dépanneur disponible pour le moment".to_string());

    Ok(Json(ApiResponse::success(
        Some(DispatchPreviewResponseDto {
            radius_km: request.radius_km,
            max_fanout: request.max_fanout,
            matches,
        }),
        message,
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::dispatch::routes;
    use crate::features::dispatch::{Capability, DispatchPolicy, ProviderCandidate};
    use crate::shared::test_helpers::{provider_at, FailingDirectory, InMemoryProviderDirectory};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server_with(directory: Arc<dyn crate::features::dispatch::ProviderDirectory>) -> TestServer {
        let resolver = Arc::new(DispatchResolver::new(directory, DispatchPolicy::default()));
        let app = routes::routes(resolver, Arc::new(DispatchConfig::default()));
        TestServer::new(app).unwrap()
    }

    fn origin() -> Location {
        Location {
            latitude: 6.3703,
            longitude: 2.3912,
        }
    }

    #[tokio::test]
    async fn test_preview_returns_ranked_matches() {
        let near = provider_at(&origin(), 2.0, Capability::Car);
        let far = provider_at(&origin(), 15.0, Capability::Car);
        let providers: Vec<ProviderCandidate> = vec![far, near.clone()];
        let server = server_with(Arc::new(InMemoryProviderDirectory::new(providers)));

        let response = server
            .post("/api/dispatch/preview")
            .json(&json!({
                "latitude": 6.3703,
                "longitude": 2.3912,
                "vehicleType": "voiture"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["radiusKm"], json!(10.0));
        let matches = body["data"]["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["providerId"], json!(near.id));
        assert_eq!(matches[0]["distanceKm"], json!(2.0));
    }

    #[tokio::test]
    async fn test_preview_rejects_invalid_coordinates() {
        let server = server_with(Arc::new(InMemoryProviderDirectory::new(Vec::new())));

        let response = server
            .post("/api/dispatch/preview")
            .json(&json!({ "latitude": 999.0, "longitude": 0.0, "vehicleType": "voiture" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], json!("GPS coordinates invalid"));
    }

    #[tokio::test]
    async fn test_preview_rejects_missing_coordinates() {
        let server = server_with(Arc::new(InMemoryProviderDirectory::new(Vec::new())));

        let response = server
            .post("/api/dispatch/preview")
            .json(&json!({ "latitude": 6.37, "vehicleType": "moto" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_rejects_out_of_range_fanout() {
        let server = server_with(Arc::new(InMemoryProviderDirectory::new(Vec::new())));

        let response = server
            .post("/api/dispatch/preview")
            .json(&json!({
                "latitude": 6.37,
                "longitude": 2.39,
                "vehicleType": "voiture",
                "maxFanout": 0
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_degrades_when_directory_down() {
        let server = server_with(Arc::new(FailingDirectory));

        let response = server
            .post("/api/dispatch/preview")
            .json(&json!({ "latitude": 6.37, "longitude": 2.39, "vehicleType": "voiture" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["matches"], json!([]));
    }
}
