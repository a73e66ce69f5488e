use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::requests::dtos::{
    AcceptRequestDto, CancelRequestDto, CompleteRequestDto, CreateRequestDto, ProviderOfferDto,
    RequestDetailDto, RequestListParams, RequestResponseDto, StartRequestDto,
};
use crate::features::requests::services::RequestService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Submit a breakdown request
///
/// Stores the request, notifies the nearest available providers and returns
/// the reference number with the providers that were contacted. An empty
/// `matches` list is not an error: the request stays pending and is retried.
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequestDto,
    responses(
        (status = 201, description = "Request created", body = ApiResponse<RequestDetailDto>),
        (status = 400, description = "Validation error or invalid coordinates")
    ),
    tag = "requests"
)]
pub async fn create_request(
    State(service): State<Arc<RequestService>>,
    ValidatedJson(dto): ValidatedJson<CreateRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<RequestDetailDto>>)> {
    let detail = service.create(dto).await?;
    let message = if detail.matches.is_empty() {
        "Aucun dépanneur disponible pour le moment, nous réessayons".to_string()
    } else {
        format!("{} dépanneur(s) notifié(s)", detail.matches.len())
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(detail), Some(message), None)),
    ))
}

/// List a requester's breakdown requests
#[utoipa::path(
    get,
    path = "/api/requests",
    params(RequestListParams),
    responses(
        (status = 200, description = "Requests, newest first", body = ApiResponse<Vec<RequestResponseDto>>),
        (status = 400, description = "Missing phone number")
    ),
    tag = "requests"
)]
pub async fn list_requests(
    State(service): State<Arc<RequestService>>,
    Query(params): Query<RequestListParams>,
) -> Result<Json<ApiResponse<Vec<RequestResponseDto>>>> {
    let phone = params.client_phone.trim();
    if phone.is_empty() {
        return Err(AppError::BadRequest(
            "client_phone must not be empty".to_string(),
        ));
    }

    let pagination = params.pagination();
    let (requests, total) = service.list_by_client(phone, &pagination).await?;

    Ok(Json(ApiResponse::success(
        Some(requests),
        None,
        Some(Meta::for_page(total, &pagination)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request with its matches", body = ApiResponse<RequestDetailDto>),
        (status = 404, description = "Request not found")
    ),
    tag = "requests"
)]
pub async fn get_request(
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RequestDetailDto>>> {
    let detail = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/requests/ref/{reference}",
    params(("reference" = String, Path, description = "Reference number, e.g. DEP-2026-0000042")),
    responses(
        (status = 200, description = "Request with its matches", body = ApiResponse<RequestDetailDto>),
        (status = 400, description = "Malformed reference number"),
        (status = 404, description = "Request not found")
    ),
    tag = "requests"
)]
pub async fn get_request_by_reference(
    State(service): State<Arc<RequestService>>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<RequestDetailDto>>> {
    let detail = service.get_by_reference(&reference).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Accept a request as one of the notified providers
///
/// Only the first provider to accept gets the job; later attempts receive 409.
#[utoipa::path(
    post,
    path = "/api/requests/{id}/accept",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = AcceptRequestDto,
    responses(
        (status = 200, description = "Request assigned to the provider", body = ApiResponse<RequestResponseDto>),
        (status = 400, description = "Provider was not offered this request"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already taken or provider busy")
    ),
    tag = "requests"
)]
pub async fn accept_request(
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<AcceptRequestDto>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = service.accept(id, dto.provider_id).await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/start",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = StartRequestDto,
    responses(
        (status = 200, description = "Intervention started", body = ApiResponse<RequestResponseDto>),
        (status = 400, description = "Provider is not assigned to this request"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is not accepted")
    ),
    tag = "requests"
)]
pub async fn start_request(
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<StartRequestDto>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = service.start(id, dto.provider_id).await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/complete",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = CompleteRequestDto,
    responses(
        (status = 200, description = "Intervention completed", body = ApiResponse<RequestResponseDto>),
        (status = 400, description = "Validation error or provider not assigned"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Intervention has not started")
    ),
    tag = "requests"
)]
pub async fn complete_request(
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CompleteRequestDto>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = service
        .complete(id, dto.provider_id, dto.amount, dto.notes)
        .await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/cancel",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = CancelRequestDto,
    responses(
        (status = 200, description = "Request cancelled", body = ApiResponse<RequestResponseDto>),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Intervention already started or finished")
    ),
    tag = "requests"
)]
pub async fn cancel_request(
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CancelRequestDto>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = service.cancel(id, dto.reason).await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

/// Run another matching round for a pending request
#[utoipa::path(
    post,
    path = "/api/requests/{id}/redispatch",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request with all matches so far", body = ApiResponse<RequestDetailDto>),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is no longer pending")
    ),
    tag = "requests"
)]
pub async fn redispatch_request(
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RequestDetailDto>>> {
    let detail = service.redispatch(id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Pending requests offered to a provider
#[utoipa::path(
    get,
    path = "/api/providers/{id}/offers",
    params(
        ("id" = Uuid, Path, description = "Provider ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Open offers, nearest first", body = ApiResponse<Vec<ProviderOfferDto>>)
    ),
    tag = "providers"
)]
pub async fn list_provider_offers(
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProviderOfferDto>>>> {
    let offers = service.list_offers(id, &pagination).await?;
    Ok(Json(ApiResponse::success(Some(offers), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DispatchConfig;
    use crate::features::dispatch::{DispatchPolicy, DispatchResolver};
    use crate::features::requests::routes;
    use crate::shared::test_helpers::{fake_phone, lazy_pool, InMemoryProviderDirectory, RecordingNotifier};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    // Backed by a pool that never connects; only rejections ahead of storage are exercised.
    fn server() -> TestServer {
        let resolver = Arc::new(DispatchResolver::new(
            Arc::new(InMemoryProviderDirectory::new(Vec::new())),
            DispatchPolicy::default(),
        ));
        let service = Arc::new(RequestService::new(
            lazy_pool(),
            resolver,
            Arc::new(RecordingNotifier::default()),
            Arc::new(DispatchConfig::default()),
        ));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn body(latitude: Value, longitude: Value) -> Value {
        json!({
            "clientName": "Koffi",
            "clientPhone": fake_phone(),
            "vehicleType": "voiture",
            "latitude": latitude,
            "longitude": longitude
        })
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_gps() {
        let response = server()
            .post("/api/requests")
            .json(&body(json!(999.0), json!(2.39)))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "GPS coordinates invalid");
    }

    #[tokio::test]
    async fn test_create_rejects_missing_gps() {
        let response = server()
            .post("/api/requests")
            .json(&body(Value::Null, Value::Null))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_radius_above_ceiling() {
        let mut payload = body(json!(6.37), json!(2.39));
        payload["radiusKm"] = json!(5000.0);

        let response = server().post("/api/requests").json(&payload).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_requires_phone() {
        let response = server().get("/api/requests?client_phone=%20").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_reference_rejected() {
        let response = server().get("/api/requests/ref/TKT-1").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .is_some_and(|m| m.contains("Invalid reference number")));
    }

    #[tokio::test]
    async fn test_complete_rejects_long_notes() {
        let response = server()
            .post(&format!("/api/requests/{}/complete", Uuid::new_v4()))
            .json(&json!({
                "providerId": Uuid::new_v4(),
                "amount": "15000",
                "notes": "x".repeat(2001)
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_complete_rejects_negative_amount() {
        let response = server()
            .post(&format!("/api/requests/{}/complete", Uuid::new_v4()))
            .json(&json!({ "providerId": Uuid::new_v4(), "amount": "-1" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
