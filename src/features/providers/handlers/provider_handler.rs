use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::dispatch::Location;
use crate::features::providers::dtos::{
    ProviderResponseDto, RegisterProviderDto, UpdateAvailabilityDto, UpdateLocationDto,
};
use crate::features::providers::models::CreateProvider;
use crate::features::providers::services::ProviderService;
use crate::shared::types::ApiResponse;

/// Register a new provider
///
/// The account is created inactive and offline; it receives no requests
/// until an operator approves it.
#[utoipa::path(
    post,
    path = "/api/providers",
    request_body = RegisterProviderDto,
    responses(
        (status = 201, description = "Provider registered", body = ApiResponse<ProviderResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Phone number already registered")
    ),
    tag = "providers"
)]
pub async fn register_provider(
    State(service): State<Arc<ProviderService>>,
    ValidatedJson(dto): ValidatedJson<RegisterProviderDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProviderResponseDto>>)> {
    let provider = service
        .register(CreateProvider {
            name: dto.name,
            phone: dto.phone,
            capability: dto.capability,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(provider),
            Some("Inscription reçue, en attente de validation".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}",
    params(("id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider details", body = ApiResponse<ProviderResponseDto>),
        (status = 404, description = "Provider not found")
    ),
    tag = "providers"
)]
pub async fn get_provider(
    State(service): State<Arc<ProviderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProviderResponseDto>>> {
    let provider = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(provider), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/providers/{id}/approve",
    params(("id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider approved", body = ApiResponse<ProviderResponseDto>),
        (status = 404, description = "Provider not found")
    ),
    tag = "providers"
)]
pub async fn approve_provider(
    State(service): State<Arc<ProviderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProviderResponseDto>>> {
    let provider = service.approve(id).await?;
    Ok(Json(ApiResponse::success(Some(provider), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/providers/{id}/deactivate",
    params(("id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider deactivated", body = ApiResponse<ProviderResponseDto>),
        (status = 404, description = "Provider not found")
    ),
    tag = "providers"
)]
pub async fn deactivate_provider(
    State(service): State<Arc<ProviderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProviderResponseDto>>> {
    let provider = service.deactivate(id).await?;
    Ok(Json(ApiResponse::success(Some(provider), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/providers/{id}",
    params(("id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider deleted"),
        (status = 404, description = "Provider not found")
    ),
    tag = "providers"
)]
pub async fn delete_provider(
    State(service): State<Arc<ProviderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Report the provider's current GPS position
#[utoipa::path(
    patch,
    path = "/api/providers/{id}/location",
    params(("id" = Uuid, Path, description = "Provider ID")),
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<ProviderResponseDto>),
        (status = 400, description = "Invalid coordinates"),
        (status = 404, description = "Provider not found")
    ),
    tag = "providers"
)]
pub async fn update_location(
    State(service): State<Arc<ProviderService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateLocationDto>,
) -> Result<Json<ApiResponse<ProviderResponseDto>>> {
    let location = Location::from_parts(dto.latitude, dto.longitude)?;
    let provider = service.update_location(id, location).await?;
    Ok(Json(ApiResponse::success(Some(provider), None, None)))
}

/// Go online or offline
#[utoipa::path(
    patch,
    path = "/api/providers/{id}/availability",
    params(("id" = Uuid, Path, description = "Provider ID")),
    request_body = UpdateAvailabilityDto,
    responses(
        (status = 200, description = "Availability updated", body = ApiResponse<ProviderResponseDto>),
        (status = 400, description = "Availability cannot be set by hand"),
        (status = 404, description = "Provider not found"),
        (status = 409, description = "Provider is busy on an intervention")
    ),
    tag = "providers"
)]
pub async fn update_availability(
    State(service): State<Arc<ProviderService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateAvailabilityDto>,
) -> Result<Json<ApiResponse<ProviderResponseDto>>> {
    let provider = service.update_availability(id, dto.availability).await?;
    Ok(Json(ApiResponse::success(Some(provider), None, None)))
}
