use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::notifications::dtos::{NotificationQueryParams, NotificationResponseDto};
use crate::features::notifications::services::NotificationService;
use crate::shared::types::{ApiResponse, Meta};

/// List notifications sent to a provider or a client
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationQueryParams),
    responses(
        (status = 200, description = "Notifications, newest first", body = ApiResponse<Vec<NotificationResponseDto>>),
        (status = 400, description = "Missing recipient")
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(service): State<Arc<NotificationService>>,
    Query(params): Query<NotificationQueryParams>,
) -> Result<Json<ApiResponse<Vec<NotificationResponseDto>>>> {
    let recipient = params.recipient.trim();
    if recipient.is_empty() {
        return Err(AppError::BadRequest("recipient must not be empty".to_string()));
    }

    let pagination = params.pagination();
    let (records, total) = service
        .list_for_recipient(params.recipient_kind, recipient, &pagination)
        .await?;
    let dtos: Vec<NotificationResponseDto> = records.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::for_page(total, &pagination)),
    )))
}
