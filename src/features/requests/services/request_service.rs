use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::DispatchConfig;
use crate::core::error::{AppError, Result};
use crate::features::dispatch::{DispatchResolver, Location};
use crate::features::notifications::{fan_out, Notification, NotificationDispatcher, NotificationKind};
use crate::features::requests::dtos::{
    CreateRequestDto, ProviderOfferDto, RequestDetailDto, RequestResponseDto,
};
use crate::features::requests::models::{
    BreakdownRequest, CreateBreakdownRequest, ProviderOffer, RequestMatch, RequestStatus,
};
use crate::shared::constants::{
    MSG_INTERVENTION_COMPLETED, MSG_NEW_REQUEST_AVAILABLE, MSG_REQUEST_ACCEPTED,
    MSG_REQUEST_CANCELLED, MSG_REQUEST_RECEIVED, REQUEST_REFERENCE_PREFIX,
};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::REFERENCE_REGEX;

const REQUEST_COLUMNS: &str = r#"
    id, reference_number, client_name, client_phone, vehicle_type, description, address,
    latitude, longitude, radius_km, max_fanout, status, assigned_provider_id,
    dispatch_attempts, last_dispatched_at, accepted_at, started_at, completed_at,
    cancelled_at, cancel_reason, amount, completion_notes, created_at, updated_at
"#;

const MATCH_COLUMNS: &str =
    "id, request_id, provider_id, distance_km, located, rank, dispatch_round, created_at";

/// Service for breakdown requests and the interventions that follow them
pub struct RequestService {
    pool: PgPool,
    resolver: Arc<DispatchResolver>,
    notifier: Arc<dyn NotificationDispatcher>,
    dispatch_config: Arc<DispatchConfig>,
}

impl RequestService {
    pub fn new(
        pool: PgPool,
        resolver: Arc<DispatchResolver>,
        notifier: Arc<dyn NotificationDispatcher>,
        dispatch_config: Arc<DispatchConfig>,
    ) -> Self {
        Self {
            pool,
            resolver,
            notifier,
            dispatch_config,
        }
    }

    /// Generate a reference number in format: DEP-YYYY-NNNNNNN
    async fn generate_reference_number(&self) -> Result<String> {
        let year = Utc::now().format("%Y").to_string();

        let seq: i64 = sqlx::query_scalar("SELECT nextval('request_reference_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get next sequence value: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(format_reference(year.as_str(), seq))
    }

    /// Store a request, notify the nearest providers and acknowledge the requester
    pub async fn create(&self, dto: CreateRequestDto) -> Result<RequestDetailDto> {
        let location = Location::from_parts(dto.latitude, dto.longitude)?;
        let dispatch = self.dispatch_config.request(
            location,
            dto.vehicle_type,
            dto.radius_km,
            dto.max_fanout,
        )?;

        let data = CreateBreakdownRequest {
            client_name: dto.client_name.trim().to_string(),
            client_phone: dto.client_phone.trim().to_string(),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            address: dto.address.filter(|a| !a.trim().is_empty()),
            dispatch,
        };

        let request = self.insert(data).await?;

        tracing::info!(
            "Breakdown request created: id={}, ref={}, vehicle={}",
            request.id,
            request.reference_number,
            request.vehicle_type
        );

        // The request is stored either way; a failed round is retried by the worker
        let matches = match self.dispatch(&request).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(
                    "Initial dispatch failed for {}, leaving it to the redispatch worker: {:?}",
                    request.reference_number,
                    e
                );
                Vec::new()
            }
        };

        fan_out(
            Arc::clone(&self.notifier),
            vec![Notification::to_client(
                &request.client_phone,
                request.id,
                NotificationKind::RequestReceived,
                MSG_REQUEST_RECEIVED,
                json!({
                    "referenceNumber": request.reference_number,
                    "providersNotified": matches.len(),
                }),
            )],
        );

        Ok(RequestDetailDto {
            request: request.into(),
            matches: matches.into_iter().map(Into::into).collect(),
        })
    }

    async fn insert(&self, data: CreateBreakdownRequest) -> Result<BreakdownRequest> {
        let reference_number = self.generate_reference_number().await?;
        let max_fanout = i32::try_from(data.dispatch.max_fanout).map_err(|_| {
            AppError::Validation(format!("Fan-out {} is too large", data.dispatch.max_fanout))
        })?;

        let request = sqlx::query_as::<_, BreakdownRequest>(&format!(
            r#"
            INSERT INTO breakdown_requests (
                reference_number, client_name, client_phone, vehicle_type, description, address,
                latitude, longitude, radius_km, max_fanout, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending')
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(&reference_number)
        .bind(&data.client_name)
        .bind(&data.client_phone)
        .bind(data.dispatch.capability)
        .bind(&data.description)
        .bind(&data.address)
        .bind(data.dispatch.location.latitude)
        .bind(data.dispatch.location.longitude)
        .bind(data.dispatch.radius_km)
        .bind(max_fanout)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create breakdown request: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(request)
    }

    /// Run one matching round and notify providers not already contacted.
    ///
    /// Directory outages degrade to an empty round; the request stays pending
    /// and the redispatch worker retries it. A request that left `pending`
    /// since it was loaded gets no round at all.
    pub async fn dispatch(&self, request: &BreakdownRequest) -> Result<Vec<RequestMatch>> {
        let ranked = self.resolver.resolve(&request.dispatch_request()).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin dispatch transaction: {:?}", e);
            AppError::Database(e)
        })?;

        // Locks the request row until commit, so a cancel cannot slip in mid-round
        let round: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE breakdown_requests
            SET dispatch_attempts = dispatch_attempts + 1,
                last_dispatched_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING dispatch_attempts
            "#,
        )
        .bind(request.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record dispatch round: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(round) = round else {
            drop(tx);
            tracing::info!(
                "Skipping dispatch for {}: request is no longer pending",
                request.reference_number
            );
            return Ok(Vec::new());
        };

        let mut inserted = Vec::with_capacity(ranked.len());
        for (rank, ranked_match) in (1i32..).zip(ranked.iter()) {
            // A provider is offered a request at most once across rounds
            let row = sqlx::query_as::<_, RequestMatch>(&format!(
                r#"
                INSERT INTO request_matches (
                    request_id, provider_id, distance_km, located, rank, dispatch_round
                ) VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (request_id, provider_id) DO NOTHING
                RETURNING {MATCH_COLUMNS}
                "#
            ))
            .bind(request.id)
            .bind(ranked_match.provider_id)
            .bind(ranked_match.distance_km)
            .bind(ranked_match.located)
            .bind(rank)
            .bind(round)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store request match: {:?}", e);
                AppError::Database(e)
            })?;

            inserted.extend(row);
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit dispatch round: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Dispatch round {} for {}: {} ranked, {} newly notified",
            round,
            request.reference_number,
            ranked.len(),
            inserted.len()
        );

        fan_out(
            Arc::clone(&self.notifier),
            match_notifications(request, &inserted),
        );

        Ok(inserted)
    }

    /// Run another matching round for a request still waiting for a provider
    pub async fn redispatch(&self, id: Uuid) -> Result<RequestDetailDto> {
        let request = self.find(id).await?.ok_or_else(|| not_found(id))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Request {} is {} and can no longer be dispatched",
                request.reference_number, request.status
            )));
        }

        self.dispatch(&request).await?;
        self.get_by_id(id).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<BreakdownRequest>> {
        sqlx::query_as::<_, BreakdownRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM breakdown_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get breakdown request by ID: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn matches_for(&self, request_id: Uuid) -> Result<Vec<RequestMatch>> {
        sqlx::query_as::<_, RequestMatch>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM request_matches
            WHERE request_id = $1
            ORDER BY dispatch_round, rank
            "#
        ))
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list request matches: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn with_matches(&self, request: BreakdownRequest) -> Result<RequestDetailDto> {
        let matches = self.matches_for(request.id).await?;
        Ok(RequestDetailDto {
            request: request.into(),
            matches: matches.into_iter().map(Into::into).collect(),
        })
    }

    /// Get request by ID, with every provider it was sent to
    pub async fn get_by_id(&self, id: Uuid) -> Result<RequestDetailDto> {
        let request = self.find(id).await?.ok_or_else(|| not_found(id))?;
        self.with_matches(request).await
    }

    /// Get request by reference number
    pub async fn get_by_reference(&self, reference: &str) -> Result<RequestDetailDto> {
        let reference = reference.trim().to_uppercase();
        if !REFERENCE_REGEX.is_match(&reference) {
            return Err(AppError::BadRequest(format!(
                "Invalid reference number '{}'",
                reference
            )));
        }

        let request = sqlx::query_as::<_, BreakdownRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM breakdown_requests WHERE reference_number = $1"
        ))
        .bind(&reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get breakdown request by reference: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Request '{}' not found", reference)))?;

        self.with_matches(request).await
    }

    /// A requester's history, newest first
    pub async fn list_by_client(
        &self,
        client_phone: &str,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<RequestResponseDto>, i64)> {
        let requests = sqlx::query_as::<_, BreakdownRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM breakdown_requests
            WHERE client_phone = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(client_phone)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list breakdown requests: {:?}", e);
            AppError::Database(e)
        })?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM breakdown_requests WHERE client_phone = $1")
                .bind(client_phone)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count breakdown requests: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok((requests.into_iter().map(Into::into).collect(), total))
    }

    /// Pending requests a provider was notified about, nearest first
    pub async fn list_offers(
        &self,
        provider_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<Vec<ProviderOfferDto>> {
        let offers = sqlx::query_as::<_, ProviderOffer>(
            r#"
            SELECT
                r.id AS request_id, r.reference_number, r.vehicle_type, r.description,
                r.address, r.latitude, r.longitude, m.distance_km, m.located, r.created_at
            FROM request_matches m
            JOIN breakdown_requests r ON r.id = m.request_id
            WHERE m.provider_id = $1 AND r.status = 'pending'
            ORDER BY m.distance_km, r.created_at
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(provider_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list provider offers: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(offers.into_iter().map(Into::into).collect())
    }

    /// Assign a pending request to a provider that was offered it.
    ///
    /// The assignment only succeeds while the request is still pending, so of
    /// several providers accepting at once exactly one wins; the others get
    /// `Conflict`.
    pub async fn accept(&self, id: Uuid, provider_id: Uuid) -> Result<RequestResponseDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin accept transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let offered: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM request_matches WHERE request_id = $1 AND provider_id = $2)",
        )
        .bind(id)
        .bind(provider_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check request match: {:?}", e);
            AppError::Database(e)
        })?;

        if !offered {
            drop(tx);
            return Err(self.transition_error(id, RequestStatus::Accepted).await.unwrap_or_else(
                || {
                    AppError::BadRequest(format!(
                        "Provider '{}' was not offered request '{}'",
                        provider_id, id
                    ))
                },
            ));
        }

        let provider: Option<(String, String)> = sqlx::query_as(
            r#"
            UPDATE providers
            SET availability = 'busy', updated_at = NOW()
            WHERE id = $1 AND active = TRUE AND deleted_at IS NULL AND availability <> 'busy'
            RETURNING name, phone
            "#,
        )
        .bind(provider_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to reserve provider: {:?}", e);
            AppError::Database(e)
        })?;

        let Some((provider_name, provider_phone)) = provider else {
            return Err(AppError::Conflict(format!(
                "Provider '{}' is not available to take a request",
                provider_id
            )));
        };

        let request = sqlx::query_as::<_, BreakdownRequest>(&format!(
            r#"
            UPDATE breakdown_requests
            SET status = 'accepted', assigned_provider_id = $2,
                accepted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(provider_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to accept breakdown request: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(request) = request else {
            // Dropping the transaction releases the provider again
            drop(tx);
            return Err(self
                .transition_error(id, RequestStatus::Accepted)
                .await
                .unwrap_or_else(|| AppError::Conflict(format!("Request '{}' was already taken", id))));
        };

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit acceptance: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Request {} accepted by provider {}",
            request.reference_number,
            provider_id
        );

        fan_out(
            Arc::clone(&self.notifier),
            vec![Notification::to_client(
                &request.client_phone,
                request.id,
                NotificationKind::RequestAccepted,
                MSG_REQUEST_ACCEPTED,
                json!({
                    "referenceNumber": request.reference_number,
                    "providerName": provider_name,
                    "providerPhone": provider_phone,
                }),
            )],
        );

        Ok(request.into())
    }

    /// The assigned provider is on site and starts working
    pub async fn start(&self, id: Uuid, provider_id: Uuid) -> Result<RequestResponseDto> {
        let request = sqlx::query_as::<_, BreakdownRequest>(&format!(
            r#"
            UPDATE breakdown_requests
            SET status = 'in_progress', started_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'accepted' AND assigned_provider_id = $2
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to start intervention: {:?}", e);
            AppError::Database(e)
        })?;

        match request {
            Some(request) => {
                tracing::info!("Intervention started for {}", request.reference_number);
                Ok(request.into())
            }
            None => Err(self
                .transition_error(id, RequestStatus::InProgress)
                .await
                .unwrap_or_else(|| not_assigned(id, provider_id))),
        }
    }

    /// Close an intervention and put the provider back on the market
    pub async fn complete(
        &self,
        id: Uuid,
        provider_id: Uuid,
        amount: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<RequestResponseDto> {
        if amount.is_some_and(|a| a.is_sign_negative()) {
            return Err(AppError::Validation("Amount must not be negative".to_string()));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin completion transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let request = sqlx::query_as::<_, BreakdownRequest>(&format!(
            r#"
            UPDATE breakdown_requests
            SET status = 'completed', completed_at = NOW(), amount = $3,
                completion_notes = $4, updated_at = NOW()
            WHERE id = $1 AND status = 'in_progress' AND assigned_provider_id = $2
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(provider_id)
        .bind(amount)
        .bind(notes.filter(|n| !n.trim().is_empty()))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to complete intervention: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(request) = request else {
            drop(tx);
            return Err(self
                .transition_error(id, RequestStatus::Completed)
                .await
                .unwrap_or_else(|| not_assigned(id, provider_id)));
        };

        release_provider(&mut tx, provider_id).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit completion: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Intervention completed for {} by provider {}",
            request.reference_number,
            provider_id
        );

        fan_out(
            Arc::clone(&self.notifier),
            vec![Notification::to_client(
                &request.client_phone,
                request.id,
                NotificationKind::InterventionCompleted,
                MSG_INTERVENTION_COMPLETED,
                json!({
                    "referenceNumber": request.reference_number,
                    "amount": request.amount,
                }),
            )],
        );

        Ok(request.into())
    }

    /// Cancel a request that has not started yet
    pub async fn cancel(&self, id: Uuid, reason: Option<String>) -> Result<RequestResponseDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin cancel transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let request = sqlx::query_as::<_, BreakdownRequest>(&format!(
            r#"
            UPDATE breakdown_requests
            SET status = 'cancelled', cancelled_at = NOW(), cancel_reason = $2, updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'accepted')
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(reason.filter(|r| !r.trim().is_empty()))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to cancel breakdown request: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(request) = request else {
            drop(tx);
            return Err(self
                .transition_error(id, RequestStatus::Cancelled)
                .await
                .unwrap_or_else(|| not_found(id)));
        };

        if let Some(provider_id) = request.assigned_provider_id {
            release_provider(&mut tx, provider_id).await?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit cancellation: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Request {} cancelled", request.reference_number);

        if let Some(provider_id) = request.assigned_provider_id {
            fan_out(
                Arc::clone(&self.notifier),
                vec![Notification::to_provider(
                    provider_id,
                    request.id,
                    NotificationKind::RequestCancelled,
                    MSG_REQUEST_CANCELLED,
                    json!({
                        "referenceNumber": request.reference_number,
                        "reason": request.cancel_reason,
                    }),
                )],
            );
        }

        Ok(request.into())
    }

    /// Pending requests that have not reached any provider yet
    pub async fn fetch_unmatched(
        &self,
        max_attempts: i32,
        batch_size: i64,
    ) -> Result<Vec<BreakdownRequest>> {
        sqlx::query_as::<_, BreakdownRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM breakdown_requests r
            WHERE r.status = 'pending'
              AND r.dispatch_attempts < $1
              AND NOT EXISTS (SELECT 1 FROM request_matches m WHERE m.request_id = r.id)
            ORDER BY r.last_dispatched_at NULLS FIRST, r.created_at
            LIMIT $2
            "#
        ))
        .bind(max_attempts)
        .bind(batch_size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch unmatched requests: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Explain why a conditional transition touched no row.
    ///
    /// `None` means the status would have allowed the move, so the caller
    /// reports its own precondition failure.
    async fn transition_error(&self, id: Uuid, target: RequestStatus) -> Option<AppError> {
        match self.find(id).await {
            Err(e) => Some(e),
            Ok(None) => Some(not_found(id)),
            Ok(Some(request)) if !request.status.can_transition_to(target) => {
                Some(AppError::Conflict(format!(
                    "Request {} is {} and cannot become {}",
                    request.reference_number, request.status, target
                )))
            }
            Ok(Some(_)) => None,
        }
    }
}

async fn release_provider(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    provider_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE providers
        SET availability = 'available', updated_at = NOW()
        WHERE id = $1 AND availability = 'busy'
        "#,
    )
    .bind(provider_id)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to release provider: {:?}", e);
        AppError::Database(e)
    })?;

    Ok(())
}

fn format_reference(year: &str, seq: i64) -> String {
    format!("{}-{}-{:07}", REQUEST_REFERENCE_PREFIX, year, seq)
}

/// One "new request" message per newly matched provider
fn match_notifications(request: &BreakdownRequest, matches: &[RequestMatch]) -> Vec<Notification> {
    matches
        .iter()
        .map(|m| {
            Notification::to_provider(
                m.provider_id,
                request.id,
                NotificationKind::NewRequestAvailable,
                MSG_NEW_REQUEST_AVAILABLE,
                json!({
                    "referenceNumber": request.reference_number,
                    "vehicleType": request.vehicle_type,
                    "location": request.location(),
                    "address": request.address,
                    "distanceKm": m.distance_km,
                    "located": m.located,
                }),
            )
        })
        .collect()
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Request '{}' not found", id))
}

fn not_assigned(id: Uuid, provider_id: Uuid) -> AppError {
    AppError::BadRequest(format!(
        "Provider '{}' is not assigned to request '{}'",
        provider_id, id
    ))
}
