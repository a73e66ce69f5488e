use utoipa::{Modify, OpenApi};

use crate::features::dispatch::{
    dtos as dispatch_dtos, handlers as dispatch_handlers, models as dispatch_models,
};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
    models as notifications_models,
};
use crate::features::providers::{dtos as providers_dtos, handlers as providers_handlers};
use crate::features::requests::{
    dtos as requests_dtos, handlers as requests_handlers, models as requests_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Dispatch
        dispatch_handlers::preview,
        // Providers
        providers_handlers::register_provider,
        providers_handlers::get_provider,
        providers_handlers::delete_provider,
        providers_handlers::approve_provider,
        providers_handlers::deactivate_provider,
        providers_handlers::update_location,
        providers_handlers::update_availability,
        requests_handlers::list_provider_offers,
        // Requests
        requests_handlers::create_request,
        requests_handlers::list_requests,
        requests_handlers::get_request,
        requests_handlers::get_request_by_reference,
        requests_handlers::accept_request,
        requests_handlers::start_request,
        requests_handlers::complete_request,
        requests_handlers::cancel_request,
        requests_handlers::redispatch_request,
        // Notifications
        notifications_handlers::list_notifications,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Dispatch
            dispatch_models::Location,
            dispatch_models::Capability,
            dispatch_models::Availability,
            dispatch_models::RankedMatch,
            dispatch_dtos::DispatchPreviewDto,
            dispatch_dtos::DispatchPreviewResponseDto,
            ApiResponse<dispatch_dtos::DispatchPreviewResponseDto>,
            // Providers
            providers_dtos::RegisterProviderDto,
            providers_dtos::UpdateLocationDto,
            providers_dtos::UpdateAvailabilityDto,
            providers_dtos::ProviderResponseDto,
            ApiResponse<providers_dtos::ProviderResponseDto>,
            // Requests
            requests_models::RequestStatus,
            requests_dtos::CreateRequestDto,
            requests_dtos::AcceptRequestDto,
            requests_dtos::StartRequestDto,
            requests_dtos::CompleteRequestDto,
            requests_dtos::CancelRequestDto,
            requests_dtos::RequestResponseDto,
            requests_dtos::RequestMatchDto,
            requests_dtos::RequestDetailDto,
            requests_dtos::ProviderOfferDto,
            ApiResponse<requests_dtos::RequestResponseDto>,
            ApiResponse<Vec<requests_dtos::RequestResponseDto>>,
            ApiResponse<requests_dtos::RequestDetailDto>,
            ApiResponse<Vec<requests_dtos::ProviderOfferDto>>,
            // Notifications
            notifications_models::RecipientKind,
            notifications_models::NotificationKind,
            notifications_dtos::NotificationResponseDto,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
        )
    ),
    tags(
        (name = "dispatch", description = "Proximity matching of providers to a breakdown location"),
        (name = "providers", description = "Provider (dépanneur) accounts, position and availability"),
        (name = "requests", description = "Breakdown requests and interventions"),
        (name = "notifications", description = "Outbound notification log"),
    ),
    info(
        title = "Depannage API",
        version = "0.1.0",
        description = "API documentation for the roadside assistance dispatch service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_feature() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/dispatch/preview",
            "/api/providers",
            "/api/providers/{id}/offers",
            "/api/requests",
            "/api/requests/{id}/accept",
            "/api/notifications",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_config() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Dépannage Cotonou".to_string(),
            version: "2.0.0".to_string(),
            description: "staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Dépannage Cotonou");
        assert_eq!(doc.info.version, "2.0.0");
        assert_eq!(doc.info.description.as_deref(), Some("staging"));
    }
}
