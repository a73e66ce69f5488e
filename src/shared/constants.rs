/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Prefix of breakdown request reference numbers (DEP-YYYY-NNNNNNN)
pub const REQUEST_REFERENCE_PREFIX: &str = "DEP";

// =============================================================================
// NOTIFICATION MESSAGES
// =============================================================================

/// Sent to every matched provider
pub const MSG_NEW_REQUEST_AVAILABLE: &str = "Nouvelle demande de dépannage disponible près de vous";

/// Sent to the requester once the request is stored
pub const MSG_REQUEST_RECEIVED: &str = "Demande reçue, recherche d'un dépanneur en cours";

/// Sent to the requester when a provider accepts
pub const MSG_REQUEST_ACCEPTED: &str = "Un dépanneur a accepté votre demande";

/// Sent to the requester when the intervention is finished
pub const MSG_INTERVENTION_COMPLETED: &str = "Intervention terminée";

/// Sent to the assigned provider when the requester cancels
pub const MSG_REQUEST_CANCELLED: &str = "La demande a été annulée par le client";
