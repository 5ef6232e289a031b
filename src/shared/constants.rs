/// Error message returned to clients when a failure has no public description
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch active categories";

/// Header carrying the per-request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";
