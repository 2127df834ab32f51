use thiserror::Error;

/// Errors surfaced by the route search engine. Liquidity failures on single
/// hops are handled locally by pruning and never reach the caller; an empty
/// result list means "searched but found nothing" and is not an error.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Search cancelled")]
    Cancelled,
}
