//! Error taxonomy for the routing core.
//!
//! "No path exists" is deliberately not an error: it is a normal routing
//! outcome and is represented by absent fields on
//! [`RoutingDecision`](crate::engine::RoutingDecision).

use thiserror::Error;

/// Errors surfaced by graph construction and routing.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Malformed construction input. Fatal, never retried.
    #[error("invalid graph data: {0}")]
    InvalidGraphData(String),

    /// Start or end city is absent from the graph. Fatal to the request.
    #[error("city '{0}' is not in the graph")]
    NodeNotFound(String),

    /// The external safety classifier could not be evaluated.
    ///
    /// [`plan_route`](crate::advisor::plan_route) degrades to "assume safe"
    /// instead of returning this; the variant exists for callers that drive
    /// a classifier directly and want the failure surfaced.
    #[error(transparent)]
    Classifier(#[from] ClassifierUnavailable),
}

/// The external safety classifier could not score a city.
#[derive(Debug, Clone, Error)]
#[error("safety classifier unavailable for '{city}': {reason}")]
pub struct ClassifierUnavailable {
    pub city: String,
    pub reason: String,
}

impl ClassifierUnavailable {
    pub fn new(city: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            reason: reason.into(),
        }
    }
}
