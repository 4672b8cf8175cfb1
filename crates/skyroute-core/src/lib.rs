//! Core routing logic for dynamic flight-path re-optimization.
//!
//! Builds an immutable weighted city graph from a travel-time matrix,
//! computes the planned (primary) shortest path, and reroutes around
//! cities declared unsafe for the current departure.

pub mod advisor;
pub mod engine;
pub mod error;
pub mod graph;

pub use advisor::{
    plan_route, RoutePlan, SafetyClassifier, TakeoffAdvisory, TravelDurations,
};
pub use engine::{find_route, RoutePath, RoutingDecision};
pub use error::{ClassifierUnavailable, RouteError};
pub use graph::{Graph, MatrixEntry, NodeId, NodeMask};
