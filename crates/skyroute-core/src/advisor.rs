//! Route advisor: turns external safety verdicts into an exclusion set.
//!
//! The advisor sits between an external risk classifier and the path engine.
//! For a given departure it estimates when the flight would reach every
//! other city, asks the classifier about each one, and routes around the
//! cities that come back unsafe.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::engine::{find_route, RoutingDecision};
use crate::error::{ClassifierUnavailable, RouteError};
use crate::graph::Graph;

/// Static travel-duration lookup between cities, in minutes.
///
/// Backed by the same matrix the graph is built from; symmetric or not as
/// supplied by the data owner.
pub trait TravelDurations {
    fn minutes(&self, origin: &str, destination: &str) -> Option<u32>;
}

/// External risk classifier scoring a city at an estimated arrival time.
pub trait SafetyClassifier {
    /// Returns `Ok(true)` when the city is unsafe at `at`.
    ///
    /// An `Err` means the classifier could not be evaluated (missing data,
    /// backing service down); the advisor then assumes the city is safe.
    fn classify_unsafe(
        &self,
        city: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, ClassifierUnavailable>;
}

/// Advisory to hold departure because the start city itself is unsafe.
///
/// Recorded on the plan only; it never blocks routing and never puts the
/// start city into the exclusion set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeoffAdvisory {
    pub city: String,
    pub at: DateTime<Utc>,
}

/// A routing decision plus pre-departure advisories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    pub decision: RoutingDecision,
    /// Present when the start city is unsafe at departure time.
    pub advisory: Option<TakeoffAdvisory>,
    /// Cities the classifier could not score; treated as safe.
    pub unclassified: Vec<String>,
}

/// Plan a route for a departure, excluding cities classified unsafe.
///
/// Every city other than `start` and `end` is checked at its estimated
/// arrival time (`departure` plus the travel duration from `start`). The
/// destination is never excluded; the start city is checked at `departure`
/// and, if unsafe, produces a [`TakeoffAdvisory`]. Classifier failures
/// degrade to "assume safe" and are logged rather than propagated.
pub fn plan_route(
    graph: &Graph,
    start: &str,
    end: &str,
    departure: DateTime<Utc>,
    durations: &impl TravelDurations,
    classifier: &impl SafetyClassifier,
) -> Result<RoutePlan, RouteError> {
    // Unknown endpoints fail before any classifier traffic.
    if graph.node(start).is_none() {
        return Err(RouteError::NodeNotFound(start.to_string()));
    }
    if graph.node(end).is_none() {
        return Err(RouteError::NodeNotFound(end.to_string()));
    }

    let mut excluded: HashSet<String> = HashSet::new();
    let mut unclassified: Vec<String> = Vec::new();

    let advisory = match classifier.classify_unsafe(start, departure) {
        Ok(true) => {
            tracing::warn!(city = start, "start city unsafe at departure, delay takeoff");
            Some(TakeoffAdvisory {
                city: start.to_string(),
                at: departure,
            })
        }
        Ok(false) => None,
        Err(err) => {
            tracing::warn!(city = start, error = %err, "treating start city as safe");
            unclassified.push(start.to_string());
            None
        }
    };

    for city in graph.names() {
        if city == start || city == end {
            continue;
        }
        let Some(minutes) = durations.minutes(start, city) else {
            tracing::warn!(city, "no travel duration from start, treating as safe");
            unclassified.push(city.to_string());
            continue;
        };
        let arrival = departure + Duration::minutes(i64::from(minutes));
        match classifier.classify_unsafe(city, arrival) {
            Ok(true) => {
                excluded.insert(city.to_string());
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(city, error = %err, "treating city as safe");
                unclassified.push(city.to_string());
            }
        }
    }

    let decision = find_route(graph, start, end, &excluded)?;
    Ok(RoutePlan {
        decision,
        advisory,
        unclassified,
    })
}
