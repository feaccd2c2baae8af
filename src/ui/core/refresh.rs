//! Re-issuing views that depend on the selected row of a primary list.

use super::actions::{Effect, Request};
use crate::helm::{HelmError, Payload, Row};

pub struct RefreshCoordinator;

impl RefreshCoordinator {
    /// One dispatch per dependent view for `selected`. Nothing without a selection.
    ///
    /// The requests are independent; their order carries no meaning.
    pub fn fan_out<D: Copy>(
        dependents: &[D],
        selected: Option<&Row>,
        mut request: impl FnMut(D, &Row) -> Request,
    ) -> Vec<Effect> {
        let Some(row) = selected else {
            return Vec::new();
        };

        dependents
            .iter()
            .map(|dependent| Effect::Dispatch(request(*dependent, row)))
            .collect()
    }

    /// After a mutation: refresh the primary list on success, nothing on failure.
    pub fn after_mutation(result: &Result<Payload, HelmError>, refresh: impl FnOnce() -> Request) -> Vec<Effect> {
        match result {
            Ok(_) => vec![Effect::Dispatch(refresh())],
            Err(_) => Vec::new(),
        }
    }
}
