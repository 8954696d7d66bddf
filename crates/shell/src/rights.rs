//! View-rights collaborator boundary.

use std::collections::HashSet;

use anyhow::Result;
use uuid::Uuid;

use veduta_sdk::UiObjectId;

/// Per-user, per-object view permission decisions.
///
/// Implementations answer from whatever rights backend the host runs.
/// A failing backend surfaces as `Err`, which the aggregation pipeline
/// absorbs and logs instead of propagating to callers.
pub trait RightsResolver: Send + Sync {
    /// Whether the user may see the given UI object in navigation.
    fn can_view(&self, user_id: Uuid, object_id: UiObjectId) -> Result<bool>;
}

/// Allow-list resolver over a fixed set of granted object ids.
///
/// Built per session, so the user id argument is not consulted. An empty
/// allow-list denies everything.
#[derive(Debug, Clone, Default)]
pub struct GrantedViews {
    granted: HashSet<UiObjectId>,
}

impl GrantedViews {
    /// Empty allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the view right for an object id.
    pub fn grant(&mut self, object_id: UiObjectId) {
        self.granted.insert(object_id);
    }
}

impl FromIterator<UiObjectId> for GrantedViews {
    fn from_iter<I: IntoIterator<Item = UiObjectId>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}

impl RightsResolver for GrantedViews {
    fn can_view(&self, _user_id: Uuid, object_id: UiObjectId) -> Result<bool> {
        Ok(self.granted.contains(&object_id))
    }
}
