//! Per-session user context consumed by navigation aggregation.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::registry::{PluginRegistry, SpecRegistry};
use crate::rights::RightsResolver;

/// The user a navigation snapshot is built for, together with the
/// collaborators resolved for their session.
///
/// Every collaborator is optional. A missing rights resolver or spec
/// registry skips the repository merge; a missing plugin registry skips
/// the plugin merge. Aggregation still produces a (possibly empty)
/// snapshot either way.
#[derive(Clone)]
pub struct UserContext {
    /// Stable user id, nil for anonymous sessions.
    pub user_id: Uuid,
    /// Display name used in log events.
    pub username: String,
    /// Whether the user is authenticated.
    pub authenticated: bool,
    /// Per-object view rights for this session, if resolved.
    pub rights: Option<Arc<dyn RightsResolver>>,
    /// View specs keyed by type code, if loaded.
    pub view_specs: Option<Arc<SpecRegistry>>,
    /// Installed plugins contributing public views, if loaded.
    pub plugins: Option<Arc<PluginRegistry>>,
}

impl UserContext {
    /// Create context for an anonymous user with no collaborators.
    pub fn anonymous() -> Self {
        Self {
            user_id: Uuid::nil(),
            username: String::new(),
            authenticated: false,
            rights: None,
            view_specs: None,
            plugins: None,
        }
    }

    /// Create context for an authenticated user.
    pub fn authenticated(user_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            authenticated: true,
            rights: None,
            view_specs: None,
            plugins: None,
        }
    }

    /// Attach the session's rights resolver.
    pub fn with_rights(mut self, rights: Arc<dyn RightsResolver>) -> Self {
        self.rights = Some(rights);
        self
    }

    /// Attach the loaded view specs.
    pub fn with_view_specs(mut self, view_specs: Arc<SpecRegistry>) -> Self {
        self.view_specs = Some(view_specs);
        self
    }

    /// Attach the installed plugins.
    pub fn with_plugins(mut self, plugins: Arc<PluginRegistry>) -> Self {
        self.plugins = Some(plugins);
        self
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Debug for UserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserContext")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("authenticated", &self.authenticated)
            .field("rights", &self.rights.as_ref().map(|_| "<resolver>"))
            .field("view_specs", &self.view_specs)
            .field("plugins", &self.plugins)
            .finish()
    }
}
