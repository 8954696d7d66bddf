//! Registries for view specs and plugin instances.
//!
//! Two lookup structures feed navigation aggregation:
//!
//! - [`SpecRegistry`] maps a type code to the [`ViewSpec`] describing how
//!   objects of that type are titled and linked.
//! - [`PluginRegistry`] holds the installed [`Plugin`] instances whose
//!   public views are merged in alongside repository content.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use veduta_sdk::{Plugin, StaticPlugin, ViewSpec};

/// View specs keyed by type code.
///
/// Registration is last-wins: a spec registered under an already-taken
/// type code replaces the earlier one, with a warning.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    specs: HashMap<String, Arc<ViewSpec>>,
}

impl SpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec under its own type code.
    pub fn register(&mut self, spec: ViewSpec) {
        let code = spec.type_code.clone();
        if self.specs.insert(code.clone(), Arc::new(spec)).is_some() {
            warn!(type_code = %code, "replacing previously registered view spec");
        }
    }

    /// Look up the spec for a type code.
    pub fn get(&self, type_code: &str) -> Option<&Arc<ViewSpec>> {
        self.specs.get(type_code)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl FromIterator<ViewSpec> for SpecRegistry {
    fn from_iter<I: IntoIterator<Item = ViewSpec>>(iter: I) -> Self {
        let mut registry = Self::new();
        for spec in iter {
            registry.register(spec);
        }
        registry
    }
}

/// Installed plugins, in registration order.
///
/// Navigation aggregation walks plugins in this order, so registration
/// order decides arrival order for equal display texts.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin after the ones already registered.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Plugins in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Plugin>> {
        self.plugins.iter()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Build a registry from `(plugin name, manifest JSON)` pairs.
    ///
    /// A manifest that fails to parse or declares views under the wrong
    /// section is logged and skipped; the remaining plugins still load.
    pub fn from_manifests<'a, I>(manifests: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut registry = Self::new();
        for (name, json) in manifests {
            match StaticPlugin::from_json(name, json) {
                Ok(plugin) => registry.register(Arc::new(plugin)),
                Err(e) => {
                    warn!(plugin = %name, error = %e, "skipping invalid view manifest");
                }
            }
        }
        registry
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("PluginRegistry")
            .field("plugins", &names)
            .finish()
    }
}
