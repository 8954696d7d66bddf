//! Plugin contribution surface.
//!
//! A plugin is a statically registered extension module that may expose
//! report and data window views. Views flagged `for_everyone` become
//! public navigation entries for every session, without a rights check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{UiType, ViewSpec};

/// A registered extension module contributing views to the portal.
///
/// Both contribution methods default to empty: a plugin only overrides
/// the side it actually populates.
pub trait Plugin: Send + Sync {
    /// Machine name, used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Report views contributed by this plugin.
    fn report_specs(&self) -> Vec<ViewSpec> {
        Vec::new()
    }

    /// Data window views contributed by this plugin.
    fn data_window_specs(&self) -> Vec<ViewSpec> {
        Vec::new()
    }
}

/// Errors raised while reading a declarative view manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest JSON could not be parsed.
    #[error("plugin '{plugin}': invalid view manifest: {details}")]
    InvalidManifest { plugin: String, details: String },

    /// A view is listed in one section but declares the other kind.
    #[error("plugin '{plugin}': view '{name}' is listed under '{section}' but declares kind '{declared}'")]
    WrongKind {
        plugin: String,
        name: String,
        section: UiType,
        declared: UiType,
    },
}

/// A plugin whose contributions are fixed data.
///
/// Hosts typically build one from a declarative JSON manifest:
///
/// ```
/// use veduta_sdk::{Plugin, StaticPlugin};
///
/// let plugin = StaticPlugin::from_json(
///     "overview",
///     r#"{"data_windows": [
///         {"kind": "data_window", "type_code": "dw_main",
///          "name": "Overview", "url": "/dw/overview", "for_everyone": true}
///     ]}"#,
/// )
/// .unwrap();
///
/// assert_eq!(plugin.name(), "overview");
/// assert_eq!(plugin.data_window_specs().len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPlugin {
    /// Machine name; overwritten by [`StaticPlugin::from_json`].
    #[serde(default)]
    pub name: String,
    /// Report view contributions.
    #[serde(default)]
    pub reports: Vec<ViewSpec>,
    /// Data window view contributions.
    #[serde(default)]
    pub data_windows: Vec<ViewSpec>,
}

impl StaticPlugin {
    /// Empty plugin with the given machine name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reports: Vec::new(),
            data_windows: Vec::new(),
        }
    }

    /// Add a report view.
    pub fn with_report(mut self, spec: ViewSpec) -> Self {
        self.reports.push(spec);
        self
    }

    /// Add a data window view.
    pub fn with_data_window(mut self, spec: ViewSpec) -> Self {
        self.data_windows.push(spec);
        self
    }

    /// Parse a declarative view manifest.
    ///
    /// The manifest is a JSON object with optional `reports` and
    /// `data_windows` arrays of view specs. Each spec must declare the
    /// kind matching its section; the plugin name always comes from the
    /// caller, not the manifest.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, ManifestError> {
        let name = name.into();
        let mut plugin: StaticPlugin =
            serde_json::from_str(json).map_err(|e| ManifestError::InvalidManifest {
                plugin: name.clone(),
                details: e.to_string(),
            })?;
        plugin.name = name;

        for (section, specs) in [
            (UiType::Report, &plugin.reports),
            (UiType::DataWindow, &plugin.data_windows),
        ] {
            if let Some(spec) = specs.iter().find(|s| s.kind != section) {
                return Err(ManifestError::WrongKind {
                    plugin: plugin.name.clone(),
                    name: spec.name.clone(),
                    section,
                    declared: spec.kind,
                });
            }
        }

        Ok(plugin)
    }
}

impl Plugin for StaticPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn report_specs(&self) -> Vec<ViewSpec> {
        self.reports.clone()
    }

    fn data_window_specs(&self) -> Vec<ViewSpec> {
        self.data_windows.clone()
    }
}
