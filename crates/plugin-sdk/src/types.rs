//! Core vocabulary for navigable views.
//!
//! A configured UI object is classified as a report or a data window and
//! carries a type code selecting the [`ViewSpec`] that knows how to
//! present objects of that type: fallback display name, URL construction,
//! and public visibility.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Numeric id of a configured UI object.
pub type UiObjectId = i32;

/// Classification of a UI object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiType {
    /// A generated report document.
    Report,
    /// A live data window.
    DataWindow,
}

impl UiType {
    /// The mask bit selecting this type in repository queries.
    pub fn mask(self) -> UiTypeMask {
        match self {
            UiType::Report => UiTypeMask::REPORT,
            UiType::DataWindow => UiTypeMask::DATA_WINDOW,
        }
    }
}

impl fmt::Display for UiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiType::Report => write!(f, "report"),
            UiType::DataWindow => write!(f, "data_window"),
        }
    }
}

bitflags! {
    /// Query mask selecting which UI object types to list.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UiTypeMask: u8 {
        /// Report entries.
        const REPORT = 0b01;
        /// Data window entries.
        const DATA_WINDOW = 0b10;
    }
}

impl UiTypeMask {
    /// Both base UI types.
    pub const ALL: Self = Self::REPORT.union(Self::DATA_WINDOW);
}

/// Display specification for one view type.
///
/// Registered under its `type_code`, a spec supplies the display name
/// used when a configured object has no title of its own, builds
/// per-object URLs, and may offer the view to everyone as a public
/// navigation entry. The `kind` discriminant ties a spec to one side of
/// the report / data window split; a spec of the wrong kind for a record
/// is treated as if no spec were registered at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Which list this spec feeds.
    pub kind: UiType,
    /// Key under which spec registries store this spec.
    pub type_code: String,
    /// Display name, also the fallback text for untitled objects.
    pub name: String,
    /// Standalone entry URL, used when the spec itself appears as a
    /// public navigation item.
    #[serde(default)]
    pub url: Option<String>,
    /// Per-object URL pattern; `{id}` is replaced by the object id.
    #[serde(default)]
    pub url_template: Option<String>,
    /// Public views bypass the per-object rights check.
    #[serde(default)]
    pub for_everyone: bool,
}

impl ViewSpec {
    /// Create a spec with only the identifying fields set.
    pub fn new(kind: UiType, type_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            type_code: type_code.into(),
            name: name.into(),
            url: None,
            url_template: None,
            for_everyone: false,
        }
    }

    /// Set the standalone entry URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the per-object URL pattern.
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = Some(template.into());
        self
    }

    /// Offer the view to everyone, bypassing rights checks.
    pub fn public(mut self) -> Self {
        self.for_everyone = true;
        self
    }

    /// URL for a specific object, if a URL pattern is configured.
    pub fn url_for(&self, object_id: UiObjectId) -> Option<String> {
        self.url_template
            .as_ref()
            .map(|template| template.replace("{id}", &object_id.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn mask_bits_match_types() {
        assert_eq!(UiType::Report.mask(), UiTypeMask::REPORT);
        assert_eq!(UiType::DataWindow.mask(), UiTypeMask::DATA_WINDOW);
        assert!(UiTypeMask::ALL.contains(UiTypeMask::REPORT));
        assert!(UiTypeMask::ALL.contains(UiTypeMask::DATA_WINDOW));
        assert!(!UiTypeMask::REPORT.contains(UiTypeMask::DATA_WINDOW));
    }

    #[test]
    fn ui_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&UiType::DataWindow).unwrap(),
            "\"data_window\""
        );
        let parsed: UiType = serde_json::from_str("\"report\"").unwrap();
        assert_eq!(parsed, UiType::Report);
    }

    #[test]
    fn url_for_substitutes_object_id() {
        let spec = ViewSpec::new(UiType::Report, "rep", "Report")
            .with_url_template("/reports/{id}");
        assert_eq!(spec.url_for(5).as_deref(), Some("/reports/5"));
        assert_eq!(spec.url_for(-3).as_deref(), Some("/reports/-3"));
    }

    #[test]
    fn url_for_without_template_is_none() {
        let spec = ViewSpec::new(UiType::Report, "rep", "Report");
        assert!(spec.url_for(5).is_none());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let spec = ViewSpec::new(UiType::DataWindow, "dw", "Overview")
            .with_url("/dw/overview")
            .public();
        assert_eq!(spec.url.as_deref(), Some("/dw/overview"));
        assert!(spec.for_everyone);
        assert!(spec.url_template.is_none());
    }

    #[test]
    fn spec_parses_from_manifest_json() {
        let json = r#"{
            "kind": "data_window",
            "type_code": "dw_main",
            "name": "Main Overview",
            "url": "/dw/main",
            "for_everyone": true
        }"#;
        let spec: ViewSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.kind, UiType::DataWindow);
        assert_eq!(spec.type_code, "dw_main");
        assert!(spec.for_everyone);
        assert!(spec.url_template.is_none());
    }
}
