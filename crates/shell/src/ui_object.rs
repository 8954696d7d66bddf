//! Configuration repository records.

use serde::{Deserialize, Serialize};

use veduta_sdk::{UiObjectId, UiType};

/// Property record of one configured UI object.
///
/// An immutable row snapshot handed out by the configuration repository.
/// The title is what the administrator configured and may be empty; the
/// display fallback then comes from the view spec registered under
/// `type_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiObjectProps {
    /// Numeric id the rights model keys on.
    pub id: UiObjectId,
    /// Key selecting the view spec for this object.
    pub type_code: String,
    /// Configured display title; may be empty.
    #[serde(default)]
    pub title: String,
    /// Report or data window.
    pub ui_type: UiType,
}

impl UiObjectProps {
    /// Record with an empty title.
    pub fn new(id: UiObjectId, type_code: impl Into<String>, ui_type: UiType) -> Self {
        Self {
            id,
            type_code: type_code.into(),
            title: String::new(),
            ui_type,
        }
    }

    /// Set the configured title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
