//! Veduta Plugin SDK
//!
//! Types and traits shared between the portal shell and its plugins.
//! Plugins depend on this crate to describe the report and data window
//! views they contribute to user navigation.

pub mod plugin;
pub mod types;

pub use plugin::{ManifestError, Plugin, StaticPlugin};
pub use types::{UiObjectId, UiType, UiTypeMask, ViewSpec};

pub mod prelude {
    pub use crate::plugin::{ManifestError, Plugin, StaticPlugin};
    pub use crate::types::{UiObjectId, UiType, UiTypeMask, ViewSpec};
}
