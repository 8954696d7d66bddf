//! Veduta Portal Shell
//!
//! Session-scoped navigation content for the Veduta web portal. The shell
//! merges UI objects from the configuration repository with the public
//! views plugins contribute, filtered through per-object view rights.
//! Results are published as immutable snapshots.

pub mod nav;
pub mod registry;
pub mod repository;
pub mod rights;
pub mod session;
pub mod ui_object;

pub use nav::{NavContent, NavItem, NavSnapshot};
pub use registry::{PluginRegistry, SpecRegistry};
pub use repository::{MemoryRepository, UiObjectRepository};
pub use rights::{GrantedViews, RightsResolver};
pub use session::UserContext;
pub use ui_object::UiObjectProps;

// Re-export the plugin SDK surface.
pub use veduta_sdk::{
    ManifestError, Plugin, StaticPlugin, UiObjectId, UiType, UiTypeMask, ViewSpec,
};
