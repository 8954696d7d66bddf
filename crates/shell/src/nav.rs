//! Access-filtered navigation content for a user session.
//!
//! [`NavContent`] maintains an immutable [`NavSnapshot`] holding two
//! ordered lists, report items and data window items, merged from:
//!
//! - UI objects configured in the repository, each filtered through the
//!   session's [`RightsResolver`](crate::rights::RightsResolver) and
//!   decorated from the matching [`SpecRegistry`](crate::registry::SpecRegistry)
//!   entry
//! - public views contributed by installed plugins, which bypass rights
//!
//! Rebuilds never propagate errors. A failure mid-merge is logged and the
//! items collected so far replace the current snapshot, with the later
//! merge stages and the final sort left undone.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, warn};

use veduta_sdk::{UiObjectId, UiType, UiTypeMask, ViewSpec};

use crate::repository::UiObjectRepository;
use crate::session::UserContext;
use crate::ui_object::UiObjectProps;

/// One entry in a navigation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    /// Id of the backing UI object; `None` for plugin-contributed items.
    pub object_id: Option<UiObjectId>,
    /// Display text the lists are ordered by.
    pub text: String,
    /// Link target, when a matching spec provides one.
    pub url: Option<String>,
    /// The spec that decorated this item, when one matched.
    #[serde(skip)]
    pub spec: Option<Arc<ViewSpec>>,
}

/// An immutable pair of navigation lists and the time they were built.
///
/// Cloning is cheap; the item lists are shared, not copied.
#[derive(Debug, Clone)]
pub struct NavSnapshot {
    report_items: Arc<[NavItem]>,
    data_window_items: Arc<[NavItem]>,
    built_at: DateTime<Utc>,
}

impl NavSnapshot {
    /// A snapshot with both lists empty.
    pub fn empty() -> Self {
        Self {
            report_items: Vec::new().into(),
            data_window_items: Vec::new().into(),
            built_at: Utc::now(),
        }
    }

    /// Report items available to the user, ordered by display text.
    pub fn report_items(&self) -> &[NavItem] {
        &self.report_items
    }

    /// Data window items available to the user, ordered by display text.
    pub fn data_window_items(&self) -> &[NavItem] {
        &self.data_window_items
    }

    /// When this snapshot was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn is_empty(&self) -> bool {
        self.report_items.is_empty() && self.data_window_items.is_empty()
    }
}

impl Default for NavSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Default)]
struct NavContentInner {
    current: RwLock<NavSnapshot>,
}

/// Navigation content accessible to a user.
///
/// A cheap-to-clone handle over the current [`NavSnapshot`]. Readers
/// always observe a complete snapshot; [`NavContent::init`] builds a
/// fresh one off to the side and swaps it in under a short write lock.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use veduta_shell::{
///     GrantedViews, MemoryRepository, NavContent, SpecRegistry, UiObjectProps, UiType,
///     UserContext, ViewSpec,
/// };
///
/// let specs: SpecRegistry = [ViewSpec::new(UiType::Report, "daily", "Daily Report")
///     .with_url_template("/reports/{id}")]
/// .into_iter()
/// .collect();
/// let repository = MemoryRepository::new(vec![UiObjectProps::new(5, "daily", UiType::Report)]);
/// let rights: GrantedViews = [5].into_iter().collect();
/// let user = UserContext::authenticated(Uuid::now_v7(), "operator")
///     .with_rights(Arc::new(rights))
///     .with_view_specs(Arc::new(specs));
///
/// let nav = NavContent::new();
/// nav.init(&user, Some(&repository));
///
/// let reports = nav.report_items();
/// assert_eq!(reports[0].text, "Daily Report");
/// assert_eq!(reports[0].url.as_deref(), Some("/reports/5"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NavContent {
    inner: Arc<NavContentInner>,
}

impl NavContent {
    /// An empty handle; call [`NavContent::init`] to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the navigation lists for `user` and publish the result.
    ///
    /// Always publishes: on failure the items collected before the error
    /// replace the current snapshot, after the error is logged.
    pub fn init(&self, user: &UserContext, repository: Option<&dyn UiObjectRepository>) {
        let (snapshot, failure) = build_snapshot(user, repository);
        match failure {
            Some(e) => {
                error!(user = %user.username, error = %e, "failed to rebuild navigation content");
            }
            None => {
                debug!(
                    user = %user.username,
                    reports = snapshot.report_items.len(),
                    data_windows = snapshot.data_window_items.len(),
                    "navigation content rebuilt"
                );
            }
        }
        *self.inner.current.write() = snapshot;
    }

    /// Report items from the current snapshot.
    pub fn report_items(&self) -> Arc<[NavItem]> {
        self.inner.current.read().report_items.clone()
    }

    /// Data window items from the current snapshot.
    pub fn data_window_items(&self) -> Arc<[NavItem]> {
        self.inner.current.read().data_window_items.clone()
    }

    /// The current snapshot as a whole, for callers that need a
    /// consistent pair of lists.
    pub fn snapshot(&self) -> NavSnapshot {
        self.inner.current.read().clone()
    }
}

/// Navigation lists under construction, split by section.
#[derive(Default)]
struct ListBuilder {
    reports: Vec<NavItem>,
    data_windows: Vec<NavItem>,
}

impl ListBuilder {
    fn push(&mut self, section: UiType, item: NavItem) {
        match section {
            UiType::Report => self.reports.push(item),
            UiType::DataWindow => self.data_windows.push(item),
        };
    }

    fn sort(&mut self) {
        // Stable: equal-text items keep arrival order.
        self.reports.sort_by(|a, b| a.text.cmp(&b.text));
        self.data_windows.sort_by(|a, b| a.text.cmp(&b.text));
    }

    fn freeze(self) -> NavSnapshot {
        NavSnapshot {
            report_items: self.reports.into(),
            data_window_items: self.data_windows.into(),
            built_at: Utc::now(),
        }
    }
}

fn build_snapshot(
    user: &UserContext,
    repository: Option<&dyn UiObjectRepository>,
) -> (NavSnapshot, Option<anyhow::Error>) {
    let mut lists = ListBuilder::default();
    match collect_from_repository(user, repository, &mut lists) {
        Ok(()) => {
            collect_from_plugins(user, &mut lists);
            lists.sort();
            (lists.freeze(), None)
        }
        // Keep what was collected before the failure; plugin content and
        // the sort are skipped, so the partial lists stay in arrival order.
        Err(e) => (lists.freeze(), Some(e)),
    }
}

/// Merge in the UI objects the user is allowed to see.
///
/// Skipped entirely when the session carries no rights resolver or no
/// view specs, or when no repository is available.
fn collect_from_repository(
    user: &UserContext,
    repository: Option<&dyn UiObjectRepository>,
    lists: &mut ListBuilder,
) -> Result<()> {
    let (Some(rights), Some(specs)) = (user.rights.as_deref(), user.view_specs.as_deref()) else {
        return Ok(());
    };
    let Some(repository) = repository else {
        return Ok(());
    };

    let records = repository
        .list_ui_objects(UiTypeMask::ALL)
        .context("failed to list ui objects")?;

    for record in records {
        let UiObjectProps {
            id,
            type_code,
            title,
            ui_type,
        } = record;

        let allowed = rights
            .can_view(user.user_id, id)
            .with_context(|| format!("rights check failed for ui object {id}"))?;
        if !allowed {
            continue;
        }

        // A spec of the other kind is treated as no spec at all.
        let spec = specs.get(&type_code).filter(|s| s.kind == ui_type);
        let text = if title.is_empty() {
            spec.map(|s| s.name.clone()).unwrap_or_default()
        } else {
            title
        };

        lists.push(
            ui_type,
            NavItem {
                object_id: Some(id),
                text,
                url: spec.and_then(|s| s.url_for(id)),
                spec: spec.cloned(),
            },
        );
    }

    Ok(())
}

/// Merge in the public views contributed by installed plugins.
///
/// Rights are not consulted; `for_everyone` views show for any user,
/// anonymous included.
fn collect_from_plugins(user: &UserContext, lists: &mut ListBuilder) {
    let Some(plugins) = user.plugins.as_deref() else {
        return;
    };
    for plugin in plugins.iter() {
        append_public_specs(plugin.name(), UiType::Report, plugin.report_specs(), lists);
        append_public_specs(
            plugin.name(),
            UiType::DataWindow,
            plugin.data_window_specs(),
            lists,
        );
    }
}

fn append_public_specs(
    plugin: &str,
    section: UiType,
    specs: Vec<ViewSpec>,
    lists: &mut ListBuilder,
) {
    for spec in specs {
        if !spec.for_everyone {
            continue;
        }
        if spec.kind != section {
            warn!(
                plugin = %plugin,
                view = %spec.name,
                expected = %section,
                declared = %spec.kind,
                "skipping plugin view contributed under the wrong section"
            );
            continue;
        }
        lists.push(
            section,
            NavItem {
                object_id: None,
                text: spec.name.clone(),
                url: spec.url.clone(),
                spec: Some(Arc::new(spec)),
            },
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::SpecRegistry;
    use crate::repository::MemoryRepository;
    use crate::rights::{GrantedViews, RightsResolver};
    use anyhow::bail;
    use uuid::Uuid;

    struct FailingRights {
        fail_on: UiObjectId,
    }

    impl RightsResolver for FailingRights {
        fn can_view(&self, _user_id: Uuid, object_id: UiObjectId) -> Result<bool> {
            if object_id == self.fail_on {
                bail!("rights backend unavailable");
            }
            Ok(true)
        }
    }

    fn all_granted() -> GrantedViews {
        (1..=100).collect()
    }

    #[test]
    fn failure_keeps_partial_lists_in_arrival_order() {
        let user = UserContext::authenticated(Uuid::now_v7(), "tester")
            .with_rights(Arc::new(FailingRights { fail_on: 3 }))
            .with_view_specs(Arc::new(SpecRegistry::new()));
        let repo = MemoryRepository::new(vec![
            UiObjectProps::new(1, "rep", UiType::Report).with_title("B"),
            UiObjectProps::new(2, "rep", UiType::Report).with_title("A"),
            UiObjectProps::new(3, "rep", UiType::Report).with_title("C"),
        ]);

        let (snapshot, failure) = build_snapshot(&user, Some(&repo));
        assert!(failure.is_some());

        // Not sorted: the failure happened before the ordering pass.
        let texts: Vec<_> = snapshot
            .report_items()
            .iter()
            .map(|i| i.text.as_str())
            .collect();
        assert_eq!(texts, vec!["B", "A"]);
    }

    #[test]
    fn record_without_spec_is_still_listed() {
        let user = UserContext::authenticated(Uuid::now_v7(), "tester")
            .with_rights(Arc::new(all_granted()))
            .with_view_specs(Arc::new(SpecRegistry::new()));
        let repo = MemoryRepository::new(vec![
            UiObjectProps::new(7, "unknown", UiType::DataWindow).with_title("Raw"),
        ]);

        let (snapshot, failure) = build_snapshot(&user, Some(&repo));
        assert!(failure.is_none());

        let items = snapshot.data_window_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].object_id, Some(7));
        assert_eq!(items[0].text, "Raw");
        assert!(items[0].url.is_none());
        assert!(items[0].spec.is_none());
    }

    #[test]
    fn spec_of_other_kind_does_not_decorate() {
        let specs: SpecRegistry = [ViewSpec::new(UiType::DataWindow, "x", "Window Spec")
            .with_url_template("/dw/{id}")]
        .into_iter()
        .collect();
        let user = UserContext::authenticated(Uuid::now_v7(), "tester")
            .with_rights(Arc::new(all_granted()))
            .with_view_specs(Arc::new(specs));
        let repo = MemoryRepository::new(vec![UiObjectProps::new(1, "x", UiType::Report)]);

        let (snapshot, failure) = build_snapshot(&user, Some(&repo));
        assert!(failure.is_none());

        // The record is a report, the spec is for data windows: no name
        // fallback, no url.
        let items = snapshot.report_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "");
        assert!(items[0].url.is_none());
        assert!(items[0].spec.is_none());
    }

    #[test]
    fn non_public_and_wrong_section_views_are_skipped() {
        let mut lists = ListBuilder::default();
        append_public_specs(
            "demo",
            UiType::Report,
            vec![
                ViewSpec::new(UiType::Report, "private", "Private"),
                ViewSpec::new(UiType::DataWindow, "dw", "Wrong Section").public(),
                ViewSpec::new(UiType::Report, "rep", "Shown").public(),
            ],
            &mut lists,
        );

        assert_eq!(lists.reports.len(), 1);
        assert_eq!(lists.reports[0].text, "Shown");
        assert!(lists.data_windows.is_empty());
    }

    #[test]
    fn missing_collaborators_produce_an_empty_snapshot() {
        let repo = MemoryRepository::new(vec![
            UiObjectProps::new(1, "rep", UiType::Report).with_title("Hidden"),
        ]);

        // No rights and no specs: the repository merge is skipped even
        // though records exist.
        let (snapshot, failure) = build_snapshot(&UserContext::anonymous(), Some(&repo));
        assert!(failure.is_none());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn serialized_items_omit_the_spec_reference() {
        let decorated = NavItem {
            object_id: Some(5),
            text: "Daily Report".to_owned(),
            url: Some("/reports/5".to_owned()),
            spec: Some(Arc::new(
                ViewSpec::new(UiType::Report, "rep1", "Daily Report")
                    .with_url_template("/reports/{id}"),
            )),
        };
        assert_eq!(
            serde_json::to_value(&decorated).unwrap(),
            serde_json::json!({
                "object_id": 5,
                "text": "Daily Report",
                "url": "/reports/5",
            })
        );

        // Plugin items carry no object id and may carry no url.
        let contributed = NavItem {
            object_id: None,
            text: "Fleet Overview".to_owned(),
            url: None,
            spec: None,
        };
        assert_eq!(
            serde_json::to_value(&contributed).unwrap(),
            serde_json::json!({
                "object_id": null,
                "text": "Fleet Overview",
                "url": null,
            })
        );
    }
}
