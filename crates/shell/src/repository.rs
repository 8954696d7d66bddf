//! Configuration repository boundary for UI objects.

use anyhow::Result;

use veduta_sdk::UiTypeMask;

use crate::ui_object::UiObjectProps;

/// Source of configured UI objects.
///
/// The shell treats the repository as read-only: it lists the records
/// matching a type mask and never writes back. Backends may be a
/// database, a configuration file, or an in-memory table.
pub trait UiObjectRepository: Send + Sync {
    /// List the UI objects whose type is covered by `mask`.
    fn list_ui_objects(&self, mask: UiTypeMask) -> Result<Vec<UiObjectProps>>;
}

/// In-memory repository backed by a plain record list.
///
/// Preserves insertion order, which callers rely on for stable merge
/// output when display texts collide.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    records: Vec<UiObjectProps>,
}

impl MemoryRepository {
    pub fn new(records: Vec<UiObjectProps>) -> Self {
        Self { records }
    }

    /// Append a record after the existing ones.
    pub fn push(&mut self, record: UiObjectProps) {
        self.records.push(record);
    }
}

impl UiObjectRepository for MemoryRepository {
    fn list_ui_objects(&self, mask: UiTypeMask) -> Result<Vec<UiObjectProps>> {
        Ok(self
            .records
            .iter()
            .filter(|record| mask.contains(record.ui_type.mask()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use veduta_sdk::UiType;

    fn sample() -> MemoryRepository {
        MemoryRepository::new(vec![
            UiObjectProps::new(1, "rep", UiType::Report),
            UiObjectProps::new(2, "dw", UiType::DataWindow),
            UiObjectProps::new(3, "rep", UiType::Report),
        ])
    }

    #[test]
    fn mask_filters_by_type() {
        let repo = sample();
        let reports = repo.list_ui_objects(UiTypeMask::REPORT).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.ui_type == UiType::Report));

        let windows = repo.list_ui_objects(UiTypeMask::DATA_WINDOW).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].id, 2);
    }

    #[test]
    fn full_mask_lists_everything_in_order() {
        let repo = sample();
        let all = repo.list_ui_objects(UiTypeMask::ALL).unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn empty_mask_lists_nothing() {
        let repo = sample();
        assert!(repo.list_ui_objects(UiTypeMask::empty()).unwrap().is_empty());
    }
}
