use alloc::sync::Arc;

use crate::{FlatEntry, FlatList, Section, SectionIndexEntry, ViewToken};

/// Callback receiving the logical index of the section currently on screen.
pub type OnSectionChange = Arc<dyn Fn(usize) + Send + Sync>;

/// Maps the engine's viewable entries to the topmost visible section.
///
/// Stateless between notifications: every call is resolved on its own and nothing is debounced
/// here.
#[derive(Clone)]
pub struct ViewabilityMapper {
    table: Arc<[SectionIndexEntry]>,
    on_section_change: Option<OnSectionChange>,
}

impl ViewabilityMapper {
    pub fn new(table: Arc<[SectionIndexEntry]>, on_section_change: Option<OnSectionChange>) -> Self {
        Self {
            table,
            on_section_change,
        }
    }

    /// Resolves the section whose header is the first viewable header in engine order.
    ///
    /// Returns `None` when no viewable token is a header, e.g. when the window only shows rows
    /// from the middle of one section.
    pub fn visible_section<S: Section>(
        &self,
        flat: &FlatList<'_, S>,
        viewable: &[ViewToken],
    ) -> Option<usize> {
        let header = viewable
            .iter()
            .filter(|t| t.is_viewable)
            .find(|t| matches!(flat.get(t.index), Some(FlatEntry::Header { .. })))?;
        self.table
            .binary_search_by_key(&header.index, |e| e.flat_index)
            .ok()
    }

    /// Resolves the visible section and reports it to `on_section_change`.
    pub fn on_viewable_items_changed<S: Section>(
        &self,
        flat: &FlatList<'_, S>,
        viewable: &[ViewToken],
    ) -> Option<usize> {
        let section = self.visible_section(flat, viewable)?;
        strace!(section, viewable = viewable.len(), "visible section");
        if let Some(cb) = &self.on_section_change {
            cb(section);
        }
        Some(section)
    }
}

impl core::fmt::Debug for ViewabilityMapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewabilityMapper")
            .field("sections", &self.table.len())
            .field("on_section_change", &self.on_section_change.is_some())
            .finish()
    }
}
