use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{FlatEntry, Section, SectionIndexEntry};

/// The flat sequence for one render pass plus its header-index table.
///
/// Built fresh from the caller's sections every pass; it borrows them and is never patched in
/// place.
pub struct FlatList<'a, S: Section> {
    entries: Vec<FlatEntry<'a, S>>,
    section_index: Arc<[SectionIndexEntry]>,
}

/// Flattens `sections` into `[header, rows.., header, rows.., ..]`.
///
/// `label` reads the sidebar label off a section; `None` becomes an empty label. Sections and
/// rows keep the caller's order: nothing is sorted, deduplicated or filtered, and an empty
/// section still contributes its header.
pub fn flatten<'a, S: Section>(
    sections: &'a [S],
    mut label: impl FnMut(&S) -> Option<String>,
) -> FlatList<'a, S> {
    let len = sections
        .iter()
        .fold(0usize, |acc, s| acc.saturating_add(1 + s.rows().len()));
    let mut entries = Vec::with_capacity(len);
    let mut index = Vec::with_capacity(sections.len());

    for (section_index, section) in sections.iter().enumerate() {
        index.push(SectionIndexEntry {
            label: label(section).unwrap_or_default(),
            flat_index: entries.len(),
        });
        entries.push(FlatEntry::Header {
            section,
            section_index,
        });
        entries.extend(
            section
                .rows()
                .iter()
                .enumerate()
                .map(|(row_index, item)| FlatEntry::Row {
                    item,
                    section_index,
                    row_index,
                }),
        );
    }

    debug_assert_eq!(entries.len(), len);
    FlatList {
        entries,
        section_index: index.into(),
    }
}

impl<'a, S: Section> FlatList<'a, S> {
    pub fn entries(&self) -> &[FlatEntry<'a, S>] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<FlatEntry<'a, S>> {
        self.entries.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.section_index.len()
    }

    pub fn section_index(&self) -> &[SectionIndexEntry] {
        &self.section_index
    }

    /// Shared handle to the header-index table, for closures that outlive a borrow of `self`.
    pub fn section_index_table(&self) -> Arc<[SectionIndexEntry]> {
        Arc::clone(&self.section_index)
    }

    /// Returns the logical section whose header sits at `flat_index`.
    pub fn section_for_header(&self, flat_index: usize) -> Option<usize> {
        self.section_index
            .binary_search_by_key(&flat_index, |e| e.flat_index)
            .ok()
    }

    /// `true` when `index` is the last flat entry belonging to its section.
    pub fn is_section_end(&self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        match self.entries.get(index + 1) {
            None => true,
            Some(next) => next.is_header(),
        }
    }
}

impl<S: Section> Clone for FlatList<'_, S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            section_index: Arc::clone(&self.section_index),
        }
    }
}

impl<S> core::fmt::Debug for FlatList<'_, S>
where
    S: Section + core::fmt::Debug,
    S::Row: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatList")
            .field("entries", &self.entries)
            .field("section_index", &self.section_index)
            .finish()
    }
}
