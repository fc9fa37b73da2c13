use core::fmt;

use crate::{ItemType, Section};

/// One position in the flat sequence the engine renders.
///
/// Every consumer matches on the variant; there is no structural "does it have rows" check.
pub enum FlatEntry<'a, S: Section> {
    Header {
        section: &'a S,
        section_index: usize,
    },
    Row {
        item: &'a S::Row,
        section_index: usize,
        /// Position of the row inside its section.
        row_index: usize,
    },
}

impl<'a, S: Section> FlatEntry<'a, S> {
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Header { .. } => ItemType::SectionHeader,
            Self::Row { .. } => ItemType::Row,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    pub fn section_index(&self) -> usize {
        match self {
            Self::Header { section_index, .. } | Self::Row { section_index, .. } => *section_index,
        }
    }

    pub fn header(&self) -> Option<&'a S> {
        match self {
            Self::Header { section, .. } => Some(*section),
            Self::Row { .. } => None,
        }
    }

    pub fn row(&self) -> Option<&'a S::Row> {
        match self {
            Self::Header { .. } => None,
            Self::Row { item, .. } => Some(*item),
        }
    }
}

impl<S: Section> Clone for FlatEntry<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Section> Copy for FlatEntry<'_, S> {}

impl<S> PartialEq for FlatEntry<'_, S>
where
    S: Section + PartialEq,
    S::Row: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Header {
                    section: a,
                    section_index: ai,
                },
                Self::Header {
                    section: b,
                    section_index: bi,
                },
            ) => ai == bi && a == b,
            (
                Self::Row {
                    item: a,
                    section_index: asi,
                    row_index: ari,
                },
                Self::Row {
                    item: b,
                    section_index: bsi,
                    row_index: bri,
                },
            ) => asi == bsi && ari == bri && a == b,
            _ => false,
        }
    }
}

impl<S> fmt::Debug for FlatEntry<'_, S>
where
    S: Section + fmt::Debug,
    S::Row: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header {
                section,
                section_index,
            } => f
                .debug_struct("Header")
                .field("section", section)
                .field("section_index", section_index)
                .finish(),
            Self::Row {
                item,
                section_index,
                row_index,
            } => f
                .debug_struct("Row")
                .field("item", item)
                .field("section_index", section_index)
                .field("row_index", row_index)
                .finish(),
        }
    }
}
