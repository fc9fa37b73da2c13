use alloc::string::String;
use alloc::vec::Vec;

/// A labeled group of rows supplied by the caller.
///
/// The core never mutates sections; it only reads their rows (and, through
/// [`crate::LabelKey`], whatever field the caller uses as a sidebar label).
pub trait Section {
    type Row;

    fn rows(&self) -> &[Self::Row];
}

/// A ready-made section: a title plus its rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicSection<T> {
    pub title: String,
    pub data: Vec<T>,
}

impl<T> BasicSection<T> {
    pub fn new(title: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            title: title.into(),
            data,
        }
    }
}

impl<T> Section for BasicSection<T> {
    type Row = T;

    fn rows(&self) -> &[T] {
        &self.data
    }
}

/// Cell-type key handed to the engine for recycling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemType {
    SectionHeader,
    Row,
}

/// One sidebar label and the flat position of its section header.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionIndexEntry {
    pub label: String,
    pub flat_index: usize,
}

/// Layout direction of a wrapped cell's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Per-entry layout the engine asks the source to override.
///
/// `span` is measured in grid columns; `size` is an optional size hint in the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout {
    pub span: usize,
    pub size: Option<u32>,
}

impl Default for ItemLayout {
    fn default() -> Self {
        Self {
            span: 1,
            size: None,
        }
    }
}

/// A flat entry the engine currently reports as (partially) on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewToken {
    pub index: usize,
    pub is_viewable: bool,
}

/// Visibility rules the engine applies before reporting [`ViewToken`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewabilityConfig {
    /// Percentage (0..=100) of an item that must be inside the viewport to count as viewable.
    pub item_visible_percent_threshold: u8,
}

impl Default for ViewabilityConfig {
    fn default() -> Self {
        Self {
            item_visible_percent_threshold: 50,
        }
    }
}
