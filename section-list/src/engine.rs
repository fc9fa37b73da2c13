//! The seam between this crate and a flat virtualization engine.
//!
//! The engine only ever sees a flat sequence: it asks a [`FlatDataSource`] for counts, cells,
//! recycling types, layout overrides and sticky indices, and reports visibility back through
//! [`FlatDataSource::on_viewable_items_changed`]. Scrolling goes the other way through
//! [`FlatListEngine::scroll_to_index`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::{ItemLayout, ItemType, ViewToken, ViewabilityConfig};

/// Everything a flat engine reads from one render pass.
pub trait FlatDataSource {
    type Node;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the cell at `index`. Returns `None` when `index` is out of bounds.
    fn render_item(&self, index: usize) -> Option<Self::Node>;

    /// Recycling key of the cell at `index`.
    fn item_type(&self, index: usize) -> Option<ItemType>;

    /// Stable identity of the cell at `index`.
    fn key(&self, index: usize) -> Option<String>;

    /// Lets the source adjust the layout the engine computed for `index`.
    fn override_item_layout(&self, layout: &mut ItemLayout, index: usize, max_columns: usize);

    /// Number of grid columns (`1` for a plain list).
    fn num_columns(&self) -> usize {
        1
    }

    /// Flat indices to pin as sticky headers, ascending.
    fn sticky_header_indices(&self) -> &[usize];

    fn viewability_config(&self) -> ViewabilityConfig {
        ViewabilityConfig::default()
    }

    /// Called by the engine whenever the set of viewable entries changes. Each call replaces the
    /// previous set.
    fn on_viewable_items_changed(&self, viewable: &[ViewToken]);
}

/// A cell positioned by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCell<N> {
    pub index: usize,
    pub item_type: ItemType,
    pub key: String,
    /// Start offset in the scroll axis.
    pub start: u64,
    /// Size in the scroll axis.
    pub size: u32,
    /// First grid column the cell occupies.
    pub column: usize,
    pub span: usize,
    /// Pinned to the viewport edge as a sticky header.
    pub sticky: bool,
    pub node: N,
}

/// The imperative side of a flat engine.
pub trait FlatListEngine {
    /// Lays out and renders the visible part of `source`.
    fn render<D: FlatDataSource + ?Sized>(&mut self, source: &D) -> Vec<RenderedCell<D::Node>>;

    /// Scrolls so the entry at flat `index` becomes visible.
    fn scroll_to_index(&mut self, index: usize, animated: bool);
}
