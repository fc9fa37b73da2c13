use alloc::vec::Vec;

use crate::{Axis, FlatEntry, FlatList, ItemLayout, OverrideItemLayout, Section};

/// Flat indices the engine must pin as sticky headers.
///
/// Exactly the header positions when `enabled`, otherwise empty.
pub fn sticky_header_indices<S: Section>(flat: &FlatList<'_, S>, enabled: bool) -> Vec<usize> {
    if !enabled {
        return Vec::new();
    }
    flat.section_index().iter().map(|e| e.flat_index).collect()
}

/// Resolves the final layout of one entry.
///
/// `caller_override` runs first; the span is then forced so headers fill every column and rows
/// take exactly one. `max_columns` of `0` is treated as `1`.
pub fn resolve_item_layout<S: Section>(
    layout: &mut ItemLayout,
    entry: &FlatEntry<'_, S>,
    index: usize,
    max_columns: usize,
    caller_override: Option<&OverrideItemLayout<S>>,
) {
    if let Some(f) = caller_override {
        f(&mut *layout, entry, index, max_columns);
    }
    layout.span = match entry {
        FlatEntry::Header { .. } => max_columns.max(1),
        FlatEntry::Row { .. } => 1,
    };
}

/// The scroll axis of a list.
pub fn scroll_axis(horizontal: bool) -> Axis {
    if horizontal {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Header content flows across the scroll axis.
pub fn header_content_axis(horizontal: bool) -> Axis {
    scroll_axis(horizontal).cross()
}

/// Row content stacks vertically in horizontal or single-column lists and horizontally in
/// multi-column grids.
pub fn row_content_axis(horizontal: bool, num_columns: usize) -> Axis {
    if horizontal || num_columns <= 1 {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}
