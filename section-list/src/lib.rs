//! Sectioned lists (grouped rows with headers) on top of a flat virtualization engine.
//!
//! For an engine binding, animated scrolling and index sidebar state, see the
//! `section-list-adapter` crate.
//!
//! Engines usually window a single flat sequence. This crate translates a sectioned model into
//! one and back:
//! - flattening sections into `[header, rows.., header, rows.., ..]` with a header-index table
//! - sticky header indices and the span policy (headers fill every grid column)
//! - item vs. section separator dispatch, aware of inverted lists
//! - `scroll_to_section` on top of the engine's `scroll_to_index`
//! - mapping the engine's viewable entries back to the topmost visible section
//!
//! Nothing is cached between renders: every [`SectionList::render`] call derives a fresh
//! [`RenderPass`] from the sections it is given.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod entry;
mod flatten;
mod layout;
mod list;
mod options;
mod scroll;
mod separator;
mod types;
mod viewability;

#[cfg(test)]
mod tests;

pub use engine::{FlatDataSource, FlatListEngine, RenderedCell};
pub use entry::FlatEntry;
pub use flatten::{FlatList, flatten};
pub use layout::{
    header_content_axis, resolve_item_layout, row_content_axis, scroll_axis, sticky_header_indices,
};
pub use list::{Cell, RenderPass, SectionList, Wrapped};
pub use options::{
    IndexBarAppearance, KeyExtractor, LabelKey, OverrideItemLayout, RenderItem, RenderSection,
    RenderSeparator, RowInfo, SectionIndexOptions, SectionListOptions, Style,
};
pub use scroll::{ScrollToSection, SectionListHandle};
pub use separator::{Placement, SeparatorKind, SeparatorProps, SeparatorSlot, dispatch_separator};
pub use types::{
    Axis, BasicSection, ItemLayout, ItemType, Section, SectionIndexEntry, ViewToken,
    ViewabilityConfig,
};
pub use viewability::{OnSectionChange, ViewabilityMapper};
