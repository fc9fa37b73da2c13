use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::layout::{
    header_content_axis, resolve_item_layout, row_content_axis, sticky_header_indices,
};
use crate::separator::{Placement, SeparatorKind, dispatch_separator};
use crate::{
    Axis, FlatDataSource, FlatEntry, FlatList, FlatListEngine, ItemLayout, ItemType, RowInfo,
    ScrollToSection, Section, SectionIndexEntry, SectionListHandle, SectionListOptions,
    ViewToken, ViewabilityConfig, ViewabilityMapper, flatten,
};

/// Content of a cell, laid out along `axis`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wrapped<N> {
    pub axis: Axis,
    pub child: Option<N>,
}

/// Everything rendered for one flat entry, in data order.
///
/// A separator lands in `leading_separator` for inverted lists and in `trailing_separator`
/// otherwise; at most one of the two is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell<N> {
    pub item_type: ItemType,
    pub leading_separator: Option<N>,
    pub content: Wrapped<N>,
    pub footer: Option<N>,
    pub trailing_separator: Option<N>,
}

impl<N> Cell<N> {
    /// Rendered nodes in display order within the cell.
    pub fn into_nodes(self) -> impl Iterator<Item = N> {
        self.leading_separator
            .into_iter()
            .chain(self.content.child)
            .chain(self.footer)
            .chain(self.trailing_separator)
    }
}

/// A sectioned list rendered through a flat engine.
///
/// The list itself holds only options. Each call to [`Self::render`] derives a fresh
/// [`RenderPass`] from the sections it is given.
pub struct SectionList<S: Section, N> {
    options: SectionListOptions<S, N>,
}

impl<S: Section, N> SectionList<S, N> {
    pub fn new(options: SectionListOptions<S, N>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SectionListOptions<S, N> {
        &self.options
    }

    pub fn set_options(&mut self, options: SectionListOptions<S, N>) {
        self.options = options;
    }

    /// Clones the current options, applies `f`, then stores the result.
    pub fn update_options(&mut self, f: impl FnOnce(&mut SectionListOptions<S, N>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn render<'a>(&'a self, sections: &'a [S]) -> RenderPass<'a, S, N> {
        RenderPass::new(&self.options, sections)
    }
}

impl<S: Section, N> Clone for SectionList<S, N> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
        }
    }
}

impl<S: Section, N> core::fmt::Debug for SectionList<S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionList")
            .field("options", &self.options)
            .finish()
    }
}

/// The derived state of one render: flat sequence, header index, sticky set, scroll controller
/// and viewability mapper.
///
/// Hand it to an engine as a [`FlatDataSource`].
pub struct RenderPass<'a, S: Section, N> {
    options: &'a SectionListOptions<S, N>,
    sections: &'a [S],
    flat: FlatList<'a, S>,
    sticky: Vec<usize>,
    scroll: ScrollToSection,
    mapper: ViewabilityMapper,
}

impl<'a, S: Section, N> RenderPass<'a, S, N> {
    pub fn new(options: &'a SectionListOptions<S, N>, sections: &'a [S]) -> Self {
        let index_options = options.section_index_options.as_ref();
        let flat = flatten(sections, |s| index_options.and_then(|o| (o.label_key)(s)));
        let sticky = sticky_header_indices(&flat, options.sticky_section_headers_enabled);
        let table = flat.section_index_table();
        let scroll = ScrollToSection::new(table.clone());
        let mapper = ViewabilityMapper::new(
            table,
            index_options.and_then(|o| o.on_section_change.clone()),
        );
        sdebug!(
            sections = sections.len(),
            entries = flat.len(),
            sticky = sticky.len(),
            "RenderPass::new"
        );
        Self {
            options,
            sections,
            flat,
            sticky,
            scroll,
            mapper,
        }
    }

    pub fn options(&self) -> &'a SectionListOptions<S, N> {
        self.options
    }

    pub fn sections(&self) -> &'a [S] {
        self.sections
    }

    pub fn flat(&self) -> &FlatList<'a, S> {
        &self.flat
    }

    pub fn section_index(&self) -> &[SectionIndexEntry] {
        self.flat.section_index()
    }

    pub fn scroll_controller(&self) -> ScrollToSection {
        self.scroll.clone()
    }

    pub fn viewability_mapper(&self) -> &ViewabilityMapper {
        &self.mapper
    }

    /// Wraps `engine` in the imperative handle for this pass.
    pub fn handle<'e, E: FlatListEngine + ?Sized>(
        &self,
        engine: &'e mut E,
    ) -> SectionListHandle<'e, E> {
        SectionListHandle::new(engine, self.scroll.clone())
    }

    pub fn key_for(&self, index: usize) -> Option<String> {
        let entry = self.flat.get(index)?;
        if let Some(f) = &self.options.key_extractor {
            return Some(f(&entry, index));
        }
        Some(match entry {
            FlatEntry::Header { section_index, .. } => format!("header-{section_index}"),
            FlatEntry::Row {
                section_index,
                row_index,
                ..
            } => format!("row-{section_index}-{row_index}"),
        })
    }

    /// The final layout of the entry at `index` for a grid of `max_columns`.
    pub fn item_layout(&self, index: usize, max_columns: usize) -> Option<ItemLayout> {
        let mut layout = ItemLayout::default();
        self.apply_layout(&mut layout, index, max_columns)
            .then_some(layout)
    }

    fn apply_layout(&self, layout: &mut ItemLayout, index: usize, max_columns: usize) -> bool {
        let Some(entry) = self.flat.get(index) else {
            return false;
        };
        resolve_item_layout(
            layout,
            &entry,
            index,
            max_columns,
            self.options.override_item_layout.as_ref(),
        );
        true
    }

    /// Assembles the cell for the entry at `index`.
    pub fn render_cell(&self, index: usize) -> Option<Cell<N>> {
        let entry = self.flat.get(index)?;
        let opts = self.options;

        let (item_type, content) = match entry {
            FlatEntry::Header { section, .. } => (
                ItemType::SectionHeader,
                Wrapped {
                    axis: header_content_axis(opts.horizontal),
                    child: opts
                        .render_section_header
                        .as_ref()
                        .and_then(|f| f(section)),
                },
            ),
            FlatEntry::Row {
                item,
                section_index,
                row_index,
            } => (
                ItemType::Row,
                Wrapped {
                    axis: row_content_axis(opts.horizontal, opts.num_columns),
                    child: (opts.render_item)(RowInfo {
                        item,
                        section: &self.sections[section_index],
                        index: row_index,
                        section_index,
                    }),
                },
            ),
        };

        let footer = if self.flat.is_section_end(index) {
            opts.render_section_footer
                .as_ref()
                .and_then(|f| f(&self.sections[entry.section_index()]))
        } else {
            None
        };

        let mut leading_separator = None;
        let mut trailing_separator = None;
        if let Some(slot) = dispatch_separator(&self.flat, index, opts.inverted) {
            let renderer = match slot.kind {
                SeparatorKind::Section => opts.section_separator.as_ref(),
                SeparatorKind::Item => opts.item_separator.as_ref(),
            };
            let node = renderer.and_then(|f| f(slot.props));
            match slot.placement {
                Placement::Before => leading_separator = node,
                Placement::After => trailing_separator = node,
            }
        }

        Some(Cell {
            item_type,
            leading_separator,
            content,
            footer,
            trailing_separator,
        })
    }
}

impl<S: Section, N> FlatDataSource for RenderPass<'_, S, N> {
    type Node = Cell<N>;

    fn len(&self) -> usize {
        self.flat.len()
    }

    fn render_item(&self, index: usize) -> Option<Cell<N>> {
        self.render_cell(index)
    }

    fn item_type(&self, index: usize) -> Option<ItemType> {
        self.flat.get(index).map(|e| e.item_type())
    }

    fn key(&self, index: usize) -> Option<String> {
        self.key_for(index)
    }

    fn override_item_layout(&self, layout: &mut ItemLayout, index: usize, max_columns: usize) {
        self.apply_layout(layout, index, max_columns);
    }

    fn num_columns(&self) -> usize {
        self.options.num_columns.max(1)
    }

    fn sticky_header_indices(&self) -> &[usize] {
        &self.sticky
    }

    fn viewability_config(&self) -> ViewabilityConfig {
        self.options.viewability_config
    }

    fn on_viewable_items_changed(&self, viewable: &[ViewToken]) {
        self.mapper.on_viewable_items_changed(&self.flat, viewable);
    }
}

impl<S, N> core::fmt::Debug for RenderPass<'_, S, N>
where
    S: Section + core::fmt::Debug,
    S::Row: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderPass")
            .field("flat", &self.flat)
            .field("sticky", &self.sticky)
            .field("mapper", &self.mapper)
            .finish_non_exhaustive()
    }
}
