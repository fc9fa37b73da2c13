use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;

use crate::{FlatEntry, ItemLayout, OnSectionChange, Section, SeparatorProps, ViewabilityConfig};

/// Arguments handed to the row renderer.
pub struct RowInfo<'a, S: Section> {
    pub item: &'a S::Row,
    pub section: &'a S,
    /// Position of the row inside its section.
    pub index: usize,
    pub section_index: usize,
}

/// Renders one row.
pub type RenderItem<S, N> = Arc<dyn Fn(RowInfo<'_, S>) -> Option<N> + Send + Sync>;

/// Renders a section header or footer.
pub type RenderSection<S, N> = Arc<dyn Fn(&S) -> Option<N> + Send + Sync>;

/// Renders an item or section separator.
pub type RenderSeparator<S, N> = Arc<dyn Fn(SeparatorProps<'_, S>) -> Option<N> + Send + Sync>;

/// Reads the sidebar label off a section. `None` becomes an empty label.
pub type LabelKey<S> = Arc<dyn Fn(&S) -> Option<String> + Send + Sync>;

/// Caller hook run before the span policy: `(layout, entry, flat_index, max_columns)`.
pub type OverrideItemLayout<S> =
    Arc<dyn Fn(&mut ItemLayout, &FlatEntry<'_, S>, usize, usize) + Send + Sync>;

/// Produces the stable key of the entry at a flat index.
pub type KeyExtractor<S> = Arc<dyn Fn(&FlatEntry<'_, S>, usize) -> String + Send + Sync>;

/// Opaque style properties forwarded to whatever draws the index bar.
pub type Style = BTreeMap<String, String>;

/// Presentation of the index sidebar. Never read by the list itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexBarAppearance {
    pub dark: bool,
    pub bar_container_style: Option<Style>,
    pub bar_style: Option<Style>,
    pub text_style: Option<Style>,
}

/// Configuration of the fast-scroll index sidebar.
pub struct SectionIndexOptions<S> {
    pub label_key: LabelKey<S>,
    /// Fired with the logical section index whenever the topmost visible section changes.
    pub on_section_change: Option<OnSectionChange>,
    pub appearance: IndexBarAppearance,
}

impl<S> SectionIndexOptions<S> {
    pub fn new(label_key: impl Fn(&S) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            label_key: Arc::new(label_key),
            on_section_change: None,
            appearance: IndexBarAppearance::default(),
        }
    }

    pub fn with_on_section_change(
        mut self,
        on_section_change: Option<impl Fn(usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_section_change = on_section_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_appearance(mut self, appearance: IndexBarAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl<S> Clone for SectionIndexOptions<S> {
    fn clone(&self) -> Self {
        Self {
            label_key: Arc::clone(&self.label_key),
            on_section_change: self.on_section_change.clone(),
            appearance: self.appearance.clone(),
        }
    }
}

impl<S> core::fmt::Debug for SectionIndexOptions<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionIndexOptions")
            .field("on_section_change", &self.on_section_change.is_some())
            .field("appearance", &self.appearance)
            .finish_non_exhaustive()
    }
}

/// Render-time inputs of a [`crate::SectionList`].
///
/// Closures live in `Arc`s so the bundle is cheap to clone; adapters typically keep one around
/// and tweak a few fields between passes.
pub struct SectionListOptions<S: Section, N> {
    pub render_item: RenderItem<S, N>,
    pub render_section_header: Option<RenderSection<S, N>>,
    /// Rendered inside the cell of a section's last entry, after its content.
    pub render_section_footer: Option<RenderSection<S, N>>,
    pub item_separator: Option<RenderSeparator<S, N>>,
    pub section_separator: Option<RenderSeparator<S, N>>,
    pub sticky_section_headers_enabled: bool,
    pub section_index_options: Option<SectionIndexOptions<S>>,

    /// The list scrolls horizontally.
    pub horizontal: bool,
    /// Visual order runs against data order (e.g. chat timelines).
    pub inverted: bool,
    pub num_columns: usize,
    pub override_item_layout: Option<OverrideItemLayout<S>>,
    pub key_extractor: Option<KeyExtractor<S>>,
    pub viewability_config: ViewabilityConfig,
}

impl<S: Section, N> SectionListOptions<S, N> {
    pub fn new(render_item: impl Fn(RowInfo<'_, S>) -> Option<N> + Send + Sync + 'static) -> Self {
        Self {
            render_item: Arc::new(render_item),
            render_section_header: None,
            render_section_footer: None,
            item_separator: None,
            section_separator: None,
            sticky_section_headers_enabled: true,
            section_index_options: None,
            horizontal: false,
            inverted: false,
            num_columns: 1,
            override_item_layout: None,
            key_extractor: None,
            viewability_config: ViewabilityConfig::default(),
        }
    }

    pub fn with_render_section_header(
        mut self,
        f: Option<impl Fn(&S) -> Option<N> + Send + Sync + 'static>,
    ) -> Self {
        self.render_section_header = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_render_section_footer(
        mut self,
        f: Option<impl Fn(&S) -> Option<N> + Send + Sync + 'static>,
    ) -> Self {
        self.render_section_footer = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_item_separator(
        mut self,
        f: Option<impl Fn(SeparatorProps<'_, S>) -> Option<N> + Send + Sync + 'static>,
    ) -> Self {
        self.item_separator = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_section_separator(
        mut self,
        f: Option<impl Fn(SeparatorProps<'_, S>) -> Option<N> + Send + Sync + 'static>,
    ) -> Self {
        self.section_separator = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_sticky_section_headers_enabled(mut self, enabled: bool) -> Self {
        self.sticky_section_headers_enabled = enabled;
        self
    }

    pub fn with_section_index_options(mut self, options: Option<SectionIndexOptions<S>>) -> Self {
        self.section_index_options = options;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Sets the grid column count. `0` is treated as `1`.
    pub fn with_num_columns(mut self, num_columns: usize) -> Self {
        self.num_columns = num_columns.max(1);
        self
    }

    pub fn with_override_item_layout(
        mut self,
        f: Option<impl Fn(&mut ItemLayout, &FlatEntry<'_, S>, usize, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.override_item_layout = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_key_extractor(
        mut self,
        f: Option<impl Fn(&FlatEntry<'_, S>, usize) -> String + Send + Sync + 'static>,
    ) -> Self {
        self.key_extractor = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_viewability_config(mut self, config: ViewabilityConfig) -> Self {
        self.viewability_config = config;
        self
    }
}

impl<S: Section, N> Clone for SectionListOptions<S, N> {
    fn clone(&self) -> Self {
        Self {
            render_item: Arc::clone(&self.render_item),
            render_section_header: self.render_section_header.clone(),
            render_section_footer: self.render_section_footer.clone(),
            item_separator: self.item_separator.clone(),
            section_separator: self.section_separator.clone(),
            sticky_section_headers_enabled: self.sticky_section_headers_enabled,
            section_index_options: self.section_index_options.clone(),
            horizontal: self.horizontal,
            inverted: self.inverted,
            num_columns: self.num_columns,
            override_item_layout: self.override_item_layout.clone(),
            key_extractor: self.key_extractor.clone(),
            viewability_config: self.viewability_config,
        }
    }
}

impl<S: Section, N> core::fmt::Debug for SectionListOptions<S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionListOptions")
            .field(
                "sticky_section_headers_enabled",
                &self.sticky_section_headers_enabled,
            )
            .field("section_index_options", &self.section_index_options)
            .field("horizontal", &self.horizontal)
            .field("inverted", &self.inverted)
            .field("num_columns", &self.num_columns)
            .field("viewability_config", &self.viewability_config)
            .finish_non_exhaustive()
    }
}
