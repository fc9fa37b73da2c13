use alloc::sync::Arc;
use alloc::vec::Vec;

use section_list::{FlatDataSource, FlatListEngine, ItemType, RenderedCell, ViewToken};
use virtualizer::{
    Align, IndexEmitter, Range, RangeExtractor, VirtualItem, Virtualizer, VirtualizerOptions,
};

use crate::grid::{GridLayout, GridRow};
use crate::{Easing, ScrollTween};

/// Estimated scroll-axis size of an entry of the given type, used until the source supplies
/// `ItemLayout::size`.
pub type EstimateSize = Arc<dyn Fn(ItemType) -> u32 + Send + Sync>;

/// Configuration for [`VirtualizedEngine`].
pub struct EngineOptions {
    pub estimate_size: EstimateSize,
    /// Extra rows rendered beyond each edge of the viewport.
    pub overscan: usize,
    /// Duration of animated `scroll_to_index` requests. `0` makes them immediate.
    pub scroll_duration_ms: u64,
    pub easing: Easing,
}

impl EngineOptions {
    pub fn new(estimate_size: impl Fn(ItemType) -> u32 + Send + Sync + 'static) -> Self {
        Self {
            estimate_size: Arc::new(estimate_size),
            overscan: 1,
            scroll_duration_ms: 240,
            easing: Easing::default(),
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_scroll_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.scroll_duration_ms = duration_ms;
        self.easing = easing;
        self
    }
}

impl Clone for EngineOptions {
    fn clone(&self) -> Self {
        Self {
            estimate_size: Arc::clone(&self.estimate_size),
            overscan: self.overscan,
            scroll_duration_ms: self.scroll_duration_ms,
            easing: self.easing,
        }
    }
}

impl core::fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("overscan", &self.overscan)
            .field("scroll_duration_ms", &self.scroll_duration_ms)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

/// A flat engine backed by [`virtualizer::Virtualizer`].
///
/// Flat entries are packed into grid rows by their resolved spans; the virtualizer windows those
/// rows. The section header that owns the first visible row is pinned to the top of the viewport.
///
/// Like the virtualizer, this holds no UI objects. Adapters drive it by calling:
/// - `set_viewport_size` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame (animated scrolls and `is_scrolling` debouncing)
/// - `render(source)` to get the positioned cells for the frame
#[derive(Clone, Debug)]
pub struct VirtualizedEngine {
    options: EngineOptions,
    v: Virtualizer,
    grid: GridLayout,
    sticky_rows: Arc<[usize]>,
    tween: Option<ScrollTween>,
    now_ms: u64,
    viewable: Vec<ViewToken>,
    viewable_types: Vec<Option<ItemType>>,
    notified_len: Option<usize>,
}

impl VirtualizedEngine {
    pub fn new(options: EngineOptions) -> Self {
        let v = Virtualizer::new(VirtualizerOptions::new(0, |_| 1).with_overscan(options.overscan));
        Self {
            options,
            v,
            grid: GridLayout::default(),
            sticky_rows: Arc::from(Vec::new()),
            tween: None,
            now_ms: 0,
            viewable: Vec::new(),
            viewable_types: Vec::new(),
            notified_len: None,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.v
    }

    /// Grid rows from the last `render`.
    pub fn rows(&self) -> &[GridRow] {
        self.grid.rows()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.v.scroll_offset()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Viewable entries reported by the last `render`.
    pub fn viewable_items(&self) -> &[ViewToken] {
        &self.viewable
    }

    pub fn set_viewport_size(&mut self, viewport_main: u32) {
        self.v.set_viewport_size(viewport_main);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any animated scroll.
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.now_ms = now_ms;
        self.cancel_animation();
        self.v.apply_scroll_offset_event_clamped(scroll_offset, now_ms);
    }

    /// Advances the engine clock.
    ///
    /// - If an animated scroll is active, moves `scroll_offset` and returns the new offset.
    /// - Otherwise, runs `is_scrolling` debouncing and returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        self.now_ms = now_ms;
        let Some(tween) = self.tween else {
            self.v.update_scrolling(now_ms);
            return None;
        };

        self.v
            .apply_scroll_offset_event_clamped(tween.offset_at(now_ms), now_ms);
        if tween.is_finished(now_ms) {
            self.tween = None;
            self.v.set_is_scrolling(false);
        }
        Some(self.v.scroll_offset())
    }

    fn sync_grid<D: FlatDataSource + ?Sized>(&mut self, source: &D) {
        let estimate = Arc::clone(&self.options.estimate_size);
        self.grid = GridLayout::build(source, |t| estimate(t));
        self.sticky_rows = self.grid.sticky_rows().into();

        let sizes: Arc<[u32]> = self.grid.rows().iter().map(|r| r.size).collect();
        let count = sizes.len();
        let extractor: Option<RangeExtractor> = if self.sticky_rows.is_empty() {
            None
        } else {
            let sticky = Arc::clone(&self.sticky_rows);
            Some(Arc::new(move |r: Range, emit: &mut dyn FnMut(usize)| {
                let mut e = IndexEmitter::new(r, emit);
                // Indexes must be ascending: the pinned header always precedes the window.
                let overscanned_start = r.start_index.saturating_sub(r.overscan);
                if let Some(pinned) = active_sticky_row(&sticky, r.start_index) {
                    if pinned < overscanned_start {
                        e.emit_pinned(pinned);
                    }
                }
                e.emit_overscanned();
            }))
        };

        self.v.update_options(|o| {
            o.count = count;
            o.estimate_size = Arc::new(move |i: usize| sizes.get(i).copied().unwrap_or(1));
            o.range_extractor = extractor;
        });
        atrace!(
            entries = self.grid.len(),
            rows = count,
            sticky = self.sticky_rows.len(),
            "sync_grid"
        );
    }

    fn visible_percent(&self, item: VirtualItem) -> u64 {
        let view_start = self.v.scroll_offset();
        let view_end = view_start.saturating_add(self.v.viewport_size() as u64);
        if item.size == 0 {
            return if (view_start..view_end).contains(&item.start) {
                100
            } else {
                0
            };
        }
        let overlap = item
            .end()
            .min(view_end)
            .saturating_sub(item.start.max(view_start));
        overlap.saturating_mul(100) / item.size as u64
    }

    fn update_viewability<D: FlatDataSource + ?Sized>(&mut self, source: &D) {
        let threshold = source.viewability_config().item_visible_percent_threshold.min(100) as u64;
        let visible = self.v.visible_range();
        let mut tokens = Vec::new();
        for row in visible.start_index..visible.end_index {
            let (Some(start), Some(size), Some(grid_row)) = (
                self.v.item_start(row),
                self.v.item_size(row),
                self.grid.rows().get(row),
            ) else {
                continue;
            };
            if self.visible_percent(VirtualItem {
                index: row,
                start,
                size,
            }) < threshold
            {
                continue;
            }
            tokens.extend((grid_row.start_index..grid_row.end_index).map(|index| ViewToken {
                index,
                is_viewable: true,
            }));
        }

        // New sections can move headers under unchanged indexes, so the entry types count too.
        let types: Vec<Option<ItemType>> =
            tokens.iter().map(|t| source.item_type(t.index)).collect();
        let len = source.len();
        let unchanged = tokens == self.viewable
            && types == self.viewable_types
            && self.notified_len == Some(len);
        if unchanged {
            return;
        }
        atrace!(viewable = tokens.len(), "viewable items changed");
        self.viewable = tokens;
        self.viewable_types = types;
        self.notified_len = Some(len);
        source.on_viewable_items_changed(&self.viewable);
    }
}

/// The last sticky row at or before `row`.
fn active_sticky_row(sticky_rows: &[usize], row: usize) -> Option<usize> {
    match sticky_rows.binary_search(&row) {
        Ok(i) => Some(sticky_rows[i]),
        Err(0) => None,
        Err(i) => Some(sticky_rows[i - 1]),
    }
}

impl FlatListEngine for VirtualizedEngine {
    fn render<D: FlatDataSource + ?Sized>(&mut self, source: &D) -> Vec<RenderedCell<D::Node>> {
        self.sync_grid(source);

        let scroll = self.v.scroll_offset();
        let pinned = active_sticky_row(&self.sticky_rows, self.v.visible_range().start_index);
        let mut items = Vec::new();
        self.v.for_each_virtual_item(|it| items.push(it));

        let mut out = Vec::new();
        for item in items {
            let Some(row) = self.grid.rows().get(item.index).copied() else {
                continue;
            };
            let is_pinned = pinned == Some(item.index);
            let start = if is_pinned {
                item.start.max(scroll)
            } else {
                item.start
            };
            for index in row.start_index..row.end_index {
                let (Some(node), Some(item_type), Some(key), Some(placed)) = (
                    source.render_item(index),
                    source.item_type(index),
                    source.key(index),
                    self.grid.placed(index),
                ) else {
                    continue;
                };
                out.push(RenderedCell {
                    index,
                    item_type,
                    key,
                    start,
                    size: item.size,
                    column: placed.column,
                    span: placed.span,
                    sticky: is_pinned,
                    node,
                });
            }
        }

        self.update_viewability(source);
        out
    }

    fn scroll_to_index(&mut self, index: usize, animated: bool) {
        let Some(row) = self.grid.row_of(index) else {
            awarn!(
                index,
                len = self.grid.len(),
                "scroll_to_index: out-of-bounds index"
            );
            return;
        };
        let target = self.v.scroll_to_index_offset(row, Align::Start);
        atrace!(index, row, target, animated, "scroll_to_index");

        if animated && self.options.scroll_duration_ms > 0 {
            self.tween = Some(ScrollTween::new(
                self.v.scroll_offset(),
                target,
                self.now_ms,
                self.options.scroll_duration_ms,
                self.options.easing,
            ));
        } else {
            self.tween = None;
            self.v.apply_scroll_offset_event_clamped(target, self.now_ms);
        }
    }
}
