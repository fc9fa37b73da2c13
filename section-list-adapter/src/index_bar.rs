use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use section_list::{
    FlatListEngine, IndexBarAppearance, OnSectionChange, RenderPass, ScrollToSection, Section,
};

const NONE: usize = usize::MAX;

/// The section most recently reported by the list's viewability callback.
///
/// Shared between the list (which writes it from `on_section_change`) and the index bar (which
/// reads it to highlight a label). Clones observe the same value.
#[derive(Clone, Debug)]
pub struct ActiveSection(Arc<AtomicUsize>);

impl Default for ActiveSection {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveSection {
    pub fn new() -> Self {
        Self(Arc::new(AtomicUsize::new(NONE)))
    }

    pub fn get(&self) -> Option<usize> {
        match self.0.load(Ordering::Relaxed) {
            NONE => None,
            section => Some(section),
        }
    }

    pub fn set(&self, section: usize) {
        self.0.store(section, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        self.0.store(NONE, Ordering::Relaxed);
    }

    /// A callback for `SectionIndexOptions::with_on_section_change` that records into `self`.
    pub fn callback(&self) -> OnSectionChange {
        let inner = Arc::clone(&self.0);
        Arc::new(move |section: usize| inner.store(section, Ordering::Relaxed))
    }
}

/// Serializable view of an [`IndexBar`] for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexBarState {
    pub labels: Vec<String>,
    pub highlighted: Option<usize>,
    pub dragging: bool,
    pub appearance: IndexBarAppearance,
}

/// State of the fast-scroll sidebar: one label per section, the highlighted label, and the
/// press/drag interactions that jump the list.
///
/// Built from a [`RenderPass`]; rebuild it when the sections change.
#[derive(Clone, Debug)]
pub struct IndexBar {
    labels: Vec<String>,
    scroll: ScrollToSection,
    active: ActiveSection,
    appearance: IndexBarAppearance,
    dragging: Option<usize>,
}

impl IndexBar {
    pub fn new<S: Section, N>(pass: &RenderPass<'_, S, N>, active: ActiveSection) -> Self {
        let labels = pass
            .section_index()
            .iter()
            .map(|e| e.label.clone())
            .collect();
        let appearance = pass
            .options()
            .section_index_options
            .as_ref()
            .map(|o| o.appearance.clone())
            .unwrap_or_default();
        Self {
            labels,
            scroll: pass.scroll_controller(),
            active,
            appearance,
            dragging: None,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn appearance(&self) -> &IndexBarAppearance {
        &self.appearance
    }

    /// The highlighted section. A drag in progress wins over the list's reported section.
    pub fn active(&self) -> Option<usize> {
        self.dragging
            .or_else(|| self.active.get())
            .filter(|&s| s < self.labels.len())
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Maps a position along the bar to the section label under it.
    ///
    /// Labels share the bar evenly; positions past either end clamp to the first or last label.
    pub fn section_at(&self, offset: f32, bar_len: f32) -> Option<usize> {
        let n = self.labels.len();
        if n == 0 || bar_len.is_nan() || bar_len <= 0.0 {
            return None;
        }
        let t = (offset / bar_len).clamp(0.0, 1.0);
        Some(((t * n as f32) as usize).min(n - 1))
    }

    /// Tap on a label: animated jump to its section.
    pub fn press<E: FlatListEngine + ?Sized>(&mut self, engine: &mut E, section: usize) -> bool {
        self.dragging = None;
        let moved = self.scroll.scroll_to_section_with(engine, section, true);
        if moved {
            self.active.set(section);
        }
        moved
    }

    /// Drag along the bar. Jumps without animation, and only when the section under the finger
    /// changes. Returns the section under the finger.
    pub fn drag<E: FlatListEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        offset: f32,
        bar_len: f32,
    ) -> Option<usize> {
        let section = self.section_at(offset, bar_len)?;
        if self.dragging != Some(section) {
            atrace!(section, offset, "index bar drag");
            self.scroll.scroll_to_section_with(engine, section, false);
            self.dragging = Some(section);
        }
        Some(section)
    }

    /// Ends a drag; the last dragged section stays highlighted until the list reports another.
    pub fn release(&mut self) {
        if let Some(section) = self.dragging.take() {
            self.active.set(section);
        }
    }

    pub fn snapshot(&self) -> IndexBarState {
        IndexBarState {
            labels: self.labels.clone(),
            highlighted: self.active(),
            dragging: self.is_dragging(),
            appearance: self.appearance.clone(),
        }
    }
}
