use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{FlatDataSource, FlatListEngine, RenderedCell, SectionIndexEntry};

/// Translates logical section indexes into flat-index scroll requests.
///
/// Built per render pass over that pass's header-index table. Reacquire it after the sections
/// change; an old instance keeps targeting the old table.
#[derive(Clone, Debug)]
pub struct ScrollToSection {
    table: Arc<[SectionIndexEntry]>,
}

impl ScrollToSection {
    pub fn new(table: Arc<[SectionIndexEntry]>) -> Self {
        Self { table }
    }

    pub fn section_count(&self) -> usize {
        self.table.len()
    }

    /// Flat index of the header of `section_index`, if that section exists.
    pub fn target(&self, section_index: usize) -> Option<usize> {
        self.table.get(section_index).map(|e| e.flat_index)
    }

    /// Same as [`Self::scroll_to_section_with`] with `animated = true`.
    pub fn scroll_to_section<E: FlatListEngine + ?Sized>(
        &self,
        engine: &mut E,
        section_index: usize,
    ) -> bool {
        self.scroll_to_section_with(engine, section_index, true)
    }

    /// Issues exactly one `scroll_to_index` for an existing section.
    ///
    /// Out-of-range indexes are ignored. Returns whether a request was issued.
    pub fn scroll_to_section_with<E: FlatListEngine + ?Sized>(
        &self,
        engine: &mut E,
        section_index: usize,
        animated: bool,
    ) -> bool {
        let Some(flat_index) = self.target(section_index) else {
            sdebug!(
                section_index,
                sections = self.table.len(),
                "scroll_to_section: no such section"
            );
            return false;
        };
        strace!(section_index, flat_index, animated, "scroll_to_section");
        engine.scroll_to_index(flat_index, animated);
        true
    }
}

/// The imperative handle a caller obtains for a rendered list.
///
/// Engine operations are delegated verbatim; `scroll_to_section` is the only addition.
#[derive(Debug)]
pub struct SectionListHandle<'e, E: ?Sized> {
    engine: &'e mut E,
    scroll: ScrollToSection,
}

impl<'e, E: FlatListEngine + ?Sized> SectionListHandle<'e, E> {
    pub fn new(engine: &'e mut E, scroll: ScrollToSection) -> Self {
        Self { engine, scroll }
    }

    pub fn engine(&self) -> &E {
        &*self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut *self.engine
    }

    pub fn scroll_controller(&self) -> &ScrollToSection {
        &self.scroll
    }

    pub fn scroll_to_section(&mut self, section_index: usize) -> bool {
        self.scroll.scroll_to_section(&mut *self.engine, section_index)
    }

    pub fn scroll_to_section_with(&mut self, section_index: usize, animated: bool) -> bool {
        self.scroll
            .scroll_to_section_with(&mut *self.engine, section_index, animated)
    }
}

impl<E: FlatListEngine + ?Sized> FlatListEngine for SectionListHandle<'_, E> {
    fn render<D: FlatDataSource + ?Sized>(&mut self, source: &D) -> Vec<RenderedCell<D::Node>> {
        self.engine.render(source)
    }

    fn scroll_to_index(&mut self, index: usize, animated: bool) {
        self.engine.scroll_to_index(index, animated);
    }
}
