use crate::{FlatEntry, FlatList, Section};

/// Which separator renderer a boundary uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeparatorKind {
    /// Between two entries where the leading one is a row.
    Item,
    /// After a section header.
    Section,
}

/// Where a separator sits relative to the cell that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    Before,
    After,
}

/// Arguments handed to a separator renderer.
pub struct SeparatorProps<'a, S: Section> {
    /// Flat index of the leading entry.
    pub index: usize,
    pub leading_item: FlatEntry<'a, S>,
    pub trailing_item: FlatEntry<'a, S>,
}

impl<S: Section> Clone for SeparatorProps<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Section> Copy for SeparatorProps<'_, S> {}

impl<S> core::fmt::Debug for SeparatorProps<'_, S>
where
    S: Section + core::fmt::Debug,
    S::Row: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeparatorProps")
            .field("index", &self.index)
            .field("leading_item", &self.leading_item)
            .field("trailing_item", &self.trailing_item)
            .finish()
    }
}

/// The separator owned by one cell.
pub struct SeparatorSlot<'a, S: Section> {
    pub kind: SeparatorKind,
    pub placement: Placement,
    pub props: SeparatorProps<'a, S>,
}

/// Picks the separator rendered alongside the entry at `index`.
///
/// The boundary considered is always `index`/`index + 1` in data order, so the last entry owns
/// none. Inverted lists draw it before the cell's content because their visual order runs
/// against data order.
pub fn dispatch_separator<'a, S: Section>(
    flat: &FlatList<'a, S>,
    index: usize,
    inverted: bool,
) -> Option<SeparatorSlot<'a, S>> {
    let leading_item = flat.get(index)?;
    let trailing_item = flat.get(index.checked_add(1)?)?;
    let kind = match leading_item {
        FlatEntry::Header { .. } => SeparatorKind::Section,
        FlatEntry::Row { .. } => SeparatorKind::Item,
    };
    let placement = if inverted {
        Placement::Before
    } else {
        Placement::After
    };
    Some(SeparatorSlot {
        kind,
        placement,
        props: SeparatorProps {
            index,
            leading_item,
            trailing_item,
        },
    })
}
