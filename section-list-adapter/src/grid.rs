use alloc::vec::Vec;

use section_list::{FlatDataSource, ItemLayout, ItemType};

/// One line of the grid: a run of flat entries sharing the scroll-axis position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRow {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    /// Size in the scroll axis (largest entry in the row).
    pub size: u32,
    /// The row holds a sticky header.
    pub sticky: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placed {
    pub row: usize,
    pub column: usize,
    pub span: usize,
}

/// Flat entries packed into rows of `columns` by their resolved spans.
///
/// An entry that does not fit in what is left of the current row starts a new one, so a
/// full-span header always sits alone.
#[derive(Clone, Debug, Default)]
pub(crate) struct GridLayout {
    rows: Vec<GridRow>,
    placed: Vec<Placed>,
}

impl GridLayout {
    pub fn build<D: FlatDataSource + ?Sized>(
        source: &D,
        mut estimate: impl FnMut(ItemType) -> u32,
    ) -> Self {
        let columns = source.num_columns().max(1);
        let len = source.len();
        let sticky = source.sticky_header_indices();

        let mut rows: Vec<GridRow> = Vec::new();
        let mut placed = Vec::with_capacity(len);
        let mut column = 0usize;

        for index in 0..len {
            let mut layout = ItemLayout::default();
            source.override_item_layout(&mut layout, index, columns);
            let span = layout.span.clamp(1, columns);
            let size = layout.size.unwrap_or_else(|| {
                source
                    .item_type(index)
                    .map(&mut estimate)
                    .unwrap_or_default()
            });

            let fits = column + span <= columns;
            match rows.last_mut() {
                Some(row) if column > 0 && fits => {
                    row.end_index = index + 1;
                    row.size = row.size.max(size);
                }
                _ => {
                    column = 0;
                    rows.push(GridRow {
                        start_index: index,
                        end_index: index + 1,
                        size,
                        sticky: false,
                    });
                }
            }

            let row = rows.len() - 1;
            if sticky.binary_search(&index).is_ok() {
                rows[row].sticky = true;
            }
            placed.push(Placed { row, column, span });
            column += span;
            if column >= columns {
                column = 0;
            }
        }

        Self { rows, placed }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    #[cfg(feature = "tracing")]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn placed(&self, index: usize) -> Option<Placed> {
        self.placed.get(index).copied()
    }

    pub fn row_of(&self, index: usize) -> Option<usize> {
        self.placed.get(index).map(|p| p.row)
    }

    pub fn sticky_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.sticky)
            .map(|(i, _)| i)
            .collect()
    }
}
