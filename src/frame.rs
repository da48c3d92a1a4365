/// Frame: a borrowed row selection over a table.
///
/// A frame holds an ordered mapping from frame positions to parent row
/// indices. Deduplication and filtering each produce a new frame over the
/// same table, so a query pipeline never copies cell data and can never
/// mutate its source.
use crate::column::{CellKey, Column, ColumnValue};
use crate::error::Result;
use crate::table::Table;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone)]
pub struct Frame<'a> {
    table: &'a Table,
    rows: Vec<usize>,
}

impl<'a> Frame<'a> {
    /// Every row of `table`, in table order.
    pub fn new(table: &'a Table) -> Self {
        Frame {
            table,
            rows: (0..table.len()).collect(),
        }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parent row indices, in frame order.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn column(&self, name: &str) -> Result<&'a Column> {
        self.table.column(name)
    }

    /// Keep the rows whose parent index satisfies `predicate`, preserving order.
    pub fn retain<F>(&self, mut predicate: F) -> Frame<'a>
    where
        F: FnMut(usize) -> bool,
    {
        Frame {
            table: self.table,
            rows: self.rows.iter().copied().filter(|&r| predicate(r)).collect(),
        }
    }

    /// Drop rows where `column` is missing.
    pub fn drop_null(&self, column: &str) -> Result<Frame<'a>> {
        let col = self.column(column)?;
        Ok(self.retain(|r| !col.is_null_at(r)))
    }

    /// Distinct non-null values of `column`, in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<ColumnValue>> {
        let col = self.column(column)?;
        let interner = self.table.interner();
        let mut seen: FxHashSet<CellKey> = FxHashSet::default();
        let mut values = Vec::new();

        for &r in &self.rows {
            let key = col.key(r);
            if key.is_null() || !seen.insert(key) {
                continue;
            }
            values.push(col.get(r, interner)?);
        }
        Ok(values)
    }

    /// Number of distinct non-null values of `column`.
    pub fn count_distinct(&self, column: &str) -> Result<usize> {
        let col = self.column(column)?;
        let distinct: FxHashSet<CellKey> = self
            .rows
            .iter()
            .map(|&r| col.key(r))
            .filter(|k| !k.is_null())
            .collect();
        Ok(distinct.len())
    }
}
