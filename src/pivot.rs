/// Pivot engine - cross-tabulates a frame into a dense 2-D matrix.
///
/// Algorithm:
/// 1. Key every row by (row dimension, column dimension), skipping rows where
///    either dimension is missing
/// 2. Reduce `value_col` per intersection (count of non-missing values, or sum)
/// 3. Sort both axes ascending and lay the result out row-major, filling
///    intersections that saw no rows with `fill`
///
/// A pivot with zero rows is a normal result. Callers rendering heatmaps
/// check [`Pivot::is_empty`] and skip the display instead of failing.
use crate::column::{CellKey, Column, ColumnValue};
use crate::error::Result;
use crate::frame::Frame;
use crate::sort::compare_values;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// How values are reduced at each intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotAggregation {
    /// Number of rows with a non-missing value
    #[default]
    Count,
    /// Sum of the numeric values
    Sum,
}

/// Dense cross-tab: `cells[i][j]` is the value for `row_labels[i]` ×
/// `column_labels[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pivot {
    pub row_dimension: String,
    pub column_dimension: String,
    pub row_labels: Vec<ColumnValue>,
    pub column_labels: Vec<ColumnValue>,
    pub cells: Vec<Vec<f64>>,
}

impl Pivot {
    /// True when no row survived; there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    /// Cell at the given labels, or `None` if either label is absent.
    pub fn get(&self, row: &ColumnValue, column: &ColumnValue) -> Option<f64> {
        let i = self.row_labels.iter().position(|l| l == row)?;
        let j = self.column_labels.iter().position(|l| l == column)?;
        Some(self.cells[i][j])
    }

    /// Sum of one row across every column.
    pub fn row_total(&self, row: &ColumnValue) -> Option<f64> {
        let i = self.row_labels.iter().position(|l| l == row)?;
        Some(self.cells[i].iter().sum())
    }
}

/// Build a `row_dim` × `col_dim` matrix reducing `value_col` with `how`.
pub fn pivot(
    frame: &Frame<'_>,
    row_dim: &str,
    col_dim: &str,
    value_col: &str,
    how: PivotAggregation,
    fill: f64,
) -> Result<Pivot> {
    let rows_col = frame.column(row_dim)?;
    let cols_col = frame.column(col_dim)?;
    let value = frame.column(value_col)?;

    // Axis key -> first parent row carrying it, for label resolution
    let mut row_axis: FxHashMap<CellKey, usize> = FxHashMap::default();
    let mut col_axis: FxHashMap<CellKey, usize> = FxHashMap::default();
    let mut acc: FxHashMap<(CellKey, CellKey), f64> = FxHashMap::default();

    for &r in frame.row_indices() {
        let rk = rows_col.key(r);
        let ck = cols_col.key(r);
        if rk.is_null() || ck.is_null() {
            continue;
        }
        row_axis.entry(rk).or_insert(r);
        col_axis.entry(ck).or_insert(r);

        let contribution = match how {
            PivotAggregation::Count if !value.is_null_at(r) => Some(1.0),
            PivotAggregation::Count => None,
            PivotAggregation::Sum => value.get_f64(r),
        };
        if let Some(v) = contribution {
            *acc.entry((rk, ck)).or_insert(0.0) += v;
        }
    }

    let row_axis = sorted_axis(frame, rows_col, row_axis)?;
    let col_axis = sorted_axis(frame, cols_col, col_axis)?;

    let cells = row_axis
        .iter()
        .map(|(rk, _)| {
            col_axis
                .iter()
                .map(|(ck, _)| acc.get(&(*rk, *ck)).copied().unwrap_or(fill))
                .collect()
        })
        .collect();

    log::trace!(
        "pivot {} x {} over {} rows -> {}x{}",
        row_dim,
        col_dim,
        frame.len(),
        row_axis.len(),
        col_axis.len()
    );

    Ok(Pivot {
        row_dimension: row_dim.to_string(),
        column_dimension: col_dim.to_string(),
        row_labels: row_axis.into_iter().map(|(_, label)| label).collect(),
        column_labels: col_axis.into_iter().map(|(_, label)| label).collect(),
        cells,
    })
}

fn sorted_axis(
    frame: &Frame<'_>,
    column: &Column,
    axis: FxHashMap<CellKey, usize>,
) -> Result<Vec<(CellKey, ColumnValue)>> {
    let interner = frame.table().interner();
    let mut labels = axis
        .into_iter()
        .map(|(key, row)| Ok((key, column.get(row, interner)?)))
        .collect::<Result<Vec<_>>>()?;
    labels.sort_by(|(_, a), (_, b)| compare_values(a, b));
    Ok(labels)
}
