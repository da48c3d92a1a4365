/// Aggregation engine: group-by with sum and count reductions.
///
/// Groups are keyed by interned cell keys. Rows whose group key is missing
/// are dropped (an unmapped region is not a region). Every output is sorted
/// ascending by group key, so callers never observe hash order.
use crate::column::{CellKey, Column, ColumnValue};
use crate::error::Result;
use crate::frame::Frame;
use crate::sort::compare_values;
use rustc_hash::{FxHashMap, FxHashSet};

/// Per-group sums, one entry per reduced column in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotals {
    pub key: ColumnValue,
    pub sums: Vec<f64>,
}

/// Per-group count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCount {
    pub key: ColumnValue,
    pub count: usize,
}

/// Walk `frame`, bucketing rows by `group`, and call `fold` for each row with
/// its bucket's accumulator. Returns (first row of the group, accumulator).
fn fold_groups<A, F>(frame: &Frame<'_>, group: &Column, init: impl Fn() -> A, mut fold: F) -> Vec<(usize, A)>
where
    F: FnMut(&mut A, usize),
{
    let mut index: FxHashMap<CellKey, usize> = FxHashMap::default();
    let mut groups: Vec<(usize, A)> = Vec::new();

    for &r in frame.row_indices() {
        let key = group.key(r);
        if key.is_null() {
            continue;
        }
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((r, init()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, r);
    }
    groups
}

/// Resolve each group's key value and sort groups ascending by it.
fn resolve_sorted<A>(frame: &Frame<'_>, group: &Column, groups: Vec<(usize, A)>) -> Result<Vec<(ColumnValue, A)>> {
    let interner = frame.table().interner();
    let mut out = groups
        .into_iter()
        .map(|(first_row, acc)| Ok((group.get(first_row, interner)?, acc)))
        .collect::<Result<Vec<_>>>()?;
    out.sort_by(|(a, _), (b, _)| compare_values(a, b));
    Ok(out)
}

/// Sum `reduce_cols` per distinct value of `group_col`.
///
/// Missing numeric cells contribute nothing.
pub fn sum_by(frame: &Frame<'_>, group_col: &str, reduce_cols: &[&str]) -> Result<Vec<GroupTotals>> {
    let group = frame.column(group_col)?;
    let reducers: Vec<&Column> = frame.table().columns(reduce_cols)?;

    let groups = fold_groups(
        frame,
        group,
        || vec![0.0; reducers.len()],
        |sums, r| {
            for (sum, col) in sums.iter_mut().zip(&reducers) {
                if let Some(v) = col.get_f64(r) {
                    *sum += v;
                }
            }
        },
    );

    log::trace!("sum_by '{}': {} rows -> {} groups", group_col, frame.len(), groups.len());
    Ok(resolve_sorted(frame, group, groups)?
        .into_iter()
        .map(|(key, sums)| GroupTotals { key, sums })
        .collect())
}

/// Count rows per distinct value of `group_col`.
pub fn count_by(frame: &Frame<'_>, group_col: &str) -> Result<Vec<GroupCount>> {
    let group = frame.column(group_col)?;
    let groups = fold_groups(frame, group, || 0usize, |count, _| *count += 1);
    Ok(resolve_sorted(frame, group, groups)?
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect())
}

/// Count distinct non-null values of `distinct_col` per value of `group_col`.
///
/// Equivalent to deduplicating on `{group_col, distinct_col}` and counting
/// the surviving rows per group, so repeated appearances within one group
/// count once.
pub fn count_distinct_by(frame: &Frame<'_>, group_col: &str, distinct_col: &str) -> Result<Vec<GroupCount>> {
    let group = frame.column(group_col)?;
    let distinct = frame.column(distinct_col)?;

    let groups = fold_groups(frame, group, || FxHashSet::<CellKey>::default(), |seen, r| {
        let key = distinct.key(r);
        if !key.is_null() {
            seen.insert(key);
        }
    });

    Ok(resolve_sorted(frame, group, groups)?
        .into_iter()
        .map(|(key, seen)| GroupCount { key, count: seen.len() })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::table::{Schema, Table};
    use std::collections::HashMap;

    fn medals() -> Table {
        let schema = Schema::new(vec![
            ("region".to_string(), ColumnType::String, true),
            ("Year".to_string(), ColumnType::Int32, false),
            ("Name".to_string(), ColumnType::String, false),
            ("Gold".to_string(), ColumnType::Int32, false),
            ("Silver".to_string(), ColumnType::Int32, false),
        ]);
        let mut table = Table::new("medals".to_string(), schema);
        for (region, year, name, gold, silver) in [
            (Some("Norway"), 2018, "Bjorgen", 1, 0),
            (Some("Germany"), 2014, "Neuner", 0, 1),
            (Some("Norway"), 2014, "Bjorgen", 1, 1),
            (None, 2014, "Unmapped", 1, 0),
            (Some("Germany"), 2018, "Dahlmeier", 1, 0),
            (Some("Norway"), 2018, "Johaug", 0, 0),
        ] {
            let mut row = HashMap::new();
            row.insert("region".to_string(), ColumnValue::from(region));
            row.insert("Year".to_string(), ColumnValue::Int32(year));
            row.insert("Name".to_string(), ColumnValue::from(name));
            row.insert("Gold".to_string(), ColumnValue::Int32(gold));
            row.insert("Silver".to_string(), ColumnValue::Int32(silver));
            table.append_row(row).unwrap();
        }
        table
    }

    #[test]
    fn test_sum_by_drops_missing_groups() {
        let table = medals();
        let totals = sum_by(&table.frame(), "region", &["Gold", "Silver"]).unwrap();

        assert_eq!(
            totals,
            vec![
                GroupTotals { key: ColumnValue::from("Germany"), sums: vec![1.0, 1.0] },
                GroupTotals { key: ColumnValue::from("Norway"), sums: vec![2.0, 1.0] },
            ]
        );
    }

    #[test]
    fn test_count_by_sorted_ascending() {
        let table = medals();
        let counts = count_by(&table.frame(), "Year").unwrap();
        assert_eq!(
            counts,
            vec![
                GroupCount { key: ColumnValue::Int32(2014), count: 3 },
                GroupCount { key: ColumnValue::Int32(2018), count: 3 },
            ]
        );
    }

    #[test]
    fn test_count_distinct_by() {
        let table = medals();
        let counts = count_distinct_by(&table.frame(), "Year", "region").unwrap();
        // 2014: Germany, Norway (unmapped excluded); 2018: Norway, Germany
        assert_eq!(counts[0], GroupCount { key: ColumnValue::Int32(2014), count: 2 });
        assert_eq!(counts[1], GroupCount { key: ColumnValue::Int32(2018), count: 2 });

        let names = count_distinct_by(&table.frame(), "region", "Name").unwrap();
        assert_eq!(names[1], GroupCount { key: ColumnValue::from("Norway"), count: 2 });
    }

    #[test]
    fn test_empty_frame_yields_no_groups() {
        let table = medals();
        let empty = table.frame().retain(|_| false);
        assert!(sum_by(&empty, "region", &["Gold"]).unwrap().is_empty());
        assert!(count_by(&empty, "Year").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_reduce_column() {
        let table = medals();
        assert!(sum_by(&table.frame(), "region", &["Bronze"]).is_err());
    }
}
