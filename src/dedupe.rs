/// Deduplication engine.
///
/// `dedupe` keeps the first row for every distinct combination of key
/// values and preserves frame order otherwise. Missing values form their own
/// equality class, so two rows both missing a key column collapse together.
///
/// Two identities are used across the query layer:
///
/// - [`MEDAL_IDENTITY`]: one real medal award. A team gold appears once per
///   team member; summing medals without deduplicating on this key
///   overcounts by team size.
/// - [`ATHLETE_IDENTITY`]: one real athlete, who appears once per event
///   entered.
///
/// # Examples
///
/// ```
/// use olympics::{dedupe, ColumnType, ColumnValue, Schema, Table};
/// use std::collections::HashMap;
///
/// let schema = Schema::new(vec![
///     ("Name".to_string(), ColumnType::String, false),
///     ("Event".to_string(), ColumnType::String, false),
/// ]);
/// let mut table = Table::new("entries".to_string(), schema);
/// for event in ["100m", "200m"] {
///     let mut row = HashMap::new();
///     row.insert("Name".to_string(), ColumnValue::from("Usain Bolt"));
///     row.insert("Event".to_string(), ColumnValue::from(event));
///     table.append_row(row).unwrap();
/// }
///
/// let athletes = dedupe(&table.frame(), &["Name"]).unwrap();
/// assert_eq!(athletes.len(), 1);
/// ```
use crate::column::{CellKey, Column};
use crate::error::Result;
use crate::frame::Frame;
use crate::record::columns;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Columns identifying one distinct medal award.
pub const MEDAL_IDENTITY: [&str; 8] = [
    columns::TEAM,
    columns::NOC,
    columns::GAMES,
    columns::YEAR,
    columns::CITY,
    columns::SPORT,
    columns::EVENT,
    columns::MEDAL,
];

/// Columns identifying one distinct athlete.
pub const ATHLETE_IDENTITY: [&str; 2] = [columns::NAME, columns::REGION];

type RowKey = SmallVec<[CellKey; 8]>;

/// Keep the first occurrence of each distinct `key_columns` combination.
///
/// An empty key set treats every row as identical and keeps at most one.
pub fn dedupe<'a>(frame: &Frame<'a>, key_columns: &[&str]) -> Result<Frame<'a>> {
    let cols: Vec<&Column> = frame.table().columns(key_columns)?;
    let mut seen: FxHashSet<RowKey> = FxHashSet::default();

    let deduped = frame.retain(|r| {
        let key: RowKey = cols.iter().map(|c| c.key(r)).collect();
        seen.insert(key)
    });

    log::trace!(
        "dedupe on {:?}: {} -> {} rows",
        key_columns,
        frame.len(),
        deduped.len()
    );
    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnType, ColumnValue};
    use crate::table::{Schema, Table};
    use std::collections::HashMap;

    fn entries(rows: &[(&str, &str, Option<&str>)]) -> Table {
        let schema = Schema::new(vec![
            ("Name".to_string(), ColumnType::String, false),
            ("Event".to_string(), ColumnType::String, false),
            ("Medal".to_string(), ColumnType::String, true),
        ]);
        let mut table = Table::new("entries".to_string(), schema);
        for (name, event, medal) in rows {
            let mut row = HashMap::new();
            row.insert("Name".to_string(), ColumnValue::from(*name));
            row.insert("Event".to_string(), ColumnValue::from(*event));
            row.insert("Medal".to_string(), ColumnValue::from(*medal));
            table.append_row(row).unwrap();
        }
        table
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_in_order() {
        let table = entries(&[
            ("B", "Relay", Some("Gold")),
            ("A", "Relay", Some("Gold")),
            ("B", "Relay", Some("Gold")),
            ("A", "Sprint", None),
        ]);

        let frame = dedupe(&table.frame(), &["Name", "Event"]).unwrap();
        assert_eq!(frame.row_indices(), &[0, 1, 3]);

        let by_event = dedupe(&table.frame(), &["Event", "Medal"]).unwrap();
        assert_eq!(by_event.row_indices(), &[0, 3]);
    }

    #[test]
    fn test_dedupe_groups_missing_values_together() {
        let table = entries(&[
            ("A", "Relay", None),
            ("B", "Relay", None),
            ("C", "Relay", Some("Bronze")),
        ]);

        let frame = dedupe(&table.frame(), &["Event", "Medal"]).unwrap();
        assert_eq!(frame.row_indices(), &[0, 2]);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let table = entries(&[
            ("A", "Relay", Some("Gold")),
            ("A", "Relay", Some("Gold")),
            ("B", "Relay", None),
            ("B", "Sprint", None),
            ("B", "Relay", None),
        ]);
        let keys = ["Name", "Medal"];

        let once = dedupe(&table.frame(), &keys).unwrap();
        let twice = dedupe(&once, &keys).unwrap();
        assert_eq!(once.row_indices(), twice.row_indices());
    }

    #[test]
    fn test_dedupe_respects_input_frame() {
        let table = entries(&[
            ("A", "Relay", Some("Gold")),
            ("A", "Relay", Some("Gold")),
            ("B", "Relay", Some("Gold")),
        ]);
        let tail = table.frame().retain(|r| r > 0);

        let frame = dedupe(&tail, &["Event"]).unwrap();
        assert_eq!(frame.row_indices(), &[1]);
    }

    #[test]
    fn test_dedupe_unknown_column() {
        let table = entries(&[("A", "Relay", None)]);
        assert!(dedupe(&table.frame(), &["Team"]).is_err());
    }

    #[test]
    fn test_dedupe_empty_keys() {
        let table = entries(&[("A", "Relay", None), ("B", "Sprint", None)]);
        assert_eq!(dedupe(&table.frame(), &[]).unwrap().len(), 1);
    }
}
