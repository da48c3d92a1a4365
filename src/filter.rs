/// Filter engine: conjunctions of column-equality predicates.
///
/// An empty predicate set is the "Overall" case and selects every row.
/// Predicates are independent and commutative; a row whose cell is missing
/// never satisfies a predicate on that column, and a literal the column has
/// never seen simply selects nothing.
use crate::column::{CellKey, Column, ColumnValue};
use crate::error::Result;
use crate::frame::Frame;
use std::collections::BTreeMap;

/// Mapping from column name to the value it must equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicates {
    terms: BTreeMap<String, ColumnValue>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column == value`. A later call on the same column replaces
    /// the earlier requirement.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        self.terms.insert(column.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Apply `predicates` to `frame`, preserving row order.
///
/// Fails only if a predicate names a column the table does not have.
pub fn filter<'a>(frame: &Frame<'a>, predicates: &Predicates) -> Result<Frame<'a>> {
    if predicates.is_empty() {
        return Ok(frame.clone());
    }

    let table = frame.table();
    let mut resolved: Vec<(&Column, CellKey)> = Vec::with_capacity(predicates.len());
    let mut satisfiable = true;
    for (column, value) in predicates.iter() {
        let col = table.column(column)?;
        match col.key_for(value, table.interner()) {
            Some(key) => resolved.push((col, key)),
            None => {
                log::trace!("filter literal {:?} cannot match column '{}'", value, column);
                satisfiable = false;
            }
        }
    }

    if !satisfiable {
        return Ok(frame.retain(|_| false));
    }
    Ok(frame.retain(|r| resolved.iter().all(|(col, key)| col.key(r) == *key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::table::{Schema, Table};
    use std::collections::HashMap;

    fn games() -> Table {
        let schema = Schema::new(vec![
            ("region".to_string(), ColumnType::String, true),
            ("Year".to_string(), ColumnType::Int32, false),
        ]);
        let mut table = Table::new("games".to_string(), schema);
        for (region, year) in [
            (Some("USA"), 2012),
            (Some("USA"), 2016),
            (Some("China"), 2016),
            (None, 2016),
        ] {
            let mut row = HashMap::new();
            row.insert("region".to_string(), ColumnValue::from(region));
            row.insert("Year".to_string(), ColumnValue::Int32(year));
            table.append_row(row).unwrap();
        }
        table
    }

    #[test]
    fn test_empty_predicates_select_everything() {
        let table = games();
        let frame = filter(&table.frame(), &Predicates::new()).unwrap();
        assert_eq!(frame.len(), 4);
    }

    #[test]
    fn test_single_and_combined_predicates() {
        let table = games();

        let usa = filter(&table.frame(), &Predicates::new().with("region", "USA")).unwrap();
        assert_eq!(usa.row_indices(), &[0, 1]);

        let in_2016 = filter(&table.frame(), &Predicates::new().with("Year", 2016)).unwrap();
        assert_eq!(in_2016.row_indices(), &[1, 2, 3]);

        let both = Predicates::new().with("region", "USA").with("Year", 2016);
        assert_eq!(filter(&table.frame(), &both).unwrap().row_indices(), &[1]);
    }

    #[test]
    fn test_filters_commute() {
        let table = games();
        let by_region = Predicates::new().with("region", "USA");
        let by_year = Predicates::new().with("Year", 2016);

        let a = filter(&filter(&table.frame(), &by_region).unwrap(), &by_year).unwrap();
        let b = filter(&filter(&table.frame(), &by_year).unwrap(), &by_region).unwrap();
        assert_eq!(a.row_indices(), b.row_indices());
    }

    #[test]
    fn test_unknown_values_select_nothing() {
        let table = games();
        let frame = filter(&table.frame(), &Predicates::new().with("region", "Atlantis")).unwrap();
        assert!(frame.is_empty());

        let frame = filter(&table.frame(), &Predicates::new().with("Year", 1900)).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_missing_cells_never_match() {
        let table = games();
        let frame = filter(&table.frame(), &Predicates::new().with("region", ColumnValue::Null)).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let table = games();
        assert!(filter(&table.frame(), &Predicates::new().with("Sport", "Judo")).is_err());

        let unmatched = Predicates::new().with("region", "Atlantis").with("Sport", "Judo");
        assert!(filter(&table.frame(), &unmatched).is_err());
    }
}
