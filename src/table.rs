/// Table Implementation
///
/// A Table is a collection of typed columns with a schema. Tables are
/// append-only: they are loaded once and then queried many times through
/// borrowed `Frame`s, so no query can mutate the data it reads.
///
/// # Examples
///
/// ```
/// use olympics::{Table, Schema, ColumnType, ColumnValue};
/// use std::collections::HashMap;
///
/// let schema = Schema::new(vec![
///     ("Name".to_string(), ColumnType::String, false),
///     ("Year".to_string(), ColumnType::Int32, false),
///     ("region".to_string(), ColumnType::String, true),
/// ]);
///
/// let mut table = Table::new("events".to_string(), schema);
///
/// let mut row = HashMap::new();
/// row.insert("Name".to_string(), ColumnValue::from("Paavo Nurmi"));
/// row.insert("Year".to_string(), ColumnValue::Int32(1924));
/// row.insert("region".to_string(), ColumnValue::from("Finland"));
/// table.append_row(row).unwrap();
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get_value(0, "Name").unwrap().as_string(), Some("Paavo Nurmi"));
/// ```
use crate::column::{Column, ColumnType, ColumnValue};
use crate::error::{Result, TableError};
use crate::frame::Frame;
use crate::interner::{InternerStats, StringInterner};
use std::collections::HashMap;

/// Table schema: ordered `(name, type, nullable)` triples.
///
/// # Examples
///
/// ```
/// use olympics::{Schema, ColumnType};
///
/// let schema = Schema::new(vec![
///     ("NOC".to_string(), ColumnType::String, false),
///     ("region".to_string(), ColumnType::String, true),
/// ]);
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.get_column_index("region"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<(String, ColumnType, bool)>,
}

impl Schema {
    pub fn new(columns: Vec<(String, ColumnType, bool)>) -> Self {
        Schema { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get_column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _, _)| name.as_str()).collect()
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _, _)| n == name)
    }
}

/// Root table owning its columns and the string interner they share.
pub struct Table {
    name: String,
    schema: Schema,
    columns: Vec<Column>,
    row_count: usize,
    interner: StringInterner,
}

impl Table {
    pub fn new(name: String, schema: Schema) -> Self {
        let columns = schema
            .columns
            .iter()
            .map(|(col_name, col_type, nullable)| Column::new(col_name.clone(), *col_type, *nullable))
            .collect();

        Table {
            name,
            schema,
            columns,
            row_count: 0,
            interner: StringInterner::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_stats(&self) -> InternerStats {
        self.interner.stats()
    }

    /// Look up a column by name.
    ///
    /// Every engine resolves its columns through here first, so a query
    /// naming a column the table lacks fails before scanning any row.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.schema
            .get_column_index(name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Resolve several columns at once, preserving order.
    pub fn columns(&self, names: &[&str]) -> Result<Vec<&Column>> {
        names.iter().map(|name| self.column(name)).collect()
    }

    pub fn get_value(&self, row: usize, column: &str) -> Result<ColumnValue> {
        if row >= self.row_count {
            return Err(TableError::RowOutOfRange { row, len: self.row_count });
        }
        self.column(column)?.get(row, &self.interner)
    }

    pub fn get_row(&self, row: usize) -> Result<HashMap<String, ColumnValue>> {
        if row >= self.row_count {
            return Err(TableError::RowOutOfRange { row, len: self.row_count });
        }

        let mut result = HashMap::with_capacity(self.columns.len());
        for col in &self.columns {
            result.insert(col.name().to_string(), col.get(row, &self.interner)?);
        }
        Ok(result)
    }

    /// Append one row. Every schema column must be present and well-typed;
    /// the row is validated in full before any column is touched.
    pub fn append_row(&mut self, mut row: HashMap<String, ColumnValue>) -> Result<()> {
        for col in &self.columns {
            let value = row
                .get(col.name())
                .ok_or_else(|| TableError::MissingValue(col.name().to_string()))?;
            col.validate(value)?;
        }

        for col in self.columns.iter_mut() {
            let value = row.remove(col.name()).unwrap_or(ColumnValue::Null);
            col.append(value, &mut self.interner)?;
        }

        self.row_count += 1;
        Ok(())
    }

    /// Append multiple rows, stopping at the first invalid one.
    ///
    /// Returns the number of rows appended.
    pub fn append_rows<I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = HashMap<String, ColumnValue>>,
    {
        let mut count = 0;
        for row in rows {
            self.append_row(row)?;
            count += 1;
        }
        Ok(count)
    }

    /// A frame selecting every row of this table, in table order.
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(self)
    }

    pub fn iter_rows(&self) -> TableRowIterator<'_> {
        TableRowIterator { table: self, index: 0 }
    }
}

pub struct TableRowIterator<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Iterator for TableRowIterator<'a> {
    type Item = HashMap<String, ColumnValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.table.len() {
            return None;
        }
        let row = self.table.get_row(self.index).ok();
        self.index += 1;
        row
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("columns", &self.schema.get_column_names())
            .field("rows", &self.row_count)
            .finish()
    }
}
