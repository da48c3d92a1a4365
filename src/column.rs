/// Column Implementation
///
/// A Column is a typed, contiguous, append-only container indexed by row.
/// Nullable columns carry a parallel vector of null flags.
///
/// # String Interning
///
/// String cells are stored as `StringId`s into the owning table's
/// `StringInterner`. Reading a string back therefore needs the interner,
/// while keyed operations (dedup, grouping, equality filters) work directly
/// on the integer IDs through `CellKey`.
use crate::error::{Result, TableError};
use crate::interner::{StringId, StringInterner};
use serde::Serialize;
use std::fmt::{self, Debug};

/// Column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Int32,
    Int64,
    Float64,
    String,
    Bool,
}

/// A single cell value, decoupled from storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Bool(bool),
    Null,
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ColumnValue::Int32(v) => Some(*v),
            ColumnValue::Int64(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int32(v) => Some(*v as i64),
            ColumnValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Int32(v) => Some(*v as f64),
            ColumnValue::Int64(v) => Some(*v as f64),
            ColumnValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ColumnValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Int32(v) => write!(f, "{}", v),
            ColumnValue::Int64(v) => write!(f, "{}", v),
            ColumnValue::Float64(v) => write!(f, "{}", v),
            ColumnValue::String(v) => f.write_str(v),
            ColumnValue::Bool(v) => write!(f, "{}", v),
            ColumnValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::String(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::String(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        ColumnValue::Int32(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Float64(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ColumnValue::Null)
    }
}

/// A normalized, hashable cell used as a key in dedup, group-by and filters.
///
/// Null is its own equality class, so two rows missing the same column
/// compare equal on it. Floats are keyed by bit pattern with `-0.0` folded
/// into `0.0` and every NaN folded into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey {
    Null,
    Int(i64),
    Float(u64),
    Str(StringId),
    Bool(bool),
}

impl CellKey {
    fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            CellKey::Float(u64::MAX)
        } else if v == 0.0 {
            CellKey::Float(0.0f64.to_bits())
        } else {
            CellKey::Float(v.to_bits())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellKey::Null)
    }
}

#[derive(Debug, Clone)]
enum ColumnData {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    String(Vec<StringId>),
    Bool(Vec<bool>),
}

impl ColumnData {
    fn for_type(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int32 => ColumnData::Int32(Vec::new()),
            ColumnType::Int64 => ColumnData::Int64(Vec::new()),
            ColumnType::Float64 => ColumnData::Float64(Vec::new()),
            ColumnType::String => ColumnData::String(Vec::new()),
            ColumnType::Bool => ColumnData::Bool(Vec::new()),
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::String(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
        }
    }
}

/// Typed column with optional null flags.
pub struct Column {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    data: ColumnData,
    null_flags: Option<Vec<bool>>,
}

impl Column {
    pub fn new(name: String, column_type: ColumnType, nullable: bool) -> Self {
        Column {
            name,
            column_type,
            nullable,
            data: ColumnData::for_type(column_type),
            null_flags: if nullable { Some(Vec::new()) } else { None },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check a value against this column's type before any storage is touched.
    ///
    /// Int32 literals are accepted into Int64 and Float64 columns.
    pub(crate) fn validate(&self, value: &ColumnValue) -> Result<()> {
        let ok = match (value, self.column_type) {
            (ColumnValue::Null, _) => {
                if !self.nullable {
                    return Err(TableError::NotNullable(self.name.clone()));
                }
                true
            }
            (ColumnValue::Int32(_), ColumnType::Int32 | ColumnType::Int64 | ColumnType::Float64) => true,
            (ColumnValue::Int64(_), ColumnType::Int64) => true,
            (ColumnValue::Float64(_), ColumnType::Float64) => true,
            (ColumnValue::String(_), ColumnType::String) => true,
            (ColumnValue::Bool(_), ColumnType::Bool) => true,
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(TableError::TypeMismatch {
                column: self.name.clone(),
                expected: self.column_type,
                found: format!("{:?}", value),
            })
        }
    }

    pub(crate) fn append(&mut self, value: ColumnValue, interner: &mut StringInterner) -> Result<()> {
        self.validate(&value)?;

        let is_null = value.is_null();
        if let Some(ref mut flags) = self.null_flags {
            flags.push(is_null);
        }

        match (&mut self.data, value) {
            (ColumnData::Int32(v), ColumnValue::Int32(x)) => v.push(x),
            (ColumnData::Int32(v), _) => v.push(0),
            (ColumnData::Int64(v), ColumnValue::Int64(x)) => v.push(x),
            (ColumnData::Int64(v), ColumnValue::Int32(x)) => v.push(x as i64),
            (ColumnData::Int64(v), _) => v.push(0),
            (ColumnData::Float64(v), ColumnValue::Float64(x)) => v.push(x),
            (ColumnData::Float64(v), ColumnValue::Int32(x)) => v.push(x as f64),
            (ColumnData::Float64(v), _) => v.push(0.0),
            (ColumnData::String(v), ColumnValue::String(s)) => v.push(interner.intern(&s)),
            // Placeholder for null; never resolved because the null flag wins
            (ColumnData::String(v), _) => v.push(StringId::MAX),
            (ColumnData::Bool(v), ColumnValue::Bool(x)) => v.push(x),
            (ColumnData::Bool(v), _) => v.push(false),
        }

        Ok(())
    }

    /// Check if a value at index is null (fast path without materializing it).
    #[inline]
    pub fn is_null_at(&self, index: usize) -> bool {
        match self.null_flags {
            Some(ref flags) => flags.get(index).copied().unwrap_or(false),
            None => false,
        }
    }

    /// Hashable key for the cell at `index`.
    #[inline]
    pub fn key(&self, index: usize) -> CellKey {
        if self.is_null_at(index) {
            return CellKey::Null;
        }
        match &self.data {
            ColumnData::Int32(v) => v.get(index).map_or(CellKey::Null, |x| CellKey::Int(*x as i64)),
            ColumnData::Int64(v) => v.get(index).map_or(CellKey::Null, |x| CellKey::Int(*x)),
            ColumnData::Float64(v) => v.get(index).map_or(CellKey::Null, |x| CellKey::from_f64(*x)),
            ColumnData::String(v) => v.get(index).map_or(CellKey::Null, |x| CellKey::Str(*x)),
            ColumnData::Bool(v) => v.get(index).map_or(CellKey::Null, |x| CellKey::Bool(*x)),
        }
    }

    /// Translate a literal into this column's key space.
    ///
    /// Returns `None` when no cell of this column could ever equal the
    /// literal: a null literal, an incompatible type, or a string that was
    /// never interned.
    pub fn key_for(&self, value: &ColumnValue, interner: &StringInterner) -> Option<CellKey> {
        match (self.column_type, value) {
            (_, ColumnValue::Null) => None,
            (ColumnType::Int32 | ColumnType::Int64, v) => match v {
                ColumnValue::Float64(f) if f.fract() == 0.0 => Some(CellKey::Int(*f as i64)),
                other => other.as_i64().map(CellKey::Int),
            },
            (ColumnType::Float64, v) => v.as_f64().map(CellKey::from_f64),
            (ColumnType::String, ColumnValue::String(s)) => interner.lookup(s).map(CellKey::Str),
            (ColumnType::Bool, ColumnValue::Bool(b)) => Some(CellKey::Bool(*b)),
            _ => None,
        }
    }

    pub fn get(&self, index: usize, interner: &StringInterner) -> Result<ColumnValue> {
        if index >= self.len() {
            return Err(TableError::RowOutOfRange { row: index, len: self.len() });
        }
        if self.is_null_at(index) {
            return Ok(ColumnValue::Null);
        }

        let value = match &self.data {
            ColumnData::Int32(v) => ColumnValue::Int32(v[index]),
            ColumnData::Int64(v) => ColumnValue::Int64(v[index]),
            ColumnData::Float64(v) => ColumnValue::Float64(v[index]),
            ColumnData::String(v) => interner
                .resolve(v[index])
                .map(|s| ColumnValue::String(s.to_string()))
                .unwrap_or(ColumnValue::Null),
            ColumnData::Bool(v) => ColumnValue::Bool(v[index]),
        };
        Ok(value)
    }

    /// Borrow the string at `index` without cloning it.
    pub fn get_str<'a>(&self, index: usize, interner: &'a StringInterner) -> Option<&'a str> {
        if self.is_null_at(index) {
            return None;
        }
        match &self.data {
            ColumnData::String(v) => v.get(index).and_then(|id| interner.resolve(*id)),
            _ => None,
        }
    }

    /// Fast numeric access used by aggregation.
    /// Returns None if the value is null, not numeric, or out of bounds.
    #[inline]
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        if self.is_null_at(index) {
            return None;
        }
        match &self.data {
            ColumnData::Int32(v) => v.get(index).map(|x| *x as f64),
            ColumnData::Int64(v) => v.get(index).map(|x| *x as f64),
            ColumnData::Float64(v) => v.get(index).copied(),
            ColumnData::Bool(v) => v.get(index).map(|x| if *x { 1.0 } else { 0.0 }),
            ColumnData::String(_) => None,
        }
    }
}

impl Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column {{ name: '{}', type: {:?}, nullable: {}, len: {} }}",
            self.name,
            self.column_type,
            self.nullable,
            self.len()
        )
    }
}
