/// The Olympic event table: column names, schema and record type.
///
/// One row per (athlete, event, edition), already joined with the region
/// lookup and already carrying one-hot medal indicator columns. Producing
/// that join is the loader's job; this module only fixes the shape.
use crate::column::{ColumnType, ColumnValue};
use crate::error::Result;
use crate::table::{Schema, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Column names of the event table.
pub mod columns {
    pub const NAME: &str = "Name";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const HEIGHT: &str = "Height";
    pub const WEIGHT: &str = "Weight";
    pub const TEAM: &str = "Team";
    pub const NOC: &str = "NOC";
    pub const REGION: &str = "region";
    pub const GAMES: &str = "Games";
    pub const YEAR: &str = "Year";
    pub const SEASON: &str = "Season";
    pub const CITY: &str = "City";
    pub const SPORT: &str = "Sport";
    pub const EVENT: &str = "Event";
    pub const MEDAL: &str = "Medal";
    pub const GOLD: &str = "Gold";
    pub const SILVER: &str = "Silver";
    pub const BRONZE: &str = "Bronze";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of the `Sex` column.
pub const SEX_MALE: &str = "M";
pub const SEX_FEMALE: &str = "F";

/// Schema of the joined event table.
pub fn event_schema() -> Schema {
    use columns::*;
    let col = |name: &str, ty, nullable| (name.to_string(), ty, nullable);
    Schema::new(vec![
        col(NAME, ColumnType::String, false),
        col(SEX, ColumnType::String, false),
        col(AGE, ColumnType::Float64, true),
        col(HEIGHT, ColumnType::Float64, true),
        col(WEIGHT, ColumnType::Float64, true),
        col(TEAM, ColumnType::String, false),
        col(NOC, ColumnType::String, false),
        col(REGION, ColumnType::String, true),
        col(GAMES, ColumnType::String, false),
        col(YEAR, ColumnType::Int32, false),
        col(SEASON, ColumnType::String, false),
        col(CITY, ColumnType::String, false),
        col(SPORT, ColumnType::String, false),
        col(EVENT, ColumnType::String, false),
        col(MEDAL, ColumnType::String, true),
        col(GOLD, ColumnType::Int32, false),
        col(SILVER, ColumnType::Int32, false),
        col(BRONZE, ColumnType::Int32, false),
    ])
}

/// One participation row as produced by the loader.
///
/// Field names follow the source dataset headers so loaders can deserialize
/// rows directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age", default)]
    pub age: Option<f64>,
    #[serde(rename = "Height", default)]
    pub height: Option<f64>,
    #[serde(rename = "Weight", default)]
    pub weight: Option<f64>,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "NOC")]
    pub noc: String,
    #[serde(rename = "region", default)]
    pub region: Option<String>,
    #[serde(rename = "Games")]
    pub games: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "Medal", default)]
    pub medal: Option<Medal>,
}

impl EventRecord {
    /// Convert to a table row. The one-hot columns are derived from `medal`,
    /// so they can never disagree with it.
    pub fn into_row(self) -> HashMap<String, ColumnValue> {
        use columns::*;
        let indicator = |m: Medal| ColumnValue::Int32(i32::from(self.medal == Some(m)));
        let gold = indicator(Medal::Gold);
        let silver = indicator(Medal::Silver);
        let bronze = indicator(Medal::Bronze);

        let mut row = HashMap::with_capacity(18);
        row.insert(NAME.to_string(), ColumnValue::String(self.name));
        row.insert(SEX.to_string(), ColumnValue::String(self.sex));
        row.insert(AGE.to_string(), ColumnValue::from(self.age));
        row.insert(HEIGHT.to_string(), ColumnValue::from(self.height));
        row.insert(WEIGHT.to_string(), ColumnValue::from(self.weight));
        row.insert(TEAM.to_string(), ColumnValue::String(self.team));
        row.insert(NOC.to_string(), ColumnValue::String(self.noc));
        row.insert(REGION.to_string(), ColumnValue::from(self.region));
        row.insert(GAMES.to_string(), ColumnValue::String(self.games));
        row.insert(YEAR.to_string(), ColumnValue::Int32(self.year));
        row.insert(SEASON.to_string(), ColumnValue::String(self.season));
        row.insert(CITY.to_string(), ColumnValue::String(self.city));
        row.insert(SPORT.to_string(), ColumnValue::String(self.sport));
        row.insert(EVENT.to_string(), ColumnValue::String(self.event));
        row.insert(MEDAL.to_string(), ColumnValue::from(self.medal.map(|m| m.as_str())));
        row.insert(GOLD.to_string(), gold);
        row.insert(SILVER.to_string(), silver);
        row.insert(BRONZE.to_string(), bronze);
        row
    }
}

/// Build an event table from already-joined records.
///
/// # Examples
///
/// ```
/// use olympics::{event_table, EventRecord, Medal};
///
/// let record = EventRecord {
///     name: "Michael Phelps".to_string(),
///     sex: "M".to_string(),
///     age: Some(23.0),
///     height: Some(193.0),
///     weight: Some(91.0),
///     team: "United States".to_string(),
///     noc: "USA".to_string(),
///     region: Some("USA".to_string()),
///     games: "2008 Summer".to_string(),
///     year: 2008,
///     season: "Summer".to_string(),
///     city: "Beijing".to_string(),
///     sport: "Swimming".to_string(),
///     event: "Swimming Men's 200 metres Butterfly".to_string(),
///     medal: Some(Medal::Gold),
/// };
///
/// let table = event_table(vec![record]).unwrap();
/// assert_eq!(table.get_value(0, "Gold").unwrap().as_i32(), Some(1));
/// assert_eq!(table.get_value(0, "Silver").unwrap().as_i32(), Some(0));
/// ```
pub fn event_table<I>(records: I) -> Result<Table>
where
    I: IntoIterator<Item = EventRecord>,
{
    let mut table = Table::new("athlete_events".to_string(), event_schema());
    let count = table.append_rows(records.into_iter().map(EventRecord::into_row))?;
    log::debug!("loaded {} event rows", count);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let json = r#"{
            "Name": "A Dijiang", "Sex": "M", "Age": 24.0, "Height": 180.0, "Weight": 80.0,
            "Team": "China", "NOC": "CHN", "region": "China", "Games": "1992 Summer",
            "Year": 1992, "Season": "Summer", "City": "Barcelona", "Sport": "Basketball",
            "Event": "Basketball Men's Basketball", "Medal": null
        }"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.medal, None);
        assert_eq!(record.region.as_deref(), Some("China"));

        let json = r#"{
            "Name": "X", "Sex": "F", "Team": "Unified Team", "NOC": "EUN",
            "Games": "1992 Summer", "Year": 1992, "Season": "Summer", "City": "Barcelona",
            "Sport": "Gymnastics", "Event": "Team All-Around", "Medal": "Gold"
        }"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.age, None);
        assert_eq!(record.region, None);
        assert_eq!(record.medal, Some(Medal::Gold));
    }

    #[test]
    fn test_one_hot_columns_follow_medal() {
        let record = EventRecord {
            name: "B".to_string(),
            sex: "F".to_string(),
            age: None,
            height: None,
            weight: None,
            team: "Kenya".to_string(),
            noc: "KEN".to_string(),
            region: Some("Kenya".to_string()),
            games: "2016 Summer".to_string(),
            year: 2016,
            season: "Summer".to_string(),
            city: "Rio de Janeiro".to_string(),
            sport: "Athletics".to_string(),
            event: "Marathon".to_string(),
            medal: Some(Medal::Bronze),
        };
        let table = event_table(vec![record]).unwrap();

        assert_eq!(table.get_value(0, columns::GOLD).unwrap().as_i32(), Some(0));
        assert_eq!(table.get_value(0, columns::BRONZE).unwrap().as_i32(), Some(1));
        assert_eq!(table.get_value(0, columns::MEDAL).unwrap().as_string(), Some("Bronze"));
        assert!(table.get_value(0, columns::AGE).unwrap().is_null());
    }

    #[test]
    fn test_event_schema_covers_all_columns() {
        let schema = event_schema();
        assert_eq!(schema.len(), 18);
        assert!(schema.get_column_index(columns::BRONZE).is_some());

        let table = Table::new("athlete_events".to_string(), schema);
        assert_eq!(table.column(columns::YEAR).unwrap().column_type(), ColumnType::Int32);
        assert_eq!(table.column(columns::MEDAL).unwrap().column_type(), ColumnType::String);
    }
}
