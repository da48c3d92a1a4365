/// Query facade: the named analytical questions, each a fixed composition
/// of dedupe, filter, aggregate and pivot over a borrowed event table.
///
/// Every query is a pure function of (table, parameters). Optional
/// parameters use `None` for "no filter on this dimension"; see
/// [`QueryConfig::selector`](crate::QueryConfig::selector) for decoding UI
/// selections.
use crate::aggregate::{count_by, count_distinct_by, sum_by};
use crate::column::{Column, ColumnType, ColumnValue};
use crate::dedupe::{dedupe, ATHLETE_IDENTITY, MEDAL_IDENTITY};
use crate::error::{Result, TableError};
use crate::filter::{filter, Predicates};
use crate::pivot::{pivot, Pivot, PivotAggregation};
use crate::record::columns::*;
use crate::record::{SEX_FEMALE, SEX_MALE};
use crate::sort::compare_values;
use crate::table::Table;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// The 1906 Intercalated Games are not counted as an edition.
const INTERCALATED_YEAR: i32 = 1906;

/// Medal-identity key used by the per-country heatmap.
const HEATMAP_MEDAL_KEY: [&str; 5] = [YEAR, SPORT, CITY, REGION, MEDAL];

/// Event-identity key used by the global sport heatmap.
const EVENT_KEY: [&str; 3] = [YEAR, SPORT, EVENT];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedalTallyRow {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Gold")]
    pub gold: u32,
    #[serde(rename = "Silver")]
    pub silver: u32,
    #[serde(rename = "Bronze")]
    pub bronze: u32,
    #[serde(rename = "Total")]
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedalTally {
    pub title: String,
    pub rows: Vec<MedalTallyRow>,
}

/// One point of a per-edition series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    #[serde(rename = "Edition")]
    pub year: i32,
    #[serde(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Medals")]
    pub medals: usize,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "region")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SexParticipationPoint {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Male")]
    pub male: usize,
    #[serde(rename = "Female")]
    pub female: usize,
}

/// One row of the demographic slice: a unique athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteProfile {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "Height")]
    pub height: Option<f64>,
    #[serde(rename = "Weight")]
    pub weight: Option<f64>,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "region")]
    pub region: Option<String>,
    #[serde(rename = "Medal")]
    pub medal: Option<String>,
}

/// Headline counts for the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopStatistics {
    #[serde(rename = "Editions")]
    pub editions: usize,
    #[serde(rename = "Cities")]
    pub cities: usize,
    #[serde(rename = "Sports")]
    pub sports: usize,
    #[serde(rename = "Events")]
    pub events: usize,
    #[serde(rename = "Athletes")]
    pub athletes: usize,
    #[serde(rename = "Nations")]
    pub nations: usize,
}

/// Values a presentation layer can offer in its pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOptions {
    /// Most recent first
    pub years: Vec<i32>,
    /// Alphabetical, unmapped regions excluded
    pub regions: Vec<String>,
}

fn year_of(value: &ColumnValue) -> Result<i32> {
    value.as_i32().ok_or_else(|| TableError::TypeMismatch {
        column: YEAR.to_string(),
        expected: ColumnType::Int32,
        found: format!("{:?}", value),
    })
}

fn owned_string(value: ColumnValue) -> String {
    match value {
        ColumnValue::String(s) => s,
        other => other.to_string(),
    }
}

/// Title describing which of the four selector combinations is in effect.
pub fn tally_title(year: Option<i32>, region: Option<&str>) -> String {
    match (year, region) {
        (None, None) => "Overall Performance".to_string(),
        (None, Some(region)) => format!("{}'s Overall Performance", region),
        (Some(year), None) => format!("Overall Performance in {}", year),
        (Some(year), Some(region)) => format!("{}'s Performance in {}", region, year),
    }
}

/// Medal tally per region, optionally restricted to one edition and/or one
/// region.
///
/// Rows are deduplicated on the medal-identity key before summing, so a team
/// medal counts once. Sorted by gold, silver, bronze (all descending), then
/// region name.
///
/// # Examples
///
/// ```
/// use olympics::{event_table, medal_tally, EventRecord, Medal};
///
/// let player = |name: &str| EventRecord {
///     name: name.to_string(),
///     sex: "M".to_string(),
///     age: None,
///     height: None,
///     weight: None,
///     team: "USA".to_string(),
///     noc: "USA".to_string(),
///     region: Some("USA".to_string()),
///     games: "2016 Summer".to_string(),
///     year: 2016,
///     season: "Summer".to_string(),
///     city: "Rio".to_string(),
///     sport: "Basketball".to_string(),
///     event: "Men's".to_string(),
///     medal: Some(Medal::Gold),
/// };
/// let table = event_table(vec![player("A"), player("B")]).unwrap();
///
/// let tally = medal_tally(&table, Some(2016), Some("USA")).unwrap();
/// assert_eq!(tally.title, "USA's Performance in 2016");
/// assert_eq!(tally.rows[0].gold, 1);
/// ```
pub fn medal_tally(table: &Table, year: Option<i32>, region: Option<&str>) -> Result<MedalTally> {
    let mut predicates = Predicates::new();
    if let Some(year) = year {
        predicates.insert(YEAR, year);
    }
    if let Some(region) = region {
        predicates.insert(REGION, region);
    }

    let awards = dedupe(&table.frame(), &MEDAL_IDENTITY)?;
    let selected = filter(&awards, &predicates)?;

    let mut rows: Vec<MedalTallyRow> = sum_by(&selected, REGION, &[GOLD, SILVER, BRONZE])?
        .into_iter()
        .map(|group| {
            let gold = group.sums[0] as u32;
            let silver = group.sums[1] as u32;
            let bronze = group.sums[2] as u32;
            MedalTallyRow {
                region: owned_string(group.key),
                gold,
                silver,
                bronze,
                total: gold + silver + bronze,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.gold
            .cmp(&a.gold)
            .then(b.silver.cmp(&a.silver))
            .then(b.bronze.cmp(&a.bronze))
            .then_with(|| a.region.cmp(&b.region))
    });

    log::debug!(
        "medal_tally year={:?} region={:?}: {} awards selected, {} regions",
        year,
        region,
        selected.len(),
        rows.len()
    );

    Ok(MedalTally {
        title: tally_title(year, region),
        rows,
    })
}

/// Number of distinct `entity_column` values per edition, ascending by year.
///
/// Use `region` for nations, `Event` for events and `Name` for athletes over
/// time. Missing entity values are not counted.
pub fn entity_count_over_time(table: &Table, entity_column: &str) -> Result<Vec<SeriesPoint>> {
    let appearances = dedupe(&table.frame(), &[YEAR, entity_column])?;
    let series = count_distinct_by(&appearances, YEAR, entity_column)?
        .into_iter()
        .map(|g| Ok(SeriesPoint { year: year_of(&g.key)?, count: g.count }))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("entity_count_over_time '{}': {} editions", entity_column, series.len());
    Ok(series)
}

/// Distinct medals won by `region` per edition, ascending by year.
pub fn yearwise_medal_count(table: &Table, region: &str) -> Result<Vec<SeriesPoint>> {
    let medalled = table.frame().drop_null(MEDAL)?;
    let awards = dedupe(&medalled, &MEDAL_IDENTITY)?;
    let country = filter(&awards, &Predicates::new().with(REGION, region))?;

    let series = count_by(&country, YEAR)?
        .into_iter()
        .map(|g| Ok(SeriesPoint { year: year_of(&g.key)?, count: g.count }))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("yearwise_medal_count '{}': {} editions", region, series.len());
    Ok(series)
}

/// Most decorated athletes by raw medal-row count, at most `top` rows.
///
/// Ties on medal count are broken by name. Each athlete carries the sport
/// and region of their first medal row in table order; an athlete with
/// medals in several sports reports only that first one.
pub fn leaderboard(
    table: &Table,
    sport: Option<&str>,
    region: Option<&str>,
    top: usize,
) -> Result<Vec<LeaderboardEntry>> {
    let mut predicates = Predicates::new();
    if let Some(sport) = sport {
        predicates.insert(SPORT, sport);
    }
    if let Some(region) = region {
        predicates.insert(REGION, region);
    }

    let medalled = filter(&table.frame().drop_null(MEDAL)?, &predicates)?;

    // count_by returns names ascending; the stable sort keeps that as the tie-break
    let mut ranked = count_by(&medalled, NAME)?;
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top);

    let interner = table.interner();
    let names = table.column(NAME)?;
    let sports = table.column(SPORT)?;
    let regions = table.column(REGION)?;

    let mut first_row: FxHashMap<&str, usize> = FxHashMap::default();
    for &r in medalled.row_indices() {
        if let Some(name) = names.get_str(r, interner) {
            first_row.entry(name).or_insert(r);
        }
    }

    let mut entries = Vec::with_capacity(ranked.len());
    for group in ranked {
        let name = owned_string(group.key);
        let (sport, region) = match first_row.get(name.as_str()) {
            Some(&r) => (
                sports.get_str(r, interner).unwrap_or_default().to_string(),
                regions.get_str(r, interner).map(str::to_string),
            ),
            None => (String::new(), None),
        };
        entries.push(LeaderboardEntry {
            name,
            medals: group.count,
            sport,
            region,
        });
    }

    log::debug!(
        "leaderboard sport={:?} region={:?}: {} medal rows, {} entries",
        sport,
        region,
        medalled.len(),
        entries.len()
    );
    Ok(entries)
}

/// Sport × year medal counts for one region, zero-filled.
///
/// A region without medals yields an empty pivot.
pub fn country_event_heatmap(table: &Table, region: &str) -> Result<Pivot> {
    let medalled = table.frame().drop_null(MEDAL)?;
    let awards = dedupe(&medalled, &HEATMAP_MEDAL_KEY)?;
    let country = filter(&awards, &Predicates::new().with(REGION, region))?;

    let heatmap = pivot(&country, SPORT, YEAR, MEDAL, PivotAggregation::Count, 0.0)?;
    log::debug!("country_event_heatmap '{}': {:?}", region, heatmap.shape());
    Ok(heatmap)
}

/// Sport × year count of distinct events across all regions, zero-filled.
pub fn sport_event_heatmap(table: &Table) -> Result<Pivot> {
    let events = dedupe(&table.frame(), &EVENT_KEY)?;
    let heatmap = pivot(&events, SPORT, YEAR, EVENT, PivotAggregation::Count, 0.0)?;
    log::debug!("sport_event_heatmap: {:?}", heatmap.shape());
    Ok(heatmap)
}

/// Distinct male and female athletes per edition, ascending by year.
///
/// Athletes are first reduced to one row per athlete identity; a year where
/// only one sex appears reports 0 for the other.
pub fn sex_participation_over_time(table: &Table) -> Result<Vec<SexParticipationPoint>> {
    let athletes = dedupe(&table.frame(), &ATHLETE_IDENTITY)?;
    let mut by_year: BTreeMap<i32, SexParticipationPoint> = BTreeMap::new();

    for (sex, is_male) in [(SEX_MALE, true), (SEX_FEMALE, false)] {
        let subset = filter(&athletes, &Predicates::new().with(SEX, sex))?;
        for group in count_distinct_by(&subset, YEAR, NAME)? {
            let year = year_of(&group.key)?;
            let point = by_year.entry(year).or_insert(SexParticipationPoint {
                year,
                male: 0,
                female: 0,
            });
            if is_male {
                point.male = group.count;
            } else {
                point.female = group.count;
            }
        }
    }

    log::debug!("sex_participation_over_time: {} editions", by_year.len());
    Ok(by_year.into_values().collect())
}

/// One row per unique athlete with their physical attributes and medal,
/// optionally restricted to one sport. Rows keep table order.
pub fn demographic_slice(table: &Table, sport: Option<&str>) -> Result<Vec<AthleteProfile>> {
    let athletes = dedupe(&table.frame(), &ATHLETE_IDENTITY)?;
    let selected = match sport {
        Some(sport) => filter(&athletes, &Predicates::new().with(SPORT, sport))?,
        None => athletes,
    };

    let interner = table.interner();
    let names = table.column(NAME)?;
    let sexes = table.column(SEX)?;
    let ages = table.column(AGE)?;
    let heights = table.column(HEIGHT)?;
    let weights = table.column(WEIGHT)?;
    let sports = table.column(SPORT)?;
    let regions = table.column(REGION)?;
    let medals = table.column(MEDAL)?;

    let text = |col: &Column, r: usize| col.get_str(r, interner).map(str::to_string);

    let profiles: Vec<AthleteProfile> = selected
        .row_indices()
        .iter()
        .map(|&r| AthleteProfile {
            name: text(names, r).unwrap_or_default(),
            sex: text(sexes, r).unwrap_or_default(),
            age: ages.get_f64(r),
            height: heights.get_f64(r),
            weight: weights.get_f64(r),
            sport: text(sports, r).unwrap_or_default(),
            region: text(regions, r),
            medal: text(medals, r),
        })
        .collect();

    log::debug!("demographic_slice sport={:?}: {} athletes", sport, profiles.len());
    Ok(profiles)
}

/// Headline distinct counts: editions, host cities, sports, events,
/// athletes and nations.
pub fn top_statistics(table: &Table) -> Result<TopStatistics> {
    let frame = table.frame();

    let mut editions = 0;
    for year in frame.distinct_values(YEAR)? {
        if year_of(&year)? != INTERCALATED_YEAR {
            editions += 1;
        }
    }

    Ok(TopStatistics {
        editions,
        cities: frame.count_distinct(CITY)?,
        sports: frame.count_distinct(SPORT)?,
        events: frame.count_distinct(EVENT)?,
        athletes: frame.count_distinct(NAME)?,
        nations: frame.count_distinct(REGION)?,
    })
}

/// Years (newest first) and regions (alphabetical) present in the table.
pub fn selector_options(table: &Table) -> Result<SelectorOptions> {
    let frame = table.frame();

    let mut years = frame
        .distinct_values(YEAR)?
        .iter()
        .map(year_of)
        .collect::<Result<Vec<_>>>()?;
    years.sort_unstable_by(|a, b| b.cmp(a));

    let mut regions = frame.distinct_values(REGION)?;
    regions.sort_by(compare_values);

    Ok(SelectorOptions {
        years,
        regions: regions.into_iter().map(owned_string).collect(),
    })
}
