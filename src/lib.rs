/// Olympics - Columnar Query Core for Olympic Athlete/Event Data
///
/// An in-memory columnar table of athlete participations with a small set of
/// composable engines (dedupe, filter, group-by aggregation, pivot) and a
/// query facade answering the questions a results dashboard asks: medal
/// tallies, participation trends, leaderboards and heatmaps.
///
/// Queries borrow the table immutably and return owned, serializable rows.

pub mod aggregate;
pub mod column;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod filter;
pub mod frame;
pub mod interner;
pub mod pivot;
pub mod query;
pub mod record;
pub mod sort;
pub mod table;

pub use aggregate::{count_by, count_distinct_by, sum_by, GroupCount, GroupTotals};
pub use column::{CellKey, Column, ColumnType, ColumnValue};
pub use config::QueryConfig;
pub use dedupe::{dedupe, ATHLETE_IDENTITY, MEDAL_IDENTITY};
pub use error::{Result, TableError};
pub use filter::{filter, Predicates};
pub use frame::Frame;
pub use interner::{InternerStats, StringId, StringInterner};
pub use pivot::{pivot, Pivot, PivotAggregation};
pub use query::{
    country_event_heatmap, demographic_slice, entity_count_over_time, leaderboard, medal_tally,
    selector_options, sex_participation_over_time, sport_event_heatmap, tally_title, top_statistics,
    yearwise_medal_count, AthleteProfile, LeaderboardEntry, MedalTally, MedalTallyRow, SelectorOptions,
    SeriesPoint, SexParticipationPoint, TopStatistics,
};
pub use record::{columns, event_schema, event_table, EventRecord, Medal, SEX_FEMALE, SEX_MALE};
pub use sort::compare_values;
pub use table::{Schema, Table};
