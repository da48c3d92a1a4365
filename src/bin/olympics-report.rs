/// Olympics Report
///
/// Loads a JSON array of joined event records and prints every dashboard
/// query as one JSON document.
///
/// Usage: olympics-report <events.json> [year|Overall] [region|Overall]

use olympics::{
    columns, country_event_heatmap, demographic_slice, entity_count_over_time, event_table,
    leaderboard, medal_tally, selector_options, sex_participation_over_time, sport_event_heatmap,
    top_statistics, yearwise_medal_count, EventRecord, QueryConfig,
};
use serde_json::json;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: olympics-report <events.json> [year|Overall] [region|Overall]")?;
    let raw_year = args.next().unwrap_or_default();
    let raw_region = args.next().unwrap_or_default();

    let config = QueryConfig::from_env();
    let year = config.year_selector(&raw_year)?;
    let region = config.selector(&raw_region);

    let records: Vec<EventRecord> = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
    let table = event_table(records)?;
    log::info!("loaded {} rows from {}", table.len(), path);
    let stats = table.interner_stats();
    log::debug!(
        "interned {} distinct strings for {} cells (~{} bytes)",
        stats.unique_strings,
        stats.total_references,
        stats.memory_bytes
    );

    let mut report = json!({
        "selectors": selector_options(&table)?,
        "top_statistics": top_statistics(&table)?,
        "medal_tally": medal_tally(&table, year, region)?,
        "nations_over_time": entity_count_over_time(&table, columns::REGION)?,
        "events_over_time": entity_count_over_time(&table, columns::EVENT)?,
        "athletes_over_time": entity_count_over_time(&table, columns::NAME)?,
        "leaderboard": leaderboard(&table, None, region, config.leaderboard_top)?,
        "sport_event_heatmap": sport_event_heatmap(&table)?,
        "sex_participation": sex_participation_over_time(&table)?,
        "demographics": demographic_slice(&table, None)?,
    });

    if let Some(region) = region {
        report["country"] = json!({
            "region": region,
            "yearwise_medals": yearwise_medal_count(&table, region)?,
            "event_heatmap": country_event_heatmap(&table, region)?,
        });
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
