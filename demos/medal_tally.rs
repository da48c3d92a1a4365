/// Medal tally walkthrough on a handful of hand-written records.
///
/// Run with: cargo run --example medal_tally

use olympics::*;

fn record(name: &str, region: &str, year: i32, sport: &str, event: &str, medal: Option<Medal>) -> EventRecord {
    EventRecord {
        name: name.to_string(),
        sex: "M".to_string(),
        age: None,
        height: None,
        weight: None,
        team: region.to_string(),
        noc: region.to_uppercase(),
        region: Some(region.to_string()),
        games: format!("{} Summer", year),
        year,
        season: "Summer".to_string(),
        city: "Host".to_string(),
        sport: sport.to_string(),
        event: event.to_string(),
        medal,
    }
}

fn main() -> Result<()> {
    let table = event_table(vec![
        record("Curry", "USA", 2016, "Basketball", "Men's Basketball", Some(Medal::Gold)),
        record("Durant", "USA", 2016, "Basketball", "Men's Basketball", Some(Medal::Gold)),
        record("Bolt", "Jamaica", 2016, "Athletics", "100m", Some(Medal::Gold)),
        record("Gatlin", "USA", 2016, "Athletics", "100m", Some(Medal::Silver)),
        record("De Grasse", "Canada", 2016, "Athletics", "100m", Some(Medal::Bronze)),
        record("Bolt", "Jamaica", 2012, "Athletics", "100m", Some(Medal::Gold)),
    ])?;

    println!("Table: {:?}", table);

    let config = QueryConfig::default();
    for (raw_year, raw_region) in [("Overall", "Overall"), ("2016", "Overall"), ("Overall", "Jamaica")] {
        let tally = medal_tally(&table, config.year_selector(raw_year)?, config.selector(raw_region))?;
        println!("\n{}", tally.title);
        println!("{:<10} {:>4} {:>6} {:>6} {:>5}", "Region", "Gold", "Silver", "Bronze", "Total");
        for row in &tally.rows {
            println!(
                "{:<10} {:>4} {:>6} {:>6} {:>5}",
                row.region, row.gold, row.silver, row.bronze, row.total
            );
        }
    }

    println!("\nTop athletes:");
    for entry in leaderboard(&table, None, None, config.leaderboard_top)? {
        println!("  {} ({}) - {} medals", entry.name, entry.sport, entry.medals);
    }

    let heatmap = sport_event_heatmap(&table)?;
    println!("\nEvents per sport across {} editions:", heatmap.column_labels.len());
    for sport in &heatmap.row_labels {
        let total = heatmap.row_total(sport).unwrap_or_default();
        println!("  {:<12} {}", sport.to_string(), total);
    }

    Ok(())
}
