use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use olympics::*;

const REGIONS: [&str; 8] = ["USA", "China", "Russia", "Germany", "India", "Kenya", "Brazil", "Japan"];
const SPORTS: [&str; 6] = ["Athletics", "Swimming", "Rowing", "Boxing", "Judo", "Fencing"];
const YEARS: [i32; 6] = [1996, 2000, 2004, 2008, 2012, 2016];

fn synthetic_table(size: usize) -> Table {
    let records = (0..size).map(|i| {
        let region = REGIONS[i % REGIONS.len()];
        let sport = SPORTS[(i / 3) % SPORTS.len()];
        let year = YEARS[(i / 7) % YEARS.len()];
        let medal = match i % 11 {
            0 => Some(Medal::Gold),
            1 => Some(Medal::Silver),
            2 => Some(Medal::Bronze),
            _ => None,
        };
        EventRecord {
            name: format!("Athlete {}", i % (size / 4 + 1)),
            sex: if i % 2 == 0 { "M" } else { "F" }.to_string(),
            age: Some(20.0 + (i % 15) as f64),
            height: Some(160.0 + (i % 40) as f64),
            weight: None,
            team: region.to_string(),
            noc: region.to_uppercase(),
            region: Some(region.to_string()),
            games: format!("{} Summer", year),
            year,
            season: "Summer".to_string(),
            city: format!("City {}", year),
            sport: sport.to_string(),
            event: format!("{} event {}", sport, i % 9),
            medal,
        }
    });
    event_table(records).unwrap()
}

fn bench_medal_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("medal_tally");

    for size in [1000, 10000, 100000].iter() {
        let table = synthetic_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| medal_tally(black_box(&table), None, None).unwrap());
        });
    }
    group.finish();
}

fn bench_dedupe(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedupe_medal_identity");

    for size in [1000, 10000, 100000].iter() {
        let table = synthetic_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| dedupe(&table.frame(), black_box(&MEDAL_IDENTITY)).unwrap().len());
        });
    }
    group.finish();
}

fn bench_sport_heatmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("sport_event_heatmap");

    for size in [1000, 10000, 100000].iter() {
        let table = synthetic_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| sport_event_heatmap(black_box(&table)).unwrap());
        });
    }
    group.finish();
}

fn bench_sex_participation(c: &mut Criterion) {
    let table = synthetic_table(10000);
    c.bench_function("sex_participation_10000", |b| {
        b.iter(|| sex_participation_over_time(black_box(&table)).unwrap());
    });
}

fn bench_leaderboard(c: &mut Criterion) {
    let table = synthetic_table(10000);
    c.bench_function("leaderboard_10000", |b| {
        b.iter(|| leaderboard(black_box(&table), Some("Swimming"), None, 15).unwrap());
    });
}

fn bench_table_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_table_load");

    for size in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| synthetic_table(black_box(size)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_medal_tally,
    bench_dedupe,
    bench_sport_heatmap,
    bench_sex_participation,
    bench_leaderboard,
    bench_table_load
);
criterion_main!(benches);
