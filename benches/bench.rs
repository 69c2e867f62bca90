// Criterion benchmarks for the match list pipeline

use chrono::{Duration, FixedOffset, TimeZone};
use compstate_http::core::{encode, select, MatchFilterSet, OrderedMap};
use compstate_http::models::{
    Match, MatchQuery, MatchState, MatchTimes, MatchType, OperationsTimes, Span, StagingTimes,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ARENAS: [&str; 2] = ["A", "B"];
const TEAMS: [&str; 6] = ["CLY", "TTN", "GRS", "QMC", "BAY", "HRS"];

fn create_match(num: u32, arena: &str) -> Match {
    let start = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2014, 4, 26, 9, 0, 0)
        .unwrap()
        + Duration::minutes(5 * num as i64);

    let teams = (0..4)
        .map(|corner| {
            let index = (num as usize + corner) % (TEAMS.len() + 1);
            TEAMS.get(index).map(|t| t.to_string())
        })
        .collect();

    let mut signal_shepherds = OrderedMap::new();
    signal_shepherds.insert("Blue", start - Duration::seconds(240));

    Match {
        num,
        display_name: format!("Match {}", num),
        arena: arena.to_string(),
        match_type: if num % 10 == 9 {
            MatchType::Knockout
        } else {
            MatchType::League
        },
        teams,
        scores: None,
        state: MatchState::Released,
        times: MatchTimes {
            slot: Span {
                start,
                end: start + Duration::minutes(5),
            },
            game: Span {
                start: start + Duration::seconds(90),
                end: start + Duration::seconds(270),
            },
            operations: OperationsTimes {
                release_threshold: start + Duration::seconds(90),
            },
            staging: StagingTimes {
                opens: start - Duration::seconds(210),
                closes: start - Duration::seconds(30),
                signal_teams: start - Duration::seconds(150),
                signal_shepherds,
            },
        },
    }
}

fn create_matches(count: u32) -> Vec<Match> {
    (0..count)
        .flat_map(|num| ARENAS.iter().map(move |arena| create_match(num, arena)))
        .collect()
}

fn bench_build_filters(c: &mut Criterion) {
    let params = [
        ("arena", "A"),
        ("num", "100..900"),
        ("type", "league"),
        ("game_start_time", "2014-04-26T10:00:00+01:00..2014-04-27T10:00:00+01:00"),
    ];

    c.bench_function("build_filter_set", |b| {
        b.iter(|| MatchFilterSet::build(black_box(params)).unwrap());
    });
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_matches");

    for count in [500u32, 1500, 3000] {
        let matches = create_matches(count);
        let query = MatchQuery::from_params([
            ("team", "QMC"),
            ("num", "100.."),
            ("limit", "-10"),
        ])
        .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &matches, |b, matches| {
            b.iter(|| {
                select(
                    black_box(matches),
                    |m| query.filters.matches(m),
                    query.limit,
                )
            });
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let matches = create_matches(500);
    let refs: Vec<&Match> = matches.iter().collect();

    c.bench_function("encode_1000_matches", |b| {
        b.iter(|| encode(black_box(&refs)).unwrap());
    });
}

criterion_group!(benches, bench_build_filters, bench_select, bench_encode);
criterion_main!(benches);
