use chrono::NaiveDate;
use clsearch::{ChangeKind, Record, SearchEngine, Status};
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "dark", "mode", "api", "security", "fix", "theme", "webhook", "oauth", "export", "cache",
];

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..5).prop_map(|words| words.join(" "))
}

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Planned),
        Just(Status::RollingOut),
        Just(Status::Complete),
    ]
}

fn arb_record() -> impl Strategy<Value = (String, String, Status, Vec<String>)> {
    (
        arb_text(),
        "[0-9]\\.[0-9]\\.[0-9]",
        arb_status(),
        prop::collection::vec(arb_text(), 0..4),
    )
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..12).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(i, (summary, version, status, changes))| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap();
                changes.into_iter().fold(
                    Record::new(i.to_string(), version, date, summary, status),
                    |record, text| record.with_change(ChangeKind::Improved, text),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_results_sorted_and_stable(records in arb_records(), query in prop::sample::select(WORDS)) {
        let engine = SearchEngine::build(records);
        let results = engine.search(query);
        let positions: Vec<usize> = results.iter().map(|r| r.id().parse().unwrap()).collect();

        for (pair, pos) in results.windows(2).zip(positions.windows(2)) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pos[0] < pos[1]);
            }
        }
    }

    #[test]
    fn prop_every_result_matched_something(records in arb_records(), query in prop::sample::select(WORDS)) {
        let engine = SearchEngine::build(records);
        for result in engine.search(query) {
            prop_assert!(result.score > 0.0);
            prop_assert!(!result.match_fields.is_empty());
        }
    }

    #[test]
    fn prop_search_is_deterministic(records in arb_records(), query in "[a-z .]{1,8}") {
        let engine = SearchEngine::build(records);
        prop_assert_eq!(engine.search(&query), engine.search(&query));
    }

    #[test]
    fn prop_blank_queries_return_nothing(records in arb_records(), query in "[ \t\n]{0,6}") {
        let engine = SearchEngine::build(records);
        prop_assert!(engine.search(&query).is_empty());
    }

    #[test]
    fn prop_arbitrary_queries_never_panic(records in arb_records(), query in any::<String>()) {
        let engine = SearchEngine::build(records);
        let _ = engine.search(&query);
    }

    #[test]
    fn prop_summary_text_finds_its_record(records in arb_records()) {
        let engine = SearchEngine::build(records.clone());
        for record in &records {
            let results = engine.search(&record.summary);
            prop_assert!(results.iter().any(|r| r.id() == record.id));
        }
    }
}
