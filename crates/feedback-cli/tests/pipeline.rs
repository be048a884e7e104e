use std::fs;
use std::path::Path;

use feedback_cli::config::{OnSourceError, RunConfig};
use feedback_cli::pipeline::{ingest_source, run};
use feedback_model::{RejectionEntry, Source};
use feedback_report::Sentiment;
use feedback_store::{ErrorLog, StagingStore};
use tempfile::TempDir;

const SURVEY_CSV: &str = "\
customer_id,rating,comments,review_date
C1,5,Great service,01-02-2024
C2,2,Package arrived late,15-02-2024
,4,No id,01-03-2024
C3,9,Too high,01-03-2024
C4,3,Bad date,2024-03-01
";

const WEB_JSON: &str = r#"[
  {"customer_id": "C1", "rating": 3, "comments": "Item was damaged", "review_date": "2024-02-20"},
  {"customer_id": "C5", "rating": null, "comments": "no rating"},
  {"customer_id": "C6", "rating": 4.7, "comments": "Fine"},
  "not an object"
]"#;

const EXTERNAL_XML: &str = "\
<reviews>
  <review>
    <customer_id>C7</customer_id>
    <rating>1</rating>
    <comments>Refund still pending</comments>
    <review_date>2024-03-05</review_date>
  </review>
  <review>
    <customer_id>C8</customer_id>
    <rating>five</rating>
  </review>
</reviews>
";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("customer_survey.csv"), SURVEY_CSV).expect("write csv");
    fs::write(dir.join("web_feedback.json"), WEB_JSON).expect("write json");
    fs::write(dir.join("external_reviews.xml"), EXTERNAL_XML).expect("write xml");
}

fn fixture() -> (TempDir, RunConfig) {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path());
    let config = RunConfig::from_data_dir(dir.path());
    (dir, config)
}

#[test]
fn every_record_is_staged_or_rejected() {
    let (_dir, config) = fixture();
    let mut store = StagingStore::open_in_memory().expect("store");
    let mut rejections: Vec<RejectionEntry> = Vec::new();

    let result = run(&config, &mut store, &mut rejections).expect("run");

    let counts: Vec<(Source, usize, usize, usize)> = result
        .sources
        .iter()
        .map(|s| (s.source, s.read, s.accepted, s.rejected))
        .collect();
    assert_eq!(
        counts,
        vec![
            (Source::Tabular, 5, 2, 3),
            (Source::Structured, 4, 2, 2),
            (Source::MarkupTree, 2, 1, 1),
        ]
    );
    for source in Source::ALL {
        let summary = result
            .sources
            .iter()
            .find(|s| s.source == source)
            .expect("summary");
        assert_eq!(store.count(source).expect("count"), summary.accepted);
    }
    assert_eq!(rejections.len(), result.total_rejected());
    assert!(result.failures.is_empty());
}

#[test]
fn rejections_carry_source_position_and_reason() {
    let (_dir, config) = fixture();
    let mut store = StagingStore::open_in_memory().expect("store");
    let mut rejections: Vec<RejectionEntry> = Vec::new();
    run(&config, &mut store, &mut rejections).expect("run");

    let lines: Vec<String> = rejections.iter().map(RejectionEntry::log_line).collect();
    assert_eq!(lines[0], "[CSV] Record 3: Missing required field(s)");
    assert_eq!(lines[1], "[CSV] Record 4: Invalid rating 9");
    assert_eq!(lines[2], "[CSV] Record 5: Invalid date 2024-03-01");
    assert_eq!(lines[3], "[JSON] Record 2: Missing customer_id or rating");
    assert!(
        lines[4].starts_with("[JSON] Record 4: expected a JSON object"),
        "{}",
        lines[4]
    );
    assert_eq!(lines[5], "[XML] Record 2: Rating 'five' is not an integer");
}

#[test]
fn staged_rows_are_normalized() {
    let (_dir, config) = fixture();
    let mut store = StagingStore::open_in_memory().expect("store");
    let mut rejections: Vec<RejectionEntry> = Vec::new();
    run(&config, &mut store, &mut rejections).expect("run");

    let rows = store.unioned_view().expect("union");
    let summary: Vec<(Source, &str, i64, &str)> = rows
        .iter()
        .map(|row| {
            (
                row.source,
                row.record.customer_id.as_str(),
                row.record.rating,
                row.record.review_date.as_str(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (Source::Tabular, "C1", 5, "2024-02-01"),
            (Source::Tabular, "C2", 2, "2024-02-15"),
            (Source::Structured, "C1", 3, "2024-02-20"),
            (Source::Structured, "C6", 4, ""),
            (Source::MarkupTree, "C7", 1, "2024-03-05"),
        ]
    );
    assert_eq!(rows[0].sequence_id, 1);
    assert_eq!(rows[2].sequence_id, 1);
}

#[test]
fn reports_cover_all_sources() {
    let (_dir, config) = fixture();
    let mut store = StagingStore::open_in_memory().expect("store");
    let mut rejections: Vec<RejectionEntry> = Vec::new();
    let report = run(&config, &mut store, &mut rejections)
        .expect("run")
        .report;

    let top: Vec<(&str, u64)> = report
        .top_customers
        .iter()
        .map(|row| (row.customer_id.as_str(), row.review_count))
        .collect();
    assert_eq!(top, vec![("C1", 2), ("C6", 1), ("C2", 1), ("C7", 1)]);

    let keywords: Vec<(&str, u64)> = report
        .keyword_counts
        .iter()
        .map(|row| (row.keyword.as_str(), row.occurrences))
        .collect();
    assert_eq!(
        keywords,
        vec![("damaged", 1), ("delay", 0), ("defective", 0), ("late", 1)]
    );

    let sentiments: Vec<Sentiment> = report.sentiments.iter().map(|row| row.sentiment).collect();
    assert_eq!(
        sentiments,
        vec![
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Positive,
            Sentiment::Negative,
        ]
    );

    let months: Vec<(&str, u64)> = report
        .monthly_trend
        .iter()
        .map(|row| (row.month.as_str(), row.review_count))
        .collect();
    assert_eq!(months, vec![("2024-02", 3), ("2024-03", 1)]);
    assert!((report.monthly_trend[0].average_rating - 10.0 / 3.0).abs() < 1e-9);
}

#[test]
fn missing_source_aborts_by_default() {
    let (dir, config) = fixture();
    fs::remove_file(dir.path().join("external_reviews.xml")).expect("remove xml");
    let mut store = StagingStore::open_in_memory().expect("store");
    let mut rejections: Vec<RejectionEntry> = Vec::new();

    let error = run(&config, &mut store, &mut rejections).expect_err("run should fail");
    let message = format!("{error:#}");
    assert!(message.contains("external_reviews.xml"), "{message}");
    assert!(message.contains("input file not found"), "{message}");
    assert!(rejections.is_empty());
    for source in Source::ALL {
        assert_eq!(store.count(source).expect("count"), 0);
    }
}

#[test]
fn aborted_run_leaves_no_partial_data_behind() {
    let (dir, config) = fixture();
    let db_path = dir.path().join("feedback.db");
    {
        let mut store = StagingStore::open(&db_path).expect("store");
        let mut rejections: Vec<RejectionEntry> = Vec::new();
        run(&config, &mut store, &mut rejections).expect("first run");
    }

    fs::write(dir.path().join("external_reviews.xml"), "<reviews><review>")
        .expect("truncate xml");
    let mut store = StagingStore::open(&db_path).expect("store");
    let mut rejections: Vec<RejectionEntry> = Vec::new();
    run(&config, &mut store, &mut rejections).expect_err("unclosed markup aborts");

    assert!(rejections.is_empty());
    assert!(store.unioned_view().expect("union").is_empty());
}

#[test]
fn skip_policy_continues_past_unreadable_source() {
    let (dir, config) = fixture();
    fs::write(dir.path().join("web_feedback.json"), r#"{"customer_id": "C1"}"#)
        .expect("overwrite json");
    let config = config.with_on_source_error(OnSourceError::Skip);
    let mut store = StagingStore::open_in_memory().expect("store");
    let mut rejections: Vec<RejectionEntry> = Vec::new();

    let result = run(&config, &mut store, &mut rejections).expect("run");

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].source, Source::Structured);
    let staged: Vec<Source> = result.sources.iter().map(|s| s.source).collect();
    assert_eq!(staged, vec![Source::Tabular, Source::MarkupTree]);
    assert_eq!(store.count(Source::Structured).expect("count"), 0);
    assert_eq!(result.report.sentiments.len(), 3);
}

#[test]
fn rerun_replaces_staged_rows_and_appends_log() {
    let (dir, config) = fixture();
    let db_path = dir.path().join("feedback.db");
    let log_path = dir.path().join("error_log.txt");

    for _ in 0..2 {
        let mut store = StagingStore::open(&db_path).expect("store");
        let mut log = ErrorLog::open(&log_path).expect("log");
        run(&config, &mut store, &mut log).expect("run");
    }

    let store = StagingStore::open(&db_path).expect("store");
    assert_eq!(store.unioned_view().expect("union").len(), 5);
    let log = fs::read_to_string(&log_path).expect("read log");
    assert_eq!(log.lines().count(), 12);
}

#[test]
fn ingest_source_stages_one_source() {
    let (dir, _config) = fixture();
    let mut store = StagingStore::open_in_memory().expect("store");
    store.reset_schema().expect("reset");
    let mut rejections: Vec<RejectionEntry> = Vec::new();

    let summary = ingest_source(
        Source::MarkupTree,
        &dir.path().join("external_reviews.xml"),
        &mut store,
        &mut rejections,
    )
    .expect("ingest");

    assert_eq!((summary.read, summary.accepted, summary.rejected), (2, 1, 1));
    assert_eq!(store.count(Source::Tabular).expect("count"), 0);
    assert_eq!(rejections[0].source, Source::MarkupTree);
}

#[test]
fn error_log_file_lists_rejections_in_input_order() {
    let (dir, config) = fixture();
    let log_path = dir.path().join("error_log.txt");
    let mut store = StagingStore::open_in_memory().expect("store");
    let mut log = ErrorLog::create(&log_path).expect("log");
    run(&config, &mut store, &mut log).expect("run");
    assert_eq!(log.lines_written(), 6);

    let contents = fs::read_to_string(&log_path).expect("read log");
    insta::assert_snapshot!(contents.trim_end(), @r"
    [CSV] Record 3: Missing required field(s)
    [CSV] Record 4: Invalid rating 9
    [CSV] Record 5: Invalid date 2024-03-01
    [JSON] Record 2: Missing customer_id or rating
    [JSON] Record 4: expected a JSON object, found a string
    [XML] Record 2: Rating 'five' is not an integer
    ");
}
