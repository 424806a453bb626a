use super::*;
use tb_db::DuckDbBackend;

fn rendered(name: &str, sql: &str) -> RenderedTest {
    RenderedTest {
        name: name.to_string(),
        sql: sql.to_string(),
    }
}

async fn seeded(sql: &str) -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(sql).await.unwrap();
    db
}

#[tokio::test]
async fn test_no_rows_passes() {
    let db = seeded("CREATE TABLE t (id INT); INSERT INTO t VALUES (1), (2), (3);").await;

    let result = TestRunner::new(&db)
        .run_test(&rendered("no_negative_ids", "SELECT * FROM t WHERE id < 0"))
        .await;

    assert_eq!(result.name, "no_negative_ids");
    assert_eq!(result.status, TestStatus::Passed);
}

#[tokio::test]
async fn test_offending_rows_fail_with_samples() {
    let db = seeded("CREATE TABLE t (id INT); INSERT INTO t VALUES (1), (1), (2), (2), (3);").await;

    let result = TestRunner::new(&db)
        .run_test(&rendered(
            "unique_id",
            "SELECT id, COUNT(*) AS cnt FROM t GROUP BY id HAVING COUNT(*) > 1",
        ))
        .await;

    match result.status {
        TestStatus::Failed { rows, samples } => {
            assert_eq!(rows, 2);
            assert_eq!(samples.len(), 2);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_samples_are_capped() {
    let db = seeded("CREATE TABLE t AS SELECT range AS id FROM range(20);").await;

    let result = TestRunner::new(&db)
        .run_test(&rendered("empty", "SELECT * FROM t"))
        .await;

    let TestStatus::Failed { rows, samples } = result.status else {
        panic!("expected failure");
    };
    assert_eq!(rows, 20);
    assert_eq!(samples.len(), SAMPLE_ROWS);
}

#[tokio::test]
async fn test_broken_query_is_an_error_not_a_failure() {
    let db = DuckDbBackend::in_memory().unwrap();

    let result = TestRunner::new(&db)
        .run_test(&rendered("missing_table", "SELECT * FROM nope"))
        .await;

    assert!(!result.passed());
    assert!(matches!(result.status, TestStatus::Errored(_)));
}

#[tokio::test]
async fn test_summary_counts_each_status() {
    let db = seeded(
        "CREATE TABLE t (id INT, name VARCHAR); INSERT INTO t VALUES (1, 'a'), (2, NULL);",
    )
    .await;

    let tests = vec![
        rendered("ids_positive", "SELECT * FROM t WHERE id <= 0"),
        rendered("names_not_null", "SELECT * FROM t WHERE name IS NULL"),
        rendered("bad_sql", "SELECT FROM WHERE"),
    ];

    let (results, summary) = TestRunner::new(&db).run_all(&tests, false).await;

    assert_eq!(results.len(), 3);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.errors, 1);
    assert!(!summary.all_passed());
}

#[tokio::test]
async fn test_fail_fast_stops_after_first_failure() {
    let db = DuckDbBackend::in_memory().unwrap();

    let tests = vec![
        rendered("first", "SELECT 1"),
        rendered("second", "SELECT 1 WHERE false"),
    ];

    let (results, summary) = TestRunner::new(&db).run_all(&tests, true).await;

    assert_eq!(results.len(), 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_empty_run_counts_as_passed() {
    let summary = TestSummary::from_results(&[], Duration::ZERO);
    assert!(summary.all_passed());
}
