//! Runs rendered tests against the session connection.
//!
//! A test is a query that selects offending rows; it passes when the query
//! returns none.

use crate::suite::RenderedTest;
use std::time::{Duration, Instant};
use tb_db::Database;

/// Offending rows kept per failing test
pub const SAMPLE_ROWS: usize = 5;

/// How a single test ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestStatus {
    Passed,

    /// The query returned `rows` offending rows; `samples` holds the first few
    Failed { rows: usize, samples: Vec<String> },

    /// The query itself could not run
    Errored(String),
}

/// Outcome of one test
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub duration: Duration,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Counts over a finished run
#[derive(Debug, Clone, Default)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub duration: Duration,
}

impl TestSummary {
    /// Tally `results`; `duration` is the wall time of the whole run.
    pub fn from_results(results: &[TestResult], duration: Duration) -> Self {
        results.iter().fold(
            Self {
                duration,
                ..Self::default()
            },
            |mut summary, result| {
                summary.total += 1;
                match result.status {
                    TestStatus::Passed => summary.passed += 1,
                    TestStatus::Failed { .. } => summary.failed += 1,
                    TestStatus::Errored(_) => summary.errors += 1,
                }
                summary
            },
        )
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Executes tests one at a time over a borrowed connection
pub struct TestRunner<'a> {
    db: &'a dyn Database,
}

impl<'a> TestRunner<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Run a single rendered test
    pub async fn run_test(&self, test: &RenderedTest) -> TestResult {
        let start = Instant::now();
        let status = self.check(&test.sql).await;
        log::debug!("Test {} finished: {:?}", test.name, status);

        TestResult {
            name: test.name.clone(),
            status,
            duration: start.elapsed(),
        }
    }

    async fn check(&self, sql: &str) -> TestStatus {
        let rows = match self.db.query_count(sql).await {
            Ok(0) => return TestStatus::Passed,
            Ok(rows) => rows,
            Err(e) => return TestStatus::Errored(e.to_string()),
        };

        // Samples are best effort; the count already decided the outcome
        let samples = self
            .db
            .query_sample_rows(sql, SAMPLE_ROWS)
            .await
            .unwrap_or_default();
        TestStatus::Failed { rows, samples }
    }

    /// Run `tests` in order and summarize.
    ///
    /// With `fail_fast`, nothing runs after the first test that did not pass.
    pub async fn run_all(
        &self,
        tests: &[RenderedTest],
        fail_fast: bool,
    ) -> (Vec<TestResult>, TestSummary) {
        let start = Instant::now();
        let mut results = Vec::with_capacity(tests.len());

        for test in tests {
            let result = self.run_test(test).await;
            let stop = fail_fast && !result.passed();
            results.push(result);
            if stop {
                log::debug!("Stopping after first failure (fail-fast)");
                break;
            }
        }

        let summary = TestSummary::from_results(&results, start.elapsed());
        (results, summary)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
