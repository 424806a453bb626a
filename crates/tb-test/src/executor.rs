//! Runs a SQL suite as the session's test executor

use crate::error::{SuiteError, SuiteResult};
use crate::runner::{TestResult, TestRunner, TestStatus, TestSummary};
use crate::suite::SqlSuite;
use async_trait::async_trait;
use tb_session::{SessionContext, TestExecutor};

/// Exit code reported when any test fails or the suite cannot run
pub const FAILURE_EXIT_CODE: i32 = 1;

/// [`TestExecutor`] backed by a directory of SQL tests
pub struct SqlSuiteExecutor {
    suite: SqlSuite,
    fail_fast: bool,
}

impl SqlSuiteExecutor {
    pub fn new(suite: SqlSuite) -> Self {
        Self {
            suite,
            fail_fast: false,
        }
    }

    /// Stop after the first failing test
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Run setup and every test inside the session schema
    pub async fn execute(
        &self,
        ctx: &SessionContext,
    ) -> SuiteResult<(Vec<TestResult>, TestSummary)> {
        let schema = ctx.schema();

        if let Some(setup) = self.suite.render_setup(schema)? {
            log::debug!("Running suite setup in {}", schema);
            ctx.db()
                .execute_batch(&setup)
                .await
                .map_err(|e| SuiteError::Setup(e.to_string()))?;
        }

        let tests = self.suite.render_tests(schema)?;
        println!("Running {} tests in schema {}...\n", tests.len(), schema);

        let runner = TestRunner::new(ctx.db());
        Ok(runner.run_all(&tests, self.fail_fast).await)
    }
}

#[async_trait]
impl TestExecutor for SqlSuiteExecutor {
    async fn run(&self, ctx: &SessionContext) -> i32 {
        match self.execute(ctx).await {
            Ok((results, summary)) => {
                print_results(&results, &summary);
                if summary.all_passed() {
                    0
                } else {
                    FAILURE_EXIT_CODE
                }
            }
            Err(e) => {
                log::error!("{}", e);
                FAILURE_EXIT_CODE
            }
        }
    }
}

fn print_results(results: &[TestResult], summary: &TestSummary) {
    for result in results {
        let millis = result.duration.as_millis();
        match &result.status {
            TestStatus::Passed => println!("  ✓ {} [{}ms]", result.name, millis),
            TestStatus::Errored(error) => {
                println!("  ✗ {} - {} [{}ms]", result.name, error, millis)
            }
            TestStatus::Failed { rows, samples } => {
                println!("  ✗ {} ({} failures) [{}ms]", result.name, rows, millis);
                if !samples.is_empty() {
                    println!("    Sample failing rows:");
                    for (i, row) in samples.iter().enumerate() {
                        println!("      {}. {}", i + 1, row);
                    }
                    if *rows > samples.len() {
                        println!("      ... and {} more", rows - samples.len());
                    }
                }
            }
        }
    }

    println!();
    println!(
        "Passed: {}, Failed: {} [{}ms]",
        summary.passed,
        summary.failed + summary.errors,
        summary.duration.as_millis()
    );
}
