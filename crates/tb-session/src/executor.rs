//! Test execution collaborator

use crate::context::SessionContext;
use async_trait::async_trait;
use std::future::Future;

/// Runs the suite and reports an exit code: `0` when every test passed,
/// anything else when at least one failed.
///
/// The controller awaits `run` to completion before deciding whether to
/// drop the schema.
#[async_trait]
pub trait TestExecutor: Send + Sync {
    /// Run every test against `ctx`
    async fn run(&self, ctx: &SessionContext) -> i32;
}

/// Adapts an async closure into a [`TestExecutor`].
///
/// ```ignore
/// let executor = FnExecutor::new(|ctx: SessionContext| async move {
///     let sql = format!("create table {} (id int)", ctx.qualify("t"));
///     if ctx.db().execute(&sql).await.is_ok() { 0 } else { 1 }
/// });
/// ```
pub struct FnExecutor<F> {
    f: F,
}

impl<F, Fut> FnExecutor<F>
where
    F: Fn(SessionContext) -> Fut + Send + Sync,
    Fut: Future<Output = i32> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> TestExecutor for FnExecutor<F>
where
    F: Fn(SessionContext) -> Fut + Send + Sync,
    Fut: Future<Output = i32> + Send + 'static,
{
    async fn run(&self, ctx: &SessionContext) -> i32 {
        (self.f)(ctx.clone()).await
    }
}
