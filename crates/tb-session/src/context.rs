//! Values handed to test bodies

use std::net::SocketAddr;
use std::sync::Arc;
use tb_core::Identifier;
use tb_db::{Database, DbResult};

/// Everything a test body needs to target the session's schema.
///
/// Passed explicitly to the executor; there is no process-wide state.
#[derive(Clone)]
pub struct SessionContext {
    schema: Identifier,
    db: Arc<dyn Database>,
    proxy_addr: Option<SocketAddr>,
}

impl SessionContext {
    /// Build a context; the controller does this after creating the schema
    pub fn new(
        schema: Identifier,
        db: Arc<dyn Database>,
        proxy_addr: Option<SocketAddr>,
    ) -> Self {
        Self {
            schema,
            db,
            proxy_addr,
        }
    }

    /// The session's test schema
    pub fn schema(&self) -> &Identifier {
        &self.schema
    }

    /// The shared session connection
    pub fn db(&self) -> &dyn Database {
        self.db.as_ref()
    }

    /// A clone of the shared connection handle
    pub fn db_handle(&self) -> Arc<dyn Database> {
        Arc::clone(&self.db)
    }

    /// Address of the forwarding proxy, when one is running
    pub fn proxy_addr(&self) -> Option<SocketAddr> {
        self.proxy_addr
    }

    /// Qualify an object name with the session schema
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.schema, name)
    }

    /// Whether a table or view `name` exists in the session schema
    pub async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.db.relation_exists(&self.qualify(name)).await
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("schema", &self.schema)
            .field("db", &self.db.db_type())
            .field("proxy_addr", &self.proxy_addr)
            .finish()
    }
}
