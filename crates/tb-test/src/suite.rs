//! Test discovery and rendering

use crate::error::{SuiteError, SuiteResult};
use minijinja::{context, Environment};
use std::path::{Path, PathBuf};
use tb_core::Identifier;

/// Script at the suite root executed before any test
pub const SETUP_FILE: &str = "setup.sql";

/// A single SQL test file
#[derive(Debug, Clone)]
pub struct SqlTest {
    /// Path relative to the suite root, without the `.sql` extension
    pub name: String,

    /// File the test was loaded from
    pub path: PathBuf,

    /// Unrendered template source
    pub template: String,
}

/// A test rendered for one session schema
#[derive(Debug, Clone)]
pub struct RenderedTest {
    pub name: String,
    pub sql: String,
}

/// A directory of SQL tests
#[derive(Debug, Clone)]
pub struct SqlSuite {
    root: PathBuf,
    setup: Option<String>,
    tests: Vec<SqlTest>,
}

impl SqlSuite {
    /// Load every `*.sql` file under `root`, recursively, sorted by name.
    ///
    /// `setup.sql` at the root is loaded as the setup script instead of a
    /// test.
    pub fn discover(root: &Path) -> SuiteResult<Self> {
        if !root.is_dir() {
            return Err(SuiteError::SuiteNotFound {
                path: root.display().to_string(),
            });
        }

        let discovery_error = |message: String| SuiteError::Discovery {
            path: root.display().to_string(),
            message,
        };

        let root_str = root
            .to_str()
            .ok_or_else(|| discovery_error("path is not valid UTF-8".to_string()))?;
        let pattern = format!("{}/**/*.sql", glob::Pattern::escape(root_str));
        let entries = glob::glob(&pattern).map_err(|e| discovery_error(e.to_string()))?;

        let setup_path = root.join(SETUP_FILE);
        let mut setup = None;
        let mut tests = Vec::new();

        for entry in entries {
            let path = entry.map_err(|e| discovery_error(e.to_string()))?;
            if !path.is_file() {
                continue;
            }
            let template = read_file(&path)?;
            if path == setup_path {
                setup = Some(template);
                continue;
            }
            tests.push(SqlTest {
                name: test_name(root, &path),
                path,
                template,
            });
        }

        if tests.is_empty() {
            return Err(SuiteError::EmptySuite {
                path: root.display().to_string(),
            });
        }
        tests.sort_by(|a, b| a.name.cmp(&b.name));

        log::debug!(
            "Discovered {} tests in {}{}",
            tests.len(),
            root.display(),
            if setup.is_some() { " (with setup)" } else { "" }
        );

        Ok(Self {
            root: root.to_path_buf(),
            setup,
            tests,
        })
    }

    /// Suite root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discovered tests, sorted by name
    pub fn tests(&self) -> &[SqlTest] {
        &self.tests
    }

    /// Render the setup script for `schema`, if the suite has one
    pub fn render_setup(&self, schema: &Identifier) -> SuiteResult<Option<String>> {
        self.setup
            .as_deref()
            .map(|template| render(SETUP_FILE, template, schema))
            .transpose()
    }

    /// Render every test for `schema`
    pub fn render_tests(&self, schema: &Identifier) -> SuiteResult<Vec<RenderedTest>> {
        self.tests
            .iter()
            .map(|test| {
                Ok(RenderedTest {
                    name: test.name.clone(),
                    sql: render(&test.name, &test.template, schema)?,
                })
            })
            .collect()
    }
}

/// Render a template with `schema` in scope
fn render(name: &str, template: &str, schema: &Identifier) -> SuiteResult<String> {
    let env = Environment::new();
    env.render_str(template, context! { schema => schema.as_str() })
        .map_err(|e| SuiteError::Render {
            name: name.to_string(),
            message: e.to_string(),
        })
}

fn read_file(path: &Path) -> SuiteResult<String> {
    std::fs::read_to_string(path).map_err(|e| SuiteError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })
}

/// `root/orders/no_nulls.sql` -> `orders/no_nulls`
fn test_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "suite_test.rs"]
mod tests;
