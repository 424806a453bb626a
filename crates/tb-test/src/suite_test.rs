use super::*;
use std::fs;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_discover_sorted_and_nested() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b_second.sql", "SELECT 1 WHERE false");
    write(dir.path(), "a_first.sql", "SELECT 1 WHERE false");
    write(dir.path(), "orders/no_nulls.sql", "SELECT 1 WHERE false");
    write(dir.path(), "README.md", "not a test");

    let suite = SqlSuite::discover(dir.path()).unwrap();
    let names: Vec<&str> = suite.tests().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a_first", "b_second", "orders/no_nulls"]);
}

#[test]
fn test_setup_is_not_a_test() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "setup.sql", "CREATE TABLE {{ schema }}.t (id INT)");
    write(dir.path(), "check.sql", "SELECT * FROM {{ schema }}.t WHERE id IS NULL");

    let suite = SqlSuite::discover(dir.path()).unwrap();
    assert_eq!(suite.tests().len(), 1);

    let schema = Identifier::test_schema();
    let setup = suite.render_setup(&schema).unwrap().unwrap();
    assert_eq!(setup, format!("CREATE TABLE {}.t (id INT)", schema));
}

#[test]
fn test_nested_setup_is_a_test() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "orders/setup.sql", "SELECT 1 WHERE false");

    let suite = SqlSuite::discover(dir.path()).unwrap();
    assert_eq!(suite.tests()[0].name, "orders/setup");
    assert!(suite
        .render_setup(&Identifier::test_schema())
        .unwrap()
        .is_none());
}

#[test]
fn test_render_tests_binds_schema() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "rows.sql",
        "SELECT * FROM {{ schema }}.orders WHERE amount < 0",
    );

    let suite = SqlSuite::discover(dir.path()).unwrap();
    let schema = Identifier::test_schema();
    let rendered = suite.render_tests(&schema).unwrap();
    assert_eq!(
        rendered[0].sql,
        format!("SELECT * FROM {}.orders WHERE amount < 0", schema)
    );
}

#[test]
fn test_render_error_names_test() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.sql", "SELECT {{ schema ");

    let suite = SqlSuite::discover(dir.path()).unwrap();
    let err = suite.render_tests(&Identifier::test_schema()).unwrap_err();
    assert!(matches!(err, SuiteError::Render { ref name, .. } if name == "broken"));
}

#[test]
fn test_missing_directory() {
    let err = SqlSuite::discover(Path::new("/nonexistent/suite")).unwrap_err();
    assert!(matches!(err, SuiteError::SuiteNotFound { .. }));
}

#[test]
fn test_empty_suite() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "setup.sql", "SELECT 1");

    let err = SqlSuite::discover(dir.path()).unwrap_err();
    assert!(matches!(err, SuiteError::EmptySuite { .. }));
}
