//! Tests for DocumentGenerator

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use rstest::rstest;
use tempfile::TempDir;

use docsmith::application::services::{DocKind, Outcome};
use docsmith::application::ApplicationError;
use docsmith::config::Settings;
use docsmith::infrastructure::traits::{CommandRunner, RealFileSystem};
use docsmith::infrastructure::ServiceContainer;
use docsmith::util::testing;

const PYPROJECT: &str = r#"
[project]
name = "sample-lib"
description = "A library for samples"
requires-python = ">=3.10"
authors = [{ name = "Ada Lovelace", email = "ada@example.com" }]
dependencies = ["requests>=2", "click"]
"#;

const MANIFEST: &str = r#"
root = "sample_lib"

[modules.sample_lib]
exports = ["foo", "Bar", "sub"]

[modules.sample_lib.members.foo]
kind = "function"
doc = "does foo"

[modules.sample_lib.members.Bar]
kind = "class"

[modules.sample_lib.members.sub]
module = "sample_lib.sub"

[modules."sample_lib.sub"]
exports = []
"#;

/// Command runner that must never be called by document generation.
struct NoCommands;

impl CommandRunner for NoCommands {
    fn status(&self, cmd: &str, _args: &[&str]) -> io::Result<ExitStatus> {
        panic!("unexpected command: {cmd}");
    }
}

/// Helper to create a project with metadata and an export manifest
fn create_project() -> TempDir {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pyproject.toml"), PYPROJECT).unwrap();
    fs::create_dir_all(temp.path().join("docs")).unwrap();
    fs::write(temp.path().join("docs/api.toml"), MANIFEST).unwrap();
    temp
}

fn container(root: &Path, settings: Settings) -> ServiceContainer {
    ServiceContainer::with_deps(
        settings,
        root,
        Arc::new(RealFileSystem),
        Arc::new(NoCommands),
    )
    .unwrap()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap_or_else(|e| panic!("{relative}: {e}"))
}

#[rstest]
#[case(DocKind::IndexFile, "docs/docs/index.md", "# sample-lib")]
#[case(DocKind::Installation, "docs/docs/installation.md", "pip install sample-lib")]
#[case(DocKind::Requirements, "docs/docs/requirements.md", "- `requests>=2`")]
#[case(DocKind::Usage, "docs/docs/usage.md", "import sample_lib")]
fn given_page_kind_when_generating_then_renders_into_docs_dir(
    #[case] kind: DocKind,
    #[case] target: &str,
    #[case] expected: &str,
) {
    // Arrange
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    let outcomes = generator.execute(kind, None).unwrap();

    // Assert
    assert_eq!(outcomes, vec![Outcome::Written(temp.path().join(target))]);
    let content = read(temp.path(), target);
    assert!(content.contains(expected), "{target}: {content}");
}

#[test]
fn given_requirements_when_generating_then_lists_python_and_dependencies() {
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    generator.execute(DocKind::Requirements, None).unwrap();

    let content = read(temp.path(), "docs/docs/requirements.md");
    assert!(content.contains("- Python `>=3.10`"));
    assert!(content.contains("- `requests>=2`\n- `click`"));
}

#[test]
fn given_existing_usage_when_generating_then_skips_and_keeps_content() {
    // Arrange
    let temp = create_project();
    fs::create_dir_all(temp.path().join("docs/docs")).unwrap();
    fs::write(temp.path().join("docs/docs/usage.md"), "hand written").unwrap();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    let outcomes = generator.execute(DocKind::Usage, None).unwrap();

    // Assert
    assert!(matches!(outcomes.as_slice(), [Outcome::Skipped { .. }]));
    assert_eq!(read(temp.path(), "docs/docs/usage.md"), "hand written");
}

#[rstest]
#[case(DocKind::Logo)]
#[case(DocKind::Project)]
fn given_no_project_name_when_generating_then_fails_before_any_io(#[case] kind: DocKind) {
    // Arrange
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    let err = generator.execute(kind, None).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::MissingProjectName(_)));
    assert!(!temp.path().join("docs/docs").exists());
    assert!(!temp.path().join("LICENSE").exists());
}

#[test]
fn given_licence_when_generating_then_writes_docs_page_and_root_license() {
    // Arrange
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    let outcomes = generator.execute(DocKind::Licence, None).unwrap();

    // Assert
    assert_eq!(
        outcomes,
        vec![
            Outcome::Written(temp.path().join("docs/docs/license.md")),
            Outcome::Written(temp.path().join("LICENSE")),
        ]
    );
    let expected = format!("Copyright (c) {} Ada Lovelace", Utc::now().year());
    assert!(read(temp.path(), "docs/docs/license.md").contains(&expected));
    assert_eq!(
        read(temp.path(), "LICENSE"),
        read(temp.path(), "docs/docs/license.md")
    );
}

#[test]
fn given_organization_setting_when_generating_licence_then_overrides_author() {
    let temp = create_project();
    let settings = Settings {
        organization_name: Some("Analytical Engines Ltd".into()),
        ..Settings::default()
    };
    let generator = container(temp.path(), settings).generator();

    generator.execute(DocKind::Licence, None).unwrap();

    assert!(read(temp.path(), "LICENSE").contains("Analytical Engines Ltd"));
}

#[test]
fn given_project_name_when_generating_project_then_writes_logo_and_licence() {
    // Arrange
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    let outcomes = generator.execute(DocKind::Project, Some("acme")).unwrap();

    // Assert
    let paths: Vec<_> = outcomes.iter().map(|o| o.path().clone()).collect();
    assert_eq!(
        paths,
        vec![
            temp.path().join("docs/docs/images/acme.svg"),
            temp.path().join("docs/docs/license.md"),
            temp.path().join("LICENSE"),
        ]
    );
    assert!(read(temp.path(), "docs/docs/images/acme.svg").contains(">acme</text>"));
}

#[test]
fn given_readme_when_generating_then_concatenates_sections_in_order() {
    // Arrange
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    let outcomes = generator.execute(DocKind::Readme, None).unwrap();

    // Assert
    assert_eq!(
        outcomes.last(),
        Some(&Outcome::Written(temp.path().join("README.md")))
    );
    let expected: String = ["index", "requirements", "installation", "usage"]
        .iter()
        .map(|section| read(temp.path(), &format!("docs/docs/{section}.md")) + "\n")
        .collect();
    assert_eq!(read(temp.path(), "README.md"), expected);
}

#[test]
fn given_explicit_project_name_when_generating_then_overrides_metadata_name() {
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    generator
        .execute(DocKind::IndexFile, Some("Shiny Name"))
        .unwrap();

    assert!(read(temp.path(), "docs/docs/index.md").starts_with("# Shiny Name"));
}

#[test]
fn given_mkdocs_when_generating_then_nav_lists_api_pages_sorted() {
    // Arrange
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    generator.execute(DocKind::Mkdocs, None).unwrap();

    // Assert
    let config: serde_yaml::Value =
        serde_yaml::from_str(&read(temp.path(), "docs/mkdocs.yml")).unwrap();
    assert_eq!(config["site_name"].as_str(), Some("sample-lib"));
    assert_eq!(config["docs_dir"].as_str(), Some("docs"));

    let nav = config["nav"].as_sequence().unwrap();
    let api = nav
        .iter()
        .find_map(|section| section.get("API Reference"))
        .expect("API Reference section");
    let entries: Vec<(String, String)> = api
        .as_sequence()
        .unwrap()
        .iter()
        .flat_map(|entry| entry.as_mapping().unwrap().iter())
        .map(|(k, v)| {
            (
                k.as_str().unwrap().to_string(),
                v.as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        entries,
        vec![
            ("Bar".to_string(), "api/class_Bar.md".to_string()),
            ("foo".to_string(), "api/function_foo.md".to_string()),
            ("sub".to_string(), "api/module_sub.md".to_string()),
        ]
    );
    assert!(temp.path().join("docs/docs/api/function_foo.md").is_file());
}

#[test]
fn given_docs_when_generating_then_produces_full_documentation_set() {
    // Arrange
    let temp = create_project();
    let generator = container(temp.path(), Settings::default()).generator();

    // Act
    generator.execute(DocKind::Docs, None).unwrap();

    // Assert
    for file in [
        "LICENSE",
        "README.md",
        "docs/mkdocs.yml",
        "docs/docs/license.md",
        "docs/docs/index.md",
        "docs/docs/requirements.md",
        "docs/docs/installation.md",
        "docs/docs/usage.md",
        "docs/docs/api/class_Bar.md",
        "docs/docs/api/function_foo.md",
        "docs/docs/api/module_sub.md",
    ] {
        assert!(temp.path().join(file).is_file(), "missing {file}");
    }
}

#[test]
fn given_template_override_when_generating_then_uses_project_template() {
    let temp = create_project();
    fs::create_dir_all(temp.path().join("docs/templates")).unwrap();
    fs::write(
        temp.path().join("docs/templates/index.md"),
        "Welcome to {{ project_name }} by {{ organization_name }}\n",
    )
    .unwrap();
    let settings = Settings {
        templates_dir: Some("docs/templates".into()),
        ..Settings::default()
    };
    let generator = container(temp.path(), settings).generator();

    generator.execute(DocKind::IndexFile, None).unwrap();

    assert_eq!(
        read(temp.path(), "docs/docs/index.md"),
        "Welcome to sample-lib by Ada Lovelace\n"
    );
}
