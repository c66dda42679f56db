//! Fixture corpus runner.
//!
//! Every `tests/fixtures/*.wrt` file starts with an HTML comment holding
//! `key: "value"` metadata lines: `name`, `expected_result` (`valid` or
//! `error`), optional `expected_error_message` (matched as a substring) and
//! `description`. The whole file, metadata included, is fed through the
//! validator, so metadata text must stay free of template markup.

use std::fs;
use std::path::{Path, PathBuf};

use wrlint::validate;

#[derive(Debug, Default)]
struct FixtureHeader {
    name: String,
    expected_result: String,
    expected_error_message: Option<String>,
    description: String,
}

fn parse_header(content: &str, path: &Path) -> FixtureHeader {
    let mut header = FixtureHeader::default();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("<!--"),
        "{}: fixture must start with a metadata comment",
        path.display()
    );
    for line in lines {
        let line = line.trim();
        if line == "-->" {
            assert!(
                !header.name.is_empty(),
                "{}: metadata is missing 'name'",
                path.display()
            );
            assert!(
                !header.expected_result.is_empty(),
                "{}: metadata is missing 'expected_result'",
                path.display()
            );
            return header;
        }
        let Some((key, rest)) = line.split_once(':') else {
            panic!("{}: bad metadata line: {line}", path.display());
        };
        let value = rest.trim().trim_matches('"').to_string();
        match key.trim() {
            "name" => header.name = value,
            "expected_result" => header.expected_result = value,
            "expected_error_message" => header.expected_error_message = Some(value),
            "description" => header.description = value,
            other => panic!("{}: unknown metadata key: {other}", path.display()),
        }
    }
    panic!("{}: metadata comment never closed", path.display());
}

fn fixture_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir("tests/fixtures")
        .expect("read tests/fixtures")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "wrt"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no fixtures found under tests/fixtures");
    paths
}

#[test]
fn test_fixture_corpus() {
    for path in fixture_paths() {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("{}: {err}", path.display()));
        let header = parse_header(&content, &path);
        let findings = validate(&content);

        match header.expected_result.as_str() {
            "valid" => {
                assert!(
                    findings.is_empty(),
                    "{} ({}: {}): expected a clean report, got:\n{:#?}",
                    path.display(),
                    header.name,
                    header.description,
                    findings
                );
            }
            "error" => {
                assert!(
                    !findings.is_empty(),
                    "{} ({}: {}): expected findings, got none",
                    path.display(),
                    header.name,
                    header.description
                );
                if let Some(expected) = &header.expected_error_message {
                    assert!(
                        findings.iter().any(|f| f.message.contains(expected.as_str())),
                        "{} ({}): no message contains {:?}; findings:\n{:#?}",
                        path.display(),
                        header.name,
                        expected,
                        findings
                    );
                }
            }
            other => panic!(
                "{}: expected_result must be \"valid\" or \"error\", got {other:?}",
                path.display()
            ),
        }
        println!("✓ {} ({})", header.name, path.display());
    }
}

#[test]
fn test_fixture_metadata_is_inert() {
    // The metadata block itself must not trip the validator, or valid
    // fixtures could never pass. Check it in isolation per fixture.
    for path in fixture_paths() {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("{}: {err}", path.display()));
        let end = content
            .lines()
            .position(|line| line.trim() == "-->")
            .unwrap_or_else(|| panic!("{}: metadata comment never closed", path.display()));
        let header_text: String = content
            .lines()
            .take(end + 1)
            .map(|line| format!("{line}\n"))
            .collect();
        assert_eq!(
            validate(&header_text),
            vec![],
            "{}: metadata block produced findings",
            path.display()
        );
    }
}
