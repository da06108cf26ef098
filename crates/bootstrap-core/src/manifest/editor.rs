//! Line-level metadata insertion for `pyproject.toml`
//!
//! The manifest is edited as plain lines rather than through a TOML document
//! model so that everything outside the inserted block round-trips
//! byte-for-byte. New lines go directly after the `readme` line, reuse its
//! indentation, and are skipped when a line with the same key already exists
//! anywhere in the file, which makes the edit safe to repeat.

use super::license::License;
use crate::error::{Error, Result};
use std::fmt;

/// Key of the line new metadata is anchored on
pub const ANCHOR_KEY: &str = "readme";

const CLASSIFIERS: &str =
    r#"["Programming Language :: Python :: 3","Natural Language :: English",]"#;

/// Metadata keys the editor may insert, in insertion priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    Authors,
    License,
    LicenseFiles,
    Classifiers,
}

impl MetadataKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Authors => "authors",
            MetadataKey::License => "license",
            MetadataKey::LicenseFiles => "license-files",
            MetadataKey::Classifiers => "classifiers",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate line, without indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLine {
    pub key: MetadataKey,
    pub body: String,
}

impl MetadataLine {
    fn new(key: MetadataKey, value: impl fmt::Display) -> Self {
        Self {
            body: format!("{} = {}", key.as_str(), value),
            key,
        }
    }
}

/// Values the metadata lines are derived from
#[derive(Debug, Clone, Default)]
pub struct ProjectMetadata {
    pub author_name: String,
    pub author_email: String,
    pub license: License,
}

impl ProjectMetadata {
    /// Candidate lines in priority order; license lines only exist when a license is selected
    pub fn candidates(&self) -> Vec<MetadataLine> {
        let mut lines = vec![MetadataLine::new(
            MetadataKey::Authors,
            format!(
                r#"[{{name = "{}", email = "{}"}}]"#,
                escape_basic_string(&self.author_name),
                escape_basic_string(&self.author_email)
            ),
        )];

        if let Some(spdx) = self.license.spdx_id() {
            lines.push(MetadataLine::new(
                MetadataKey::License,
                format!(r#""{}""#, spdx),
            ));
        }
        if self.license.license_file().is_some() {
            lines.push(MetadataLine::new(
                MetadataKey::LicenseFiles,
                r#"["LICENSE"]"#,
            ));
        }

        lines.push(MetadataLine::new(MetadataKey::Classifiers, CLASSIFIERS));
        lines
    }
}

/// Result of an insertion pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Full manifest text with a single trailing newline
    pub text: String,
    /// Keys actually inserted, in order
    pub inserted: Vec<MetadataKey>,
}

impl EditOutcome {
    pub fn changed(&self) -> bool {
        !self.inserted.is_empty()
    }
}

/// Insert `candidates` after the anchor line of `text`, skipping keys already present
pub fn insert_metadata(text: &str, candidates: &[MetadataLine]) -> Result<EditOutcome> {
    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();

    let anchor = lines
        .iter()
        .position(|line| line.trim().starts_with(ANCHOR_KEY))
        .ok_or(Error::AnchorNotFound { anchor: ANCHOR_KEY })?;

    let indent = leading_whitespace(&lines[anchor]).to_owned();
    let mut cursor = anchor + 1;
    let mut inserted = Vec::new();

    for candidate in candidates {
        if has_key(&lines, candidate.key) {
            continue;
        }
        lines.insert(cursor, format!("{}{}", indent, candidate.body));
        cursor += 1;
        inserted.push(candidate.key);
    }

    let mut text = lines.join("\n");
    text.push('\n');

    Ok(EditOutcome { text, inserted })
}

/// Prefix match on the trimmed line, so `license-files` also counts as `license`
fn has_key(lines: &[String], key: MetadataKey) -> bool {
    lines
        .iter()
        .any(|line| line.trim().starts_with(key.as_str()))
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn escape_basic_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRESH: &str = "[project]\n\
                         name = \"sample\"\n\
                         version = \"0.1.0\"\n\
                         description = \"Add your description here\"\n\
                         readme = \"README.md\"\n\
                         requires-python = \">=3.12\"\n\
                         dependencies = []\n";

    fn metadata(license: License) -> ProjectMetadata {
        ProjectMetadata {
            author_name: "A. Dev".to_string(),
            author_email: "dev@example.com".to_string(),
            license,
        }
    }

    fn edit(text: &str, license: License) -> EditOutcome {
        insert_metadata(text, &metadata(license).candidates()).unwrap()
    }

    #[test]
    fn test_inserts_block_after_anchor_in_priority_order() {
        let outcome = edit(FRESH, License::Mit);
        let lines: Vec<&str> = outcome.text.lines().collect();

        assert_eq!(lines[4], "readme = \"README.md\"");
        assert_eq!(
            lines[5],
            r#"authors = [{name = "A. Dev", email = "dev@example.com"}]"#
        );
        assert_eq!(lines[6], r#"license = "MIT""#);
        assert_eq!(lines[7], r#"license-files = ["LICENSE"]"#);
        assert_eq!(
            lines[8],
            r#"classifiers = ["Programming Language :: Python :: 3","Natural Language :: English",]"#
        );
        assert_eq!(lines[9], "requires-python = \">=3.12\"");
        assert_eq!(
            outcome.inserted,
            vec![
                MetadataKey::Authors,
                MetadataKey::License,
                MetadataKey::LicenseFiles,
                MetadataKey::Classifiers
            ]
        );
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let once = edit(FRESH, License::Apache2);
        let twice = edit(&once.text, License::Apache2);

        assert_eq!(once.text, twice.text);
        assert!(!twice.changed());
    }

    #[test]
    fn test_no_license_lines_without_license() {
        let outcome = edit(FRESH, License::None);

        assert_eq!(
            outcome.inserted,
            vec![MetadataKey::Authors, MetadataKey::Classifiers]
        );
        assert!(!outcome.text.contains("license"));

        let lines: Vec<&str> = outcome.text.lines().collect();
        assert!(lines[5].starts_with("authors"));
        assert!(lines[6].starts_with("classifiers"));
    }

    #[test]
    fn test_unknown_license_behaves_like_none() {
        let outcome = edit(FRESH, License::from_key("Unlicense"));
        assert!(!outcome.text.contains("license"));
        assert!(outcome.text.contains("authors = "));
        assert!(outcome.text.contains("classifiers = "));
    }

    #[test]
    fn test_existing_license_line_is_not_duplicated() {
        let text = FRESH.replace(
            "dependencies = []",
            "license = \"BSD-3-Clause\"\ndependencies = []",
        );
        let outcome = edit(&text, License::Mit);

        let license_lines = outcome
            .text
            .lines()
            .filter(|l| l.trim().starts_with("license ="))
            .count();
        assert_eq!(license_lines, 1);
        assert!(outcome.text.contains("license = \"BSD-3-Clause\""));
        assert_eq!(
            outcome.inserted,
            vec![
                MetadataKey::Authors,
                MetadataKey::LicenseFiles,
                MetadataKey::Classifiers
            ]
        );
    }

    #[test]
    fn test_existing_license_files_line_also_counts_as_license() {
        let text = FRESH.replace(
            "dependencies = []",
            "license-files = [\"COPYING\"]\ndependencies = []",
        );
        let outcome = edit(&text, License::Mit);
        assert_eq!(
            outcome.inserted,
            vec![MetadataKey::Authors, MetadataKey::Classifiers]
        );
    }

    #[test]
    fn test_skipped_candidates_leave_no_gap() {
        let text = FRESH.replace(
            "dependencies = []",
            "authors = [{name = \"Someone\"}]\ndependencies = []",
        );
        let outcome = edit(&text, License::Mit);
        let lines: Vec<&str> = outcome.text.lines().collect();

        assert_eq!(lines[4], "readme = \"README.md\"");
        assert!(lines[5].starts_with("license = "));
        assert!(lines[6].starts_with("license-files = "));
        assert!(lines[7].starts_with("classifiers = "));
    }

    #[test]
    fn test_anchor_indentation_is_reused() {
        let text = "[project]\n    name = \"sample\"\n\treadme = \"README.md\"\n";
        let outcome = edit(text, License::GplV3);

        for line in outcome.text.lines().skip(3) {
            assert!(line.starts_with('\t'), "line not indented: {:?}", line);
            assert!(!line.starts_with("\t "), "extra indent on: {:?}", line);
        }
        assert!(outcome.text.contains("\tlicense = \"GPL-3.0-or-later\""));
    }

    #[test]
    fn test_first_matching_anchor_wins() {
        let text = "readme = \"A.md\"\n[tool.x]\nreadme = \"B.md\"\n";
        let outcome = edit(text, License::None);
        let lines: Vec<&str> = outcome.text.lines().collect();
        assert!(lines[1].starts_with("authors"));
        assert_eq!(lines[4], "readme = \"B.md\"");
    }

    #[test]
    fn test_missing_anchor_fails() {
        let err = insert_metadata(
            "[project]\nname = \"sample\"\n",
            &metadata(License::Mit).candidates(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::AnchorNotFound { anchor: "readme" }));
    }

    #[test]
    fn test_single_trailing_newline() {
        let outcome = edit("readme = \"README.md\"", License::None);
        assert!(outcome.text.ends_with("]\n"));
        assert!(!outcome.text.ends_with("\n\n"));
    }

    #[test]
    fn test_author_quotes_are_escaped() {
        let meta = ProjectMetadata {
            author_name: r#"Jo "JJ" Smith"#.to_string(),
            author_email: String::new(),
            license: License::None,
        };
        let authors = &meta.candidates()[0];
        assert_eq!(
            authors.body,
            r#"authors = [{name = "Jo \"JJ\" Smith", email = ""}]"#
        );
    }
}
