//! Abbreviation mapping tables: types, file loading, and discovery
//!
//! A mapping table is an ordered list of `(short, canonical)` pairs describing
//! which full command each abbreviation is expected to expand to. Order is
//! preserved end to end so that reports are deterministic and reproducible;
//! it has no effect on correctness.
//!
//! ## Supported file formats
//!
//! - `.yaml` / `.yml` — a YAML list of `{ short, canonical }` entries
//! - `.json` — the same shape as JSON
//! - `.txt` / `.abbrevs` — plain text, one mapping per line:
//!   `short => canonical`, with optional double quotes around either side
//!   (needed when the abbreviation contains spaces, e.g. `"br s"`).
//!   Blank lines and `#` comments are ignored.
//!
//! Tables are read-only after loading; an empty `short` is rejected at load
//! time since such an entry can never be resolved.

use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One expected expansion: an abbreviation and the canonical command it
/// should resolve to. Both sides are opaque strings; canonical names that
/// look internal (e.g. `_regexp-display`) get no special treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviationMapping {
    pub short: String,
    pub canonical: String,
}

impl AbbreviationMapping {
    pub fn new(short: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            canonical: canonical.into(),
        }
    }
}

/// Ordered, read-only sequence of abbreviation mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    mappings: Vec<AbbreviationMapping>,
}

impl MappingTable {
    pub fn new(mappings: Vec<AbbreviationMapping>) -> Result<Self> {
        for (index, mapping) in mappings.iter().enumerate() {
            if mapping.short.is_empty() {
                anyhow::bail!(
                    "Mapping {} (canonical {:?}) has an empty abbreviation",
                    index + 1,
                    mapping.canonical
                );
            }
        }
        Ok(Self { mappings })
    }

    /// Build a table from `(short, canonical)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: Vec<(S, S)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(short, canonical)| AbbreviationMapping::new(short, canonical))
                .collect(),
        )
    }

    /// Load a table from a file, picking the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read table file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let mappings = match extension {
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML table: {}", path.display()))?,
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON table: {}", path.display()))?,
            "txt" | "abbrevs" => parse_text_table(&contents)
                .with_context(|| format!("Failed to parse text table: {}", path.display()))?,
            other => anyhow::bail!(
                "Unrecognized table format '.{}': {}",
                other,
                path.display()
            ),
        };

        let table = Self::new(mappings)
            .with_context(|| format!("Invalid table: {}", path.display()))?;
        debug!("Loaded {} mappings from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbbreviationMapping> {
        self.mappings.iter()
    }
}

/// File extensions recognized as mapping tables during discovery.
const TABLE_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "txt", "abbrevs"];

/// Parse the plain-text table format: one `short => canonical` mapping per
/// line, either side optionally double-quoted.
fn parse_text_table(contents: &str) -> Result<Vec<AbbreviationMapping>> {
    // Each side is either a quoted string or a bare token without spaces
    let line_re = Regex::new(r#"^\s*(?:"([^"]+)"|(\S+))\s*=>\s*(?:"([^"]+)"|(\S.*?))\s*$"#)
        .expect("text table regex is valid");

    let mut mappings = Vec::new();
    for (line_num, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let captures = line_re.captures(trimmed).with_context(|| {
            format!(
                "Line {}: expected 'short => canonical', got {:?}",
                line_num + 1,
                trimmed
            )
        })?;

        let short = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let canonical = captures
            .get(3)
            .or_else(|| captures.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default();

        mappings.push(AbbreviationMapping::new(short, canonical));
    }

    Ok(mappings)
}

/// Discover mapping table files under the given paths.
///
/// Files are taken as-is (after the ignore check); directories are walked
/// recursively for files with a recognized table extension. Results are
/// sorted within each directory walk so discovery order is deterministic.
pub fn discover_tables(paths: &[PathBuf], ignore_patterns: &[Pattern]) -> Result<Vec<PathBuf>> {
    let mut tables = Vec::new();

    for path in paths {
        if path.is_file() {
            if !is_ignored(path, ignore_patterns) {
                tables.push(path.clone());
            }
        } else if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .map(|e| e.path().to_path_buf())
                .filter(|p| has_table_extension(p) && !is_ignored(p, ignore_patterns))
                .collect();
            found.sort();
            tables.extend(found);
        } else {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    debug!("Discovered {} table file(s)", tables.len());
    Ok(tables)
}

fn has_table_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| TABLE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn is_ignored(path: &Path, ignore_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    ignore_patterns.iter().any(|p| p.matches(&path_str))
}

/// Compile glob pattern strings, reporting the offending pattern on error.
pub fn compile_ignore_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_table_parsing() {
        let contents = r#"
# common short spellings
"br s" => "breakpoint set"
di => disassemble
disp => _regexp-display
"#;
        let mappings = parse_text_table(contents).unwrap();
        assert_eq!(mappings.len(), 3);
        assert_eq!(mappings[0], AbbreviationMapping::new("br s", "breakpoint set"));
        assert_eq!(mappings[1], AbbreviationMapping::new("di", "disassemble"));
        assert_eq!(mappings[2], AbbreviationMapping::new("disp", "_regexp-display"));
    }

    #[test]
    fn test_text_table_multiword_shorts_need_quotes() {
        // An unquoted short stops at the first space, so this cannot parse
        assert!(parse_text_table("ta st a => target stop-hook add").is_err());

        let mappings = parse_text_table(r#""ta st a" => target stop-hook add"#).unwrap();
        assert_eq!(
            mappings[0],
            AbbreviationMapping::new("ta st a", "target stop-hook add")
        );
    }

    #[test]
    fn test_text_table_rejects_malformed_line() {
        let err = parse_text_table("just one token").unwrap_err();
        assert!(err.to_string().contains("Line 1"));
    }

    #[test]
    fn test_empty_short_rejected() {
        let err = MappingTable::new(vec![AbbreviationMapping::new("", "breakpoint set")])
            .unwrap_err();
        assert!(err.to_string().contains("empty abbreviation"));
    }

    #[test]
    fn test_yaml_table_round_trip() {
        let yaml = "- short: di\n  canonical: disassemble\n- short: br s\n  canonical: breakpoint set\n";
        let mappings: Vec<AbbreviationMapping> = serde_yaml::from_str(yaml).unwrap();
        let table = MappingTable::new(mappings).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().short, "di");
    }

    #[test]
    fn test_discover_skips_ignored_and_unknown_extensions() {
        let dir = std::env::temp_dir().join(format!("abbrevcheck_discover_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.yaml"), "[]").unwrap();
        fs::write(dir.join("b.txt"), "").unwrap();
        fs::write(dir.join("notes.md"), "").unwrap();
        fs::write(dir.join("skip.yaml"), "[]").unwrap();

        let ignore = compile_ignore_patterns(&["**/skip.yaml".to_string()]).unwrap();
        let found = discover_tables(&[dir.clone()], &ignore).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.txt"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_discover_missing_path_is_an_error() {
        let missing = PathBuf::from("/nonexistent/abbrevcheck/tables");
        assert!(discover_tables(&[missing], &[]).is_err());
    }
}
