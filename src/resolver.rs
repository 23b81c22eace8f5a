//! Abbreviation verification: drive an interpreter through a mapping table
//!
//! The resolver takes a [`CommandInterpreter`] and a [`MappingTable`] and
//! checks that every abbreviation expands to exactly its expected canonical
//! command. All outcomes are collected into a [`ResolutionReport`] — the run
//! never stops at the first failure, because abbreviation tables rot
//! incrementally as commands are added and a single run should surface every
//! broken entry, not just the first.
//!
//! Per-mapping problems are outcomes, never errors: an interpreter that
//! rejects an abbreviation produces a `ResolutionFailed` entry and the run
//! continues. Comparison against the expected canonical command is exact and
//! case-sensitive, with no trimming beyond what the interpreter itself
//! returns.
//!
//! Resolutions are strictly sequential in table order. Interpreters of the
//! kind being checked are typically a single stateful session and are not
//! safe for concurrent use; the resolver never assumes otherwise.

use crate::interpreter::CommandInterpreter;
use crate::table::{AbbreviationMapping, MappingTable};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::{debug, warn};

/// Verifies abbreviation tables against a command interpreter.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationResolver {
    /// Whether to log each resolution as it happens
    pub verbose: bool,
}

impl AbbreviationResolver {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve every abbreviation in `table` and compare against its expected
    /// canonical command, collecting one outcome per mapping in table order.
    ///
    /// The report always contains exactly one entry per mapping; an empty
    /// table yields an empty, trivially-passed report. Re-running with the
    /// same interpreter and table is safe.
    pub fn verify(
        &self,
        interpreter: &dyn CommandInterpreter,
        table: &MappingTable,
    ) -> ResolutionReport {
        let mut entries = Vec::with_capacity(table.len());

        for mapping in table.iter() {
            let outcome = match interpreter.resolve(&mapping.short) {
                Ok(got) if got == mapping.canonical => ResolutionOutcome::Matched,
                Ok(got) => {
                    warn!(
                        "{:?} resolved to {:?}, expected {:?}",
                        mapping.short, got, mapping.canonical
                    );
                    ResolutionOutcome::Mismatched { got }
                }
                Err(err) => {
                    warn!("{:?} failed to resolve: {:#}", mapping.short, err);
                    ResolutionOutcome::ResolutionFailed {
                        reason: format!("{:#}", err),
                    }
                }
            };

            if self.verbose {
                debug!("{:?} -> {:?}", mapping.short, outcome);
            }
            entries.push(ResolutionEntry {
                mapping: mapping.clone(),
                outcome,
            });
        }

        let passed = entries
            .iter()
            .all(|entry| entry.outcome == ResolutionOutcome::Matched);
        ResolutionReport { entries, passed }
    }
}

/// Result of resolving one abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The interpreter returned exactly the expected canonical command
    Matched,
    /// The interpreter succeeded but returned something else
    Mismatched { got: String },
    /// The interpreter could not process the abbreviation at all
    ResolutionFailed { reason: String },
}

/// One mapping together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionEntry {
    #[serde(flatten)]
    pub mapping: AbbreviationMapping,
    #[serde(flatten)]
    pub outcome: ResolutionOutcome,
}

/// Complete record of one verification run: one entry per mapping, in table
/// order, plus the overall pass/fail flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub entries: Vec<ResolutionEntry>,
    pub passed: bool,
}

impl ResolutionReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that did not match.
    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome != ResolutionOutcome::Matched)
            .count()
    }

    /// Render every non-matched outcome as a multi-line listing, or a short
    /// all-passed message when the run was clean.
    pub fn summarize(&self) -> String {
        if self.passed {
            return format!("All {} abbreviation(s) resolved correctly", self.len());
        }

        let mut out = format!(
            "{} of {} abbreviation(s) failed to resolve correctly:\n",
            self.failure_count(),
            self.len()
        );
        for entry in &self.entries {
            match &entry.outcome {
                ResolutionOutcome::Matched => {}
                ResolutionOutcome::Mismatched { got } => {
                    let _ = writeln!(
                        out,
                        "  {:?}: expected {:?}, got {:?}",
                        entry.mapping.short, entry.mapping.canonical, got
                    );
                }
                ResolutionOutcome::ResolutionFailed { reason } => {
                    let _ = writeln!(
                        out,
                        "  {:?}: expected {:?}, resolution failed: {}",
                        entry.mapping.short, entry.mapping.canonical, reason
                    );
                }
            }
        }
        out.trim_end().to_string()
    }

    /// Print a summary of the verification results
    pub fn print_summary(&self, verbose: bool) {
        if verbose {
            for entry in &self.entries {
                match &entry.outcome {
                    ResolutionOutcome::Matched => {
                        println!("  ✓ {:?} -> {:?}", entry.mapping.short, entry.mapping.canonical);
                    }
                    ResolutionOutcome::Mismatched { got } => {
                        println!(
                            "  ✗ {:?} -> {:?} (expected {:?})",
                            entry.mapping.short, got, entry.mapping.canonical
                        );
                    }
                    ResolutionOutcome::ResolutionFailed { reason } => {
                        println!("  ✗ {:?} failed: {}", entry.mapping.short, reason);
                    }
                }
            }
        }
        println!("{}", self.summarize());
    }
}
