//! The command-interpreter boundary
//!
//! The harness only needs one capability from the system under test: resolve
//! an input string to the canonical command it expands to. That surface is a
//! single-method trait here; the interpreter behind it (a debugger session, a
//! shell, a fake in a test) is owned entirely by the caller.

use anyhow::{Context, Result};
use cmd_lib::run_fun;
use tracing::{debug, trace};

/// A command-interpreting system that can expand an abbreviation to its
/// canonical command.
///
/// `resolve` is invoked strictly sequentially; implementations are not
/// required to be thread-safe, but re-resolving the same input must be safe
/// (the resolver may be run against the same interpreter repeatedly).
pub trait CommandInterpreter {
    /// Expand `text` to the canonical command it abbreviates.
    ///
    /// An `Err` means the interpreter could not process the input at all
    /// (unknown command, malformed input, internal error); the verification
    /// layer records it as a resolution failure rather than propagating it.
    fn resolve(&self, text: &str) -> Result<String>;
}

impl<F> CommandInterpreter for F
where
    F: Fn(&str) -> Result<String>,
{
    fn resolve(&self, text: &str) -> Result<String> {
        self(text)
    }
}

/// Resolves abbreviations by running an external command.
///
/// The command is a template: every `{}` is replaced with the abbreviation
/// (shell-quoted); if the template contains no placeholder the abbreviation
/// is appended as a final quoted argument. The command's stdout, with the
/// trailing newline stripped, is taken as the canonical form. A non-zero
/// exit or spawn failure is a resolution failure.
#[derive(Debug, Clone)]
pub struct ProcessInterpreter {
    command_template: String,
}

impl ProcessInterpreter {
    pub fn new(command_template: impl Into<String>) -> Self {
        Self {
            command_template: command_template.into(),
        }
    }

    fn build_command(&self, text: &str) -> String {
        // Single-quote the abbreviation for the shell; embedded quotes use
        // the standard '\'' escape
        let quoted = format!("'{}'", text.replace('\'', r"'\''"));
        if self.command_template.contains("{}") {
            self.command_template.replace("{}", &quoted)
        } else {
            format!("{} {}", self.command_template, quoted)
        }
    }
}

impl CommandInterpreter for ProcessInterpreter {
    fn resolve(&self, text: &str) -> Result<String> {
        let command = self.build_command(text);
        debug!("Resolving {:?} via: {}", text, command);

        let output = run_fun!(bash -c $command)
            .with_context(|| format!("Resolver command failed for {:?}", text))?;

        let canonical = output.strip_suffix('\n').unwrap_or(&output).to_string();
        trace!("Resolved {:?} -> {:?}", text, canonical);
        Ok(canonical)
    }
}
