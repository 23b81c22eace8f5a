//! abbrevcheck - verify command-abbreviation tables against a command interpreter
//!
//! Command-line systems (debuggers, shells) let users type short spellings of
//! commands: `br s` for `breakpoint set`, `di` for `disassemble`. Those
//! shorthands rot as commands are added and renamed. This crate drives any
//! system exposing a resolve-abbreviation capability through a table of
//! expected expansions and reports every broken entry in one run.

pub mod config;
pub mod interpreter;
pub mod logging;
pub mod resolver;
pub mod table;

// Re-export the main types for easy access
pub use config::Config;
pub use interpreter::{CommandInterpreter, ProcessInterpreter};
pub use resolver::{AbbreviationResolver, ResolutionOutcome, ResolutionReport};
pub use table::{AbbreviationMapping, MappingTable};
