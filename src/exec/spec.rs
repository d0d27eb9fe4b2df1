// src/exec/spec.rs

use std::fmt;

use crate::errors::{AmonError, Result};

/// Which configured command a process belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Primary,
    Secondary,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Primary => f.write_str("primary"),
            Slot::Secondary => f.write_str("secondary"),
        }
    }
}

/// A command line split into program and arguments.
///
/// Splitting is plain whitespace splitting: there is no quoting, escaping or
/// shell expansion. Runs of whitespace count as one separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    raw: String,
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Parse a command line. Returns `None` for an empty or blank string.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let program = tokens.next()?;
        Some(Self {
            raw: line.trim().to_string(),
            program,
            args: tokens.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The configured commands: a required primary and an optional secondary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    primary: CommandLine,
    secondary: Option<CommandLine>,
}

impl CommandSpec {
    /// Build from raw strings. A blank secondary means "no secondary".
    pub fn new(primary: Option<&str>, secondary: Option<&str>) -> Result<Self> {
        let primary = primary
            .and_then(CommandLine::parse)
            .ok_or(AmonError::MissingCommand)?;
        let secondary = secondary.and_then(CommandLine::parse);
        Ok(Self { primary, secondary })
    }

    pub fn primary(&self) -> &CommandLine {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&CommandLine> {
        self.secondary.as_ref()
    }

    /// Slots in start order.
    pub fn entries(&self) -> impl Iterator<Item = (Slot, &CommandLine)> {
        std::iter::once((Slot::Primary, &self.primary))
            .chain(self.secondary.iter().map(|line| (Slot::Secondary, line)))
    }
}
