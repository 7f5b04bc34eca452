//! User interaction steps
//!
//! Every point where the tool waits on a person goes through [`Prompter`]:
//! reading the two directory fragments, confirming an install, and pausing
//! between viewer runs. [`TerminalPrompter`] asks on the terminal;
//! [`AutoPrompter`] answers from a script so the comparison can run without
//! one.

use crate::error::{Result, TreeDiffError};
use dialoguer::{Confirm, Input};
use std::collections::VecDeque;
use std::path::Path;

/// Source of answers for the interactive steps of a run
pub trait Prompter {
    /// Ask for a path fragment that will be joined onto `base`
    fn read_path(&mut self, label: &str, base: &Path) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Block until the user is ready to go on
    fn pause(&mut self, message: &str) -> Result<()>;
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn read_path(&mut self, label: &str, base: &Path) -> Result<String> {
        (**self).read_path(label, base)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        (**self).confirm(message)
    }

    fn pause(&mut self, message: &str) -> Result<()> {
        (**self).pause(message)
    }
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_path(&mut self, label: &str, base: &Path) -> Result<String> {
        Input::<String>::new()
            .with_prompt(format!(
                "What should {} (off of the current) be?\n\t{}{}",
                label,
                base.display(),
                std::path::MAIN_SEPARATOR
            ))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| TreeDiffError::prompt(format!("Failed to get user input: {}", e)))
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(true)
            .interact()
            .map_err(|e| TreeDiffError::prompt(format!("Failed to get user input: {}", e)))
    }

    fn pause(&mut self, message: &str) -> Result<()> {
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map(|_| ())
            .map_err(|e| TreeDiffError::prompt(format!("Failed to get user input: {}", e)))
    }
}

/// Non-interactive prompter
///
/// Paths come from a queue, confirmations get a fixed answer and pauses return
/// immediately. Pauses are counted so callers can check how often the run
/// would have stopped.
#[derive(Debug, Default)]
pub struct AutoPrompter {
    paths: VecDeque<String>,
    answer: bool,
    pauses: usize,
}

impl AutoPrompter {
    /// Prompter that confirms everything and has no queued paths
    pub fn yes() -> Self {
        Self {
            answer: true,
            ..Default::default()
        }
    }

    /// Prompter that declines every confirmation
    pub fn no() -> Self {
        Self::default()
    }

    /// Queue path answers, handed out in order
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// How many times [`Prompter::pause`] was called
    pub fn pauses(&self) -> usize {
        self.pauses
    }
}

impl Prompter for AutoPrompter {
    fn read_path(&mut self, label: &str, _base: &Path) -> Result<String> {
        self.paths
            .pop_front()
            .ok_or_else(|| TreeDiffError::NoInput(label.to_string()))
    }

    fn confirm(&mut self, _message: &str) -> Result<bool> {
        Ok(self.answer)
    }

    fn pause(&mut self, _message: &str) -> Result<()> {
        self.pauses += 1;
        Ok(())
    }
}
