//! Headless stand-ins for the prompt and the filesystem.
//!
//! Built for tests and enabled for other crates with the `test-util` feature.

use crate::io_ops::{PersistenceError, join_lines, split_lines};
use crate::{PersistenceGateway, Prompt};
use core_text::Line;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum Answer {
    Name(String),
    Cancel,
    Fail(String),
}

/// Pre-recorded prompt answers, consumed in order. Once the script runs
/// out every further question is answered with a cancellation.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    asked: Vec<(String, u16)>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, name: impl Into<String>) -> Self {
        self.answers.push_back(Answer::Name(name.into()));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.answers.push_back(Answer::Cancel);
        self
    }

    pub fn fail(mut self, reason: impl Into<String>) -> Self {
        self.answers.push_back(Answer::Fail(reason.into()));
        self
    }

    /// Labels and rows of every question asked so far.
    pub fn asked(&self) -> &[(String, u16)] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, label: &str, row: u16) -> anyhow::Result<Option<String>> {
        self.asked.push((label.to_string(), row));
        match self.answers.pop_front() {
            Some(Answer::Name(n)) => Ok(Some(n)),
            Some(Answer::Cancel) | None => Ok(None),
            Some(Answer::Fail(reason)) => Err(anyhow::anyhow!(reason)),
        }
    }
}

/// In-memory gateway for headless sessions. Files are stored as their
/// serialized bytes so loads go through the same line splitting as disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryGateway {
    files: HashMap<PathBuf, Vec<u8>>,
    read_only: bool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Make every save fail with `PermissionDenied`.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&mut self, path: &Path) -> Result<Vec<Line>, PersistenceError> {
        self.files
            .get(path)
            .map(|content| split_lines(content))
            .ok_or_else(|| PersistenceError::Read {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn save(&mut self, path: &Path, lines: &[Line]) -> Result<(), PersistenceError> {
        if self.read_only {
            return Err(PersistenceError::Write {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        self.files.insert(path.to_path_buf(), join_lines(lines));
        Ok(())
    }
}
