//! File persistence behind a narrow gateway.
//!
//! The dispatcher only ever sees `load(path) -> lines` and
//! `save(path, lines)`. Serialization is one `\n` per line, including the
//! last one. Reading splits on `\n`, strips a trailing `\r` from each line
//! and does not produce an extra empty line for a final terminator, so
//! `save` followed by `load` returns the same lines.

use core_text::Line;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Loading failed. Can't open file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error while writing file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    pub fn path(&self) -> &Path {
        match self {
            PersistenceError::Read { path, .. } | PersistenceError::Write { path, .. } => path,
        }
    }
}

pub trait PersistenceGateway {
    fn load(&mut self, path: &Path) -> Result<Vec<Line>, PersistenceError>;
    fn save(&mut self, path: &Path, lines: &[Line]) -> Result<(), PersistenceError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &mut G {
    fn load(&mut self, path: &Path) -> Result<Vec<Line>, PersistenceError> {
        (**self).load(path)
    }

    fn save(&mut self, path: &Path, lines: &[Line]) -> Result<(), PersistenceError> {
        (**self).save(path, lines)
    }
}

/// Split file content into lines.
pub fn split_lines(content: &[u8]) -> Vec<Line> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|b| *b == b'\n')
        .map(|l| l.strip_suffix(b"\r").unwrap_or(l).to_vec())
        .collect()
}

/// Serialize lines, each followed by a single `\n`.
pub fn join_lines(lines: &[Line]) -> Vec<u8> {
    let mut out = Vec::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}

/// Paths are used as given; relative ones resolve against the process working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsGateway;

impl PersistenceGateway for FsGateway {
    fn load(&mut self, path: &Path) -> Result<Vec<Line>, PersistenceError> {
        match std::fs::read(path) {
            Ok(content) => {
                let lines = split_lines(&content);
                tracing::debug!(target: "io", file = %path.display(), size_bytes = content.len(), line_count = lines.len(), "file_read_ok");
                Ok(lines)
            }
            Err(source) => {
                tracing::error!(target: "io", file = %path.display(), ?source, "file_open_error");
                Err(PersistenceError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    fn save(&mut self, path: &Path, lines: &[Line]) -> Result<(), PersistenceError> {
        let content = join_lines(lines);
        match std::fs::write(path, &content) {
            Ok(()) => {
                tracing::debug!(target: "io", file = %path.display(), size_bytes = content.len(), line_count = lines.len(), "file_write_ok");
                Ok(())
            }
            Err(source) => {
                tracing::error!(target: "io", file = %path.display(), ?source, "file_write_error");
                Err(PersistenceError::Write {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}
