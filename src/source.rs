//! Line-oriented key sources.
//!
//! Each line of the input becomes one key. Lines are raw bytes; nothing here
//! assumes UTF-8.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::RadixTree;

/// Options controlling how lines are turned into keys.
#[derive(Debug, Clone)]
pub struct KeySource {
    /// Strip a trailing `\n` or `\r\n`.
    pub trim_line_endings: bool,
    /// Strip ASCII whitespace from both ends.
    pub trim_whitespace: bool,
    /// Ignore lines left empty after trimming.
    pub skip_empty: bool,
    /// Ignore lines starting with this byte.
    pub comment_prefix: Option<u8>,
}

impl Default for KeySource {
    fn default() -> Self {
        Self {
            trim_line_endings: true,
            trim_whitespace: false,
            skip_empty: true,
            comment_prefix: None,
        }
    }
}

/// Summary of a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read from the input.
    pub lines: usize,
    /// Keys that created a new leaf.
    pub inserted: usize,
    /// Lines dropped as empty or comments.
    pub skipped: usize,
}

impl KeySource {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether trailing line terminators are stripped.
    pub fn with_trim_line_endings(mut self, yes: bool) -> Self {
        self.trim_line_endings = yes;
        self
    }

    /// Set whether surrounding ASCII whitespace is stripped.
    pub fn with_trim_whitespace(mut self, yes: bool) -> Self {
        self.trim_whitespace = yes;
        self
    }

    /// Set whether empty lines are ignored.
    pub fn with_skip_empty(mut self, yes: bool) -> Self {
        self.skip_empty = yes;
        self
    }

    /// Ignore lines starting with `prefix`.
    pub fn with_comment_prefix(mut self, prefix: u8) -> Self {
        self.comment_prefix = Some(prefix);
        self
    }

    /// Turn one raw line into a key, or `None` if the line is skipped.
    pub fn key_from_line<'a>(&self, mut line: &'a [u8]) -> Option<&'a [u8]> {
        if self.trim_line_endings {
            line = line.strip_suffix(b"\n").unwrap_or(line);
            line = line.strip_suffix(b"\r").unwrap_or(line);
        }
        if self.trim_whitespace {
            line = line.trim_ascii();
        }
        if self.skip_empty && line.is_empty() {
            return None;
        }
        if let Some(prefix) = self.comment_prefix {
            if line.first() == Some(&prefix) {
                return None;
            }
        }
        Some(line)
    }

    /// Call `f` with every key read from `reader`, returning the line count
    /// and number of skipped lines.
    fn for_each_key<R: BufRead>(
        &self,
        mut reader: R,
        mut f: impl FnMut(&[u8]),
    ) -> Result<(usize, usize)> {
        let mut buf = Vec::new();
        let mut lines = 0;
        let mut skipped = 0;
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| Error::Read {
                    line: lines + 1,
                    source,
                })?;
            if n == 0 {
                break;
            }
            lines += 1;
            match self.key_from_line(&buf) {
                Some(key) => f(key),
                None => skipped += 1,
            }
        }
        Ok((lines, skipped))
    }

    /// Insert every key read from `reader` into `tree`.
    pub fn load_into<R: BufRead>(&self, tree: &mut RadixTree, reader: R) -> Result<LoadStats> {
        let mut inserted = 0;
        let (lines, skipped) = self.for_each_key(reader, |key| {
            if tree.insert(key) {
                inserted += 1;
            }
        })?;

        let stats = LoadStats {
            lines,
            inserted,
            skipped,
        };
        debug!(lines, inserted, skipped, "loaded keys");
        Ok(stats)
    }

    /// Insert every key in the file at `path` into `tree`.
    pub fn load_file(&self, tree: &mut RadixTree, path: impl AsRef<Path>) -> Result<LoadStats> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading key file");
        self.load_into(tree, BufReader::new(file))
    }

    /// Collect the keys from `reader` without touching a tree.
    pub fn read_keys<R: BufRead>(&self, reader: R) -> Result<Vec<Vec<u8>>> {
        let mut keys = Vec::new();
        self.for_each_key(reader, |key| keys.push(key.to_vec()))?;
        Ok(keys)
    }
}
