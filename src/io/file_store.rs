//! Flat-file record store
//!
//! One [`FileStore`] is bound to one text file holding one record per line.
//! The record kind is chosen by the type parameter, so the same store code
//! serves products and users.
//!
//! # Operations
//!
//! - `exists` - linear scan comparing the key column of every line
//! - `append` - add one encoded line at the end of the file
//! - `load_all` - decode every line, keeping good records and reporting bad lines
//! - `delete` - rewrite the file without the first line whose key matches
//!
//! # Error Handling
//!
//! - A missing file is an empty store, never an error
//! - Individual malformed lines are collected in [`LoadedRecords::skipped`]
//!   and never abort a load
//! - Other I/O failures are returned as `StoreError::IoError`
//!
//! # Durability
//!
//! `delete` writes the surviving lines to a temporary file in the same
//! directory, syncs it, then renames it over the original. A crash before the
//! rename leaves the original intact; this is best-effort, not transactional,
//! and costs O(file size) per delete.

use crate::io::record_format::{line_key, Record};
use crate::types::StoreError;
use csv::{ReaderBuilder, Trim};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A line that could not be decoded during a bulk load
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the file
    pub line: u64,
    pub error: StoreError,
}

/// Result of a bulk load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRecords<R> {
    /// Successfully decoded records, in file order
    pub records: Vec<R>,
    /// Lines that were skipped, in file order
    pub skipped: Vec<SkippedLine>,
}

impl<R> Default for LoadedRecords<R> {
    fn default() -> Self {
        LoadedRecords {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Record store backed by a single text file
#[derive(Debug, Clone)]
pub struct FileStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FileStore<R> {
    /// Bind a store to a file path
    ///
    /// The file is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the backing file, mapping "not found" to `None`
    fn open(&self) -> Result<Option<File>, StoreError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether any line carries the given key
    ///
    /// Never fails: a missing file yields `false`, and an unreadable file is
    /// logged and yields `false`.
    pub fn exists(&self, key: &str) -> bool {
        match self.scan_for(key) {
            Ok(found) => found,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "existence check failed");
                false
            }
        }
    }

    fn scan_for(&self, key: &str) -> Result<bool, StoreError> {
        let Some(file) = self.open()? else {
            return Ok(false);
        };

        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(false);
            }
            if line_key(&line, R::KEY_FIELD) == Some(key.as_bytes()) {
                return Ok(true);
            }
        }
    }

    /// Append one record as a new line, creating the file if absent
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created
    /// or written.
    pub fn append(&self, record: &R) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut line = record.encode();
        line.push('\n');
        file.write_all(line.as_bytes())?;
        file.flush()?;

        debug!(path = %self.path.display(), key = record.key(), "appended {}", R::LABEL);
        Ok(())
    }

    /// Decode every line of the file
    ///
    /// The CSV reader is configured to:
    /// - Treat the file as headerless
    /// - Allow a different field count on every line
    /// - Disable quoting, so `"` is an ordinary character
    /// - Trim whitespace from all fields
    ///
    /// Blank lines are ignored. A missing file yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read.
    pub fn load_all(&self) -> Result<LoadedRecords<R>, StoreError> {
        let Some(file) = self.open()? else {
            debug!(path = %self.path.display(), "no {} file found", R::LABEL);
            return Ok(LoadedRecords::default());
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(file);

        let mut loaded = LoadedRecords::default();
        for result in reader.records() {
            match result {
                Ok(fields) => {
                    let line = fields.position().map_or(0, |pos| pos.line());
                    match R::decode(&fields) {
                        Ok(record) => loaded.records.push(record),
                        Err(error) => loaded.skipped.push(SkippedLine { line, error }),
                    }
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    // The line is unusable but the rest may be fine
                    let line = e.position().map_or(0, |pos| pos.line());
                    loaded.skipped.push(SkippedLine {
                        line,
                        error: e.into(),
                    });
                }
            }
        }

        Ok(loaded)
    }

    /// Remove the first line whose key matches
    ///
    /// Returns `Ok(true)` if a line was removed. When nothing matches, the
    /// temporary file is discarded and the original is left byte-for-byte
    /// unchanged. A missing file yields `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the temporary file cannot
    /// be written, or the final rename fails. In every case the original file
    /// is left as it was.
    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let Some(file) = self.open()? else {
            return Ok(false);
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let permissions = file.metadata()?.permissions();
        let mut temp = NamedTempFile::new_in(dir)?;

        let mut found = false;
        {
            let mut reader = BufReader::new(file);
            let mut writer = BufWriter::new(&mut temp);
            let mut line = Vec::new();
            loop {
                line.clear();
                if reader.read_until(b'\n', &mut line)? == 0 {
                    break;
                }
                if !found && line_key(&line, R::KEY_FIELD) == Some(key.as_bytes()) {
                    found = true;
                    continue;
                }
                // Kept lines are copied verbatim, terminator included
                writer.write_all(&line)?;
            }
            writer.flush()?;
        }

        if !found {
            return Ok(false);
        }

        // The temporary file is created owner-only; keep the original mode
        temp.as_file().set_permissions(permissions)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::from(e.error))?;

        debug!(path = %self.path.display(), key, "deleted {}", R::LABEL);
        Ok(true)
    }
}
