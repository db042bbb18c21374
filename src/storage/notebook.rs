//! Notebook file storage
//!
//! Notebooks are stored as nbformat 4.x JSON (`.ipynb`). Reads take a
//! shared lock; writes go to a temp file under an exclusive lock and are
//! renamed into place.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::Notebook;

/// Store for a single notebook file
pub struct NotebookStore {
    path: PathBuf,
}

impl NotebookStore {
    /// Creates a store for the notebook at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the notebook file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the notebook from disk
    pub fn load(&self) -> Result<Notebook> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open notebook: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on notebook")?;

        let reader = BufReader::new(&file);
        let notebook = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse notebook: {}", self.path.display()))?;

        // Lock is released when file is dropped
        Ok(notebook)
    }

    /// Writes the notebook to disk (atomic replace)
    pub fn save(&self, notebook: &Notebook) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("ipynb.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on notebook")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, notebook)
                .context("Failed to serialize notebook")?;
            writeln!(writer).context("Failed to write notebook")?;

            writer.flush().context("Failed to flush notebook")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}
