// Purpose: Size-based rotating file sink for JSON log lines. Rotation follows
// the `app.log`, `app.log.1` .. `app.log.N` naming convention, newest first.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{LogError, Result};

/// Append-only line writer that rotates once the active file would exceed
/// `max_bytes`. With `backup_count == 0` the active file is truncated in
/// place instead of renamed.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    /// Open (creating the directory if needed) the active log file for append
    pub fn new(dir: &Path, app_name: &str, max_bytes: u64, backup_count: usize) -> Result<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| LogError::io(format!("create log dir {}", dir.display()), e))?;

        let path = dir.join(format!("{app_name}.log"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogError::io(format!("open {}", path.display()), e))?;
        let written = file
            .metadata()
            .map_err(|e| LogError::io(format!("stat {}", path.display()), e))?
            .len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    /// Path of the active log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one formatted record, rotating first when the write would push
    /// the active file past `max_bytes`. Each line is flushed so readers see
    /// complete records.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let bytes = line.len() as u64 + 1;
        if self.written > 0 && self.written + bytes > self.max_bytes {
            self.rotate()?;
        }

        self.file
            .write_all(line.as_bytes())
            .and_then(|_| self.file.write_all(b"\n"))
            .and_then(|_| self.file.flush())
            .map_err(|e| LogError::io(format!("write {}", self.path.display()), e))?;
        self.written += bytes;
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        self.file
            .flush()
            .map_err(|e| LogError::io(format!("flush {}", self.path.display()), e))?;

        if self.backup_count == 0 {
            self.file = File::create(&self.path)
                .map_err(|e| LogError::io(format!("truncate {}", self.path.display()), e))?;
            self.written = 0;
            return Ok(());
        }

        // Shift app.log.N-1 -> app.log.N, dropping the oldest backup first.
        let oldest = self.backup_path(self.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest)
                .map_err(|e| LogError::io(format!("remove {}", oldest.display()), e))?;
        }
        for index in (1..self.backup_count).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                let to = self.backup_path(index + 1);
                fs::rename(&from, &to)
                    .map_err(|e| LogError::io(format!("rename {}", from.display()), e))?;
            }
        }
        let first = self.backup_path(1);
        fs::rename(&self.path, &first)
            .map_err(|e| LogError::io(format!("rename {}", self.path.display()), e))?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LogError::io(format!("reopen {}", self.path.display()), e))?;
        self.written = 0;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.path.display(), index))
    }
}
