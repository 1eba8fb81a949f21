//! JSON file sink
//!
//! Writes pretty-printed JSON into a single data directory:
//! - the subject index (`subjects.json` by default)
//! - one `<SUBJECT>.json` per subject holding its course array
//! - a plain-text RFC 3339 "last updated" marker

use crate::config::OutputConfig;
use crate::model::{CourseData, Subject};
use crate::output::traits::{CatalogSink, OutputError, OutputResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sink writing flat JSON files under one directory
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    data_dir: PathBuf,
    subjects_file: String,
    last_updated_file: String,
}

impl JsonFileSink {
    /// Creates a sink from the output configuration
    ///
    /// The directory is created lazily on first write.
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            subjects_file: config.subjects_file.clone(),
            last_updated_file: config.last_updated_file.clone(),
        }
    }

    /// Directory receiving all files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the JSON document for `subject`
    pub fn subject_path(&self, subject: &str) -> OutputResult<PathBuf> {
        if !Subject::is_valid_code(subject) {
            return Err(OutputError::InvalidName(subject.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", subject)))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> OutputResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl CatalogSink for JsonFileSink {
    fn write_subject_index(&self, subjects: &[String]) -> OutputResult<()> {
        let path = self.data_dir.join(&self.subjects_file);
        self.write_json(&path, subjects)?;
        tracing::debug!("Wrote subject index to {}", path.display());
        Ok(())
    }

    fn write_course_data(&self, data: &CourseData) -> OutputResult<()> {
        let path = self.subject_path(&data.subject)?;
        self.write_json(&path, &data.courses)?;
        tracing::debug!("Wrote {} courses to {}", data.len(), path.display());
        Ok(())
    }

    fn write_last_updated(&self, at: DateTime<Utc>) -> OutputResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(&self.last_updated_file);
        fs::write(&path, at.to_rfc3339_opts(SecondsFormat::Secs, true))?;
        Ok(())
    }
}
