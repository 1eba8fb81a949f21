//! Harvest coordinator - main run orchestration logic
//!
//! Resolves the subject list once, then harvests subjects one at a time.
//! Subjects run sequentially so that only one subject's course fan-out is
//! in flight at any moment. A failing subject is logged and skipped; it never
//! stops the run.

use crate::config::Config;
use crate::crawler::catalog::{filter_subjects, resolve_subjects, SubjectResolution};
use crate::crawler::fetcher::CatalogClient;
use crate::crawler::subjects::extract_course_data;
use crate::model::Subject;
use crate::output::{CatalogSink, RunStatus, RunSummary};
use crate::HarvestError;
use chrono::Utc;
use std::time::Instant;

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    client: CatalogClient,
}

impl Coordinator {
    /// Creates a new coordinator with an HTTP client built from `config`
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = CatalogClient::from_config(&config.http)?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a coordinator around an existing client
    pub fn with_client(config: Config, client: CatalogClient) -> Self {
        Self {
            config,
            client,
        }
    }

    /// Resolves the subjects this run would process
    ///
    /// The configured subject filter is applied to a successful resolution.
    pub async fn resolve(&self) -> Result<SubjectResolution, HarvestError> {
        let resolution = resolve_subjects(&self.client, &self.config.catalog).await?;
        Ok(match resolution {
            SubjectResolution::Resolved(subjects) => SubjectResolution::Resolved(filter_subjects(
                subjects,
                &self.config.catalog.subjects,
            )),
            failed => failed,
        })
    }

    /// Runs a complete harvest
    ///
    /// 1. Resolve subjects; stop without writing anything if there are none
    /// 2. Write the subject index
    /// 3. Harvest and write each subject in order, skipping failures
    /// 4. Write the "last updated" marker
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - The run finished (possibly with skipped subjects)
    /// * `Err(HarvestError)` - A root/year/term document failed to load, or the
    ///   subject index or timestamp marker could not be written
    pub async fn run(&self, sink: &dyn CatalogSink) -> Result<RunSummary, HarvestError> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new();

        let subjects = match self.resolve().await? {
            SubjectResolution::Resolved(subjects) if subjects.is_empty() => {
                tracing::warn!("Resolved term has no subjects to harvest");
                summary.status = RunStatus::NoSubjects;
                summary.elapsed = start_time.elapsed();
                return Ok(summary);
            }
            SubjectResolution::Resolved(subjects) => subjects,
            SubjectResolution::ResolutionFailed(reason) => {
                tracing::error!("Catalog resolution failed, nothing harvested: {}", reason);
                summary.status = RunStatus::ResolutionFailed(reason);
                summary.elapsed = start_time.elapsed();
                return Ok(summary);
            }
        };

        let names: Vec<String> = subjects.iter().map(|s| s.name.clone()).collect();
        sink.write_subject_index(&names)?;
        summary.subjects_total = subjects.len();

        for (index, subject) in subjects.iter().enumerate() {
            let subject_start = Instant::now();

            match self.harvest_subject(subject, sink).await {
                Ok(courses) => {
                    let elapsed = subject_start.elapsed();
                    tracing::info!(
                        "[{}/{}] {}: {} courses in {:.2}s",
                        index + 1,
                        subjects.len(),
                        subject.name,
                        courses,
                        elapsed.as_secs_f64()
                    );
                    summary.record_success(&subject.name, courses, elapsed);
                }
                Err(e) => {
                    tracing::error!(
                        "[{}/{}] {} failed: {}",
                        index + 1,
                        subjects.len(),
                        subject.name,
                        e
                    );
                    summary.record_failure(&subject.name, e);
                }
            }
        }

        sink.write_last_updated(Utc::now())?;
        summary.elapsed = start_time.elapsed();

        tracing::info!(
            "Harvest completed: {} courses from {}/{} subjects in {:.2}s",
            summary.courses_total,
            summary.subjects_succeeded(),
            summary.subjects_total,
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }

    /// Extracts and stores one subject, returning its course count
    async fn harvest_subject(
        &self,
        subject: &Subject,
        sink: &dyn CatalogSink,
    ) -> Result<usize, HarvestError> {
        let data = extract_course_data(
            &self.client,
            subject,
            self.config.crawler.max_concurrent_courses,
        )
        .await?;
        sink.write_course_data(&data)?;
        Ok(data.len())
    }
}

/// Runs a complete harvest into the JSON files named by `config.output`
pub async fn run_harvest(config: Config) -> Result<RunSummary, HarvestError> {
    let sink = crate::output::JsonFileSink::new(&config.output);
    let coordinator = Coordinator::new(config)?;
    coordinator.run(&sink).await
}
