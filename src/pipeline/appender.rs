use chrono::Local;

use crate::config::Config;
use crate::documents::ProjectDocuments;
use crate::models::SessionAnalysis;
use crate::parsers::deserializers::MINUTE_FORMAT;
use crate::pipeline::location::{Location, locate_project, resolve_vault};
use crate::pipeline::report::{AppendReport, OutcomeKind, SessionOutcome};
use crate::storage::ProcessedSessions;

/// Appends classified sessions to their project documents exactly once.
///
/// Sessions are handled sequentially in input order. Each one passes, in turn, the
/// processed-set gate, the unclassified check, vault and directory resolution, the two
/// document writes and finally the processed-set update. A session is recorded as
/// processed only after both documents were written, and the set is persisted after every
/// append so a crash can at worst repeat the session that was in flight.
pub struct AppendPipeline<'a> {
    config: &'a Config,
}

impl<'a> AppendPipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        sessions: &[SessionAnalysis],
        processed: &mut ProcessedSessions,
    ) -> AppendReport {
        let fallback_date = Local::now().format(MINUTE_FORMAT).to_string();
        let mut report = AppendReport::default();

        for session in sessions {
            let kind = self.append_one(session, processed, &fallback_date);
            let outcome = SessionOutcome::new(session.session_id(), kind);
            match &outcome.kind {
                OutcomeKind::AlreadyProcessed => {}
                OutcomeKind::Failed { error } => {
                    tracing::warn!("{}: {}", outcome.session_id, error)
                }
                _ => tracing::info!("{}", outcome),
            }
            report.push(outcome);
        }

        report
    }

    fn append_one(
        &self,
        session: &SessionAnalysis,
        processed: &mut ProcessedSessions,
        fallback_date: &str,
    ) -> OutcomeKind {
        let session_id = session.session_id();
        if processed.contains(session_id) {
            return OutcomeKind::AlreadyProcessed;
        }

        let classification = &session.classification;
        if classification.is_unclear() {
            return OutcomeKind::Unclassified;
        }

        let vault = resolve_vault(self.config, classification);
        let (vault, dir, created_directory) =
            match locate_project(self.config, &vault, &classification.project) {
                Ok(Location::Existing { vault, dir }) => (vault, dir, false),
                Ok(Location::Created { vault, dir }) => (vault, dir, true),
                Ok(Location::Missing { tried }) => return OutcomeKind::NoDirectory { tried },
                Err(e) => return OutcomeKind::Failed { error: format!("{:#}", e) },
            };

        let documents = ProjectDocuments::new(&dir);
        if created_directory {
            let last = session.info.date_label().unwrap_or_else(|| "unknown".to_string());
            if let Err(e) = documents.write_seed_note(&classification.project, &last) {
                return OutcomeKind::Failed { error: format!("{:#}", e) };
            }
        }

        if let Err(e) = documents.append_session(&session.info, fallback_date) {
            return OutcomeKind::Failed { error: format!("{:#}", e) };
        }

        // Documents now hold the session; a failed save leaves it eligible for retry
        if let Err(e) = processed.record(session_id) {
            return OutcomeKind::Failed {
                error: format!("appended but not recorded as processed: {:#}", e),
            };
        }

        OutcomeKind::Appended {
            vault,
            project: classification.project.to_lowercase(),
            dir,
            created_directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::models::{ClassificationResult, SessionRecord};

    fn config(root: &Path) -> Config {
        Config::from_yaml("vaults:\n  work: {}\n  personal: {}\n", root).unwrap()
    }

    fn session(id: &str, project: &str, vault: &str) -> SessionAnalysis {
        let mut record = SessionRecord::new(id);
        record.first_user_message = Some(format!("work on {project}"));
        SessionAnalysis::new(record, ClassificationResult::resolved(project, vault, 70, "test"))
    }

    #[test]
    fn test_second_run_skips_processed_sessions() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        fs::create_dir_all(temp.path().join("work").join("acme")).unwrap();
        let mut processed = ProcessedSessions::empty(&config.processed_path());
        let sessions = vec![session("s-1", "acme", "work")];
        let pipeline = AppendPipeline::new(&config);

        let first = pipeline.run(&sessions, &mut processed);
        let large = temp.path().join("work/acme/goldfish/large.md");
        let after_first = fs::read_to_string(&large).unwrap();
        let second = pipeline.run(&sessions, &mut processed);

        assert_eq!(first.summary().appended, 1);
        assert_eq!(second.summary().skipped_already_processed, 1);
        assert_eq!(fs::read_to_string(&large).unwrap(), after_first);
        assert!(ProcessedSessions::load(&config.processed_path()).unwrap().contains("s-1"));
    }

    #[test]
    fn test_unclear_sessions_touch_nothing() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        fs::create_dir_all(temp.path().join("work").join("acme")).unwrap();
        let mut processed = ProcessedSessions::empty(&config.processed_path());
        let mut unclear = session("s-2", "acme", "work");
        unclear.classification = ClassificationResult::unclear("work");

        let report = AppendPipeline::new(&config).run(&[unclear], &mut processed);

        assert_eq!(report.outcomes[0].kind, OutcomeKind::Unclassified);
        assert!(!temp.path().join("work/acme/goldfish").exists());
        assert!(processed.is_empty());
    }

    #[test]
    fn test_missing_directory_is_reported_not_created() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let mut processed = ProcessedSessions::empty(&config.processed_path());

        let report =
            AppendPipeline::new(&config).run(&[session("s-3", "ghost", "work")], &mut processed);

        assert!(matches!(report.outcomes[0].kind, OutcomeKind::NoDirectory { .. }));
        assert!(!temp.path().join("work").join("ghost").exists());
        assert!(processed.is_empty());
    }

    #[test]
    fn test_uncategorized_session_creates_seeded_directory() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let mut processed = ProcessedSessions::empty(&config.processed_path());

        let report = AppendPipeline::new(&config)
            .run(&[session("s-4", "no-category/side-quest", "personal")], &mut processed);

        let docs = temp.path().join("personal/no-category/side-quest/goldfish");
        assert_eq!(report.summary().created_directory, 1);
        assert!(fs::read_to_string(docs.join("small.md")).unwrap().starts_with("# Side Quest"));
        assert!(fs::read_to_string(docs.join("large.md")).unwrap().starts_with("# side-quest"));
        assert!(docs.join("inbox.md").exists());
    }

    #[test]
    fn test_failed_write_is_not_marked_processed() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let dir = temp.path().join("work").join("acme");
        fs::create_dir_all(&dir).unwrap();
        // A plain file where the goldfish/ subfolder belongs
        fs::write(dir.join("goldfish"), "not a directory").unwrap();
        let mut processed = ProcessedSessions::empty(&config.processed_path());

        let report =
            AppendPipeline::new(&config).run(&[session("s-5", "acme", "work")], &mut processed);

        assert!(matches!(report.outcomes[0].kind, OutcomeKind::Failed { .. }));
        assert!(!processed.contains("s-5"));
    }

    #[test]
    fn test_duplicate_ids_in_one_batch_append_once() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        fs::create_dir_all(temp.path().join("work").join("acme")).unwrap();
        let mut processed = ProcessedSessions::empty(&config.processed_path());
        let sessions = vec![session("dup", "acme", "work"), session("dup", "acme", "work")];

        let summary = AppendPipeline::new(&config).run(&sessions, &mut processed).summary();

        assert_eq!(summary.appended, 1);
        assert_eq!(summary.skipped_already_processed, 1);
    }
}
