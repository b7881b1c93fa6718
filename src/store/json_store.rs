use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;

use super::error::StoreError;
use super::record::EvaluationRecord;
use super::report::render_report;
use super::{newest_first, EvaluationStore};

/// Stores each evaluation as `<user>_<challenge>_<timestamp>_<id>.json`
/// plus a `.txt` report with the same stem.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

/// A record file holds either one record or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Many(Vec<EvaluationRecord>),
    One(Box<EvaluationRecord>),
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn stem_for(record: &EvaluationRecord) -> String {
        let timestamp = record.result.timestamp.format("%Y-%m-%dT%H-%M-%S-%3fZ");
        let id = record.id.simple().to_string();
        format!(
            "{}_{}_{}_{}",
            sanitize(&record.result.user_id),
            sanitize(&record.result.challenge_id),
            timestamp,
            &id[..8]
        )
    }

    async fn load_path(path: &Path) -> Result<Vec<EvaluationRecord>, StoreError> {
        let data = fs::read(path).await?;
        Ok(match serde_json::from_slice(&data)? {
            RecordFile::Many(records) => records,
            RecordFile::One(record) => vec![*record],
        })
    }
}

#[async_trait]
impl EvaluationStore for JsonFileStore {
    async fn append(&self, record: &EvaluationRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let stem = Self::stem_for(record);
        let payload = serde_json::to_vec_pretty(record)?;
        fs::write(self.dir.join(format!("{stem}.json")), payload).await?;
        fs::write(self.dir.join(format!("{stem}.txt")), render_report(record)).await?;
        log::debug!("stored evaluation {} as {stem}", record.id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<EvaluationRecord>, StoreError> {
        let mut records = Vec::new();
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(records),
            Err(err) => return Err(err.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match Self::load_path(&path).await {
                Ok(mut loaded) => records.append(&mut loaded),
                Err(err) => log::warn!("skipping unreadable record {}: {err}", path.display()),
            }
        }

        newest_first(&mut records);
        Ok(records)
    }
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::json;

    use super::*;
    use crate::evaluator::{EvaluationResult, StructuredEvaluation};

    fn record(user: &str, score: &str) -> EvaluationRecord {
        EvaluationRecord::new(
            EvaluationResult::structured(
                user,
                "challenge1",
                StructuredEvaluation {
                    score1: "10.00".into(),
                    score2: score.into(),
                    justification: "j".into(),
                    conclusion: "c".into(),
                    recommendations: "r".into(),
                    raw_response: "raw".into(),
                },
            ),
            None,
        )
    }

    #[test]
    fn file_names_are_sanitized() {
        let stem = JsonFileStore::stem_for(&record("ana maría/../x", "50.00"));
        assert!(stem.starts_with("ana_mar_a____x_challenge1_"));
        assert!(!stem.contains(':'));
        assert!(!stem.contains('.'));
    }

    #[tokio::test]
    async fn append_writes_json_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("evaluations"));
        let saved = record("ana", "75.00");
        store.append(&saved).await.unwrap();

        let mut names: Vec<String> = std::fs::read_dir(store.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with(".json"));
        assert!(names[1].ends_with(".txt"));

        let loaded = store.list_all().await.unwrap();
        assert_eq!(loaded, vec![saved]);
    }

    #[tokio::test]
    async fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent"));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_arrays_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut older = record("ana", "20.00");
        older.result.timestamp = Utc::now() - Duration::hours(1);
        let newer = record("bob", "30.00");
        std::fs::write(
            dir.path().join("batch.json"),
            serde_json::to_vec(&vec![older.clone(), newer.clone()]).unwrap(),
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let loaded = store.list_all().await.unwrap();
        assert_eq!(loaded, vec![newer, older]);

        let by_user = store.list_by_user("ana").await.unwrap();
        assert_eq!(by_user.len(), 1);
        assert_eq!(by_user[0].result.user_id, "ana");
    }

    #[tokio::test]
    async fn legacy_records_without_id_are_readable() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = json!({
            "evaluation": "PUNTUACIÓN TEXTO 2: 64.00",
            "userId": "carla",
            "success": true,
            "timestamp": "2025-03-01T10:00:00.000Z",
            "challengeId": "challenge2"
        });
        std::fs::write(
            dir.path().join("carla.json"),
            serde_json::to_vec(&legacy).unwrap(),
        )
        .unwrap();

        let loaded = JsonFileStore::new(dir.path()).list_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].result.evaluation.candidate_score(), 64.0);
        assert_eq!(loaded[0].display_name(), "carla");
    }
}
