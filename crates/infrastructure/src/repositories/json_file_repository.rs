use async_trait::async_trait;
use domain::{Collection, ContentRepository, DomainError};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Content store backed by one `<collection>.json` file per collection.
///
/// Every load reads the file again, so hand edits show up on the next request.
/// Writes go to a temporary file in the same directory that is then renamed over
/// the target; concurrent writers are not coordinated and the last rename wins.
pub struct JsonFileContentRepository {
    data_dir: PathBuf,
}

impl JsonFileContentRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

fn persist(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl ContentRepository for JsonFileContentRepository {
    async fn load(&self, collection: Collection) -> Result<Value, DomainError> {
        let path = self.path_for(collection);
        debug!("Loading {}", path.display());

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DomainError::IoFailure(format!("{}: {}", path.display(), e)))?;

        serde_json::from_slice(&bytes).map_err(|e| DomainError::CorruptCollection {
            collection,
            reason: e.to_string(),
        })
    }

    async fn store(&self, collection: Collection, document: &Value) -> Result<(), DomainError> {
        let path = self.path_for(collection);
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| DomainError::MalformedInput(e.to_string()))?;
        let dir = self.data_dir.clone();

        debug!("Writing {} ({} bytes)", path.display(), bytes.len());

        tokio::task::spawn_blocking(move || persist(&dir, &path, &bytes))
            .await
            .map_err(|e| DomainError::IoFailure(e.to_string()))?
            .map_err(|e| DomainError::IoFailure(e.to_string()))
    }

    async fn contains(&self, collection: Collection) -> Result<bool, DomainError> {
        let path = self.path_for(collection);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::IoFailure(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_store_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let repository = JsonFileContentRepository::new(dir.path());
        let document = json!([{ "id": "p1", "metrics": { "users": 10 } }]);

        repository.store(Collection::Projects, &document).await.unwrap();
        let loaded = repository.load(Collection::Projects).await.unwrap();

        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn test_store_writes_two_space_pretty_json() {
        let dir = tempdir().unwrap();
        let repository = JsonFileContentRepository::new(dir.path());

        repository
            .store(
                Collection::Profile,
                &json!({ "name": "Ada", "title": "Engineer", "bio": ["x"] }),
            )
            .await
            .unwrap();

        let text = fs::read_to_string(dir.path().join("profile.json")).unwrap();
        assert_eq!(
            text,
            "{\n  \"name\": \"Ada\",\n  \"title\": \"Engineer\",\n  \"bio\": [\n    \"x\"\n  ]\n}"
        );

        let keys: Vec<String> = repository
            .load(Collection::Profile)
            .await
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["name", "title", "bio"]);
    }

    #[tokio::test]
    async fn test_load_sees_external_edits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blogs.json");
        fs::write(&path, r#"[{"slug":"a"}]"#).unwrap();
        let repository = JsonFileContentRepository::new(dir.path());

        assert_eq!(repository.load(Collection::Blogs).await.unwrap(), json!([{ "slug": "a" }]));

        fs::write(&path, r#"[{"slug":"b"}]"#).unwrap();
        assert_eq!(repository.load(Collection::Blogs).await.unwrap(), json!([{ "slug": "b" }]));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_failure() {
        let dir = tempdir().unwrap();
        let repository = JsonFileContentRepository::new(dir.path());

        let err = repository.load(Collection::Achievements).await.unwrap_err();
        assert!(matches!(err, DomainError::IoFailure(_)));
        assert!(!repository.contains(Collection::Achievements).await.unwrap());

        repository.store(Collection::Achievements, &json!([])).await.unwrap();
        assert!(repository.contains(Collection::Achievements).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("projects.json"), "[{").unwrap();
        let repository = JsonFileContentRepository::new(dir.path());

        let err = repository.load(Collection::Projects).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::CorruptCollection {
                collection: Collection::Projects,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_store_into_missing_dir_fails_cleanly() {
        let dir = tempdir().unwrap();
        let repository = JsonFileContentRepository::new(dir.path().join("nope"));

        let err = repository
            .store(Collection::Blogs, &json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::IoFailure(_)));
    }
}
