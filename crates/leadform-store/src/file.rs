//! JSON file store: one document per form/completion under a root
//! directory. A stand-in for a hosted database with the same contract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use leadform_core::{Form, FormStore, LeadFormCompletion, Result};
use leadform_engine::validate_form;

pub struct FileFormStore {
    root: PathBuf,
}

impl FileFormStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn form_path(&self, id: &str) -> PathBuf {
        self.root.join("forms").join(format!("{}.json", sanitize(id)))
    }

    fn completion_path(&self, id: &str) -> PathBuf {
        self.root
            .join("completions")
            .join(format!("{}.json", sanitize(id)))
    }

    // Write to a sibling tmp file, then rename: readers never observe a
    // partially written document.
    async fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, path).await?;
        tracing::debug!(path = %path.display(), "wrote document");
        Ok(())
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    async fn read_dir<T: serde::de::DeserializeOwned>(&self, dir: &Path) -> Result<Vec<T>> {
        let mut out = Vec::new();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(out),
            Err(error) => return Err(error.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_json::<T>(&path).await {
                Ok(Some(value)) => out.push(value),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unreadable document");
                }
            }
        }
        Ok(out)
    }
}

fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl FormStore for FileFormStore {
    async fn save_form(&self, form: &Form) -> Result<()> {
        // Never persist an invalid form.
        validate_form(form)?;
        self.write_json(&self.form_path(&form.id), form).await
    }

    async fn get_form(&self, id: &str) -> Result<Option<Form>> {
        self.read_json(&self.form_path(id)).await
    }

    async fn list_forms(&self) -> Result<Vec<Form>> {
        self.read_dir(&self.root.join("forms")).await
    }

    async fn delete_form(&self, id: &str) -> Result<()> {
        self.remove(&self.form_path(id)).await
    }

    async fn save_completion(&self, completion: &LeadFormCompletion) -> Result<()> {
        self.write_json(&self.completion_path(&completion.id), completion)
            .await
    }

    async fn get_completion(&self, id: &str) -> Result<Option<LeadFormCompletion>> {
        self.read_json(&self.completion_path(id)).await
    }

    async fn list_completions_by_form(&self, form_id: &str) -> Result<Vec<LeadFormCompletion>> {
        let all: Vec<LeadFormCompletion> = self.read_dir(&self.root.join("completions")).await?;
        Ok(all
            .into_iter()
            .filter(|completion| completion.form_id == form_id)
            .collect())
    }

    async fn delete_completion(&self, id: &str) -> Result<()> {
        self.remove(&self.completion_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{invalid_form, valid_form};
    use leadform_core::FormError;

    #[tokio::test]
    async fn form_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFormStore::new(dir.path());
        let form = valid_form("f1");

        store.save_form(&form).await.unwrap();
        assert_eq!(store.get_form("f1").await.unwrap(), Some(form));
        assert_eq!(store.list_forms().await.unwrap().len(), 1);

        store.delete_form("f1").await.unwrap();
        assert!(store.get_form("f1").await.unwrap().is_none());
        // Deleting again is a no-op.
        store.delete_form("f1").await.unwrap();
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFormStore::new(dir.path());

        assert!(matches!(
            store.save_form(&invalid_form("f1")).await,
            Err(FormError::Validation(_))
        ));
        assert!(store.list_forms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completion_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFormStore::new(dir.path());
        let form = valid_form("f1");
        let completion = leadform_core::LeadFormCompletion::start(&form);

        store.save_completion(&completion).await.unwrap();
        assert_eq!(
            store.get_completion(&completion.id).await.unwrap(),
            Some(completion.clone())
        );
        assert_eq!(
            store.list_completions_by_form("f1").await.unwrap().len(),
            1
        );
        assert!(
            store
                .list_completions_by_form("other")
                .await
                .unwrap()
                .is_empty()
        );

        store.delete_completion(&completion.id).await.unwrap();
        assert!(store.get_completion(&completion.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_sanitized_into_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFormStore::new(dir.path());
        let form = valid_form("weird/../id");

        store.save_form(&form).await.unwrap();
        assert!(store.get_form("weird/../id").await.unwrap().is_some());
        // The document stayed inside the forms directory.
        assert_eq!(store.list_forms().await.unwrap().len(), 1);
    }
}
