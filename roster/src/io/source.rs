//! Recipient sources: the fetch capability the loader consumes.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::types::StudentsResponse;

/// Opaque filter map forwarded verbatim to the source.
pub type QueryParams = BTreeMap<String, String>;

/// A failed fetch. The message is shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Something that can answer `get(path, params)` with a recipient list.
pub trait RecipientSource {
    fn get(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<StudentsResponse, FetchError>> + Send;
}

/// Serves responses from JSON files under a data directory.
///
/// `get("/session/students/response", ..)` reads
/// `<root>/session/students/response.json`. Query params are logged but do
/// not select a different file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    root: PathBuf,
}

impl JsonFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing `path`: `<root>/<path>.json`, suffix appended verbatim.
    ///
    /// Paths that climb out of the data directory are refused.
    pub fn file_for(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if escapes_root(relative) {
            return Err(FetchError::new(format!(
                "path {path} escapes the data directory"
            )));
        }
        let mut file = self.root.join(relative).into_os_string();
        file.push(".json");
        Ok(PathBuf::from(file))
    }
}

/// True when `path` is absolute or has a `..` segment.
pub fn escapes_root(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
}

impl RecipientSource for JsonFileSource {
    async fn get(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<StudentsResponse, FetchError> {
        let file = self.file_for(path)?;
        debug!(path, file = %file.display(), ?params, "reading recipient response");
        let contents = tokio::fs::read_to_string(&file).await.map_err(|err| {
            FetchError::new(format!("cannot read {}: {err}", file.display()))
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            FetchError::new(format!("malformed response {}: {err}", file.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{instructor, student, write_response};

    #[tokio::test]
    async fn reads_response_file_for_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let records = vec![student("s@x.com", "S1"), instructor("i@x.com")];
        write_response(temp.path(), "/session/students/response", &records).expect("fixture");

        let source = JsonFileSource::new(temp.path());
        let response = source
            .get("/session/students/response", &QueryParams::new())
            .await
            .expect("get");

        assert_eq!(response.students_response, records);
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = JsonFileSource::new(temp.path());
        let err = source
            .get("/session/students/response", &QueryParams::new())
            .await
            .expect_err("missing");
        assert!(err.message.starts_with("cannot read"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_fetch_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = JsonFileSource::new(temp.path());
        let file = source.file_for("/broken").expect("file");
        std::fs::write(file, "{not json").expect("write");
        let err = source
            .get("/broken", &QueryParams::new())
            .await
            .expect_err("malformed");
        assert!(err.to_string().starts_with("malformed response"));
    }

    #[test]
    fn dotted_segment_keeps_its_suffix() {
        let source = JsonFileSource::new("/data");
        assert_eq!(
            source.file_for("/api/v1.2").expect("file"),
            PathBuf::from("/data/api/v1.2.json")
        );
        assert_eq!(
            source.file_for("/session/students/response").expect("file"),
            PathBuf::from("/data/session/students/response.json")
        );
    }

    #[tokio::test]
    async fn parent_segments_are_refused() {
        let source = JsonFileSource::new("/data");
        let err = source.file_for("/../../etc/passwd").expect_err("escape");
        assert!(err.message.contains("escapes the data directory"));

        let err = source
            .get("/session/../../secret", &QueryParams::new())
            .await
            .expect_err("escape");
        assert!(err.message.contains("escapes"));
    }
}
