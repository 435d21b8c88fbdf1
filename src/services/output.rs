use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::ResultDocument;
use crate::error::{OddsSyncError, Result};

const INDENT: &[u8] = b"    ";

/// Serialize the document as four-space indented UTF-8 JSON
pub fn render_document(document: &ResultDocument) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    Ok(buf)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Overwrite `path` with the document.
///
/// Written to a sibling temp file first and renamed into place, so readers
/// see either the previous document or the new one.
pub async fn write_document(path: &Path, document: &ResultDocument) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(OddsSyncError::Validation("output path is empty".to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(OddsSyncError::from)?;
    }

    let body = render_document(document)?;
    let tmp = temp_path(path);
    let result = match tokio::fs::write(&tmp, body).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(OddsSyncError::from(e));
    }
    Ok(())
}
