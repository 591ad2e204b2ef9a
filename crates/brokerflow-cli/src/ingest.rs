//! Directory ingestion: turns files on disk into pipeline input.

use std::path::{Path, PathBuf};

use anyhow::Context;
use brokerflow_core::SourceDocument;
use tracing::{debug, info};

/// Read every file in `dir` whose extension matches `extension`, sorted by name.
///
/// A file that cannot be read as UTF-8 text becomes an unreadable document
/// instead of failing the whole read. A missing directory is an error.
pub async fn read_documents(dir: &Path, extension: &str) -> anyhow::Result<Vec<SourceDocument>> {
    let extension = extension.trim_start_matches('.');
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading documents directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_file() && has_extension(&path, extension) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut docs = Vec::with_capacity(paths.len());
    for path in &paths {
        docs.push(read_document(path).await);
    }

    info!(
        dir = %dir.display(),
        files = docs.len(),
        "loaded documents"
    );
    Ok(docs)
}

/// Read a single file. Read or decode failures are carried in the document.
pub async fn read_document(path: &Path) -> SourceDocument {
    let source_id = source_id(path);
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            debug!(source_id, bytes = text.len(), "read document");
            SourceDocument::readable(source_id, text)
        }
        Err(e) => SourceDocument::unreadable(source_id, e.to_string()),
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

fn source_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
