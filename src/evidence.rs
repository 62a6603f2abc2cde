use std::fs;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use url::Url;
use walkdir::WalkDir;

/// Names of the non-hidden entries in `evidence_root/<id>`, sorted by name.
/// A missing folder is not an error; it simply has no evidence.
pub fn list_files(evidence_root: &Path, id: &str) -> Vec<String> {
    let dir = evidence_root.join(id);
    if !dir.is_dir() {
        trace!("No evidence folder at {}", dir.display());
        return Vec::new();
    }

    WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Error reading entry in {}: {}", dir.display(), err);
                None
            }
        })
        .filter_map(|entry| match entry.file_name().to_str() {
            Some(name) => Some(name.to_string()),
            None => {
                // a lossy name would point at a file that does not exist
                warn!("Skipping non UTF-8 name {}", entry.path().display());
                None
            }
        })
        .filter(|name| !name.starts_with('.'))
        .collect()
}

pub fn evidence_path(evidence_root: &Path, id: &str, file_name: &str) -> PathBuf {
    evidence_root.join(id).join(file_name)
}

/// `file://` link for an evidence file, with the path percent-encoded.
pub fn file_url(path: &Path) -> Option<String> {
    let absolute = match fs::canonicalize(path) {
        Ok(p) => p,
        Err(_) => std::env::current_dir().ok()?.join(path),
    };
    Url::from_file_path(&absolute).ok().map(String::from)
}
