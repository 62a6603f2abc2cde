use crate::error::Error;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Excel keeps a `~$name.xlsx` lock file next to an open workbook.
const LOCK_FILE_PREFIX: &str = "~$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub folder: PathBuf,
    pub excel_path: PathBuf,
    pub evidence_root: PathBuf,
}

pub fn missing_project_message(evidence_dir_name: &str) -> String {
    format!("Missing Excel file or '{}' folder.", evidence_dir_name)
}

/// Resolve a project folder into its workbook and evidence root.
pub fn locate(folder: &Path, evidence_dir_name: &str) -> Result<ProjectPaths, Error> {
    let excel_path = find_spreadsheets(folder)?.into_iter().next();

    let evidence_root = folder.join(evidence_dir_name);
    let evidence_root = evidence_root.is_dir().then_some(evidence_root);

    match (excel_path, evidence_root) {
        (Some(excel_path), Some(evidence_root)) => {
            debug!(
                "Project {}: workbook {}, evidence {}",
                folder.display(),
                excel_path.display(),
                evidence_root.display()
            );
            Ok(ProjectPaths {
                folder: folder.to_path_buf(),
                excel_path,
                evidence_root,
            })
        }
        _ => Err(Error::MissingProject(missing_project_message(
            evidence_dir_name,
        ))),
    }
}

/// All `*.xlsx` files directly in `folder`, lock files excluded, sorted by name.
/// The folder path itself may be any OS path; only entry names are matched.
pub fn find_spreadsheets(folder: &Path) -> Result<Vec<PathBuf>, Error> {
    if !folder.is_dir() {
        return Ok(Vec::new());
    }
    let pattern = Pattern::new("*.xlsx").map_err(|e| Error::Other(e.to_string()))?;

    let mut spreadsheets = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                error!("Error reading entry in {}: {}", folder.display(), err);
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!("Skipping non UTF-8 name in {}", folder.display());
            continue;
        };

        let path = entry.path();
        if pattern.matches(name) && !name.starts_with(LOCK_FILE_PREFIX) && path.is_file() {
            spreadsheets.push(path);
        }
    }
    spreadsheets.sort();

    if spreadsheets.len() > 1 {
        warn!(
            "{} workbooks in {}, using {}",
            spreadsheets.len(),
            folder.display(),
            spreadsheets[0].display()
        );
    }

    Ok(spreadsheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_locate_complete_project() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("portfolio.xlsx"), "").unwrap();
        fs::create_dir(tmp.path().join("Bewijslasten")).unwrap();

        let project = locate(tmp.path(), "Bewijslasten").unwrap();
        assert_eq!(project.excel_path, tmp.path().join("portfolio.xlsx"));
        assert_eq!(project.evidence_root, tmp.path().join("Bewijslasten"));
    }

    #[test]
    fn test_lock_files_are_ignored() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("~$portfolio.xlsx"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("Bewijslasten")).unwrap();

        assert!(find_spreadsheets(tmp.path()).unwrap().is_empty());
        let err = locate(tmp.path(), "Bewijslasten").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing Excel file or 'Bewijslasten' folder."
        );
    }

    #[test]
    fn test_missing_evidence_folder() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("portfolio.xlsx"), "").unwrap();
        // a file with the folder's name does not count
        fs::write(tmp.path().join("Bewijslasten"), "").unwrap();

        assert!(matches!(
            locate(tmp.path(), "Bewijslasten"),
            Err(Error::MissingProject(_))
        ));
    }

    #[test]
    fn test_first_workbook_in_name_order_wins() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("b.xlsx"), "").unwrap();
        fs::write(tmp.path().join("a.xlsx"), "").unwrap();
        fs::create_dir(tmp.path().join("Bewijslasten")).unwrap();

        let project = locate(tmp.path(), "Bewijslasten").unwrap();
        assert_eq!(project.excel_path, tmp.path().join("a.xlsx"));
    }

    #[cfg(unix)]
    #[test]
    fn test_folder_path_that_is_not_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir().unwrap();
        let folder = tmp.path().join(OsStr::from_bytes(b"portfolio \xe9t\xe9"));
        fs::create_dir_all(folder.join("Bewijslasten")).unwrap();
        fs::write(folder.join("portfolio.xlsx"), "").unwrap();

        let project = locate(&folder, "Bewijslasten").unwrap();
        assert_eq!(project.excel_path, folder.join("portfolio.xlsx"));
    }

    #[test]
    fn test_missing_folder_reports_missing_project() {
        let tmp = tempdir().unwrap();
        assert!(matches!(
            locate(&tmp.path().join("gone"), "Bewijslasten"),
            Err(Error::MissingProject(_))
        ));
    }

    #[test]
    fn test_folder_with_glob_characters() {
        let tmp = tempdir().unwrap();
        let folder = tmp.path().join("project [2024]");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("portfolio.xlsx"), "").unwrap();

        assert_eq!(
            find_spreadsheets(&folder).unwrap(),
            vec![folder.join("portfolio.xlsx")]
        );
    }
}
