//! Pull-request wire types from the GitHub `pulls/{number}/files` listing.

use serde::{Deserialize, Serialize};

/// One changed file as reported by the pull-request files listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path of the file relative to the repository root.
    pub filename: String,
    /// Change status: `added`, `modified`, `removed`, `renamed`, ...
    pub status: String,
    /// Unified-diff patch for the file. Absent for binary or oversized files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    /// Number of added lines.
    #[serde(default)]
    pub additions: u64,
    /// Number of deleted lines.
    #[serde(default)]
    pub deletions: u64,
}

impl ChangedFile {
    /// Returns `true` when the file was deleted in this pull request.
    pub fn is_removed(&self) -> bool {
        self.status == "removed"
    }
}

/// Decide whether a changed file should be reviewed at all.
///
/// Removed files, files matching an exclude pattern, and files without
/// patch content are not reviewable. Returns the skip reason so callers
/// can report it.
pub fn review_skip_reason(file: &ChangedFile, exclude_patterns: &[String]) -> Option<String> {
    if file.is_removed() {
        return Some("file removed".to_string());
    }
    if let Some(pattern) = exclude_patterns.iter().find(|p| file.filename.contains(p.as_str())) {
        return Some(format!("matches exclude pattern '{pattern}'"));
    }
    if file.patch.is_none() {
        return Some("no patch content".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, status: &str, patch: Option<&str>) -> ChangedFile {
        ChangedFile {
            filename: name.to_string(),
            status: status.to_string(),
            patch: patch.map(String::from),
            additions: 1,
            deletions: 0,
        }
    }

    fn patterns() -> Vec<String> {
        crate::constants::EXCLUDE_PATTERNS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn deserializes_listing_entry() {
        let raw = r#"{
            "filename": "Sources/App/Login.swift",
            "status": "modified",
            "additions": 12,
            "deletions": 3,
            "patch": "@@ -1,3 +1,4 @@\n+import Foundation"
        }"#;
        let f: ChangedFile = serde_json::from_str(raw).unwrap();
        assert_eq!(f.filename, "Sources/App/Login.swift");
        assert_eq!(f.additions, 12);
        assert!(f.patch.is_some());
    }

    #[test]
    fn deserializes_without_patch() {
        let raw = r#"{"filename": "logo.png", "status": "added"}"#;
        let f: ChangedFile = serde_json::from_str(raw).unwrap();
        assert!(f.patch.is_none());
        assert_eq!(f.additions, 0);
    }

    #[test]
    fn removed_files_are_skipped() {
        let f = file("Sources/Old.swift", "removed", Some("@@"));
        assert_eq!(
            review_skip_reason(&f, &patterns()).unwrap(),
            "file removed"
        );
    }

    #[test]
    fn excluded_patterns_are_skipped() {
        let f = file("App.xcodeproj/project.pbxproj", "modified", Some("@@"));
        let reason = review_skip_reason(&f, &patterns()).unwrap();
        assert!(reason.contains("exclude pattern"));

        let f = file("README.md", "modified", Some("@@"));
        assert!(review_skip_reason(&f, &patterns()).is_some());
    }

    #[test]
    fn missing_patch_is_skipped() {
        let f = file("Sources/App/Login.swift", "modified", None);
        assert_eq!(
            review_skip_reason(&f, &patterns()).unwrap(),
            "no patch content"
        );
    }

    #[test]
    fn reviewable_file_passes() {
        let f = file("Sources/App/Login.swift", "modified", Some("@@"));
        assert!(review_skip_reason(&f, &patterns()).is_none());
    }
}
