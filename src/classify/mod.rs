//! File classification for prompt selection.
//!
//! Assigns each changed file a [`FileCategory`] from its path and current
//! content. The category only chooses which review persona the LLM gets;
//! it never affects which lines are commentable.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::FileCategory;

/// Matches the test-file naming convention (`FooTest.swift`).
static TEST_FILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Test\.swift$").unwrap());

/// Content markers indicating UIKit usage.
const UIKIT_MARKERS: &[&str] = &["import UIKit", "UIView", "ViewController"];

/// Classify a file by name and full content. First match wins.
///
/// Pure function: the same inputs always yield the same category, and
/// every input maps to exactly one category.
pub fn classify(filename: &str, content: &str) -> FileCategory {
    if TEST_FILE_RE.is_match(filename) || filename.contains("/Tests/") {
        return FileCategory::Test;
    }

    if filename.ends_with(".swift") {
        if content.contains("import SwiftUI") || content.contains("SwiftUI.") {
            return FileCategory::SwiftUi;
        }
        if UIKIT_MARKERS.iter().any(|marker| content.contains(marker)) {
            return FileCategory::UiKit;
        }
        return FileCategory::Swift;
    }

    FileCategory::Config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_wins_regardless_of_content() {
        assert_eq!(
            classify("Sources/LoginTest.swift", "import SwiftUI"),
            FileCategory::Test
        );
        assert_eq!(
            classify("AppTests/LoginTest.swift", ""),
            FileCategory::Test
        );
    }

    #[test]
    fn tests_directory_segment_wins() {
        assert_eq!(
            classify("App/Tests/Helpers.swift", "import UIKit"),
            FileCategory::Test
        );
        // The segment must be a directory, not a substring of a name.
        assert_eq!(
            classify("App/TestsHelper.swift", "struct A {}"),
            FileCategory::Swift
        );
    }

    #[test]
    fn swiftui_marker_classifies_as_swiftui() {
        assert_eq!(
            classify("Sources/Home.swift", "import SwiftUI\nstruct Home: View {}"),
            FileCategory::SwiftUi
        );
        assert_eq!(
            classify("Sources/Home.swift", "let view = SwiftUI.Text(\"hi\")"),
            FileCategory::SwiftUi
        );
    }

    #[test]
    fn swiftui_takes_priority_over_uikit() {
        let content = "import SwiftUI\nimport UIKit";
        assert_eq!(classify("Sources/Mixed.swift", content), FileCategory::SwiftUi);
    }

    #[test]
    fn uikit_markers_classify_as_uikit() {
        for marker in ["import UIKit", "class C: UIView {}", "LoginViewController"] {
            assert_eq!(
                classify("Sources/Login.swift", marker),
                FileCategory::UiKit,
                "marker: {marker}"
            );
        }
    }

    #[test]
    fn plain_swift_source() {
        assert_eq!(
            classify("Sources/Model.swift", "struct Model { let id: Int }"),
            FileCategory::Swift
        );
    }

    #[test]
    fn non_swift_is_config() {
        assert_eq!(classify("Package.swift.lock", ""), FileCategory::Config);
        assert_eq!(classify("fastlane/Fastfile", "lane :beta"), FileCategory::Config);
        assert_eq!(classify("project.yml", "name: App"), FileCategory::Config);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = classify("Sources/Home.swift", "import SwiftUI");
        let b = classify("Sources/Home.swift", "import SwiftUI");
        assert_eq!(a, b);
    }
}
