//! File review categories.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Review category assigned to a changed file.
///
/// Determined once per file from its name and current content, then used
/// only to select the prompt variant for the inline review.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    /// Test sources (`*Test.swift` or anything under a `Tests` directory).
    Test,
    /// Swift sources using the SwiftUI framework.
    SwiftUi,
    /// Swift sources using UIKit.
    UiKit,
    /// Plain Swift sources with no UI framework markers.
    Swift,
    /// Everything else: build files, configuration, resources.
    Config,
}
