// SPDX-License-Identifier: MIT

//! Bug-bounty program model as returned by the listing query.

use serde::{Deserialize, Serialize};

/// One program entry from the Tumar listing.
///
/// A `Program` is an immutable snapshot from a single fetch; snapshots
/// are never merged across fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Program ID (diff key for change detection)
    pub id: String,
    /// Program display name
    pub name: String,
    /// Logo URL
    #[serde(default)]
    pub logo: Option<String>,
    /// Short program description
    #[serde(default)]
    pub short_description: Option<String>,
    /// Whether the program is private
    #[serde(default)]
    pub private: bool,
    /// Maximum payout, as rendered by the platform
    #[serde(default)]
    pub max_payout: Option<String>,
    /// Report statistics
    #[serde(default)]
    pub reports: ReportStats,
    /// Contact details (opaque platform-defined structure)
    #[serde(default)]
    pub contacts: Option<serde_json::Value>,
    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created: Option<String>,
}

/// Report counts attached to a program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportStats {
    pub count: u64,
}
