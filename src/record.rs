//! Changelog record model
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rollout status of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Status {
    Planned,
    #[serde(rename = "Rolling out")]
    RollingOut,
    Complete,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Planned => "Planned",
            Status::RollingOut => "Rolling out",
            Status::Complete => "Complete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Feature,
    Bugfix,
    Security,
    Improvement,
    Breaking,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Feature => "feature",
            Category::Bugfix => "bugfix",
            Category::Security => "security",
            Category::Improvement => "improvement",
            Category::Breaking => "breaking",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Improved,
    Fixed,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "Added",
            ChangeKind::Improved => "Improved",
            ChangeKind::Fixed => "Fixed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a release's change list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub text: String,
}

impl Change {
    pub fn new(kind: ChangeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// A single changelog entry.
///
/// Only `id`, `version`, `release_date`, `summary` and `status` are required.
/// Absent optional fields deserialize to `None` or an empty list and carry
/// no searchable text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub version: String,
    pub release_date: NaiveDate,
    pub summary: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_info: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        version: impl Into<String>,
        release_date: NaiveDate,
        summary: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            release_date,
            summary: summary.into(),
            status,
            category: None,
            changes: Vec::new(),
            detailed_info: None,
            links: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_change(mut self, kind: ChangeKind, text: impl Into<String>) -> Self {
        self.changes.push(Change::new(kind, text));
        self
    }

    pub fn with_detailed_info(mut self, info: impl Into<String>) -> Self {
        self.detailed_info = Some(info.into());
        self
    }

    pub fn with_link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.links.push(Link {
            label: label.into(),
            url: url.into(),
        });
        self
    }

    /// Release date in long US form, e.g. "January 20, 2024"
    pub fn long_date(&self) -> String {
        self.release_date.format("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_date_has_no_zero_padding() {
        let record = Record::new("1", "2.2.0", date(2024, 1, 5), "x", Status::Complete);
        assert_eq!(record.long_date(), "January 5, 2024");
    }

    #[test]
    fn test_status_uses_display_text_on_the_wire() {
        let status: Status = serde_json::from_str("\"Rolling out\"").unwrap();
        assert_eq!(status, Status::RollingOut);
        assert_eq!(status.to_string(), "Rolling out");
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let json = r#"{
            "id": "9",
            "version": "1.0.0",
            "release_date": "2023-06-01",
            "summary": "Initial release",
            "status": "Planned",
            "header_image": "ignored.png"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.category.is_none());
        assert!(record.changes.is_empty());
        assert!(record.detailed_info.is_none());
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_change_kind_is_read_from_type_key() {
        let change: Change =
            serde_json::from_str(r#"{"type": "Fixed", "text": "Patched XSS"}"#).unwrap();
        assert_eq!(change.kind, ChangeKind::Fixed);
        assert_eq!(change.to_string(), "Fixed Patched XSS");
    }
}
