//! Individual output format implementations
use crate::config::DisplayConfig;
use crate::output::OutputFormatterTrait;
use crate::record::Record;
use crate::search::{Field, SearchResult, highlight_ranges};
use colored::*;
use serde_json::json;

/// Text formatter (default)
pub struct TextFormatter {
    show_scores: bool,
    show_fields: bool,
    use_color: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::from_display(&DisplayConfig::default())
    }

    pub fn from_display(display: &DisplayConfig) -> Self {
        Self {
            show_scores: display.show_scores,
            show_fields: display.show_fields,
            use_color: is_terminal::is_terminal(&std::io::stdout()),
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    fn highlight(&self, text: &str, query: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for range in highlight_ranges(text, query) {
            output.push_str(&text[cursor..range.start]);
            output.push_str(&text[range.clone()].yellow().bold().to_string());
            cursor = range.end;
        }
        output.push_str(&text[cursor..]);
        output
    }

    fn paint(&self, text: &str, style: fn(ColoredString) -> ColoredString) -> String {
        if self.use_color {
            style(text.normal()).to_string()
        } else {
            text.to_string()
        }
    }

    fn headline(&self, record: &Record) -> String {
        format!(
            "{}  {}  [{}]",
            self.paint(&format!("v{}", record.version), |s| s.cyan().bold()),
            record.summary,
            record.status
        )
    }
}

impl OutputFormatterTrait for TextFormatter {
    fn format(&self, results: &[SearchResult], query: &str, total: usize) -> String {
        if total == 0 {
            return format!("{}\n", self.paint("No results found", |s| s.yellow()));
        }

        let mut output = format!(
            "{} {} result(s) for \"{}\"\n",
            self.paint("Found", |s| s.green()),
            total,
            query.trim()
        );
        if results.len() < total {
            output.push_str(&format!("Showing top {} of {}\n", results.len(), total));
        }

        for (rank, result) in results.iter().enumerate() {
            let record = &result.record;
            output.push('\n');
            output.push_str(&format!(
                "{}. {}  {}  [{}]\n",
                rank + 1,
                self.paint(&format!("v{}", record.version), |s| s.cyan().bold()),
                self.highlight(&record.summary, query),
                record.status
            ));

            let mut meta = record.long_date();
            if let Some(category) = record.category {
                meta.push_str(&format!(" · {category}"));
            }
            output.push_str(&format!("   {}\n", self.paint(&meta, |s| s.dimmed())));

            if self.show_fields {
                output.push_str(&format!("   matched in: {}\n", result.matched_in()));
            }
            if self.show_scores {
                output.push_str(&format!("   score: {:.1}\n", result.score));
            }

            if result.matched(Field::Changes) {
                for change in &record.changes {
                    let line = change.to_string();
                    if !highlight_ranges(&line, query).is_empty() {
                        output.push_str(&format!("   - {}\n", self.highlight(&line, query)));
                    }
                }
            }
        }

        output
    }

    fn format_records(&self, records: &[&Record]) -> String {
        let mut output = String::new();
        for record in records {
            output.push_str(&format!(
                "{:>4}  {}  {}\n",
                record.id,
                record.release_date,
                self.headline(record)
            ));
        }
        output.push_str(&format!("\n{} record(s)\n", records.len()));
        output
    }

    fn format_detail(&self, record: &Record) -> String {
        let mut output = format!("{}\n", self.headline(record));
        output.push_str(&format!("Released: {}\n", record.long_date()));
        if let Some(category) = record.category {
            output.push_str(&format!("Category: {category}\n"));
        }

        if !record.changes.is_empty() {
            output.push_str("\nChanges:\n");
            for change in &record.changes {
                output.push_str(&format!("  - {change}\n"));
            }
        }

        if let Some(info) = &record.detailed_info {
            output.push('\n');
            output.push_str(info.trim_end());
            output.push('\n');
        }

        if !record.links.is_empty() {
            output.push_str("\nLinks:\n");
            for link in &record.links {
                output.push_str(&format!("  {} <{}>\n", link.label, link.url));
            }
        }

        output
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Pretty-printed JSON formatter
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render(&self, value: &serde_json::Value) -> String {
        let mut output = serde_json::to_string_pretty(value).unwrap_or_default();
        output.push('\n');
        output
    }
}

impl OutputFormatterTrait for JsonFormatter {
    fn format(&self, results: &[SearchResult], query: &str, total: usize) -> String {
        let value = json!({
            "query": query,
            "total": total,
            "results": results.iter().map(|r| json!({
                "id": r.record.id,
                "version": r.record.version,
                "summary": r.record.summary,
                "status": r.record.status,
                "category": r.record.category,
                "release_date": r.record.release_date,
                "score": r.score,
                "match_fields": r.match_fields.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
        });
        self.render(&value)
    }

    fn format_records(&self, records: &[&Record]) -> String {
        self.render(&json!(records))
    }

    fn format_detail(&self, record: &Record) -> String {
        self.render(&json!(record))
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Category, ChangeKind, Status};
    use crate::search::SearchEngine;
    use chrono::NaiveDate;

    fn engine() -> SearchEngine {
        SearchEngine::build(vec![
            Record::new(
                "1",
                "2.5.0",
                NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                "Dark Mode Support",
                Status::Complete,
            )
            .with_category(Category::Feature)
            .with_change(ChangeKind::Added, "Complete dark mode support")
            .with_change(ChangeKind::Fixed, "Theme toggle glitch"),
        ])
    }

    #[test]
    fn test_text_lists_matching_changes_only() {
        let results = engine().search("dark");
        let output = TextFormatter::new().with_color(false).format(&results, "dark", 1);

        assert!(output.contains("Found 1 result(s) for \"dark\""));
        assert!(output.contains("1. v2.5.0  Dark Mode Support  [Complete]"));
        assert!(output.contains("January 20, 2024 · feature"));
        assert!(output.contains("matched in: summary, changes"));
        assert!(output.contains("- Added Complete dark mode support"));
        assert!(!output.contains("Theme toggle"));
        assert!(!output.contains("score:"));
    }

    #[test]
    fn test_text_reports_truncation_and_empty() {
        let formatter = TextFormatter::new().with_color(false);
        let results = engine().search("dark");
        assert!(formatter.format(&results, "dark", 12).contains("Showing top 1 of 12"));
        assert_eq!(formatter.format(&[], "nothing", 0), "No results found\n");
    }

    #[test]
    fn test_json_shape() {
        let results = engine().search("dark");
        let output = JsonFormatter::new().format(&results, "dark", 1);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total"], 1);
        assert_eq!(value["results"][0]["id"], "1");
        assert_eq!(value["results"][0]["status"], "Complete");
        assert_eq!(value["results"][0]["category"], "feature");
        assert_eq!(value["results"][0]["release_date"], "2024-01-20");
        assert_eq!(
            value["results"][0]["match_fields"],
            json!(["summary", "changes"])
        );
    }
}
