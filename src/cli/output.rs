//! Output formatting for CLI results.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::services::RunSummary;

/// A command result that can render itself for humans or as JSON.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print a command result in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Create a borderless list table with uppercase headers.
fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

impl CommandOutput for RunSummary {
    fn to_human(&self) -> String {
        let mode = if self.dry_run { " (dry-run)" } else { "" };
        let header = format!("Run {}{}", self.run_id, mode);
        let counts = format!(
            "{} pull requests; {} applied, {} planned, {} no-ops, {} failed, {} skipped PRs",
            self.pull_requests,
            self.applied(),
            self.planned(),
            self.noops(),
            self.failed(),
            self.skipped_prs.len(),
        );

        if self.records.is_empty() && self.skipped_prs.is_empty() {
            return format!("{header}\n{counts}");
        }

        let mut table = list_table(&["pr", "issue", "action", "outcome"]);
        for record in &self.records {
            table.add_row(vec![
                format!("#{}", record.pr_number),
                format!("#{}", record.issue_number),
                record.action.to_string(),
                record.outcome.to_string(),
            ]);
        }
        for skipped in &self.skipped_prs {
            table.add_row(vec![
                format!("#{}", skipped.pr_number),
                "-".to_string(),
                "skipped".to_string(),
                skipped.reason.clone(),
            ]);
        }

        format!("{header}\n{counts}\n\n{table}")
    }
}
