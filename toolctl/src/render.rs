//! Human-readable output.

use std::fmt::Write as _;

use console::{Alignment, measure_text_width, pad_str, style};
use serde::Serialize;
use tool_catalog::ToolRecord;
use tool_catalog::config::RequirementStatus;
use tool_catalog::registry::{ConfigRequirement, PipelineVerdict};

const CAPABILITY_PREVIEW: usize = 3;

/// Left-aligned text table with a bold header row.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| measure_text_width(cell))
                    .chain([measure_text_width(header)])
                    .max()
                    .unwrap_or_default()
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| {
                style(pad_str(header, *width, Alignment::Left, None))
                    .bold()
                    .to_string()
            })
            .collect();
        let _ = writeln!(out, "{}", header.join("  ").trim_end());

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
                .collect();
            let _ = writeln!(out, "{}", cells.join("  ").trim_end());
        }
        out
    }
}

pub fn capability_summary(record: &ToolRecord) -> String {
    let capabilities = record.capabilities();
    let mut summary = capabilities
        .iter()
        .take(CAPABILITY_PREVIEW)
        .map(|tag| tag.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if capabilities.len() > CAPABILITY_PREVIEW {
        summary.push_str(", ...");
    }
    summary
}

pub fn tools_table(records: &[&ToolRecord]) -> String {
    let mut table = Table::new(&["NAME", "TYPE", "MODE", "CAPABILITIES"]);
    for record in records {
        table.push(vec![
            record.name().to_string(),
            record.tool_type().to_string(),
            record.execution_mode().to_string(),
            capability_summary(record),
        ]);
    }
    table.render()
}

fn joined<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    if items.is_empty() {
        "-".to_owned()
    } else {
        items.join(", ")
    }
}

pub fn tool_details(record: &ToolRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})",
        style(record.name()).bold().cyan(),
        record.tool_type()
    );
    if let Some(description) = record.description() {
        let _ = writeln!(out, "  {description}");
    }
    let rows = [
        ("package", record.package_name().unwrap_or("-").to_owned()),
        ("install", record.pip_install_command().unwrap_or("-").to_owned()),
        ("execution mode", record.execution_mode().to_string()),
        ("capabilities", joined(record.capabilities())),
        ("compatible with", joined(record.compatibilities())),
        ("incompatible with", joined(record.incompatible_with())),
        ("required config", joined(record.required_config())),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<18}{value}");
    }
    out
}

pub fn pipeline_verdict(verdict: &PipelineVerdict) -> String {
    let mut out = String::new();
    for pair in verdict.pairs() {
        let mark = if pair.verdict().is_compatible() {
            style("✓").green()
        } else {
            style("✗").red()
        };
        let _ = writeln!(out, "{mark} {} + {}", pair.first(), pair.second());
        for reason in pair.verdict().reasons() {
            let _ = writeln!(out, "    {reason}");
        }
    }

    let tools = joined(verdict.tools());
    if verdict.is_compatible() {
        let _ = writeln!(out, "{} {tools}", style("Compatible:").green().bold());
    } else {
        let _ = writeln!(out, "{} {tools}", style("Not compatible:").red().bold());
    }
    out
}

pub fn requirements_table(requirements: &[ConfigRequirement<'_>]) -> String {
    let mut table = Table::new(&["TOOL", "KEY"]);
    for requirement in requirements {
        table.push(vec![requirement.tool.to_string(), requirement.key.to_owned()]);
    }
    table.render()
}

pub fn requirement_status_table(statuses: &[RequirementStatus<'_>]) -> String {
    let mut table = Table::new(&["TOOL", "KEY", "STATUS"]);
    for status in statuses {
        table.push(vec![
            status.requirement.tool.to_string(),
            status.requirement.key.to_owned(),
            if status.present { "set" } else { "missing" }.to_owned(),
        ]);
    }
    table.render()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
