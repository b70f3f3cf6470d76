//! Report export to files.
//!
//! A report is exported as a sequence of titled tables, one per section that
//! is enabled in the report configuration. Every format keeps that shape:
//!
//! - **CSV**: each table preceded by its title line and followed by a blank line
//! - **HTML**: a standalone page with an `<h2>` and a `<table>` per section
//! - **Markdown**: a `##` heading and a pipe table per section
//! - **JSON**: an array of `{ title, headers, rows }` objects
//! - **Excel**: one worksheet per section with a bold grey header row

use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use chrono::Local;
use prettytable::{Cell, Row, Table};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Html,
    #[value(alias = "markdown")]
    Md,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
            ExportFormat::Md => "md",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

/// One titled section of a report, already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// The section as a prettytable, shared by the terminal view and HTML export.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_titles(Row::new(self.headers.iter().map(|h| Cell::new(h)).collect()));
        for cells in &self.rows {
            table.add_row(Row::new(cells.iter().map(|c| Cell::new(c)).collect()));
        }
        table
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Exporter writing to `output_path`, or to a timestamped file in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("chronolog_report_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, format.extension())));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, tables: &[ReportTable]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(tables)?,
            ExportFormat::Html => self.write_text(&render_html(tables)?)?,
            ExportFormat::Md => self.write_text(&render_markdown(tables))?,
            ExportFormat::Json => self.write_text(&serde_json::to_string_pretty(tables)?)?,
            ExportFormat::Excel => self.export_excel(tables)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn write_text(&self, content: &str) -> Result<()> {
        File::create(&self.output_path)?.write_all(content.as_bytes())?;
        Ok(())
    }

    fn export_csv(&self, tables: &[ReportTable]) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(&self.output_path)?;

        for (i, table) in tables.iter().enumerate() {
            if i > 0 {
                wtr.write_record([""])?;
            }
            wtr.write_record([&table.title])?;
            wtr.write_record(&table.headers)?;
            for row in &table.rows {
                wtr.write_record(row)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_excel(&self, tables: &[ReportTable]) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        for (index, table) in tables.iter().enumerate() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet_name(&table.title, index))?;

            for (col, header) in table.headers.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
            }
            for (row_idx, row) in table.rows.iter().enumerate() {
                for (col, value) in row.iter().enumerate() {
                    worksheet.write_string((row_idx + 1) as u32, col as u16, value)?;
                }
            }
            worksheet.autofit();
        }

        workbook.save(&self.output_path)?;
        Ok(())
    }
}

/// Worksheet names are limited to 31 characters and exclude `[]:*?/\`.
fn sheet_name(title: &str, index: usize) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        format!("Sheet{}", index + 1)
    } else {
        cleaned
    }
}

/// Section titles sit outside the tables prettytable renders.
fn escape_title(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A standalone page with one heading and prettytable-rendered table per section.
pub fn render_html(tables: &[ReportTable]) -> Result<String> {
    let mut page = Vec::new();
    page.write_all(b"<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Time Report</title></head>\n<body>\n")?;
    for table in tables {
        writeln!(page, "<h2>{}</h2>", escape_title(&table.title))?;
        table.to_table().print_html(&mut page)?;
        page.write_all(b"\n")?;
    }
    page.write_all(b"</body>\n</html>\n")?;
    Ok(String::from_utf8(page)?)
}

pub fn render_markdown(tables: &[ReportTable]) -> String {
    let cell = |value: &str| value.replace('|', "\\|");
    let mut out = String::new();
    for table in tables {
        out.push_str(&format!("## {}\n\n", table.title));
        out.push_str(&format!("| {} |\n", table.headers.iter().map(|h| cell(h)).collect::<Vec<_>>().join(" | ")));
        out.push_str(&format!("|{}\n", "---|".repeat(table.headers.len())));
        for row in &table.rows {
            out.push_str(&format!("| {} |\n", row.iter().map(|c| cell(c)).collect::<Vec<_>>().join(" | ")));
        }
        out.push('\n');
    }
    out
}
