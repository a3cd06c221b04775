//! Pipe table detection and rendering.

use once_cell::sync::Lazy;
use regex::Regex;

use super::inline::{format_inline, rewrite_links};
use super::Fragment;
use crate::model::{Alignment, SlideStats, Table};

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|(\s*:?-+:?\s*\|)+$").unwrap());

/// Minimum number of lines (header, separator, one body row) for a table.
const MIN_TABLE_LINES: usize = 3;

fn is_table_line(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

/// Split a table line into cells, dropping the fields outside the
/// boundary pipes.
fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let inner = line
        .strip_prefix('|')
        .and_then(|l| l.strip_suffix('|'))
        .unwrap_or(line);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Parse a run of pipe lines into a table.
///
/// Returns `None` when the run is too short or has no separator row.
pub fn parse_table(lines: &[&str]) -> Option<Table> {
    if lines.len() < MIN_TABLE_LINES || !SEPARATOR.is_match(lines[1].trim()) {
        return None;
    }

    let alignments = split_cells(lines[1])
        .iter()
        .map(|cell| Alignment::from_separator(cell))
        .collect();
    let mut table = Table::new(split_cells(lines[0]), alignments);
    for line in &lines[2..] {
        table.add_row(split_cells(line));
    }
    Some(table)
}

fn render_cell(text: &str, stats: &mut SlideStats) -> String {
    let (html, images) = rewrite_links(text);
    stats.image_count += images;
    format_inline(&html)
}

fn render_table(table: &Table, stats: &mut SlideStats) -> String {
    let mut html = String::from(r#"<div class="content-block"><table class="markdown-table"><tr>"#);
    for (i, cell) in table.header.iter().enumerate() {
        html.push_str(&format!(
            r#"<th style="text-align: {}">{}</th>"#,
            table.alignment(i).as_css(),
            render_cell(cell, stats)
        ));
    }
    html.push_str("</tr>");

    for row in &table.rows {
        html.push_str("<tr>");
        for (i, cell) in row.iter().enumerate() {
            let cell = render_cell(cell, stats);
            match table.alignments.get(i) {
                Some(align) => html.push_str(&format!(
                    r#"<td style="text-align: {}">{}</td>"#,
                    align.as_css(),
                    cell
                )),
                None => html.push_str(&format!("<td>{}</td>", cell)),
            }
        }
        html.push_str("</tr>");
    }

    html.push_str("</table></div>");
    html
}

fn flush_run(run: &mut Vec<String>, out: &mut Vec<Fragment>, stats: &mut SlideStats) {
    if run.is_empty() {
        return;
    }
    let lines: Vec<&str> = run.iter().map(String::as_str).collect();
    match parse_table(&lines) {
        Some(table) => {
            stats.table_count += 1;
            out.push(Fragment::Html(render_table(&table, stats)));
        }
        None => out.extend(run.iter().cloned().map(Fragment::Line)),
    }
    run.clear();
}

/// Replace runs of pipe lines with rendered tables.
///
/// Runs that do not form a table are passed on as ordinary lines.
pub fn build_tables(fragments: Vec<Fragment>, stats: &mut SlideStats) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(fragments.len());
    let mut run: Vec<String> = Vec::new();

    for fragment in fragments {
        match fragment {
            Fragment::Line(line) if is_table_line(&line) => run.push(line),
            other => {
                flush_run(&mut run, &mut out, stats);
                out.push(other);
            }
        }
    }
    flush_run(&mut run, &mut out, stats);

    out
}
