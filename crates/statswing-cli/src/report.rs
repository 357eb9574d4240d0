// Plain-text and JSON rendering of command output.

use statswing_core::{ComparisonRow, QueryWarning, StatValue};

use crate::commands::Output;

/// Header shown when a query matched nothing.
pub const NO_DATA: &str = "No Data Available";

/// Render output as JSON.
pub fn render_json(output: &Output) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

/// Render output as aligned text.
pub fn render_text(output: &Output) -> String {
    match output {
        Output::Teams(teams) => {
            let rows: Vec<Vec<String>> = teams
                .iter()
                .map(|t| vec![t.abbreviation.clone(), t.name.clone()])
                .collect();
            table(&["Team", "Name"], &rows, false)
        }

        Output::Players(names) => {
            if names.is_empty() {
                NO_DATA.to_string()
            } else {
                names.join("\n")
            }
        }

        Output::Seasons(years) => match (years.first(), years.last()) {
            (Some(first), Some(last)) => {
                let list: Vec<String> = years.iter().map(i32::to_string).collect();
                format!("Range: {first} - {last}\n{}", list.join(", "))
            }
            _ => "Range: -".to_string(),
        },

        Output::Stats { title, line } => {
            let rows: Vec<Vec<String>> = line
                .entries
                .iter()
                .map(|e| vec![e.label.to_string(), e.value.to_string()])
                .collect();
            let mut out = format!("{title}\n{}", table(&["Statistic", "Value"], &rows, true));
            for warning in &line.warnings {
                out.push('\n');
                out.push_str(&warning_text(warning));
            }
            out
        }

        Output::Comparison(cmp) => {
            let rows: Vec<Vec<String>> = cmp.rows.iter().map(comparison_cells).collect();
            table(&["Statistic", cmp.first.as_str(), cmp.second.as_str()], &rows, true)
        }

        Output::Descriptions(defs) => defs
            .iter()
            .map(|d| format!("{} ({}): {}", d.label, d.key, d.description))
            .collect::<Vec<_>>()
            .join("\n"),

        Output::NoData(reason) => format!("{NO_DATA}: {reason}"),
    }
}

fn comparison_cells(row: &ComparisonRow) -> Vec<String> {
    vec![row.label.clone(), cell(row.first), cell(row.second)]
}

fn cell(value: Option<StatValue>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn warning_text(warning: &QueryWarning) -> String {
    match warning {
        QueryWarning::AmbiguousMatch {
            name,
            year,
            matches,
        } => format!("warning: {matches} rows for '{name}' season {year}; showing the first"),
    }
}

/// The first column is always left-aligned; the rest are right-aligned when
/// `right_align` is set (value columns).
fn table(headers: &[&str], rows: &[Vec<String>], right_align: bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (text, &w))| {
                if i == 0 || !right_align {
                    format!("{text:<w$}")
                } else {
                    format!("{text:>w$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers.to_vec()));
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
