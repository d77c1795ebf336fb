//! # Text Rendering
//!
//! Plain and colorized terminal renderings of comparison outcomes and
//! rollups, plus JSON export. Values are shown as percentages with two
//! decimals; p-values carry the `p=0.123` / `n/a` annotation.

use std::fmt::Write as _;

#[cfg(feature = "colorized_output")]
use console::style;
use serde::Serialize;

use crate::model::{ComparisonOutcome, ComparisonResult};
use crate::rollup::{Rollup, RollupFrame};
use crate::significance::{format_p_value, Significance};
use crate::states;

/// Format a proportion as a percentage: `0.1234` -> `12.34%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn entity_label(code: &str) -> String {
    match states::by_code(code) {
        Some(state) => format!("{} ({})", state.name, state.code),
        None => code.to_string(),
    }
}

/// Message shown in place of a chart when the reference entity has no rows
pub fn no_data_message(entity: &str) -> String {
    format!("No data for {}", entity_label(entity))
}

fn category_width(result: &ComparisonResult) -> usize {
    result
        .iter()
        .map(|c| c.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len())
}

/// Render a comparison outcome as a plain text table
pub fn render_comparison(outcome: &ComparisonOutcome) -> String {
    let result = match outcome {
        ComparisonOutcome::Empty { entity } => return format!("{}\n", no_data_message(entity)),
        ComparisonOutcome::Ranked(result) => result,
    };

    let mut out = String::new();
    let width = category_width(result);
    let _ = writeln!(
        out,
        "{} vs {}: {}",
        entity_label(&result.reference_entity),
        entity_label(&result.comparison_entity),
        result.metric_kind.title()
    );
    let _ = writeln!(
        out,
        "{:<width$}  {:>10}  {:>10}  {:>9}  {}",
        "Category",
        result.reference_entity,
        result.comparison_entity,
        "p-value",
        "",
        width = width
    );
    for item in result.iter() {
        let significance = item.significance();
        let marker = if significance == Significance::Significant { "*" } else { "" };
        let _ = writeln!(
            out,
            "{:<width$}  {:>10}  {:>10}  {:>9}  {}",
            item.category,
            percent(item.reference_value),
            percent(item.comparison_value),
            format_p_value(item.p_value),
            marker,
            width = width
        );
    }
    out
}

/// Render a comparison outcome with colors (requires console feature).
///
/// Significant differences are highlighted; untestable rows are dimmed.
pub fn format_comparison_colored(outcome: &ComparisonOutcome) -> String {
    #[cfg(feature = "colorized_output")]
    {
        let result = match outcome {
            ComparisonOutcome::Empty { entity } => {
                return format!("{}\n", style(no_data_message(entity)).yellow())
            }
            ComparisonOutcome::Ranked(result) => result,
        };

        let mut out = String::new();
        let width = category_width(result);
        let _ = writeln!(
            out,
            "{} vs {}: {}",
            style(entity_label(&result.reference_entity)).bold().cyan(),
            style(entity_label(&result.comparison_entity)).bold().magenta(),
            result.metric_kind.title()
        );
        for item in result.iter() {
            let p = format!("{:>9}", format_p_value(item.p_value));
            let p = match item.significance() {
                Significance::Significant => style(p).green().bold(),
                Significance::NotSignificant => style(p),
                Significance::Undefined => style(p).dim(),
            };
            let _ = writeln!(
                out,
                "{:<width$}  {:>10}  {:>10}  {}",
                item.category,
                style(percent(item.reference_value)).cyan(),
                style(percent(item.comparison_value)).magenta(),
                p,
                width = width
            );
        }
        out
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        render_comparison(outcome)
    }
}

/// Render a rollup, highest value first
pub fn render_rollup(rollup: &Rollup) -> String {
    let mut out = String::new();
    let range = rollup
        .range
        .map(|r| r.to_string())
        .unwrap_or_else(|| "all years".to_string());
    let _ = writeln!(out, "{} ({})", rollup.metric.title(), range);

    if rollup.is_empty() {
        let _ = writeln!(out, "  no rows in range");
        return out;
    }

    let mut entities: Vec<_> = rollup.iter().collect();
    entities.sort_by(|a, b| b.value.total_cmp(&a.value));
    for entity in entities {
        let _ = writeln!(
            out,
            "  {:<3} {:<22} {:>8}  ({} / {})",
            entity.entity,
            entity.entity_name,
            percent(entity.value),
            entity.numerator,
            entity.denominator
        );
    }
    out
}

/// Render one line per animation frame with the leading entity of each year
pub fn render_frames(frames: &[RollupFrame]) -> String {
    let mut out = String::new();
    for frame in frames {
        let leader = frame
            .rollup
            .iter()
            .max_by(|a, b| a.value.total_cmp(&b.value));
        match leader {
            Some(top) => {
                let _ = writeln!(
                    out,
                    "{}: {} entities, top {} {}",
                    frame.period,
                    frame.rollup.len(),
                    top.entity,
                    percent(top.value)
                );
            }
            None => {
                let _ = writeln!(out, "{}: no rows", frame.period);
            }
        }
    }
    out
}

/// Pretty-printed JSON for any result type
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
