//! Terminal views of an analysis and the session history.

use civic_core::entities::PolicyAnalysis;
use civic_session::ResultStore;
use serde::Serialize;

use super::{output, table, table_options};
use crate::cli::OutputFormat;

/// One line of the `history` listing.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub current: bool,
}

/// History entries newest first, numbered from 1.
pub fn history_rows(store: &ResultStore) -> Vec<HistoryRow> {
    let current = store.current_id();
    store
        .history()
        .iter()
        .enumerate()
        .map(|(index, item)| HistoryRow {
            index: index + 1,
            id: item.id.clone(),
            title: item.title.clone(),
            created_at: item.created_at.format("%Y-%m-%d %H:%M").to_string(),
            current: current == Some(item.id.as_str()),
        })
        .collect()
}

/// Print an analysis. JSON and raw formats emit the full record; the table
/// format prints an overview followed by the stakeholder and timeline tables.
pub fn print_analysis(analysis: &PolicyAnalysis, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(analysis, format);
    }
    println!("{}", render_overview(analysis, table_options()));
    Ok(())
}

fn render_overview(analysis: &PolicyAnalysis, options: table::TableOptions) -> String {
    let viability = &analysis.viability;
    let overview = vec![
        vec!["title".to_string(), analysis.title.clone()],
        vec!["id".to_string(), analysis.id.clone()],
        vec![
            "created".to_string(),
            analysis.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ],
        vec!["summary".to_string(), analysis.executive_summary.clone()],
        vec!["root cause".to_string(), analysis.diagnosis.root_cause.clone()],
        vec![
            "cost band".to_string(),
            viability.cost_band.as_str().to_string(),
        ],
        vec![
            "success".to_string(),
            format!("{}%", viability.success_probability),
        ],
        vec![
            "evidence".to_string(),
            analysis
                .input_evidence
                .as_ref()
                .map_or_else(|| "-".to_string(), |e| e.filename.clone()),
        ],
        vec!["sources".to_string(), analysis.sources.len().to_string()],
    ];

    let stakeholders = analysis
        .stakeholders
        .iter()
        .enumerate()
        .map(|(index, s)| {
            vec![
                (index + 1).to_string(),
                s.group.clone(),
                s.sentiment.as_str().to_string(),
                s.influence.to_string(),
                s.concern.clone(),
            ]
        })
        .collect::<Vec<_>>();

    let timeline = analysis
        .shadow_timeline
        .iter()
        .map(|event| {
            vec![
                format!("+{}y", event.year_offset),
                event.impact_type.as_str().to_string(),
                event.risk_level.as_str().to_string(),
                event.scenario_description.clone(),
            ]
        })
        .collect::<Vec<_>>();

    [
        table::render_rows(&["field", "value"], &overview, options),
        format!(
            "Stakeholders\n{}",
            table::render_rows(
                &["#", "group", "sentiment", "influence", "concern"],
                &stakeholders,
                options,
            )
        ),
        format!(
            "Shadow timeline\n{}",
            table::render_rows(&["year", "impact", "risk", "scenario"], &timeline, options)
        ),
    ]
    .join("\n\n")
}
