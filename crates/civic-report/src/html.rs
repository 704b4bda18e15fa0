//! Standalone HTML report for offline viewing and printing.
//!
//! The document has no external resources: styles are inline and the
//! generated image, when present, is embedded as a `data:` URI.

use std::fmt::Write as _;
use std::path::Path;

use civic_core::entities::PolicyAnalysis;
use civic_core::media::GeneratedImage;

use crate::ReportError;

const STYLE: &str = "\
body { font-family: Georgia, 'Times New Roman', serif; margin: 0; background: #fff; color: #111; line-height: 1.6; }
.report { max-width: 900px; margin: 0 auto; padding: 2rem; }
header { border-bottom: 4px solid #111; padding-bottom: 1.5rem; margin-bottom: 2.5rem; }
h1 { font-family: Helvetica, Arial, sans-serif; font-size: 2.6rem; text-transform: uppercase; letter-spacing: -0.02em; margin: 0 0 1rem; }
h2 { font-family: Helvetica, Arial, sans-serif; text-transform: uppercase; color: #312e81; border-bottom: 2px solid #312e81; padding-bottom: 0.4rem; }
h3 { font-family: Helvetica, Arial, sans-serif; font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.1em; color: #6b7280; }
.meta { display: flex; justify-content: space-between; font-family: Helvetica, Arial, sans-serif; font-size: 0.7rem; font-weight: bold; text-transform: uppercase; color: #6b7280; }
.callout { background: #f9fafb; border-left: 8px solid #4f46e5; padding: 1.25rem; }
.card { border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.tag { font-family: Helvetica, Arial, sans-serif; font-size: 0.7rem; font-weight: bold; text-transform: uppercase; color: #6b7280; }
img { max-width: 100%; height: auto; border-radius: 0.5rem; }
footer { margin-top: 4rem; border-top: 1px solid #e5e7eb; padding-top: 1rem; text-align: center; font-size: 0.7rem; color: #9ca3af; }
@media print {
  @page { margin: 1.5cm; size: auto; }
  * { -webkit-print-color-adjust: exact !important; print-color-adjust: exact !important; }
  section { page-break-inside: avoid; }
  .page-break { page-break-before: always; }
}";

/// Escape text for HTML element content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Export filename: the title lower-cased, whitespace runs replaced by `-`.
#[must_use]
pub fn report_filename(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "analysis".to_string() } else { slug };
    format!("{slug}-report.html")
}

fn list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str("<ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape(item));
    }
    out.push_str("</ul>");
}

/// Only web links become anchors; any other scheme is shown as plain text.
fn link(out: &mut String, label: &str, uri: &str) {
    match web_uri(uri) {
        Some(uri) => {
            let _ = write!(
                out,
                "<a href=\"{}\">{}</a>",
                escape(uri),
                escape(label)
            );
        }
        None => out.push_str(&escape(label)),
    }
}

fn web_uri(uri: &str) -> Option<&str> {
    let uri = uri.trim();
    let scheme = uri.split_once(':')?.0.to_ascii_lowercase();
    matches!(scheme.as_str(), "http" | "https").then_some(uri)
}

fn summary_section(out: &mut String, analysis: &PolicyAnalysis) {
    let _ = write!(
        out,
        "<section><h2>Executive Synthesis</h2><p>{}</p>\
         <div class=\"callout\"><h3>Root Cause Analysis</h3><p>{}</p></div>",
        escape(&analysis.executive_summary),
        escape(&analysis.diagnosis.root_cause),
    );
    let viability = &analysis.viability;
    let _ = write!(
        out,
        "<h3>Viability</h3><p><strong>{}%</strong> probability of success. Cost band: <strong>{}</strong>. {}</p>",
        viability.success_probability,
        escape(viability.cost_band.as_str()),
        escape(&viability.cost_reasoning),
    );
    list(out, &viability.success_factors);
    out.push_str("</section>");
}

fn diagnostics_section(out: &mut String, analysis: &PolicyAnalysis, image: Option<&GeneratedImage>) {
    out.push_str("<section><h2>Forensic Diagnostics</h2><div class=\"grid\"><div><h3>Systemic Symptoms</h3>");
    list(out, &analysis.diagnosis.symptoms);
    out.push_str("</div>");
    if let Some(image) = image {
        let _ = write!(
            out,
            "<div><h3>Architectural Projection</h3><img src=\"{}\" alt=\"Future vision\"></div>",
            escape(&image.data_uri())
        );
    }
    out.push_str("</div>");

    if !analysis.diagnosis.historical_precedents.is_empty() {
        out.push_str("<h3>Historical Precedents</h3>");
        for precedent in &analysis.diagnosis.historical_precedents {
            let _ = write!(
                out,
                "<div class=\"card\"><span class=\"tag\">{}</span> <strong>{}</strong><p>{}</p></div>",
                escape(precedent.outcome.as_str()),
                escape(&precedent.case_name),
                escape(&precedent.relevance),
            );
        }
    }

    if let Some(evidence) = &analysis.evidence_analysis {
        let _ = write!(
            out,
            "<h3>Evidence Audit ({})</h3><p>{}</p>",
            escape(evidence.media_type.as_str()),
            escape(&evidence.visual_context),
        );
        list(out, &evidence.detected_risks);
        if let Some(patterns) = &evidence.behavioral_patterns {
            list(out, patterns);
        }
    }
    out.push_str("</section><div class=\"page-break\"></div>");
}

fn blueprint_section(out: &mut String, analysis: &PolicyAnalysis) {
    let blueprint = &analysis.blueprint;
    let _ = write!(
        out,
        "<section><h2>Implementation Blueprint</h2>\
         <div class=\"card\"><h3>Government &amp; Infrastructure</h3><p><strong>Strategic Enforcement:</strong> {}</p>",
        escape(&blueprint.government.enforcement),
    );
    list(out, &blueprint.government.policy_changes);
    list(out, &blueprint.government.infrastructure);
    let _ = write!(
        out,
        "</div><div class=\"grid\"><div class=\"card\"><h3>Social Mobilization</h3><p><em>NGO Role: {}</em></p>",
        escape(&blueprint.society.ngo_role),
    );
    list(out, &blueprint.society.mobilization_events);
    let _ = write!(
        out,
        "</div><div class=\"card\"><h3>Individual Incentives</h3><p><em>Strategy: {}</em></p>",
        escape(&blueprint.individual.incentives),
    );
    list(out, &blueprint.individual.daily_actions);
    out.push_str("</div></div></section>");
}

fn timeline_section(out: &mut String, analysis: &PolicyAnalysis) {
    out.push_str("<section><h2>Shadow Timeline (20 Year Forecast)</h2>");
    for event in &analysis.shadow_timeline {
        let _ = write!(
            out,
            "<div class=\"card\"><strong>YEAR +{}</strong> \
             <span class=\"tag\">Impact: {} / Risk: {}</span><p>{}</p></div>",
            event.year_offset,
            escape(event.impact_type.as_str()),
            escape(event.risk_level.as_str()),
            escape(&event.scenario_description),
        );
    }
    out.push_str("</section>");
}

fn stakeholder_section(out: &mut String, analysis: &PolicyAnalysis) {
    out.push_str("<section><h2>Stakeholder Matrix</h2><div class=\"grid\">");
    for stakeholder in analysis.stakeholders_by_influence() {
        let _ = write!(
            out,
            "<div class=\"card\"><strong>{}</strong> <span class=\"tag\">{} / influence {}</span>\
             <p><em>&quot;{}&quot;</em></p><h3>Critical Involvement</h3>",
            escape(&stakeholder.group),
            escape(stakeholder.sentiment.as_str()),
            stakeholder.influence,
            escape(&stakeholder.concern),
        );
        list(out, &stakeholder.required_actions);
        out.push_str("</div>");
    }
    out.push_str("</div></section>");
}

fn citations_section(out: &mut String, analysis: &PolicyAnalysis) {
    if analysis.research_papers.is_empty()
        && analysis.news_articles.is_empty()
        && analysis.sources.is_empty()
    {
        return;
    }
    out.push_str("<section><h2>Evidence Base</h2>");
    if !analysis.research_papers.is_empty() {
        out.push_str("<h3>Research</h3><ul>");
        for paper in &analysis.research_papers {
            out.push_str("<li>");
            link(out, &paper.title, &paper.uri);
            let _ = write!(
                out,
                " ({}, {}). {}</li>",
                escape(&paper.institution),
                paper.year,
                escape(&paper.relevance)
            );
        }
        out.push_str("</ul>");
    }
    if !analysis.news_articles.is_empty() {
        out.push_str("<h3>News</h3><ul>");
        for article in &analysis.news_articles {
            out.push_str("<li>");
            link(out, &article.title, &article.uri);
            let _ = write!(
                out,
                " ({}, {}). {}</li>",
                escape(&article.source),
                escape(&article.date),
                escape(&article.description)
            );
        }
        out.push_str("</ul>");
    }
    if !analysis.sources.is_empty() {
        out.push_str("<h3>Grounding Sources</h3><ul>");
        for source in &analysis.sources {
            out.push_str("<li>");
            link(out, &source.title, &source.uri);
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }
    out.push_str("</section>");
}

/// Render the full report.
#[must_use]
pub fn render_html(analysis: &PolicyAnalysis, image: Option<&GeneratedImage>) -> String {
    let title = escape(&analysis.title);
    let mut body = String::new();

    let _ = write!(
        body,
        "<header><h1>{title}</h1><p><em>{}</em></p><div class=\"meta\">\
         <span>Civic Architect Intelligence Report</span><span>Timestamp: {}</span></div></header>",
        escape(&analysis.raw_input),
        analysis.created_at.format("%Y-%m-%d %H:%M UTC"),
    );
    summary_section(&mut body, analysis);
    diagnostics_section(&mut body, analysis, image);
    blueprint_section(&mut body, analysis);
    timeline_section(&mut body, analysis);
    stakeholder_section(&mut body, analysis);
    citations_section(&mut body, analysis);
    let _ = write!(
        body,
        "<footer>Generated by Civic Architect v{}</footer>",
        env!("CARGO_PKG_VERSION")
    );

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title} - Civic Architect Report</title>\n<style>\n{STYLE}\n</style>\n</head>\n\
         <body>\n<div class=\"report\">\n{body}\n</div>\n</body>\n</html>\n"
    )
}

/// Write the report into `dir` under [`report_filename`] and return the path.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be written.
pub fn write_html(
    analysis: &PolicyAnalysis,
    image: Option<&GeneratedImage>,
    dir: &Path,
) -> Result<std::path::PathBuf, ReportError> {
    let path = dir.join(report_filename(&analysis.title));
    std::fs::write(&path, render_html(analysis, image)).map_err(|e| ReportError::io(&path, e))?;
    tracing::debug!(path = %path.display(), "wrote HTML report");
    Ok(path)
}
