//! Prompt construction for the analysis and speech capabilities.

use std::fmt::Write as _;

use civic_core::entities::{Evidence, Stakeholder};
use civic_core::request::AnalysisRequest;

const PERSONA: &str = "You are Civic Architect, a stochastic policy simulation engine.";

const FRAMEWORK: &str = "\
Mission:
Run a deep-chain reasoning simulation that architects the future state of this policy.

Reasoning Framework:
1. DIAGNOSIS: Separate symptoms from root causes. Use Google Search to find real-world precedents, both successes and failures.
2. RESEARCH: Cite peer-reviewed or institutional studies that bear on the root cause. Give the institution, year, and a working link for each.
3. NEWS: Cite recent news reports that document the public pain point. Give the outlet, date, and a working link for each.
4. BLUEPRINT: Design a coordinated strategy across Government (policy and infrastructure), Society (NGOs), and Individuals (behaviour).
5. SHADOW TIMELINE: Simulate second- and third-order effects up to 20 years out. Highlight compounding failures.
6. VIABILITY: Estimate the budget band and the probability of success from the plan's complexity.
7. STAKEHOLDERS: Identify the key players, including specific political leaders or institutions relevant to the geography. Define the actions each must take, not just their sentiment.

Output:
- Strictly formatted JSON matching the schema.
- Tone: clinical, visionary, data-driven.";

fn evidence_block(evidence: &Evidence) -> String {
    let caption = evidence.caption.as_deref().unwrap_or("No caption");
    format!(
        "[EVIDENCE ATTACHED]
Filename: {filename}
MimeType: {mime}
Context: {caption}
INSTRUCTION: Perform a forensic audit of this file.
- If VIDEO: analyze behavioural patterns, traffic flow, and environmental cues over time.
- If IMAGE: analyze infrastructure condition, neglect signals, and spatial constraints.
- If PDF: extract the claims, figures, and constraints relevant to the policy.
- Integrate these findings into 'evidenceAnalysis' and 'diagnosis'.",
        filename = evidence.filename,
        mime = evidence.mime_type,
    )
}

/// The text part of the analysis request.
///
/// The geography line appears only when a geography was given, and the
/// forensic-audit block only when evidence is attached.
#[must_use]
pub fn analysis_prompt(request: &AnalysisRequest) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "{PERSONA}\n");
    let _ = writeln!(prompt, "Input Policy:\n\"{}\"\n", request.policy_text());
    if let Some(geography) = request.geography() {
        let _ = writeln!(prompt, "Target Geography / Context: \"{geography}\"\n");
    }
    if let Some(evidence) = request.evidence() {
        let _ = writeln!(prompt, "{}\n", evidence_block(evidence));
    }
    prompt.push_str(FRAMEWORK);
    prompt
}

/// Role-play prompt reading a stakeholder's concern in their voice.
#[must_use]
pub fn stakeholder_speech_prompt(stakeholder: &Stakeholder) -> String {
    format!(
        "Act as a representative of the \"{group}\".\n\
         Your sentiment towards the policy is {sentiment}.\n\
         Read the following concern naturally: \"{concern}\"",
        group = stakeholder.group,
        sentiment = stakeholder.sentiment,
        concern = stakeholder.concern,
    )
}

#[cfg(test)]
mod tests {
    use civic_core::enums::Sentiment;

    use super::*;

    fn evidence(caption: Option<&str>) -> Evidence {
        Evidence {
            filename: "crossing.mp4".into(),
            mime_type: "video/mp4".into(),
            data: "AAAA".into(),
            caption: caption.map(String::from),
        }
    }

    #[test]
    fn minimal_prompt_has_policy_and_framework_only() {
        let request = AnalysisRequest::new("Ban plastic bags citywide", None, None).unwrap();
        let prompt = analysis_prompt(&request);
        assert!(prompt.contains("\"Ban plastic bags citywide\""));
        assert!(prompt.contains("SHADOW TIMELINE"));
        assert!(prompt.contains("RESEARCH"));
        assert!(prompt.contains("NEWS"));
        assert!(!prompt.contains("Target Geography"));
        assert!(!prompt.contains("EVIDENCE ATTACHED"));
    }

    #[test]
    fn geography_line_is_included() {
        let request =
            AnalysisRequest::new("Ban plastic bags", Some("Portland".into()), None).unwrap();
        assert!(analysis_prompt(&request).contains("Target Geography / Context: \"Portland\""));
    }

    #[test]
    fn evidence_block_defaults_caption() {
        let request = AnalysisRequest::new("x", None, Some(evidence(None))).unwrap();
        let prompt = analysis_prompt(&request);
        assert!(prompt.contains("[EVIDENCE ATTACHED]"));
        assert!(prompt.contains("Filename: crossing.mp4"));
        assert!(prompt.contains("MimeType: video/mp4"));
        assert!(prompt.contains("Context: No caption"));
    }

    #[test]
    fn evidence_block_uses_caption() {
        let request =
            AnalysisRequest::new("x", None, Some(evidence(Some("Rush hour, 5th Ave")))).unwrap();
        assert!(analysis_prompt(&request).contains("Context: Rush hour, 5th Ave"));
    }

    #[test]
    fn stakeholder_prompt_mentions_group_sentiment_and_concern() {
        let stakeholder = Stakeholder {
            group: "Local Unions".into(),
            sentiment: Sentiment::Negative,
            concern: "We will lose jobs.".into(),
            influence: 50,
            required_actions: vec![],
        };
        let prompt = stakeholder_speech_prompt(&stakeholder);
        assert!(prompt.contains("\"Local Unions\""));
        assert!(prompt.contains("is Negative."));
        assert!(prompt.contains("\"We will lose jobs.\""));
    }
}
