//! Sample records for tests across the workspace.

use chrono::{TimeZone, Utc};

use crate::entities::{
    BlueprintStrategy, Diagnosis, Evidence, EvidenceAnalysis, GovernmentActions,
    HistoricalPrecedent, IndividualActions, NewsArticle, PolicyAnalysis, ResearchPaper,
    SocietyActions, Source, Stakeholder, TimelineEvent, Viability,
};
use crate::enums::{
    CostBand, EvidenceMediaType, ImpactType, PrecedentOutcome, RiskLevel, Sentiment,
};

/// A fully populated analysis with the given id and title.
#[must_use]
pub fn sample_analysis(id: &str, title: &str) -> PolicyAnalysis {
    PolicyAnalysis {
        id: id.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        title: title.to_string(),
        executive_summary: "A citywide ban shifts retail packaging within three years.".into(),
        diagnosis: Diagnosis {
            root_cause: "Single-use packaging is priced below its disposal cost.".into(),
            symptoms: vec!["Clogged storm drains".into(), "Litter in parks".into()],
            historical_precedents: vec![HistoricalPrecedent {
                case_name: "San Francisco, 2007".into(),
                outcome: PrecedentOutcome::Mixed,
                relevance: "Similar retail mix and enforcement model.".into(),
            }],
        },
        blueprint: BlueprintStrategy {
            government: GovernmentActions {
                policy_changes: vec!["Ban single-use bags at checkout".into()],
                infrastructure: vec!["Reusable bag distribution points".into()],
                enforcement: "Graduated fines after a six-month grace period.".into(),
            },
            society: SocietyActions {
                ngo_role: "Run neighbourhood bag-swap events.".into(),
                mobilization_events: vec!["Earth Day launch".into()],
            },
            individual: IndividualActions {
                daily_actions: vec!["Carry a reusable bag".into()],
                incentives: "Five-cent discount per reused bag.".into(),
            },
        },
        shadow_timeline: vec![
            TimelineEvent {
                year_offset: 2,
                scenario_description: "Paper bag demand spikes.".into(),
                impact_type: ImpactType::Economic,
                risk_level: RiskLevel::Moderate,
            },
            TimelineEvent {
                year_offset: 10,
                scenario_description: "Storm drain maintenance costs fall.".into(),
                impact_type: ImpactType::Environmental,
                risk_level: RiskLevel::Low,
            },
        ],
        viability: Viability {
            cost_band: CostBand::Low,
            cost_reasoning: "Mostly administrative costs.".into(),
            success_probability: 72,
            success_factors: vec!["Retailer buy-in".into()],
        },
        stakeholders: vec![
            Stakeholder {
                group: "Mayor".into(),
                sentiment: Sentiment::Positive,
                concern: "I need a visible environmental win.".into(),
                influence: 90,
                required_actions: vec!["Sign the ordinance".into()],
            },
            Stakeholder {
                group: "Grocery Association".into(),
                sentiment: Sentiment::Negative,
                concern: "We fear higher packaging costs.".into(),
                influence: 60,
                required_actions: vec!["Train checkout staff".into()],
            },
        ],
        research_papers: vec![ResearchPaper {
            title: "Plastic bag bans and consumer behaviour".into(),
            institution: "University of Sydney".into(),
            year: 2019,
            relevance: "Measures substitution effects.".into(),
            uri: "https://example.org/paper".into(),
        }],
        news_articles: vec![NewsArticle {
            title: "Bags clog city drains again".into(),
            source: "Portland Tribune".into(),
            date: "2025-11-02 08:15".into(),
            description: "Residents report flooding after storms.".into(),
            uri: "https://example.org/news".into(),
        }],
        visualization_prompt: "A clean riverfront market with reusable bags, golden hour".into(),
        sources: vec![Source {
            title: "City of Portland".into(),
            uri: "https://example.org/portland".into(),
        }],
        evidence_analysis: Some(EvidenceAnalysis {
            media_type: EvidenceMediaType::Image,
            visual_context: "A storm drain blocked by plastic bags.".into(),
            detected_risks: vec!["Flooding".into()],
            behavioral_patterns: None,
        }),
        input_evidence: Some(Evidence {
            filename: "drain.jpg".into(),
            mime_type: "image/jpeg".into(),
            data: "/9j/4AAQ".into(),
            caption: Some("Storm drain on 5th Ave".into()),
        }),
        raw_input: "Ban plastic bags citywide".into(),
    }
}
