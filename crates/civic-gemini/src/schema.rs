//! The structured-output contract sent with every analysis request.
//!
//! One canonical revision is supported. Responses are validated against it at
//! the boundary (see `analysis.rs`): a missing required field is an upstream
//! failure, never an optional value.

use serde_json::{Value, json};

/// Revision of the analysis contract. Bump when the shape changes.
pub const SCHEMA_VERSION: u32 = 2;

/// Top-level fields the capability must always return.
pub const REQUIRED_FIELDS: &[&str] = &[
    "title",
    "executiveSummary",
    "diagnosis",
    "blueprint",
    "shadowTimeline",
    "viability",
    "stakeholders",
    "researchPapers",
    "newsArticles",
    "visualizationPrompt",
];

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_enum(values: &[&str]) -> Value {
    json!({ "type": "STRING", "enum": values })
}

fn string_list(description: &str) -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" }, "description": description })
}

fn integer(description: &str) -> Value {
    json!({ "type": "INTEGER", "description": description })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

fn array_of(item: Value) -> Value {
    json!({ "type": "ARRAY", "items": item })
}

/// Response schema in the API's OpenAPI-subset dialect.
#[must_use]
pub fn analysis_schema() -> Value {
    let diagnosis = object(
        json!({
            "rootCause": string("The underlying systemic issue, distinct from its symptoms."),
            "symptoms": string_list("Observable effects of the root cause."),
            "historicalPrecedents": array_of(object(
                json!({
                    "caseName": string("City or country and year."),
                    "outcome": string_enum(&["Success", "Failure", "Mixed"]),
                    "relevance": string("Why this precedent applies to the current simulation."),
                }),
                &["caseName", "outcome", "relevance"],
            )),
        }),
        &["rootCause", "symptoms", "historicalPrecedents"],
    );

    let blueprint = object(
        json!({
            "government": object(
                json!({
                    "policyChanges": string_list("Legislative or regulatory changes."),
                    "infrastructure": string_list("Physical or digital infrastructure to build."),
                    "enforcement": string("How compliance is enforced."),
                }),
                &["policyChanges", "infrastructure", "enforcement"],
            ),
            "society": object(
                json!({
                    "ngoRole": string("Role of NGOs and civil society."),
                    "mobilizationEvents": string_list("Community mobilization events."),
                }),
                &["ngoRole", "mobilizationEvents"],
            ),
            "individual": object(
                json!({
                    "dailyActions": string_list("Behaviour changes asked of residents."),
                    "incentives": string("Incentives that make those actions stick."),
                }),
                &["dailyActions", "incentives"],
            ),
        }),
        &["government", "society", "individual"],
    );

    let timeline_event = object(
        json!({
            "yearOffset": integer("Years into the future (e.g. 2, 5, 10, 20)."),
            "scenarioDescription": string("Probabilistic future state."),
            "impactType": string_enum(&["Economic", "Social", "Environmental", "Trust"]),
            "riskLevel": string_enum(&["Critical", "High", "Moderate", "Low"]),
        }),
        &["yearOffset", "scenarioDescription", "impactType", "riskLevel"],
    );

    let viability = object(
        json!({
            "costBand": string_enum(&["Low", "Medium", "High", "Mega-Project"]),
            "costReasoning": string("Why the budget falls in this band."),
            "successProbability": integer("0-100"),
            "successFactors": string_list("Conditions the outcome depends on."),
        }),
        &["costBand", "costReasoning", "successProbability", "successFactors"],
    );

    let stakeholder = object(
        json!({
            "group": string("Group, institution, or specific political leader (e.g. 'Mayor', 'Local Unions')."),
            "sentiment": string_enum(&["Positive", "Neutral", "Negative", "Mixed"]),
            "concern": string("The group's primary motivation or fear, in the first person."),
            "requiredActions": string_list("Actions this stakeholder must take for the solution to work."),
            "influence": integer("Power level 0-100"),
        }),
        &["group", "sentiment", "concern", "requiredActions", "influence"],
    );

    let research_paper = object(
        json!({
            "title": string("Title of the study."),
            "institution": string("University, research center, or place of study."),
            "year": integer("Publication year."),
            "relevance": string("Why this research matters to the simulation."),
            "uri": string("Link to the study."),
        }),
        &["title", "institution", "year", "relevance", "uri"],
    );

    let news_article = object(
        json!({
            "title": string("Headline."),
            "source": string("News organization."),
            "date": string("Publication date and time, e.g. '2024-10-12 14:30'."),
            "description": string("Short summary of the reported problem or pain point."),
            "uri": string("Link to the article."),
        }),
        &["title", "source", "date", "description", "uri"],
    );

    let evidence_analysis = json!({
        "type": "OBJECT",
        "description": "Forensic audit of the attached evidence. If nothing is attached, set mediaType to 'none'.",
        "properties": {
            "mediaType": string_enum(&["image", "video", "pdf", "none"]),
            "visualContext": string("What the media shows."),
            "detectedRisks": string_list("Visible hazards or neglect signals."),
            "behavioralPatterns": string_list("For video: movement patterns, traffic flow, etc."),
        },
        "required": ["mediaType", "visualContext", "detectedRisks"],
    });

    object(
        json!({
            "title": string("A short, professional title for the analysis report."),
            "executiveSummary": string("A high-level synthesis of the policy impact."),
            "diagnosis": diagnosis,
            "blueprint": blueprint,
            "shadowTimeline": array_of(timeline_event),
            "viability": viability,
            "stakeholders": array_of(stakeholder),
            "researchPapers": array_of(research_paper),
            "newsArticles": array_of(news_article),
            "visualizationPrompt": string(
                "A highly descriptive, photorealistic prompt for an image model showing the positive future state of this policy."
            ),
            "evidenceAnalysis": evidence_analysis,
        }),
        REQUIRED_FIELDS,
    )
}
