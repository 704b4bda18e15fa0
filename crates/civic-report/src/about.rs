//! Static content of the About view.

use std::fmt::Write as _;

pub const TITLE: &str = "About Civic Architect";

pub const TAGLINE: &str = "A reasoning-first civic intelligence tool that helps policy makers, \
NGOs, and citizens simulate complex societal scenarios.";

/// Feature highlights as `(heading, description)`.
pub const FEATURES: &[(&str, &str)] = &[
    (
        "Deep Reasoning",
        "Simulates second-order effects and downstream economic consequences of a policy.",
    ),
    (
        "Grounded in Reality",
        "Uses search grounding to cite real-world laws, precedents, and comparable case studies.",
    ),
    (
        "Trust & Transparency",
        "Every metric comes with a confidence estimate and the reasoning behind it.",
    ),
];

pub const PHILOSOPHY: &[&str] = &[
    "Civic Architect is not a chatbot. It is a strategic dashboard for high-stakes decisions. \
     Effective policy needs holistic simulation: not just the intent of a law, but its \
     operational feasibility, its social equity impact, and its economic viability.",
    "By combining multimodal evidence (site photos, walkthrough video, policy documents) with \
     generated visualization and structured reasoning, it bridges urban planning and \
     machine intelligence.",
];

/// The About view as plain text.
#[must_use]
pub fn about_text() -> String {
    let mut out = format!("{TITLE}\n\n{TAGLINE}\n");
    for (heading, description) in FEATURES {
        let _ = write!(out, "\n* {heading}\n  {description}\n");
    }
    out.push_str("\nOur Philosophy\n");
    for paragraph in PHILOSOPHY {
        out.push('\n');
        out.push_str(paragraph);
        out.push('\n');
    }
    out
}
