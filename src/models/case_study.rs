//! Case study records and their nested narrative detail.
//!
//! Every type here is plain value data. The JSON shape is `camelCase` and
//! closed: unknown keys are rejected when a content table is parsed.

use serde::{Deserialize, Serialize};

/// Category used when a case study carries no tags.
pub const DEFAULT_CATEGORY: &str = "Design";

/// One portfolio project entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CaseStudy {
    /// Stable unique identifier, used as a render key.
    pub id: String,
    /// Unique URL-safe identifier used for detail lookup.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Card description.
    pub description: String,
    /// Hero image URI.
    pub image: String,
    /// Ordered labels; the first one doubles as the category.
    pub tags: Vec<String>,
    /// Short outcome summary.
    pub outcome: String,
    /// Marks an unpublished entry whose detail may be partially populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coming_soon: Option<bool>,
    /// Full case-study narrative.
    pub detail: CaseStudyDetail,
}

impl CaseStudy {
    /// Whether the entry appears in published listings.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.coming_soon != Some(true)
    }

    /// Display category: the first tag, or [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn category(&self) -> &str {
        self.tags.first().map_or(DEFAULT_CATEGORY, String::as_str)
    }

    /// Case-insensitive exact match against any tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }
}

/// Narrative detail owned 1:1 by a [`CaseStudy`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CaseStudyDetail {
    /// Designer's role on the project.
    pub role: String,
    /// Project length, e.g. `"6 months"`.
    pub duration: String,
    /// Team composition summary.
    pub team: String,
    /// At-a-glance project facts.
    pub overview: Overview,
    /// The problem being solved and for whom.
    pub problem_statement: ProblemStatement,
    /// Review of competing products.
    pub competitive_analysis: CompetitiveAnalysis,
    /// One-paragraph challenge.
    pub challenge: String,
    /// One-paragraph solution.
    pub solution: String,
    /// Expanded solution narrative.
    pub solution_details: SolutionDetails,
    /// Results after launch.
    pub impact_metrics: ImpactMetrics,
    /// Business goals the project served.
    pub business_goals: Vec<String>,
    /// How research was conducted.
    pub research_process: String,
    /// Research methods with session counts.
    pub research_methods: Vec<ResearchMethod>,
    /// Research findings.
    pub insights: Vec<String>,
    /// User pain points uncovered by research.
    pub pain_points: Vec<String>,
    /// Representative users.
    pub personas: Vec<Persona>,
    /// Introduction to the journey map.
    pub journey_description: String,
    /// Journey map stages in order.
    pub journey_stages: Vec<JourneyStage>,
    /// Design process narrative.
    pub design_approach: String,
    /// Usability testing narrative.
    pub testing_approach: String,
    /// Usability testing results.
    pub testing_metrics: Vec<Metric>,
    /// Display string such as `"95%"`, not a number.
    pub task_success_rate: String,
    /// Findings from usability testing.
    pub testing_findings: Vec<String>,
    /// Description of the shipped design.
    pub final_solution: String,
    /// Headline features of the shipped design.
    pub key_features: Vec<KeyFeature>,
    /// Headline outcome numbers.
    pub metrics: Vec<Metric>,
    /// How research shaped the result.
    pub research_impact: String,
    /// Lessons learned.
    pub learnings: Vec<String>,
    /// Process framework and its phases.
    pub methodology: Methodology,
}

/// A headline number with an optional delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Metric {
    /// Display value such as `"40%"`.
    pub value: String,
    /// What the value measures.
    pub label: String,
    /// Delta against the baseline, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

/// A research method and how often it was run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResearchMethod {
    /// Display count such as `"12"`.
    pub count: String,
    /// Method name.
    pub label: String,
}

/// One stage of a user journey map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JourneyStage {
    /// Stage name.
    pub name: String,
    /// What the user does.
    pub action: String,
    /// How the user feels.
    pub emotion: String,
}

/// A representative user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Persona {
    /// Persona name.
    pub name: String,
    /// Display age.
    pub age: String,
    /// Job title.
    pub occupation: String,
    /// Short biography.
    pub bio: String,
    /// What the persona wants.
    pub goals: Vec<String>,
    /// What gets in their way.
    pub frustrations: Vec<String>,
}

/// A named product feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KeyFeature {
    /// Feature name.
    pub title: String,
    /// What it does.
    pub description: String,
}

/// A competing product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Competitor {
    /// Product name.
    pub name: String,
    /// Display rating such as `"4.7"`.
    pub rating: String,
    /// Where it does well.
    pub strengths: Vec<String>,
    /// Where it falls short.
    pub weaknesses: Vec<String>,
}

/// Competitive review section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompetitiveAnalysis {
    /// Section heading.
    pub title: String,
    /// Products reviewed.
    pub competitors: Vec<Competitor>,
    /// Main takeaway.
    pub key_insight: String,
}

/// One phase of a design methodology.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MethodologyPhase {
    /// Phase name.
    pub name: String,
    /// What the phase covers.
    pub description: String,
    /// Activities run during the phase.
    pub activities: Vec<String>,
    /// What the phase produced.
    pub outcomes: String,
}

/// Design process framework.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Methodology {
    /// Framework name, e.g. `"Double Diamond"`.
    pub approach: String,
    /// How it was applied.
    pub description: String,
    /// Phases in order.
    pub phases: Vec<MethodologyPhase>,
}

/// A quote from a stakeholder or user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Testimonial {
    /// Quoted text.
    pub quote: String,
    /// Who said it.
    pub author: String,
    /// Their role.
    pub role: String,
}

/// At-a-glance project facts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Overview {
    /// Designer's role.
    pub role: String,
    /// Team members by role.
    pub team: Vec<String>,
    /// Tools used.
    pub tools: Vec<String>,
    /// Project timeline.
    pub timeline: String,
    /// Project objective.
    pub objective: String,
}

/// The problem being solved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProblemStatement {
    /// Core challenge.
    pub challenge: String,
    /// Market or product background.
    pub context: String,
    /// What users needed.
    pub user_needs: Vec<String>,
}

/// Expanded solution narrative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SolutionDetails {
    /// Solution overview.
    pub description: String,
    /// Features that carry the solution.
    pub key_features: Vec<KeyFeature>,
    /// Notable design decisions.
    pub design_decisions: Vec<String>,
}

/// Results after launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImpactMetrics {
    /// Measured results.
    pub metrics: Vec<Metric>,
    /// Qualitative outcomes.
    pub outcomes: Vec<String>,
    /// Supporting quote.
    pub testimonial: Testimonial,
}
