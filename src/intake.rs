//! Project intake answers and their flattening into a generation prompt.
//!
//! The intake record is owned by the caller (loaded from a TOML file by the
//! CLI); the document assembler never sees it, only the text generated from
//! the prompt built here.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify::SectionId;
use crate::error::Error;

pub const SYSTEM_INSTRUCTION: &str = "Solutions Architect. Follow numbering exactly. Page 1 cover, Page 2 TOC, Page 3 starts Overview. No repetitions. No introductory fluff.";

pub const ENGAGEMENT_TYPES: &[&str] = &[
    "Proof of Concept (PoC)",
    "Pilot",
    "MVP",
    "Production Rollout",
    "Assessment / Discovery",
    "Support",
];
pub const USER_VALIDATION_OPTIONS: &[&str] = &[
    "Yes – customer validation required",
    "No – internal validation sufficient",
];
pub const COMPUTE_OPTIONS: &[&str] = &[
    "AWS Lambda",
    "Step Functions",
    "AWS Lambda + Step Functions",
    "ECS / EKS (future)",
    "Hybrid",
];
pub const UI_OPTIONS: &[&str] = &[
    "Streamlit on S3",
    "CloudFront + Static UI",
    "Internal demo only",
    "No UI (API only)",
];
pub const PERFORMANCE_OPTIONS: &[&str] = &["Batch", "Near real-time", "Real-time"];
pub const COST_OWNERSHIP_OPTIONS: &[&str] = &[
    "Funded by AWS",
    "Funded by Partner",
    "Funded by Customer",
    "Shared",
];

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Stakeholder {
    pub name: String,
    pub title: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Stakeholders {
    pub partner: Vec<Stakeholder>,
    pub customer: Vec<Stakeholder>,
    pub aws: Vec<Stakeholder>,
    pub escalation: Vec<Stakeholder>,
}

/// Per-data-type characteristics; each kind carries only its own fields.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataCharacteristics {
    Images {
        #[serde(default)]
        avg_size_mb: String,
        #[serde(default)]
        formats: String,
        #[serde(default)]
        volume: String,
    },
    Text {
        #[serde(default)]
        source: String,
        #[serde(default)]
        volume: String,
    },
    Documents {
        #[serde(default)]
        avg_pages: String,
        #[serde(default)]
        volume: String,
    },
    Audio,
    Video,
    StructuredTables,
    ApiStreams,
}

impl DataCharacteristics {
    pub fn label(&self) -> &'static str {
        match self {
            DataCharacteristics::Images { .. } => "Images",
            DataCharacteristics::Text { .. } => "Text",
            DataCharacteristics::Documents { .. } => "PDFs / Documents",
            DataCharacteristics::Audio => "Audio",
            DataCharacteristics::Video => "Video",
            DataCharacteristics::StructuredTables => "Structured tables",
            DataCharacteristics::ApiStreams => "APIs / Streams",
        }
    }

    fn details(&self) -> Option<String> {
        let fields: Vec<(&str, &str)> = match self {
            DataCharacteristics::Images {
                avg_size_mb,
                formats,
                volume,
            } => vec![
                ("average size (MB)", avg_size_mb.as_str()),
                ("formats", formats.as_str()),
                ("volume", volume.as_str()),
            ],
            DataCharacteristics::Text { source, volume } => {
                vec![("source", source.as_str()), ("volume", volume.as_str())]
            }
            DataCharacteristics::Documents { avg_pages, volume } => {
                vec![("average pages", avg_pages.as_str()), ("volume", volume.as_str())]
            }
            _ => return None,
        };
        let filled: Vec<String> = fields
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        if filled.is_empty() {
            None
        } else {
            Some(format!("{} ({})", self.label(), filled.join(", ")))
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Phase {
    pub name: String,
    #[serde(default)]
    pub weeks: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntakeConfig {
    pub engagement_type: String,
    pub offering: String,
    pub industry: String,
    pub duration: String,
    pub objective: String,
    pub outcomes: Vec<String>,
    pub stakeholders: Stakeholders,
    pub customer_dependencies: Vec<String>,
    pub data: Vec<DataCharacteristics>,
    pub key_assumptions: Vec<String>,
    pub other_assumptions: String,
    pub success_dimensions: Vec<String>,
    pub user_validation: String,
    pub compute_orchestration: String,
    pub genai_services: Vec<String>,
    pub storage_services: Vec<String>,
    pub ui_layer: String,
    pub performance_expectation: String,
    pub security_compliance: Vec<String>,
    pub poc_duration: String,
    pub phases: Vec<Phase>,
    pub cost_ownership: String,
    pub deliverables: Vec<String>,
    pub next_steps: Vec<String>,
    /// Document date; today when absent.
    pub date: Option<chrono::NaiveDate>,
    pub customer_logo: Option<PathBuf>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        let phase = |name: &str| Phase {
            name: name.to_string(),
            weeks: String::new(),
        };
        Self {
            engagement_type: "Proof of Concept (PoC)".into(),
            offering: "L1 Support Bot POC SOW".into(),
            industry: "Retail / E-commerce".into(),
            duration: "4 Weeks".into(),
            objective: String::new(),
            outcomes: Vec::new(),
            stakeholders: Stakeholders::default(),
            customer_dependencies: Vec::new(),
            data: Vec::new(),
            key_assumptions: Vec::new(),
            other_assumptions: String::new(),
            success_dimensions: Vec::new(),
            user_validation: "Yes – customer validation required".into(),
            compute_orchestration: "AWS Lambda + Step Functions".into(),
            genai_services: vec!["Amazon Bedrock (LLM inference)".into()],
            storage_services: vec!["Amazon S3".into()],
            ui_layer: "Streamlit on S3".into(),
            performance_expectation: "Batch".into(),
            security_compliance: Vec::new(),
            poc_duration: "4 weeks".into(),
            phases: vec![
                phase("Infra setup"),
                phase("Core workflows"),
                phase("Testing & validation"),
                phase("Demo & feedback"),
            ],
            cost_ownership: "Funded by Customer".into(),
            deliverables: Vec::new(),
            next_steps: Vec::new(),
            date: None,
            customer_logo: None,
        }
    }
}

impl IntakeConfig {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, path.display()),
            ))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, Error> {
        let intake: IntakeConfig = toml::from_str(content)?;
        intake.validate()?;
        Ok(intake)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.objective.trim().is_empty() {
            return Err(Error::Intake("Business Objective is required.".into()));
        }
        if self.offering.trim().is_empty() {
            return Err(Error::Intake("an offering must be selected".into()));
        }
        check_choice("engagement_type", &self.engagement_type, ENGAGEMENT_TYPES)?;
        check_choice("user_validation", &self.user_validation, USER_VALIDATION_OPTIONS)?;
        check_choice("compute_orchestration", &self.compute_orchestration, COMPUTE_OPTIONS)?;
        check_choice("ui_layer", &self.ui_layer, UI_OPTIONS)?;
        check_choice("performance_expectation", &self.performance_expectation, PERFORMANCE_OPTIONS)?;
        check_choice("cost_ownership", &self.cost_ownership, COST_OWNERSHIP_OPTIONS)?;
        Ok(())
    }
}

fn check_choice(field: &str, value: &str, options: &[&str]) -> Result<(), Error> {
    if options.contains(&value) {
        return Ok(());
    }
    Err(Error::Intake(format!(
        "{field} must be one of {}; got {value:?}",
        options.join(", ")
    )))
}

fn joined_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn text_or<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.trim().is_empty() { fallback } else { text }
}

/// Render a roster as a markdown table, the format the generator echoes back.
pub fn stakeholder_table(roster: &[Stakeholder]) -> String {
    let mut md = String::from("| Name | Title | Email |\n| --- | --- | --- |\n");
    for s in roster {
        let _ = writeln!(md, "| {} | {} | {} |", s.name, s.title, s.email);
    }
    md
}

pub fn build_prompt(intake: &IntakeConfig) -> String {
    let engagement = intake.engagement_type.as_str();
    let mut p = String::new();

    let _ = writeln!(
        p,
        "Generate a COMPLETE formal enterprise SOW for {} in {}.",
        intake.offering, intake.industry
    );
    p.push_str(concat!(
        "You are given a FIXED SOW STRUCTURE.\n",
        "You must ONLY generate CONTENT under each section.\n",
        "DO NOT create or rename section headings.\n",
        "DO NOT reorder sections.\n",
        "DO NOT add new sections.\n\n",
        "COST RULES (CRITICAL):\n",
        "- Do NOT generate cost tables.\n",
        "- Do NOT mention dollar values.\n",
        "- Cost section must be narrative only.\n\n",
        "STRUCTURE TEMPLATE (DO NOT MODIFY):\n",
    ));
    for id in SectionId::ALL {
        let _ = writeln!(p, "{}", id.phrase());
    }

    let _ = write!(
        p,
        "\nENGAGEMENT CONTEXT:\n- Engagement Type: {engagement}\n- Timeline: {}\n\
         - Adjust scope depth, success criteria strictness, assumptions, and cost modeling based on the engagement type.\n\n",
        intake.duration
    );

    p.push_str("STRICT SECTION FLOW (OUTPUT EACH SECTION ONCE, NO REPETITION):\n");
    let _ = writeln!(p, "{}", SectionId::TableOfContents.phrase());
    let _ = writeln!(p, "{}", SectionId::ProjectOverview.phrase());
    let _ = writeln!(p, "2.1 OBJECTIVE: {}", intake.objective.trim());
    if !intake.outcomes.is_empty() {
        let _ = writeln!(p, "Key outcomes: {}", intake.outcomes.join(", "));
    }
    p.push_str("2.2 PROJECT TEAM:\n");
    let rosters = [
        ("Partner Executive Sponsor", &intake.stakeholders.partner),
        ("Customer Executive Sponsor", &intake.stakeholders.customer),
        ("AWS Executive Sponsor", &intake.stakeholders.aws),
        ("Project Escalation Contacts", &intake.stakeholders.escalation),
    ];
    for (label, roster) in rosters {
        let _ = writeln!(p, "### {label}\n{}", stakeholder_table(roster));
    }

    let data_types: Vec<String> = intake.data.iter().map(|d| d.label().to_string()).collect();
    let data_details: Vec<String> = intake.data.iter().filter_map(DataCharacteristics::details).collect();
    let _ = write!(
        p,
        "3.1 CUSTOMER DEPENDENCIES\nSelected by user: {}\n\
         - Expand each selected dependency into a formal enterprise dependency statement.\n\
         3.2 DATA CHARACTERISTICS\nSelected data types: {}\nDetailed inputs: {}\n\
         - Reflect data volume, format, and frequency assumptions in architecture and cost rationale.\n\
         3.3 Key Assumptions:\nSelected assumptions: {}\nAdditional assumptions: {}\n\
         - Convert each assumption into a formal SOW assumption aligned with engagement type: {engagement}\n",
        joined_or(&intake.customer_dependencies, "No explicit customer dependencies specified."),
        joined_or(&data_types, "No data types specified."),
        joined_or(&data_details, "No detailed data characteristics provided."),
        joined_or(&intake.key_assumptions, "No predefined assumptions selected."),
        text_or(&intake.other_assumptions, "None provided."),
    );

    let _ = write!(
        p,
        "4.1 Project Success Criteria\nSelected success dimensions: {}\n\
         - Generate measurable success criteria for EACH selected dimension, tailored to {}.\n\
         4.2 User Validation Requirement\nValidation approach selected: {}\n",
        joined_or(&intake.success_dimensions, "No explicit success dimensions selected."),
        intake.offering,
        intake.user_validation,
    );

    let _ = writeln!(p, "{} - TECHNICAL PROJECT PLAN", SectionId::ScopeOfWork.phrase());
    let _ = write!(
        p,
        "{} / ARCHITECTURAL DIAGRAM\n(Write ONLY 3–5 bullet points. No diagram description.)\n\
         6.1 Compute & Orchestration: {}\n6.2 GenAI / ML Services: {}\n\
         6.3 Storage & Search: {}\n6.4 UI Layer: {}\n",
        SectionId::SolutionArchitecture.phrase(),
        intake.compute_orchestration,
        joined_or(&intake.genai_services, "None selected"),
        joined_or(&intake.storage_services, "None selected"),
        intake.ui_layer,
    );

    let _ = write!(
        p,
        "{}\n7.1 Performance Expectations: {}\n7.2 Security & Compliance: {}\n",
        SectionId::PerformanceSecurity.phrase(),
        intake.performance_expectation,
        joined_or(&intake.security_compliance, "Standard AWS security best practices"),
    );

    let phases: Vec<String> = intake
        .phases
        .iter()
        .map(|ph| format!("{}: {}", ph.name, text_or(&ph.weeks, "unassigned")))
        .collect();
    let _ = write!(
        p,
        "8 TIMELINE & PHASING\n8.1 PoC Duration: {}\n8.2 Phase Breakdown: {}\n\
         9 Cost Ownership: {}\n- Clearly state who bears infrastructure and GenAI service costs.\n",
        intake.poc_duration,
        joined_or(&phases, "No phase mapping provided."),
        intake.cost_ownership,
    );

    let _ = write!(
        p,
        "{}\n10.1 Deliverables: {}\n10.2 Post-PoC Next Steps: {}\n",
        SectionId::FinalOutputs.phrase(),
        joined_or(&intake.deliverables, "Standard PoC deliverables"),
        joined_or(&intake.next_steps, "To be mutually agreed"),
    );

    p
}
