use sow_architect::Error;
use sow_architect::classify::SectionId;
use sow_architect::intake::{DataCharacteristics, IntakeConfig, Stakeholder, build_prompt, stakeholder_table};

const INTAKE: &str = r#"
offering = "AI based Image Inspection POC SOW"
industry = "Manufacturing"
objective = "Detect surface defects on the assembly line."
outcomes = ["Reduced manual inspection"]
customer_dependencies = ["Access to camera feeds"]
success_dimensions = ["Accuracy"]
genai_services = []
date = "2026-10-19"

[[stakeholders.customer]]
name = "Priya Shah"
title = "CTO"
email = "priya@example.com"

[[data]]
kind = "images"
avg_size_mb = "2"
formats = "JPEG"

[[data]]
kind = "audio"

[[phases]]
name = "Infra setup"
weeks = "1"
"#;

#[test]
fn parses_intake_with_defaults() {
    let intake = IntakeConfig::parse(INTAKE).unwrap();
    assert_eq!(intake.offering, "AI based Image Inspection POC SOW");
    assert_eq!(intake.engagement_type, "Proof of Concept (PoC)");
    assert_eq!(intake.compute_orchestration, "AWS Lambda + Step Functions");
    assert_eq!(intake.storage_services, vec!["Amazon S3"]);
    assert!(intake.genai_services.is_empty());
    assert_eq!(intake.phases.len(), 1);
    assert_eq!(intake.stakeholders.customer[0].title, "CTO");
    assert_eq!(intake.date, chrono::NaiveDate::from_ymd_opt(2026, 10, 19));
    assert_eq!(
        intake.data[0],
        DataCharacteristics::Images {
            avg_size_mb: "2".into(),
            formats: "JPEG".into(),
            volume: String::new(),
        }
    );
    assert_eq!(intake.data[1], DataCharacteristics::Audio);
}

#[test]
fn objective_is_required() {
    let err = IntakeConfig::parse("offering = \"X\"\n").unwrap_err();
    assert!(matches!(err, Error::Intake(_)));
    assert!(err.to_string().contains("Business Objective is required."));
}

#[test]
fn choice_fields_must_match_known_options() {
    let err = IntakeConfig::parse("objective = \"x\"\nengagement_type = \"Hackathon\"\n").unwrap_err();
    assert!(matches!(err, Error::Intake(_)));
    assert!(err.to_string().contains("engagement_type"), "{err}");

    let err = IntakeConfig::parse("objective = \"x\"\nperformance_expectation = \"Instant\"\n").unwrap_err();
    assert!(err.to_string().contains("Near real-time"), "{err}");

    let intake = IntakeConfig::parse("objective = \"x\"\nengagement_type = \"Pilot\"\ncost_ownership = \"Shared\"\n").unwrap();
    assert_eq!(intake.engagement_type, "Pilot");

    let defaults = IntakeConfig {
        objective: "x".into(),
        ..IntakeConfig::default()
    };
    assert!(defaults.validate().is_ok());
}

#[test]
fn unknown_data_kind_is_rejected() {
    let err = IntakeConfig::parse("objective = \"x\"\n[[data]]\nkind = \"holograms\"\n").unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
}

#[test]
fn default_phases_follow_poc_plan() {
    let names: Vec<String> = IntakeConfig::default().phases.into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Infra setup", "Core workflows", "Testing & validation", "Demo & feedback"]);
}

#[test]
fn prompt_lists_every_section_and_selection() {
    let intake = IntakeConfig::parse(INTAKE).unwrap();
    let prompt = build_prompt(&intake);

    for id in SectionId::ALL {
        assert!(prompt.contains(id.phrase()), "missing {}", id.phrase());
    }
    assert!(prompt.starts_with("Generate a COMPLETE formal enterprise SOW for AI based Image Inspection POC SOW in Manufacturing."));
    assert!(prompt.contains("2.1 OBJECTIVE: Detect surface defects on the assembly line."));
    assert!(prompt.contains("Selected by user: Access to camera feeds"));
    assert!(prompt.contains("Selected data types: Images, Audio"));
    assert!(prompt.contains("Detailed inputs: Images (average size (MB): 2, formats: JPEG)"));
    assert!(prompt.contains("6.2 GenAI / ML Services: None selected"));
    assert!(prompt.contains("Selected assumptions: No predefined assumptions selected."));
    assert!(prompt.contains("8.2 Phase Breakdown: Infra setup: 1"));
    assert!(prompt.contains("| Priya Shah | CTO | priya@example.com |"));
    assert!(prompt.contains("### Partner Executive Sponsor\n| Name | Title | Email |"));
}

#[test]
fn empty_roster_renders_header_only() {
    assert_eq!(stakeholder_table(&[]), "| Name | Title | Email |\n| --- | --- | --- |\n");
    let one = stakeholder_table(&[Stakeholder {
        name: "A".into(),
        title: "B".into(),
        email: "c@d".into(),
    }]);
    assert!(one.ends_with("| A | B | c@d |\n"));
}
