use sow_architect::classify::{
    LineKind, SectionId, classify, clean_line, is_table_line, split_table_row,
};

#[test]
fn recognizes_decorated_section_header() {
    let line = classify("## **6 Solution Architecture / Architectural Diagram**", None);
    assert_eq!(line.kind, LineKind::Header(SectionId::SolutionArchitecture));
    assert_eq!(line.clean_text, "6 Solution Architecture / Architectural Diagram");
    assert_eq!(line.upper_text, "6 SOLUTION ARCHITECTURE / ARCHITECTURAL DIAGRAM");
}

#[test]
fn final_outputs_header_matches_in_any_case() {
    assert_eq!(
        classify("10 Final Outputs", None).kind,
        LineKind::Header(SectionId::FinalOutputs)
    );
    assert_eq!(
        classify("# 1 table of contents", None).kind,
        LineKind::Header(SectionId::TableOfContents)
    );
}

#[test]
fn subsection_numbers_are_not_headers() {
    let line = classify("### 2.1 Objective", None);
    assert_eq!(line.kind, LineKind::Heading(3));
    assert_eq!(line.clean_text, "2.1 Objective");
}

#[test]
fn irrelevant_markers_win_over_headers() {
    assert_eq!(
        classify("5 SCOPE OF WORK (placeholder for cost table)", None).kind,
        LineKind::Discard
    );
    assert_eq!(
        classify("Specifics to be discussed basis POC", None).kind,
        LineKind::Discard
    );
}

#[test]
fn table_start_requires_pipe_on_next_line() {
    assert_eq!(classify("| a | b |", Some("|---|---|")).kind, LineKind::TableStart);
    assert_eq!(classify("| a | b |", Some("plain text")).kind, LineKind::Paragraph);
    assert_eq!(classify("| a | b |", None).kind, LineKind::Paragraph);
}

#[test]
fn headings_and_bullets() {
    assert_eq!(classify("## Delivery approach", None).kind, LineKind::Heading(2));
    assert_eq!(classify("### Risks", None).kind, LineKind::Heading(3));

    let bullet = classify("- **Owner:** customer", None);
    assert_eq!(bullet.kind, LineKind::Bullet);
    assert_eq!(bullet.bullet_text(), "Owner: customer");

    let star = classify("* item", None);
    assert_eq!(star.kind, LineKind::Bullet);
    assert_eq!(star.bullet_text(), "item");
}

#[test]
fn blank_and_plain_lines() {
    assert_eq!(classify("   ", None).kind, LineKind::Blank);
    let p = classify("  The **customer** owns data.  ", None);
    assert_eq!(p.kind, LineKind::Paragraph);
    assert_eq!(p.clean_text, "The customer owns data.");
}

#[test]
fn clean_line_strips_emphasis_and_hashes() {
    assert_eq!(clean_line("### **Title**"), "Title");
    assert_eq!(clean_line("**#** x"), "x");
}

#[test]
fn split_row_drops_empty_cells() {
    assert_eq!(split_table_row("| a |  | b |"), vec!["a", "b"]);
    assert!(split_table_row("|---|---|").iter().all(|c| c.chars().all(|ch| ch == '-')));
    assert!(is_table_line("   | x |"));
    assert!(!is_table_line("x | y"));
}

#[test]
fn section_ordinals_round_trip() {
    for id in SectionId::ALL {
        assert_eq!(SectionId::from_ordinal(id.ordinal()), Some(id));
        assert!(id.phrase().starts_with(id.ordinal()));
    }
    assert_eq!(SectionId::from_ordinal("11"), None);
    assert_eq!(SectionId::FinalOutputs.index(), 9);
}
