//! Line classification for generated SOW text.
//!
//! Each line is categorized on its own content plus a one-line lookahead
//! (needed to recognize the start of a pipe table). Classification never
//! depends on where the line sits in the document.

/// Placeholder and commentary artifacts the generator sometimes emits.
const IRRELEVANT_MARKERS: &[&str] = &[
    "PLACEHOLDER FOR COST TABLE",
    "SPECIFICS TO BE DISCUSSED BASIS POC",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    TableOfContents,
    ProjectOverview,
    AssumptionsDependencies,
    SuccessCriteria,
    ScopeOfWork,
    SolutionArchitecture,
    PerformanceSecurity,
    CostEstimation,
    ResourcesCostEstimates,
    FinalOutputs,
}

impl SectionId {
    pub const ALL: [SectionId; 10] = [
        SectionId::TableOfContents,
        SectionId::ProjectOverview,
        SectionId::AssumptionsDependencies,
        SectionId::SuccessCriteria,
        SectionId::ScopeOfWork,
        SectionId::SolutionArchitecture,
        SectionId::PerformanceSecurity,
        SectionId::CostEstimation,
        SectionId::ResourcesCostEstimates,
        SectionId::FinalOutputs,
    ];

    /// Ordinal key, "1" through "10".
    pub fn ordinal(self) -> &'static str {
        match self {
            SectionId::TableOfContents => "1",
            SectionId::ProjectOverview => "2",
            SectionId::AssumptionsDependencies => "3",
            SectionId::SuccessCriteria => "4",
            SectionId::ScopeOfWork => "5",
            SectionId::SolutionArchitecture => "6",
            SectionId::PerformanceSecurity => "7",
            SectionId::CostEstimation => "8",
            SectionId::ResourcesCostEstimates => "9",
            SectionId::FinalOutputs => "10",
        }
    }

    /// Canonical uppercase header phrase.
    pub fn phrase(self) -> &'static str {
        match self {
            SectionId::TableOfContents => "1 TABLE OF CONTENTS",
            SectionId::ProjectOverview => "2 PROJECT OVERVIEW",
            SectionId::AssumptionsDependencies => "3 ASSUMPTIONS & DEPENDENCIES",
            SectionId::SuccessCriteria => "4 PROJECT SUCCESS CRITERIA",
            SectionId::ScopeOfWork => "5 SCOPE OF WORK",
            SectionId::SolutionArchitecture => "6 SOLUTION ARCHITECTURE",
            SectionId::PerformanceSecurity => "7 PERFORMANCE & SECURITY",
            SectionId::CostEstimation => "8 COST ESTIMATION",
            SectionId::ResourcesCostEstimates => "9 RESOURCES & COST ESTIMATES",
            SectionId::FinalOutputs => "10 FINAL OUTPUTS",
        }
    }

    pub fn from_ordinal(ordinal: &str) -> Option<SectionId> {
        Self::ALL.into_iter().find(|s| s.ordinal() == ordinal)
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    fn match_prefix(upper_text: &str) -> Option<SectionId> {
        Self::ALL
            .into_iter()
            .find(|s| upper_text.starts_with(s.phrase()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Discard,
    Header(SectionId),
    TableStart,
    Heading(u8),
    Bullet,
    Paragraph,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub clean_text: String,
    pub upper_text: String,
}

impl ClassifiedLine {
    /// Display text: `clean_text` without a leading bullet marker.
    pub fn bullet_text(&self) -> &str {
        self.clean_text
            .strip_prefix("- ")
            .or_else(|| self.clean_text.strip_prefix("* "))
            .unwrap_or(&self.clean_text)
    }
}

/// Remove emphasis asterisks and leading `#` markers.
pub fn clean_line(trimmed: &str) -> String {
    let no_emphasis: String = trimmed.chars().filter(|&c| c != '*').collect();
    no_emphasis
        .trim()
        .trim_start_matches('#')
        .trim()
        .to_string()
}

pub fn is_table_line(line: &str) -> bool {
    line.trim().starts_with('|')
}

pub fn classify(line: &str, next_line: Option<&str>) -> ClassifiedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ClassifiedLine {
            kind: LineKind::Blank,
            clean_text: String::new(),
            upper_text: String::new(),
        };
    }

    let clean_text = clean_line(trimmed);
    let upper_text = clean_text.to_uppercase();

    let kind = if IRRELEVANT_MARKERS.iter().any(|m| upper_text.contains(m)) {
        LineKind::Discard
    } else if let Some(id) = SectionId::match_prefix(&upper_text) {
        LineKind::Header(id)
    } else if trimmed.starts_with('|') && next_line.is_some_and(is_table_line) {
        LineKind::TableStart
    } else if trimmed.starts_with("## ") {
        LineKind::Heading(2)
    } else if trimmed.starts_with("### ") {
        LineKind::Heading(3)
    } else if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
        LineKind::Bullet
    } else {
        LineKind::Paragraph
    };

    ClassifiedLine {
        kind,
        clean_text,
        upper_text,
    }
}

/// Split a pipe-table row into trimmed, non-empty cells.
pub fn split_table_row(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

