mod cost;
mod cover;

pub use cost::{BREAKDOWN_INTRO, COST_TABLE_HEADER, add_infra_cost_table};
pub use cover::{CUSTOMER_LOGO_PLACEHOLDER, SUBTITLE, build_cover};

use chrono::NaiveDate;

use crate::assets::{inches, load_image_file};
use crate::catalog::Catalog;
use crate::classify::{ClassifiedLine, LineKind, SectionId, classify, is_table_line, split_table_row};
use crate::model::{Alignment, Document, Paragraph, ParagraphStyle, Run, Table, TableCell};

pub const DIAGRAM_UNRENDERABLE: &str = "Architecture diagram could not be rendered.";
pub const DIAGRAM_UNAVAILABLE: &str = "Architecture diagram not available for this use case.";

/// Paragraphs mentioning one of these get their first run in bold.
const BOLD_KEYWORDS: &[&str] = &[
    "PARTNER EXECUTIVE SPONSOR",
    "CUSTOMER EXECUTIVE SPONSOR",
    "AWS EXECUTIVE SPONSOR",
    "PROJECT ESCALATION CONTACTS",
    "ASSUMPTIONS:",
    "DEPENDENCIES:",
    "ASSUMPTIONS (",
    "DEPENDENCIES (",
];

const DIAGRAM_WIDTH_IN: f32 = 6.0;
const TOC_INDENT_L2_IN: f32 = 0.4;
const TOC_INDENT_L3_IN: f32 = 0.8;

/// Cover-page branding, fixed for the duration of one assembly.
#[derive(Clone, Debug)]
pub struct BrandingRecord {
    pub offering_name: String,
    pub customer_logo: Option<Vec<u8>>,
    pub date_label: String,
}

impl BrandingRecord {
    pub fn new(offering_name: impl Into<String>, date_label: impl Into<String>) -> Self {
        Self {
            offering_name: offering_name.into(),
            customer_logo: None,
            date_label: date_label.into(),
        }
    }

    /// Label the document with `date` formatted as e.g. "19 October 2026".
    pub fn dated(offering_name: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(offering_name, date.format("%d %B %Y").to_string())
    }

    pub fn with_customer_logo(mut self, bytes: Vec<u8>) -> Self {
        self.customer_logo = Some(bytes);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionState {
    Pending,
    Rendered,
}

/// Tracks which numbered sections already produced their heading.
#[derive(Clone, Debug)]
pub struct SectionRegistry {
    states: [SectionState; SectionId::ALL.len()],
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self {
            states: [SectionState::Pending; SectionId::ALL.len()],
        }
    }
}

impl SectionRegistry {
    pub fn state(&self, id: SectionId) -> SectionState {
        self.states[id.index()]
    }

    pub fn is_rendered(&self, id: SectionId) -> bool {
        self.state(id) == SectionState::Rendered
    }

    /// Mark `id` rendered; returns false if it already was.
    pub fn mark_rendered(&mut self, id: SectionId) -> bool {
        let slot = &mut self.states[id.index()];
        let first = *slot == SectionState::Pending;
        *slot = SectionState::Rendered;
        first
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderCursor {
    pub line: usize,
    pub content_started: bool,
    pub in_toc_section: bool,
    pub architecture_rendered: bool,
}

/// Final state of a body pass, returned for callers that need to know
/// whether any content was emitted.
#[derive(Clone, Debug)]
pub struct BodyOutcome {
    pub registry: SectionRegistry,
    pub cursor: RenderCursor,
}

struct BodyAssembler<'a> {
    doc: &'a mut Document,
    catalog: &'a Catalog,
    offering: &'a str,
    caption: &'a str,
    lines: Vec<&'a str>,
    registry: SectionRegistry,
    cursor: RenderCursor,
}

impl<'a> BodyAssembler<'a> {
    fn run(mut self) -> BodyOutcome {
        while self.cursor.line < self.lines.len() {
            let i = self.cursor.line;
            let next = self.lines.get(i + 1).copied();
            let line = classify(self.lines[i], next);

            match line.kind {
                LineKind::Blank => {
                    let prev_non_blank = i > 0 && !self.lines[i - 1].trim().is_empty();
                    if prev_non_blank && self.cursor.content_started {
                        self.doc.push_paragraph(Paragraph::empty());
                    }
                    self.cursor.line += 1;
                    continue;
                }
                LineKind::Discard => {
                    log::debug!("Dropping generator artifact at line {}: {}", i + 1, line.clean_text);
                    self.cursor.line += 1;
                    continue;
                }
                _ => {}
            }

            if !self.cursor.content_started {
                if line.kind == LineKind::Header(SectionId::TableOfContents) {
                    self.cursor.content_started = true;
                } else {
                    self.cursor.line += 1;
                    continue;
                }
            }

            match line.kind {
                LineKind::Header(id) => {
                    self.handle_header(id, &line);
                    self.cursor.line += 1;
                }
                LineKind::TableStart => self.handle_table(),
                LineKind::Heading(level) => {
                    let mut p = Paragraph::heading(level, line.clean_text.as_str());
                    if self.cursor.in_toc_section {
                        let indent = if level == 2 { TOC_INDENT_L2_IN } else { TOC_INDENT_L3_IN };
                        p = p.indented(inches(indent));
                    }
                    self.doc.push_paragraph(p);
                    self.cursor.line += 1;
                }
                LineKind::Bullet => {
                    let mut p = Paragraph::new(ParagraphStyle::ListBullet)
                        .with_run(Run::text(line.bullet_text()));
                    if self.cursor.in_toc_section {
                        p = p.indented(inches(TOC_INDENT_L2_IN));
                    }
                    self.doc.push_paragraph(p);
                    self.cursor.line += 1;
                }
                LineKind::Paragraph => {
                    let bold = BOLD_KEYWORDS.iter().any(|k| line.upper_text.contains(k));
                    let run = Run {
                        bold,
                        ..Run::text(line.clean_text.as_str())
                    };
                    self.doc.push_paragraph(Paragraph::new(ParagraphStyle::Normal).with_run(run));
                    self.cursor.line += 1;
                }
                LineKind::Blank | LineKind::Discard => self.cursor.line += 1,
            }
        }

        BodyOutcome {
            registry: self.registry,
            cursor: self.cursor,
        }
    }

    fn handle_header(&mut self, id: SectionId, line: &ClassifiedLine) {
        if id == SectionId::TableOfContents {
            self.cursor.in_toc_section = true;
        } else if self.cursor.in_toc_section {
            self.cursor.in_toc_section = false;
            if id == SectionId::ProjectOverview {
                self.doc.push_page_break();
            }
        }

        if self.registry.mark_rendered(id) {
            self.doc.push_paragraph(Paragraph::heading(1, line.clean_text.as_str()));
        } else {
            log::debug!(
                "Suppressing duplicate heading for section {}: {}",
                id.ordinal(),
                line.clean_text
            );
        }

        // Every header other than the first architecture header falls through
        // to the "not available" notice, duplicates included.
        if id == SectionId::SolutionArchitecture && !self.cursor.architecture_rendered {
            self.cursor.architecture_rendered = true;
            self.insert_architecture_diagram();
        } else {
            self.doc.push_paragraph(Paragraph::plain(DIAGRAM_UNAVAILABLE));
        }
    }

    fn insert_architecture_diagram(&mut self) {
        let Some(path) = self.catalog.diagram_asset_for(self.offering) else {
            log::info!("No architecture diagram mapped for {}", self.offering);
            self.doc.push_paragraph(Paragraph::plain(DIAGRAM_UNAVAILABLE));
            return;
        };
        match load_image_file(&path, inches(DIAGRAM_WIDTH_IN)) {
            Ok(img) => {
                self.doc.push_paragraph(Paragraph::empty());
                self.doc.push_paragraph(Paragraph::empty().with_run(Run::image(img)));
                self.doc.push_paragraph(
                    Paragraph::plain(format!("{} – Architecture Diagram", self.caption))
                        .aligned(Alignment::Center),
                );
            }
            Err(e) => {
                log::warn!("Architecture diagram {} unusable: {e}", path.display());
                self.doc.push_paragraph(Paragraph::plain(DIAGRAM_UNRENDERABLE));
            }
        }
    }

    fn handle_table(&mut self) {
        let start = self.cursor.line;
        let mut end = start;
        while end < self.lines.len() && is_table_line(self.lines[end]) {
            end += 1;
        }
        self.cursor.line = end;

        if self.registry.is_rendered(SectionId::ScopeOfWork)
            && !self.registry.is_rendered(SectionId::SolutionArchitecture)
        {
            log::debug!("Suppressing table at lines {}-{} inside scope of work", start + 1, end);
            return;
        }

        let block = &self.lines[start..end];
        if block.len() < 3 {
            log::debug!("Dropping table with {} rows at line {}", block.len(), start + 1);
            return;
        }

        let header = split_table_row(block[0]);
        if header.is_empty() {
            return;
        }
        let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();
        let mut table = Table::grid(&header_refs);
        for row in &block[2..] {
            let cells = split_table_row(row).into_iter().map(TableCell::text).collect();
            table.push_row(cells);
        }
        self.doc.push_table(table);
    }
}

/// Walk `text` and append the body blocks to `doc`. The diagram caption
/// names `offering`; [`assemble`] captions with the branding name instead.
pub fn assemble_body(doc: &mut Document, text: &str, offering: &str, catalog: &Catalog) -> BodyOutcome {
    body_pass(doc, text, offering, offering, catalog)
}

fn body_pass(doc: &mut Document, text: &str, offering: &str, caption: &str, catalog: &Catalog) -> BodyOutcome {
    BodyAssembler {
        doc,
        catalog,
        offering,
        caption,
        lines: text.split('\n').collect(),
        registry: SectionRegistry::default(),
        cursor: RenderCursor::default(),
    }
    .run()
}

/// Build the full document: cover page, body, then the cost table. Never
/// fails; asset problems degrade to placeholder or fallback text.
pub fn assemble(text: &str, branding: &BrandingRecord, offering: &str, catalog: &Catalog) -> Document {
    let mut doc = Document {
        title: Some(branding.offering_name.clone()),
        ..Document::default()
    };
    build_cover(&mut doc, branding, catalog);
    let outcome = body_pass(&mut doc, text, offering, &branding.offering_name, catalog);
    if outcome.cursor.content_started {
        add_infra_cost_table(&mut doc, catalog, offering, text);
    } else {
        log::warn!("Generated text has no table of contents header; body left empty");
    }
    doc
}
