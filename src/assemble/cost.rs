use crate::catalog::Catalog;
use crate::model::{Alignment, Document, Paragraph, Run, Table, TableCell};

pub const COST_TABLE_HEADER: [&str; 3] = ["System", "Infra Cost/month", "Calculator Link"];
pub const BREAKDOWN_INTRO: &str = "The above numbers are calculated basis the following:";

const ESTIMATE_LABEL: &str = "Estimate";

const BREAKDOWN_HEADER: [&str; 3] = ["Particulars", "Value (in Dollar)", "Remarks"];

const BREAKDOWN_ROWS: [[&str; 3]; 14] = [
    ["Number of documents", "200", "Assuming 5 interactions for finalising each product copy"],
    ["Input Tokens per document", "10,00,000", ""],
    ["Input Token Cost per 1,000 Tokens", "0", "Anthropic Claude 3 Sonnet Model"],
    ["Total Input Cost in USD", "600", ""],
    ["Output Tokens per document", "50,000", ""],
    ["Output Token Cost per 1,000 Tokens", "0", "Anthropic Claude 3 Sonnet Model"],
    ["Total Output Cost in USD", "150", ""],
    ["Total Cost in USD", "750", ""],
    ["", "", ""],
    ["Tokens for Embedding Model", "2,50,00,00,000", ""],
    ["Input Cost per 1,000 Tokens", "0", "Cohere English Model"],
    ["Total Embedding Model Cost in USD", "250", ""],
    ["", "", ""],
    ["Total Cost in USD per month", "1,000", ""],
];

fn center_all(table: &mut Table) {
    for cell in table.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
        for p in &mut cell.paragraphs {
            p.alignment = Alignment::Center;
        }
    }
}

fn breakdown_table() -> Table {
    let mut table = Table::grid(&BREAKDOWN_HEADER);
    for row in BREAKDOWN_ROWS {
        table.push_row(row.into_iter().map(TableCell::text).collect());
    }
    table
}

/// Append the infrastructure cost table for `offering`. Returns false (and
/// emits nothing) when the catalog has no cost entry for it.
pub fn add_infra_cost_table(
    doc: &mut Document,
    catalog: &Catalog,
    offering: &str,
    generated_text: &str,
) -> bool {
    let Some(rows) = catalog.cost_for(offering) else {
        log::debug!("No cost entry for {offering}; skipping cost table");
        return false;
    };
    let url = catalog.estimate_link_for(offering, generated_text);

    let mut table = Table::grid(&COST_TABLE_HEADER);
    for row in rows {
        let link_cell = TableCell {
            paragraphs: vec![Paragraph::empty().with_run(Run::link(ESTIMATE_LABEL, url.as_str()))],
        };
        table.push_row(vec![TableCell::text(row.label), TableCell::text(row.value), link_cell]);
    }
    center_all(&mut table);
    doc.push_table(table);

    if catalog.offering(offering).is_some_and(|o| o.cost_breakdown) {
        doc.push_paragraph(Paragraph::empty());
        doc.push_paragraph(Paragraph::plain(BREAKDOWN_INTRO));
        doc.push_table(breakdown_table());
    }
    true
}
