use std::path::PathBuf;

use crate::assets::{inches, load_image_bytes, try_load_image};
use crate::catalog::Catalog;
use crate::model::{
    Alignment, Document, EmbeddedImage, Paragraph, Run, Table, TableCell, TableRow,
};

use super::BrandingRecord;

pub const SUBTITLE: &str = "Scope of Work Document";
pub const CUSTOMER_LOGO_PLACEHOLDER: &str = "Customer Logo";

const TITLE_SIZE: f32 = 26.0;
const SUBTITLE_SIZE: f32 = 14.0;

fn spacer(lines: usize) -> Paragraph {
    Paragraph::plain("\n".repeat(lines))
}

fn load_logo(path: Option<PathBuf>, width_in: f32) -> Option<EmbeddedImage> {
    let path = path?;
    if !path.exists() {
        log::debug!("Logo asset not found: {}", path.display());
        return None;
    }
    try_load_image(&path, inches(width_in))
}

fn logo_cell(image: Option<EmbeddedImage>) -> TableCell {
    let mut p = Paragraph::empty().aligned(Alignment::Center);
    if let Some(img) = image {
        p = p.with_run(Run::image(img));
    }
    TableCell {
        paragraphs: vec![p],
    }
}

fn customer_logo_cell(branding: &BrandingRecord) -> TableCell {
    let image = branding.customer_logo.as_ref().and_then(|bytes| {
        load_image_bytes(bytes.clone(), inches(1.8))
            .map_err(|e| log::warn!("Customer logo unusable, using placeholder: {e}"))
            .ok()
    });
    match image {
        Some(img) => logo_cell(Some(img)),
        None => TableCell {
            paragraphs: vec![
                Paragraph::empty()
                    .aligned(Alignment::Center)
                    .with_run(Run::bold(CUSTOMER_LOGO_PLACEHOLDER)),
            ],
        },
    }
}

/// Page 1: logos, title, date, then a page break. Independent of the
/// generated text.
pub fn build_cover(doc: &mut Document, branding: &BrandingRecord, catalog: &Catalog) {
    doc.push_paragraph(Paragraph::empty());
    if let Some(img) = load_logo(catalog.partner_logo(), 1.6) {
        doc.push_paragraph(Paragraph::empty().with_run(Run::image(img)));
    }

    doc.push_paragraph(spacer(3));

    doc.push_paragraph(
        Paragraph::empty().aligned(Alignment::Center).with_run(Run {
            font_size: Some(TITLE_SIZE),
            ..Run::bold(branding.offering_name.as_str())
        }),
    );
    doc.push_paragraph(
        Paragraph::empty().aligned(Alignment::Center).with_run(Run {
            font_size: Some(SUBTITLE_SIZE),
            ..Run::text(SUBTITLE)
        }),
    );

    doc.push_paragraph(spacer(4));

    doc.push_table(Table {
        rows: vec![TableRow {
            cells: vec![
                customer_logo_cell(branding),
                logo_cell(load_logo(catalog.vendor_logo(), 2.2)),
                logo_cell(load_logo(catalog.certification_logo(), 1.8)),
            ],
        }],
        grid: false,
        alignment: Alignment::Center,
    });

    doc.push_paragraph(spacer(3));
    doc.push_paragraph(
        Paragraph::empty()
            .aligned(Alignment::Center)
            .with_run(Run::bold(branding.date_label.as_str())),
    );
    doc.push_page_break();
}
