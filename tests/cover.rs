mod common;

use chrono::NaiveDate;
use common::{empty_catalog, outline, png_bytes, tables, write_png};
use sow_architect::assemble::{CUSTOMER_LOGO_PLACEHOLDER, SUBTITLE, build_cover};
use sow_architect::assets::inches;
use sow_architect::model::{Alignment, Block, Document};
use sow_architect::{BrandingRecord, assemble};

#[test]
fn cover_without_assets_uses_placeholders() {
    let (_dir, catalog) = empty_catalog();
    let mut doc = Document::default();
    build_cover(&mut doc, &BrandingRecord::new("Gen AI for SOP POC SOW", "05 March 2026"), &catalog);

    assert_eq!(
        outline(&doc),
        vec![
            "P:".to_string(),
            "P:\n\n\n".into(),
            "P:Gen AI for SOP POC SOW".into(),
            format!("P:{SUBTITLE}"),
            "P:\n\n\n\n".into(),
            "TABLE:1x3".into(),
            "P:\n\n\n".into(),
            "P:05 March 2026".into(),
            "BREAK".into(),
        ]
    );

    let logos = tables(&doc)[0];
    assert!(!logos.grid);
    assert_eq!(logos.alignment, Alignment::Center);
    let first = &logos.rows[0].cells[0].paragraphs[0].runs[0];
    assert_eq!(first.text, CUSTOMER_LOGO_PLACEHOLDER);
    assert!(first.bold);
}

#[test]
fn title_and_date_styling() {
    let (_dir, catalog) = empty_catalog();
    let mut doc = Document::default();
    let branding = BrandingRecord::dated("Project Scope Document", NaiveDate::from_ymd_opt(2026, 10, 9).unwrap());
    build_cover(&mut doc, &branding, &catalog);

    let paragraphs: Vec<_> = doc
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
        .collect();
    let title = paragraphs.iter().find(|p| p.text() == "Project Scope Document").unwrap();
    assert_eq!(title.alignment, Alignment::Center);
    assert!(title.runs[0].bold);
    assert_eq!(title.runs[0].font_size, Some(26.0));

    let subtitle = paragraphs.iter().find(|p| p.text() == SUBTITLE).unwrap();
    assert_eq!(subtitle.runs[0].font_size, Some(14.0));
    assert!(!subtitle.runs[0].bold);

    let date = paragraphs.iter().find(|p| p.text() == "09 October 2026").unwrap();
    assert!(date.runs[0].bold);
    assert_eq!(date.alignment, Alignment::Center);
}

#[test]
fn logos_and_customer_logo_are_embedded() {
    let (dir, catalog) = empty_catalog();
    // Logo file names keep their .jpg extension; content is sniffed.
    write_png(dir.path(), "aws partner logo.jpg", 160, 40);
    write_png(dir.path(), "oneture logo1.jpg", 220, 110);
    write_png(dir.path(), "aws advanced logo1.jpg", 90, 90);

    let branding = BrandingRecord::new("Gen AI Speech To Speech", "today").with_customer_logo(png_bytes(50, 25));
    let mut doc = Document::default();
    build_cover(&mut doc, &branding, &catalog);

    let widths: Vec<f32> = doc.images().map(|i| i.display_width).collect();
    assert_eq!(widths, vec![inches(1.6), inches(1.8), inches(2.2), inches(1.8)]);
    assert_eq!(outline(&doc)[1], "IMG");
}

#[test]
fn unreadable_customer_logo_falls_back_to_placeholder() {
    let (_dir, catalog) = empty_catalog();
    let branding = BrandingRecord::new("X", "today").with_customer_logo(b"not an image".to_vec());
    let mut doc = Document::default();
    build_cover(&mut doc, &branding, &catalog);

    assert_eq!(doc.images().count(), 0);
    let cell = &tables(&doc)[0].rows[0].cells[0];
    assert_eq!(cell.text_content(), CUSTOMER_LOGO_PLACEHOLDER);
}

#[test]
fn cover_is_independent_of_generated_text() {
    let (_dir, catalog) = empty_catalog();
    let branding = BrandingRecord::new("Ready Search POC Scope of Work Document", "01 May 2026");
    let a = assemble("", &branding, &branding.offering_name, &catalog);
    let b = assemble("1 TABLE OF CONTENTS\n", &branding, &branding.offering_name, &catalog);

    let cover_a = outline(&a);
    let cover_b: Vec<String> = outline(&b).into_iter().take(cover_a.len()).collect();
    assert_eq!(cover_a, cover_b);
    assert_eq!(a.title.as_deref(), Some("Ready Search POC Scope of Work Document"));
}
