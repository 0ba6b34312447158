#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use sow_architect::Catalog;
use sow_architect::model::{Block, Document, ParagraphStyle};

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([40, 90, 160]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(width, height)).unwrap();
    path
}

/// Catalog over an empty temporary assets directory: no logos, no diagrams.
pub fn empty_catalog() -> (tempfile::TempDir, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::builtin(dir.path());
    (dir, catalog)
}

/// One line per block, for order-sensitive assertions:
/// `H1:text`, `H2:text`, `BULLET:text`, `P:text`, `IMG`, `TABLE:<rows>x<cols>`, `BREAK`.
pub fn outline(doc: &Document) -> Vec<String> {
    doc.blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => {
                if p.runs.iter().any(|r| r.inline_image.is_some()) {
                    return "IMG".to_string();
                }
                match p.style {
                    ParagraphStyle::Heading(level) => format!("H{level}:{}", p.text()),
                    ParagraphStyle::ListBullet => format!("BULLET:{}", p.text()),
                    ParagraphStyle::Normal => format!("P:{}", p.text()),
                }
            }
            Block::Table(t) => format!("TABLE:{}x{}", t.rows.len(), t.column_count()),
            Block::PageBreak => "BREAK".to_string(),
        })
        .collect()
}

/// Outline of everything after the cover page's page break.
pub fn body_outline(doc: &Document) -> Vec<String> {
    let all = outline(doc);
    let start = all.iter().position(|l| l == "BREAK").map_or(0, |i| i + 1);
    all[start..].to_vec()
}

pub fn count(outline: &[String], line: &str) -> usize {
    outline.iter().filter(|l| *l == line).count()
}

pub fn tables(doc: &Document) -> Vec<&sow_architect::model::Table> {
    doc.blocks
        .iter()
        .filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
        .collect()
}

pub fn zip_entry(docx: &[u8], name: &str) -> Option<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name(name).ok()?;
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    Some(content)
}

pub fn zip_names(docx: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    archive.file_names().map(String::from).collect()
}

/// A well-formed generation result covering every section.
pub const SAMPLE_TEXT: &str = "\
Here is your SOW.

## **1 TABLE OF CONTENTS**
### 2.1 Objective
- Overview bullet

## 2 PROJECT OVERVIEW
**PARTNER EXECUTIVE SPONSOR**
Jane Doe leads the engagement.

## 3 ASSUMPTIONS & DEPENDENCIES
- Customer provides sample data

## 4 PROJECT SUCCESS CRITERIA
- Accuracy above 90%

## 5 SCOPE OF WORK
| Phase | Weeks |
|---|---|
| Build | 2 |

## 6 SOLUTION ARCHITECTURE / ARCHITECTURAL DIAGRAM
- Lambda orchestrates the pipeline

## 7 PERFORMANCE & SECURITY
| Metric | Target |
|---|---|
| Latency | 2s |

## 8 COST ESTIMATION
Costs are narrative only.

## 9 RESOURCES & COST ESTIMATES
Placeholder for cost table

## 10 FINAL OUTPUTS
- Demo
";
