mod styles;

use std::collections::HashMap;
use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::error::Error;
use crate::model::{Alignment, Block, Document, EmbeddedImage, Paragraph, Run, Table};

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const WPD_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_TYPE_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

// US Letter with 1in margins
const PAGE_WIDTH_TWIPS: i64 = 12240;
const PAGE_HEIGHT_TWIPS: i64 = 15840;
const MARGIN_TWIPS: i64 = 1440;
const TEXT_WIDTH_TWIPS: i64 = PAGE_WIDTH_TWIPS - 2 * MARGIN_TWIPS;

const EMU_PER_PT: f32 = 12700.0;

pub(crate) fn pts_to_twips(pts: f32) -> i64 {
    (pts * 20.0).round() as i64
}

fn pts_to_emu(pts: f32) -> i64 {
    (pts * EMU_PER_PT).round() as i64
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

fn jc_value(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}

struct Relationship {
    id: String,
    kind: &'static str,
    target: String,
    external: bool,
}

struct MediaPart {
    name: String,
    data: Vec<u8>,
}

/// Parts and relationships accumulated while serializing `word/document.xml`.
struct Package {
    rels: Vec<Relationship>,
    media: Vec<MediaPart>,
    link_ids: HashMap<String, String>,
    next_drawing_id: u32,
}

impl Package {
    fn new() -> Self {
        let mut pkg = Self {
            rels: Vec::new(),
            media: Vec::new(),
            link_ids: HashMap::new(),
            next_drawing_id: 1,
        };
        pkg.push_rel("styles", "styles.xml".into(), false);
        pkg.push_rel("numbering", "numbering.xml".into(), false);
        pkg
    }

    fn push_rel(&mut self, kind: &'static str, target: String, external: bool) -> String {
        let id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            id: id.clone(),
            kind,
            target,
            external,
        });
        id
    }

    fn add_image(&mut self, image: &EmbeddedImage) -> (String, String) {
        let name = format!("image{}.{}", self.media.len() + 1, image.format.extension());
        self.media.push(MediaPart {
            name: name.clone(),
            data: image.data.clone(),
        });
        let id = self.push_rel("image", format!("media/{name}"), false);
        (id, name)
    }

    fn hyperlink_id(&mut self, url: &str) -> String {
        if let Some(id) = self.link_ids.get(url) {
            return id.clone();
        }
        let id = self.push_rel("hyperlink", url.to_string(), true);
        self.link_ids.insert(url.to_string(), id.clone());
        id
    }

    fn drawing_id(&mut self) -> u32 {
        let id = self.next_drawing_id;
        self.next_drawing_id += 1;
        id
    }

    fn rels_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(&format!(r#"<Relationships xmlns="{PKG_REL_NS}">"#));
        for rel in &self.rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{REL_TYPE_BASE}/{}" Target="{}"{}/>"#,
                rel.id,
                rel.kind,
                escape_xml(&rel.target),
                if rel.external { r#" TargetMode="External""# } else { "" },
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

fn write_text(out: &mut String, text: &str) {
    for (i, segment) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:br/>");
        }
        if !segment.is_empty() {
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&escape_xml(segment));
            out.push_str("</w:t>");
        }
    }
}

fn write_drawing(out: &mut String, image: &EmbeddedImage, pkg: &mut Package) {
    let (rel_id, name) = pkg.add_image(image);
    let id = pkg.drawing_id();
    let cx = pts_to_emu(image.display_width);
    let cy = pts_to_emu(image.display_height);
    out.push_str(&format!(
        concat!(
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:docPr id="{id}" name="Picture {id}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="{pic}">"#,
            r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
            r#"</a:graphicData></a:graphic></wp:inline></w:drawing>"#,
        ),
        cx = cx,
        cy = cy,
        id = id,
        pic = PIC_NS,
        name = name,
        rel = rel_id,
    ));
}

fn write_run(out: &mut String, run: &Run, pkg: &mut Package) {
    let link_id = run.hyperlink_url.as_deref().map(|url| pkg.hyperlink_id(url));
    if let Some(id) = &link_id {
        out.push_str(&format!(r#"<w:hyperlink r:id="{id}">"#));
    }

    out.push_str("<w:r>");
    let mut rpr = String::new();
    if link_id.is_some() {
        rpr.push_str(r#"<w:rStyle w:val="Hyperlink"/><w:color w:val="0000FF"/><w:u w:val="single"/>"#);
    }
    if run.bold {
        rpr.push_str("<w:b/><w:bCs/>");
    }
    if let Some(size) = run.font_size {
        let half_points = (size * 2.0).round() as i64;
        rpr.push_str(&format!(r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#));
    }
    if !rpr.is_empty() {
        out.push_str("<w:rPr>");
        out.push_str(&rpr);
        out.push_str("</w:rPr>");
    }
    if let Some(image) = &run.inline_image {
        write_drawing(out, image, pkg);
    }
    write_text(out, &run.text);
    out.push_str("</w:r>");

    if link_id.is_some() {
        out.push_str("</w:hyperlink>");
    }
}

fn write_paragraph(out: &mut String, para: &Paragraph, pkg: &mut Package) {
    out.push_str("<w:p>");
    let mut ppr = String::new();
    if let Some(style) = para.style.style_id() {
        ppr.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
    }
    if para.indent_left > 0.0 {
        ppr.push_str(&format!(r#"<w:ind w:left="{}"/>"#, pts_to_twips(para.indent_left)));
    }
    if let Some(jc) = jc_value(para.alignment) {
        ppr.push_str(&format!(r#"<w:jc w:val="{jc}"/>"#));
    }
    if !ppr.is_empty() {
        out.push_str("<w:pPr>");
        out.push_str(&ppr);
        out.push_str("</w:pPr>");
    }
    for run in &para.runs {
        write_run(out, run, pkg);
    }
    out.push_str("</w:p>");
}

fn write_table(out: &mut String, table: &Table, pkg: &mut Package) {
    let ncols = table.column_count();
    if ncols == 0 {
        return;
    }
    let col_width = TEXT_WIDTH_TWIPS / ncols as i64;

    out.push_str("<w:tbl><w:tblPr>");
    if table.grid {
        out.push_str(r#"<w:tblStyle w:val="TableGrid"/>"#);
    }
    out.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
    if let Some(jc) = jc_value(table.alignment) {
        out.push_str(&format!(r#"<w:jc w:val="{jc}"/>"#));
    }
    out.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
    out.push_str("</w:tblPr><w:tblGrid>");
    for _ in 0..ncols {
        out.push_str(&format!(r#"<w:gridCol w:w="{col_width}"/>"#));
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        out.push_str("<w:tr>");
        for cell in &row.cells {
            out.push_str(&format!(
                r#"<w:tc><w:tcPr><w:tcW w:w="{col_width}" w:type="dxa"/></w:tcPr>"#
            ));
            if cell.paragraphs.is_empty() {
                // A cell must end with a paragraph
                out.push_str("<w:p/>");
            }
            for para in &cell.paragraphs {
                write_paragraph(out, para, pkg);
            }
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

fn document_xml(doc: &Document, pkg: &mut Package) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!(
        r#"<w:document xmlns:w="{WML_NS}" xmlns:r="{REL_NS}" xmlns:wp="{WPD_NS}" xmlns:a="{DML_NS}" xmlns:pic="{PIC_NS}"><w:body>"#
    ));
    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => write_paragraph(&mut xml, p, pkg),
            Block::Table(t) => write_table(&mut xml, t, pkg),
            Block::PageBreak => xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }
    xml.push_str(&format!(
        concat!(
            r#"<w:sectPr><w:pgSz w:w="{w}" w:h="{h}"/>"#,
            r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            r#"</w:sectPr></w:body></w:document>"#,
        ),
        w = PAGE_WIDTH_TWIPS,
        h = PAGE_HEIGHT_TWIPS,
        m = MARGIN_TWIPS,
    ));
    xml
}

fn content_types_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Default Extension="png" ContentType="image/png"/>"#,
        r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
        r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"</Types>"#,
    )
    .to_string()
}

fn package_rels_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="{base}/officeDocument" Target="word/document.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"</Relationships>"#,
        ),
        ns = PKG_REL_NS,
        base = REL_TYPE_BASE,
    )
}

fn core_xml(doc: &Document) -> String {
    let title = doc
        .title
        .as_deref()
        .map(|t| format!("<dc:title>{}</dc:title>", escape_xml(t)))
        .unwrap_or_default();
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
            "{title}<dc:creator>{creator}</dc:creator>",
            r#"</cp:coreProperties>"#,
        ),
        title = title,
        creator = env!("CARGO_PKG_NAME"),
    )
}

/// Serialize `doc` into a `.docx` package.
pub fn render(doc: &Document) -> Result<Vec<u8>, Error> {
    let mut pkg = Package::new();
    let document = document_xml(doc, &mut pkg);

    let mut parts: Vec<(String, Vec<u8>)> = vec![
        ("[Content_Types].xml".into(), content_types_xml().into_bytes()),
        ("_rels/.rels".into(), package_rels_xml().into_bytes()),
        ("docProps/core.xml".into(), core_xml(doc).into_bytes()),
        ("word/document.xml".into(), document.into_bytes()),
        ("word/_rels/document.xml.rels".into(), pkg.rels_xml().into_bytes()),
        ("word/styles.xml".into(), styles::styles_xml().into_bytes()),
        ("word/numbering.xml".into(), styles::numbering_xml().into_bytes()),
    ];
    for media in pkg.media {
        parts.push((format!("word/media/{}", media.name), media.data));
    }

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in &parts {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(data)?;
    }
    let bytes = zip.finish()?.into_inner();

    log::debug!(
        "Wrote DOCX package: {} parts, {} images, {} bytes",
        parts.len(),
        parts.len() - 7,
        bytes.len()
    );
    Ok(bytes)
}
