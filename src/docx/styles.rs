use super::{WML_NS, pts_to_twips};

const BODY_FONT: &str = "Arial";
const BODY_SIZE_PT: f32 = 11.0;

/// Paragraph style definitions written to `word/styles.xml`.
struct StyleDef {
    id: &'static str,
    name: &'static str,
    size_pt: f32,
    bold: bool,
    color: Option<&'static str>,
    space_before_pt: f32,
    keep_next: bool,
    outline_level: Option<u8>,
}

const HEADINGS: [StyleDef; 3] = [
    StyleDef {
        id: "Heading1",
        name: "heading 1",
        size_pt: 14.0,
        bold: true,
        color: Some("365F91"),
        space_before_pt: 24.0,
        keep_next: true,
        outline_level: Some(0),
    },
    StyleDef {
        id: "Heading2",
        name: "heading 2",
        size_pt: 13.0,
        bold: true,
        color: Some("4F81BD"),
        space_before_pt: 10.0,
        keep_next: true,
        outline_level: Some(1),
    },
    StyleDef {
        id: "Heading3",
        name: "heading 3",
        size_pt: 11.0,
        bold: true,
        color: Some("4F81BD"),
        space_before_pt: 10.0,
        keep_next: true,
        outline_level: Some(2),
    },
];

fn half_points(pts: f32) -> i64 {
    (pts * 2.0).round() as i64
}

fn paragraph_style_xml(def: &StyleDef) -> String {
    let mut xml = format!(
        r#"<w:style w:type="paragraph" w:styleId="{}"><w:name w:val="{}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr>"#,
        def.id, def.name
    );
    if def.keep_next {
        xml.push_str("<w:keepNext/><w:keepLines/>");
    }
    xml.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="0"/>"#,
        pts_to_twips(def.space_before_pt)
    ));
    if let Some(level) = def.outline_level {
        xml.push_str(&format!(r#"<w:outlineLvl w:val="{level}"/>"#));
    }
    xml.push_str("</w:pPr><w:rPr>");
    if def.bold {
        xml.push_str("<w:b/><w:bCs/>");
    }
    if let Some(color) = def.color {
        xml.push_str(&format!(r#"<w:color w:val="{color}"/>"#));
    }
    let sz = half_points(def.size_pt);
    xml.push_str(&format!(r#"<w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/></w:rPr></w:style>"#));
    xml
}

pub(super) fn styles_xml() -> String {
    let sz = half_points(BODY_SIZE_PT);
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!(r#"<w:styles xmlns:w="{WML_NS}">"#));
    xml.push_str(&format!(
        concat!(
            r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#,
            r#"<w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/><w:lang w:val="en-US"/>"#,
            r#"</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>"#,
            r#"<w:spacing w:after="200" w:line="276" w:lineRule="auto"/>"#,
            r#"</w:pPr></w:pPrDefault></w:docDefaults>"#,
        ),
        font = BODY_FONT,
        sz = sz,
    ));

    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
        r#"<w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont"><w:name w:val="Default Paragraph Font"/><w:uiPriority w:val="1"/><w:semiHidden/></w:style>"#,
        r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:semiHidden/>"#,
        r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/>"#,
        r#"<w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#,
    ));

    for def in &HEADINGS {
        xml.push_str(&paragraph_style_xml(def));
    }

    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>"#,
        r#"<w:pPr><w:numPr><w:numId w:val="1"/></w:numPr><w:contextualSpacing/></w:pPr></w:style>"#,
        r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/>"#,
        r#"<w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>"#,
        r#"<w:tblPr><w:tblBorders>"#,
        r#"<w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"</w:tblBorders></w:tblPr></w:style>"#,
        r#"<w:style w:type="character" w:styleId="Hyperlink"><w:name w:val="Hyperlink"/><w:basedOn w:val="DefaultParagraphFont"/>"#,
        r#"<w:rPr><w:color w:val="0000FF"/><w:u w:val="single"/></w:rPr></w:style>"#,
    ));

    xml.push_str("</w:styles>");
    xml
}

/// Single-level bullet list referenced by the `ListBullet` style (numId 1).
pub(super) fn numbering_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:numbering xmlns:w="{ns}">"#,
            r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/>"#,
            r#"<w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{left}" w:hanging="{hanging}"/></w:pPr></w:lvl>"#,
            r#"</w:abstractNum>"#,
            r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
            r#"</w:numbering>"#,
        ),
        ns = WML_NS,
        left = pts_to_twips(36.0),
        hanging = pts_to_twips(18.0),
    )
}
