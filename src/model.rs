#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParagraphStyle {
    Normal,
    Heading(u8),
    ListBullet,
}

impl ParagraphStyle {
    /// Style id as written into `word/styles.xml`.
    pub fn style_id(self) -> Option<&'static str> {
        match self {
            ParagraphStyle::Normal => None,
            ParagraphStyle::Heading(1) => Some("Heading1"),
            ParagraphStyle::Heading(2) => Some("Heading2"),
            ParagraphStyle::Heading(_) => Some("Heading3"),
            ParagraphStyle::ListBullet => Some("ListBullet"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EmbeddedImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub display_width: f32,  // points
    pub display_height: f32, // points
}

#[derive(Clone, Debug, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub font_size: Option<f32>, // points, None = style default
    pub hyperlink_url: Option<String>,
    pub inline_image: Option<EmbeddedImage>,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Self::default()
        }
    }

    pub fn image(image: EmbeddedImage) -> Self {
        Self {
            inline_image: Some(image),
            ..Self::default()
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hyperlink_url: Some(url.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub alignment: Alignment,
    pub indent_left: f32, // points
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            alignment: Alignment::Left,
            indent_left: 0.0,
            runs: Vec::new(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(ParagraphStyle::Normal).with_run(Run::text(text))
    }

    pub fn empty() -> Self {
        Self::new(ParagraphStyle::Normal)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(ParagraphStyle::Heading(level)).with_run(Run::text(text))
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn indented(mut self, points: f32) -> Self {
        self.indent_left = points;
        self
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Clone, Debug)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::plain(text)],
        }
    }

    pub fn empty() -> Self {
        Self {
            paragraphs: vec![Paragraph::empty()],
        }
    }

    pub fn text_content(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Debug)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub grid: bool, // "Table Grid" style with visible borders
    pub alignment: Alignment,
}

impl Table {
    /// A bordered table whose first row is `header`.
    pub fn grid(header: &[&str]) -> Self {
        Self {
            rows: vec![TableRow {
                cells: header.iter().map(|h| TableCell::text(*h)).collect(),
            }],
            grid: true,
            alignment: Alignment::Left,
        }
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Append a row padded or truncated to the table's column count.
    pub fn push_row(&mut self, cells: Vec<TableCell>) {
        let ncols = self.column_count();
        let mut cells = cells;
        cells.truncate(ncols);
        while cells.len() < ncols {
            cells.push(TableCell::empty());
        }
        self.rows.push(TableRow { cells });
    }
}

#[derive(Clone, Debug)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

#[derive(Clone, Debug, Default)]
pub struct Document {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn push_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn push_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    pub fn images(&self) -> impl Iterator<Item = &EmbeddedImage> {
        self.blocks.iter().flat_map(|block| {
            let paragraphs: Vec<&Paragraph> = match block {
                Block::Paragraph(p) => vec![p],
                Block::Table(t) => t
                    .rows
                    .iter()
                    .flat_map(|r| r.cells.iter())
                    .flat_map(|c| c.paragraphs.iter())
                    .collect(),
                Block::PageBreak => Vec::new(),
            };
            paragraphs
                .into_iter()
                .flat_map(|p| p.runs.iter())
                .filter_map(|r| r.inline_image.as_ref())
        })
    }
}
