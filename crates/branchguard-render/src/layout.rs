//! Page layout: turns a [`Document`] into positioned lines.
//!
//! All text uses a monospace face, so a line's width is its character count times a fixed
//! advance. That keeps wrapping and pagination exact and independent of the PDF backend.

use crate::model::{Block, Document};

/// Courier advance width as a fraction of the font size.
const MONO_ADVANCE: f32 = 0.6;
const MM_PER_PT: f32 = 25.4 / 72.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    /// Content stops this far above the bottom edge; the footer sits inside it.
    pub bottom_margin_mm: f32,
    pub header_pt: f32,
    pub title_pt: f32,
    pub body_pt: f32,
    pub footer_pt: f32,
    /// Space between the header and the first block of a page.
    pub header_gap_mm: f32,
    /// Space after each body block.
    pub block_gap_mm: f32,
}

impl PageSetup {
    /// A4 portrait, 10 mm margins.
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 15.0,
            header_pt: 14.0,
            title_pt: 12.0,
            body_pt: 10.0,
            footer_pt: 8.0,
            header_gap_mm: 5.0,
            block_gap_mm: 2.0,
        }
    }

    fn char_width_mm(size_pt: f32) -> f32 {
        size_pt * MONO_ADVANCE * MM_PER_PT
    }

    fn line_height_mm(size_pt: f32) -> f32 {
        size_pt * MM_PER_PT * 1.5
    }

    /// How many characters fit between the side margins at `size_pt`.
    pub fn chars_per_line(&self, size_pt: f32) -> usize {
        let usable = self.width_mm - 2.0 * self.margin_mm;
        ((usable / Self::char_width_mm(size_pt)).floor() as usize).max(1)
    }

    fn text_width_mm(text: &str, size_pt: f32) -> f32 {
        text.chars().count() as f32 * Self::char_width_mm(size_pt)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Title,
    Body,
    Footer,
}

/// One line of text. `y_mm` is the baseline, measured from the bottom edge as PDF expects.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub kind: LineKind,
    pub text: String,
    pub size_pt: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

impl Page {
    pub fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |l| l.kind == kind)
            .map(|l| l.text.as_str())
    }
}

/// Lay out `doc` on as many pages as it needs. Always returns at least one page.
pub fn layout(doc: &Document, setup: &PageSetup) -> Vec<Page> {
    let mut writer = PageWriter::new(doc, setup);

    for block in &doc.blocks {
        match block {
            Block::Title(text) => {
                for line in wrap_line(text, setup.chars_per_line(setup.title_pt)) {
                    writer.push(LineKind::Title, line, setup.title_pt);
                }
            }
            Block::Body(text) => {
                let width = setup.chars_per_line(setup.body_pt);
                for raw in text.split('\n') {
                    for line in wrap_line(raw, width) {
                        writer.push(LineKind::Body, line, setup.body_pt);
                    }
                }
                writer.gap(setup.block_gap_mm);
            }
        }
    }

    writer.finish()
}

struct PageWriter<'a> {
    doc: &'a Document,
    setup: &'a PageSetup,
    pages: Vec<Page>,
    current: Page,
    /// Distance from the top edge to the next free line.
    cursor_mm: f32,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a Document, setup: &'a PageSetup) -> Self {
        let mut writer = Self {
            doc,
            setup,
            pages: Vec::new(),
            current: Page::default(),
            cursor_mm: 0.0,
        };
        writer.start_page();
        writer
    }

    fn start_page(&mut self) {
        let s = self.setup;
        self.cursor_mm = s.margin_mm;
        let header = self.doc.header.clone();
        let width = PageSetup::text_width_mm(&header, s.header_pt);
        let x = ((s.width_mm - width) / 2.0).max(s.margin_mm);
        self.place(LineKind::Header, header, s.header_pt, x);
        self.cursor_mm += s.header_gap_mm;
    }

    fn push(&mut self, kind: LineKind, text: String, size_pt: f32) {
        let limit = self.setup.height_mm - self.setup.bottom_margin_mm;
        if self.cursor_mm + PageSetup::line_height_mm(size_pt) > limit {
            self.break_page();
        }
        let x = self.setup.margin_mm;
        self.place(kind, text, size_pt, x);
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm += mm;
    }

    fn place(&mut self, kind: LineKind, text: String, size_pt: f32, x_mm: f32) {
        let line_height = PageSetup::line_height_mm(size_pt);
        let baseline_from_top = self.cursor_mm + line_height * 0.75;
        self.current.lines.push(PlacedLine {
            kind,
            text,
            size_pt,
            x_mm,
            y_mm: self.setup.height_mm - baseline_from_top,
        });
        self.cursor_mm += line_height;
    }

    fn break_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.start_page();
    }

    fn finish(mut self) -> Vec<Page> {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);

        let s = self.setup;
        let total = self.pages.len();
        for (idx, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {}", idx + 1, total);
            let width = PageSetup::text_width_mm(&text, s.footer_pt);
            page.lines.push(PlacedLine {
                kind: LineKind::Footer,
                text,
                size_pt: s.footer_pt,
                x_mm: (s.width_mm - width) / 2.0,
                y_mm: s.bottom_margin_mm / 2.0,
            });
        }
        self.pages
    }
}

/// Wrap one logical line to at most `width` characters.
///
/// Breaks at spaces; continuation lines repeat the line's leading indentation. Words longer
/// than the available width are split.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    if indent.chars().count() * 2 >= width {
        indent.clear();
    }
    let avail = width - indent.chars().count();

    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        while chars.len() > avail {
            if current_len > 0 {
                out.push(format!("{indent}{current}"));
                current.clear();
                current_len = 0;
            }
            let head: String = chars.drain(..avail).collect();
            out.push(format!("{indent}{head}"));
        }
        if chars.is_empty() {
            continue;
        }

        if current_len > 0 && current_len + 1 + chars.len() > avail {
            out.push(format!("{indent}{current}"));
            current.clear();
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars.iter());
        current_len += chars.len();
    }

    if current_len > 0 {
        out.push(format!("{indent}{current}"));
    }
    out
}
