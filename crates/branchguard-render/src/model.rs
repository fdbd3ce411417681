use crate::error::RenderError;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// A single heading line.
    Title(String),
    /// Free text; `\n` separates lines, long lines are wrapped at layout time.
    Body(String),
}

/// A report under construction: a header plus blocks in append order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Printed at the top of every page and used as the PDF title.
    pub header: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            blocks: Vec::new(),
        }
    }

    pub fn add_section_title(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Title(text.into()));
    }

    pub fn add_section_body(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Body(text.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render as PDF and write to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let bytes = crate::pdf::render_pdf(self)?;
        std::fs::write(path, bytes).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
