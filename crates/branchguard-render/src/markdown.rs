use crate::model::{Block, Document};

/// Render the document as Markdown.
///
/// Titles become `##` headings. Bodies go into `text` fences so indentation and one-item-per-line
/// listings survive as written.
pub fn render_markdown(doc: &Document) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n", doc.header));

    for block in &doc.blocks {
        out.push('\n');
        match block {
            Block::Title(text) => {
                out.push_str(&format!("## {}\n", text));
            }
            Block::Body(text) => {
                let fence = fence_for(text);
                out.push_str(&format!("{fence}text\n"));
                out.push_str(text.trim_end_matches('\n'));
                out.push_str(&format!("\n{fence}\n"));
            }
        }
    }

    out
}

/// A backtick fence longer than any backtick run inside `text`.
fn fence_for(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
