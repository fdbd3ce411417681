use crate::error::RenderError;
use crate::layout::{layout, LineKind, PageSetup};
use crate::model::Document;
use printpdf::{BuiltinFont, Mm, PdfDocument};

const LAYER_NAME: &str = "content";

/// Lay out and encode `doc` as a PDF.
pub fn render_pdf(doc: &Document) -> Result<Vec<u8>, RenderError> {
    let setup = PageSetup::a4();
    let pages = layout(doc, &setup);
    let width = Mm(setup.width_mm);
    let height = Mm(setup.height_mm);

    let (pdf, first_page, first_layer) = PdfDocument::new(&doc.header, width, height, LAYER_NAME);
    let regular = pdf
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::CourierBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (idx, page) in pages.iter().enumerate() {
        let (page_idx, layer_idx) = if idx == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(width, height, LAYER_NAME)
        };
        let layer = pdf.get_page(page_idx).get_layer(layer_idx);

        for line in &page.lines {
            let font = match line.kind {
                LineKind::Header | LineKind::Title => &bold,
                LineKind::Body | LineKind::Footer => &regular,
            };
            layer.use_text(
                winansi_safe(&line.text),
                line.size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }
    }

    pdf.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

/// The built-in PDF fonts only cover a single-byte encoding; anything outside printable
/// ASCII is replaced so it cannot corrupt the text stream.
fn winansi_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_pdf_bytes() {
        let mut doc = Document::new("Azure DevOps Branch Policy Report");
        doc.add_section_title("Project: core");
        doc.add_section_title("Repository: svc");
        doc.add_section_body("Locked Branches:\nmain");
        let bytes = render_pdf(&doc).expect("render");
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 200);
    }

    #[test]
    fn multi_page_documents_render() {
        let mut doc = Document::new("Report");
        let lines: Vec<String> = (0..300).map(|i| format!("branch-{i}")).collect();
        doc.add_section_body(lines.join("\n"));
        assert!(layout(&doc, &PageSetup::a4()).len() > 1);
        assert!(render_pdf(&doc).is_ok());
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(winansi_safe("• main — ok"), "? main ? ok");
        assert_eq!(winansi_safe("plain text"), "plain text");
    }
}
