use printpdf::{BuiltinFont, Color, Mm, PdfDocument, PdfLayerReference, Rgb};

use super::layout::{FONT_SIZE_PT, MissedReport, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::ExportError;

const LAYER_NAME: &str = "Layer 1";

/// Draw a laid-out report into PDF bytes using the built-in Helvetica faces.
///
/// # Errors
///
/// Returns `ExportError::Pdf` if a font cannot be registered or the document
/// fails to serialize.
pub fn render_pdf(report: &MissedReport, title: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    for (index, page) in report.pages().iter().enumerate() {
        let layer: PdfLayerReference = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };

        for line in &page.lines {
            let (r, g, b) = line.style.rgb();
            layer.set_fill_color(Color::Rgb(Rgb::new(
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
                None,
            )));
            let font = if line.style.is_bold() { &bold } else { &regular };
            // PDF coordinates grow upwards from the bottom edge.
            layer.use_text(
                line.text.as_str(),
                FONT_SIZE_PT,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                font,
            );
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn pdf_error(err: printpdf::Error) -> ExportError {
    ExportError::Pdf(err.to_string())
}
