//! Low-level paginated A4 composer over lopdf content streams.
//!
//! Works in millimetres with a top-down cursor, converting to PDF points
//! only when emitting operations. Text uses the built-in Helvetica family
//! with WinAnsi encoding, so no font embedding is needed.

use crate::error::ExtratoError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// A4 page size in millimetres.
pub const PAGE_W: f32 = 210.0;
pub const PAGE_H: f32 = 297.0;
/// Default page margin in millimetres.
pub const MARGIN: f32 = 10.0;
/// Usable width between the side margins.
pub const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;

const PT_PER_MM: f32 = 72.0 / 25.4;
const MM_PER_PT: f32 = 25.4 / 72.0;

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    fn resource(self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Decoded RGB8 logo ready for embedding as an image XObject.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// Map text to WinAnsi bytes. Portuguese accented letters share code points
/// with Latin-1; anything outside the 8-bit range degrades to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if cp <= 0xFF {
                cp as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// Estimated rendered width in millimetres (Helvetica average-glyph
/// heuristic: half the font size per character).
fn est_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * MM_PER_PT
}

/// Characters that fit in a column of `w` millimetres at `size` points.
fn chars_per_line(w: f32, size: f32) -> usize {
    let per_char = size * 0.5 * MM_PER_PT;
    ((w - 3.0) / per_char).max(1.0) as usize
}

/// Truncate text that would overflow a `w`-millimetre column, appending an
/// ellipsis marker.
pub fn fit_text(text: &str, w: f32, size: f32) -> String {
    if est_width_mm(text, size) <= w - 3.0 {
        return text.to_string();
    }
    let keep = chars_per_line(w, size).saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}...")
}

/// Greedy word wrap to a character budget; words longer than the budget are
/// hard-broken.
fn wrap_to_chars(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                lines.push(chunk.iter().collect());
            }
            // continue filling from the last hard-broken chunk
            current = lines.pop().unwrap_or_default();
            continue;
        }
        let needed = if current.is_empty() {
            word_len
        } else {
            current.chars().count() + 1 + word_len
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Paginated A4 document builder with a top-down cursor in millimetres.
pub struct PageComposer {
    doc: Document,
    pages_id: ObjectId,
    fonts: [(FontStyle, ObjectId); 3],
    logo_id: Option<ObjectId>,
    finished_pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    x: f32,
    y: f32,
    font: FontStyle,
    size: f32,
    break_margin: f32,
}

impl PageComposer {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let fonts = [
            FontStyle::Regular,
            FontStyle::Bold,
            FontStyle::Italic,
        ]
        .map(|style| {
            let id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => style.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            (style, id)
        });

        PageComposer {
            doc,
            pages_id,
            fonts,
            logo_id: None,
            finished_pages: Vec::new(),
            ops: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            font: FontStyle::Regular,
            size: 10.0,
            break_margin: 15.0,
        }
    }

    pub fn set_font(&mut self, font: FontStyle, size: f32) {
        self.font = font;
        self.size = size;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_xy(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Move to the left margin, `h` millimetres down.
    pub fn ln(&mut self, h: f32) {
        self.x = MARGIN;
        self.y += h;
    }

    /// Whether drawing something `h` millimetres tall would cross into the
    /// bottom break margin.
    pub fn page_break_needed(&self, h: f32) -> bool {
        self.y + h > PAGE_H - self.break_margin
    }

    /// Close the current page and start a fresh one at the top margin.
    pub fn add_page(&mut self) {
        self.finished_pages.push(std::mem::take(&mut self.ops));
        self.x = MARGIN;
        self.y = MARGIN;
    }

    /// Wrap `text` to a `w`-millimetre column at the current font size.
    pub fn wrap(&self, text: &str, w: f32) -> Vec<String> {
        wrap_to_chars(text, chars_per_line(w, self.size))
    }

    /// Single-line cell: optional 1-pt border box, text vertically centred,
    /// cursor advanced to the right edge.
    pub fn cell(&mut self, w: f32, h: f32, text: &str, border: bool, align: Align) {
        if border {
            self.rect(self.x, self.y, w, h);
        }
        if !text.is_empty() {
            let size_mm = self.size * MM_PER_PT;
            let baseline = self.y + (h + size_mm * 0.7) / 2.0;
            self.draw_text(self.x, baseline, w, text, align);
        }
        self.x += w;
    }

    /// Bordered cell of `rows * line_h` height holding pre-wrapped lines,
    /// rendered top-down; cursor advanced to the right edge.
    pub fn box_cell(
        &mut self,
        w: f32,
        line_h: f32,
        rows: u32,
        lines: &[String],
        border: bool,
        align: Align,
    ) {
        if border {
            self.rect(self.x, self.y, w, line_h * rows as f32);
        }
        let size_mm = self.size * MM_PER_PT;
        for (i, line) in lines.iter().take(rows as usize).enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = self.y + line_h * i as f32 + (line_h + size_mm * 0.7) / 2.0;
            self.draw_text(self.x, baseline, w, line, align);
        }
        self.x += w;
    }

    /// Borderless wrapped free text across `w` millimetres, breaking to a
    /// new page when the bottom margin is reached; the cursor ends at the
    /// left margin below the last line. Returns the number of lines.
    pub fn multi_line(&mut self, w: f32, line_h: f32, text: &str, align: Align) -> u32 {
        let lines = self.wrap(text, w);
        let x0 = self.x;
        for line in &lines {
            if self.page_break_needed(line_h) {
                self.add_page();
            } else {
                self.x = x0;
            }
            self.cell(w, line_h, line, false, align);
            self.x = MARGIN;
            self.y += line_h;
        }
        self.x = MARGIN;
        lines.len() as u32
    }

    /// Draw the logo with its top-left corner at (x, y), `w` millimetres
    /// wide, height scaled to the image's aspect ratio.
    pub fn draw_logo(&mut self, logo: &LogoImage, x: f32, y: f32, w: f32) {
        let h = w * logo.height as f32 / logo.width as f32;
        if self.logo_id.is_none() {
            let stream = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => logo.width as i64,
                    "Height" => logo.height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                },
                logo.rgb.clone(),
            );
            self.logo_id = Some(self.doc.add_object(stream));
        }
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                Object::Real(pt(w)),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(pt(h)),
                Object::Real(pt(x)),
                Object::Real(pt(PAGE_H - y - h)),
            ],
        ));
        self.ops
            .push(Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Operation::new(
            "re",
            vec![
                Object::Real(pt(x)),
                Object::Real(pt(PAGE_H - y - h)),
                Object::Real(pt(w)),
                Object::Real(pt(h)),
            ],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn draw_text(&mut self, x: f32, baseline: f32, w: f32, text: &str, align: Align) {
        let text_w = est_width_mm(text, self.size);
        let tx = match align {
            Align::Left => x + 1.5,
            Align::Center => x + ((w - text_w) / 2.0).max(0.0),
            Align::Right => x + (w - text_w - 1.5).max(0.0),
        };
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(self.font.resource().as_bytes().to_vec()),
                Object::Real(self.size),
            ],
        ));
        self.ops.push(Operation::new(
            "Td",
            vec![
                Object::Real(pt(tx)),
                Object::Real(pt(PAGE_H - baseline)),
            ],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Assemble the document and serialize it to bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, ExtratoError> {
        self.finished_pages.push(std::mem::take(&mut self.ops));

        let mut font_dict = Dictionary::new();
        for (style, id) in self.fonts {
            font_dict.set(style.resource(), Object::Reference(id));
        }
        let mut resources = dictionary! {
            "Font" => font_dict,
        };
        if let Some(id) = self.logo_id {
            resources.set(
                "XObject",
                dictionary! { "Im1" => Object::Reference(id) },
            );
        }
        let resources_id = self.doc.add_object(resources);

        let mut kids = Vec::new();
        for ops in std::mem::take(&mut self.finished_pages) {
            let content = Content { operations: ops };
            let stream_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(self.pages_id),
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(pt(PAGE_W)),
                    Object::Real(pt(PAGE_H)),
                ],
                "Contents" => Object::Reference(stream_id),
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
        });
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.compress();
        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_win_ansi_accents() {
        assert_eq!(encode_win_ansi("ção"), vec![0xE7, 0xE3, b'o']);
        assert_eq!(encode_win_ansi("a€b"), vec![b'a', b'?', b'b']);
    }

    #[test]
    fn test_fit_text_passthrough() {
        assert_eq!(fit_text("curto", 80.0, 10.0), "curto");
    }

    #[test]
    fn test_fit_text_truncates_with_ellipsis() {
        let long = "x".repeat(200);
        let fitted = fit_text(&long, 30.0, 10.0);
        assert!(fitted.ends_with("..."));
        assert!(fitted.chars().count() < 40);
    }

    #[test]
    fn test_wrap_to_chars_greedy() {
        let lines = wrap_to_chars("um dois tres quatro", 8);
        assert_eq!(lines, vec!["um dois", "tres", "quatro"]);
    }

    #[test]
    fn test_wrap_to_chars_hard_breaks_long_word() {
        let lines = wrap_to_chars("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_to_chars_empty() {
        assert!(wrap_to_chars("", 10).is_empty());
    }

    #[test]
    fn test_empty_document_roundtrips() {
        let composer = PageComposer::new();
        let bytes = composer.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_cells_and_page_breaks_produce_pages() {
        let mut composer = PageComposer::new();
        composer.set_font(FontStyle::Bold, 12.0);
        for i in 0..80 {
            if composer.page_break_needed(10.0) {
                composer.add_page();
            }
            composer.cell(100.0, 10.0, &format!("linha {i}"), true, Align::Left);
            composer.ln(10.0);
        }
        let bytes = composer.finish().unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 3);
    }
}
