//! Minimal PDF 1.4 writer for generated documents.
//!
//! Pages are A4 portrait. Callers position everything in millimetres from
//! the top-left corner; conversion to PDF user space (points, bottom-left
//! origin) happens here. Only the standard Helvetica faces are used, so no
//! font data is embedded.

use std::fmt::Write as _;

/// A4 width in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const PT_PER_MM: f32 = 72.0 / 25.4;
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;

/// Width used for characters outside the metrics tables.
const DEFAULT_GLYPH_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
}

impl Font {
    const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Italic];

    fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Italic => "Helvetica-Oblique",
        }
    }

    /// Advance widths (1/1000 em) for ASCII 32..=126.
    fn widths(self) -> &'static [u16; 95] {
        match self {
            Self::Regular | Self::Italic => &HELVETICA_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);

    /// Build from 0-255 components.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Rgb(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }
}

/// Font, size in points, and fill colour for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            color: Rgb::BLACK,
        }
    }

    pub const fn color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    /// Width of `text` in millimetres.
    pub fn width(&self, text: &str) -> f32 {
        text_width(text, self.font, self.size)
    }
}

/// Width of `text` in millimetres when set in `font` at `size` points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let widths = font.widths();
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                u32::from(widths[(code - 32) as usize])
            } else {
                u32::from(DEFAULT_GLYPH_WIDTH)
            }
        })
        .sum();
    units as f32 / 1000.0 * size / PT_PER_MM
}

/// Break `text` into lines no wider than `max_width` millimetres.
///
/// Breaks on whitespace; a single word wider than the line is kept whole.
/// Explicit newlines in `text` always start a new line.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || text_width(&candidate, font, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}

/// Shorten `text` with a trailing `...` so it fits in `max_width` millimetres.
pub fn truncate(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }
    let mut kept: String = text.to_string();
    while !kept.is_empty() {
        kept.pop();
        let candidate = format!("{}...", kept.trim_end());
        if text_width(&candidate, font, size) <= max_width {
            return candidate;
        }
    }
    "...".to_string()
}

/// Encode text as a PDF literal string body in WinAnsiEncoding.
///
/// Characters with no WinAnsi code are replaced with `?`.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{2013}' => out.push_str("\\226"),
            '\u{2014}' => out.push_str("\\227"),
            '\u{2022}' => out.push_str("\\225"),
            '\u{2018}' => out.push_str("\\221"),
            '\u{2019}' => out.push_str("\\222"),
            '\u{201C}' => out.push_str("\\223"),
            '\u{201D}' => out.push_str("\\224"),
            '\u{20AC}' => out.push_str("\\200"),
            '\u{A0}'..='\u{FF}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

fn x_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

fn y_pt(mm: f32) -> f32 {
    PAGE_HEIGHT_PT - mm * PT_PER_MM
}

/// Content stream of one page.
#[derive(Debug, Default, Clone)]
pub struct Page {
    ops: String,
}

impl Page {
    /// Draw `text` with its baseline starting at (`x`, `y`).
    pub fn text(&mut self, x: f32, y: f32, style: TextStyle, text: &str) {
        let Rgb(r, g, b) = style.color;
        let _ = writeln!(
            self.ops,
            "BT /{} {:.1} Tf {r:.3} {g:.3} {b:.3} rg {:.2} {:.2} Td ({}) Tj ET",
            style.font.resource_name(),
            style.size,
            x_pt(x),
            y_pt(y),
            encode_text(text),
        );
    }

    /// Draw `text` so that it ends at `right`.
    pub fn text_right(&mut self, right: f32, y: f32, style: TextStyle, text: &str) {
        self.text(right - style.width(text), y, style, text);
    }

    /// Draw `text` centred on `center`.
    pub fn text_center(&mut self, center: f32, y: f32, style: TextStyle, text: &str) {
        self.text(center - style.width(text) / 2.0, y, style, text);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        let _ = writeln!(
            self.ops,
            "{:.2} w 0 0 0 RG {:.2} {:.2} m {:.2} {:.2} l S",
            width * PT_PER_MM,
            x_pt(x1),
            y_pt(y1),
            x_pt(x2),
            y_pt(y2),
        );
    }

    /// Filled rectangle with its top-left corner at (`x`, `y`).
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let Rgb(r, g, b) = color;
        let _ = writeln!(
            self.ops,
            "{r:.3} {g:.3} {b:.3} rg {:.2} {:.2} {:.2} {:.2} re f",
            x_pt(x),
            y_pt(y + height),
            width * PT_PER_MM,
            height * PT_PER_MM,
        );
    }
}

/// An in-memory PDF document.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    title: String,
    pages: Vec<Page>,
}

impl PdfDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    /// Append a blank page and return it for drawing.
    pub fn add_page(&mut self) -> &mut Page {
        self.pages.push(Page::default());
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages_mut(&mut self) -> impl Iterator<Item = &mut Page> {
        self.pages.iter_mut()
    }

    /// Serialize to PDF bytes. A document without pages gets one blank page.
    pub fn to_bytes(&self) -> Vec<u8> {
        let blank = [Page::default()];
        let pages: &[Page] = if self.pages.is_empty() {
            &blank
        } else {
            &self.pages
        };

        // Object numbering: 1 catalog, 2 page tree, 3 info, then one per
        // font, then a (page, content) pair per page.
        let first_font = 4;
        let first_page = first_font + Font::ALL.len();
        let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page + i * 2).collect();

        let mut objects: Vec<Vec<u8>> = Vec::new();
        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

        let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
        objects.push(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            )
            .into_bytes(),
        );
        objects.push(
            format!(
                "<< /Title ({}) /Producer (studio-api) >>",
                encode_text(&self.title)
            )
            .into_bytes(),
        );

        for font in Font::ALL {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .into_bytes(),
            );
        }

        let font_resources: Vec<String> = Font::ALL
            .iter()
            .enumerate()
            .map(|(i, f)| format!("/{} {} 0 R", f.resource_name(), first_font + i))
            .collect();

        for (page, page_id) in pages.iter().zip(&page_ids) {
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT} {PAGE_HEIGHT_PT}] \
                     /Resources << /Font << {} >> >> /Contents {} 0 R >>",
                    font_resources.join(" "),
                    page_id + 1
                )
                .into_bytes(),
            );
            let mut stream = format!("<< /Length {} >>\nstream\n", page.ops.len()).into_bytes();
            stream.extend_from_slice(page.ops.as_bytes());
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);
        }

        let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            let _ = write!(xref, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R /Info 3 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}
