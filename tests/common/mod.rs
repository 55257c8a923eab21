//! Builds small but well-formed PDFs in memory.

#![allow(dead_code)]

use std::io::Write;

/// Helvetica in WinAnsiEncoding, the font `pdf_with_pages` draws with.
pub const HELVETICA: &str =
    "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>";

/// Assembles objects into a PDF with a correct xref table.
///
/// Object 1 is the catalog and object 2 the page tree; both are written by
/// [`PdfBuilder::finish`].
pub struct PdfBuilder {
    objects: Vec<Vec<u8>>,
    pages: Vec<u32>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        PdfBuilder {
            objects: vec![b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(), Vec::new()],
            pages: Vec::new(),
        }
    }

    /// Add an object and return its object number.
    pub fn object(&mut self, body: &str) -> u32 {
        self.objects.push(body.as_bytes().to_vec());
        self.objects.len() as u32
    }

    /// Add a stream; `dict` holds extra entries besides `/Length`.
    pub fn stream(&mut self, dict: &str, data: &str) -> u32 {
        let mut body = format!("<< {} /Length {} >>\nstream\n", dict, data.len()).into_bytes();
        body.extend_from_slice(data.as_bytes());
        body.extend_from_slice(b"\nendstream");
        self.objects.push(body);
        self.objects.len() as u32
    }

    /// Add a page with the given resource dictionary and content stream.
    pub fn page(&mut self, resources: &str, content: &str) -> u32 {
        let contents = self.stream("", content);
        let page = self.object(&format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources {} /Contents {} 0 R >>",
            resources, contents
        ));
        self.pages.push(page);
        page
    }

    /// Add a page with no `/Resources` entry at all.
    pub fn bare_page(&mut self, content: &str) -> u32 {
        let contents = self.stream("", content);
        let page = self.object(&format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>",
            contents
        ));
        self.pages.push(page);
        page
    }

    pub fn finish(mut self) -> Vec<u8> {
        let kids: Vec<String> = self.pages.iter().map(|p| format!("{} 0 R", p)).collect();
        self.objects[1] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            self.pages.len()
        )
        .into_bytes();

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            write!(out, "{} 0 obj\n", i + 1).unwrap();
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref = out.len();
        write!(out, "xref\n0 {}\n0000000000 65535 f \n", self.objects.len() + 1).unwrap();
        for offset in offsets {
            write!(out, "{:010} 00000 n \n", offset).unwrap();
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.objects.len() + 1,
            xref
        )
        .unwrap();
        out
    }
}

/// A page is a list of text lines, drawn top to bottom in Helvetica.
/// A page with no lines only paints a rectangle, like a scanned image.
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut pdf = PdfBuilder::new();
    let font = pdf.object(HELVETICA);
    let resources = format!("<< /Font << /F1 {} 0 R >> >>", font);
    for lines in pages {
        pdf.page(&resources, &content_stream(lines));
    }
    pdf.finish()
}

/// A ToUnicode CMap with the given code space and `bfchar` pairs (hex digits).
pub fn to_unicode_cmap(space: (&str, &str), chars: &[(&str, &str)]) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n",
    );
    cmap.push_str(&format!(
        "1 begincodespacerange\n<{}> <{}>\nendcodespacerange\n",
        space.0, space.1
    ));
    cmap.push_str(&format!("{} beginbfchar\n", chars.len()));
    for (code, unicode) in chars {
        cmap.push_str(&format!("<{}> <{}>\n", code, unicode));
    }
    cmap.push_str(
        "endbfchar\nendcmap\nCMapName currentdict /CMap defineresource pop\nend\nend",
    );
    cmap
}

fn content_stream(lines: &[&str]) -> String {
    if lines.is_empty() {
        return "q 0.5 g 72 72 468 648 re f Q".to_owned();
    }
    let mut content = String::from("BT\n/F1 12 Tf\n72 720 Td\n");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push_str("0 -14 Td\n");
        }
        content.push_str(&format!("({}) Tj\n", line));
    }
    content.push_str("ET");
    content
}
