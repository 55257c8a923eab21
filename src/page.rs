//! Text of a single page, read straight off its content stream.

use std::collections::HashMap;

use log::{debug, warn};

use pdf::content::{Matrix, Op, TextDrawAdjusted};
use pdf::encoding::BaseEncoding;
use pdf::error::PdfError;
use pdf::font::{Font, FontType, ToUnicodeMap};
use pdf::object::{Page, Resolve, Resources};
use pdf_encoding::{self, ForwardMap};

/// `TJ` kerning (in thousandths of an em) past which we assume a word gap.
const WORD_GAP: f32 = 200.0;

enum Decoder {
    Map(&'static ForwardMap),
    /// A base encoding with `/Differences` applied on top.
    Table(Box<[Option<char>; 256]>),
    Cmap { map: ToUnicodeMap, two_byte: bool },
}

impl Decoder {
    fn for_font(font: &Font, resolve: &impl Resolve) -> Result<Option<Decoder>, PdfError> {
        let two_byte = matches!(font.subtype, FontType::Type0);
        if let Some(to_unicode) = font.to_unicode(resolve) {
            return Ok(Some(Decoder::Cmap {
                map: to_unicode?,
                two_byte,
            }));
        }
        if two_byte {
            warn!("composite font {:?} has no ToUnicode map", font.name);
            return Ok(None);
        }

        let encoding = match font.encoding() {
            Some(e) => e,
            None => return Ok(Some(Decoder::Map(&pdf_encoding::STANDARD))),
        };
        let map = match encoding.base {
            // an encoding dictionary without /BaseEncoding starts from Standard
            BaseEncoding::None | BaseEncoding::StandardEncoding => &pdf_encoding::STANDARD,
            BaseEncoding::SymbolEncoding => &pdf_encoding::SYMBOL,
            BaseEncoding::WinAnsiEncoding => &pdf_encoding::WINANSI,
            ref e => {
                warn!("unsupported pdf encoding {:?}", e);
                return Ok(None);
            }
        };
        if encoding.differences.is_empty() {
            return Ok(Some(Decoder::Map(map)));
        }
        Ok(Some(Decoder::with_differences(
            map,
            encoding.differences.iter().map(|(&code, name)| (code, name.as_str())),
        )))
    }

    fn with_differences<'a>(
        base: &ForwardMap,
        differences: impl Iterator<Item = (u32, &'a str)>,
    ) -> Decoder {
        let mut table = Box::new([None; 256]);
        for code in 0..=255u8 {
            table[code as usize] = base.get(code);
        }
        for (code, glyph) in differences {
            if code > 255 {
                warn!("code {} in /Differences is out of range", code);
                continue;
            }
            match pdf_encoding::glyphname_to_unicode(glyph).and_then(|s| s.chars().next()) {
                Some(c) => table[code as usize] = Some(c),
                None => {
                    debug!("unknown glyph name /{} for code {}", glyph, code);
                    table[code as usize] = None;
                }
            }
        }
        Decoder::Table(table)
    }

    fn decode(&self, data: &[u8], out: &mut String) {
        match *self {
            Decoder::Cmap { ref map, two_byte: true } => {
                for pair in data.chunks_exact(2) {
                    let code = u16::from_be_bytes([pair[0], pair[1]]);
                    if let Some(s) = map.get(code) {
                        out.push_str(s);
                    }
                }
            }
            Decoder::Cmap { ref map, two_byte: false } => {
                for &b in data {
                    if let Some(s) = map.get(b as u16) {
                        out.push_str(s);
                    }
                }
            }
            Decoder::Map(map) => out.extend(data.iter().filter_map(|&b| map.get(b))),
            Decoder::Table(ref table) => {
                out.extend(data.iter().filter_map(|&b| table[b as usize]))
            }
        }
    }
}

/// Decoders for every font a page can select, either by `Tf` name or
/// through an `ExtGState` that carries a font.
struct FontCache {
    fonts: HashMap<String, Decoder>,
    graphics_states: HashMap<String, Decoder>,
}

impl FontCache {
    fn load(resources: Option<&Resources>, resolve: &impl Resolve) -> Result<Self, PdfError> {
        let mut cache = FontCache {
            fonts: HashMap::new(),
            graphics_states: HashMap::new(),
        };
        let resources = match resources {
            Some(r) => r,
            None => return Ok(cache),
        };

        for (name, font) in &resources.fonts {
            let font: &Font = font;
            if let Some(decoder) = Decoder::for_font(&font, resolve)? {
                cache.fonts.insert(name.as_str().to_owned(), decoder);
            }
        }
        for (name, gs) in &resources.graphics_states {
            if let Some((font, _)) = gs.font {
                let font = resolve.get(font)?;
                if let Some(decoder) = Decoder::for_font(&font, resolve)? {
                    cache.graphics_states.insert(name.as_str().to_owned(), decoder);
                }
            }
        }
        Ok(cache)
    }
}

/// Collects decoded text runs and the separators between them.
///
/// A separator is only written once more text follows it, so the result
/// never starts or ends with whitespace the layout operators implied.
#[derive(Default)]
struct TextSink {
    out: String,
    pending: Option<char>,
}

impl TextSink {
    fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if let Some(sep) = self.pending.take() {
            if !self.out.is_empty() {
                self.out.push(sep);
            }
        }
        self.out.push_str(s);
    }

    fn line_break(&mut self) {
        self.pending = Some('\n');
    }

    /// Tabs and spaces never replace a pending line break.
    fn gap(&mut self, sep: char) {
        if self.pending.is_none() {
            self.pending = Some(sep);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

const IDENTITY: Matrix = Matrix {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    e: 0.0,
    f: 0.0,
};

/// Extract the visible text of `page`.
///
/// A page without resources or content streams yields an empty string.
pub fn page_text(page: &Page, resolve: &impl Resolve) -> Result<String, PdfError> {
    let resources = match page.resources() {
        Ok(r) => Some(&**r),
        Err(PdfError::MissingEntry { .. }) => None,
        Err(e) => return Err(e),
    };
    let cache = FontCache::load(resources, resolve)?;

    let contents = match page.contents {
        Some(ref c) => c,
        None => return Ok(String::new()),
    };

    let mut sink = TextSink::default();
    let mut current_font: Option<&Decoder> = None;
    let mut text_leading = 1.0;
    let mut text_matrix = IDENTITY;
    let mut run = String::new();

    for op in contents.operations(resolve)? {
        match op {
            Op::BeginText => text_matrix = IDENTITY,
            Op::GraphicsState { ref name } => {
                if let Some(decoder) = cache.graphics_states.get(name.as_str()) {
                    current_font = Some(decoder);
                }
            }
            Op::Leading { leading } => text_leading = leading,
            Op::TextFont { ref name, .. } => {
                current_font = cache.fonts.get(name.as_str());
            }
            Op::TextDraw { ref text } => {
                if let Some(font) = current_font {
                    run.clear();
                    font.decode(text.as_bytes(), &mut run);
                    sink.push_str(&run);
                }
            }
            Op::TextDrawAdjusted { ref array } => {
                if let Some(font) = current_font {
                    for item in array {
                        match item {
                            TextDrawAdjusted::Text(s) => {
                                run.clear();
                                font.decode(s.as_bytes(), &mut run);
                                sink.push_str(&run);
                            }
                            TextDrawAdjusted::Spacing(k) => {
                                if *k < -WORD_GAP {
                                    sink.gap(' ');
                                }
                            }
                        }
                    }
                }
            }
            Op::TextNewline => {
                sink.line_break();
                text_matrix.f -= text_leading * text_matrix.d;
            }
            Op::MoveTextPosition { translation } => {
                text_matrix.f += translation.y * text_matrix.d;
                if translation.y != 0.0 {
                    sink.line_break();
                }
            }
            Op::SetTextMatrix { matrix } => {
                if matrix.f != text_matrix.f {
                    sink.line_break();
                } else {
                    sink.gap('\t');
                }
                text_matrix = matrix;
            }
            _ => {}
        }
    }
    Ok(sink.finish())
}
