//! The extraction pipeline: PDF in, one UTF-8 text file out.

use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use pdf::file::FileOptions;

use crate::error::{Error, Result};
use crate::page::page_text;

/// Page separator in the joined output.
pub const PAGE_SEPARATOR: &str = "\n";

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub pages: usize,
    pub bytes: usize,
}

/// Read `input` and return the text of every page, in document order.
///
/// Fails on the first page that cannot be loaded or decoded.
pub fn page_texts(input: &Path) -> Result<Vec<String>> {
    let data = std::fs::read(input).map_err(|source| Error::Input {
        path: input.to_owned(),
        source,
    })?;
    let parse_err = |source| Error::Parse {
        path: input.to_owned(),
        source,
    };

    let file = FileOptions::cached().load(data).map_err(parse_err)?;
    let resolver = &file;

    let mut texts = Vec::new();
    for (nr, page) in file.pages().enumerate() {
        let page = page.map_err(parse_err)?;
        let text = page_text(&page, resolver).map_err(parse_err)?;
        debug!("page {}: {} bytes of text", nr + 1, text.len());
        texts.push(text);
    }
    Ok(texts)
}

/// Join per-page texts with [`PAGE_SEPARATOR`]. No pages gives `""`.
pub fn join_pages<S: Borrow<str>>(texts: &[S]) -> String {
    texts.join(PAGE_SEPARATOR)
}

/// Create or truncate `output` and write `text` to it in full.
pub fn write_text(output: &Path, text: &str) -> Result<()> {
    let output_err = |source| Error::Output {
        path: output.to_owned(),
        source,
    };
    let file = File::create(output).map_err(output_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes()).map_err(output_err)?;
    writer.flush().map_err(output_err)?;
    Ok(())
}

/// Extract all text from `input` and write it to `output`.
///
/// The whole document is read and parsed before `output` is opened, so a
/// failure on the input side leaves `output` untouched.
pub fn extract_to_file(input: &Path, output: &Path) -> Result<Summary> {
    let texts = page_texts(input)?;
    let joined = join_pages(&texts);
    write_text(output, &joined)?;

    let summary = Summary {
        pages: texts.len(),
        bytes: joined.len(),
    };
    info!(
        "wrote {} pages ({} bytes) from {} to {}",
        summary.pages,
        summary.bytes,
        input.display(),
        output.display()
    );
    Ok(summary)
}
