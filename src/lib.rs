//! Dump the text of every page of a PDF into a UTF-8 text file.
//!
//! Pages are extracted in document order and joined with a single `'\n'`.
//! Nothing is written until the whole input has been parsed.

pub mod config;
pub mod error;
pub mod extract;
pub mod page;

pub use config::Config;
pub use error::{Error, Result};
pub use extract::{extract_to_file, join_pages, page_texts, write_text, Summary, PAGE_SEPARATOR};
pub use page::page_text;

/// Run the extraction described by `config`.
pub fn run(config: &Config) -> Result<Summary> {
    extract_to_file(config.input_path(), &config.output_path())
}
