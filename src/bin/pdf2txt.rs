use std::path::PathBuf;

use clap::Parser;

use pdf_text_extract::Config;

/// Extract the text of every page of a PDF into a UTF-8 text file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// PDF file to read
    input: PathBuf,

    /// Text file to write (default: INPUT with a .txt extension)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::new(cli.input);
    if let Some(output) = cli.output {
        config = config.with_output(output);
    }

    pdf_text_extract::run(&config)?;
    println!("PDF text extraction complete.");
    Ok(())
}
