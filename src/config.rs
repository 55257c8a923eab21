use std::path::{Path, PathBuf};

/// Where to read the PDF from and where to write its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Config {
            input: input.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input
    }

    /// The explicit output path, or the input path with a `.txt` extension.
    pub fn output_path(&self) -> PathBuf {
        match self.output {
            Some(ref p) => p.clone(),
            None => self.input.with_extension("txt"),
        }
    }
}
