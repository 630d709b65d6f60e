use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a plot from being written.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The path does not exist or is not a regular file
    #[error("cannot read file '{}'", .0.display())]
    MissingFile(PathBuf),

    /// The path does not end with the required suffix
    #[error("'{}' is not a .{expected} file", .path.display())]
    WrongExtension { path: PathBuf, expected: &'static str },

    /// A data row has a different number of fields than the header
    #[error("line {line}: expected {expected} fields, found {found}")]
    Format {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// No header row
    #[error("no header row found, the input is empty")]
    EmptyInput,

    #[error("unsupported plotting library '{0}', use 'highcharts' or 'flot'")]
    UnsupportedLibrary(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
