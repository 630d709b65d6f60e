use super::flot::FlotPlotGenerator;
use super::highcharts::HighchartsPlotGenerator;
use super::PlotError;
use std::io::{self, Write};
use std::str::FromStr;

/// The JavaScript plotting libraries we know how to write a page for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Library {
    Highcharts,
    Flot,
}

impl Library {
    pub fn name(&self) -> &'static str {
        match self {
            Library::Highcharts => "highcharts",
            Library::Flot => "flot",
        }
    }

    pub fn generator(&self) -> Box<dyn PlotGenerator> {
        match self {
            Library::Highcharts => Box::new(HighchartsPlotGenerator::default()),
            Library::Flot => Box::new(FlotPlotGenerator::default()),
        }
    }
}

impl Default for Library {
    fn default() -> Self {
        Library::Highcharts
    }
}

impl FromStr for Library {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highcharts" => Ok(Library::Highcharts),
            "flot" => Ok(Library::Flot),
            _ => Err(PlotError::UnsupportedLibrary(s.to_string())),
        }
    }
}

impl std::fmt::Display for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The library-specific parts of a plot page.
/// `PlotWriter` drives a generator through the page in order:
/// code start, then start/stop once per series, then code end.
pub trait PlotGenerator {
    /// scripts, style and the opening of the plotting script
    fn write_code_start(&mut self, out: &mut dyn Write, labels: &[String], buttons: bool)
        -> io::Result<()>;

    /// `index` counts the variables from 0, the time column is not a series
    fn write_series_start(&mut self, out: &mut dyn Write, index: usize, label: &str)
        -> io::Result<()>;

    fn write_series_stop(&mut self, out: &mut dyn Write) -> io::Result<()>;

    /// text written between two consecutive series
    fn series_separator(&self) -> &'static str {
        ""
    }

    /// the plotting call and the end of the script; `labels` includes the time label
    fn write_code_end(&mut self, out: &mut dyn Write, labels: &[String]) -> io::Result<()>;
}

/// Quotes a label as a JavaScript string literal that cannot close the script element.
pub fn js_string(label: &str) -> String {
    let quoted = serde_json::to_string(label).unwrap_or_else(|_| String::from("\"\""));
    quoted.replace("</", "<\\/")
}
