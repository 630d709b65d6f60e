use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;
pub mod error;
pub mod flot;
pub mod highcharts;
pub mod library;
pub mod plot;
pub mod writer;

pub use error::PlotError;
pub use library::{Library, PlotGenerator};
pub use writer::{write_plot_file, PlotOptions, PlotWriter};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DATA_EXTENSION: &str = "csv";
pub const OUTPUT_EXTENSION: &str = "html";

/// The main struct for a results file: the unique column labels,
/// the time points and the values of every variable, all kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    labels: Vec<String>,
    time: Vec<String>,
    values: HashMap<String, Vec<String>>,
}

impl ResultsTable {
    /// Init a ResultsTable from a csv file, see `from_reader`.
    pub fn from_csv<P: AsRef<Path>>(fin: P) -> Result<ResultsTable, PlotError> {
        let file = File::open(fin.as_ref())?;
        debug!("parsing {}", fin.as_ref().display());
        ResultsTable::from_reader(BufReader::new(file))
    }

    /// Reads the header and then one time point per row.
    /// Repeated column labels are dropped, only the first column with a given label is kept.
    /// Rows with a different number of fields than the header are rejected.
    pub fn from_reader<R: Read>(rdr: R) -> Result<ResultsTable, PlotError> {
        let mut csv_rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(rdr);
        let header = csv_rdr.headers().map_err(format_error)?.clone();
        if header.is_empty() {
            return Err(PlotError::EmptyInput);
        }
        let column_labels: Vec<String> = header.iter().map(String::from).collect();

        // one flag per non-time column
        let mut seen_labels: Vec<&str> = Vec::with_capacity(column_labels.len());
        let mut duplicate_columns: Vec<bool> = Vec::with_capacity(column_labels.len());
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for label in column_labels.iter().skip(1) {
            let duplicate = seen_labels.contains(&label.as_str());
            if duplicate {
                debug!("dropping repeated column {}", label);
            } else {
                values.insert(label.clone(), Vec::new());
            }
            duplicate_columns.push(duplicate);
            seen_labels.push(label);
        }

        let mut time: Vec<String> = Vec::new();
        for record in csv_rdr.records() {
            let record = record.map_err(format_error)?;
            let mut fields = record.iter();
            // the record length was checked against the header, which is not empty
            time.push(fields.next().unwrap_or_default().to_string());
            for ((field, label), &duplicate) in fields
                .zip(column_labels.iter().skip(1))
                .zip(duplicate_columns.iter())
            {
                if duplicate {
                    continue;
                }
                if let Some(v) = values.get_mut(label) {
                    v.push(field.to_string());
                }
            }
        }

        let labels: Vec<String> = column_labels
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i == 0 || !duplicate_columns[i - 1])
            .map(|(_, l)| l)
            .collect();
        debug!(
            "parsed {} time points for {} variables",
            time.len(),
            labels.len() - 1
        );
        Ok(ResultsTable {
            labels,
            time,
            values,
        })
    }

    /// unique column labels, time label included
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn time_label(&self) -> &str {
        &self.labels[0]
    }

    /// unique column labels without the time label
    pub fn variables(&self) -> &[String] {
        &self.labels[1..]
    }

    pub fn time(&self) -> &[String] {
        &self.time
    }

    pub fn values(&self, label: &str) -> Option<&[String]> {
        self.values.get(label).map(|v| &v[..])
    }

    /// the (time, value) pairs of one variable, row by row
    pub fn series<'a>(
        &'a self,
        label: &str,
    ) -> Option<impl Iterator<Item = (&'a str, &'a str)> + 'a> {
        let values = self.values.get(label)?;
        Some(
            self.time
                .iter()
                .zip(values.iter())
                .map(|(t, v)| (t.as_str(), v.as_str())),
        )
    }

    /// number of time points
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Turns the csv length mismatch into a Format error with the offending line.
fn format_error(e: csv::Error) -> PlotError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = e.kind()
    {
        return PlotError::Format {
            line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            expected: *expected_len as usize,
            found: *len as usize,
        };
    }
    PlotError::Csv(e)
}
