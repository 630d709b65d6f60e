use super::{
    write_plot_file, Library, PlotError, PlotOptions, ResultsTable, DATA_EXTENSION,
    OUTPUT_EXTENSION, VERSION,
};
use clap::{App, Arg, ArgMatches};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const ABOUT: &str = "Create a plot of the data stored in an SBML Test Suite case results CSV file. \
The plot is an HTML file that uses JavaScript to draw the curves and provide additional capabilities.";

const AFTER_HELP: &str = "This file is part of the SBML Test Suite. Please visit http://sbml.org \
for more information about SBML, and the latest version of the SBML Test Suite.";

/// Everything the plotresults CLI needs to know, after path expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotArgs {
    pub data: PathBuf,
    pub output: PathBuf,
    pub results: Option<PathBuf>,
    pub library: String,
    pub quiet: bool,
    pub complete: bool,
    pub show_buttons: bool,
}

fn cli_app<'a, 'b>() -> App<'a, 'b> {
    let arg_quiet = Arg::with_name("quiet")
        .help("be quiet; don't print error or warning messages")
        .short("q")
        .long("quiet")
        .takes_value(false);
    let arg_complete = Arg::with_name("complete")
        .help("write a complete HTML page, not just a fragment")
        .short("c")
        .long("complete")
        .takes_value(false);
    let arg_no_buttons = Arg::with_name("no_buttons")
        .help("omit interactive buttons and text from the HTML output")
        .short("n")
        .long("no-buttons")
        .takes_value(false);
    let arg_data = Arg::with_name("data")
        .help("the CSV file containing the data to plot")
        .short("d")
        .long("data")
        .takes_value(true)
        .required(true);
    let arg_output = Arg::with_name("output")
        .help("the HTML file where the output should be written")
        .short("o")
        .long("output")
        .takes_value(true)
        .required(true);
    let arg_results = Arg::with_name("results")
        .help("(optional) a second CSV file to overlay over the data")
        .short("r")
        .long("results")
        .takes_value(true);
    let arg_library = Arg::with_name("library")
        .help("(optional) library to use: 'highcharts' (default) or 'flot'")
        .short("l")
        .long("library")
        .takes_value(true)
        .default_value("highcharts");
    App::new("plotresults")
        .version(VERSION.unwrap_or("unknown"))
        .author("SBML Team")
        .about(ABOUT)
        .after_help(AFTER_HELP)
        .arg(arg_quiet)
        .arg(arg_complete)
        .arg(arg_no_buttons)
        .arg(arg_data)
        .arg(arg_output)
        .arg(arg_results)
        .arg(arg_library)
}

fn plot_args(cli_args: &ArgMatches) -> PlotArgs {
    PlotArgs {
        data: expanded_path(cli_args.value_of("data").unwrap_or_default()),
        output: expanded_path(cli_args.value_of("output").unwrap_or_default()),
        results: cli_args.value_of("results").map(expanded_path),
        library: String::from(cli_args.value_of("library").unwrap_or("highcharts")),
        quiet: cli_args.is_present("quiet"),
        complete: cli_args.is_present("complete"),
        show_buttons: !cli_args.is_present("no_buttons"),
    }
}

/// Takes the CLI arguments that control the plotting of a results file.
/// Prints usage and exits on invalid arguments.
pub fn parse_cli() -> PlotArgs {
    let cli_args = cli_app().get_matches();
    plot_args(&cli_args)
}

/// Same as `parse_cli`, but from the given arguments and without exiting.
pub fn parse_cli_from<I, T>(args: I) -> Result<PlotArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = cli_app().get_matches_from_safe(args)?;
    Ok(plot_args(&cli_args))
}

/// Expands a leading `~` and `$VAR` or `${VAR}` references.
/// Unknown variables are left as they are.
pub fn expanded_path(path: &str) -> PathBuf {
    let mut expanded = String::with_capacity(path.len());
    let mut rest = path;
    if rest == "~" || rest.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            expanded.push_str(&home.to_string_lossy());
            rest = &rest[1..];
        }
    }
    while let Some(start) = rest.find('$') {
        expanded.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or_else(|| after.len());
            (&after[..end], end)
        };
        let value = if name.is_empty() {
            None
        } else {
            std::env::var(name).ok()
        };
        match value {
            Some(value) => expanded.push_str(&value),
            None => expanded.push_str(&rest[start..start + 1 + consumed]),
        }
        rest = &after[consumed..];
    }
    expanded.push_str(rest);
    PathBuf::from(expanded)
}

/// true only for an existing regular file
pub fn valid_file(file: &Path) -> bool {
    file.is_file()
}

pub fn check_extension(file: &Path, expected: &'static str) -> Result<(), PlotError> {
    match file.extension() {
        Some(ext) if ext == expected => Ok(()),
        _ => Err(PlotError::WrongExtension {
            path: file.to_path_buf(),
            expected,
        }),
    }
}

fn check_input(file: &Path) -> Result<(), PlotError> {
    if !valid_file(file) {
        return Err(PlotError::MissingFile(file.to_path_buf()));
    }
    check_extension(file, DATA_EXTENSION)
}

/// Validates the arguments, parses the data file and writes the plot page.
/// Nothing is written unless every argument is valid.
pub fn run(args: &PlotArgs) -> Result<(), PlotError> {
    check_input(&args.data)?;
    check_extension(&args.output, OUTPUT_EXTENSION)?;
    if let Some(results) = &args.results {
        check_input(results)?;
    }
    let library: Library = args.library.parse()?;
    let options = PlotOptions {
        library,
        complete: args.complete,
        show_buttons: args.show_buttons,
    };

    if let Some(results) = &args.results {
        warn!(
            "overlaying results is not supported yet, ignoring {}",
            results.display()
        );
    }

    let table = ResultsTable::from_csv(&args.data)?;
    info!("Plotting file {}:", args.data.display());
    info!("   {} time points in column {}", table.len(), table.time_label());
    info!(
        "   {} variables: {}",
        table.variables().len(),
        table.variables().join(" ")
    );

    write_plot_file(&table, &args.output, options)?;
    info!("Wrote {}", args.output.display());
    Ok(())
}
