use super::{Library, PlotError, PlotGenerator, ResultsTable};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

const HTML_START: &str = "<html>\n<body>";
const HTML_END: &str = "</body>\n</html>\n";
const TRAILER: &str = r#"
<div id="info-text">
Drag the mouse to zoom in on a rectangular region.<br>
Click on variable names in the legend to toggle their visibility.
</div>
<div id="placeholder"></div>
<div id="legend"></div>
"#;

/// How the page is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub library: Library,
    /// wrap the output in a complete html document
    pub complete: bool,
    /// export and print buttons, plus the interaction hints
    pub show_buttons: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            library: Library::default(),
            complete: false,
            show_buttons: true,
        }
    }
}

/// Writes a plot page for a ResultsTable, delegating the
/// library-specific text to the PlotGenerator of the chosen library.
pub struct PlotWriter<W: Write> {
    out: W,
    options: PlotOptions,
    generator: Box<dyn PlotGenerator>,
}

impl<W: Write> PlotWriter<W> {
    pub fn new(out: W, options: PlotOptions) -> PlotWriter<W> {
        let generator = options.library.generator();
        PlotWriter {
            out,
            options,
            generator,
        }
    }

    /// writes the whole page, from the optional html start to the optional html end
    pub fn write_plot(&mut self, table: &ResultsTable) -> Result<(), PlotError> {
        self.write_html_start()?;
        self.generator
            .write_code_start(&mut self.out, table.labels(), self.options.show_buttons)?;
        self.write_data(table)?;
        self.generator.write_code_end(&mut self.out, table.labels())?;
        self.write_html_end()?;
        self.out.flush()?;
        Ok(())
    }

    fn write_html_start(&mut self) -> Result<(), PlotError> {
        if self.options.complete {
            self.out.write_all(HTML_START.as_bytes())?;
        }
        Ok(())
    }

    /// one block of [time, value] pairs per variable
    fn write_data(&mut self, table: &ResultsTable) -> Result<(), PlotError> {
        for (index, label) in table.variables().iter().enumerate() {
            if index > 0 {
                self.out
                    .write_all(self.generator.series_separator().as_bytes())?;
            }
            self.generator
                .write_series_start(&mut self.out, index, label)?;
            if let Some(series) = table.series(label) {
                for (row, (t, v)) in series.enumerate() {
                    if row > 0 {
                        self.out.write_all(b",")?;
                    }
                    write!(self.out, "\n[{}, {}]", point(t), point(v))?;
                }
            }
            self.generator.write_series_stop(&mut self.out)?;
        }
        Ok(())
    }

    fn write_html_end(&mut self) -> Result<(), PlotError> {
        self.out.write_all(TRAILER.as_bytes())?;
        if self.options.complete {
            self.out.write_all(HTML_END.as_bytes())?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// finite numbers go through as written, anything else becomes a gap
fn point(field: &str) -> &str {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => field,
        _ => "null",
    }
}

/// Creates (or overwrites) fout and writes the plot page into it.
pub fn write_plot_file<P: AsRef<Path>>(
    table: &ResultsTable,
    fout: P,
    options: PlotOptions,
) -> Result<(), PlotError> {
    let file = File::create(fout.as_ref())?;
    debug!(
        "writing {} plot to {}",
        options.library,
        fout.as_ref().display()
    );
    let mut writer = PlotWriter::new(BufWriter::new(file), options);
    writer.write_plot(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy() -> ResultsTable {
        ResultsTable::from_reader("time,X,Y\n0,1,2\n1,3,4\n".as_bytes()).unwrap()
    }

    fn page(table: &ResultsTable, options: PlotOptions) -> String {
        let mut writer = PlotWriter::new(Vec::new(), options);
        writer.write_plot(table).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn flot_fragment_has_one_block_per_series() {
        let options = PlotOptions {
            library: Library::Flot,
            ..PlotOptions::default()
        };
        let s = page(&xy(), options);
        assert!(s.contains("var X = [\n[0, 1],\n[1, 3]];\n"));
        assert!(s.contains("var Y = [\n[0, 2],\n[1, 4]];\n"));
        assert!(s.contains("$.plot($(\"#placeholder\"),"));
        assert!(!s.contains("<html>"));
        assert!(!s.contains("</html>"));
        assert!(!s.contains("];\n,"));
    }

    #[test]
    fn highcharts_series_are_comma_separated() {
        let s = page(&xy(), PlotOptions::default());
        assert!(s.contains(
            "{ name: \"X\", shadow: false, data: [\n[0, 1],\n[1, 3]] },\n{ name: \"Y\", shadow: false, data: [\n[0, 2],\n[1, 4]] }\n]"
        ));
    }

    #[test]
    fn complete_page_is_wrapped_once() {
        for library in [Library::Highcharts, Library::Flot].iter() {
            let options = PlotOptions {
                library: *library,
                complete: true,
                show_buttons: true,
            };
            let s = page(&xy(), options);
            assert!(s.starts_with("<html>\n<body>"));
            assert!(s.ends_with("</body>\n</html>\n"));
            assert_eq!(s.matches("<html>").count(), 1);
            assert_eq!(s.matches("</html>").count(), 1);
            assert_eq!(s.matches("<body>").count(), 1);
        }
    }

    #[test]
    fn no_buttons_omits_export_controls() {
        for library in [Library::Highcharts, Library::Flot].iter() {
            let options = PlotOptions {
                library: *library,
                complete: false,
                show_buttons: false,
            };
            let s = page(&xy(), options);
            assert!(!s.contains("exportButton: { y: 5 }"));
            assert!(!s.contains("printButton: { y: 5 }"));
        }
    }

    #[test]
    fn trailer_has_placeholder_and_legend() {
        let s = page(&xy(), PlotOptions::default());
        assert!(s.contains("<div id=\"placeholder\"></div>\n<div id=\"legend\"></div>\n"));
        assert!(s.contains("Drag the mouse to zoom in"));
    }

    #[test]
    fn blank_values_become_gaps() {
        let t = ResultsTable::from_reader("time,A\n0,\n1, 2\n".as_bytes()).unwrap();
        let options = PlotOptions {
            library: Library::Flot,
            ..PlotOptions::default()
        };
        let s = page(&t, options);
        assert!(s.contains("var A = [\n[0, null],\n[1, 2]];\n"));
    }

    #[test]
    fn non_numeric_fields_never_reach_the_script() {
        let t = ResultsTable::from_reader(
            "time,A\n0,</script><b>x</b>\n1,NaN\n2,inf\n3,abc\n4,1.5e-3\nx,7\n".as_bytes(),
        )
        .unwrap();
        let s = page(&t, PlotOptions::default());
        assert!(!s.contains("<b>x</b>"));
        assert!(!s.contains("</script><b>"));
        assert!(s.contains(
            "data: [\n[0, null],\n[1, null],\n[2, null],\n[3, null],\n[4, 1.5e-3],\n[null, 7]] }"
        ));
    }

    #[test]
    fn no_variables_still_writes_a_page() {
        let t = ResultsTable::from_reader("time\n0\n1\n".as_bytes()).unwrap();
        let s = page(&t, PlotOptions::default());
        assert!(s.contains("series: [\n\n]"));
    }
}
