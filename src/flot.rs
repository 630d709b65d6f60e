//! Page template for Flot (http://flotcharts.org)
//!
//! Most, but not everything in Flot, is easily styled using CSS.
//! For some other things Flot takes arguments to the plot call and writes
//! style="..." attributes on the HTML elements, so styling lives in two places.

use super::library::{js_string, PlotGenerator};
use std::io::{self, Write};

const SCRIPTS_AND_STYLE: &str = r#"
<script language="javascript" src="http://code.jquery.com/jquery-1.8.3.min.js"></script>
<script language="javascript" src="http://cdnjs.cloudflare.com/ajax/libs/flot/0.7/jquery.flot.min.js"></script>
<style>
body {
   background-color: white;
}

#placeholder {
   height: 400px;
   width: 600px;
   background-color: white;
}

.tickLabels, #legend {
    font-family: Helvetica, Verdana, sans-serif;
}

.xAxis, .yAxis {
    color: #545454 !important;
}

#legend {
    margin: 10 10 10 0;
}

.legendLabel {
    color: #666 !important;
    padding-right: 10px;
}

#tooltip {
    position: absolute;
    display: none;
    border: 1px solid #fdd;
    padding: 2px;
    background-color: #fee;
    opacity: 0.80;
    font-family: Helvetica, Verdana, sans-serif;
}"#;

const HIDE_INFO_TEXT: &str = r#"

#info-text {
    display: none;
}"#;

const SCRIPT_OPEN: &str = r#"
</style>
<script>
$(function () {
"#;

const PLOT_OPEN: &str = r##"
function doPlot() {
    $.plot($("#placeholder"),
           [
"##;

const PLOT_CLOSE: &str = r##"           ],
           {
               series: { points: { show: false, radius: 2 },
                         lines: { show: true } },
               legend: { container: "#legend", noColumns: 8 },
               crosshair: { mode: "x" },
               grid: { backgroundColor: "#fff", color: "#999",
                       borderColor: "#ccc", borderWidth: 1,
                       hoverable: true, clickable: true}
           });
    }

    function showTooltip(x, y, contents) {
        $('<div id="tooltip">' + contents + '</div>').css( {
            top: y + 5,
            left: x + 5
        }).appendTo("body").fadeIn(200);
    }

    var previousPoint = null;
    $("#placeholder").bind("plothover", function (event, pos, item) {
        $("#x").text(pos.x.toFixed(2));
        $("#y").text(pos.y.toFixed(2));

        if (item) {
            if (previousPoint != item.dataIndex) {
                previousPoint = item.dataIndex;

                $("#tooltip").remove();
                var x = item.datapoint[0].toFixed(2),
                    y = item.datapoint[1].toFixed(2);

                showTooltip(item.pageX, item.pageY,
                            item.series.label + " at time " + x + " = " + y);
            }
        }
        else {
            $("#tooltip").remove();
            previousPoint = null;
        }
    });

    doPlot();
    $("button").click(function () { doPlot(); });

});
</script>
"##;

/// names the page script already uses, plus the JavaScript reserved words
const RESERVED: &[&str] = &[
    "doPlot", "showTooltip", "previousPoint", "$", "jQuery", "break", "case", "catch", "class",
    "const", "continue", "debugger", "default", "delete", "do", "else", "enum", "export",
    "extends", "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var",
    "void", "while", "with", "yield", "undefined", "NaN", "Infinity",
];

/// Each series becomes a `var` holding its data array; the plot call refers to them by name.
#[derive(Debug, Default)]
pub struct FlotPlotGenerator {
    idents: Vec<String>,
}

impl FlotPlotGenerator {
    /// the label itself when it is a usable identifier, series_<n> otherwise
    fn series_ident(&self, index: usize, label: &str) -> String {
        if is_js_ident(label) && !RESERVED.contains(&label) && !self.is_taken(label) {
            return label.to_string();
        }
        let mut ident = format!("series_{}", index + 1);
        while self.is_taken(&ident) {
            ident.push('_');
        }
        ident
    }

    fn is_taken(&self, ident: &str) -> bool {
        self.idents.iter().any(|i| i == ident)
    }
}

fn is_js_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl PlotGenerator for FlotPlotGenerator {
    fn write_code_start(
        &mut self,
        out: &mut dyn Write,
        _labels: &[String],
        buttons: bool,
    ) -> io::Result<()> {
        self.idents.clear();
        out.write_all(SCRIPTS_AND_STYLE.as_bytes())?;
        if !buttons {
            out.write_all(HIDE_INFO_TEXT.as_bytes())?;
        }
        out.write_all(SCRIPT_OPEN.as_bytes())
    }

    fn write_series_start(
        &mut self,
        out: &mut dyn Write,
        index: usize,
        label: &str,
    ) -> io::Result<()> {
        let ident = self.series_ident(index, label);
        write!(out, "var {} = [", ident)?;
        self.idents.push(ident);
        Ok(())
    }

    fn write_series_stop(&mut self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"];\n")
    }

    fn write_code_end(&mut self, out: &mut dyn Write, labels: &[String]) -> io::Result<()> {
        out.write_all(PLOT_OPEN.as_bytes())?;
        for (ident, label) in self.idents.iter().zip(labels.iter().skip(1)) {
            writeln!(
                out,
                "{}{{ data: {}, label: {}, shadowSize: 0 }},",
                " ".repeat(15),
                ident,
                js_string(label)
            )?;
        }
        out.write_all(PLOT_CLOSE.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_follow_labels_when_possible() {
        let mut g = FlotPlotGenerator::default();
        let mut out: Vec<u8> = Vec::new();
        let labels = ["S1", "k 2", "var", "S1", "series_6", "_x$"];
        for (i, l) in labels.iter().enumerate() {
            g.write_series_start(&mut out, i, l).unwrap();
            g.write_series_stop(&mut out).unwrap();
        }
        assert_eq!(
            g.idents,
            vec!["S1", "series_2", "series_3", "series_4", "series_6", "_x$"]
        );
    }

    #[test]
    fn fallback_identifier_never_collides() {
        let mut g = FlotPlotGenerator::default();
        let mut out: Vec<u8> = Vec::new();
        g.write_series_start(&mut out, 0, "series_2").unwrap();
        g.write_series_start(&mut out, 1, "2x").unwrap();
        assert_eq!(g.idents, vec!["series_2", "series_2_"]);
    }

    #[test]
    fn plot_call_lists_every_series() {
        let mut g = FlotPlotGenerator::default();
        let mut out: Vec<u8> = Vec::new();
        let labels: Vec<String> = vec!["time".into(), "X".into(), "1y".into()];
        g.write_code_start(&mut out, &labels, true).unwrap();
        g.write_series_start(&mut out, 0, "X").unwrap();
        g.write_series_stop(&mut out).unwrap();
        g.write_series_start(&mut out, 1, "1y").unwrap();
        g.write_series_stop(&mut out).unwrap();
        g.write_code_end(&mut out, &labels).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("var X = [];\n"));
        assert!(s.contains("var series_2 = [];\n"));
        assert!(s.contains("{ data: X, label: \"X\", shadowSize: 0 },"));
        assert!(s.contains("{ data: series_2, label: \"1y\", shadowSize: 0 },"));
        assert!(s.contains("$.plot($(\"#placeholder\"),"));
        assert!(!s.contains("#info-text"));
    }

    #[test]
    fn plot_call_keeps_hash_selectors_intact() {
        let mut g = FlotPlotGenerator::default();
        let mut out: Vec<u8> = Vec::new();
        g.write_code_end(&mut out, &[String::from("time")]).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("\nfunction doPlot() {\n    $.plot($(\"#placeholder\"),\n"));
        assert!(s.contains("legend: { container: \"#legend\", noColumns: 8 },"));
        assert!(s.contains("$(\"#tooltip\").remove();"));
        assert!(s.ends_with("doPlot(); });\n\n});\n</script>\n"));
    }

    #[test]
    fn no_buttons_hides_info_text() {
        let mut out: Vec<u8> = Vec::new();
        FlotPlotGenerator::default()
            .write_code_start(&mut out, &[], false)
            .unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("#info-text {\n    display: none;\n}"));
    }
}
