//! Page template for Highcharts JS (http://highcharts.com)

use super::library::{js_string, PlotGenerator};
use std::io::{self, Write};

const SCRIPTS_AND_STYLE: &str = r#"
<script src="http://code.jquery.com/jquery-1.8.3.min.js"></script>
<script src="http://code.highcharts.com/highcharts.js"></script>
<script src="http://code.highcharts.com/modules/exporting.js"></script>
<style>
body {
   background-color: white;
   font-family: Helvetica, Verdana, sans-serif;
   font-size: 10pt;
}
@media print {
  .no-print { display: none; }
}
#info-text {
  position: absolute;
  color: #bbb;
  top: 5;
  left: 150;
  z-index: 2;
  text-align: center;"#;

const HIDE_INFO_TEXT: &str = r#"
  display: none;"#;

const CHART_OPTIONS: &str = r#"
}
</style>
<script>
$(function () {
    var chart;
    $(document).ready(function() {
        chart = new Highcharts.Chart({
            chart: {
                backgroundColor: '#fff',
                renderTo: 'placeholder',
                type: 'line',
                zoomType: 'xy',
                height: 500,
                width: 600,
                spacingTop: 37
            },
            colors: [
            '#4572A7', '#AA4643', '#89A54E', '#80699B', '#3D96AE',
            '#DB843D', '#92A8CD', '#A47D7C', '#B5CA92', '#F9B7B0',
            '#A9BDE6', '#A6EBB5', '#F9E0B0', '#F97A6D', '#7297E6',
            '#67EB84', '#F9C96D', '#E62B17', '#1D4599', '#11AD34',
            '#E69F17', '#8F463F', '#2F3F60', '#2F6C3D', '#8F743F',
            '#6D0D03', '#031A49', '#025214', '#6D4903'
            ],
            plotOptions: {
                line: {
                    dashStyle: 'Solid',
                    marker: {
                        enabled: false
                    }
                }
            },
            title: {
                text: null
            },
            xAxis: {
                gridLineWidth: 1,
                gridLineDashStyle: 'ShortDot',
                tickPosition: 'inside',
                maxPadding: 0,
                lineWidth: 0
            },
            yAxis: {
                gridLineWidth: 1,
                gridLineDashStyle: 'ShortDot',
                tickPosition: 'inside',
                title: {
                    text: null
                }
            },
            tooltip: {
                borderWidth: 1,
                formatter: function() {
                    return 'At time ' + this.x + '<br><b>' + this.series.name
                           + '<\/b> = ' + this.y;
                }
            },
            legend: {
                borderWidth: 0,
                margin: 10,
                itemWidth: 140,
                itemMarginBottom: 5,
                symbolWidth: 50,
                symbolPadding: 5,
                x: 20
            },
            credits: {
                enabled: false
            },"#;

const EXPORT_BUTTONS: &str = r#"
            exporting: {
                buttons: {
                    exportButton: { y: 5 },
                    printButton: { y: 5 }
                }
            },"#;

const NO_EXPORT_BUTTONS: &str = r#"
            exporting: {
                buttons: {
                    exportButton: { enabled: false },
                    printButton: { enabled: false }
                }
            },"#;

const SERIES_OPEN: &str = r#"
            series: [
"#;

const CODE_END: &str = r#"
]
        });
    });

});
</script>
"#;

#[derive(Debug, Default)]
pub struct HighchartsPlotGenerator;

impl PlotGenerator for HighchartsPlotGenerator {
    fn write_code_start(
        &mut self,
        out: &mut dyn Write,
        _labels: &[String],
        buttons: bool,
    ) -> io::Result<()> {
        out.write_all(SCRIPTS_AND_STYLE.as_bytes())?;
        if !buttons {
            out.write_all(HIDE_INFO_TEXT.as_bytes())?;
        }
        out.write_all(CHART_OPTIONS.as_bytes())?;
        if buttons {
            out.write_all(EXPORT_BUTTONS.as_bytes())?;
        } else {
            out.write_all(NO_EXPORT_BUTTONS.as_bytes())?;
        }
        out.write_all(SERIES_OPEN.as_bytes())
    }

    fn write_series_start(
        &mut self,
        out: &mut dyn Write,
        _index: usize,
        label: &str,
    ) -> io::Result<()> {
        write!(out, "\n{{ name: {}, shadow: false, data: [", js_string(label))
    }

    fn write_series_stop(&mut self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"] }")
    }

    fn series_separator(&self) -> &'static str {
        ","
    }

    fn write_code_end(&mut self, out: &mut dyn Write, _labels: &[String]) -> io::Result<()> {
        out.write_all(CODE_END.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_start(buttons: bool) -> String {
        let mut out: Vec<u8> = Vec::new();
        HighchartsPlotGenerator
            .write_code_start(&mut out, &[], buttons)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn buttons_enable_exporting() {
        let s = code_start(true);
        assert!(s.contains("exportButton: { y: 5 }"));
        assert!(!s.contains("enabled: false }"));
        assert!(!s.contains("display: none;\n}"));
    }

    #[test]
    fn no_buttons_disables_exporting_and_hides_info() {
        let s = code_start(false);
        assert!(s.contains("exportButton: { enabled: false }"));
        assert!(s.contains("printButton: { enabled: false }"));
        assert!(s.contains("text-align: center;\n  display: none;\n}"));
    }

    #[test]
    fn series_is_a_named_object() {
        let mut out: Vec<u8> = Vec::new();
        let mut g = HighchartsPlotGenerator;
        g.write_series_start(&mut out, 0, "S1").unwrap();
        g.write_series_stop(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n{ name: \"S1\", shadow: false, data: [] }"
        );
    }
}
