use serde::Serialize;

use crate::models::{Signal, SignalSeries, Window};

/// One plotly trace. Field names follow the plotly.js wire format so the
/// browser can hand the struct to `Plotly.react` unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub name: String,
    pub line: LineStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisSpec {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: AxisSpec,
    pub yaxis: AxisSpec,
    pub hovermode: &'static str,
}

/// A complete figure: data traces plus layout, built fresh per render
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// Build one signal chart: a line+marker trace over the series, plus a
/// horizontal dashed threshold line per given bound.
pub fn build_chart(
    series: &SignalSeries,
    trace_name: &str,
    color: &'static str,
    y_title: &str,
    y_min: Option<f64>,
    y_max: Option<f64>,
) -> ChartSpec {
    let x: Vec<String> = series.timestamps.iter().map(|ts| ts.to_rfc3339()).collect();

    let mut data = vec![Trace {
        x: x.clone(),
        y: series.values.clone(),
        mode: "lines+markers",
        name: trace_name.to_string(),
        line: LineStyle { color, dash: None },
    }];

    if let Some(level) = y_min {
        data.push(threshold_trace(&x, level, format!("{} Min", y_title)));
    }
    if let Some(level) = y_max {
        data.push(threshold_trace(&x, level, format!("{} Max", y_title)));
    }

    ChartSpec {
        data,
        layout: Layout {
            title: format!("{} Over Time", capitalize(trace_name)),
            xaxis: AxisSpec {
                title: "Timestamp".to_string(),
            },
            yaxis: AxisSpec {
                title: y_title.to_string(),
            },
            hovermode: "closest",
        },
    }
}

/// The three dashboard charts in display order, using the fixed per-signal
/// colors, labels and threshold bands.
pub fn dashboard_charts(window: &Window) -> Vec<ChartSpec> {
    Signal::ALL
        .iter()
        .map(|&signal| {
            let (y_min, y_max) = signal.band();
            build_chart(
                window.series(signal),
                signal.attribute(),
                signal.color(),
                signal.y_title(),
                y_min,
                y_max,
            )
        })
        .collect()
}

/// Horizontal dashed line at `level` spanning the same x-range as the data
fn threshold_trace(x: &[String], level: f64, name: String) -> Trace {
    Trace {
        x: x.to_vec(),
        y: vec![level; x.len()],
        mode: "lines",
        name,
        line: LineStyle {
            color: "black",
            dash: Some("dash"),
        },
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalize_timestamp;

    fn series_of(n: usize) -> SignalSeries {
        SignalSeries {
            timestamps: (0..n)
                .map(|i| {
                    normalize_timestamp(&format!("2024-01-15T12:00:{:02}Z", i))
                        .expect("valid timestamp")
                })
                .collect(),
            values: (0..n).map(|i| 20.0 + i as f64).collect(),
        }
    }

    #[test]
    fn test_chart_with_both_thresholds_has_three_traces() {
        let chart = build_chart(
            &series_of(5),
            "temperature",
            "red",
            "Temperature (°C)",
            Some(15.0),
            Some(25.0),
        );

        assert_eq!(chart.data.len(), 3);
        assert_eq!(chart.data[0].mode, "lines+markers");
        assert_eq!(chart.data[0].line.color, "red");
        assert_eq!(chart.data[1].name, "Temperature (°C) Min");
        assert_eq!(chart.data[2].name, "Temperature (°C) Max");
        // Threshold lines are flat and span the full x-range
        assert!(chart.data[1].y.iter().all(|&v| v == 15.0));
        assert_eq!(chart.data[1].x.len(), 5);
        assert_eq!(chart.data[1].line.dash, Some("dash"));
    }

    #[test]
    fn test_chart_without_thresholds_has_one_trace() {
        let chart = build_chart(&series_of(5), "humidity", "blue", "Humidity (%)", None, None);
        assert_eq!(chart.data.len(), 1);
    }

    #[test]
    fn test_layout_titles_and_hovermode() {
        let chart = build_chart(
            &series_of(3),
            "luminosity",
            "orange",
            "Luminosity (%)",
            Some(0.0),
            Some(30.0),
        );

        assert_eq!(chart.layout.title, "Luminosity Over Time");
        assert_eq!(chart.layout.xaxis.title, "Timestamp");
        assert_eq!(chart.layout.yaxis.title, "Luminosity (%)");
        assert_eq!(chart.layout.hovermode, "closest");
    }

    #[test]
    fn test_dashboard_charts_cover_all_signals_in_order() {
        let window = Window {
            temperature: series_of(3),
            humidity: series_of(3),
            luminosity: series_of(3),
        };

        let charts = dashboard_charts(&window);
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].layout.title, "Temperature Over Time");
        assert_eq!(charts[1].layout.title, "Humidity Over Time");
        assert_eq!(charts[2].layout.title, "Luminosity Over Time");
        // Every chart carries its threshold band
        assert!(charts.iter().all(|c| c.data.len() == 3));
    }

    #[test]
    fn test_trace_serializes_to_plotly_shape() {
        let chart = build_chart(&series_of(1), "temperature", "red", "T", Some(1.0), None);
        let json = serde_json::to_value(&chart).expect("serializable");

        assert_eq!(json["data"][0]["mode"], "lines+markers");
        assert_eq!(json["data"][1]["line"]["dash"], "dash");
        // `dash` is omitted entirely on the data trace
        assert!(json["data"][0]["line"].get("dash").is_none());
        assert_eq!(json["layout"]["hovermode"], "closest");
    }
}
