//! Chart rendering
//!
//! [`render_charts`] is the whole reactive callback: selected year in, both
//! figures out. It is pure and recomputes everything on each call.

use serde::Serialize;

use crate::models::{
    Axis, ColorBar, EarthquakeRecord, Figure, Geo, GeoMarker, GeoTrace, Layout, LineTrace,
    Projection, Title, Trace,
};

/// Largest marker diameter, in pixels
const MAX_MARKER_SIZE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPair {
    pub trend: Figure,
    pub map: Figure,
}

/// Rows whose year equals `selected_year`, or every row when none is selected
pub fn filter_by_year(
    records: &[EarthquakeRecord],
    selected_year: Option<i32>,
) -> Vec<&EarthquakeRecord> {
    match selected_year {
        Some(year) => records.iter().filter(|r| r.year == Some(year)).collect(),
        None => records.iter().collect(),
    }
}

pub fn render_charts(records: &[EarthquakeRecord], selected_year: Option<i32>) -> ChartPair {
    let rows = filter_by_year(records, selected_year);
    let label = selected_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "All Years".to_string());

    ChartPair {
        trend: trend_figure(&rows, &label),
        map: map_figure(&rows, &label),
    }
}

/// Magnitude over date, in row order
fn trend_figure(rows: &[&EarthquakeRecord], label: &str) -> Figure {
    let trace = LineTrace {
        mode: "lines",
        x: rows.iter().map(|r| r.date.clone()).collect(),
        y: rows.iter().map(|r| r.mag).collect(),
        hovertemplate: "Date=%{x}<br>Magnitude=%{y}<extra></extra>".to_string(),
    };

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout: Layout {
            title: Title::new(format!("Magnitude Trends for {}", label)),
            xaxis: Some(Axis {
                title: Title::new("Date"),
            }),
            yaxis: Some(Axis {
                title: Title::new("Magnitude"),
            }),
            geo: None,
        },
    }
}

/// Events on a world map; colour and marker area both follow magnitude
fn map_figure(rows: &[&EarthquakeRecord], label: &str) -> Figure {
    let mags: Vec<Option<f64>> = rows.iter().map(|r| r.mag).collect();
    // marker area can't be negative; no magnitude, no marker
    let sizes: Vec<f64> = mags.iter().map(|m| m.map_or(0.0, |m| m.max(0.0))).collect();

    let trace = GeoTrace {
        mode: "markers",
        lat: rows.iter().map(|r| r.latitude).collect(),
        lon: rows.iter().map(|r| r.longitude).collect(),
        marker: GeoMarker {
            color: mags,
            sizeref: size_reference(&sizes),
            size: sizes,
            sizemode: "area",
            sizemin: 0.0,
            colorscale: "Plasma",
            showscale: true,
            colorbar: ColorBar {
                title: Title::new("mag"),
            },
        },
        hovertemplate: "mag=%{marker.color}<br>latitude=%{lat}<br>longitude=%{lon}<extra></extra>"
            .to_string(),
    };

    Figure {
        data: vec![Trace::Scattergeo(trace)],
        layout: Layout {
            title: Title::new(format!("Seismic Activity Map for {}", label)),
            xaxis: None,
            yaxis: None,
            geo: Some(Geo {
                projection: Projection {
                    kind: "natural earth",
                },
            }),
        },
    }
}

/// Area-mode scale so the largest value maps to [`MAX_MARKER_SIZE`]
fn size_reference(sizes: &[f64]) -> f64 {
    let max = sizes.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        2.0 * max / (MAX_MARKER_SIZE * MAX_MARKER_SIZE)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, SAMPLE_CSV};

    fn records() -> Vec<EarthquakeRecord> {
        Dataset::from_reader(SAMPLE_CSV.as_bytes(), "sample")
            .unwrap()
            .records()
            .to_vec()
    }

    fn line(figure: &Figure) -> &LineTrace {
        match &figure.data[0] {
            Trace::Scatter(t) => t,
            other => panic!("expected scatter trace, got {:?}", other),
        }
    }

    fn geo(figure: &Figure) -> &GeoTrace {
        match &figure.data[0] {
            Trace::Scattergeo(t) => t,
            other => panic!("expected scattergeo trace, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_selected_year() {
        let records = records();
        let rows = filter_by_year(&records, Some(2023));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.year == Some(2023)));
    }

    #[test]
    fn test_charts_only_contain_selected_year() {
        let records = records();
        let charts = render_charts(&records, Some(2024));

        assert_eq!(
            line(&charts.trend).x,
            vec![Some("2024-01-05".to_string()), Some("2024-06-01".to_string())]
        );
        assert_eq!(line(&charts.trend).y, vec![Some(5.3), Some(6.0)]);
        assert_eq!(geo(&charts.map).lat, vec![Some(38.3), Some(-33.5)]);
        assert_eq!(geo(&charts.map).lon, vec![Some(142.4), Some(-70.6)]);
    }

    #[test]
    fn test_absent_year_renders_empty_charts() {
        let records = records();
        let charts = render_charts(&records, Some(1999));

        assert_eq!(charts.trend.point_count(), 0);
        assert_eq!(charts.map.point_count(), 0);
        assert_eq!(geo(&charts.map).marker.sizeref, 1.0);
    }

    #[test]
    fn test_no_year_covers_full_dataset() {
        let records = records();
        let charts = render_charts(&records, None);

        assert_eq!(charts.trend.point_count(), records.len());
        assert_eq!(charts.map.point_count(), records.len());
        assert_eq!(charts.trend.layout.title.text, "Magnitude Trends for All Years");
    }

    #[test]
    fn test_titles_and_labels() {
        let records = records();
        let charts = render_charts(&records, Some(2023));

        assert_eq!(charts.trend.layout.title.text, "Magnitude Trends for 2023");
        assert_eq!(charts.map.layout.title.text, "Seismic Activity Map for 2023");
        assert_eq!(charts.trend.layout.xaxis.as_ref().unwrap().title.text, "Date");
        assert_eq!(charts.trend.layout.yaxis.as_ref().unwrap().title.text, "Magnitude");
        assert_eq!(
            charts.map.layout.geo.as_ref().unwrap().projection.kind,
            "natural earth"
        );
    }

    #[test]
    fn test_marker_colour_and_size_follow_magnitude() {
        let records = records();
        let charts = render_charts(&records, Some(2024));
        let marker = &geo(&charts.map).marker;

        assert_eq!(marker.color, vec![Some(5.3), Some(6.0)]);
        assert_eq!(marker.size, vec![5.3, 6.0]);
        assert!((marker.sizeref - 2.0 * 6.0 / 400.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_magnitude_gets_zero_size() {
        let records = vec![EarthquakeRecord {
            year: Some(2020),
            date: Some("2020-01-01".to_string()),
            mag: Some(-0.4),
            latitude: Some(0.0),
            longitude: Some(0.0),
        }];
        let charts = render_charts(&records, None);
        let marker = &geo(&charts.map).marker;
        assert_eq!(marker.color, vec![Some(-0.4)]);
        assert_eq!(marker.size, vec![0.0]);
    }

    #[test]
    fn test_missing_values_become_gaps() {
        let csv = "year,date,mag,latitude,longitude\n2024,2024-01-01,4.0,1.0,2.0\n2024,2024-01-02,,1.0,\n";
        let records = Dataset::from_reader(csv.as_bytes(), "sample")
            .unwrap()
            .records()
            .to_vec();
        let charts = render_charts(&records, Some(2024));

        assert_eq!(line(&charts.trend).y, vec![Some(4.0), None]);
        let marker = &geo(&charts.map).marker;
        assert_eq!(marker.size, vec![4.0, 0.0]);
        assert!((marker.sizeref - 2.0 * 4.0 / 400.0).abs() < 1e-12);

        let json = serde_json::to_value(&charts).unwrap();
        assert_eq!(json["trend"]["data"][0]["y"], serde_json::json!([4.0, null]));
        assert_eq!(json["map"]["data"][0]["lon"], serde_json::json!([2.0, null]));
        assert_eq!(json["map"]["data"][0]["marker"]["color"], serde_json::json!([4.0, null]));
    }

    #[test]
    fn test_rows_without_year_only_in_unfiltered_view() {
        let csv = "year,date,mag,latitude,longitude\n2024,2024-01-01,4.0,1.0,2.0\n,2024-01-02,3.0,1.0,2.0\n";
        let records = Dataset::from_reader(csv.as_bytes(), "sample")
            .unwrap()
            .records()
            .to_vec();

        assert_eq!(render_charts(&records, Some(2024)).trend.point_count(), 1);
        assert_eq!(render_charts(&records, None).trend.point_count(), 2);
    }

    #[test]
    fn test_figure_json_shape() {
        let records = records();
        let charts = render_charts(&records, Some(2022));
        let json = serde_json::to_value(&charts).unwrap();

        assert_eq!(json["trend"]["data"][0]["type"], "scatter");
        assert_eq!(json["map"]["data"][0]["type"], "scattergeo");
        assert_eq!(json["map"]["layout"]["geo"]["projection"]["type"], "natural earth");
        assert!(json["map"]["layout"].get("xaxis").is_none());
    }
}
