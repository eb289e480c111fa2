//! Plotly figure specifications
//!
//! Only the subset of the plotly.js schema the dashboard emits. A [`Figure`]
//! serializes to the `{data, layout}` object `Plotly.react` consumes.
//! Missing values serialize as `null`, which plotly leaves out of the trace.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Total number of plotted points across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::points).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(LineTrace),
    Scattergeo(GeoTrace),
}

impl Trace {
    fn points(&self) -> usize {
        match self {
            Trace::Scatter(t) => t.y.len(),
            Trace::Scattergeo(t) => t.lat.len(),
        }
    }
}

/// `scatter` trace drawn as a line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub mode: &'static str,
    pub x: Vec<Option<String>>,
    pub y: Vec<Option<f64>>,
    pub hovertemplate: String,
}

/// `scattergeo` trace of markers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoTrace {
    pub mode: &'static str,
    pub lat: Vec<Option<f64>>,
    pub lon: Vec<Option<f64>>,
    pub marker: GeoMarker,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoMarker {
    pub color: Vec<Option<f64>>,
    pub size: Vec<f64>,
    pub sizemode: &'static str,
    pub sizeref: f64,
    pub sizemin: f64,
    pub colorscale: &'static str,
    pub showscale: bool,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geo {
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: &'static str,
}
