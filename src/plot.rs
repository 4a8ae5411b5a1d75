//! Scatter plot of listing price against overall satisfaction.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::analyzers::types::PriceSatisfaction;
use crate::error::{Error, Result};

/// Chart dimensions in pixels.
const SIZE: (u32, u32) = (1024, 768);

/// Title and axis captions for [`render_scatter`].
#[derive(Debug, Clone)]
pub struct PlotLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for PlotLabels {
    fn default() -> Self {
        Self {
            title: "Price v Overall Satisfaction".to_string(),
            x_label: "Price".to_string(),
            y_label: "Overall Satisfaction".to_string(),
        }
    }
}

impl PlotLabels {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Draws `points` as red dots into an SVG file at `path`.
///
/// # Errors
///
/// Returns [`Error::Plot`] if the chart cannot be drawn or written.
#[tracing::instrument(skip(points, labels), fields(count = points.len(), path = %path.display()))]
pub fn render_scatter(points: &[PriceSatisfaction], path: &Path, labels: &PlotLabels) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let x_range = padded_range(points.iter().map(|p| p.price));
    let y_range = padded_range(points.iter().map(|p| p.satisfaction));

    let mut chart = ChartBuilder::on(&root)
        .caption(&labels.title, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(labels.x_label.as_str())
        .y_desc(labels.y_label.as_str())
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.price, p.satisfaction), 3, RED.filled())),
        )
        .map_err(plot_error)?
        .label("data")
        .legend(|(x, y)| Circle::new((x, y), 3, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;

    info!("Scatter plot written");
    Ok(())
}

/// Axis range covering every finite value with 5% padding on each side.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 1.0)..(max + 1.0);
    }

    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

fn plot_error(e: impl std::fmt::Display) -> Error {
    Error::Plot(e.to_string())
}
