use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

use crate::models::{AxisDomain, ChartOutcome, ChartSpec, Encoding};
use crate::utils::format::format_axis_price;

const SERIES_COLOR: RGBColor = RGBColor(0x63, 0x66, 0xf1);
const GRID_COLOR: RGBColor = RGBColor(0x94, 0xa3, 0xb8);

/// Stacked translucent layers used to fake the area gradient
const AREA_LAYERS: usize = 8;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Unsupported chart format '{0}', use .png or .svg")]
    UnsupportedFormat(String),
}

/// Output image format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, ChartError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(ChartError::UnsupportedFormat(ext)),
        }
    }
}

/// Draw the chart (or the empty-state placeholder) into an image file
pub fn render_to_file(
    outcome: &ChartOutcome,
    caption: &str,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), ChartError> {
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
            draw(&root, outcome, caption)?;
            root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, (width, height)).into_drawing_area();
            draw(&root, outcome, caption)?;
            root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
    }

    tracing::info!("Chart written to {}", path.display());
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    outcome: &ChartOutcome,
    caption: &str,
) -> Result<(), ChartError> {
    root.fill(&WHITE)
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    match outcome {
        ChartOutcome::NoData => draw_no_data(root),
        ChartOutcome::Chart(spec) => draw_chart(root, spec, caption),
    }
}

fn draw_no_data<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>) -> Result<(), ChartError> {
    let (width, height) = root.dim_in_pixel();
    let style = TextStyle::from(("sans-serif", 24).into_font())
        .color(&GRID_COLOR)
        .pos(Pos::new(HPos::Center, VPos::Center));

    root.draw_text(
        ChartOutcome::NO_DATA_MESSAGE,
        &style,
        ((width / 2) as i32, (height / 2) as i32),
    )
    .map_err(|e| ChartError::Drawing(e.to_string()))
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    caption: &str,
) -> Result<(), ChartError> {
    let n = spec.dates.len();
    let domain = drawable_domain(spec.domain);

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), domain.min..domain.max)
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    let date_labels: Vec<String> = spec
        .dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    chart
        .configure_mesh()
        .x_labels(n.clamp(1, 12))
        .x_label_formatter(&|x| date_label(&date_labels, *x))
        .y_label_formatter(&|y| format_axis_price(*y))
        .axis_style(&GRID_COLOR)
        .x_desc("Date")
        .y_desc("Price (USD)")
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    match &spec.encoding {
        Encoding::Line { markers, curve } => {
            chart
                .draw_series(LineSeries::new(
                    curve.iter().map(|p| (p.x, p.value)),
                    SERIES_COLOR.stroke_width(2),
                ))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
            chart
                .draw_series(
                    markers
                        .iter()
                        .map(|p| Circle::new((p.x, p.value), 4, SERIES_COLOR.filled())),
                )
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
        Encoding::Area {
            markers: _,
            curve,
            fill,
        } => {
            let top = curve
                .iter()
                .map(|p| p.value)
                .fold(fill.baseline, f64::max);
            let layer_alpha = (fill.top_opacity - fill.bottom_opacity) / AREA_LAYERS as f64;

            // Each layer fills from the curve down to a higher baseline, so
            // the overlap (and the opacity) builds up towards the top.
            for layer in 0..AREA_LAYERS {
                let base =
                    fill.baseline + (top - fill.baseline) * layer as f64 / AREA_LAYERS as f64;
                chart
                    .draw_series(AreaSeries::new(
                        curve.iter().map(|p| (p.x, p.value.max(base))),
                        base,
                        SERIES_COLOR.mix(layer_alpha),
                    ))
                    .map_err(|e| ChartError::Drawing(e.to_string()))?;
            }

            chart
                .draw_series(LineSeries::new(
                    curve.iter().map(|p| (p.x, p.value)),
                    SERIES_COLOR.stroke_width(2),
                ))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
        Encoding::Bar { bars } => {
            chart
                .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                    let x = i as f64;
                    Rectangle::new(
                        [(x - 0.35, domain.min), (x + 0.35, bar.height)],
                        SERIES_COLOR.filled(),
                    )
                }))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
        Encoding::Candlestick { ranges } => {
            for (i, mark) in ranges.iter().enumerate() {
                let x = i as f64;
                let (r, g, b) = mark.trend.range_color();
                let (tr, tg, tb) = mark.trend.tick_color();

                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(x, mark.low), (x, mark.high)],
                        RGBColor(r, g, b).stroke_width(3),
                    )))
                    .map_err(|e| ChartError::Drawing(e.to_string()))?;
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(x - 0.25, mark.avg), (x + 0.25, mark.avg)],
                        RGBColor(tr, tg, tb).stroke_width(4),
                    )))
                    .map_err(|e| ChartError::Drawing(e.to_string()))?;
            }
        }
    }

    Ok(())
}

/// A zero-height domain (every price identical and rounding to the same
/// whole dollar) gets one dollar of room so the axis can be built.
fn drawable_domain(domain: AxisDomain) -> AxisDomain {
    if domain.max > domain.min {
        domain
    } else {
        AxisDomain {
            min: domain.min,
            max: domain.min + 1.0,
        }
    }
}

/// Date label for an x position; only positions on a date get one
fn date_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}
