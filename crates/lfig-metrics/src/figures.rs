use std::fs;
use std::path::Path;

use lfig_core::errors::{codes, ErrorInfo, LfigError};
use lfig_core::FigureSize;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use serde::{Deserialize, Serialize};

use crate::stats::{RobustBound, Summary};

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge; inclusive for the last bin.
    pub end: f64,
    /// Values falling in the bin.
    pub count: usize,
}

/// Equal-width histogram spanning the data range.
///
/// The last bin includes the maximum. A single-valued series spans one unit
/// centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }
    let bins = bins.max(1);
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let idx = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: min + width * idx as f64,
            end: if idx + 1 == bins {
                max
            } else {
                min + width * (idx + 1) as f64
            },
            count,
        })
        .collect()
}

/// Vertical reference line with a legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Legend text.
    pub label: String,
    /// Position on the x axis.
    pub value: f64,
    /// Line color as RGB.
    pub color: (u8, u8, u8),
}

/// Everything needed to draw one panel of a distribution figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelPlan {
    /// Panel caption.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Bar fill color as RGB.
    pub color: (u8, u8, u8),
    /// Histogram bars.
    pub bins: Vec<HistogramBin>,
    /// Visible x axis range.
    pub x_range: (f64, f64),
    /// Vertical reference lines.
    pub markers: Vec<Marker>,
    /// Annotation drawn in the upper right corner.
    pub note: Option<String>,
    /// Text drawn instead of a histogram when there is no data.
    pub placeholder: Option<String>,
}

impl PanelPlan {
    /// Histogram of `values` over their full range.
    pub fn histogram(
        title: impl Into<String>,
        x_label: impl Into<String>,
        values: &[f64],
        bins: usize,
        color: (u8, u8, u8),
    ) -> Self {
        let bins = histogram(values, bins);
        let x_range = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        };
        Self {
            title: title.into(),
            x_label: x_label.into(),
            color,
            bins,
            x_range,
            markers: Vec::new(),
            note: None,
            placeholder: None,
        }
    }

    /// Titled panel showing `text` in place of a histogram.
    pub fn placeholder(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            placeholder: Some(text.into()),
            ..Self::blank()
        }
        .titled(title)
    }

    /// Panel left empty.
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            color: (0, 0, 0),
            bins: Vec::new(),
            x_range: (0.0, 1.0),
            markers: Vec::new(),
            note: None,
            placeholder: None,
        }
    }

    fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds mean and median reference lines.
    pub fn with_center_markers(mut self, summary: &Summary) -> Self {
        self.markers.push(Marker {
            label: format!("Mean: {:.4}", summary.mean),
            value: summary.mean,
            color: (0, 0, 255),
        });
        self.markers.push(Marker {
            label: format!("Median: {:.4}", summary.median),
            value: summary.median,
            color: (0, 128, 0),
        });
        self
    }

    /// Narrows the axis to `[0, upper]` and adds the outlier note when the
    /// bound asks for it.
    pub fn with_bound(mut self, bound: &RobustBound) -> Self {
        if !bound.clamp_axis {
            return self;
        }
        self.x_range = (0.0, bound.upper);
        if let Some(outliers) = &bound.outliers {
            self.note = Some(format!(
                "Note: {} values >= {} (max={:.3})",
                outliers.count, outliers.threshold, outliers.max
            ));
        }
        self
    }

    fn y_max(&self) -> f64 {
        let tallest = self.bins.iter().map(|bin| bin.count).max().unwrap_or(0);
        (tallest as f64 * 1.1).max(1.0)
    }
}

fn render_error(err: impl std::fmt::Display) -> LfigError {
    LfigError::Render(ErrorInfo::new(codes::RENDER, err.to_string()))
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Draws `plans` side by side into one PNG at `path`.
pub fn render_panels(path: &Path, plans: &[PanelPlan], size: FigureSize) -> Result<(), LfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| LfigError::io(err, parent))?;
    }
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let areas = root.split_evenly((1, plans.len().max(1)));
    for (area, plan) in areas.iter().zip(plans) {
        draw_panel(area, plan)?;
    }
    root.present().map_err(|err| {
        LfigError::Render(ErrorInfo::new(codes::RENDER, err.to_string()).with_path(path))
    })
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    plan: &PanelPlan,
) -> Result<(), LfigError> {
    let (width, height) = area.dim_in_pixel();
    if let Some(text) = &plan.placeholder {
        area.draw(&Text::new(
            plan.title.clone(),
            ((width / 2) as i32, 12),
            ("sans-serif", 24)
                .into_font()
                .style(FontStyle::Bold)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(render_error)?;
        area.draw(&Text::new(
            text.clone(),
            ((width / 2) as i32, (height / 2) as i32),
            ("sans-serif", 20)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))
        .map_err(render_error)?;
        return Ok(());
    }
    if plan.bins.is_empty() {
        return Ok(());
    }

    let (x_min, x_max) = plan.x_range;
    let y_max = plan.y_max();
    let mut chart = ChartBuilder::on(area)
        .caption(&plan.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0f64..y_max)
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_desc(plan.x_label.as_str())
        .y_desc("Frequency")
        .draw()
        .map_err(render_error)?;

    // Bars outside a narrowed axis are cut at the axis edge.
    let visible: Vec<(f64, f64, f64)> = plan
        .bins
        .iter()
        .filter(|bin| bin.end > x_min && bin.start < x_max)
        .map(|bin| (bin.start.max(x_min), bin.end.min(x_max), bin.count as f64))
        .collect();
    let fill = rgb(plan.color).mix(0.7).filled();
    let edge = BLACK.stroke_width(1);
    for style in [fill, edge] {
        chart
            .draw_series(
                visible
                    .iter()
                    .map(|&(x0, x1, count)| Rectangle::new([(x0, 0.0), (x1, count)], style)),
            )
            .map_err(render_error)?;
    }

    for marker in &plan.markers {
        let style = rgb(marker.color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                vec![(marker.value, 0.0), (marker.value, y_max)],
                style,
            ))
            .map_err(render_error)?
            .label(marker.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }
    if !plan.markers.is_empty() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_error)?;
    }

    if let Some(note) = &plan.note {
        area.draw(&Text::new(
            note.clone(),
            (width as i32 - 30, 60),
            ("sans-serif", 16)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Top)),
        ))
        .map_err(render_error)?;
    }
    Ok(())
}
