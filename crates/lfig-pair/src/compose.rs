use std::fs;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use lfig_core::errors::{codes, ErrorInfo, LfigError};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use tracing::warn;

/// Layout of a side-by-side figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Centered title drawn above both panels.
    pub title: Option<String>,
    /// Height of the title strip; zero disables it.
    pub title_height: u32,
    /// White space around and between the panels.
    pub gutter: u32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            title: None,
            title_height: 80,
            gutter: 20,
        }
    }
}

fn render_error(err: impl std::fmt::Display) -> LfigError {
    LfigError::Render(ErrorInfo::new(codes::RENDER, err.to_string()))
}

/// Reads and decodes an image, reporting failures as load failures.
pub fn load_image(path: &Path) -> Result<RgbaImage, LfigError> {
    let image = image::open(path).map_err(|err| {
        LfigError::Asset(ErrorInfo::new(codes::LOAD_FAILURE, err.to_string()).with_path(path))
    })?;
    let rgba = image.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(LfigError::Asset(
            ErrorInfo::new(codes::LOAD_FAILURE, "image has no pixels").with_path(path),
        ));
    }
    Ok(rgba)
}

fn scale_to_height(image: &RgbaImage, height: u32) -> RgbaImage {
    if image.height() == height {
        return image.clone();
    }
    let ratio = height as f64 / image.height() as f64;
    let width = ((image.width() as f64 * ratio).round() as u32).max(1);
    imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Places `left` and `right` next to each other at a common height on a
/// white canvas, below an optional title strip.
///
/// A title that cannot be drawn (typically no usable system font) leaves the
/// strip blank and is logged rather than failing the figure.
pub fn compose_side_by_side(
    left: &RgbaImage,
    right: &RgbaImage,
    options: &ComposeOptions,
) -> RgbImage {
    let panel_height = left.height().max(right.height());
    let left = scale_to_height(left, panel_height);
    let right = scale_to_height(right, panel_height);

    let gutter = options.gutter;
    let strip = if options.title.is_some() {
        options.title_height
    } else {
        0
    };
    let width = gutter * 3 + left.width() + right.width();
    let height = strip + panel_height + gutter * 2;

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let top = i64::from(strip + gutter);
    imageops::overlay(&mut canvas, &left, i64::from(gutter), top);
    imageops::overlay(
        &mut canvas,
        &right,
        i64::from(gutter * 2 + left.width()),
        top,
    );

    let mut flattened = DynamicImage::ImageRgba8(canvas).to_rgb8();
    if let Some(title) = options.title.as_deref() {
        if strip > 0 {
            if let Err(err) = draw_title(&mut flattened, title, strip) {
                warn!(title, error = %err, "title strip left blank");
            }
        }
    }
    flattened
}

fn draw_title(buffer: &mut RgbImage, title: &str, strip_height: u32) -> Result<(), LfigError> {
    let (width, height) = buffer.dimensions();
    let root = BitMapBackend::with_buffer(&mut **buffer, (width, height)).into_drawing_area();
    let font_size = f64::from((strip_height * 2 / 5).max(10));
    let style = ("sans-serif", font_size)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        title.to_string(),
        ((width / 2) as i32, (strip_height / 2) as i32),
        style,
    ))
    .map_err(render_error)?;
    root.present().map_err(render_error)?;
    Ok(())
}

/// Writes `image` as PNG, creating the parent directory when needed.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<(), LfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| LfigError::io(err, parent))?;
    }
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|err| {
            LfigError::Render(ErrorInfo::new(codes::RENDER, err.to_string()).with_path(path))
        })
}
