use std::{ops::Range, path::Path};

use super::{error::ExportError, table::Table};

/// A line plot of one column against another
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub x_label: String,
    pub y_label: String,
    /// Points sorted by x, one per distinct x
    pub points: Vec<(f64, f64)>,
}

impl Figure {
    /// Plot column `y` against column `x`.
    ///
    /// Rows with a NaN in either column are dropped, the rest are sorted by x, and rows that
    /// share an x are averaged into one point.
    pub fn line(table: &Table, x: &str, y: &str) -> Result<Self, ExportError> {
        let xs = table.column(x)?;
        let ys = table.column(y)?;

        let mut rows: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .map(|(a, b)| (*a, *b))
            .filter(|(a, b)| !a.is_nan() && !b.is_nan())
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut points: Vec<(f64, f64)> = Vec::with_capacity(rows.len());
        let mut count = 0usize;
        for (px, py) in rows {
            match points.last_mut() {
                Some(last) if last.0 == px => {
                    count += 1;
                    last.1 += (py - last.1) / count as f64;
                }
                _ => {
                    points.push((px, py));
                    count = 1;
                }
            }
        }

        Ok(Self {
            x_label: x.to_string(),
            y_label: y.to_string(),
            points,
        })
    }

    /// `{y}_per_{x}.png`
    pub fn file_name(&self) -> String {
        format!("{}_per_{}.png", self.y_label, self.x_label)
    }

    /// Range of x values, widened when degenerate
    pub fn x_range(&self) -> Range<f64> {
        span(self.points.iter().map(|p| p.0))
    }

    /// Range of y values, widened when degenerate
    pub fn y_range(&self) -> Range<f64> {
        span(self.points.iter().map(|p| p.1))
    }
}

fn span(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        0.0..1.0
    } else if lo == hi {
        lo - 0.5..hi + 0.5
    } else {
        lo..hi
    }
}

/// Persists figures
pub trait Renderer {
    fn render(&self, figure: &Figure, path: &Path) -> Result<(), ExportError>;
}

#[cfg(feature = "plot")]
pub use self::bitmap::PngRenderer;

#[cfg(feature = "plot")]
mod bitmap {
    use std::path::Path;

    use plotters::{
        backend::BitMapBackend,
        chart::ChartBuilder,
        drawing::IntoDrawingArea,
        series::LineSeries,
        style::{Color, IntoFont, RGBColor, WHITE},
    };

    use super::{Figure, Renderer};
    use crate::metrics::error::ExportError;

    const LINE: RGBColor = RGBColor(31, 119, 180);

    fn render_err(e: impl std::fmt::Display) -> ExportError {
        ExportError::Render(e.to_string())
    }

    /// Draws figures as PNG line plots
    #[derive(Debug, Clone, Copy)]
    pub struct PngRenderer {
        pub size: (u32, u32),
    }

    impl Default for PngRenderer {
        fn default() -> Self {
            Self { size: (640, 480) }
        }
    }

    impl Renderer for PngRenderer {
        fn render(&self, figure: &Figure, path: &Path) -> Result<(), ExportError> {
            let root = BitMapBackend::new(path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(60)
                .build_cartesian_2d(figure.x_range(), figure.y_range())
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc(figure.x_label.as_str())
                .y_desc(figure.y_label.as_str())
                .axis_desc_style(("sans-serif", 16).into_font())
                .draw()
                .map_err(render_err)?;

            chart
                .draw_series(LineSeries::new(
                    figure.points.iter().copied(),
                    LINE.stroke_width(2),
                ))
                .map_err(render_err)?;

            root.present().map_err(render_err)?;
            Ok(())
        }
    }
}
