use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::model::{Rgb, Unit};
use crate::pipeline::TickLabel;
use crate::pipeline::stage1_pairwise::{BOX_WIDTH, BoxPlotLayout};
use crate::pipeline::stage2_scan::LinePlotLayout;

pub const PAIRWISE_FIGURE: &str = "pairwise_error.pdf";
pub const SCAN_FIGURE: &str = "parameter_scan.pdf";
pub const PAIRWISE_SVG: &str = "pairwise_error.svg";
pub const SCAN_SVG: &str = "parameter_scan.svg";
pub const FIGURE_SIZE: (u32, u32) = (640, 480);

const FONT: &str = "sans-serif";
const TICK_LEN: i32 = 5;
const FLIER_RADIUS: i32 = 3;
const MARKER_RADIUS: i32 = 4;

type Root<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to draw {figure}: {message}")]
    Draw {
        figure: &'static str,
        message: String,
    },
    #[error("failed to convert {} to PDF: {message}", path.display())]
    Pdf { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy)]
pub struct FigureOptions {
    pub unit: Unit,
    /// Also keep the intermediate SVG next to the PDF.
    pub keep_svg: bool,
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Writes the grouped box plot as PDF (plus SVG on request); existing files are overwritten.
/// The PDF path comes first in the returned list.
pub fn render_pairwise(
    layout: &BoxPlotLayout,
    options: FigureOptions,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let svg = pairwise_svg(layout, options.unit)?;
    let written = write_figure(&svg, out_dir, PAIRWISE_FIGURE, PAIRWISE_SVG, options.keep_svg)?;
    tracing::info!("wrote {} ({} boxes)", written[0].display(), layout.boxes.len());
    Ok(written)
}

pub fn render_scan(
    layout: &LinePlotLayout,
    options: FigureOptions,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let svg = scan_svg(layout, options.unit)?;
    let written = write_figure(&svg, out_dir, SCAN_FIGURE, SCAN_SVG, options.keep_svg)?;
    tracing::info!("wrote {} ({} series)", written[0].display(), layout.groups.len());
    Ok(written)
}

pub fn pairwise_svg(layout: &BoxPlotLayout, unit: Unit) -> Result<String, RenderError> {
    let mut svg = String::new();
    draw_pairwise(layout, unit, &mut svg).map_err(|e| RenderError::Draw {
        figure: PAIRWISE_FIGURE,
        message: e.to_string(),
    })?;
    Ok(svg)
}

pub fn scan_svg(layout: &LinePlotLayout, unit: Unit) -> Result<String, RenderError> {
    let mut svg = String::new();
    draw_scan(layout, unit, &mut svg).map_err(|e| RenderError::Draw {
        figure: SCAN_FIGURE,
        message: e.to_string(),
    })?;
    Ok(svg)
}

fn write_figure(
    svg: &str,
    out_dir: &Path,
    pdf_name: &str,
    svg_name: &str,
    keep_svg: bool,
) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(out_dir)?;
    let pdf_path = out_dir.join(pdf_name);
    let pdf = svg_to_pdf(svg).map_err(|message| RenderError::Pdf {
        path: pdf_path.clone(),
        message,
    })?;
    fs::write(&pdf_path, pdf)?;

    let mut written = vec![pdf_path];
    if keep_svg {
        let svg_path = out_dir.join(svg_name);
        fs::write(&svg_path, svg)?;
        written.push(svg_path);
    }
    Ok(written)
}

/// Text is laid out with system fonts; labels whose font cannot be resolved are left out.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| e.to_string())?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| format!("{e:?}"))
}

fn draw_pairwise(layout: &BoxPlotLayout, unit: Unit, out: &mut String) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::with_string(out, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x0, x1) = layout.x_range;
    let (y0, y1) = layout.y_range;
    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc(format!("Pairwise error [{}]", unit.symbol()))
        .draw()?;

    let half = BOX_WIDTH / 2.0;
    let cap = half / 2.0;
    for glyph in &layout.boxes {
        let color = rgb(glyph.color);
        let x = glyph.position;
        let s = &glyph.stats;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half, s.q1), (x + half, s.q3)],
            color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half, s.q1), (x + half, s.q3)],
            BLACK.stroke_width(1),
        )))?;
        chart.draw_series([
            PathElement::new(vec![(x, s.q3), (x, s.whisker_hi)], BLACK.stroke_width(1)),
            PathElement::new(vec![(x, s.q1), (x, s.whisker_lo)], BLACK.stroke_width(1)),
            PathElement::new(
                vec![(x - cap, s.whisker_hi), (x + cap, s.whisker_hi)],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![(x - cap, s.whisker_lo), (x + cap, s.whisker_lo)],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![(x - half, s.median), (x + half, s.median)],
                BLACK.stroke_width(2),
            ),
        ])?;
        chart.draw_series(
            s.fliers
                .iter()
                .map(|&y| Circle::new((x, y), FLIER_RADIUS, color.filled())),
        )?;
        chart.draw_series(
            s.fliers
                .iter()
                .map(|&y| Circle::new((x, y), FLIER_RADIUS, BLACK.stroke_width(1))),
        )?;
    }

    draw_ticks(&root, &chart, &layout.ticks, y0, false)?;
    root.present()?;
    Ok(())
}

fn draw_scan(layout: &LinePlotLayout, unit: Unit, out: &mut String) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::with_string(out, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x0, x1) = layout.x_range;
    let (y0, y1) = layout.y_range;
    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .x_desc("Render Factor")
        .y_desc(format!("Distance to Human #1 [{}]", unit.symbol()))
        .draw()?;

    for group in &layout.groups {
        let color = rgb(group.color);
        chart
            .draw_series(LineSeries::new(
                group.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(group.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(
            group
                .points
                .iter()
                .map(|&p| Circle::new(p, MARKER_RADIUS, color.filled())),
        )?;
    }

    if !layout.groups.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    draw_ticks(&root, &chart, &layout.ticks, y0, true)?;
    root.present()?;
    Ok(())
}

// Tick labels go straight onto the root area so each one can carry its own colour.
fn draw_ticks(
    root: &Root<'_>,
    chart: &Chart<'_, '_>,
    ticks: &[TickLabel],
    y_axis: f64,
    rotated: bool,
) -> Result<(), Box<dyn Error>> {
    for tick in ticks {
        let (px, py) = chart.backend_coord(&(tick.x, y_axis));
        root.draw(&PathElement::new(
            vec![(px, py), (px, py + TICK_LEN)],
            BLACK.stroke_width(1),
        ))?;

        let color = rgb(tick.color);
        let style = if rotated {
            (FONT, 12)
                .into_font()
                .transform(FontTransform::Rotate270)
                .color(&color)
                .pos(Pos::new(HPos::Right, VPos::Center))
        } else {
            (FONT, 14)
                .into_font()
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Top))
        };
        root.draw(&Text::new(
            tick.text.clone(),
            (px, py + TICK_LEN + 3),
            style,
        ))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_render.rs"]
mod tests;
