//! Plan sketch layout and SVG output
//!
//! The parcel is fitted onto an A4 portrait sheet in page points (1/72 inch,
//! origin bottom-left, y up). Layout is done in projected metres so the
//! printed scale is a true ratio. SVG output flips y at write time.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ParcelReport;
use super::table::format_thousands;
use crate::domain::Point;
use crate::geometry::{Boundary, Frame, Scaler};

/// Metres per page point
const METERS_PER_POINT: f64 = 0.0254 / 72.0;

/// Page geometry and placement rules for the sketch
#[derive(Debug, Clone)]
pub struct PageSpec {
    pub width: f64,
    pub height: f64,
    /// Horizontal space kept free across both side margins
    pub side_margins: f64,
    /// Vertical space kept free for the title block and footer
    pub vertical_reserve: f64,
    /// Fraction of the free area the parcel may fill
    pub fill: f64,
    /// Drawing centre is shifted down by this much to clear the title block
    pub center_drop: f64,
    pub north_arrow_length: f64,
    pub scale_bar_width: f64,
}

impl PageSpec {
    pub fn a4() -> Self {
        Self {
            width: 595.2756,
            height: 841.8898,
            side_margins: 100.0,
            vertical_reserve: 200.0,
            fill: 0.6,
            center_drop: 30.0,
            north_arrow_length: 70.0,
            scale_bar_width: 100.0,
        }
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::a4()
    }
}

/// Text placed on the sketch besides the beacon labels
#[derive(Debug, Clone)]
pub struct SketchLabels {
    pub title: String,
    pub origin: String,
}

impl Default for SketchLabels {
    fn default() -> Self {
        Self {
            title: "PLAN SHEWING LANDED PROPERTY".to_string(),
            origin: "ORIGIN: LOCAL GRID".to_string(),
        }
    }
}

/// Parcel placed on a page, ready to draw
#[derive(Debug, Clone)]
pub struct SketchLayout {
    pub page: PageSpec,
    /// Beacon positions on the page, closing vertex excluded
    pub beacons: Vec<(f64, f64)>,
    /// Tip of the north arrow drawn up from P1
    pub north_tip: (f64, f64),
    /// Printed scale as 1:N
    pub scale_denominator: f64,
    /// Ground length represented by the scale bar, metres
    pub scale_bar_meters: f64,
}

impl SketchLayout {
    pub fn fit(boundary: &Boundary, page: &PageSpec) -> Self {
        let frame = Frame {
            width: page.width - page.side_margins,
            height: page.height - page.vertical_reserve,
            center: (page.width / 2.0, page.height / 2.0 - page.center_drop),
            fill: page.fill,
        };
        let scaler = Scaler::fit(&boundary.bounds(), &frame);

        let coords: Vec<(f64, f64)> = boundary.beacons().iter().map(Point::as_tuple).collect();
        let beacons = scaler.scale_points(&coords);
        let (x1, y1) = beacons[0];

        let points_per_meter = scaler.scale_factor();
        Self {
            page: page.clone(),
            north_tip: (x1, y1 + page.north_arrow_length),
            scale_denominator: (1.0 / (points_per_meter * METERS_PER_POINT)).round(),
            scale_bar_meters: page.scale_bar_width / points_per_meter,
            beacons,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the sketch as an SVG document
pub fn render_svg(layout: &SketchLayout, report: &ParcelReport, labels: &SketchLabels) -> String {
    let page = &layout.page;
    // Flip page y (up) into SVG y (down)
    let fy = |y: f64| page.height - y;
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}pt" height="{h:.2}pt" viewBox="0 0 {w:.2} {h:.2}">"#,
        w = page.width,
        h = page.height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    // Title block, right-aligned
    let title_lines = [
        labels.title.as_str(),
        "OF",
        "----------------------------------",
        "AT",
        "-----------------------------------",
        "-----------------------------------",
        "-----------------------------------",
        "------------------------------------",
    ];
    for (i, line) in title_lines.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" font-family="Helvetica" font-weight="bold" font-size="12">{}</text>"#,
            page.width - 40.0,
            fy(page.height - 50.0 - i as f64 * 24.0),
            escape(line)
        );
    }

    // Boundary
    let path: Vec<String> = layout
        .beacons
        .iter()
        .map(|&(x, y)| format!("{:.2},{:.2}", x, fy(y)))
        .collect();
    let _ = writeln!(
        svg,
        r#"<polygon points="{}" fill="none" stroke="black" stroke-width="2"/>"#,
        path.join(" ")
    );

    // Beacons
    for (i, &(x, y)) in layout.beacons.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.2}" cy="{:.2}" r="3" fill="red"/>"#,
            x,
            fy(y)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-family="Helvetica" font-size="10">P{}</text>"#,
            x + 5.0,
            fy(y + 2.0),
            i + 1
        );
    }

    // North arrow above P1
    let (x1, y1) = layout.beacons[0];
    let (nx, ny) = layout.north_tip;
    let _ = writeln!(
        svg,
        r#"<path d="M {:.2} {:.2} L {:.2} {:.2} M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2}" fill="none" stroke="black" stroke-width="1.5"/>"#,
        x1,
        fy(y1),
        nx,
        fy(ny),
        nx - 5.0,
        fy(ny - 10.0),
        nx,
        fy(ny),
        nx + 5.0,
        fy(ny - 10.0)
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="Helvetica" font-weight="bold" font-size="10">N</text>"#,
        nx,
        fy(ny + 10.0)
    );

    // Scale bar
    let half_bar = page.scale_bar_width / 2.0;
    let _ = writeln!(
        svg,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black"/>"#,
        page.width / 2.0 - half_bar,
        fy(50.0),
        page.width / 2.0 + half_bar,
        fy(50.0)
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="Helvetica" font-size="10">SCALE 1:{} ({} m)</text>"#,
        page.width / 2.0,
        fy(35.0),
        format_thousands(layout.scale_denominator, 0),
        format_thousands(layout.scale_bar_meters, 1)
    );

    // Footer
    let _ = writeln!(
        svg,
        r#"<text x="50" y="{:.2}" font-family="Helvetica" font-size="10">{}</text>"#,
        fy(20.0),
        escape(&labels.origin)
    );
    let _ = writeln!(
        svg,
        r#"<text x="250" y="{:.2}" font-family="Helvetica" font-weight="bold" font-size="12" fill="red">AREA = {} m²</text>"#,
        fy(20.0),
        format_thousands(report.area, 2)
    );

    svg.push_str("</svg>\n");
    svg
}

/// Write the sketch SVG to `path`
pub fn write_svg(
    path: &Path,
    layout: &SketchLayout,
    report: &ParcelReport,
    labels: &SketchLabels,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create sketch file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(render_svg(layout, report, labels).as_bytes())?;
    writer.flush()?;

    Ok(())
}
