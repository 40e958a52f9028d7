use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use parcelplot::config::{FileConfig, SketchConfig};
use parcelplot::input::{parse_pair, parse_points};
use parcelplot::report::sketch::SketchLabels;
use parcelplot::report::{PageSpec, SketchLayout, format_table, to_geojson, write_svg};
use parcelplot::{AngleMode, Hemisphere, ParcelReport, Point, Projector, SurveyOptions};

/// Compute parcel area and traverse sheets from UTM beacon coordinates
///
/// Examples:
///   # Beacons from a CSV file (easting,northing per line), UTM zone 32N
///   parcelplot beacons.csv
///
///   # Beacons on the command line, with a JSON report and a plan sketch
///   parcelplot -p 500000,4649776 -p 500030,4649776 -p 500030,4649806 --json parcel.json --sketch parcel.svg
///
///   # Southern hemisphere, treat the first turning angle as cyclic
///   parcelplot beacons.csv --zone 36 --hemisphere south --angle-mode cyclic
///
///   # Local grid coordinates, no reprojection
///   parcelplot beacons.txt --local
#[derive(Parser, Debug)]
#[command(name = "parcelplot")]
#[command(version, about, long_about = None)]
struct Args {
    /// Beacon file, one "easting,northing" pair per line ("-" reads stdin)
    input: Option<PathBuf>,

    /// Beacon as "easting,northing"; repeat in traverse order
    #[arg(short = 'p', long = "point", allow_hyphen_values = true)]
    points: Vec<String>,

    /// Path to config file (optional, auto-searches parcelplot.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// UTM zone of the coordinates (1-60)
    #[arg(short = 'z', long)]
    zone: Option<u8>,

    /// Hemisphere of the UTM zone
    #[arg(long)]
    hemisphere: Option<Hemisphere>,

    /// Coordinates are on a local grid: skip reprojection and GeoJSON output
    #[arg(long)]
    local: bool,

    /// Turning angle at the first beacon: open (none) or cyclic (from the closing edge)
    #[arg(long)]
    angle_mode: Option<AngleMode>,

    /// Decimal places in the printed sheet
    #[arg(long)]
    precision: Option<usize>,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the parcel and beacons as GeoJSON (WGS84)
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Write a plan sketch as SVG
    #[arg(long)]
    sketch: Option<PathBuf>,

    /// Title line for the plan sketch
    #[arg(long)]
    title: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        FileConfig::from_path(config_path)?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let zone = args.zone.unwrap_or(file_config.zone);
    let hemisphere = args.hemisphere.unwrap_or(file_config.hemisphere);
    let angle_mode = args.angle_mode.unwrap_or(file_config.angle_mode);
    let precision = args.precision.unwrap_or(file_config.precision);
    let verbose = args.verbose || file_config.verbose;
    let sketch_config = file_config.sketch.clone().unwrap_or_default();

    if args.geojson.is_some() && args.local {
        bail!("--geojson needs geographic coordinates and cannot be used with --local");
    }

    let projector = if args.local {
        None
    } else {
        Some(
            Projector::utm(zone, hemisphere)
                .with_context(|| format!("UTM zone must be between 1 and 60, got {}", zone))?,
        )
    };

    if verbose {
        println!("Configuration:");
        match projector {
            Some(ref p) => println!("  CRS: EPSG:{}", p.epsg()),
            None => println!("  CRS: local grid"),
        }
        println!("  Angle mode: {:?}", angle_mode);
        println!("  Precision: {}", precision);
        println!();
    }

    let points = collect_points(args.input.as_deref(), &args.points)?;
    info!(beacons = points.len(), "read beacons");

    let options = SurveyOptions {
        angle_mode,
        projector: projector.clone(),
    };
    let report = ParcelReport::build(&points, &options).context("Cannot compute parcel")?;

    println!("parcelplot - Parcel Traverse Sheet");
    println!("==================================");
    println!();
    print!("{}", format_table(&report, precision));

    if let Some(ref geo) = report.geographic {
        println!(
            "Map view:  {:.6}, {:.6} (zoom {:.1})",
            geo.view.latitude, geo.view.longitude, geo.view.zoom
        );
    }
    println!();

    if let Some(ref path) = args.json {
        let spinner = create_spinner("Writing JSON report...");
        let json = report.to_json().context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
        spinner.finish_with_message(format!("Wrote {}", path.display()));
    }

    if let Some(ref path) = args.geojson {
        let spinner = create_spinner("Writing GeoJSON...");
        let doc = to_geojson(&report).context("Report has no geographic coordinates")?;
        let text = serde_json::to_string_pretty(&doc).context("Failed to serialize GeoJSON")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write GeoJSON: {}", path.display()))?;
        spinner.finish_with_message(format!("Wrote {}", path.display()));
    }

    if let Some(ref path) = args.sketch {
        let spinner = create_spinner("Laying out plan sketch...");
        let layout = SketchLayout::fit(&report.boundary, &PageSpec::a4());
        let labels = sketch_labels(&sketch_config, args.title.clone(), projector.as_ref());
        write_svg(path, &layout, &report, &labels).context("Failed to write plan sketch")?;
        spinner.finish_with_message(format!(
            "Wrote {} (scale 1:{:.0})",
            path.display(),
            layout.scale_denominator
        ));
    }

    debug!(
        elapsed_ms = total_start.elapsed().as_millis() as u64,
        "done"
    );

    Ok(())
}

/// Beacons from the input file (if any) followed by `--point` values
fn collect_points(input: Option<&Path>, flags: &[String]) -> Result<Vec<Point>> {
    let mut points = match input {
        Some(path) => {
            let text = read_input(path)?;
            parse_points(&text)
                .with_context(|| format!("Failed to read beacons from {}", path.display()))?
        }
        None => Vec::new(),
    };

    for (i, flag) in flags.iter().enumerate() {
        let point = parse_pair(flag, i + 1)
            .with_context(|| format!("Invalid --point value {:?}", flag))?;
        points.push(point);
    }

    if points.is_empty() {
        bail!("No beacons given: pass a coordinate file or at least three --point values");
    }

    Ok(points)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read beacons from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read beacon file: {}", path.display()))
}

fn sketch_labels(
    config: &SketchConfig,
    title: Option<String>,
    projector: Option<&Projector>,
) -> SketchLabels {
    let origin = config.origin_label.clone().unwrap_or_else(|| match projector {
        Some(p) => format!(
            "ORIGIN: UTM ZONE {}{}",
            p.zone(),
            match p.hemisphere() {
                Hemisphere::North => "N",
                Hemisphere::South => "S",
            }
        ),
        None => SketchLabels::default().origin,
    });

    SketchLabels {
        title: title.unwrap_or_else(|| config.title.clone()),
        origin,
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
