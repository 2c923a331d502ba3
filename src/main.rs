use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use quaymap::config::FileConfig;
use quaymap::dataset::{load_moorings, load_quays, load_shipyard, load_typhoons};
use quaymap::geometry::PixelPoint;
use quaymap::mooring::{MooringIndex, aggregate};
use quaymap::render::{SceneDocument, write_json, write_svg};
use quaymap::scene::{SceneBuilder, ViewportState};
use quaymap::selection::{Selection, TyphoonCatalog, mooring_key, moorings_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

/// Render quay mooring safety status onto the shipyard map
///
/// Examples:
///   # Render the first schedule of the first typhoon on record
///   quaymap --shipyard shipyard.json --quays quays.json --moorings moorings.json --typhoons typhoons.json
///
///   # Pick a specific forecast revision and write JSON
///   quaymap --config quaymap.toml --year 2019 --typhoon "13호_LINGLING" --schedule 09-06-R2 -f json
///
///   # Override the wind speed and inspect the quay under a pointer
///   quaymap --config quaymap.toml --speed 32 --pointer 640,410
#[derive(Parser, Debug)]
#[command(name = "quaymap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches quaymap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shipyard geometry export (JSON)
    #[arg(long)]
    shipyard: Option<PathBuf>,

    /// Quay placement list (JSON)
    #[arg(long)]
    quays: Option<PathBuf>,

    /// Mooring schedule records (JSON)
    #[arg(long)]
    moorings: Option<PathBuf>,

    /// Typhoon forecast revisions (JSON)
    #[arg(long)]
    typhoons: Option<PathBuf>,

    /// Year to select (defaults to the first year on record)
    #[arg(long)]
    year: Option<String>,

    /// Typhoon key to select, e.g. "13호_LINGLING"
    #[arg(long)]
    typhoon: Option<String>,

    /// Schedule key to select, e.g. "09-06-R2"
    #[arg(long)]
    schedule: Option<String>,

    /// Forecast wind speed, overriding the selected typhoon's speed
    #[arg(long)]
    speed: Option<f64>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Output file path (defaults to quaymap.svg or quaymap.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "svg")]
    format: OutputFormat,

    /// Screen pointer "x,y" to resolve to a quay popup
    #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
    pointer: Option<PixelPoint>,

    /// List the year / typhoon / schedule options and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_pointer(s: &str) -> Result<PixelPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {:?}", s))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("invalid x: {:?}", x))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("invalid y: {:?}", y))?;
    Ok(PixelPoint::new(x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = match args.config {
        Some(ref config_path) => {
            if !config_path.exists() {
                bail!("Config file not found: {:?}", config_path);
            }
            FileConfig::from_path(config_path)?
        }
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = args.verbose || file_config.verbose;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let datasets = &file_config.datasets;
    let shipyard_path = args
        .shipyard
        .clone()
        .or_else(|| datasets.shipyard.clone())
        .context("Missing shipyard export: pass --shipyard or set datasets.shipyard")?;
    let quays_path = args
        .quays
        .clone()
        .or_else(|| datasets.quays.clone())
        .context("Missing quay list: pass --quays or set datasets.quays")?;
    let moorings_path = args.moorings.clone().or_else(|| datasets.moorings.clone());
    let typhoons_path = args.typhoons.clone().or_else(|| datasets.typhoons.clone());

    let typhoons = match typhoons_path {
        Some(ref path) => timed("Loading typhoon infos...", || load_typhoons(path))?,
        None => Vec::new(),
    };
    let catalog = TyphoonCatalog::new(typhoons);

    if args.list {
        print_options(&catalog);
        return Ok(());
    }

    println!("quaymap - Quay Mooring Status Map");
    println!("=================================");
    println!();

    let selection = Selection {
        year: args.year.clone(),
        typhoon: args.typhoon.clone(),
        schedule: args.schedule.clone(),
    };
    let selected = catalog.resolve(&selection);
    if selected.is_none() && !catalog.is_empty() {
        bail!("No typhoon schedule matches {:?}; run with --list to see options", selection);
    }

    let typhoon_speed = match (args.speed, selected) {
        (Some(speed), _) => speed,
        (None, Some(info)) => info.speed,
        (None, None) => bail!("No typhoon selected: pass --typhoons or --speed"),
    };
    if let Some(info) = selected {
        println!(
            "Typhoon: {} ({}) key {} -> speed {}",
            info.name,
            info.year,
            mooring_key(info),
            typhoon_speed
        );
    }

    let facility = timed("Loading shipyard geometry...", || load_shipyard(&shipyard_path))?;
    let quays = timed("Loading quay geometry...", || load_quays(&quays_path))?;

    let records = match moorings_path {
        Some(ref path) => {
            let all = timed("Loading mooring schedules...", || load_moorings(path))?;
            match selected {
                Some(info) => moorings_for(&all, info),
                None => all,
            }
        }
        None => Vec::new(),
    };

    let summary = aggregate(&records, typhoon_speed);
    println!(
        "Mooring status: {} satisfied, {} impossible, {} editable ({} total)",
        summary.satisfied, summary.impossible, summary.editable, summary.total
    );

    let spinner = create_spinner("Building scene...");
    let start = Instant::now();
    let mut viewport_config = file_config.viewport.clone();
    if let Some(width) = args.width {
        viewport_config.width = width;
    }
    if let Some(height) = args.height {
        viewport_config.height = height;
    }
    viewport_config.validate()?;
    let viewport = ViewportState::from_config(&viewport_config);
    let index = MooringIndex::build(&records, typhoon_speed);
    let builder = SceneBuilder::new(&file_config.calibration, &file_config.palette);
    let scene = builder.build(&facility, &quays, &index, &viewport);
    spinner.finish_with_message(format!(
        "Built {} shapes, {} quays [{:.1}s]",
        scene.shapes.len(),
        scene.quays().count(),
        start.elapsed().as_secs_f32()
    ));

    if let Some(pointer) = args.pointer {
        match scene.select(pointer, &viewport, &index, &file_config.palette) {
            Some(popup) => {
                println!();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&popup).context("Failed to serialize popup")?
                );
            }
            None => println!("No moored quay at ({}, {})", pointer.x, pointer.y),
        }
    }

    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| match args.format {
            OutputFormat::Svg => PathBuf::from("quaymap.svg"),
            OutputFormat::Json => PathBuf::from("quaymap.json"),
        });

    match args.format {
        OutputFormat::Svg => {
            write_svg(&output_path, &scene, &viewport).context("Failed to write SVG file")?
        }
        OutputFormat::Json => {
            let document = SceneDocument {
                typhoon_speed,
                summary,
                scene: &scene,
            };
            write_json(&output_path, &document).context("Failed to write JSON file")?
        }
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!("Output: {}", output_path.display());

    Ok(())
}

fn print_options(catalog: &TyphoonCatalog) {
    if catalog.is_empty() {
        println!("No typhoon infos loaded (pass --typhoons)");
        return;
    }
    for year in catalog.years() {
        println!("{}", year);
        for typhoon in catalog.typhoons(&year) {
            println!("  {}", typhoon);
            for schedule in catalog.schedules(&year, &typhoon) {
                println!("    {}", schedule);
            }
        }
    }
}

fn timed<T, E>(message: &str, load: impl FnOnce() -> Result<T, E>) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let spinner = create_spinner(message);
    let start = Instant::now();
    let value = load()?;
    spinner.finish_with_message(format!(
        "{} done [{:.1}s]",
        message.trim_end_matches("..."),
        start.elapsed().as_secs_f32()
    ));
    Ok(value)
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
