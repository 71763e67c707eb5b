//! quakemap CLI - earthquake attribution and threat exploration

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use quakemap_algorithms::attribution::{attribute_countries, AttributionParams};
use quakemap_algorithms::marker::{build_hazard_markers, build_place_markers, MarkerParams, MarkerRef};
use quakemap_algorithms::selection::{MarkerLayers, PointerEvent, ProjectedHitTest, SelectionController};
use quakemap_algorithms::summary::summarize_quakes;
use quakemap_algorithms::thematic::{shade_regions, ShadeParams};
use quakemap_algorithms::threat::ThreatParams;
use quakemap_core::io::{read_indicator_csv, read_point_features, read_regions};
use quakemap_core::{Feature, Region};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "quakemap")]
#[command(author, version, about = "Earthquake attribution and threat exploration", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count quakes per country and in the ocean
    Summary {
        /// Country boundaries (GeoJSON FeatureCollection)
        #[arg(long)]
        countries: PathBuf,
        /// Earthquake feed (GeoJSON FeatureCollection)
        #[arg(long)]
        quakes: PathBuf,
        /// Order countries by count instead of by name
        #[arg(long)]
        ranked: bool,
        /// Skip the bounding-box prefilter
        #[arg(long)]
        no_prefilter: bool,
    },
    /// Pin a city and list the quakes whose threat circle reaches it
    Threats {
        /// Country boundaries (GeoJSON FeatureCollection)
        #[arg(long)]
        countries: PathBuf,
        /// Earthquake feed (GeoJSON FeatureCollection)
        #[arg(long)]
        quakes: PathBuf,
        /// City points (GeoJSON FeatureCollection with a `name` property)
        #[arg(long)]
        cities: PathBuf,
        /// City to pin (case-insensitive)
        #[arg(long)]
        city: String,
        /// Threat circle growth per magnitude step
        #[arg(long, default_value = "1.8")]
        growth: f64,
    },
    /// Colour each country by an indicator table
    Shade {
        /// Country boundaries (GeoJSON FeatureCollection)
        #[arg(long)]
        countries: PathBuf,
        /// Indicator CSV (country name, country code, ..., value)
        #[arg(long)]
        indicator: PathBuf,
        /// Indicator value mapped to the reddest colour
        #[arg(long, default_value = "40")]
        value_min: f64,
        /// Indicator value mapped to the bluest colour
        #[arg(long, default_value = "90")]
        value_max: f64,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn load_regions(path: &Path) -> Result<Vec<Region>> {
    let pb = spinner("Reading countries...");
    let regions = read_regions(path)
        .with_context(|| format!("Failed to read countries from {}", path.display()))?;
    pb.finish_and_clear();
    info!("Countries: {}", regions.len());
    Ok(regions)
}

fn load_points(path: &Path, what: &str) -> Result<Vec<Feature>> {
    let pb = spinner(&format!("Reading {}...", what));
    let features = read_point_features(path)
        .with_context(|| format!("Failed to read {} from {}", what, path.display()))?;
    pb.finish_and_clear();
    info!("{}: {}", what, features.len());
    Ok(features)
}

fn attribute(features: &mut [Feature], regions: &[Region], params: &AttributionParams) {
    let pb = spinner("Attributing countries...");
    let report = attribute_countries(features, regions, params);
    pb.finish_and_clear();
    info!("On land: {}, off land: {}", report.on_land, report.off_land);
}

fn done(elapsed: std::time::Duration) {
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Summary {
            countries,
            quakes,
            ranked,
            no_prefilter,
        } => {
            let regions = load_regions(&countries)?;
            let mut features = load_points(&quakes, "quakes")?;
            let start = Instant::now();

            let params = AttributionParams {
                bbox_prefilter: !no_prefilter,
            };
            attribute(&mut features, &regions, &params);
            let hazards = build_hazard_markers(features, &MarkerParams::default())
                .context("Invalid quake feed")?;
            let summary = summarize_quakes(&hazards);

            if ranked {
                for (name, count) in summary.ranked() {
                    println!("{}: {}", name, count);
                }
                println!("{}: {}", quakemap_algorithms::summary::OCEAN_LABEL, summary.ocean);
            } else {
                println!("{}", summary);
            }
            println!("Total: {}", summary.total());
            done(start.elapsed());
        }

        Commands::Threats {
            countries,
            quakes,
            cities,
            city,
            growth,
        } => {
            let regions = load_regions(&countries)?;
            let mut quake_features = load_points(&quakes, "quakes")?;
            let mut city_features = load_points(&cities, "cities")?;
            let start = Instant::now();

            let params = AttributionParams::default();
            attribute(&mut quake_features, &regions, &params);
            attribute(&mut city_features, &regions, &params);

            let marker_params = MarkerParams {
                threat: ThreatParams {
                    growth,
                    ..ThreatParams::default()
                },
                ..MarkerParams::default()
            };
            marker_params.threat.validate()?;
            let hazards = build_hazard_markers(quake_features, &marker_params).context("Invalid quake feed")?;
            let places = build_place_markers(city_features).context("Invalid city data")?;

            let Some(index) = places.iter().position(|p| p.name().eq_ignore_ascii_case(&city)) else {
                bail!("City '{}' not found in {}", city, cities.display());
            };

            let mut layers = MarkerLayers::new(hazards, places);
            let view = ProjectedHitTest::default();
            let (x, y) = view.project(&layers.places[index].location());

            // Only the requested city answers the click, whatever shares its pixels.
            let target = layers.places[index].name().to_string();
            let only_target = |m: MarkerRef<'_>, _x: f32, _y: f32| matches!(m, MarkerRef::Place(p) if p.name() == target);

            let mut selection = SelectionController::new();
            selection.handle(PointerEvent::Clicked { x, y }, &mut layers, &only_target);

            let pinned = &layers.places[index];
            println!("{} at ({:.1}, {:.1})", pinned.title(), x, y);

            let threats: Vec<_> = layers.hazards.iter().filter(|h| !h.view.hidden).collect();
            if threats.is_empty() {
                println!("No quake threatens {}", pinned.name());
            } else {
                println!("{} quake(s) threaten {}:", threats.len(), pinned.name());
                for hazard in &threats {
                    let distance = hazard.location().distance_km(&pinned.location());
                    println!(
                        "  {} [{:?}, {:?}] {:.0} km away, reach {:.0} km",
                        hazard.title(),
                        hazard.magnitude_class(),
                        hazard.depth_class(),
                        distance,
                        hazard.threat_radius_km()
                    );
                }
            }
            println!("Offshore links: {}", selection.threat_links(&layers).len());
            done(start.elapsed());
        }

        Commands::Shade {
            countries,
            indicator,
            value_min,
            value_max,
        } => {
            let regions = load_regions(&countries)?;
            let values = read_indicator_csv(&indicator)
                .with_context(|| format!("Failed to read indicator from {}", indicator.display()))?;
            info!("Indicator rows: {}", values.len());

            let params = ShadeParams {
                value_min,
                value_max,
                ..ShadeParams::default()
            };
            params.validate()?;
            for (name, rgb) in shade_regions(&regions, &values, &params) {
                println!("{}: #{:02x}{:02x}{:02x}", name, rgb.r, rgb.g, rgb.b);
            }
        }
    }

    Ok(())
}
