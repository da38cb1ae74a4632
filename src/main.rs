use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use synthequity::{
    scenario::ScenarioLoader, snapshot::SnapshotWriter, Coordinate, FacilityId, FacilityKind,
    SimulationBuilder, SimulationStats,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Healthcare access disparity runner")]
struct Cli {
    /// Scenario YAML file (built-in catalog when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// City to select, by name or prefix
    #[arg(long)]
    city: Option<String>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Add a facility, formatted as LAT,LNG[,KIND]; repeatable
    #[arg(long = "add", value_name = "LAT,LNG[,KIND]")]
    add: Vec<String>,

    /// Remove a facility by id; repeatable
    #[arg(long = "remove", value_name = "ID")]
    remove: Vec<String>,

    /// Write a JSON snapshot of the final state into this directory
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// List the cities in the scenario and exit
    #[arg(long)]
    list_cities: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let loader = ScenarioLoader::new(".");
    let scenario = loader.load_or_builtin(cli.scenario.as_ref())?;

    if cli.list_cities {
        for city in &scenario.cities {
            println!(
                "{:<20} zoom {:>2}  facilities {:>2}  ({:.4}, {:.4})",
                city.name, city.zoom, city.initial_facility_count, city.center.lat, city.center.lng
            );
        }
        return Ok(());
    }

    let mut builder = SimulationBuilder::new(scenario);
    if let Some(city) = &cli.city {
        builder = builder.with_city(city.clone());
    }
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }
    let mut simulation = builder.build()?;

    for spec in &cli.add {
        let (location, kind) = parse_facility(spec)?;
        simulation.add_facility(location, kind);
    }
    for id in &cli.remove {
        simulation.remove_facility(&FacilityId::from(id.as_str()))?;
    }

    let world = simulation.world();
    println!(
        "Scenario: {} (model {})",
        simulation.scenario().name,
        simulation.model().coefficients().version
    );
    println!("City: {}", world.city().name);
    print_stats(world.stats());
    if let Some(delta) = world.stats_delta() {
        println!(
            "Change since previous: disparity {:+.2}, coverage {:+.2}%",
            delta.average_disparity, delta.coverage_percentage
        );
    }

    if let Some(dir) = cli.snapshot_dir {
        let mut writer = SnapshotWriter::new(dir);
        let path = writer.write(world, simulation.seed())?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

fn parse_facility(spec: &str) -> Result<(Coordinate, FacilityKind)> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() < 2 || parts.len() > 3 {
        bail!("facility '{spec}' must be LAT,LNG[,KIND]");
    }
    let lat: f64 = parts[0]
        .parse()
        .with_context(|| format!("invalid latitude in '{spec}'"))?;
    let lng: f64 = parts[1]
        .parse()
        .with_context(|| format!("invalid longitude in '{spec}'"))?;
    if !lat.is_finite() || !lng.is_finite() {
        bail!("facility '{spec}' has a non-finite coordinate");
    }
    let kind = match parts.get(2) {
        Some(kind) => kind.parse().unwrap_or(FacilityKind::Base),
        None => FacilityKind::Clinic,
    };
    Ok((Coordinate::new(lat, lng), kind))
}

fn print_stats(stats: &SimulationStats) {
    println!("Population:          {}", stats.total_population);
    println!("Average disparity:   {:.2}", stats.average_disparity);
    println!("Max disparity:       {:.2}", stats.max_disparity);
    println!("Coverage (<3 km):    {:.1}%", stats.coverage_percentage);
    println!(
        "Facilities:          {} (base {}, clinic {}, kiosk {})",
        stats.total_facilities, stats.base_count, stats.clinic_count, stats.kiosk_count
    );
}
