//! Girderline command line.
//!
//! Loads a bridge description, lays out the points of interest of one girder,
//! and prints them in the requested coordinate system followed by any layout
//! diagnostics.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use girderline_config::PoiConfig;
use girderline_geometry::CoordinateSystem;
use girderline_layout::{PoiAgent, ValidationLevel};
use girderline_model::BridgeModel;
use girderline_poi::{PoiQuery, PointOfInterest};
use girderline_primitives::{GirderIndex, GirderKey, GroupIndex};
use tracing::info;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "girderline")]
#[command(about = "Lay out and list the points of interest of a precast girder")]
struct Args {
	/// Bridge description (TOML)
	#[arg(short, long, value_name = "PATH")]
	model: PathBuf,

	/// Engine settings (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Girder group
	#[arg(long, default_value_t = 0)]
	group: GroupIndex,

	/// Girder within the group
	#[arg(long, default_value_t = 0)]
	girder: GirderIndex,

	/// Coordinate system distances are reported in
	#[arg(short, long, default_value_t = CoordinateSystem::GirderPath)]
	system: CoordinateSystem,

	/// Also lay out load points
	#[arg(long)]
	loads: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

impl Args {
	fn level(&self) -> ValidationLevel {
		if self.loads {
			ValidationLevel::Loads
		} else {
			ValidationLevel::PointsOfInterest
		}
	}
}

fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let model = BridgeModel::load(&args.model)
		.with_context(|| format!("loading bridge description {}", args.model.display()))?;
	let config = match &args.config {
		Some(path) => PoiConfig::load(path).with_context(|| format!("loading settings {}", path.display()))?,
		None => PoiConfig::default(),
	};

	let girder = GirderKey::new(args.group, args.girder);
	info!(%girder, level = args.level().as_str(), "laying out girder");

	let agent = PoiAgent::new(model, config);
	let listed = agent
		.validate(girder, args.level())
		.and_then(|()| agent.points_of_interest(girder.all_segments(), &PoiQuery::all()));

	let mut out = io::stdout().lock();
	let status = match listed {
		Ok(points) => {
			for poi in &points {
				let coordinate = agent
					.coordinate(poi, args.system)
					.with_context(|| format!("converting {} to {}", poi.label(), args.system))?;
				writeln!(out, "{}", format_row(poi, coordinate))?;
			}
			ExitCode::SUCCESS
		}
		Err(error) if error.excludes_girder() => ExitCode::FAILURE,
		Err(error) => return Err(error).with_context(|| format!("laying out girder {girder}")),
	};

	for diagnostic in agent.diagnostics() {
		writeln!(io::stderr(), "error: {diagnostic}")?;
	}
	Ok(status)
}

/// One listing row: id, segment, segment distance, requested coordinate, label.
fn format_row(poi: &PointOfInterest, coordinate: f64) -> String {
	let id = poi.id().map_or_else(|| "-".to_owned(), |id| id.to_string());
	format!(
		"{id:>6}  {segment:<10}  {distance:>10.4}  {coordinate:>10.4}  {label}",
		segment = poi.segment().to_string(),
		distance = poi.distance(),
		label = poi.label(),
	)
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("girderline_layout=trace,debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(verbose)
		.init();
}
