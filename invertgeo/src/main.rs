extern crate clap;
extern crate geometry_inverter;

mod output;

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::process::ExitCode;

use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use thiserror::Error;
use topojson::Topology;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geometry_inverter::editor::summarize;
use geometry_inverter::feature::layer_from_topology;
use geometry_inverter::feature::object_names;
use geometry_inverter::invert_layer;
use geometry_inverter::FeatureId;
use geometry_inverter::Scope;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Layer(#[from] geometry_inverter::Error),

    #[error("no object named; use --object NAME or --list")]
    NoObject,
}

fn command() -> Command {
    Command::new("invertgeo")
        .version("0.1")
        .about("Reverses the vertex order of the lines and polygons of a TopoJSON object.")
        .arg(
            Arg::new("INPUT")
                .short('i')
                .long("in")
                .value_name("FILE")
                .help("input topology file name; defaults to stdin")
                .num_args(1)
                .required(false),
        )
        .arg(
            Arg::new("LIST")
                .long("list")
                .short('l')
                .action(ArgAction::SetTrue)
                .help("list the object names on the input topology"),
        )
        .arg(
            Arg::new("OBJECT")
                .short('o')
                .long("object")
                .value_name("NAME")
                .help("the object whose features are inverted")
                .num_args(1)
                .required_unless_present("LIST"),
        )
        .arg(
            Arg::new("SELECTED")
                .short('s')
                .long("selected")
                .value_name("IDS")
                .help("comma separated feature ids; only these features are inverted")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("NEWLINE")
                .short('n')
                .long("newline-delimited")
                .action(ArgAction::SetTrue)
                .help("output newline-delimited GeoJSON features"),
        )
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let matches = command().get_matches();

    let filename = matches.get_one::<String>("INPUT");
    let topo = read(filename.map(|x| &**x))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    execute(&matches, &topo, &mut handle)
}

/// List the objects of `topo`, or invert the requested object and write it
/// as GeoJSON to `w`.
fn execute<W>(matches: &ArgMatches, topo: &Topology, w: &mut W) -> Result<(), CliError>
where
    W: Write,
{
    if matches.get_flag("LIST") {
        for name in object_names(topo) {
            writeln!(w, "{name}")?;
        }
        return Ok(());
    }

    let name = matches
        .get_one::<String>("OBJECT")
        .ok_or(CliError::NoObject)?;
    let mut layer = layer_from_topology(topo, name)?;

    let scope = match matches.get_many::<u64>("SELECTED") {
        Some(ids) => {
            layer.select(ids.copied().map(FeatureId))?;
            Scope::Selected
        }
        None => Scope::All,
    };

    let summary = summarize(&layer, scope);
    info!(
        layer = %summary.name,
        kind = %summary.kind,
        features = summary.feature_count,
        "inverting"
    );

    let report = invert_layer(&mut layer, scope)?;
    info!(
        changed = report.changed.len(),
        skipped = report.notices.len(),
        "inversion committed"
    );

    if matches.get_flag("NEWLINE") {
        output::write_features(w, &layer)?;
    } else {
        output::write_collection(w, &layer)?;
    }
    Ok(())
}

fn read(filename: Option<&str>) -> Result<Topology, CliError> {
    let mut buffer = String::new();
    match filename {
        Some(filename) => {
            let mut f = File::open(filename)?;
            f.read_to_string(&mut buffer)?;
        }
        None => {
            io::stdin().read_to_string(&mut buffer)?;
        }
    }

    Ok(serde_json::from_str(&buffer)?)
}
