use clap::{Parser, Subcommand};
use rugeo::config::{DEFAULT_RADIUS_M, DEFAULT_REVERSE_TOP_N, DEFAULT_TOP_N};
use rugeo::{GeocodeError, Geocoder, GeocoderConfig, Weights};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rugeo", about = "Geocode informal Russian addresses against a reference dataset")]
struct Args {
    /// Reference dataset (CSV with locality, lat, lon, name, address columns).
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// JSON file overriding engine tuning parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Top-N reference addresses for a free-text query.
    Search {
        query: String,
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
        /// Weight of the edit-distance signal.
        #[arg(long, default_value_t = 1.0)]
        w_edit: f64,
        /// Weight of the BM25 signal.
        #[arg(long, default_value_t = 1.0)]
        w_lexical: f64,
    },
    /// Nearest reference addresses to a point.
    Reverse {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(short = 'n', long, default_value_t = DEFAULT_REVERSE_TOP_N)]
        top_n: usize,
        #[arg(long, default_value_t = DEFAULT_RADIUS_M)]
        radius_m: f64,
    },
    /// Distance and similarity between the best matches of two addresses.
    Compare {
        address_1: String,
        address_2: String,
        #[arg(long, default_value_t = 1.0)]
        w_edit: f64,
        #[arg(long, default_value_t = 1.0)]
        w_lexical: f64,
    },
    /// Print the canonical token form of an address.
    Normalize { address: String },
}

#[derive(Serialize)]
struct CannotCompare<'a> {
    address_1: &'a str,
    address_2: &'a str,
    error: String,
}

fn load_config(path: Option<&PathBuf>) -> Result<GeocoderConfig, GeocodeError> {
    match path {
        Some(path) => GeocoderConfig::from_json(&std::fs::read_to_string(path)?),
        None => Ok(GeocoderConfig::default()),
    }
}

fn open_engine(args: &Args) -> Result<Geocoder, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_ref())?;
    let dataset = args
        .dataset
        .as_ref()
        .ok_or("--dataset is required for this command")?;
    Ok(Geocoder::from_path(dataset, config)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match &args.command {
        Command::Normalize { address } => {
            println!("{}", rugeo::normalizer::normalize(address));
        }
        Command::Search {
            query,
            top_n,
            w_edit,
            w_lexical,
        } => {
            let engine = open_engine(&args)?;
            let results = engine.search(query, *top_n, Weights::new(*w_edit, *w_lexical));
            print_json(&results)?;
        }
        Command::Reverse {
            lat,
            lon,
            top_n,
            radius_m,
        } => {
            let engine = open_engine(&args)?;
            print_json(&engine.reverse(*lat, *lon, *top_n, *radius_m))?;
        }
        Command::Compare {
            address_1,
            address_2,
            w_edit,
            w_lexical,
        } => {
            let engine = open_engine(&args)?;
            match engine.compare(address_1, address_2, Weights::new(*w_edit, *w_lexical)) {
                Ok(comparison) => print_json(&comparison)?,
                Err(err @ GeocodeError::AmbiguousOrMissingCoordinates { .. }) => {
                    print_json(&CannotCompare {
                        address_1,
                        address_2,
                        error: err.to_string(),
                    })?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
