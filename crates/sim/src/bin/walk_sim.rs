//! Simulated walking navigation.
//!
//! Prepares a route between two points, then walks it with a simulated GPS
//! and runs a full navigation session over the resulting fixes.
//!
//! Usage:
//!   cargo run -p trailnav_sim --bin walk_sim -- --from <LAT,LON> --to <LAT,LON> [OPTIONS]
//!
//! Options:
//!   --speed <M/S>     Walking speed (default: 1.4)
//!   --seed <N>        RNG seed for GPS noise
//!   --noise <M>       GPS noise standard deviation in meters (default: 0)
//!   --time-scale <X>  Pace fixes in wall-clock time, X times real time
//!   --offline         Use straight-line directions instead of Mapbox
//!   --param <N=V>     Override a navigation parameter (repeatable)
//!
//! Online mode reads MAPBOX_ACCESS_TOKEN (and optionally MAPBOX_API_URL).

use std::env;
use std::process;

use trailnav::config::{load_navigation_params, parse_param_override};
use trailnav::directions::prepare_route;
use trailnav::logging::init_logging;
use trailnav::viewport::LoggingViewport;
use trailnav::{
    DirectionsConfig, LocationProvider, MapboxDirections, NavigationSession, PermissionStatus,
    SessionOutcome, WatchOptions,
};
use trailnav_core::Waypoint;
use trailnav_sim::{SimulatedLocationProvider, SimulatorError, StaticDirections, WalkerConfig};

struct Args {
    from: Waypoint,
    to: Waypoint,
    speed: f64,
    seed: Option<u64>,
    noise: f64,
    time_scale: Option<f64>,
    offline: bool,
    params: Vec<(String, String)>,
}

fn parse_args() -> Args {
    let raw: Vec<String> = env::args().collect();
    match parse_from(&raw) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_from(raw: &[String]) -> Result<Option<Args>, SimulatorError> {
    let mut from = None;
    let mut to = None;
    let mut args = Args {
        from: Waypoint::new(0.0, 0.0),
        to: Waypoint::new(0.0, 0.0),
        speed: WalkerConfig::default().speed_mps,
        seed: None,
        noise: 0.0,
        time_scale: None,
        offline: false,
        params: Vec::new(),
    };

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--from" => {
                i += 1;
                from = Some(parse_point(value(raw, i, "from")?)?);
            }
            "--to" => {
                i += 1;
                to = Some(parse_point(value(raw, i, "to")?)?);
            }
            "--speed" => {
                i += 1;
                args.speed = parse_number(value(raw, i, "speed")?, "speed")?;
            }
            "--seed" => {
                i += 1;
                args.seed = Some(parse_number(value(raw, i, "seed")?, "seed")?);
            }
            "--noise" => {
                i += 1;
                args.noise = parse_number(value(raw, i, "noise")?, "noise")?;
            }
            "--time-scale" => {
                i += 1;
                args.time_scale = Some(parse_number(value(raw, i, "time-scale")?, "time-scale")?);
            }
            "--offline" => args.offline = true,
            "--param" => {
                i += 1;
                let (name, text) = parse_param_override(value(raw, i, "param")?)?;
                args.params.push((name.to_string(), text.to_string()));
            }
            "-h" | "--help" => return Ok(None),
            other => {
                return Err(SimulatorError::InvalidArgument(format!("unknown option {other}")));
            }
        }
        i += 1;
    }

    args.from = from.ok_or_else(|| SimulatorError::InvalidArgument("--from is required".into()))?;
    args.to = to.ok_or_else(|| SimulatorError::InvalidArgument("--to is required".into()))?;
    Ok(Some(args))
}

fn value<'a>(raw: &'a [String], i: usize, name: &str) -> Result<&'a str, SimulatorError> {
    raw.get(i)
        .map(String::as_str)
        .ok_or_else(|| SimulatorError::InvalidArgument(format!("--{name} requires a value")))
}

fn parse_number<T: std::str::FromStr>(text: &str, name: &str) -> Result<T, SimulatorError> {
    text.parse()
        .map_err(|_| SimulatorError::InvalidArgument(format!("invalid value for --{name}: {text}")))
}

fn parse_point(text: &str) -> Result<Waypoint, SimulatorError> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| SimulatorError::InvalidArgument(format!("expected LAT,LON, got {text}")))?;
    let point = Waypoint::new(
        parse_number(lat.trim(), "latitude")?,
        parse_number(lon.trim(), "longitude")?,
    );
    if !point.is_valid() {
        return Err(SimulatorError::InvalidArgument(format!("coordinate out of range: {text}")));
    }
    Ok(point)
}

fn print_usage() {
    eprintln!(
        "Usage: walk_sim --from <LAT,LON> --to <LAT,LON> [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --speed <M/S>     Walking speed (default: 1.4)\n\
         \x20 --seed <N>        RNG seed for GPS noise\n\
         \x20 --noise <M>       GPS noise standard deviation in meters (default: 0)\n\
         \x20 --time-scale <X>  Pace fixes in wall-clock time, X times real time\n\
         \x20 --offline         Use straight-line directions instead of Mapbox\n\
         \x20 --param <N=V>     Override a navigation parameter (repeatable)\n\
         \x20 -h, --help        Show this help"
    );
}

async fn run(args: Args) -> Result<SessionOutcome, SimulatorError> {
    let waypoints = [args.from, args.to];
    let params = load_navigation_params(
        args.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )?;

    let prepared = if args.offline {
        prepare_route(&StaticDirections::straight_line_at(args.speed), &waypoints).await?
    } else {
        let mapbox = MapboxDirections::new(DirectionsConfig::from_env()?.with_profile(params.profile.clone()))?;
        prepare_route(&mapbox, &waypoints).await?
    };

    let summary = prepared.summary();
    trailnav::log_info!("Route: {} / {}", summary.distance, summary.duration);

    let walker_config = WalkerConfig {
        speed_mps: args.speed,
        gps_noise_m: args.noise,
        seed: args.seed,
        ..WalkerConfig::default()
    };
    let mut location =
        SimulatedLocationProvider::new(prepared.route.geometry().to_vec(), walker_config)?;
    if let Some(scale) = args.time_scale {
        location = location.with_time_scale(scale)?;
    }

    if location.request_permission().await == PermissionStatus::Denied {
        return Err(trailnav::NavigationError::LocationPermissionDenied.into());
    }

    let mut session = NavigationSession::new(prepared, &params, LoggingViewport)?;
    session.attach(location.watch_position(WatchOptions::from(&params)).await);

    let view = session.progress();
    trailnav::log_info!("{} ({})", view.instruction, view.distance);

    Ok(session.run_until(std::future::pending()).await)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();
    let args = parse_args();

    match run(args).await {
        Ok(SessionOutcome::Completed) => trailnav::log_info!("Arrived"),
        Ok(outcome) => {
            trailnav::log_warn!("Walk ended early: {:?}", outcome);
            process::exit(2);
        }
        Err(e) => {
            trailnav::log_error!("{}", e);
            process::exit(1);
        }
    }
}
