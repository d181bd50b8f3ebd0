use std::path::PathBuf;
use std::process::ExitCode;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

use fleet::config::ViewSettings;
use fleet::demo_feed::DemoFeed;
use fleet::feed::load_snapshot;

mod console_mode;

const USAGE: &str = "\
usage: dispatch-console [--snapshot PATH] [--demo SEED] [--demo-size N] [--config PATH] [--verbose]

Reads one JSON command per line on stdin and writes one JSON response per
line on stdout. Logs go to stderr.

  --snapshot PATH   load the initial fleet from a JSON snapshot
  --demo SEED       generate a synthetic fleet and enable demo_step
  --demo-size N     vehicles in the synthetic fleet (default 40)
  --config PATH     view settings JSON (map center, zooms, sidebar, sort)
  --verbose         debug-level logging";

const DEFAULT_DEMO_SIZE: usize = 40;

#[derive(Debug, Default, PartialEq)]
struct ConsoleOptions {
    snapshot: Option<PathBuf>,
    demo_seed: Option<u64>,
    demo_size: Option<usize>,
    config: Option<PathBuf>,
    verbose: bool,
    help: bool,
}

impl ConsoleOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| format!("{flag} needs a value"))
            };
            match arg.as_str() {
                "--snapshot" => options.snapshot = Some(PathBuf::from(value("--snapshot")?)),
                "--config" => options.config = Some(PathBuf::from(value("--config")?)),
                "--demo" => {
                    let raw = value("--demo")?;
                    let seed = raw
                        .parse()
                        .map_err(|_| format!("--demo expects an integer seed, got {raw:?}"))?;
                    options.demo_seed = Some(seed);
                }
                "--demo-size" => {
                    let raw = value("--demo-size")?;
                    let size = raw
                        .parse()
                        .map_err(|_| format!("--demo-size expects a count, got {raw:?}"))?;
                    options.demo_size = Some(size);
                }
                "--verbose" | "-v" => options.verbose = true,
                "--help" | "-h" => options.help = true,
                other => return Err(format!("unknown argument {other:?}")),
            }
        }
        if options.snapshot.is_some() && options.demo_seed.is_some() {
            return Err("--snapshot and --demo are mutually exclusive".to_string());
        }
        Ok(options)
    }
}

fn main() -> ExitCode {
    let options = match ConsoleOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("dispatch-console: {message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if options.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let settings = match &options.config {
        Some(path) => match ViewSettings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("dispatch-console: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => ViewSettings::default(),
    };

    let mut app = console_mode::build_console_app(settings);
    app.add_plugins(LogPlugin {
        level: if options.verbose { Level::DEBUG } else { Level::INFO },
        ..default()
    });

    let (snapshot, demo) = match (&options.snapshot, options.demo_seed) {
        (Some(path), _) => match load_snapshot(path) {
            Ok(snapshot) => (Some(snapshot), None),
            Err(e) => {
                eprintln!("dispatch-console: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        (None, Some(seed)) => {
            let mut demo = DemoFeed::from_seed(seed);
            let snapshot = demo.snapshot(options.demo_size.unwrap_or(DEFAULT_DEMO_SIZE));
            (Some(snapshot), Some(demo))
        }
        (None, None) => (None, None),
    };
    console_mode::prime(&mut app, snapshot, demo);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match console_mode::run_session(&mut app, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dispatch-console: i/o error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ConsoleOptions, String> {
        ConsoleOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), ConsoleOptions::default());
    }

    #[test]
    fn test_demo_options() {
        let options = parse(&["--demo", "42", "--demo-size", "100", "-v"]).unwrap();
        assert_eq!(options.demo_seed, Some(42));
        assert_eq!(options.demo_size, Some(100));
        assert!(options.verbose);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse(&["--demo", "forty"]).is_err());
        assert!(parse(&["--snapshot"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--snapshot", "a.json", "--demo", "1"]).is_err());
    }
}
