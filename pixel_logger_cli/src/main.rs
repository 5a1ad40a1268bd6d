//! # pixel_logger_cli
//!
//! Part of the pixel_logger crate family.
//!
//! This is the command line application for logging spectrometer frames.
//!
//! ## Use
//!
//! Run with no arguments to log using the default configuration (map file
//! `1002-19_map.txt`, datalog `datalog.txt`, 3 frames from the simulated source):
//!
//! ```bash
//! pixel_logger_cli
//! ```
//!
//! Or give a YAML configuration file:
//!
//! ```bash
//! pixel_logger_cli --config config.yml
//! ```
//!
//! A template configuration can be made with `pixel_logger_cli new --config config.yml`.
use clap::{Arg, Command};
use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use libpixel_logger::config::Config;
use libpixel_logger::error::ConfigError;
use libpixel_logger::process::process;

fn make_template_config(path: &Path) -> Result<(), ConfigError> {
    Config::default().write_config_file(path)
}

fn main() -> ExitCode {
    // Create a cli
    let matches = Command::new("pixel_logger_cli")
        .about("Log spectrometer frames against a pixel to wavelength map")
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Path to the configuration yaml file"),
        )
        .get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    if LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .is_err()
    {
        eprintln!("Could not create logging/progress!");
        return ExitCode::FAILURE;
    }

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);

    if let Some(("new", _)) = matches.subcommand() {
        let Some(path) = config_path else {
            log::error!("The new command requires a --config path to write to");
            return ExitCode::FAILURE;
        };
        log::info!("Making a template config at {}...", path.to_string_lossy());
        return match make_template_config(&path) {
            Ok(()) => {
                log::info!("Done.");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    // Load our config
    let config = match config_path {
        Some(path) => {
            log::info!("Loading config from {}...", path.to_string_lossy());
            match Config::read_config_file(&path) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("{e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            log::info!("No config given, using defaults.");
            Config::default()
        }
    };
    log::info!("Map Path: {}", config.map_path.to_string_lossy());
    log::info!("Datalog Path: {}", config.datalog_path.to_string_lossy());
    log::info!("Frames: {}", config.num_frames);
    log::info!("Source: {:?}", config.source);

    // Setup the progress bar
    let pb = pb_manager.add(ProgressBar::new(config.num_frames as u64));

    let result = process(&config, |status| pb.set_position(status.frames_logged as u64));
    pb.finish();

    match result {
        Ok(_) => {
            log::info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Logging failed with error: {e}");
            ExitCode::FAILURE
        }
    }
}
