use anyhow::Result;
use clap::{Parser, Subcommand};
use colortrack_core::bounds::parse_triple;
use std::path::PathBuf;

mod commands;
mod config;

use config::AppConfig;

/// Color-threshold object detection with OpenCV
#[derive(Parser)]
#[command(name = "colortrack", version)]
struct Cli {
    /// JSON configuration file; unset fields keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick HSV bounds for an image with sliders; press the quit key to finish
    Calibrate {
        image: PathBuf,

        /// Use the image at its original size
        #[arg(long)]
        no_resize: bool,

        /// Write a config file holding the chosen bounds
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Track the configured color in a live camera feed
    Detect {
        /// Camera device index
        #[arg(long)]
        camera: Option<i32>,

        #[command(flatten)]
        bounds: BoundsArgs,
    },

    /// Run the detector once on an image file and save the annotated result
    Inspect {
        image: PathBuf,

        /// Annotated image path [default: <image>_detected.png]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a JSON detection report
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        bounds: BoundsArgs,
    },
}

#[derive(clap::Args)]
struct BoundsArgs {
    /// Lower bound as h,s,v
    #[arg(long, value_parser = parse_triple)]
    lower: Option<[u8; 3]>,

    /// Upper bound as h,s,v
    #[arg(long, value_parser = parse_triple)]
    upper: Option<[u8; 3]>,
}

impl BoundsArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(lower) = self.lower {
            config.detection.bounds.lower = lower;
        }
        if let Some(upper) = self.upper {
            config.detection.bounds.upper = upper;
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Command::Calibrate {
            image,
            no_resize,
            save,
        } => {
            if no_resize {
                config.calibration.resize = None;
            }
            commands::calibrate(&image, &config, save.as_deref())
        }
        Command::Detect { camera, bounds } => {
            bounds.apply(&mut config);
            if let Some(index) = camera {
                config.detection.camera_index = index;
            }
            commands::detect(config.detection)
        }
        Command::Inspect {
            image,
            output,
            report,
            bounds,
        } => {
            bounds.apply(&mut config);
            commands::inspect(&image, output, report.as_deref(), config.detection)
        }
    }
}
