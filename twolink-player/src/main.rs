// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use clap::Parser;

use twolink::{
    controller::ArmController,
    render::{LogRenderer, Renderer, TraceRenderer},
    runtime::{InputEvent, InputReceiver},
    Player,
};

mod config;
mod program;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Two-link arm pose player", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(short = 'c', long = "config", alias = "conf", value_name = "FILE")]
    config: Option<std::path::PathBuf>,
    /// Write every drawn segment to a CSV trace.
    #[arg(long, value_name = "FILE")]
    trace: Option<std::path::PathBuf>,
    /// Replay pointer and scrub input from a JSON script.
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<std::path::PathBuf>,
    /// Seek the timeline before playback.
    #[arg(long, value_name = "FRACTION")]
    scrub: Option<f32>,
    /// Quiet output (no logging).
    #[arg(long)]
    quiet: bool,
    /// Daemonize the service.
    #[arg(short = 'D', long)]
    daemon: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let runtime = match &args.config {
        Some(path) => twolink::from_file(path)?,
        None => twolink::Config::default(),
    };

    let quiet = args.quiet;
    let verbose = args.verbose;

    let config = player_config(args, runtime);

    let mut log_config = simplelog::ConfigBuilder::new();
    if config.global.daemon {
        log_config.set_time_level(LevelFilter::Off);
        log_config.set_thread_level(LevelFilter::Off);
    }

    log_config.set_target_level(LevelFilter::Off);
    log_config.set_location_level(LevelFilter::Off);
    log_config.add_filter_ignore_str("mio");

    let log_level = if config.global.daemon {
        LevelFilter::Info
    } else if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let color_choice = if config.global.daemon {
        simplelog::ColorChoice::Never
    } else {
        simplelog::ColorChoice::Auto
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        color_choice,
    )?;

    log::trace!("{:#?}", config);

    daemonize(&config).await
}

/// Merge the command line into the player configuration.
fn player_config(args: Args, runtime: twolink::Config) -> config::PlayerConfig {
    config::PlayerConfig {
        runtime,
        trace: args.trace,
        input: args.input,
        scrub: args.scrub,
        global: twolink::GlobalConfig {
            bin_name: env!("CARGO_BIN_NAME").to_string(),
            daemon: args.daemon,
        },
    }
}

async fn daemonize(config: &config::PlayerConfig) -> anyhow::Result<()> {
    if config.global.daemon {
        log::debug!("Running {} as daemon", config.global.bin_name);
    }

    let controller = ArmController::from_config(&config.runtime)?;

    log::info!("Anchor at {}", controller.projection().anchor());

    let program = match &config.input {
        Some(path) => {
            let program = program::Program::load(path)?;
            if program.is_empty() {
                log::warn!("Input script {} has no steps", path.display());
            } else {
                log::info!("Loaded {} input steps from {}", program.len(), path.display());
            }
            Some(program)
        }
        None => None,
    };

    let (input_tx, input_rx) = twolink::runtime::channel();

    if let Some(fraction) = config.scrub {
        input_tx.send(InputEvent::Scrub(fraction)).await?;
    }

    if let Some(program) = program {
        tokio::spawn(program.replay(input_tx));
    } else {
        drop(input_tx);
    }

    let refresh_interval = config.runtime.animation.refresh_interval();

    let controller = match &config.trace {
        Some(path) => {
            let renderer = TraceRenderer::create(path)?;
            let (controller, mut renderer) =
                play(controller, renderer, refresh_interval, input_rx).await;

            renderer.flush()?;
            log::info!("Wrote {} frames to {}", renderer.frames(), path.display());

            controller
        }
        None => {
            let (controller, renderer) =
                play(controller, LogRenderer::new(), refresh_interval, input_rx).await;

            log::debug!("Drew {} frames", renderer.frames());

            controller
        }
    };

    log::info!("Final pose: {}", controller.pose());
    log::info!(
        "Control mode: {}; Timeline: {:?} at {} ms",
        controller.mode(),
        controller.state(),
        controller.elapsed().as_millis()
    );

    log::debug!("{} was shutdown gracefully", config.global.bin_name);

    Ok(())
}

async fn play<R: Renderer>(
    controller: ArmController,
    renderer: R,
    refresh_interval: std::time::Duration,
    input_rx: InputReceiver,
) -> (ArmController, R) {
    let mut player = Player::new(controller, renderer, LogRenderer::new(), refresh_interval);

    player.run(input_rx).await;

    let (controller, renderer, _) = player.into_parts();

    (controller, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_config_from_args() {
        let args = Args::parse_from([
            "twolink",
            "--daemon",
            "--scrub",
            "0.5",
            "--trace",
            "frames.csv",
        ]);

        let config = player_config(args, twolink::Config::default());

        assert!(config.global.daemon);
        assert_eq!(config.global.bin_name, env!("CARGO_BIN_NAME"));
        assert_eq!(config.scrub, Some(0.5));
        assert_eq!(config.trace, Some(std::path::PathBuf::from("frames.csv")));
        assert_eq!(config.input, None);
    }

    #[test]
    fn test_player_config_defaults() {
        let args = Args::parse_from(["twolink"]);

        let config = player_config(args, twolink::Config::default());

        assert!(!config.global.daemon);
        assert_eq!(config.scrub, None);
        assert_eq!(config.runtime.arm, twolink::ArmConfig::default());
    }
}
