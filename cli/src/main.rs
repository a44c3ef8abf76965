use std::io::{BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sweeper_core::{CellCount, Coord, GameConfig, Level, Placement};

mod app;
mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Preset board: beginner, intermediate, expert or custom
    #[arg(short, long, default_value_t = Level::Beginner)]
    level: Level,

    /// Override the preset row count
    #[arg(long)]
    rows: Option<Coord>,

    /// Override the preset column count
    #[arg(long)]
    cols: Option<Coord>,

    /// Override the preset mine count
    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Never place mines on the last row or column
    #[arg(long)]
    legacy_placement: bool,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let preset = self.level.config();
        let size = (
            self.rows.unwrap_or(preset.rows()),
            self.cols.unwrap_or(preset.cols()),
        );
        let mines = self.mines.unwrap_or(preset.mines);
        GameConfig::new(size, mines)
            .with_context(|| format!("{}x{} with {} mines is not playable", size.0, size.1, mines))
    }

    /// Whether any size flag replaces part of the preset.
    fn overrides_preset(&self) -> bool {
        self.rows.is_some() || self.cols.is_some() || self.mines.is_some()
    }

    fn placement(&self) -> Placement {
        if self.legacy_placement {
            Placement::Legacy
        } else {
            Placement::Uniform
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    if args.overrides_preset() {
        log::debug!("custom board: {:?}", config);
    } else {
        log::debug!("level: {}, config: {:?}", args.level, config);
    }

    let mut app = app::App::new(config, args.placement(), seed)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", command::HELP)?;
    app.print(&mut stdout)?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<command::Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{}", err)?;
                continue;
            }
        };
        if app.handle(command, &mut stdout)? == app::Flow::Quit {
            break;
        }
        stdout.flush()?;
    }

    log::debug!("Bye, last game: {:?}", app.session().outcome());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn args_default_to_beginner() {
        let args = Args::try_parse_from(["sweeper"]).unwrap();

        assert_eq!(args.game_config().unwrap(), Level::Beginner.config());
        assert_eq!(args.placement(), Placement::Uniform);
        assert_eq!(args.seed, None);
        assert!(!args.overrides_preset());
    }

    #[test]
    fn args_select_level_and_overrides() {
        let args = Args::try_parse_from(["sweeper", "-l", "Expert", "--mines", "120", "-s", "5"])
            .unwrap();

        assert_eq!(args.level, Level::Expert);
        assert_eq!(
            args.game_config().unwrap(),
            GameConfig::new_unchecked((16, 30), 120)
        );
        assert_eq!(args.seed, Some(5));
        assert!(args.overrides_preset());
    }

    #[test]
    fn custom_size_comes_from_flags() {
        let args = Args::try_parse_from([
            "sweeper", "--level", "custom", "--rows", "5", "--cols", "7", "--mines", "3",
            "--legacy-placement",
        ])
        .unwrap();

        assert_eq!(args.game_config().unwrap(), GameConfig::new_unchecked((5, 7), 3));
        assert_eq!(args.placement(), Placement::Legacy);
    }

    #[test]
    fn verbosity_maps_to_tracing_levels() {
        fn level(argv: &[&str]) -> LevelFilter {
            Args::try_parse_from(argv)
                .unwrap()
                .verbose
                .tracing_level_filter()
        }

        assert_eq!(level(&["sweeper"]), LevelFilter::ERROR);
        assert_eq!(level(&["sweeper", "-vv"]), LevelFilter::INFO);
        assert_eq!(level(&["sweeper", "-vvvv"]), LevelFilter::TRACE);
        assert_eq!(level(&["sweeper", "-q"]), LevelFilter::OFF);
    }

    #[test]
    fn unplayable_overrides_are_rejected() {
        let args = Args::try_parse_from(["sweeper", "--rows", "2", "--cols", "2", "--mines", "4"])
            .unwrap();

        assert!(args.game_config().is_err());
        assert!(Args::try_parse_from(["sweeper", "--level", "nightmare"]).is_err());
    }
}
