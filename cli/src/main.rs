use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;

mod console;
mod game;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Memory-matching card game for the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Side length of the grid, an even number from 2 to 16
    #[arg(long)]
    size: Option<twinflip_core::Coord>,

    /// Seconds a mismatched pair stays visible
    #[arg(short, long)]
    delay: Option<f32>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _logger = flexi_logger::Logger::with(args.verbose.log_level_filter())
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("initializing logger")?;

    let mut settings = match &args.config {
        Some(path) => settings::Settings::load(path)?,
        None => settings::Settings::default(),
    };
    if let Some(size) = args.size {
        settings = settings.with_size(size);
    }
    if let Some(delay) = args.delay {
        settings = settings.with_delay(delay);
    }
    let config = settings.game_config()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let session = game::GameSession::new(config, seed);
    let rounds = console::Console::new(io::stdin().lock(), io::stdout().lock(), settings)
        .run(session)?;

    let won = rounds.iter().filter(|round| round.won).count();
    println!("Thanks for playing! Rounds won: {won}/{}.", rounds.len());
    Ok(())
}
