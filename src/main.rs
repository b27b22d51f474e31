use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporlmix::{
    cli,
    etl::{DEFAULT_ARTIST, RunSettings},
    sampler::DEFAULT_SAMPLE_SIZE,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true // run options only apply without a subcommand
)]
struct Cli {
    /// Path of the configuration file (defaults to the local data directory)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(flatten)]
    run: RunOptions,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug, Clone)]
struct RunOptions {
    /// Artist whose studio albums are sampled
    #[clap(long, default_value = DEFAULT_ARTIST)]
    artist: String,

    /// Number of tracks on the playlist
    #[clap(
        long,
        default_value_t = DEFAULT_SAMPLE_SIZE as u32,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    count: u32,

    /// Leave the playlist public instead of making it private
    #[clap(long)]
    keep_public: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show stored playlist records
    History(HistoryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryOptions {
    /// Maximum number of rows to show
    #[clap(long, default_value_t = 50)]
    limit: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        None => {
            let settings = RunSettings {
                artist_name: cli.run.artist,
                sample_size: cli.run.count as usize,
                make_private: !cli.run.keep_public,
            };
            cli::playlist(config_path, settings).await
        }
        Some(Command::Auth) => cli::auth(config_path).await,
        Some(Command::History(opt)) => cli::history(config_path, opt.limit).await,
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
