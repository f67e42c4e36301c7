use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use degen_commentary::{CommentaryClient, CommentaryProxy, CommentarySource, ProxyConfig};
use degen_core::{Difficulty, HighScores, Session};
use degen_protocol::{CommentaryRequest, FALLBACK_COMMENT};
use futures_channel::mpsc;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::filter::LevelFilter;

use command::{Command, HELP};
use game::Game;
use scores::FileScoreStore;

mod command;
mod game;
mod render;
mod scores;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper for degens, in your terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Difficulty to start with: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// File keeping the best time per difficulty
    #[arg(long, default_value = "degen-scores.json")]
    scores: PathBuf,

    /// Commentary proxy endpoint, e.g. http://127.0.0.1:8000/api/degen-response
    ///
    /// Without it the model API is called directly when OPENROUTER_API_KEY is set.
    #[arg(long)]
    commentary_url: Option<String>,

    /// Seconds to wait for commentary before falling back
    #[arg(long, default_value_t = 8)]
    commentary_timeout: u64,
}

/// Where lost-game commentary comes from.
enum Commentator {
    Proxy(CommentaryClient),
    Direct(CommentaryProxy),
    Offline,
}

impl Commentator {
    fn from_args(args: &Args) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(args.commentary_timeout);
        if let Some(url) = &args.commentary_url {
            let client = CommentaryClient::new(url.clone(), timeout)?;
            log::info!("Commentary from {}", client.url());
            return Ok(Self::Proxy(client));
        }

        let config = ProxyConfig::from_env();
        if config.has_api_key() {
            Ok(Self::Direct(CommentaryProxy::new(ProxyConfig {
                timeout,
                ..config
            })?))
        } else {
            log::info!("No commentary endpoint or API key, using the fallback line");
            Ok(Self::Offline)
        }
    }
}

impl CommentarySource for Commentator {
    async fn comment(&self, request: CommentaryRequest) -> String {
        match self {
            Self::Proxy(client) => client.comment(request).await,
            Self::Direct(proxy) => CommentarySource::comment(proxy, request).await,
            Self::Offline => FALLBACK_COMMENT.to_owned(),
        }
    }
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let commentator = Arc::new(Commentator::from_args(&args)?);
    let (sink, mut comments) = mpsc::unbounded();
    let mut game = Game::new(
        Session::new(args.difficulty, seed)?,
        HighScores::new(FileScoreStore::new(&args.scores)),
        commentator,
        sink,
        Duration::from_secs(args.commentary_timeout),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(Duration::from_secs(1));
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!("{}\n{}", HELP, game.screen());
    loop {
        tokio::select! {
            _ = clock.tick() => {
                game.tick();
            }
            Some(event) = comments.next() => {
                if let Some(text) = game.accept_comment(event) {
                    println!("> {text}");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => command,
                    Err(err) => {
                        println!("{err:#}");
                        continue;
                    }
                };
                let message = game.apply(command)?;
                println!("{}", game.screen());
                if let Some(message) = message {
                    println!("{message}");
                }
            }
        }
    }

    log::debug!("Bye after {}s", game.session().elapsed_secs());
    Ok(())
}
