use anyhow::Context;
use clap::{Parser, Subcommand};
use handsfree::config::Config;
use handsfree::controller::Controller;
use handsfree::dispatch::DispatchBus;
use handsfree::heuristic::Heuristic;
use handsfree::matcher::Cascade;
use handsfree::pages::{AccountForm, CatalogPage, GameDetailPage, PreferencesPanel};
use handsfree::registry::Registry;
use handsfree::remote::RemoteInterpreter;
use handsfree::render::{Renderer, StatusLine};
use handsfree::server::InterpretServer;
use handsfree::session::VoiceSession;
use handsfree::shell::AppShell;
use handsfree::transcript::{LineRecognizer, TranscriptSource};
use handsfree::wake::WakeWord;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "handsfree", version, about = "Voice control for the game catalog")]
struct Cli {
    /// Config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read transcripts from stdin, one per line, and act on them (default)
    Listen {
        /// Never call the remote interpreter
        #[arg(long)]
        no_remote: bool,
    },
    /// Serve the heuristic interpreter over HTTP
    Serve {
        /// Address to bind, overrides [server].bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Resolve one command locally and print the intent as JSON
    Resolve {
        /// Command text, without the wake word
        #[arg(required = true)]
        text: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("handsfree=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(cli.command, config))
}

async fn async_main(command: Option<Command>, config: Config) -> anyhow::Result<()> {
    match command.unwrap_or(Command::Listen { no_remote: false }) {
        Command::Listen { no_remote } => run_listen(config, no_remote).await,
        Command::Serve { bind } => run_serve(config, bind).await,
        Command::Resolve { text } => run_resolve(config, &text.join(" ")),
    }
}

fn build_cascade(config: &Config) -> anyhow::Result<Cascade> {
    let registry =
        Registry::with_builtin(config.commands.clone()).context("invalid [[commands]] table")?;
    Ok(Cascade::new(registry)?)
}

async fn run_listen(config: Config, no_remote: bool) -> anyhow::Result<()> {
    let cascade = build_cascade(&config)?;
    let wake = WakeWord::new(&config.wake_word);
    let remote_enabled = config.remote.enabled && !no_remote;

    let (status_line, status_rx) = StatusLine::new();
    let mut bus = DispatchBus::new(AppShell::default());
    bus.subscribe(CatalogPage::default());
    bus.subscribe(GameDetailPage::default());
    bus.subscribe(AccountForm::default());
    bus.subscribe(PreferencesPanel::default());

    let controller = Controller::new(wake, cascade, bus, Box::new(status_line))
        .with_wake_window(config.wake_window())
        .with_remote(remote_enabled);
    let remote = remote_enabled.then(|| RemoteInterpreter::new(&config.remote));
    let session = VoiceSession::new(controller, remote)
        .with_timing(config.restart_delay(), config.status_clear());

    // Renderer owns stdout on its own thread
    let color = std::io::stdout().is_terminal();
    std::thread::spawn(move || {
        let mut renderer = Renderer::new(color);
        while let Ok(event) = status_rx.recv() {
            renderer.handle(event);
        }
    });

    let (shutdown_tx, shutdown_rx) = flume::bounded(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })
    .context("installing Ctrl-C handler")?;

    let recognizer = LineRecognizer::new(std::io::BufReader::new(std::io::stdin()));
    let (source, events) = TranscriptSource::spawn(recognizer, config.restart_delay());

    tracing::info!(
        wake_word = %config.wake_word,
        remote = remote_enabled,
        "listening for transcripts on stdin"
    );
    let controller = session.run(&source, events, shutdown_rx).await;
    tracing::info!(route = ?controller.bus().shell().route(), "session ended");
    Ok(())
}

async fn run_serve(config: Config, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or(config.server.bind);
    let wake = WakeWord::new(&config.wake_word);
    let heuristic = Arc::new(Heuristic::new(wake.words()));
    let server = InterpretServer::start(&bind, heuristic)
        .await
        .with_context(|| format!("binding {}", bind))?;
    eprintln!("Serving {} (Ctrl+C to stop)", server.url());

    tokio::signal::ctrl_c().await?;
    Ok(())
}

fn run_resolve(config: Config, text: &str) -> anyhow::Result<()> {
    let cascade = build_cascade(&config)?;
    match cascade.explain(text) {
        Some(resolution) => {
            tracing::info!(family = resolution.family, rule = resolution.rule, "resolved");
            println!("{}", serde_json::to_string(&resolution.intent)?);
            Ok(())
        }
        None => {
            eprintln!("No command matched \"{}\"", text);
            std::process::exit(1);
        }
    }
}
