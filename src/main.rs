//! Countdown Timer CLI
//!
//! Type a number of seconds to start a countdown. Pause, resume and reset
//! it from the same prompt; an alert plays when time is up.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

use countdown::cli::{parse_line, Action, Cli, Display};
use countdown::sound::create_notifier;
use countdown::{CountdownConfig, OutputFormat, TimerCommand, TimerEngine, TimerEvent, TimerView};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    let code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            Display::show_error(&format!("{:#}", e));
            1
        }
    };

    // A pending stdin read would otherwise block runtime shutdown.
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the timer until the user quits or input ends.
async fn execute(cli: Cli) -> Result<()> {
    let config = CountdownConfig::from_cli(&cli);
    config.validate()?;
    tracing::info!(?config, "Configuration loaded");

    let notifier = create_notifier(&config.sound, config.sound_enabled);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut engine = TimerEngine::new(notifier, event_tx);
    let mut view_rx = engine.subscribe();

    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    if let Some(text) = &config.initial_input {
        command_tx.send(TimerCommand::Input(text.clone()))?;
        if config.auto_start {
            command_tx.send(TimerCommand::Start(None))?;
        }
    }
    tokio::spawn(forward_input(command_tx));

    let mut shown = engine.view();
    println!("{}", render_view(&shown, config.format)?);

    tokio::select! {
        result = engine.run(&mut command_rx) => result?,
        result = render_views(&mut view_rx, &mut shown, config.format) => result?,
        () = log_events(&mut event_rx) => {}
    }

    // Show the state the loop ended in if the renderer has not caught up.
    if view_rx.has_changed().unwrap_or(false) {
        let view = view_rx.borrow_and_update().clone();
        println!("{}", render_change(&mut shown, view, config.format)?);
    }

    Ok(())
}

/// Prints every published view until the engine goes away.
async fn render_views(
    views: &mut watch::Receiver<TimerView>,
    shown: &mut TimerView,
    format: OutputFormat,
) -> Result<()> {
    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();
        println!("{}", render_change(shown, view, format)?);
    }
    Ok(())
}

/// Renders `view` against the last one shown and remembers it.
fn render_change(shown: &mut TimerView, view: TimerView, format: OutputFormat) -> Result<String> {
    let text = Display::render(shown, &view, format)?;
    *shown = view;
    Ok(text)
}

async fn log_events(events: &mut mpsc::UnboundedReceiver<TimerEvent>) {
    while let Some(event) = events.recv().await {
        tracing::debug!(?event, "Timer event");
    }
}

fn render_view(view: &TimerView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(Display::render_panel(view)),
        OutputFormat::Json => Display::render_json(view),
    }
}

/// Reads commands from stdin until `quit`, end of input or Ctrl-C.
async fn forward_input(commands: mpsc::UnboundedSender<TimerCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                let _ = commands.send(TimerCommand::Unmount);
                return;
            }
        };

        let line = match line.context("Failed to read from stdin") {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("{:#}", e);
                return;
            }
        };

        match parse_line(&line) {
            Action::Timer(command) => {
                if commands.send(command).is_err() {
                    return;
                }
            }
            Action::Help => Display::show_help(),
            Action::Quit => {
                let _ = commands.send(TimerCommand::Unmount);
                return;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use countdown::sound::MockSoundNotifier;
    use countdown::TimerStatus;

    fn engine() -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TimerEngine::new(Box::new(MockSoundNotifier::new()), tx), rx)
    }

    #[test]
    fn test_render_view_text() {
        let text = render_view(&TimerView::default(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("Time (seconds):"));
    }

    #[test]
    fn test_render_view_json() {
        let json = render_view(&TimerView::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "idle");
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_commands_render_the_state_they_produced() {
        let (mut engine, _events) = engine();
        let mut views = engine.subscribe();
        let mut shown = engine.view();

        engine.on_input_change("5").unwrap();
        engine.start_current().unwrap();

        let view = views.borrow_and_update().clone();
        let text = render_change(&mut shown, view, OutputFormat::Text).unwrap();
        assert!(text.contains("Time (seconds): [5] (locked)"));
        assert!(text.contains("[Pause]"));
        assert_eq!(shown.status, TimerStatus::Running);
        assert!(!views.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_rendered_line_matches_its_view() {
        let (mut engine, _events) = engine();
        let mut views = engine.subscribe();
        let mut shown = engine.view();

        engine.start("3").unwrap();
        let view = views.borrow_and_update().clone();
        render_change(&mut shown, view, OutputFormat::Text).unwrap();

        engine.next_tick().await;
        engine.on_tick().unwrap();
        let view = views.borrow_and_update().clone();
        let line = render_change(&mut shown, view, OutputFormat::Text).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("2s"));

        engine.pause_resume().unwrap();
        let view = views.borrow_and_update().clone();
        let panel = render_change(&mut shown, view, OutputFormat::Text).unwrap();
        assert!(panel.contains("[Resume]"));
        assert!(panel.contains("2s"));
    }
}
