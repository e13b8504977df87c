//! Cardspace Host
//!
//! Event-loop process for a cardspace view.
//!
//! Responsibilities:
//! - Maintain workspace state
//! - Read protocol commands from stdin, one JSON object per line
//! - Drive drags and geometry queries through the layout engine
//! - Write one JSON response per command to stdout

use anyhow::{Context, Result};
use cardspace_host::{read_frame, Config, Frame, HostState};
use cardspace_ipc::{decode_command, encode_response, HostCommand, HostResponse, ProtocolError};
use tokio::io::{AsyncWriteExt, BufReader, Stdout};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Events that the host event loop processes.
enum HostEvent {
    /// A decoded command from the view.
    Command(HostCommand),
    /// A line that could not be decoded; answered with an error.
    Invalid(String),
    /// Stdin reached end of file.
    InputClosed,
    /// Shutdown signal.
    Shutdown,
}

/// Read framed commands from stdin and forward them to the event loop.
async fn run_stdin_reader(event_tx: mpsc::Sender<HostEvent>) {
    let mut reader = BufReader::new(tokio::io::stdin());

    loop {
        let event = match read_frame(&mut reader).await {
            Ok(Frame::Eof) => HostEvent::InputClosed,
            Ok(Frame::TooLong(size)) => HostEvent::Invalid(
                ProtocolError::MessageTooLarge {
                    size,
                    max: cardspace_ipc::MAX_MESSAGE_SIZE,
                }
                .to_string(),
            ),
            Ok(Frame::Line(bytes)) => {
                let line = String::from_utf8_lossy(&bytes);
                match decode_command(&line) {
                    Ok(cmd) => HostEvent::Command(cmd),
                    Err(ProtocolError::Empty) => continue,
                    Err(e) => HostEvent::Invalid(format!("Invalid command: {}", e)),
                }
            }
            Err(e) => {
                warn!("Failed to read from stdin: {}", e);
                HostEvent::InputClosed
            }
        };

        let closed = matches!(event, HostEvent::InputClosed);
        if event_tx.send(event).await.is_err() || closed {
            break;
        }
    }
}

async fn write_response(stdout: &mut Stdout, response: &HostResponse) -> Result<()> {
    let line = match encode_response(response) {
        Ok(line) => line,
        Err(e) => {
            warn!("Failed to serialize response: {}", e);
            "{\"status\":\"error\",\"message\":\"Internal serialization error\"}\n".to_string()
        }
    };
    stdout
        .write_all(line.as_bytes())
        .await
        .context("Failed to write response")?;
    stdout.flush().await.context("Failed to flush stdout")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (needed for log level)
    let mut config = Config::load().unwrap_or_else(|e| {
        // Can't use tracing yet, fall back to eprintln
        eprintln!("Failed to load configuration: {:#}. Using defaults.", e);
        Config::default()
    });

    // Logs go to stderr; stdout carries the protocol.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.behavior.level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    for w in config.validate() {
        warn!("Config: {} - {}", w.field, w.message);
    }

    info!("Cardspace host starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: mode={:?}, snap_threshold={}, card_snap_threshold={}, \
         grid={} ({}), log_level={}",
        config.layout.mode,
        config.snap.snap_threshold,
        config.snap.card_snap_threshold,
        config.snap.grid_size,
        if config.snap.grid_enabled { "on" } else { "off" },
        config.behavior.log_level
    );

    let mut state = HostState::new(config);

    let (event_tx, mut event_rx) = mpsc::channel::<HostEvent>(100);

    tokio::spawn(run_stdin_reader(event_tx.clone()));

    // Install Ctrl+C handler so terminal kill triggers graceful shutdown
    {
        let shutdown_tx = event_tx.clone();
        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Ctrl+C received, initiating shutdown...");
                let _ = shutdown_tx.send(HostEvent::Shutdown).await;
            }
        });
    }
    drop(event_tx);

    info!("Ready. Waiting for commands on stdin.");

    let mut stdout = tokio::io::stdout();

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        match event {
            HostEvent::Command(cmd) => {
                debug!("Received command: {:?}", cmd);
                let is_stop = matches!(cmd, HostCommand::Stop);
                let response = state.handle_command(cmd);
                write_response(&mut stdout, &response).await?;

                if is_stop {
                    info!("Stop command received, shutting down...");
                    break;
                }
            }
            HostEvent::Invalid(message) => {
                warn!("{}", message);
                write_response(&mut stdout, &HostResponse::error(message)).await?;
            }
            HostEvent::InputClosed => {
                info!("Input closed, shutting down...");
                break;
            }
            HostEvent::Shutdown => break,
        }
    }

    info!(
        "Cardspace host stopped with {} card(s) open",
        state.workspace().card_count()
    );
    Ok(())
}
