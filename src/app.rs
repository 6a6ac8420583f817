use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::cli::{Config, USAGE_HINT};
use crate::colorize::Colorizer;
use crate::launcher::{Launcher, Outcome};
use crate::terminal::TerminalWriter;

/// Application runtime on the process's stdout.
pub async fn run(config: Config) -> Result<Outcome> {
    run_with(config, Arc::new(TerminalWriter::stdout())).await
}

/// Wires the terminal, the interrupt listener and the child.
pub async fn run_with<W>(config: Config, terminal: Arc<TerminalWriter<W>>) -> Result<Outcome>
where
    W: Write + Send + Sync + 'static,
{
    if config.show_usage {
        terminal.notice(USAGE_HINT)?;
        terminal.notice("")?;
    }

    // Ctrl+C stops the child instead of us, registered before the child exists
    let (interrupt_rx, listener) = match listen_for_interrupt() {
        Ok((rx, listener)) => (rx, Some(listener)),
        Err(err) => {
            warn!(%err, "cannot listen for Ctrl+C, the child will not be stopped on interrupt");
            (oneshot::channel().1, None)
        }
    };

    let launcher = Launcher::from_config(&config);
    let result = launcher.run(Colorizer::new(Arc::clone(&terminal)), interrupt_rx).await;
    if let Some(listener) = listener {
        listener.abort();
    }

    // Ensure colors are restored even if the child failed
    if let Err(err) = terminal.reset() {
        warn!(%err, "failed to restore terminal colors");
    }
    Ok(result?)
}

/// Installs the interrupt handler right away and fires the returned channel
/// on the first interrupt.
fn listen_for_interrupt() -> io::Result<(oneshot::Receiver<()>, JoinHandle<()>)> {
    #[cfg(unix)]
    let mut signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
    #[cfg(windows)]
    let mut signal = tokio::signal::windows::ctrl_c()?;

    let (tx, rx) = oneshot::channel();
    let listener = tokio::spawn(async move {
        if signal.recv().await.is_some() {
            let _ = tx.send(());
        }
    });
    Ok((rx, listener))
}
