use std::ffi::OsString;
use std::io::Write;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cli::Config;
use crate::colorize::{Colorizer, StreamKind};
use crate::error::LaunchError;
use crate::source::{ChildStream, LineSource};

pub const INTERRUPT_NOTICE: &str = "CTRL+C pressed, exiting asap...";

/// How the wrapped tool finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited(ExitStatus),
    /// Killed after an interrupt from the terminal.
    Interrupted,
}

impl Outcome {
    /// Exit code colorcat itself should report.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Interrupted => 130,
            Outcome::Exited(status) => {
                if let Some(code) = status.code() {
                    return u8::try_from(code).unwrap_or(1);
                }
                #[cfg(unix)]
                {
                    use std::os::unix::process::ExitStatusExt;
                    if let Some(signal) = status.signal() {
                        return u8::try_from(128 + signal).unwrap_or(1);
                    }
                }
                1
            }
        }
    }
}

/// Runs one child process and feeds its output to a colorizer.
#[derive(Debug, Clone)]
pub struct Launcher {
    program: OsString,
    args: Vec<OsString>,
}

impl Launcher {
    pub fn new(program: impl Into<OsString>, args: Vec<OsString>) -> Self {
        Self { program: program.into(), args }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }
        command
    }

    /// Run the child to completion, or until `interrupt` fires.
    ///
    /// An interrupt is honored while the child runs and while its remaining
    /// output drains. Dropping the sender side of `interrupt` without sending
    /// is not an interrupt.
    pub async fn run<W>(
        &self,
        colorizer: Colorizer<W>,
        interrupt: oneshot::Receiver<()>,
    ) -> Result<Outcome, LaunchError>
    where
        W: Write + Send + Sync + 'static,
    {
        let mut child = self
            .command()
            .spawn()
            .map_err(|source| LaunchError::spawn(&self.program, source))?;
        debug!(pid = ?child.id(), program = %self.program.to_string_lossy(), args = ?self.args, "spawned child");

        let mut interrupt = Some(interrupt);
        let mut pumps = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            pumps.push(spawn_pump(ChildStream { reader: stdout, kind: StreamKind::Stdout }, colorizer.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            pumps.push(spawn_pump(ChildStream { reader: stderr, kind: StreamKind::Stderr }, colorizer.clone()));
        }

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|source| LaunchError::Wait { source })?;
                debug!(?status, "child exited");
                // processes left behind by the child can keep its pipes open
                tokio::select! {
                    () = drain(&mut pumps) => {}
                    () = interrupted(&mut interrupt) => {
                        announce_interrupt(&colorizer);
                        abort(&pumps);
                        return Ok(Outcome::Interrupted);
                    }
                }
                // Ctrl+C also reaches the child's process group, so it may exit first
                if interrupt.as_mut().is_some_and(|rx| rx.try_recv().is_ok()) {
                    announce_interrupt(&colorizer);
                    return Ok(Outcome::Interrupted);
                }
                Ok(Outcome::Exited(status))
            }
            () = interrupted(&mut interrupt) => {
                announce_interrupt(&colorizer);
                child.kill().await.map_err(|source| LaunchError::Kill { source })?;
                debug!("child killed");
                abort(&pumps);
                Ok(Outcome::Interrupted)
            }
        }
    }
}

/// Resolves once the interrupt fires. A dropped sender never resolves, and
/// the receiver is cleared once it has completed so it is not polled again.
async fn interrupted(interrupt: &mut Option<oneshot::Receiver<()>>) {
    if let Some(rx) = interrupt {
        let fired = rx.await.is_ok();
        *interrupt = None;
        if fired {
            return;
        }
    }
    std::future::pending().await
}

fn announce_interrupt<W: Write>(colorizer: &Colorizer<W>) {
    info!("interrupt received, stopping");
    if let Err(err) = colorizer.terminal().notice(INTERRUPT_NOTICE) {
        warn!(%err, "failed to write interrupt notice");
    }
}

/// Let the pumps deliver whatever is still buffered.
async fn drain(pumps: &mut [JoinHandle<anyhow::Result<()>>]) {
    for pump in pumps {
        match pump.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(error = %err, "stopped forwarding child output"),
            Err(err) => warn!(error = %err, "output task failed"),
        }
    }
}

fn abort(pumps: &[JoinHandle<anyhow::Result<()>>]) {
    for pump in pumps {
        pump.abort();
    }
}

fn spawn_pump<S, W>(source: S, sink: Colorizer<W>) -> JoinHandle<anyhow::Result<()>>
where
    S: LineSource<W> + Send + 'static,
    W: Write + Send + Sync + 'static,
{
    tokio::spawn(source.pump(sink))
}
