use std::ffi::OsString;

use thiserror::Error;

/// Failures while running the wrapped tool.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("`{}` was not found; is it installed and on PATH?", .program.to_string_lossy())]
    NotFound { program: OsString },
    #[error("`{}` could not be started: {source}", .program.to_string_lossy())]
    Spawn {
        program: OsString,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for the child process: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },
    #[error("failed to kill the child process: {source}")]
    Kill {
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    pub fn spawn(program: &OsString, source: std::io::Error) -> Self {
        let program = program.clone();
        if source.kind() == std::io::ErrorKind::NotFound {
            LaunchError::NotFound { program }
        } else {
            LaunchError::Spawn { program, source }
        }
    }
}
