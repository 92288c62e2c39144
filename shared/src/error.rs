use thiserror::Error;

/// Boxed error coming out of a [`WindowHost`](crate::host::WindowHost) or
/// [`ShortcutRegistry`](crate::host::ShortcutRegistry) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the coordinator to whoever sent the command.
#[derive(Debug, Error)]
pub enum Error {
    /// The content asked for a command name nobody handles.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The payload did not match what the command expects.
    #[error("invalid payload for {command}: {reason}")]
    InvalidPayload { command: String, reason: String },

    /// The GUI runtime refused a window operation.
    #[error("window host error: {0}")]
    Host(#[source] BoxError),

    /// No new windows are built once the app has started quitting.
    #[error("application is quitting")]
    Quitting,

    /// The new global shortcut could not be registered. The previous
    /// binding (if any) has been restored.
    #[error("failed to register hotkey {accelerator}: {source}")]
    HotkeyRejected {
        accelerator: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn host<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Host(Box::new(err))
    }

    pub(crate) fn invalid_payload(command: &str, reason: impl ToString) -> Self {
        Error::InvalidPayload {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }
}
