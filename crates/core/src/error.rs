/// Errors surfaced by a child frame link while driving a command.
///
/// All variants are terminal for the current `execute_command` call;
/// the link never retries internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The hosting frame element was removed from its document.
    #[error("the frame in which the command should run was removed from the document")]
    CurrentFrameNotFound,

    /// The hosting frame element stayed hidden for the whole
    /// availability timeout.
    #[error("the frame in which the command should run is not visible")]
    CurrentFrameInvisible,

    /// The transport could not confirm the nested context was loaded
    /// within the availability timeout.
    #[error("the frame in which the command should run is not loaded")]
    CurrentFrameNotLoaded,
}
