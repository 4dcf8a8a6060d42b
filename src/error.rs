use std::io;

/// All errors produced by tailr.
///
/// Variants are split into two categories:
/// - **Usage errors** (exit code 2): bad command-line input
/// - **Operational errors** (exit code 1): open/read/write failures at runtime
#[derive(thiserror::Error, Debug)]
pub enum TailError {
    // ── Usage errors (exit code 2) ───────────────────────────────────
    #[error("illegal line count -- {value}")]
    BadLineCount { value: String },

    // ── Operational errors (exit code 1) ─────────────────────────────
    #[error("cannot open {path}: {source}")]
    FileOpen { path: String, source: io::Error },

    #[error("read error: {0}")]
    StreamRead(io::Error),

    #[error("stream is not open")]
    InvalidStream,

    #[error("write error: {0}")]
    WriteOutput(io::Error),
}

impl TailError {
    /// Map each error variant to its process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BadLineCount { .. } => 2,

            Self::FileOpen { .. }
            | Self::StreamRead(_)
            | Self::InvalidStream
            | Self::WriteOutput(_) => 1,
        }
    }
}
