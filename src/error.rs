use std::io;

use thiserror::Error;

/// Crate-level error returned by the frame loop and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
    #[error("renderer used before initialize")]
    RendererNotInitialized,
    #[error("failed to set up logging: {0}")]
    Logging(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::io;

    use super::{Error, Result};

    fn failing_io() -> Result<()> {
        Err(io::Error::other("backend gone"))?;
        Ok(())
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        assert!(matches!(failing_io(), Err(Error::Io(_))));
    }

    #[test]
    fn logging_error_names_the_cause() {
        let error = Error::Logging("subscriber already set".to_string());

        assert_eq!(error.to_string(), "failed to set up logging: subscriber already set");
    }
}
