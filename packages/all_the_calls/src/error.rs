use thiserror::Error;

/// Errors that can occur when configuring call instrumentation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller supplied an argument that the operation cannot act on.
    #[error("invalid argument: '{argument}' is invalid: {problem}")]
    InvalidArgument {
        /// The specific argument value that was invalid.
        argument: String,

        /// A human-readable description of the problem.
        problem: String,
    },
}

impl Error {
    pub(crate) fn invalid_argument(
        argument: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            problem: problem.into(),
        }
    }
}

/// A specialized `Result` type for call instrumentation operations, returning
/// the package's [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn invalid_argument_is_error() {
        let error = Error::invalid_argument("names", "not a registered member");

        // Verify it is a valid Error that can be used in Result context.
        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_argument_message_names_the_argument() {
        let error = Error::invalid_argument("frobnicate", "no callable member");
        let message = error.to_string();

        assert!(message.contains("frobnicate"));
        assert!(message.contains("no callable member"));
    }
}
