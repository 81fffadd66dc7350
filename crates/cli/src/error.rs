//! Exit-code mapping for the CLI.

use marksearch_client::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    AuthError = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Map a client error to its exit code.
pub fn exit_code_for(error: &Error) -> ExitCode {
    match error {
        Error::Configuration(_) => ExitCode::ConfigError,
        Error::AuthProtocol { .. } | Error::UpstreamAuth { .. } => ExitCode::AuthError,
        _ => ExitCode::GeneralError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_get_their_own_code() {
        let err = Error::Configuration("missing".into());
        assert_eq!(exit_code_for(&err), ExitCode::ConfigError);
    }

    #[test]
    fn auth_failures_get_their_own_code() {
        let err = Error::UpstreamAuth {
            status: 401,
            url: "u".into(),
            message: "m".into(),
            retry: None,
        };
        assert_eq!(exit_code_for(&err), ExitCode::AuthError);
        assert_eq!(exit_code_for(&Error::MissingQuery), ExitCode::GeneralError);
    }
}
