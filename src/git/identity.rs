//! Local git identity lookup

use crate::config::Identity;
use crate::system::{Invocation, ProcessRunner};
use tracing::debug;

/// Read `user.name` and `user.email` from the local git configuration
///
/// Never fails: if either value cannot be read (git missing, key unset, non
/// zero exit) both placeholders are returned.
#[must_use]
pub fn lookup_identity(runner: &dyn ProcessRunner) -> Identity {
    let identity = read_config_value(runner, "user.name").and_then(|full_name| {
        read_config_value(runner, "user.email").map(|email| Identity { full_name, email })
    });

    identity.unwrap_or_else(|| {
        debug!("Git identity is not configured, using placeholders");
        Identity::placeholder()
    })
}

fn read_config_value(runner: &dyn ProcessRunner, key: &str) -> Option<String> {
    let invocation = Invocation::new("git", ["config", key]);
    match runner.run(&invocation) {
        Ok(output) if output.success() => Some(output.stdout_trimmed().to_owned()),
        Ok(output) => {
            debug!("git config {} exited with {:?}", key, output.code);
            None
        }
        Err(err) => {
            debug!("git config {} could not run: {}", key, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::placeholders;
    use crate::system::{MockProcessRunner, MockResponse};

    #[test]
    fn returns_configured_identity() {
        let runner = MockProcessRunner::new()
            .with_response("git config user.name", MockResponse::Success("Jane Doe\n".to_owned()))
            .with_response(
                "git config user.email",
                MockResponse::Success("jane@example.com\n".to_owned()),
            );

        let identity = lookup_identity(&runner);
        assert_eq!(identity.full_name, "Jane Doe");
        assert_eq!(identity.email, "jane@example.com");
    }

    #[test]
    fn missing_email_yields_both_placeholders() {
        let runner = MockProcessRunner::new()
            .with_response("git config user.name", MockResponse::Success("Jane Doe\n".to_owned()))
            .with_response("git config user.email", MockResponse::Exit(1, String::new()));

        let identity = lookup_identity(&runner);
        assert_eq!(identity.full_name, placeholders::NAME);
        assert_eq!(identity.email, placeholders::EMAIL);
    }

    #[test]
    fn missing_git_yields_placeholders() {
        let runner = MockProcessRunner::new()
            .with_response("git", MockResponse::NotFound)
            .with_response("git", MockResponse::NotFound);

        assert_eq!(lookup_identity(&runner), Identity::placeholder());
    }
}
