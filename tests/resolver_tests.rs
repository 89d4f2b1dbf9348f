//! Tests for option resolution

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use anyhow::{Result, bail};
    use core::sync::atomic::{AtomicUsize, Ordering};
    use gwi::config::template::{CANONICAL_REPOSITORY, maintainer};
    use gwi::config::{
        Identity, PackageManager, Toggles, UserOptions, UsernameLookup, placeholders,
        resolve_configuration, template_source,
    };
    use gwi::system::mock::MockSystem;
    use gwi::system::{MockProcessRunner, MockResponse};
    use std::path::Path;

    /// Returns a fixed username and counts calls
    struct FixedLookup {
        username: &'static str,
        calls: AtomicUsize,
    }

    impl FixedLookup {
        const fn new(username: &'static str) -> Self {
            Self {
                username,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl UsernameLookup for FixedLookup {
        fn lookup(&self, _email: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.username.to_owned())
        }
    }

    struct UnreachableHost;

    impl UsernameLookup for UnreachableHost {
        fn lookup(&self, _email: &str) -> Result<String> {
            bail!("network unreachable")
        }
    }

    fn user_options() -> UserOptions {
        UserOptions {
            project_name: "my-lib".to_owned(),
            description: "does things".to_owned(),
            package_manager: PackageManager::Yarn,
            toggles: Toggles::default(),
            starter_version: "2.3.0".to_owned(),
        }
    }

    fn configured_git() -> MockProcessRunner {
        MockProcessRunner::new()
            .with_response(
                "git config user.name",
                MockResponse::Success("Jane Doe\n".to_owned()),
            )
            .with_response(
                "git config user.email",
                MockResponse::Success("jane@example.com\n".to_owned()),
            )
    }

    #[test]
    fn canonical_template_is_pinned_to_version() {
        let source = template_source(&MockSystem::new(), "2.3.0");

        assert_eq!(source.repository, CANONICAL_REPOSITORY);
        assert_eq!(source.branch, "v2.3.0");
    }

    #[test]
    fn repository_override_defaults_to_master() {
        let system = MockSystem::new()
            .with_env("GWI_REPO_URL", "https://example.com/fork.git")
            .unwrap();

        let source = template_source(&system, "2.3.0");

        assert_eq!(source.repository, "https://example.com/fork.git");
        assert_eq!(source.branch, "master");
    }

    #[test]
    fn repository_override_with_branch() {
        let system = MockSystem::new()
            .with_env("GWI_REPO_URL", "https://example.com/fork.git")
            .unwrap()
            .with_env("GWI_REPO_BRANCH", "next")
            .unwrap();

        assert_eq!(template_source(&system, "2.3.0").branch, "next");
    }

    #[test]
    fn branch_without_repository_is_ignored() {
        let system = MockSystem::new().with_env("GWI_REPO_BRANCH", "next").unwrap();

        let source = template_source(&system, "2.3.0");

        assert_eq!(source.repository, CANONICAL_REPOSITORY);
        assert_eq!(source.branch, "v2.3.0");
    }

    #[test]
    fn resolves_identity_and_username() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();
        let lookup = FixedLookup::new("janedoe");

        let config =
            resolve_configuration(user_options(), &system, &configured_git(), &lookup).unwrap();

        assert_eq!(
            config.identity(),
            &Identity {
                full_name: "Jane Doe".to_owned(),
                email: "jane@example.com".to_owned(),
            }
        );
        assert_eq!(config.username(), "janedoe");
        assert_eq!(config.package_manager(), PackageManager::Yarn);
        assert_eq!(config.working_directory(), Path::new("/work"));
        assert_eq!(config.project_path(), Path::new("/work/my-lib"));
        assert!(config.should_commit());
        assert!(!config.is_maintainer());
        assert_eq!(lookup.calls(), 1);
    }

    #[test]
    fn missing_git_degrades_to_placeholders() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();
        let runner = MockProcessRunner::new().with_response("git config", MockResponse::NotFound);
        let lookup = FixedLookup::new("janedoe");

        let config = resolve_configuration(user_options(), &system, &runner, &lookup).unwrap();

        assert_eq!(config.identity(), &Identity::placeholder());
        assert_eq!(config.username(), placeholders::USERNAME);
        assert!(!config.should_commit());
        // The placeholder email is never looked up, and email is skipped once name fails
        assert_eq!(lookup.calls(), 0);
        assert_eq!(runner.count_matching("git config"), 1);
    }

    #[test]
    fn unset_email_degrades_to_placeholders() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();
        let runner = MockProcessRunner::new()
            .with_response(
                "git config user.name",
                MockResponse::Success("Jane Doe\n".to_owned()),
            )
            .with_response("git config user.email", MockResponse::Exit(1, String::new()));

        let config =
            resolve_configuration(user_options(), &system, &runner, &UnreachableHost).unwrap();

        assert_eq!(config.identity(), &Identity::placeholder());
    }

    #[test]
    fn failed_username_lookup_degrades_to_placeholder() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();

        let config =
            resolve_configuration(user_options(), &system, &configured_git(), &UnreachableHost)
                .unwrap();

        assert_eq!(config.username(), placeholders::USERNAME);
        // A known identity still commits
        assert!(config.should_commit());
    }

    #[test]
    fn maintainer_is_recognized() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();
        let lookup = FixedLookup::new(maintainer::USERNAME);

        let config =
            resolve_configuration(user_options(), &system, &configured_git(), &lookup).unwrap();

        assert!(config.is_maintainer());
    }
}
