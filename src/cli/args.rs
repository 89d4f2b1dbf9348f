use crate::config::{PackageManager, Toggles, UserOptions};
use clap::{ArgAction, Parser};

/// Command-line arguments for gwi
#[derive(Parser, Debug, Clone)]
#[command(name = "gwi")]
#[command(about = "A CLI tool for scaffolding new JavaScript repositories")]
#[command(long_about = None)]
#[command(version)]
#[command(after_help = "Example:\n  $ gwi my-library -d 'do something, better'")]
pub struct Args {
    /// Name of the new package (also the directory it is created in)
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: String,

    /// package.json description
    #[arg(short, long, default_value = "a js project")]
    pub description: String,

    /// Use yarn instead of npm
    #[arg(long)]
    pub yarn: bool,

    /// Don't include CI configuration
    #[arg(long = "no-ci", action = ArgAction::SetFalse)]
    pub ci: bool,

    /// Skip yarn/npm install
    #[arg(long = "no-install", action = ArgAction::SetFalse)]
    pub install: bool,

    /// Don't include eslint
    #[arg(long = "no-eslint", action = ArgAction::SetFalse)]
    pub eslint: bool,

    /// Enable verbose logging output and show git diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Package manager selected by the flags
    #[must_use]
    #[inline]
    pub const fn package_manager(&self) -> PackageManager {
        if self.yarn {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    /// Convert the flags into user options for the resolver
    #[must_use]
    pub fn to_user_options(&self, starter_version: &str) -> UserOptions {
        UserOptions {
            project_name: self.project_name.clone(),
            description: self.description.clone(),
            package_manager: self.package_manager(),
            toggles: Toggles {
                ci: self.ci,
                lint: self.eslint,
                install: self.install,
            },
            starter_version: starter_version.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_toggle() {
        let args = Args::try_parse_from(["gwi", "my-lib"]).unwrap();
        let options = args.to_user_options("1.2.3");

        assert_eq!(options.project_name, "my-lib");
        assert_eq!(options.description, "a js project");
        assert_eq!(options.package_manager, PackageManager::Npm);
        assert_eq!(options.toggles, Toggles::default());
        assert_eq!(options.starter_version, "1.2.3");
    }

    #[test]
    fn negated_flags_disable_toggles() {
        let args = Args::try_parse_from([
            "gwi",
            "example-project",
            "-d",
            "example description",
            "--yarn",
            "--no-ci",
            "--no-eslint",
            "--no-install",
        ])
        .unwrap();
        let options = args.to_user_options("1.0.0");

        assert_eq!(options.description, "example description");
        assert_eq!(options.package_manager, PackageManager::Yarn);
        assert_eq!(
            options.toggles,
            Toggles {
                ci: false,
                lint: false,
                install: false,
            }
        );
    }

    #[test]
    fn name_and_description_pass_through_verbatim() {
        let args = Args::try_parse_from(["gwi", " my-lib ", "-d", "  spaced  "]).unwrap();
        let options = args.to_user_options("1.0.0");

        assert_eq!(options.project_name, " my-lib ");
        assert_eq!(options.description, "  spaced  ");
    }

    #[test]
    fn project_name_is_required() {
        assert!(Args::try_parse_from(["gwi"]).is_err());
    }
}
