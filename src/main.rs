//! # gwi
//!
//! `gwi` creates a new JavaScript repository from a template: it clones the
//! template, rewrites `package.json`, `LICENSE`, `README.md` and the CI
//! configuration for the new project, removes template-only files, and
//! optionally installs dependencies and makes the first commit.
//!
//! ## Usage
//!
//! ```sh
//! gwi my-library -d 'do something, better' --yarn --no-ci
//! ```
//!
//! Set `GWI_REPO_URL` (and optionally `GWI_REPO_BRANCH`) to clone a different
//! template. See `gwi --help` for every option.

use clap::Parser as _;
use gwi::cli::Args;
use gwi::error::GwiError;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    match gwi::run(&args) {
        Ok(report) => println!("{}", report.summary()),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<GwiError>()
                    .map_or(1, GwiError::exit_code),
            );
        }
    }
}
