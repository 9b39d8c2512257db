//! Site runner: delegates serving and publishing to mkdocs.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::DocPaths;
use crate::infrastructure::traits::CommandRunner;
use crate::infrastructure::InfraError;

pub const MKDOCS_PROGRAM: &str = "mkdocs";

/// Runs mkdocs against the project's generated configuration.
pub struct SiteService {
    cmd: Arc<dyn CommandRunner>,
    paths: Arc<DocPaths>,
}

impl SiteService {
    pub fn new(cmd: Arc<dyn CommandRunner>, paths: Arc<DocPaths>) -> Self {
        Self { cmd, paths }
    }

    /// Serve the documentation locally; blocks until mkdocs exits.
    pub fn serve(&self) -> ApplicationResult<()> {
        info!("Serving docs");
        self.mkdocs("serve")
    }

    /// Publish the documentation to GitHub Pages.
    pub fn deploy(&self) -> ApplicationResult<()> {
        info!("Deploying docs");
        self.mkdocs("gh-deploy")
    }

    fn mkdocs(&self, subcommand: &str) -> ApplicationResult<()> {
        let config = self.paths.mkdocs_config();
        let config = config.to_string_lossy();
        let args = [subcommand, "-f", config.as_ref()];
        debug!("mkdocs: {} {:?}", MKDOCS_PROGRAM, args);

        let status = self
            .cmd
            .status(MKDOCS_PROGRAM, &args)
            .map_err(|e| command_failed(subcommand, e.to_string(), None))?;

        if status.success() {
            Ok(())
        } else {
            Err(command_failed(
                subcommand,
                format!("exited with {status}"),
                status.code(),
            ))
        }
    }
}

fn command_failed(subcommand: &str, message: String, exit_code: Option<i32>) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: format!("{MKDOCS_PROGRAM} {subcommand}"),
        source: Box::new(InfraError::Command {
            program: MKDOCS_PROGRAM.to_string(),
            message,
            exit_code,
        }),
    }
}
