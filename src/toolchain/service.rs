//! Host service control

use std::path::PathBuf;
use std::process::Command;

use super::ServiceController;
use crate::error::{self, Result};

/// Runs `<script> stop` and `<script> start`
#[derive(Debug, Clone)]
pub struct ScriptController {
    script: PathBuf,
}

impl ScriptController {
    pub fn new(script: PathBuf) -> Self {
        Self { script }
    }

    fn run(&self, action: &str) -> Result<()> {
        tracing::info!("Running {} {action}", self.script.display());
        let output = Command::new(&self.script)
            .arg(action)
            .output()
            .map_err(|e| error::deploy::service_failed(action, e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(error::deploy::service_failed(
                action,
                format!("{} ({})", output.status, stderr.trim()),
            ))
        }
    }
}

impl ServiceController for ScriptController {
    fn stop(&self) -> Result<()> {
        self.run("stop")
    }

    fn start(&self) -> Result<()> {
        self.run("start")
    }
}

/// Used when no service script is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopController;

impl ServiceController for NoopController {
    fn stop(&self) -> Result<()> {
        tracing::debug!("No service script configured, skipping stop");
        Ok(())
    }

    fn start(&self) -> Result<()> {
        tracing::debug!("No service script configured, skipping start");
        Ok(())
    }
}
