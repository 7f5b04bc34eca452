//! Making sure the external diff viewer is installed
//!
//! A [`ToolProvisioner`] knows how to check for a program and how to install
//! it on the host. [`ensure_tool`] runs the check and, when the program is
//! missing, asks before installing anything so nobody is surprised by a
//! `sudo` password prompt.

use crate::error::{Result, TreeDiffError};
use crate::prompt::Prompter;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Outcome of [`ensure_tool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    /// Already on the host
    Available,
    /// Was missing and has been installed
    Installed,
    /// Still missing; running it later will fail
    Missing,
}

/// Host-specific strategy for locating and installing a program
pub trait ToolProvisioner {
    /// Whether `tool` can be run
    fn is_available(&self, tool: &str) -> bool;

    /// Human readable instruction shown before installing
    fn describe_install(&self, tool: &str) -> String;

    /// Install `tool`
    fn install(&self, tool: &str) -> Result<()>;
}

/// Probe a program by running `<tool> --help` with all output discarded
pub fn probe(tool: &str) -> bool {
    let status = Command::new(tool)
        .arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) => {
            debug!("Probe of {} exited with {}", tool, status);
            true
        }
        Err(e) => {
            debug!("Probe of {} failed: {}", tool, e);
            false
        }
    }
}

/// Installs through `sudo apt-get install`
#[derive(Debug, Default, Clone)]
pub struct AptProvisioner;

impl AptProvisioner {
    fn command(tool: &str) -> Vec<String> {
        vec![
            "sudo".to_string(),
            "apt-get".to_string(),
            "install".to_string(),
            tool.to_string(),
        ]
    }
}

impl ToolProvisioner for AptProvisioner {
    fn is_available(&self, tool: &str) -> bool {
        probe(tool)
    }

    fn describe_install(&self, tool: &str) -> String {
        Self::command(tool).join(" ")
    }

    fn install(&self, tool: &str) -> Result<()> {
        let mut args = Self::command(tool);
        let program = args.remove(0);
        info!("Installing {} with {}", tool, self.describe_install(tool));

        let status = Command::new(&program)
            .args(&args)
            .status()
            .map_err(|e| TreeDiffError::InstallFailed {
                tool: tool.to_string(),
                reason: format!("could not run {}: {}", program, e),
            })?;

        if !status.success() {
            return Err(TreeDiffError::InstallFailed {
                tool: tool.to_string(),
                reason: format!("installer exited with {}", status),
            });
        }
        Ok(())
    }
}

/// Never installs; tells the user what to do instead
#[derive(Debug, Default, Clone)]
pub struct ManualProvisioner;

impl ToolProvisioner for ManualProvisioner {
    fn is_available(&self, tool: &str) -> bool {
        probe(tool)
    }

    fn describe_install(&self, tool: &str) -> String {
        format!("install '{}' with your system package manager", tool)
    }

    fn install(&self, tool: &str) -> Result<()> {
        Err(TreeDiffError::InstallFailed {
            tool: tool.to_string(),
            reason: self.describe_install(tool),
        })
    }
}

/// Check for `tool` and offer to install it when missing
///
/// A declined or failed install is not fatal here; the run goes on and only
/// fails if the viewer actually has to be started.
pub fn ensure_tool(
    provisioner: &dyn ToolProvisioner,
    prompter: &mut dyn Prompter,
    tool: &str,
) -> Result<ToolStatus> {
    if provisioner.is_available(tool) {
        return Ok(ToolStatus::Available);
    }

    let message = format!(
        "You are missing '{}', which is required to use this program.\nInstall it using the following command?\n{}",
        tool,
        provisioner.describe_install(tool)
    );
    if !prompter.confirm(&message)? {
        warn!("{} is missing and installation was declined", tool);
        return Ok(ToolStatus::Missing);
    }

    match provisioner.install(tool) {
        Ok(()) => Ok(ToolStatus::Installed),
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            Ok(ToolStatus::Missing)
        }
        Err(e) => Err(e),
    }
}
