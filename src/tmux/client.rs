use anyhow::{Context, Result};
use std::process::{Command, Output, Stdio};
use tracing::{debug, warn};

use super::{MultiplexerDriver, SplitDirection, StyleScope};

/// Production driver for interacting with tmux via CLI.
pub struct TmuxClient {
    /// Path to tmux binary
    tmux_path: String,
}

impl TmuxClient {
    pub fn new() -> Self {
        Self {
            tmux_path: "tmux".to_string(),
        }
    }

    /// Use an explicit tmux binary instead of whatever is on PATH.
    pub fn with_path(tmux_path: impl Into<String>) -> Self {
        Self {
            tmux_path: tmux_path.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, "tmux");
        Command::new(&self.tmux_path)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute tmux {}", args.join(" ")))
    }

    /// Run a command for its side effect only; log and swallow failures.
    fn run_ok(&self, args: &[&str]) -> bool {
        match self.run(args) {
            Ok(out) if out.status.success() => true,
            Ok(out) => {
                warn!(
                    ?args,
                    stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                    "tmux command failed"
                );
                false
            }
            Err(e) => {
                warn!(?args, error = %e, "tmux invocation failed");
                false
            }
        }
    }
}

impl MultiplexerDriver for TmuxClient {
    fn is_available(&self) -> bool {
        Command::new(&self.tmux_path)
            .arg("list-sessions")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn split_pane(
        &self,
        target: &str,
        direction: SplitDirection,
        percent: Option<u8>,
        command: Option<&str>,
    ) -> Option<String> {
        let flag = match direction {
            SplitDirection::Horizontal => "-h",
            SplitDirection::Vertical => "-v",
        };
        // -d keeps focus where it was; -P -F prints the new pane id.
        let mut args = vec!["split-window", flag, "-d", "-P", "-F", "#{pane_id}"];
        let pct;
        if let Some(p) = percent {
            pct = p.to_string();
            args.push("-p");
            args.push(&pct);
        }
        args.push("-t");
        args.push(target);
        if let Some(cmd) = command {
            args.push(cmd);
        }

        let out = self.run(&args).ok()?;
        if !out.status.success() {
            warn!(
                target,
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "split-window failed"
            );
            return None;
        }
        let id = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if id.is_empty() {
            warn!(target, "split-window produced no pane id");
            return None;
        }
        Some(id)
    }

    fn kill_pane(&self, pane_id: &str) -> bool {
        self.run_ok(&["kill-pane", "-t", pane_id])
    }

    fn pane_exists(&self, pane_id: &str) -> bool {
        let out = match self.run(&["list-panes", "-a", "-F", "#{pane_id}"]) {
            Ok(out) if out.status.success() => out,
            _ => return false,
        };
        String::from_utf8_lossy(&out.stdout)
            .lines()
            .any(|line| line.trim() == pane_id)
    }

    fn resize_pane(&self, pane_id: &str, width: u32, height: u32) {
        let w = width.to_string();
        let h = height.to_string();
        self.run_ok(&["resize-pane", "-t", pane_id, "-x", &w, "-y", &h]);
    }

    fn even_horizontal(&self) {
        self.run_ok(&["select-layout", "even-horizontal"]);
    }

    fn set_option(&self, scope: StyleScope<'_>, name: &str, value: &str) {
        let args = option_args(scope, name, false);
        let mut args: Vec<&str> = args.iter().map(String::as_str).collect();
        args.push(value);
        self.run_ok(&args);
    }

    fn unset_option(&self, scope: StyleScope<'_>, name: &str) {
        let args = option_args(scope, name, true);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_ok(&args);
    }

    fn set_environment(&self, session: &str, name: &str, value: &str) {
        self.run_ok(&["set-environment", "-t", session, name, value]);
    }

    fn unset_environment(&self, session: &str, name: &str) {
        self.run_ok(&["set-environment", "-u", "-t", session, name]);
    }
}

/// Build the `set-option` argument list for a scope, minus the value.
fn option_args(scope: StyleScope<'_>, name: &str, unset: bool) -> Vec<String> {
    let mut args = vec!["set-option".to_string()];
    if unset {
        args.push("-u".to_string());
    }
    match scope {
        StyleScope::Pane(target) => {
            args.push("-p".to_string());
            args.push("-t".to_string());
            args.push(target.to_string());
        }
        StyleScope::Window(target) => {
            args.push("-w".to_string());
            args.push("-t".to_string());
            args.push(target.to_string());
        }
        StyleScope::Session(target) => {
            args.push("-t".to_string());
            args.push(target.to_string());
        }
    }
    args.push(name.to_string());
    args
}

impl Default for TmuxClient {
    fn default() -> Self {
        Self::new()
    }
}
