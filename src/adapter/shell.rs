//! Runs external commands with tokio, streaming stdout to the log.
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use log::*;
use std::process::Stdio;
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, BufReader},
    process::Command,
};

use crate::{
    Result,
    capability::{
        traits::CommandRunner,
        types::{CommandOutput, ShellCommand},
    },
    error::StagehandError,
};

/// Spawns commands on the host, or inside their build container via
/// `docker exec` when `exec_in_container` is set.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    exec_in_container: bool,
}

impl ProcessRunner {
    pub fn new(exec_in_container: bool) -> Self {
        Self { exec_in_container }
    }

    /// Program and arguments that will actually be spawned for `cmd`.
    pub fn resolve(&self, cmd: &ShellCommand) -> (String, Vec<String>) {
        match cmd.container.as_ref() {
            Some(container) if self.exec_in_container => {
                let mut args = vec!["exec".to_string(), container.clone()];
                args.push(cmd.program.clone());
                args.extend(cmd.args.iter().cloned());
                ("docker".to_string(), args)
            }
            _ => (cmd.program.clone(), cmd.args.clone()),
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, cmd: &ShellCommand) -> Result<CommandOutput> {
        let (program, args) = self.resolve(cmd);
        let line = cmd.command_line();

        match cmd.container.as_ref() {
            Some(container) => info!("running in {container}: {line}"),
            None => info!("running: {line}"),
        }

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                StagehandError::command_failed(
                    line.clone(),
                    None,
                    format!("failed to spawn {program}: {e}"),
                )
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| eyre!("failed to capture stdout of {line}"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| eyre!("failed to capture stderr of {line}"))?;

        let stderr_reader = tokio::spawn(async move {
            let mut buf = String::new();
            stderr.read_to_string(&mut buf).await.map(|_| buf)
        });

        let mut collected = String::new();
        let mut lines = BufReader::new(stdout).lines();

        while let Some(out) = lines.next_line().await? {
            info!("{out}");
            collected.push_str(&out);
            collected.push('\n');
        }

        let status = child.wait().await?;
        let stderr = stderr_reader
            .await
            .map_err(|e| eyre!("stderr reader for {line} failed: {e}"))??;

        if !stderr.trim().is_empty() {
            debug!("stderr of {line}: {}", stderr.trim());
        }

        if !status.success() {
            return Err(StagehandError::command_failed(
                line,
                status.code(),
                stderr.trim(),
            ));
        }

        Ok(CommandOutput {
            code: status.code(),
            stdout: collected,
            stderr,
        })
    }
}
