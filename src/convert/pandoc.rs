//! Pandoc subprocess converter.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::ConverterConfig;
use crate::convert::Converter;
use crate::error::ConvertError;

/// Runs `<program> -f <from> -t <to> <input> -o <output>`.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: String,
    source_format: String,
    target_format: String,
    source_extension: String,
    target_extension: String,
    timeout: Option<Duration>,
}

impl PandocConverter {
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            program: config.program.clone(),
            source_format: config.source_format.clone(),
            target_format: config.target_format.clone(),
            source_extension: config.source_extension.clone(),
            target_extension: config.target_extension.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    fn arguments(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-f".into(),
            self.source_format.clone().into(),
            "-t".into(),
            self.target_format.clone().into(),
            input.as_os_str().to_owned(),
            "-o".into(),
            output.as_os_str().to_owned(),
        ]
    }

    fn spawn_error(&self, e: io::Error) -> ConvertError {
        if e.kind() == io::ErrorKind::NotFound {
            ConvertError::ConverterNotFound {
                program: self.program.clone(),
            }
        } else {
            ConvertError::ProcessFailed {
                program: self.program.clone(),
                source: e,
            }
        }
    }
}

#[async_trait]
impl Converter for PandocConverter {
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        let args = self.arguments(input, output);
        tracing::debug!("Running {} {:?}", self.program, args);

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let run = command.output();
        let finished = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run).await.map_err(|_| {
                ConvertError::Timeout {
                    program: self.program.clone(),
                    secs: limit.as_secs(),
                }
            })?,
            None => run.await,
        };

        let result = finished.map_err(|e| self.spawn_error(e))?;

        if !result.status.success() {
            return Err(ConvertError::ProcessExited {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        tracing::debug!(
            "{} converted {} to {}",
            self.program,
            self.source_format,
            self.target_format
        );

        Ok(())
    }

    fn source_extension(&self) -> &str {
        &self.source_extension
    }

    fn target_extension(&self) -> &str {
        &self.target_extension
    }
}
