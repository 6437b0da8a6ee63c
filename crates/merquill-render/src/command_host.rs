use crate::error::{HostError, Result};
use crate::host::RenderHost;
use serde_json::Value;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_PROGRAM: &str = "mmdc";

const CONFIG_FILE: &str = "engine-config.json";

/// A host backed by a mermaid-cli compatible executable.
///
/// Each render writes `<id>.mmd` into the work directory and asks the program for `<id>.svg`.
/// The program runs to completion inside the render future, so the future never yields.
#[derive(Debug)]
pub struct CommandHost {
    program: PathBuf,
    work_dir: PathBuf,
    config_path: Mutex<Option<PathBuf>>,
    live: Mutex<HashSet<String>>,
}

impl Default for CommandHost {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CommandHost {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: std::env::temp_dir().join("merquill"),
            config_path: Mutex::new(None),
            live: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn input_path(&self, container_id: &str) -> PathBuf {
        self.work_dir.join(format!("{container_id}.mmd"))
    }

    fn output_path(&self, container_id: &str) -> PathBuf {
        self.work_dir.join(format!("{container_id}.svg"))
    }

    fn claim(&self, container_id: &str) -> Result<LiveContainer<'_>> {
        if !lock(&self.live).insert(container_id.to_string()) {
            return Err(HostError::IdCollision {
                container_id: container_id.to_string(),
            });
        }
        Ok(LiveContainer {
            live: &self.live,
            container_id: container_id.to_string(),
        })
    }

    fn run(&self, container_id: &str, notation: &str) -> Result<String> {
        let input = self.input_path(container_id);
        let output = self.output_path(container_id);
        std::fs::write(&input, notation).map_err(|e| HostError::Unavailable {
            message: format!("failed to write {}: {e}", input.display()),
        })?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("-i").arg(&input).arg("-o").arg(&output).arg("-q");
        if let Some(config) = lock(&self.config_path).as_ref() {
            cmd.arg("-c").arg(config);
        }
        tracing::debug!(program = %self.program.display(), container_id, "running render command");

        let out = cmd.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => HostError::Unavailable {
                message: format!("cannot run {}: {e}", self.program.display()),
            },
            _ => HostError::Crashed {
                message: e.to_string(),
            },
        })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let message = stderr.trim();
            return Err(match out.status.code() {
                Some(_) if !message.is_empty() => HostError::Rejected {
                    message: message.to_string(),
                },
                Some(code) => HostError::Rejected {
                    message: format!("{} exited with status {code}", self.program.display()),
                },
                None => HostError::Crashed {
                    message: format!("{} was terminated by a signal", self.program.display()),
                },
            });
        }

        std::fs::read_to_string(&output).map_err(|e| HostError::Crashed {
            message: format!("no output at {}: {e}", output.display()),
        })
    }
}

impl RenderHost for CommandHost {
    fn is_presentation_capable(&self) -> bool {
        std::fs::create_dir_all(&self.work_dir).is_ok()
    }

    async fn configure(&self, config: &Value) -> Result<()> {
        let path = self.work_dir.join(CONFIG_FILE);
        let text = serde_json::to_string_pretty(config).map_err(|e| HostError::Rejected {
            message: e.to_string(),
        })?;
        std::fs::create_dir_all(&self.work_dir)
            .and_then(|()| std::fs::write(&path, text))
            .map_err(|e| HostError::Unavailable {
                message: format!("failed to write {}: {e}", path.display()),
            })?;
        *lock(&self.config_path) = Some(path);
        Ok(())
    }

    fn remove_container(&self, container_id: &str) {
        if lock(&self.live).contains(container_id) {
            return;
        }
        for path in [self.input_path(container_id), self.output_path(container_id)] {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "failed to remove render scaffolding");
                }
            }
        }
    }

    async fn render(&self, container_id: &str, notation: &str) -> Result<String> {
        let _live = self.claim(container_id)?;
        self.run(container_id, notation)
    }
}

/// Releases a claimed container id when the render finishes, however it finishes.
#[derive(Debug)]
struct LiveContainer<'a> {
    live: &'a Mutex<HashSet<String>>,
    container_id: String,
}

impl Drop for LiveContainer<'_> {
    fn drop(&mut self) {
        lock(self.live).remove(&self.container_id);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claimed_ids_collide_until_released() {
        let host = CommandHost::new(DEFAULT_PROGRAM);
        let claim = host.claim("chart").unwrap();
        assert!(host.claim("chart").unwrap_err().is_collision());

        host.remove_container("chart");
        assert!(lock(&host.live).contains("chart"));

        drop(claim);
        assert!(host.claim("chart").is_ok());
    }
}
