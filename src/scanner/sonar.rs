//! Consumer-facing scan surface bound to a live target

use super::entities;
use crate::config::SonarConfig;
use crate::core::types::MemoryResult;
use crate::process::RemoteProcess;
use tracing::{debug, warn};

/// Binds the entity scanner to one attached target process.
pub struct Sonar {
    process: RemoteProcess,
    config: SonarConfig,
}

impl Sonar {
    pub fn new(config: SonarConfig) -> Self {
        Sonar {
            process: RemoteProcess::new(),
            config,
        }
    }

    /// Attempts to attach to the configured target. When a window title is
    /// configured it is tried first, falling back to the process name if no
    /// such window exists yet. Attach failures are converted to `false`
    /// here so the caller can retry on its own schedule; the error detail
    /// is logged rather than discarded.
    pub fn load(&mut self) -> bool {
        if let Some(title) = &self.config.window_title {
            match self.process.attach_by_window_title(title) {
                Ok(()) => return self.process.is_attached(),
                Err(err) => {
                    debug!(error = %err, title = %title, "window attach failed, trying by name");
                }
            }
        }

        match self.process.attach_by_process_name(&self.config.process_name) {
            Ok(()) => self.process.is_attached(),
            Err(err) => {
                warn!(error = %err, process = %self.config.process_name, "attach failed");
                false
            }
        }
    }

    /// True when attached and the target reports an in-game state. Never
    /// fails: probe errors mean "not ready".
    pub fn is_ready(&self) -> bool {
        if !self.process.is_attached() {
            return false;
        }

        let engine_base = match self.process.module_base(&self.config.engine_module) {
            Ok(base) => base,
            Err(err) => {
                debug!(error = %err, "readiness probe: engine module unresolved");
                return false;
            }
        };

        match entities::ready_state(&self.process, engine_base, &self.config.offsets) {
            Ok(ready) => ready,
            Err(err) => {
                debug!(error = %err, "readiness probe failed");
                false
            }
        }
    }

    /// Runs one scan pass and returns the match count. Read/write failures
    /// propagate; the caller is expected to report and continue polling.
    pub fn scan(&self) -> MemoryResult<u32> {
        let client_base = self.process.module_base(&self.config.client_module)?;
        entities::scan_entities(&self.process, client_base, &self.config.offsets)
    }

    /// The underlying accessor, for direct typed access.
    pub fn process(&self) -> &RemoteProcess {
        &self.process
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_falls_back_from_absent_window_title() {
        let mut config = SonarConfig::default();
        config.window_title = Some("no window should carry this exact title 8f2c".to_string());
        config.process_name = "definitely_not_running_12345.exe".to_string();

        // Title lookup fails, name lookup finds nothing: both paths run
        // and the scanner stays detached without erroring out.
        let mut sonar = Sonar::new(config);
        assert!(!sonar.load());
        assert!(!sonar.process().is_attached());
    }

    #[test]
    fn test_load_without_title_stays_detached_for_absent_process() {
        let config = SonarConfig {
            process_name: "definitely_not_running_12345.exe".to_string(),
            ..SonarConfig::default()
        };

        let mut sonar = Sonar::new(config);
        assert!(!sonar.load());
    }
}
