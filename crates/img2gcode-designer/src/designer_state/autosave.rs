//! Periodic saving of the current project.
//!
//! The host drives [`DesignerState::auto_save_tick`] from its own timer.

use std::time::{Duration, Instant};

use img2gcode_core::constants::DEFAULT_PROJECT_NAME;

use super::DesignerState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSaveOutcome {
    /// Interval has not elapsed, or auto-save is off.
    NotDue,
    /// Due, but the project has no name to save under.
    Skipped,
    Saved(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AutoSave {
    interval: Duration,
    enabled: bool,
    last: Option<Instant>,
}

impl AutoSave {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            enabled: !interval.is_zero(),
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// A zero interval turns auto-save off.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.enabled = !interval.is_zero();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when `now` is at least one interval after the previous tick
    /// that was due. The first call only starts the clock.
    fn due(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last {
            None => {
                self.last = Some(now);
                false
            }
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

impl DesignerState {
    pub fn auto_save_tick(&mut self, now: Instant) -> AutoSaveOutcome {
        if !self.auto_save.due(now) {
            return AutoSaveOutcome::NotDue;
        }
        let name = self.project_name.trim().to_string();
        if name.is_empty() || name == DEFAULT_PROJECT_NAME {
            tracing::debug!("Auto-save skipped for unnamed project");
            return AutoSaveOutcome::Skipped;
        }
        let result = self.save_as(&name, true);
        match self.report("auto-save", result) {
            Ok(()) => {
                tracing::debug!("Auto-saved '{}'", name);
                AutoSaveOutcome::Saved(name)
            }
            Err(e) => AutoSaveOutcome::Failed(e.user_message()),
        }
    }
}
