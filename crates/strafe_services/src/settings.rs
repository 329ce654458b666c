//! Engine settings backed by the variable map.
//!
//! The typed view the collaborators read (display size, audio volume,
//! tick rate) over the flat `key=value` store. Missing or unparsable keys
//! fall back to defaults, so a partial config file is fine.

use strafe_core::engine::{VarError, VarMap};
use strafe_core::time::TICK_RATE_HZ;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub screen_width: u32,
    pub screen_height: u32,
    pub fullscreen: bool,
    pub master_volume: f32,
    pub tick_rate: u32,
    pub message_trace: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            fullscreen: false,
            master_volume: 1.0,
            tick_rate: TICK_RATE_HZ,
            message_trace: false,
        }
    }
}

impl Settings {
    /// Read the typed settings out of a variable map.
    pub fn from_vars(vars: &VarMap) -> Self {
        let defaults = Self::default();
        Self {
            screen_width: vars.get("screen_width").unwrap_or(defaults.screen_width),
            screen_height: vars.get("screen_height").unwrap_or(defaults.screen_height),
            fullscreen: vars.get("fullscreen").unwrap_or(defaults.fullscreen),
            master_volume: vars.get("master_volume").unwrap_or(defaults.master_volume),
            tick_rate: vars.get("tick_rate").unwrap_or(defaults.tick_rate),
            message_trace: vars.get("message_trace").unwrap_or(defaults.message_trace),
        }
    }

    /// Write the typed settings back into a variable map.
    pub fn write_vars(&self, vars: &mut VarMap) -> Result<(), VarError> {
        vars.set("screen_width", self.screen_width)?;
        vars.set("screen_height", self.screen_height)?;
        vars.set("fullscreen", self.fullscreen)?;
        vars.set("master_volume", self.master_volume)?;
        vars.set("tick_rate", self.tick_rate)?;
        vars.set("message_trace", self.message_trace)?;
        Ok(())
    }
}
