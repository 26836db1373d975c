//! Editor settings that `set` can change.

use std::fmt;

use tracing::info;

use crate::command::SetOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Wrap long lines instead of scrolling horizontally.
    pub wrap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { wrap: true }
    }
}

impl Config {
    pub fn apply(&mut self, option: SetOption) {
        match option {
            SetOption::Wrap => {
                self.wrap = true;
                info!("set all windows to wrap text");
            }
            SetOption::NoWrap => {
                self.wrap = false;
                info!("set all windows to non-wrap text");
            }
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ wrap = {} }}", self.wrap)
    }
}
