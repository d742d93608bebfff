//! Solver limits and logging settings.
//!
//! The guards are explicit, configurable limits: the number of inverse moves a single solve
//! may take, the nesting depth the parser accepts, and an optional recursion depth for the
//! graph resolver. The resolver is already bounded by graph size through its visited set,
//! so its depth limit is off unless set.

use crate::errors::TaskError;
use simplelog::LevelFilter;

pub const DEFAULT_MAX_REWRITE_STEPS: usize = 20;
/// no limit beyond the visited set
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = usize::MAX;
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// inverse moves allowed per solve
    pub max_rewrite_steps: usize,
    /// nesting of value -> equation -> value calls allowed per resolve
    pub max_recursion_depth: usize,
    /// brackets, operator chains and unary minus allowed inside one equation
    pub max_nesting_depth: usize,
    pub loglevel: LevelFilter,
    /// also write the log into `log_<timestamp>.txt`
    pub log_to_file: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_rewrite_steps: DEFAULT_MAX_REWRITE_STEPS,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            loglevel: LevelFilter::Info,
            log_to_file: false,
        }
    }
}

impl SolverConfig {
    /// Applies one `key: value` setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TaskError> {
        let invalid = || TaskError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "max_rewrite_steps" => self.max_rewrite_steps = value.parse().map_err(|_| invalid())?,
            "max_recursion_depth" => {
                self.max_recursion_depth = value.parse().map_err(|_| invalid())?
            }
            "max_nesting_depth" => self.max_nesting_depth = value.parse().map_err(|_| invalid())?,
            "loglevel" => self.loglevel = parse_loglevel(value).ok_or_else(invalid)?,
            "log_to_file" => self.log_to_file = value.parse().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        }
        Ok(())
    }
}

pub fn parse_loglevel(value: &str) -> Option<LevelFilter> {
    match value.to_lowercase().as_str() {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" | "none" => Some(LevelFilter::Off),
        _ => None,
    }
}
