//! The configuration for the simulator, given from environment variables and lazy
//! initialized when needed.

use std::str::FromStr;
use std::env;

use once_cell::race::OnceBool;
use once_cell::sync::OnceCell;

use rogueroom::room::DEFAULT_SPACE_UNIT;


/// Default number of ticks to simulate, 8 seconds at 20 TPS.
const DEFAULT_TICKS: u32 = 160;


/// Error of an environment variable that cannot be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}


/// Return true if ticks should not be padded to the target tick duration.
/// 
/// To enable this feature, set `ROGUEROOM_FAST=1`.
pub fn fast() -> bool {
    static ENV: OnceBool = OnceBool::new();
    ENV.get_or_init(|| {
        env::var_os("ROGUEROOM_FAST")
            .map(|s| s.as_encoded_bytes() == b"1")
            .unwrap_or(false)
    })
}

/// Pixel size of one space unit of the simulated room, `ROGUEROOM_SPACE_UNIT`.
pub fn space_unit() -> Result<f64, ConfigError> {
    static ENV: OnceCell<f64> = OnceCell::new();
    ENV.get_or_try_init(|| parse_var("ROGUEROOM_SPACE_UNIT").map(|v| v.unwrap_or(DEFAULT_SPACE_UNIT)))
        .copied()
}

/// Number of ticks to run before stopping, `ROGUEROOM_TICKS`.
pub fn ticks() -> Result<u32, ConfigError> {
    static ENV: OnceCell<u32> = OnceCell::new();
    ENV.get_or_try_init(|| parse_var("ROGUEROOM_TICKS").map(|v| v.unwrap_or(DEFAULT_TICKS)))
        .copied()
}


/// Parse an environment variable if it's set.
fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    let Some(raw) = env::var_os(var) else { return Ok(None) };
    let value = raw.to_string_lossy();
    value.trim().parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError { var, value: value.into_owned() })
}
