//! Crate error type
//!
//! Runtime paths never propagate these to the frame loop: they log and skip the
//! affected effect. Settings loading and lateral input are the only places a
//! host sees an `Err`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(
        "player cannot move because the level width was never configured or is 0; \
         call configure_width before sending lateral input"
    )]
    LateralRangeUnset,
    #[error("setting `{name}` has invalid value {value}")]
    InvalidSetting { name: &'static str, value: f32 },
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}
