#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for `{key}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("`{key}` must be greater than zero")]
    Zero { key: &'static str },

    #[error("arrival interval range is empty: min {min_ms} ms > max {max_ms} ms")]
    EmptyIntervalRange { min_ms: u64, max_ms: u64 },

    #[error("glitch revert ({revert_ms} ms) must be shorter than the glitch interval ({interval_ms} ms)")]
    GlitchRevertTooLong { revert_ms: u64, interval_ms: u64 },
}
