//! Swap engine tuning.

use crate::error::SwapError;

/// Default cap on swap loop iterations.
pub const DEFAULT_MAX_STEPS: u32 = 10_000;

/// Runtime limits of the swap engine.
///
/// A swap performs one step per initialized tick crossed, plus a short
/// tail of rounding steps. `max_steps` bounds that loop and turns a
/// runaway into [`SwapError::IterationLimitExceeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapEngineConfig {
    max_steps: u32,
}

impl SwapEngineConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidConfiguration`] if `max_steps` is zero.
    pub fn new(max_steps: u32) -> crate::error::Result<Self> {
        let config = Self { max_steps };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidConfiguration`] if `max_steps` is zero.
    pub const fn validate(&self) -> crate::error::Result<()> {
        if self.max_steps == 0 {
            return Err(SwapError::InvalidConfiguration(
                "max steps must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Maximum loop iterations per swap.
    #[must_use]
    pub const fn max_steps(&self) -> u32 {
        self.max_steps
    }
}

impl Default for SwapEngineConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}
