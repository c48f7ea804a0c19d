//! Swap execution.
//!
//! | Item | Role |
//! |------|------|
//! | [`SwapStrategy`] | direction-specific math and tick navigation |
//! | [`SwapStep`] | one bucket's price move and amounts |
//! | [`SwapState`] | running state threaded through the loop |
//! | [`SwapEngine`] | the loop, tick crossing and the transactional commit |
//!
//! # Termination
//!
//! ```text
//! Stepping ──► Stepping            (tick crossed or rounding tail)
//!     │
//!     ├──────► Exhausted           (nothing left to swap)
//!     ├──────► PriceLimitReached   (price sits on the limit)
//!     └──────► NoLiquidity         (error: no liquidity and no tick ahead)
//! ```

mod engine;
mod state;
mod step;
mod strategy;

#[cfg(test)]
mod proptest_properties;

pub use engine::SwapEngine;
pub use state::SwapState;
pub use step::SwapStep;
pub use strategy::{StrategyParams, SwapStrategy};
