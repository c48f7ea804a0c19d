//! Domain value types of the swap core.
//!
//! Newtypes with validated constructors model ticks, amounts,
//! denominations and fee rates. The persistent records ([`Pool`] and
//! [`TickInfo`]) and the swap request and outcome types live here too.

mod amount;
mod denom;
mod denom_pair;
mod pool;
mod position;
mod rounding;
mod spread_factor;
mod swap_outcome;
mod swap_spec;
mod tick;
mod tick_info;

pub use amount::Amount;
pub use denom::{Coin, Denom};
pub use denom_pair::{DenomPair, TokenIndex};
pub use pool::Pool;
pub use position::Position;
pub use rounding::Rounding;
pub use spread_factor::SpreadFactor;
pub use swap_outcome::{SwapOutcome, SwapTermination};
pub use swap_spec::{SwapSpec, SwapType};
pub use tick::Tick;
pub use tick_info::TickInfo;
