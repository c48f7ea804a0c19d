//! Per-tick liquidity and fee accounting record.

use borsh::{BorshDeserialize, BorshSerialize};

use super::TokenIndex;
use crate::math::{Dec, SignedDec};

/// State stored for each initialized tick.
///
/// A record exists only while `liquidity_gross > 0`; removing the last
/// position referencing a tick deletes it.
///
/// `liquidity_net` is the signed change in active liquidity when the
/// price crosses the tick moving up. Crossing down applies its negation.
///
/// The fee growth "outside" values follow the usual convention: they hold
/// the growth accumulated on the side of the tick opposite to the current
/// price, and are flipped against the global accumulator on each crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInfo {
    liquidity_gross: Dec,
    liquidity_net: SignedDec,
    fee_growth_outside0: Dec,
    fee_growth_outside1: Dec,
}

impl TickInfo {
    /// Creates a record with explicit values.
    #[must_use]
    pub const fn new(
        liquidity_gross: Dec,
        liquidity_net: SignedDec,
        fee_growth_outside0: Dec,
        fee_growth_outside1: Dec,
    ) -> Self {
        Self {
            liquidity_gross,
            liquidity_net,
            fee_growth_outside0,
            fee_growth_outside1,
        }
    }

    /// Total liquidity referencing this tick.
    #[must_use]
    pub const fn liquidity_gross(&self) -> Dec {
        self.liquidity_gross
    }

    /// Signed liquidity change when crossing upward.
    #[must_use]
    pub const fn liquidity_net(&self) -> SignedDec {
        self.liquidity_net
    }

    /// Fee growth outside the tick for one token.
    #[must_use]
    pub const fn fee_growth_outside(&self, token: TokenIndex) -> Dec {
        match token {
            TokenIndex::Zero => self.fee_growth_outside0,
            TokenIndex::One => self.fee_growth_outside1,
        }
    }

    /// Returns `true` while any position references the tick.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.liquidity_gross.is_zero()
    }

    /// Adds a position bound's liquidity.
    ///
    /// `delta` is applied to gross as-is; `liquidity_net` gains `delta` for
    /// a lower bound and loses it for an upper bound.
    ///
    /// # Errors
    ///
    /// [`SwapError::Arithmetic`](crate::error::SwapError::Arithmetic) if
    /// gross would go negative or overflow.
    pub fn apply_liquidity_delta(
        &mut self,
        delta: SignedDec,
        is_upper: bool,
    ) -> crate::error::Result<()> {
        self.liquidity_gross = delta.apply_to(self.liquidity_gross)?;
        let net_delta = if is_upper { -delta } else { delta };
        self.liquidity_net = self.liquidity_net.checked_add(&net_delta)?;
        Ok(())
    }

    /// Seeds both fee growth outside values.
    pub fn set_fee_growth_outside(&mut self, growth0: Dec, growth1: Dec) {
        self.fee_growth_outside0 = growth0;
        self.fee_growth_outside1 = growth1;
    }

    /// Flips fee growth outside to `global - outside` for both tokens.
    ///
    /// # Errors
    ///
    /// [`SwapError::Arithmetic`](crate::error::SwapError::Arithmetic) if a
    /// global accumulator is below the stored outside value.
    pub fn cross(&mut self, global0: Dec, global1: Dec) -> crate::error::Result<()> {
        self.fee_growth_outside0 = global0.checked_sub(&self.fee_growth_outside0)?;
        self.fee_growth_outside1 = global1.checked_sub(&self.fee_growth_outside1)?;
        Ok(())
    }
}
