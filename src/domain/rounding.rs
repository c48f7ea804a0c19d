//! Explicit rounding direction for decimal arithmetic.

/// Rounding direction for multiplication, division and integer
/// conversion.
///
/// There is no round-to-nearest: every operation either truncates toward
/// zero or rounds up, and the choice is made by the caller so that the
/// pool never loses value to rounding.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::from_round_up(false), Rounding::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Truncate towards zero.
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Maps the `round_up` flag used by the delta formulas.
    #[must_use]
    pub const fn from_round_up(round_up: bool) -> Self {
        if round_up {
            Self::Up
        } else {
            Self::Down
        }
    }
}
