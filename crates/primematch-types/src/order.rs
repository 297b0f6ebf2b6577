//! Order types for the PrimeMatch matching circuit.
//!
//! [`Side`] and [`Symbol`] are closed sets with total, injective integer
//! codes so that the circuit shape never depends on order contents. An
//! [`Order`] is validated once at construction and immutable afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PrimematchError, Result, constants};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Both sides, in code order.
    pub const ALL: [Self; 2] = [Self::Buy, Self::Sell];

    /// Integer code carried on circuit wires.
    #[must_use]
    pub fn code(self) -> u64 {
        match self {
            Self::Buy => constants::SIDE_CODE_BUY,
            Self::Sell => constants::SIDE_CODE_SELL,
        }
    }

    /// Decode a wire value back into a side.
    pub fn from_code(code: u64) -> Result<Self> {
        match code {
            constants::SIDE_CODE_BUY => Ok(Self::Buy),
            constants::SIDE_CODE_SELL => Ok(Self::Sell),
            other => Err(PrimematchError::UnknownSide(other)),
        }
    }

    /// The side a compatible counter-order must be on.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.pad("Buy"),
            Self::Sell => f.pad("Sell"),
        }
    }
}

/// Tradable instrument identifier.
///
/// The set is closed at compile time; a [`crate::MatchConfig`] selects how
/// many of them (starting from `A`) a deployment trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Symbol {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl Symbol {
    /// Every symbol, in code order.
    pub const ALL: [Self; constants::SYMBOL_CAPACITY] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
    ];

    /// Zero-based position in [`Symbol::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Integer code carried on circuit wires.
    #[must_use]
    pub fn code(self) -> u64 {
        self as u64
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Decode a wire value back into a symbol.
    pub fn from_code(code: u64) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(Self::from_index)
            .ok_or(PrimematchError::UnknownSymbol(code))
    }

    /// Single-letter ticker.
    #[must_use]
    pub fn letter(self) -> char {
        // `index` is below 26 by construction.
        char::from(b'A' + self as u8)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Inclusive quantity bounds `[min_qty, max_qty]` with `0 < min_qty < max_qty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantityBounds {
    pub min_qty: u64,
    pub max_qty: u64,
}

impl QuantityBounds {
    /// Create validated bounds.
    ///
    /// # Errors
    /// `Configuration` unless `0 < min_qty < max_qty`.
    pub fn new(min_qty: u64, max_qty: u64) -> Result<Self> {
        let bounds = Self { min_qty, max_qty };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check the `0 < min_qty < max_qty` invariant.
    pub fn validate(&self) -> Result<()> {
        if self.min_qty == 0 || self.min_qty >= self.max_qty {
            return Err(PrimematchError::Configuration(format!(
                "quantity bounds must satisfy 0 < min < max, got [{}, {}]",
                self.min_qty, self.max_qty
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, quantity: u64) -> bool {
        (self.min_qty..=self.max_qty).contains(&quantity)
    }

    /// Fail with `QuantityOutOfRange` if `quantity` is outside the bounds.
    pub fn check(&self, quantity: u64) -> Result<()> {
        if self.contains(quantity) {
            Ok(())
        } else {
            Err(PrimematchError::QuantityOutOfRange {
                quantity,
                min: self.min_qty,
                max: self.max_qty,
            })
        }
    }
}

impl Default for QuantityBounds {
    fn default() -> Self {
        Self {
            min_qty: constants::DEFAULT_MIN_QTY,
            max_qty: constants::DEFAULT_MAX_QTY,
        }
    }
}

/// A single order submitted to a matching round.
///
/// Identity is positional (see [`crate::OrderRef`]); `Order` implements
/// neither `PartialEq` nor `Ord`. Two orders with the same side, symbol
/// and quantity are still different orders.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Order {
    side: Side,
    symbol: Symbol,
    quantity: u64,
}

impl Order {
    /// Construct a validated order.
    ///
    /// # Errors
    /// `QuantityOutOfRange` if `quantity` is outside `bounds`.
    pub fn new(side: Side, symbol: Symbol, quantity: u64, bounds: QuantityBounds) -> Result<Self> {
        bounds.check(quantity)?;
        Ok(Self {
            side,
            symbol,
            quantity,
        })
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    #[must_use]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Plaintext reference of the compatibility predicate.
    #[must_use]
    pub fn is_compatible_with(&self, other: &Order) -> bool {
        self.side != other.side && self.symbol == other.symbol
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} {:3} of {}", self.side, self.quantity, self.symbol)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// Order within the default bounds, bypassing validation.
    pub fn dummy(side: Side, symbol: Symbol, quantity: u64) -> Self {
        Self {
            side,
            symbol,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_within_bounds_constructs() {
        let bounds = QuantityBounds::default();
        let order = Order::new(Side::Sell, Symbol::A, 30, bounds).unwrap();
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.symbol(), Symbol::A);
        assert_eq!(order.quantity(), 30);
    }

    #[test]
    fn order_bounds_are_inclusive() {
        let bounds = QuantityBounds::new(5, 60).unwrap();
        assert!(Order::new(Side::Buy, Symbol::B, 5, bounds).is_ok());
        assert!(Order::new(Side::Buy, Symbol::B, 60, bounds).is_ok());
    }

    #[test]
    fn order_outside_bounds_fails() {
        let bounds = QuantityBounds::new(5, 60).unwrap();
        for qty in [0, 4, 61, u64::MAX] {
            let err = Order::new(Side::Buy, Symbol::B, qty, bounds).unwrap_err();
            assert!(
                matches!(err, PrimematchError::QuantityOutOfRange { quantity, .. } if quantity == qty),
                "Got: {err}"
            );
        }
    }

    #[test]
    fn bounds_require_positive_strictly_increasing() {
        assert!(QuantityBounds::new(0, 10).is_err());
        assert!(QuantityBounds::new(10, 10).is_err());
        assert!(QuantityBounds::new(11, 10).is_err());
        assert!(QuantityBounds::new(1, 2).is_ok());
    }

    #[test]
    fn side_codes_roundtrip() {
        for side in Side::ALL {
            assert_eq!(Side::from_code(side.code()).unwrap(), side);
        }
        assert!(matches!(
            Side::from_code(2),
            Err(PrimematchError::UnknownSide(2))
        ));
        assert_eq!(Side::Buy.opposite(), Side::Sell);
    }

    #[test]
    fn symbol_codes_are_injective() {
        for (i, symbol) in Symbol::ALL.iter().enumerate() {
            assert_eq!(symbol.index(), i);
            assert_eq!(Symbol::from_code(symbol.code()).unwrap(), *symbol);
        }
        assert!(Symbol::from_code(26).is_err());
        assert!(Symbol::from_code(u64::MAX).is_err());
        assert_eq!(Symbol::Z.letter(), 'Z');
    }

    #[test]
    fn compatibility_reference() {
        let sell_a = Order::dummy(Side::Sell, Symbol::A, 30);
        let buy_a = Order::dummy(Side::Buy, Symbol::A, 20);
        let buy_b = Order::dummy(Side::Buy, Symbol::B, 20);
        assert!(sell_a.is_compatible_with(&buy_a));
        assert!(!sell_a.is_compatible_with(&buy_b));
        assert!(!buy_a.is_compatible_with(&buy_a));
    }

    #[test]
    fn order_display_is_aligned() {
        assert_eq!(format!("{}", Order::dummy(Side::Buy, Symbol::C, 7)), " Buy   7 of C");
        assert_eq!(format!("{}", Order::dummy(Side::Sell, Symbol::A, 30)), "Sell  30 of A");
    }
}
