//! Decimal-backed price and quantity newtypes.
//!
//! Thin wrappers around [`rust_decimal::Decimal`] so prices and quantities
//! can be constructed from arbitrary-precision decimal strings without ever
//! touching a binary float.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resting-order or trade price. Always compared and added by decimal
/// value, never by text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(Decimal);

/// An order or trade quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(Decimal);

/// Error returned when a price or quantity string cannot be parsed as a
/// decimal, or parses to a value outside the field's allowed range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalParseError(pub String);

impl fmt::Display for DecimalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid decimal value: {}", self.0)
    }
}

impl std::error::Error for DecimalParseError {}

impl Price {
    /// Construct a `Price` from a decimal-formatted string. Rejects
    /// non-positive values; the caller (typically `submit`/`modify`
    /// validation) is responsible for surfacing the right `OrderBookError`
    /// variant, this just refuses to construct a nonsensical price at all.
    pub fn from_str(s: &str) -> Result<Self, DecimalParseError> {
        let d = Decimal::from_str(s).map_err(|e| DecimalParseError(e.to_string()))?;
        if d <= Decimal::ZERO {
            return Err(DecimalParseError(format!("price must be positive: {s}")));
        }
        Ok(Price(d))
    }

    /// Construct a `Price` directly from a `Decimal`, for callers that
    /// already hold one (e.g. repricing an existing order).
    pub fn from_decimal(d: Decimal) -> Result<Self, DecimalParseError> {
        if d <= Decimal::ZERO {
            return Err(DecimalParseError(format!("price must be positive: {d}")));
        }
        Ok(Price(d))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Quantity {
    /// Construct a `Quantity` from a decimal-formatted string. Rejects
    /// non-positive values.
    pub fn from_str(s: &str) -> Result<Self, DecimalParseError> {
        let d = Decimal::from_str(s).map_err(|e| DecimalParseError(e.to_string()))?;
        if d <= Decimal::ZERO {
            return Err(DecimalParseError(format!(
                "quantity must be positive: {s}"
            )));
        }
        Ok(Quantity(d))
    }

    pub fn from_decimal(d: Decimal) -> Result<Self, DecimalParseError> {
        if d <= Decimal::ZERO {
            return Err(DecimalParseError(format!(
                "quantity must be positive: {d}"
            )));
        }
        Ok(Quantity(d))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// The zero quantity. Not constructible via `from_str`/`from_decimal`
    /// (those reject non-positive values) since zero only ever appears as
    /// a transient comparison point — "fully matched", "fully cancelled" —
    /// never as a resting order's quantity.
    pub fn zero() -> Quantity {
        Quantity(Decimal::ZERO)
    }

    /// The minimum of two quantities, by decimal value.
    pub fn min(self, other: Quantity) -> Quantity {
        if self.0 <= other.0 { self } else { other }
    }

    /// Subtract `other` from `self`, saturating at zero. Used in the
    /// matching loop where `m <= h.quantity` is already guaranteed by
    /// construction, but saturation keeps this safe against rounding.
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        let d = self.0 - other.0;
        Quantity(if d < Decimal::ZERO { Decimal::ZERO } else { d })
    }

    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Quantity)
    }

    /// Add `other` to `self`, saturating at `Decimal::MAX` on overflow
    /// rather than silently discarding the increment. Aggregate volumes must
    /// never under-count relative to the true sum of resting quantities, so
    /// this is the increase-side counterpart to `saturating_sub`.
    pub fn saturating_add(self, other: Quantity) -> Quantity {
        match self.0.checked_add(other.0) {
            Some(d) => Quantity(d),
            None => Quantity(Decimal::MAX),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
