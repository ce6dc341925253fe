//! Exact decimal money values
use super::error::PriceError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::{fmt, iter::Sum, ops::Add, str::FromStr};

/// Displayed money always carries this many fractional digits.
pub const CENTS_SCALE: u32 = 2;

/// Largest unit price a catalog may carry. Keeps `quantity × price` sums far
/// inside the range of `Decimal`.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A non-negative monetary amount. Arithmetic stays exact; rounding only
/// happens when the value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Parse the price metadata attached to a product's add affordance.
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let trimmed = raw.trim();
        let value =
            Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber(raw.to_string()))?;

        if value < Decimal::ZERO {
            return Err(PriceError::Negative(raw.to_string()));
        }
        if value > MAX_UNIT_PRICE {
            return Err(PriceError::TooLarge(raw.to_string()));
        }

        Ok(Self(value.normalize()))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn times(&self, quantity: u32) -> Price {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Round half away from zero to whole cents.
    pub fn to_cents(&self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(CENTS_SCALE);
        rounded
    }

    /// Cents formatting with a display prefix, e.g. `$19.98`.
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cents())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum<Self> for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, |a, b| a + b)
    }
}

// Decimal has no CBOR representation, so the exact decimal string is stored.
impl<C> minicbor::Encode<C> for Price {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.str(&self.0.normalize().to_string())?.ok()
    }
}

impl<'b, C> minicbor::Decode<'b, C> for Price {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let raw = d.str()?;

        Price::parse(raw).map_err(|_| minicbor::decode::Error::message("invalid price string"))
    }
}
