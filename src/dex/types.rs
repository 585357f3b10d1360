use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// A 32-byte Solana account address, rendered as base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey([u8; 32]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePubkeyError {
    #[error("invalid base58 string: {0}")]
    Base58(String),

    #[error("expected 32 bytes, decoded {0}")]
    Length(usize),
}

impl Pubkey {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s.trim())
            .into_vec()
            .map_err(|e| ParsePubkeyError::Base58(e.to_string()))?;
        let len = bytes.len();
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ParsePubkeyError::Length(len))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

// ---------------------------------------------------------------------------
// Fractional: on-chain fixed point, value = m / 10^exp
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fractional {
    pub m: i64,
    pub exp: u64,
}

impl Fractional {
    /// `None` when `exp` exceeds the 28 digits of scale a `Decimal` can hold.
    pub fn to_decimal(self) -> Option<Decimal> {
        let scale = u32::try_from(self.exp).ok()?;
        Decimal::try_new(self.m, scale).ok()
    }

    /// `None` when the mantissa does not fit in an i64.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        Some(Self {
            m: i64::try_from(value.mantissa()).ok()?,
            exp: u64::from(value.scale()),
        })
    }
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// On-chain encoding: 0 = buy, 1 = sell.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
