//! Events emitted by the Dexterity program through `sol_log_data`.
//!
//! Payload layout (little-endian): one tag byte, then the event fields.
//! Fixed-point values are a [`Fractional`] (`i64` mantissa, `u64` exponent).

use rust_decimal::Decimal;
use thiserror::Error;

use super::decoder::DecodeError;
use super::types::{Fractional, Pubkey, Side};

const ORDER_FILL_TAG: u8 = 0;
const ORDER_CANCEL_TAG: u8 = 1;
const NEW_ORDER_TAG: u8 = 2;

/// A taker order crossed a resting maker order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFillEvent {
    pub product: Pubkey,
    pub taker_side: Side,
    pub quote_size: Decimal,
    pub base_size: Decimal,
    pub maker_trader_risk_group: Pubkey,
    pub taker_trader_risk_group: Pubkey,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCancelEvent {
    pub product: Pubkey,
    pub trader_risk_group: Pubkey,
    pub order_id: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderEvent {
    pub product: Pubkey,
    pub trader_risk_group: Pubkey,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub order_id: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DexEvent {
    OrderFill(OrderFillEvent),
    OrderCancel(OrderCancelEvent),
    NewOrder(NewOrderEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("decimal {0} does not fit an i64 mantissa")]
    MantissaOverflow(Decimal),
}

impl DexEvent {
    /// Decode one event payload (already base64-decoded).
    ///
    /// Trailing bytes after the last field are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(data);
        let tag = r.u8().map_err(|_| DecodeError::Empty)?;

        let event = match tag {
            ORDER_FILL_TAG => DexEvent::OrderFill(OrderFillEvent {
                product: r.pubkey()?,
                taker_side: r.side()?,
                quote_size: r.fractional()?,
                base_size: r.fractional()?,
                maker_trader_risk_group: r.pubkey()?,
                taker_trader_risk_group: r.pubkey()?,
                price: r.fractional()?,
            }),
            ORDER_CANCEL_TAG => DexEvent::OrderCancel(OrderCancelEvent {
                product: r.pubkey()?,
                trader_risk_group: r.pubkey()?,
                order_id: r.u128()?,
            }),
            NEW_ORDER_TAG => DexEvent::NewOrder(NewOrderEvent {
                product: r.pubkey()?,
                trader_risk_group: r.pubkey()?,
                side: r.side()?,
                price: r.fractional()?,
                size: r.fractional()?,
                order_id: r.u128()?,
            }),
            other => return Err(DecodeError::UnknownTag(other)),
        };

        Ok(event)
    }

    /// Encode into the on-chain payload layout. Inverse of [`DexEvent::from_bytes`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut w = Writer::default();
        match self {
            DexEvent::OrderFill(e) => {
                w.u8(ORDER_FILL_TAG);
                w.pubkey(&e.product);
                w.u8(e.taker_side.to_byte());
                w.fractional(e.quote_size)?;
                w.fractional(e.base_size)?;
                w.pubkey(&e.maker_trader_risk_group);
                w.pubkey(&e.taker_trader_risk_group);
                w.fractional(e.price)?;
            }
            DexEvent::OrderCancel(e) => {
                w.u8(ORDER_CANCEL_TAG);
                w.pubkey(&e.product);
                w.pubkey(&e.trader_risk_group);
                w.u128(e.order_id);
            }
            DexEvent::NewOrder(e) => {
                w.u8(NEW_ORDER_TAG);
                w.pubkey(&e.product);
                w.pubkey(&e.trader_risk_group);
                w.u8(e.side.to_byte());
                w.fractional(e.price)?;
                w.fractional(e.size)?;
                w.u128(e.order_id);
            }
        }
        Ok(w.buf)
    }
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        if self.buf.len() < N {
            return Err(DecodeError::Truncated {
                needed: N,
                remaining: self.buf.len(),
            });
        }
        let (head, rest) = self.buf.split_at(N);
        self.buf = rest;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take::<1>()?[0])
    }

    fn u128(&mut self) -> Result<u128, DecodeError> {
        Ok(u128::from_le_bytes(self.take()?))
    }

    fn pubkey(&mut self) -> Result<Pubkey, DecodeError> {
        Ok(Pubkey::new(self.take()?))
    }

    fn side(&mut self) -> Result<Side, DecodeError> {
        let b = self.u8()?;
        Side::from_byte(b).ok_or(DecodeError::InvalidSide(b))
    }

    fn fractional(&mut self) -> Result<Decimal, DecodeError> {
        let f = Fractional {
            m: i64::from_le_bytes(self.take()?),
            exp: u64::from_le_bytes(self.take()?),
        };
        f.to_decimal().ok_or(DecodeError::Exponent(f.exp))
    }
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn u128(&mut self, v: u128) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn pubkey(&mut self, key: &Pubkey) {
        self.buf.extend_from_slice(key.as_bytes());
    }

    fn fractional(&mut self, value: Decimal) -> Result<(), EncodeError> {
        let f = Fractional::from_decimal(value).ok_or(EncodeError::MantissaOverflow(value))?;
        self.buf.extend_from_slice(&f.m.to_le_bytes());
        self.buf.extend_from_slice(&f.exp.to_le_bytes());
        Ok(())
    }
}
