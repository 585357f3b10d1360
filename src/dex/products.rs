//! Product names of a market product group.
//!
//! The market product group account lists its products as a table:
//! a `u16` entry count (little-endian), then one entry per product made of
//! the product key (32 bytes) and its name (16 bytes, UTF-8, padded with
//! NUL or spaces). Bytes after the last entry are ignored.

use std::collections::HashMap;

use thiserror::Error;

use super::types::Pubkey;

pub const PRODUCT_NAME_LEN: usize = 16;
const ENTRY_LEN: usize = 32 + PRODUCT_NAME_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductTableError {
    #[error("product table truncated: need {needed} bytes, have {remaining}")]
    Truncated { needed: usize, remaining: usize },

    #[error("product {index} has a name that is not UTF-8")]
    InvalidName { index: usize },
}

/// Product key to product name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    names: HashMap<Pubkey, String>,
}

impl ProductCatalog {
    /// Parse the product table out of market product group account data.
    ///
    /// Unused slots (default key or blank name) are skipped.
    pub fn from_account_data(data: &[u8]) -> Result<Self, ProductTableError> {
        let (count, table) = match data {
            [lo, hi, rest @ ..] => (u16::from_le_bytes([*lo, *hi]) as usize, rest),
            _ => {
                return Err(ProductTableError::Truncated {
                    needed: 2,
                    remaining: data.len(),
                })
            }
        };

        let needed = count * ENTRY_LEN;
        if table.len() < needed {
            return Err(ProductTableError::Truncated {
                needed,
                remaining: table.len(),
            });
        }

        let mut names = HashMap::with_capacity(count);
        for (index, entry) in table[..needed].chunks_exact(ENTRY_LEN).enumerate() {
            let (key, name) = entry.split_at(32);
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(key);
            let key = Pubkey::new(bytes);

            let name = std::str::from_utf8(name)
                .map_err(|_| ProductTableError::InvalidName { index })?
                .trim_end_matches(['\0', ' ']);

            if key == Pubkey::default() || name.is_empty() {
                continue;
            }
            names.insert(key, name.to_string());
        }

        Ok(Self { names })
    }

    pub fn name(&self, product: &Pubkey) -> Option<&str> {
        self.names.get(product).map(String::as_str)
    }

    /// The product's name, or its base58 key when the name is unknown.
    pub fn display_name(&self, product: &Pubkey) -> String {
        match self.name(product) {
            Some(name) => name.to_string(),
            None => product.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(Pubkey, String)> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = (Pubkey, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
