//! Parent-value combinations and their bitstring encoding.
//!
//! Saved projects key table entries by a fixed-width bitstring: one `'1'` or
//! `'0'` per parent, in parent declaration order.

use crate::errors::CpdError;

/// One boolean per declared parent, in parent order.
pub type Combination = Vec<bool>;

/// Enumerate `{True, False}^width` with the first parent varying slowest
/// and `true` before `false`.
pub fn enumerate(width: usize) -> impl Iterator<Item = Combination> {
    (0..1usize << width).map(move |i| {
        (0..width)
            .map(|j| (i >> (width - 1 - j)) & 1 == 0)
            .collect()
    })
}

/// Encode a combination as a bitstring.
pub fn encode(combination: &[bool]) -> String {
    combination
        .iter()
        .map(|&b| if b { '1' } else { '0' })
        .collect()
}

/// Decode a bitstring back into a combination.
pub fn decode(key: &str) -> Result<Combination, CpdError> {
    key.chars()
        .map(|ch| match ch {
            '1' => Ok(true),
            '0' => Ok(false),
            _ => Err(CpdError::InvalidBitstring {
                key: key.to_string(),
            }),
        })
        .collect()
}
