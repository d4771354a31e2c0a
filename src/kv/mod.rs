// Copyright 2019 TiKV Project Authors. Licensed under Apache-2.0.
use std::fmt;

mod action;
mod get;
mod mutation;
mod result;

pub use action::Action;
pub use get::Get;
pub use mutation::Delete;
pub use mutation::Put;
pub use result::Column;
pub use result::ResultRow;
#[cfg(any(test, feature = "test-util"))]
pub(crate) use result::cell;

pub(crate) struct HexRepr<'a>(pub &'a [u8]);

impl fmt::Display for HexRepr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

/// The smallest key that sorts after every key prefixed by `key`.
///
/// The last byte is incremented; trailing `0xff` bytes are dropped first. An empty result means
/// there is no upper bound.
pub(crate) fn successor(key: &[u8]) -> Vec<u8> {
    let mut key = key.to_vec();
    while let Some(last) = key.last_mut() {
        if *last < u8::MAX {
            *last += 1;
            return key;
        }
        key.pop();
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_increments_last_byte() {
        assert_eq!(successor(b"t"), b"u".to_vec());
        assert_eq!(successor(b"table"), b"tablf".to_vec());
        assert_eq!(successor(&[1, 0xff]), vec![2]);
        assert_eq!(successor(&[0xff, 0xff]), Vec::<u8>::new());
        assert_eq!(successor(b""), Vec::<u8>::new());
    }
}
