//! Byte Accountant Module
//!
//! Computes the byte cost charged against the budget for a stored item.

// == Byte Accountant ==
/// Prices a key/value pair in bytes.
///
/// In key-inclusive mode the cost also covers the UTF-8 length of the key and
/// of the namespacing prefix, so `"föö"` is charged 5 bytes, not 3.
#[derive(Debug, Clone)]
pub struct ByteAccountant {
    include_key: bool,
    prefix: String,
}

impl ByteAccountant {
    pub fn new(include_key: bool, prefix: impl Into<String>) -> Self {
        Self {
            include_key,
            prefix: prefix.into(),
        }
    }

    // == Cost ==
    /// Returns the number of bytes `value` stored under `key` is charged.
    pub fn cost(&self, key: &str, value: &[u8]) -> u64 {
        let mut cost = value.len() as u64;
        if self.include_key {
            cost += (key.len() + self.prefix.len()) as u64;
        }
        cost
    }

    pub fn includes_key(&self) -> bool {
        self.include_key
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
