//! Entry Module
//!
//! A stored buffer together with the cost it was charged.

// == Entry ==
/// One stored item.
///
/// `cost` is fixed at insertion; removal subtracts exactly this amount even if
/// accounting settings would price the item differently today.
#[derive(Debug, Clone)]
pub struct Entry {
    value: Box<[u8]>,
    cost: u64,
}

impl Entry {
    pub fn new(value: impl Into<Box<[u8]>>, cost: u64) -> Self {
        Self {
            value: value.into(),
            cost,
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_keeps_bytes_and_cost() {
        let entry = Entry::new(b"foobar".to_vec(), 13);
        assert_eq!(entry.value(), b"foobar");
        assert_eq!(entry.cost(), 13);
    }
}
