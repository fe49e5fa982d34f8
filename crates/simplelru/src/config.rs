//! Cache construction options

use crate::error::{Error, Result};

/// Options used to build a [`SimpleLru`](crate::SimpleLru)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of live entries
    pub capacity: usize,

    /// Reserve room for `capacity` entries up front
    pub preallocate: bool,
}

impl Config {
    /// Create a config for the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: false,
        }
    }

    /// Reserve index and arena space for the full capacity at construction
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }

    /// Check that the config describes a usable cache
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Number of slots to reserve in each index
    pub(crate) fn reserve(&self) -> usize {
        if self.preallocate {
            self.capacity
        } else {
            0
        }
    }
}
