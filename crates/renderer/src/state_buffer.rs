//! Fixed-capacity holder for the latest raw telemetry payload.
//!
//! ## Design
//!
//! - **One allocation**: the backing array is sized once and reused for
//!   every update.
//! - **Atomic replace**: a payload that is empty or does not fit is rejected
//!   and the previous one stays readable, so a bad update never leaves a torn
//!   state.

use osd_common::{OsdError, OsdResult};

/// Bytes reserved for one telemetry payload.
pub const STATE_BUFFER_CAPACITY: usize = 4096;

#[derive(Debug, Clone)]
pub struct StateBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl Default for StateBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl StateBuffer {
    pub fn new() -> Self {
        Self {
            data: vec![0; STATE_BUFFER_CAPACITY].into_boxed_slice(),
            len: 0,
        }
    }

    /// Replace the stored payload.
    pub fn store(&mut self, payload: &[u8]) -> OsdResult<()> {
        if payload.is_empty() {
            return Err(OsdError::EmptyState);
        }
        if payload.len() > self.data.len() {
            return Err(OsdError::StateOverflow {
                requested: payload.len(),
                capacity: self.data.len(),
            });
        }
        self.data[..payload.len()].copy_from_slice(payload);
        self.len = payload.len();
        Ok(())
    }

    /// Current payload; empty until the first successful store.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
