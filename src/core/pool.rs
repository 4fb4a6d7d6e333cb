// File: src/core/pool.rs
//! Fixed-size pool of [`DistanceMeasurer`]s shared by concurrent lookups.
//!
//! Idle measurers sit in a bounded channel. Borrowing receives one (blocking
//! while every measurer is out) and dropping the guard sends it back, so at
//! most `size` distance computations run at once and no scratch buffer is ever
//! used by two threads.

use crate::core::distance::DistanceMeasurer;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fmt;
use std::ops::{Deref, DerefMut};

pub struct MeasurerPool {
    idle_tx: Sender<DistanceMeasurer>,
    idle_rx: Receiver<DistanceMeasurer>,
    size: usize,
}

impl MeasurerPool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (idle_tx, idle_rx) = bounded(size);
        for _ in 0..size {
            // Capacity equals size, so this never blocks.
            let _ = idle_tx.send(DistanceMeasurer::new());
        }
        Self {
            idle_tx,
            idle_rx,
            size,
        }
    }

    /// One measurer per available CPU.
    pub fn with_available_parallelism() -> Self {
        Self::new(num_cpus::get())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrow a measurer, blocking until one is free.
    pub fn acquire(&self) -> PooledMeasurer<'_> {
        // The pool owns a sender, so the channel cannot disconnect while `self` is alive.
        let measurer = self.idle_rx.recv().unwrap_or_default();
        PooledMeasurer {
            measurer,
            pool: self,
        }
    }
}

impl Default for MeasurerPool {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}

impl Clone for MeasurerPool {
    /// Scratch buffers are never shared; a clone gets fresh measurers.
    fn clone(&self) -> Self {
        Self::new(self.size)
    }
}

impl fmt::Debug for MeasurerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasurerPool")
            .field("size", &self.size)
            .field("idle", &self.idle_rx.len())
            .finish()
    }
}

/// Exclusive loan of one measurer; returned to the pool on drop.
pub struct PooledMeasurer<'a> {
    measurer: DistanceMeasurer,
    pool: &'a MeasurerPool,
}

impl Deref for PooledMeasurer<'_> {
    type Target = DistanceMeasurer;

    fn deref(&self) -> &DistanceMeasurer {
        &self.measurer
    }
}

impl DerefMut for PooledMeasurer<'_> {
    fn deref_mut(&mut self) -> &mut DistanceMeasurer {
        &mut self.measurer
    }
}

impl Drop for PooledMeasurer<'_> {
    fn drop(&mut self) {
        let measurer = std::mem::take(&mut self.measurer);
        let _ = self.pool.idle_tx.try_send(measurer);
    }
}
