//! Fixed-window rolling average over integer samples.
//!
//! The light-conditioning pipeline leans on several of these at different
//! window sizes (half a second up to half a minute). The window is a
//! compile-time constant so the buffer lives inline in the owning struct,
//! and the sum is maintained incrementally - pushing a sample is O(1).
//!
//! The buffer starts zero-filled, so the average ramps up from zero during
//! the first `N` samples rather than tracking the input exactly.

/// Circular-buffer rolling average of the last `N` integer samples.
#[derive(Debug, Clone)]
pub struct RollingAverage<const N: usize> {
    buf: [i32; N],
    index: usize,
    sum: i64,
}

impl<const N: usize> Default for RollingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RollingAverage<N> {
    /// Create a zero-filled window.
    pub fn new() -> Self {
        Self {
            buf: [0; N],
            index: 0,
            sum: 0,
        }
    }

    /// Push a sample and return the updated window average.
    #[inline]
    pub fn next(&mut self, sample: i32) -> i32 {
        self.sum += i64::from(sample) - i64::from(self.buf[self.index]);
        self.buf[self.index] = sample;
        self.index = (self.index + 1) % N;
        (self.sum / N as i64) as i32
    }

    /// Current window average without pushing.
    pub fn average(&self) -> i32 {
        (self.sum / N as i64) as i32
    }
}
