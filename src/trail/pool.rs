//! Trail domain: a grow-on-demand free list of reusable instances.

use std::collections::VecDeque;

/// Free list of inactive instances. Grows in fixed batches whenever an
/// acquisition finds it empty; instances are never destroyed.
#[derive(Debug, Clone)]
pub struct MarkerPool<T> {
    available: VecDeque<T>,
    growth: usize,
    created: usize,
}

impl<T> MarkerPool<T> {
    pub fn new(growth: usize) -> Self {
        Self {
            available: VecDeque::new(),
            growth: growth.max(1),
            created: 0,
        }
    }

    /// Add one batch of fresh instances.
    pub fn grow(&mut self, mut create: impl FnMut() -> T) {
        for _ in 0..self.growth {
            self.available.push_back(create());
            self.created += 1;
        }
    }

    /// Take the oldest inactive instance, growing first if none is left.
    pub fn acquire(&mut self, mut create: impl FnMut() -> T) -> T {
        if let Some(instance) = self.available.pop_front() {
            return instance;
        }
        self.grow(&mut create);
        self.available.pop_front().unwrap_or_else(|| {
            self.created += 1;
            create()
        })
    }

    /// Return an instance for reuse.
    pub fn release(&mut self, instance: T) {
        self.available.push_back(instance);
    }

    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Total instances ever created by this pool.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Instances currently handed out.
    pub fn in_use(&self) -> usize {
        self.created - self.available.len()
    }
}
