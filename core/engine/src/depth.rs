//! Recursion-depth limiting (§4.8). Only true sub-expression recursion
//! (parens, array elements, call args, computed access, ternary branches)
//! counts — precedence-level recursion does not.

use jexpr_value::Error;
use std::cell::Cell;

pub struct DepthTracker {
    current: Cell<u32>,
    max: u32,
}

impl DepthTracker {
    pub const fn new(max: u32) -> Self {
        Self {
            current: Cell::new(0),
            max,
        }
    }

    /// Enters one level of sub-expression recursion, returning a guard that
    /// restores the counter on drop. Fails with a `MaxDepthError` once the
    /// ceiling is exceeded.
    pub fn enter(&self) -> Result<DepthGuard<'_>, Error<'static>> {
        let next = self.current.get() + 1;
        if next > self.max {
            return Err(Error::max_depth());
        }
        self.current.set(next);
        Ok(DepthGuard { tracker: self })
    }
}

pub struct DepthGuard<'t> {
    tracker: &'t DepthTracker,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.tracker.current.set(self.tracker.current.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_exactly_max_levels() {
        let tracker = DepthTracker::new(2);
        let a = tracker.enter().unwrap();
        let b = tracker.enter().unwrap();
        assert!(tracker.enter().is_err());
        drop(b);
        drop(a);
        assert!(tracker.enter().is_ok());
    }
}
