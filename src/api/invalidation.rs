use std::cell::Cell;
use std::rc::Rc;

/// Shared "needs a frame" flag.
///
/// Clones share one cell, so observers registered on axis and selection
/// state can raise it without a reference back to the chart. The chart
/// consumes it once per frame.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag {
    cell: Rc<Cell<bool>>,
}

impl DirtyFlag {
    #[must_use]
    pub fn new(dirty: bool) -> Self {
        Self {
            cell: Rc::new(Cell::new(dirty)),
        }
    }

    pub fn mark(&self) {
        self.cell.set(true);
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.cell.get()
    }

    /// Returns the pending state and resets it.
    pub fn take(&self) -> bool {
        self.cell.replace(false)
    }
}

#[cfg(test)]
mod tests {
    use super::DirtyFlag;

    #[test]
    fn clones_share_state_and_take_consumes() {
        let flag = DirtyFlag::new(false);
        let observer = flag.clone();
        observer.mark();
        assert!(flag.is_dirty());
        assert!(flag.take());
        assert!(!observer.is_dirty());
        assert!(!flag.take());
    }
}
