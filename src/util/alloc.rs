use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

/// Shared tally of how many [`CountedDrop`] values have been dropped.
#[derive(Debug, Clone, Default)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    pub fn track(&self, key: u32) -> CountedDrop {
        CountedDrop {
            key,
            counter: self.clone(),
        }
    }

    pub fn dropped(&self) -> usize {
        self.0.get()
    }
}

/// An orderable value that reports to its [`DropCounter`] when dropped. Ordering and equality
/// only consider the key.
#[derive(Debug)]
pub struct CountedDrop {
    pub key: u32,
    counter: DropCounter,
}

impl PartialEq for CountedDrop {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CountedDrop {}

impl PartialOrd for CountedDrop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CountedDrop {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        let counter = &self.counter.0;
        counter.set(counter.get() + 1);
    }
}
