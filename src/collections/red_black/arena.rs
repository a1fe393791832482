use std::mem;
use std::ops::{Index, IndexMut};

/// The position of a value within an [`Arena`]. Indices of removed values are handed out again by
/// later insertions, so an index is only meaningful while its value is still present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(usize);

enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<NodeIndex> },
}

/// Slot storage that owns every node of a tree. Vacant slots form a singly linked free list
/// threaded through the slots themselves.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<NodeIndex>,
    len: usize,
}

impl<T> Arena<T> {
    pub const fn new() -> Arena<T> {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    /// The number of occupied slots.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub fn insert(&mut self, value: T) -> NodeIndex {
        self.len += 1;

        match self.free {
            Some(index) => {
                match mem::replace(&mut self.slots[index.0], Slot::Occupied(value)) {
                    Slot::Vacant { next_free } => self.free = next_free,
                    Slot::Occupied(_) => unreachable!("the free list led to an occupied slot"),
                }
                index
            },
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeIndex(self.slots.len() - 1)
            },
        }
    }

    pub fn remove(&mut self, index: NodeIndex) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };

        match mem::replace(&mut self.slots[index.0], vacant) {
            Slot::Occupied(value) => {
                self.free = Some(index);
                self.len -= 1;
                value
            },
            Slot::Vacant { .. } => unreachable!("removed a value from a vacant slot"),
        }
    }

    pub fn get(&self, index: NodeIndex) -> Option<&T> {
        match self.slots.get(index.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        match self.slots.get_mut(index.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Drops every value and releases the slot storage.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.free = None;
        self.len = 0;
    }
}

impl<T> Index<NodeIndex> for Arena<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: NodeIndex) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => unreachable!("slot {} is not occupied", index.0),
        }
    }
}

impl<T> IndexMut<NodeIndex> for Arena<T> {
    #[track_caller]
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(value) => value,
            None => unreachable!("slot {} is not occupied", index.0),
        }
    }
}
