use serde::{Deserialize, Serialize};

/// Stable index of a body inside its owning [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Contiguous storage addressed by [`BodyHandle`].
///
/// Items are only ever appended, so a handle stays valid for the arena's
/// whole lifetime.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Arena<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn insert(&mut self, item: T) -> BodyHandle {
        let handle = BodyHandle::from_index(self.items.len());
        self.items.push(item);
        handle
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.items.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.items.get_mut(handle.index())
    }

    /// Borrows two distinct items mutably at once.
    pub fn get2_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut T, &mut T)> {
        if a == b {
            return None;
        }

        let (first, second, flipped) = if a.index() < b.index() {
            (a, b, false)
        } else {
            (b, a, true)
        };

        let second_index = second.index();
        if second_index >= self.items.len() {
            return None;
        }

        let (left, right) = self.items.split_at_mut(second_index);
        let first_slot = &mut left[first.index()];
        let second_slot = &mut right[0];

        if flipped {
            Some((second_slot, first_slot))
        } else {
            Some((first_slot, second_slot))
        }
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        handle.index() < self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        (0..self.items.len()).map(BodyHandle::from_index)
    }

    pub fn enumerate(&self) -> impl Iterator<Item = (BodyHandle, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (BodyHandle::from_index(index), item))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Mutable view of every item; the item count cannot change through it.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
