//! Type-safe handles for entity bookkeeping
//!
//! A [`HandleMap`] stores values in slots. Each slot carries a generation
//! that is bumped whenever its value is removed, and a handle only resolves
//! while its generation matches the slot's. A handle kept past a removal
//! therefore reads as absent, even after the slot is reused.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Generation 0 is never issued; it marks the null handle.
const NULL_GENERATION: u32 = 0;

/// A type-safe handle to a value of type T
pub struct Handle<T> {
    slot: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    const fn from_parts(slot: u32, generation: u32) -> Self {
        Self {
            slot,
            generation,
            _marker: PhantomData,
        }
    }

    /// A handle that never resolves
    pub const fn null() -> Self {
        Self::from_parts(0, NULL_GENERATION)
    }

    pub const fn is_null(&self) -> bool {
        self.generation == NULL_GENERATION
    }

    /// Slot index. Reused after removal.
    pub const fn index(&self) -> u32 {
        self.slot
    }

    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

// Written out so that `T` needs none of these traits itself
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.slot, self.generation) == (other.slot, other.generation)
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.slot, self.generation).hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("Handle(null)")
        } else {
            write!(f, "Handle({}v{})", self.slot, self.generation)
        }
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Values addressed by generational handles
#[derive(Debug)]
pub struct HandleMap<T> {
    slots: Vec<Slot<T>>,
    /// Empty slot indices, most recently freed last
    vacant: Vec<u32>,
}

impl<T> HandleMap<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Store `value` in a vacant slot (or a new one) and hand out its handle
    pub fn insert(&mut self, value: T) -> Handle<T> {
        if let Some(index) = self.vacant.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle::from_parts(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: NULL_GENERATION + 1,
            value: Some(value),
        });
        Handle::from_parts(index, NULL_GENERATION + 1)
    }

    fn live_slot(&self, handle: Handle<T>) -> Option<&Slot<T>> {
        let slot = self.slots.get(handle.slot as usize)?;
        (slot.generation == handle.generation && slot.value.is_some()).then_some(slot)
    }

    /// Take the value out. A second call with the same handle gets `None`.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        self.live_slot(handle)?;
        let slot = &mut self.slots[handle.slot as usize];
        let value = slot.value.take();
        slot.generation = match slot.generation.wrapping_add(1) {
            NULL_GENERATION => NULL_GENERATION + 1,
            next => next,
        };
        self.vacant.push(handle.slot);
        value
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.live_slot(handle)?.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.live_slot(handle)?;
        self.slots[handle.slot as usize].value.as_mut()
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.live_slot(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every value, returning them with their (now stale) handles
    pub fn drain(&mut self) -> Vec<(Handle<T>, T)> {
        let live: Vec<Handle<T>> = self.iter().map(|(handle, _)| handle).collect();
        live.into_iter()
            .filter_map(|handle| self.remove(handle).map(|value| (handle, value)))
            .collect()
    }

    /// Live handles and values, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            Some((Handle::from_parts(index as u32, slot.generation), value))
        })
    }
}

impl<T> Default for HandleMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
