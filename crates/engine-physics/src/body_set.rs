use crate::RigidBody;

/// Stable handle to a body stored in a [`BodySet`].
///
/// Handles carry a generation, so a handle to a removed body never aliases a body inserted
/// later into the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Arena owning the bodies of a world. Iteration follows slot order, which keeps pair
/// enumeration deterministic.
#[derive(Debug, Default)]
pub struct BodySet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        BodyHandle {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(body)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.body.as_ref().map(|b| {
                (
                    BodyHandle {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    b,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.body.as_mut().map(|b| {
                (
                    BodyHandle {
                        index: i as u32,
                        generation,
                    },
                    b,
                )
            })
        })
    }

    pub fn handles(&self) -> Vec<BodyHandle> {
        self.iter().map(|(h, _)| h).collect()
    }

    /// Removes every body, returning them in slot order.
    pub fn drain(&mut self) -> Vec<RigidBody> {
        let mut out = Vec::with_capacity(self.len);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(body) = slot.body.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
                out.push(body);
            }
        }
        self.len = 0;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    #[test]
    fn stale_handles_do_not_alias_reused_slots() {
        let mut set = BodySet::new();
        let a = set.insert(RigidBody::dynamic(Shape::default()));
        assert!(set.remove(a).is_some());
        let b = set.insert(RigidBody::dynamic(Shape::default()));

        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(set.get(a).is_none());
        assert!(set.get(b).is_some());
        assert!(set.remove(a).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iteration_follows_slot_order() {
        let mut set = BodySet::new();
        let handles: Vec<_> = (0..4)
            .map(|_| set.insert(RigidBody::dynamic(Shape::default())))
            .collect();
        assert_eq!(set.handles(), handles);

        set.remove(handles[1]);
        assert_eq!(set.handles(), vec![handles[0], handles[2], handles[3]]);

        assert_eq!(set.drain().len(), 3);
        assert!(set.is_empty());
        assert!(!set.contains(handles[0]));
    }
}
