use crate::models::{Particle, ParticleId};

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    particle: Option<Particle>,
}

/// Generational slot storage for particles.
///
/// Removing a particle never moves the others, so every live [`ParticleId`] stays valid.
/// Iteration runs in slot order, which keeps each tick deterministic.
///
/// # Examples
///
/// ```
/// use particle_sandbox::models::{Particle, ParticleStore};
/// use particle_sandbox::utils::Vector2;
///
/// let mut store = ParticleStore::new();
/// let a = store.insert(Particle::new(Vector2::ZERO, 1.0).unwrap());
/// let b = store.insert(Particle::new(Vector2::ONE, 1.0).unwrap());
///
/// store.remove(a);
/// assert!(!store.contains(a));
/// assert!(store.contains(b));
///
/// // The freed slot is reused under a new generation.
/// let c = store.insert(Particle::new(Vector2::ZERO, 2.0).unwrap());
/// assert_eq!(c.index(), a.index());
/// assert_ne!(c, a);
/// assert!(store.get(a).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ParticleStore {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, particle: Particle) -> ParticleId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.particle = Some(particle);
                ParticleId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, particle: Some(particle) });
                ParticleId::new(index, 0)
            }
        }
    }

    /// Removes and returns the particle, invalidating `id`.
    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let particle = slot.particle.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as u32);
        self.len -= 1;
        Some(particle)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.particle.as_ref())
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.particle.as_mut())
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live particles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.particle
                .as_ref()
                .map(|p| (ParticleId::new(index as u32, slot.generation), p))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticleId, &mut Particle)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.particle
                .as_mut()
                .map(|p| (ParticleId::new(index as u32, generation), p))
        })
    }

    pub fn ids(&self) -> Vec<ParticleId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Keeps only the particles for which `keep` returns true. Returns the removed handles.
    pub fn retain<F>(&mut self, mut keep: F) -> Vec<ParticleId>
    where
        F: FnMut(ParticleId, &Particle) -> bool,
    {
        let doomed: Vec<ParticleId> = self
            .iter()
            .filter(|(id, p)| !keep(*id, *p))
            .map(|(id, _)| id)
            .collect();
        for id in &doomed {
            self.remove(*id);
        }
        doomed
    }

    pub fn clear(&mut self) {
        let ids = self.ids();
        for id in ids {
            self.remove(id);
        }
    }
}
