use crate::models::{Particle, ParticleStore};
use crate::utils::Vector2;

fn particle_at(x: f64) -> Particle {
    Particle::new(Vector2::new(x, 0.0), 1.0).unwrap()
}

#[test]
fn test_insert_and_get() {
    let mut store = ParticleStore::new();
    let a = store.insert(particle_at(1.0));
    let b = store.insert(particle_at(2.0));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(a).unwrap().position.x, 1.0);
    assert_eq!(store.get(b).unwrap().position.x, 2.0);
}

#[test]
fn test_remove_invalidates_handle() {
    let mut store = ParticleStore::new();
    let a = store.insert(particle_at(1.0));
    assert!(store.remove(a).is_some());
    assert!(store.remove(a).is_none(), "Double remove must be a no-op");
    assert!(store.get(a).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_stale_handle_after_slot_reuse() {
    let mut store = ParticleStore::new();
    let a = store.insert(particle_at(1.0));
    store.remove(a);
    let b = store.insert(particle_at(5.0));

    assert_eq!(a.index(), b.index());
    assert_ne!(a.generation(), b.generation());
    assert!(store.get(a).is_none());
    assert!(store.get_mut(a).is_none());
    assert_eq!(store.get(b).unwrap().position.x, 5.0);
}

#[test]
fn test_iteration_is_in_slot_order() {
    let mut store = ParticleStore::new();
    let ids: Vec<_> = (0..5).map(|i| store.insert(particle_at(i as f64))).collect();
    store.remove(ids[1]);
    store.remove(ids[3]);

    let xs: Vec<f64> = store.iter().map(|(_, p)| p.position.x).collect();
    assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    assert_eq!(store.ids(), vec![ids[0], ids[2], ids[4]]);
}

#[test]
fn test_iter_mut_updates_in_place() {
    let mut store = ParticleStore::new();
    let a = store.insert(particle_at(1.0));
    for (_, p) in store.iter_mut() {
        p.velocity = Vector2::new(0.0, 3.0);
    }
    assert_eq!(store.get(a).unwrap().velocity, Vector2::new(0.0, 3.0));
}

#[test]
fn test_retain_returns_removed_ids() {
    let mut store = ParticleStore::new();
    let ids: Vec<_> = (0..4).map(|i| store.insert(particle_at(i as f64 * 10.0))).collect();
    let removed = store.retain(|_, p| p.position.x < 15.0);
    assert_eq!(removed, vec![ids[2], ids[3]]);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_clear() {
    let mut store = ParticleStore::with_capacity(8);
    let a = store.insert(particle_at(0.0));
    store.insert(particle_at(1.0));
    store.clear();
    assert!(store.is_empty());
    assert!(!store.contains(a));
}
