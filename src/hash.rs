use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_hash_with(f: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    f(&mut hasher);
    hasher.finish()
}

/// Fingerprint for a lead entry, stable across runs for the same row.
pub fn lead_fingerprint(seed: u64, table: &str, index: usize, name: &str, stage: &str) -> u64 {
    stable_hash_with(|hasher| {
        seed.hash(hasher);
        table.hash(hasher);
        index.hash(hasher);
        name.hash(hasher);
        stage.hash(hasher);
    })
}
