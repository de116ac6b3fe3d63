use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_triple(id: &str) -> (f32, f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0x1f_ffff) as f64 / 0x1f_ffff as f64) as f32;
    let y = (((hash >> 21) & 0x1f_ffff) as f64 / 0x1f_ffff as f64) as f32;
    let z = (((hash >> 42) & 0x1f_ffff) as f64 / 0x1f_ffff as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0, (z * 2.0) - 1.0)
}

pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
