#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub(crate) fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Wrap `x` into `[0, 1)`. Non-finite input maps to `None`.
#[inline]
pub(crate) fn wrap01(x: f32) -> Option<f32> {
    if !x.is_finite() {
        return None;
    }
    let r = x.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0
    Some(if r >= 1.0 { 0.0 } else { r })
}

/// SplitMix64 finalizer.
#[inline]
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Map the top 24 bits of `h` to `[0, 1)`.
#[inline]
pub(crate) fn unit_f32(h: u64) -> f32 {
    ((h >> 40) as f32) * (1.0 / ((1u64 << 24) as f32))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
