//! Small scalar helpers shared by the spawn generators and the tick loop.

/// Linear interpolation: moves `a` a fraction `t` of the way toward `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Monotonic ramp from 0 toward 1 as `value` approaches `period`.
///
/// Used at spawn time to derive a color channel intensity from a random
/// base magnitude. Values past the period saturate at 1.
#[inline]
pub fn fade_in(value: f32, period: f32) -> f32 {
    smoothstep((value / period).clamp(0.0, 1.0))
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_identity_when_equal() {
        assert_eq!(lerp(4.5, 4.5, 0.125), 4.5);
    }

    #[test]
    fn test_lerp_moves_exact_fraction() {
        // 12.5% of the way from 0 to 8 is 1.
        assert_eq!(lerp(0.0, 8.0, 0.125), 1.0);
        // Works from either side.
        assert_eq!(lerp(8.0, 0.0, 0.125), 7.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(-3.0, 5.0, 0.0), -3.0);
        assert_eq!(lerp(-3.0, 5.0, 1.0), 5.0);
    }

    #[test]
    fn test_fade_in_bounds() {
        assert_eq!(fade_in(0.0, 360.0), 0.0);
        assert_eq!(fade_in(360.0, 360.0), 1.0);
        assert_eq!(fade_in(500.0, 360.0), 1.0);
    }

    #[test]
    fn test_fade_in_monotonic() {
        let mut prev = fade_in(0.0, 360.0);
        for step in 1..=36 {
            let next = fade_in(step as f32 * 10.0, 360.0);
            assert!(next >= prev, "fade_in must never decrease");
            prev = next;
        }
    }
}
