//! Interpolation helpers:
//! - lerp_f64 (linear blend)
//! - quadratic ease in / out / in-out
//! - smoothstep (used for the `Bezier` mode)
//!
//! All easing functions take a normalized `t` in [0,1] and return a remapped `t'`
//! with `f(0) = 0` and `f(1) = 1`.

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn ease_in(t: f64) -> f64 {
    t * t
}

#[inline]
pub fn ease_out(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u
}

#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 1.0 - t;
        1.0 - 2.0 * u * u
    }
}

/// Hermite smoothstep `t^2 (3 - 2t)`.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-12, "left={a} right={b}");
    }

    #[test]
    fn endpoints_are_fixed() {
        for f in [ease_in, ease_out, ease_in_out, smoothstep] {
            approx(f(0.0), 0.0);
            approx(f(1.0), 1.0);
        }
    }

    #[test]
    fn ease_in_out_is_continuous_at_half() {
        approx(ease_in_out(0.5), 0.5);
        assert!((ease_in_out(0.5 - 1e-9) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ease_in_mirrors_ease_out() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            approx(ease_in(t), 1.0 - ease_out(1.0 - t));
        }
    }

    #[test]
    fn smoothstep_midpoint() {
        approx(smoothstep(0.5), 0.5);
        approx(smoothstep(0.25), 0.15625);
    }
}
