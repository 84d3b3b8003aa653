//! Accuracy of the vectorized transcendental functions against the standard
//! library scalar implementations.
//!
//! Inputs are drawn from a seeded `StdRng`, so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdlane::simd::traits::{SimdFloat, SimdVector};
use simdlane::simd::{F32x8, F64x4};

const SAMPLES: usize = 4096;

fn ulp_f32(a: f32, b: f32) -> u64 {
    if a == b || (a.is_nan() && b.is_nan()) {
        return 0;
    }
    (ordered_f32(a) - ordered_f32(b)).unsigned_abs()
}

fn ulp_f64(a: f64, b: f64) -> u64 {
    if a == b || (a.is_nan() && b.is_nan()) {
        return 0;
    }
    (ordered_f64(a) as i128 - ordered_f64(b) as i128).unsigned_abs() as u64
}

/// Maps float bits onto a monotonic integer line, so the distance across
/// zero counts ULPs correctly.
fn ordered_f32(x: f32) -> i64 {
    let bits = x.to_bits() as i32;
    if bits < 0 {
        i32::MIN as i64 - bits as i64
    } else {
        bits as i64
    }
}

fn ordered_f64(x: f64) -> i64 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN - bits
    } else {
        bits
    }
}

fn random_f32(rng: &mut StdRng, lo: f32, hi: f32) -> Vec<f32> {
    (0..SAMPLES).map(|_| rng.random_range(lo..hi)).collect()
}

fn random_f64(rng: &mut StdRng, lo: f64, hi: f64) -> Vec<f64> {
    (0..SAMPLES).map(|_| rng.random_range(lo..hi)).collect()
}

/// Positive values spread evenly over the decades `10^lo .. 10^hi`.
fn log_uniform_f32(rng: &mut StdRng, lo: f32, hi: f32) -> Vec<f32> {
    (0..SAMPLES)
        .map(|_| 10f32.powf(rng.random_range(lo..hi)))
        .collect()
}

fn log_uniform_f64(rng: &mut StdRng, lo: f64, hi: f64) -> Vec<f64> {
    (0..SAMPLES)
        .map(|_| 10f64.powf(rng.random_range(lo..hi)))
        .collect()
}

fn check_f32(
    name: &str,
    inputs: &[f32],
    vector: impl Fn(F32x8) -> F32x8,
    scalar: impl Fn(f32) -> f32,
    max_ulp: u64,
) {
    for chunk in inputs.chunks_exact(F32x8::LANES) {
        let out = vector(F32x8::from_slice(chunk)).to_array();
        for (&x, y) in chunk.iter().zip(out) {
            let expected = scalar(x);
            let ulp = ulp_f32(y, expected);
            assert!(
                ulp <= max_ulp,
                "{name}({x:e}) = {y:e}, std = {expected:e}, {ulp} ulp"
            );
        }
    }
}

fn check_f64(
    name: &str,
    inputs: &[f64],
    vector: impl Fn(F64x4) -> F64x4,
    scalar: impl Fn(f64) -> f64,
    max_ulp: u64,
) {
    for chunk in inputs.chunks_exact(F64x4::LANES) {
        let out = vector(F64x4::from_slice(chunk)).to_array();
        for (&x, y) in chunk.iter().zip(out) {
            let expected = scalar(x);
            let ulp = ulp_f64(y, expected);
            assert!(
                ulp <= max_ulp,
                "{name}({x:e}) = {y:e}, std = {expected:e}, {ulp} ulp"
            );
        }
    }
}

mod exp_tests {
    use super::*;

    #[test]
    fn test_exp_f32_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0001);
        let inputs = random_f32(&mut rng, -87.0, 88.0);
        check_f32("exp", &inputs, |v| v.exp(), f32::exp, 3);
    }

    #[test]
    fn test_exp_f32_near_zero() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0002);
        let inputs = random_f32(&mut rng, -1.0, 1.0);
        check_f32("exp", &inputs, |v| v.exp(), f32::exp, 2);
    }

    #[test]
    fn test_exp_f64_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0003);
        let inputs = random_f64(&mut rng, -700.0, 700.0);
        check_f64("exp", &inputs, |v| v.exp(), f64::exp, 3);
    }

    #[test]
    fn test_exp_overflow_and_underflow() {
        let x = F32x8::from_array([
            89.0,
            1e30,
            f32::INFINITY,
            -110.0,
            -1e30,
            f32::NEG_INFINITY,
            0.0,
            -0.0,
        ]);
        let out = x.exp().to_array();
        assert_eq!(&out[..3], &[f32::INFINITY; 3]);
        assert_eq!(&out[3..6], &[0.0; 3]);
        assert_eq!(&out[6..], &[1.0, 1.0]);

        let x = F64x4::from_array([710.0, -746.0, f64::NAN, 1.0]);
        let out = x.exp().to_array();
        assert_eq!(out[0], f64::INFINITY);
        assert_eq!(out[1], 0.0);
        assert!(out[2].is_nan());
    }
}

mod log_tests {
    use super::*;

    #[test]
    fn test_log_f32_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0101);
        let inputs = log_uniform_f32(&mut rng, -30.0, 30.0);
        check_f32("log", &inputs, |v| v.log(), f32::ln, 3);
    }

    #[test]
    fn test_log_f64_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0102);
        let inputs = log_uniform_f64(&mut rng, -300.0, 300.0);
        check_f64("log", &inputs, |v| v.log(), f64::ln, 3);
    }

    #[test]
    fn test_log2_log10_f64_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0103);
        let inputs = log_uniform_f64(&mut rng, -100.0, 100.0);
        check_f64("log2", &inputs, |v| v.log2(), f64::log2, 4);
        check_f64("log10", &inputs, |v| v.log10(), f64::log10, 4);
    }

    #[test]
    fn test_log2_log10_f32_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0104);
        let inputs = log_uniform_f32(&mut rng, -20.0, 20.0);
        check_f32("log2", &inputs, |v| v.log2(), f32::log2, 4);
        check_f32("log10", &inputs, |v| v.log10(), f32::log10, 4);
    }

    #[test]
    fn test_log_domain() {
        let x = F64x4::from_array([0.0, -1.0, f64::INFINITY, f64::NEG_INFINITY]);
        let out = x.log().to_array();
        assert_eq!(out[0], f64::NEG_INFINITY);
        assert!(out[1].is_nan());
        assert_eq!(out[2], f64::INFINITY);
        assert!(out[3].is_nan());
    }
}

mod trig_tests {
    use super::*;

    /// Documented bound for sin and cos: 4 ULP, or `|x| * eps` absolute where
    /// the result sits near a zero crossing.
    fn check_trig_f32(
        name: &str,
        inputs: &[f32],
        vector: impl Fn(F32x8) -> F32x8,
        scalar: fn(f32) -> f32,
    ) {
        for chunk in inputs.chunks_exact(F32x8::LANES) {
            let out = vector(F32x8::from_slice(chunk)).to_array();
            for (&x, y) in chunk.iter().zip(out) {
                let expected = scalar(x);
                let ulp = ulp_f32(y, expected);
                let abs = (y as f64 - expected as f64).abs();
                assert!(
                    ulp <= 4 || abs <= x.abs() as f64 * f32::EPSILON as f64,
                    "{name}({x:e}) = {y:e}, std = {expected:e}, {ulp} ulp"
                );
            }
        }
    }

    fn check_trig_f64(
        name: &str,
        inputs: &[f64],
        vector: impl Fn(F64x4) -> F64x4,
        scalar: fn(f64) -> f64,
    ) {
        for chunk in inputs.chunks_exact(F64x4::LANES) {
            let out = vector(F64x4::from_slice(chunk)).to_array();
            for (&x, y) in chunk.iter().zip(out) {
                let expected = scalar(x);
                let ulp = ulp_f64(y, expected);
                assert!(
                    ulp <= 4 || (y - expected).abs() <= x.abs() * f64::EPSILON,
                    "{name}({x:e}) = {y:e}, std = {expected:e}, {ulp} ulp"
                );
            }
        }
    }

    fn with_random_signs<T>(rng: &mut StdRng, values: Vec<T>) -> Vec<T>
    where
        T: std::ops::Neg<Output = T>,
    {
        values
            .into_iter()
            .map(|v| if rng.random_bool(0.5) { -v } else { v })
            .collect()
    }

    #[test]
    fn test_sin_cos_f32_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0201);
        let inputs = random_f32(&mut rng, -100.0, 100.0);
        check_trig_f32("sin", &inputs, |v| v.sin(), f32::sin);
        check_trig_f32("cos", &inputs, |v| v.cos(), f32::cos);
    }

    #[test]
    fn test_sin_cos_f64_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0202);
        let inputs = random_f64(&mut rng, -100.0, 100.0);
        check_trig_f64("sin", &inputs, |v| v.sin(), f64::sin);
        check_trig_f64("cos", &inputs, |v| v.cos(), f64::cos);
    }

    #[test]
    fn test_sin_cos_f32_full_range() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0204);
        let magnitudes = log_uniform_f32(&mut rng, -44.0, 38.5);
        let inputs = with_random_signs(&mut rng, magnitudes);
        check_trig_f32("sin", &inputs, |v| v.sin(), f32::sin);
        check_trig_f32("cos", &inputs, |v| v.cos(), f32::cos);
        check_trig_f32("sin_cos.0", &inputs, |v| v.sin_cos().0, f32::sin);
        check_trig_f32("sin_cos.1", &inputs, |v| v.sin_cos().1, f32::cos);
    }

    #[test]
    fn test_sin_cos_f64_full_range() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0205);
        let magnitudes = log_uniform_f64(&mut rng, -320.0, 308.0);
        let inputs = with_random_signs(&mut rng, magnitudes);
        check_trig_f64("sin", &inputs, |v| v.sin(), f64::sin);
        check_trig_f64("cos", &inputs, |v| v.cos(), f64::cos);
        check_trig_f64("sin_cos.0", &inputs, |v| v.sin_cos().0, f64::sin);
        check_trig_f64("sin_cos.1", &inputs, |v| v.sin_cos().1, f64::cos);
    }

    #[test]
    fn test_sin_cos_large_and_subnormal_arguments() {
        let inputs = [
            1e8f32,
            1e10,
            -3e38,
            f32::MAX,
            8192.5,
            f32::from_bits(1),
            -f32::from_bits(0x007f_ffff),
            f32::MIN,
        ];
        check_trig_f32("sin", &inputs, |v| v.sin(), f32::sin);
        check_trig_f32("cos", &inputs, |v| v.cos(), f32::cos);

        let inputs = [
            1e22f64,
            1e300,
            f64::MAX,
            -1e15,
            1_048_577.0,
            f64::from_bits(1),
            -4e-320,
            f64::MIN,
        ];
        check_trig_f64("sin", &inputs, |v| v.sin(), f64::sin);
        check_trig_f64("cos", &inputs, |v| v.cos(), f64::cos);

        // Past the reduction limit every lane is the scalar reference.
        let x = F64x4::from_array([1e22, 1e300, -1e15, f64::MAX]);
        let expected = x.to_array().map(f64::sin);
        assert_eq!(x.sin().to_array().map(f64::to_bits), expected.map(f64::to_bits));
    }

    #[test]
    fn test_sin_cos_agree_with_separate_calls() {
        let v = F32x8::from_array([-3.0, -1.5, -0.1, 0.0, 0.7, 2.2, 4.9, 12.0]);
        let (s, c) = v.sin_cos();
        assert_eq!(s.to_array(), v.sin().to_array());
        assert_eq!(c.to_array(), v.cos().to_array());
    }

    #[test]
    fn test_pythagorean_identity() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0203);
        let inputs = random_f64(&mut rng, -10.0, 10.0);
        for chunk in inputs.chunks_exact(4) {
            let (s, c) = F64x4::from_slice(chunk).sin_cos();
            let one = s.mul(s).add(c.mul(c)).to_array();
            assert!(one.iter().all(|&v| (v - 1.0).abs() <= 8.0 * f64::EPSILON));
        }
    }
}
