//! Native AVX2 specializations against the portable fallback, lane for lane.
//!
//! Only built when the crate was compiled for the AVX2 target; the fallback
//! types are always available under `simd::fallback`. Cross-width
//! conversions exist on one side only, so those are checked against plain
//! scalar casts.

#![cfg(avx2)]

use simdlane::simd::avx2;
use simdlane::simd::fallback::Vector;
use simdlane::simd::traits::{SimdDegrade, SimdFloat, SimdInt, SimdPromote, SimdVector};
use simdlane::simd::{Mask, Swizzle};

const SPECIAL_F32: [f32; 16] = [
    0.0,
    -0.0,
    1.0,
    -2.5,
    1e-40,
    -1e-42,
    f32::MIN_POSITIVE,
    f32::MAX,
    f32::MIN,
    f32::INFINITY,
    f32::NEG_INFINITY,
    f32::NAN,
    3e9,
    -3e9,
    4294967040.0,
    0.5,
];

const SPECIAL_F64: [f64; 16] = [
    0.0,
    -0.0,
    1.0,
    -2.5,
    1e-310,
    -4e-320,
    f64::MIN_POSITIVE,
    f64::MAX,
    f64::MIN,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::NAN,
    1e19,
    -1e19,
    9.2e18,
    0.5,
];

fn same_f32(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

fn same_f64(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

fn ulp_f32(a: f32, b: f32) -> u32 {
    if same_f32(a, b) {
        return 0;
    }
    (a.to_bits() as i64 - b.to_bits() as i64).unsigned_abs() as u32
}

fn ulp_f64(a: f64, b: f64) -> u64 {
    if same_f64(a, b) {
        return 0;
    }
    (a.to_bits() as i128 - b.to_bits() as i128).unsigned_abs() as u64
}

/// Every ordered pair of special values, eight lanes at a time.
fn f32_pairs() -> Vec<([f32; 8], [f32; 8])> {
    let mut lhs = Vec::new();
    let mut rhs = Vec::new();
    for &a in &SPECIAL_F32 {
        for &b in &SPECIAL_F32 {
            lhs.push(a);
            rhs.push(b);
        }
    }
    lhs.chunks_exact(8)
        .zip(rhs.chunks_exact(8))
        .map(|(a, b)| (a.try_into().unwrap(), b.try_into().unwrap()))
        .collect()
}

fn f64_pairs() -> Vec<([f64; 4], [f64; 4])> {
    let mut lhs = Vec::new();
    let mut rhs = Vec::new();
    for &a in &SPECIAL_F64 {
        for &b in &SPECIAL_F64 {
            lhs.push(a);
            rhs.push(b);
        }
    }
    lhs.chunks_exact(4)
        .zip(rhs.chunks_exact(4))
        .map(|(a, b)| (a.try_into().unwrap(), b.try_into().unwrap()))
        .collect()
}

mod float_tests {
    use super::*;

    type N8 = avx2::F32x8;
    type P8 = Vector<f32, 8>;
    type N4 = avx2::F64x4;
    type P4 = Vector<f64, 4>;

    fn check_binary_f32(name: &str, native: fn(N8, N8) -> N8, portable: fn(P8, P8) -> P8) {
        for (a, b) in f32_pairs() {
            let n = native(N8::from_array(a), N8::from_array(b)).to_array();
            let p = portable(P8::from_array(a), P8::from_array(b)).to_array();
            for lane in 0..8 {
                assert!(
                    same_f32(n[lane], p[lane]),
                    "{name}({}, {}): native {} portable {}",
                    a[lane],
                    b[lane],
                    n[lane],
                    p[lane]
                );
            }
        }
    }

    fn check_binary_f64(name: &str, native: fn(N4, N4) -> N4, portable: fn(P4, P4) -> P4) {
        for (a, b) in f64_pairs() {
            let n = native(N4::from_array(a), N4::from_array(b)).to_array();
            let p = portable(P4::from_array(a), P4::from_array(b)).to_array();
            for lane in 0..4 {
                assert!(
                    same_f64(n[lane], p[lane]),
                    "{name}({}, {}): native {} portable {}",
                    a[lane],
                    b[lane],
                    n[lane],
                    p[lane]
                );
            }
        }
    }

    #[test]
    fn test_arithmetic_parity() {
        check_binary_f32("add", N8::add, P8::add);
        check_binary_f32("sub", N8::sub, P8::sub);
        check_binary_f32("mul", N8::mul, P8::mul);
        check_binary_f32("div", N8::div, P8::div);
        check_binary_f32("min", N8::min, P8::min);
        check_binary_f32("max", N8::max, P8::max);
        check_binary_f64("add", N4::add, P4::add);
        check_binary_f64("div", N4::div, P4::div);
        check_binary_f64("min", N4::min, P4::min);
        check_binary_f64("max", N4::max, P4::max);
    }

    #[test]
    fn test_fused_parity() {
        for (a, b) in f32_pairs() {
            let (na, nb) = (N8::from_array(a), N8::from_array(b));
            let (pa, pb) = (P8::from_array(a), P8::from_array(b));
            let n = na.mul_add(nb, na).to_array();
            let p = pa.mul_add(pb, pa).to_array();
            assert!(n.iter().zip(p).all(|(&x, y)| same_f32(x, y)));
            let n = na.mul_sub(nb, nb).to_array();
            let p = pa.mul_sub(pb, pb).to_array();
            assert!(n.iter().zip(p).all(|(&x, y)| same_f32(x, y)));
        }
    }

    #[test]
    fn test_comparison_parity() {
        for (a, b) in f32_pairs() {
            let (na, nb) = (N8::from_array(a), N8::from_array(b));
            let (pa, pb) = (P8::from_array(a), P8::from_array(b));
            assert_eq!(na.cmp_eq(nb), pa.cmp_eq(pb));
            assert_eq!(na.cmp_ne(nb), pa.cmp_ne(pb));
            assert_eq!(na.cmp_lt(nb), pa.cmp_lt(pb));
            assert_eq!(na.cmp_le(nb), pa.cmp_le(pb));
            assert_eq!(na.cmp_gt(nb), pa.cmp_gt(pb));
            assert_eq!(na.cmp_ge(nb), pa.cmp_ge(pb));
            assert_eq!(na.is_nan(), pa.is_nan());
        }
    }

    #[test]
    fn test_unary_parity() {
        for chunk in SPECIAL_F32.chunks_exact(8) {
            let n = N8::from_slice(chunk);
            let p = P8::from_slice(chunk);
            let pairs: [(N8, P8); 8] = [
                (n.sqrt(), p.sqrt()),
                (n.round(), p.round()),
                (n.floor(), p.floor()),
                (n.ceil(), p.ceil()),
                (n.trunc(), p.trunc()),
                (n.abs(), p.abs()),
                (n.neg(), p.neg()),
                (n.recip(), p.recip()),
            ];
            for (native, portable) in pairs {
                let (x, y) = (native.to_array(), portable.to_array());
                assert!(x.iter().zip(y).all(|(&a, b)| same_f32(a, b)), "{x:?} vs {y:?}");
            }
        }
    }

    #[test]
    fn test_conversion_parity() {
        for chunk in SPECIAL_F32.chunks_exact(8) {
            let n = N8::from_slice(chunk);
            let p = P8::from_slice(chunk);
            assert_eq!(n.to_int().to_array(), p.to_int().to_array());
            assert_eq!(n.to_uint().to_array(), p.to_uint().to_array());
            assert_eq!(n.to_bits().to_array(), p.to_bits().to_array());
            let wide = n.promote().to_array();
            assert!(wide.iter().zip(chunk).all(|(&a, &b)| same_f64(a, b as f64)));
        }
        for chunk in SPECIAL_F64.chunks_exact(4) {
            let n = N4::from_slice(chunk);
            let p = P4::from_slice(chunk);
            assert_eq!(n.to_int().to_array(), p.to_int().to_array());
            assert_eq!(n.to_uint().to_array(), p.to_uint().to_array());
            let narrow = n.degrade().to_array();
            assert!(narrow.iter().zip(chunk).all(|(&a, &b)| same_f32(a, b as f32)));
        }

        let ints = [0u32, 1, 16_777_217, u32::MAX, 0x8000_0001, 123_456_789, 1 << 31, 65_535];
        let n = N8::from_uint(avx2::U32x8::from_array(ints)).to_array();
        let p = P8::from_uint(Vector::<u32, 8>::from_array(ints)).to_array();
        assert_eq!(n.map(f32::to_bits), p.map(f32::to_bits));

        let ints = [i32::MIN, i32::MAX, -1, 0, 16_777_217, -16_777_217, 3, -3];
        let n = N8::from_int(avx2::I32x8::from_array(ints)).to_array();
        let p = P8::from_int(Vector::<i32, 8>::from_array(ints)).to_array();
        assert_eq!(n.map(f32::to_bits), p.map(f32::to_bits));
    }

    #[test]
    fn test_reduction_parity() {
        for (a, b) in f32_pairs() {
            let n = N8::from_array(a).add(N8::from_array(b));
            let p = P8::from_array(a).add(P8::from_array(b));
            assert!(same_f32(n.hadd(), p.hadd()));
            assert!(same_f32(n.hmax(), p.hmax()));
            assert!(same_f32(n.hmin(), p.hmin()));
        }
        for (a, _) in f64_pairs() {
            assert!(same_f64(N4::from_array(a).hadd(), P4::from_array(a).hadd()));
        }
    }

    #[test]
    fn test_emulation_parity() {
        let inputs: Vec<f32> = SPECIAL_F32
            .iter()
            .copied()
            .chain((0..64).map(|i| (i as f32 - 32.0) * 1.37))
            .collect();
        for chunk in inputs.chunks_exact(8) {
            let n = N8::from_slice(chunk);
            let p = P8::from_slice(chunk);
            let pairs: [(N8, P8); 5] = [
                (n.exp(), p.exp()),
                (n.log(), p.log()),
                (n.log2(), p.log2()),
                (n.sin(), p.sin()),
                (n.cos(), p.cos()),
            ];
            for (native, portable) in pairs {
                for (x, y) in native.to_array().iter().zip(portable.to_array()) {
                    assert!(ulp_f32(*x, y) <= 1, "native {x} portable {y}");
                }
            }
        }

        let inputs: Vec<f64> = SPECIAL_F64
            .iter()
            .copied()
            .chain((0..32).map(|i| (i as f64 - 16.0) * 2.71))
            .collect();
        for chunk in inputs.chunks_exact(4) {
            let n = N4::from_slice(chunk);
            let p = P4::from_slice(chunk);
            for (x, y) in n.exp().to_array().iter().zip(p.exp().to_array()) {
                assert!(ulp_f64(*x, y) <= 1, "exp: native {x} portable {y}");
            }
            for (x, y) in n.log10().to_array().iter().zip(p.log10().to_array()) {
                assert!(ulp_f64(*x, y) <= 1, "log10: native {x} portable {y}");
            }
        }
    }

    #[test]
    fn test_trig_parity_over_full_range() {
        let inputs: Vec<f32> = (-45..=38)
            .flat_map(|e| [1.7f32, -4.3].map(|m| m * 10f32.powi(e)))
            .filter(|x| x.is_finite())
            .chain(SPECIAL_F32)
            .collect();
        for chunk in inputs.chunks_exact(8) {
            let (ns, nc) = N8::from_slice(chunk).sin_cos();
            let (ps, pc) = P8::from_slice(chunk).sin_cos();
            for lane in 0..8 {
                let x = chunk[lane];
                assert!(ulp_f32(ns.extract(lane), ps.extract(lane)) <= 1, "sin({x:e})");
                assert!(ulp_f32(nc.extract(lane), pc.extract(lane)) <= 1, "cos({x:e})");
                if x.is_finite() && x.abs() > 8192.0 {
                    assert!(same_f32(ns.extract(lane), x.sin()), "sin({x:e})");
                    assert!(same_f32(nc.extract(lane), x.cos()), "cos({x:e})");
                }
            }
        }

        let inputs: Vec<f64> = (-320..=308)
            .step_by(4)
            .flat_map(|e| [1.3f64, -7.9].map(|m| m * 10f64.powi(e)))
            .filter(|x| x.is_finite())
            .chain(SPECIAL_F64)
            .collect();
        for chunk in inputs.chunks_exact(4) {
            let (ns, nc) = N4::from_slice(chunk).sin_cos();
            let (ps, pc) = P4::from_slice(chunk).sin_cos();
            for lane in 0..4 {
                let x = chunk[lane];
                assert!(ulp_f64(ns.extract(lane), ps.extract(lane)) <= 1, "sin({x:e})");
                assert!(ulp_f64(nc.extract(lane), pc.extract(lane)) <= 1, "cos({x:e})");
                if x.is_finite() && x.abs() > 1_048_576.0 {
                    assert!(same_f64(ns.extract(lane), x.sin()), "sin({x:e})");
                    assert!(same_f64(nc.extract(lane), x.cos()), "cos({x:e})");
                }
            }
        }
    }

    #[test]
    fn test_memory_parity() {
        let data: Vec<f32> = (0..32).map(|i| i as f32 * 0.5).collect();
        let mask = Mask::new([true, false, true, true, false, false, true, false]);
        let n = unsafe { N8::splat(-1.0).load_masked(mask, data.as_ptr().add(3)) };
        let p = unsafe { P8::splat(-1.0).load_masked(mask, data.as_ptr().add(3)) };
        assert_eq!(n.to_array(), p.to_array());

        let indices = Swizzle::new([31, 0, 7, 7, 12, 3, 30, 1]);
        let n = unsafe { N8::gather(data.as_ptr(), indices) };
        let p = unsafe { P8::gather(data.as_ptr(), indices) };
        assert_eq!(n.to_array(), p.to_array());
        assert_eq!(n.permute(indices).to_array(), p.permute(indices).to_array());

        let mut out_n = [0.0f32; 8];
        let mut out_p = [0.0f32; 8];
        unsafe {
            n.store_masked(mask, out_n.as_mut_ptr());
            p.store_masked(mask, out_p.as_mut_ptr());
        }
        assert_eq!(out_n, out_p);

        let wide: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let idx = Swizzle::new([15, 2, 9, 0]);
        let m = Mask::new([true, true, false, true]);
        let n = unsafe { N4::splat(7.0).gather_masked(m, wide.as_ptr(), idx) };
        let p = unsafe { P4::splat(7.0).gather_masked(m, wide.as_ptr(), idx) };
        assert_eq!(n.to_array(), p.to_array());
    }
}

mod int_tests {
    use super::*;

    type NI = avx2::I32x8;
    type PI = Vector<i32, 8>;
    type NU = avx2::U32x8;
    type PU = Vector<u32, 8>;
    type NL = avx2::I64x4;
    type PL = Vector<i64, 4>;
    type NQ = avx2::U64x4;
    type PQ = Vector<u64, 4>;

    const I32S: [i32; 8] = [i32::MIN, i32::MAX, -1, 0, 1, -12345, 98765, 1 << 30];
    const U32S: [u32; 8] = [0, 1, u32::MAX, 1 << 31, 0x7fff_ffff, 0xdead_beef, 42, 1 << 16];
    const I64S: [i64; 4] = [i64::MIN, i64::MAX, -1, 0x1234_5678_9abc_def0];
    const U64S: [u64; 4] = [u64::MAX, 1 << 63, 0, 0xfedc_ba98_7654_3210];

    #[test]
    fn test_i32_parity() {
        let (na, pa) = (NI::from_array(I32S), PI::from_array(I32S));
        let rev: [i32; 8] = std::array::from_fn(|i| I32S[7 - i]);
        let (nb, pb) = (NI::from_array(rev), PI::from_array(rev));
        assert_eq!(na.add(nb).to_array(), pa.add(pb).to_array());
        assert_eq!(na.mul(nb).to_array(), pa.mul(pb).to_array());
        assert_eq!(na.min(nb).to_array(), pa.min(pb).to_array());
        assert_eq!(na.max(nb).to_array(), pa.max(pb).to_array());
        assert_eq!(na.abs().to_array(), pa.abs().to_array());
        assert_eq!(na.neg().to_array(), pa.neg().to_array());
        assert_eq!(na.cmp_gt(nb), pa.cmp_gt(pb));
        assert_eq!(na.cmp_le(nb), pa.cmp_le(pb));
        assert_eq!(na.hadd(), pa.hadd());

        let amounts = NI::from_array([0, 1, 31, 32, 33, -1, 7, 64]);
        let p_amounts = PI::from_array(amounts.to_array());
        assert_eq!(na.shl(amounts).to_array(), pa.shl(p_amounts).to_array());
        assert_eq!(na.shr(amounts).to_array(), pa.shr(p_amounts).to_array());
        assert_eq!(na.rotl(amounts).to_array(), pa.rotl(p_amounts).to_array());
        assert_eq!(na.rotr(amounts).to_array(), pa.rotr(p_amounts).to_array());
        for amount in [0, 5, 31, 32, 40] {
            assert_eq!(na.shl_scalar(amount).to_array(), pa.shl_scalar(amount).to_array());
            assert_eq!(na.shr_scalar(amount).to_array(), pa.shr_scalar(amount).to_array());
            assert_eq!(na.rotl_scalar(amount).to_array(), pa.rotl_scalar(amount).to_array());
        }
        assert_eq!(na.promote().to_array(), I32S.map(i64::from));
    }

    #[test]
    fn test_u32_parity() {
        let (na, pa) = (NU::from_array(U32S), PU::from_array(U32S));
        let rot: [u32; 8] = std::array::from_fn(|i| U32S[(i + 3) % 8]);
        let (nb, pb) = (NU::from_array(rot), PU::from_array(rot));
        assert_eq!(na.min(nb).to_array(), pa.min(pb).to_array());
        assert_eq!(na.max(nb).to_array(), pa.max(pb).to_array());
        assert_eq!(na.cmp_gt(nb), pa.cmp_gt(pb));
        assert_eq!(na.cmp_lt(nb), pa.cmp_lt(pb));
        assert_eq!(na.cmp_ge(nb), pa.cmp_ge(pb));
        assert_eq!(na.hmax(), pa.hmax());
        assert_eq!(na.hmin(), pa.hmin());
        assert_eq!(na.and_not(nb).to_array(), pa.and_not(pb).to_array());
        assert_eq!(na.shr(nb).to_array(), pa.shr(pb).to_array());
        assert_eq!(na.to_signed().to_array(), pa.to_signed().to_array());
        assert_eq!(na.promote().to_array(), U32S.map(u64::from));
    }

    #[test]
    fn test_i64_parity() {
        let (na, pa) = (NL::from_array(I64S), PL::from_array(I64S));
        let rev: [i64; 4] = std::array::from_fn(|i| I64S[3 - i]);
        let (nb, pb) = (NL::from_array(rev), PL::from_array(rev));
        assert_eq!(na.mul(nb).to_array(), pa.mul(pb).to_array());
        assert_eq!(na.min(nb).to_array(), pa.min(pb).to_array());
        assert_eq!(na.max(nb).to_array(), pa.max(pb).to_array());
        assert_eq!(na.abs().to_array(), pa.abs().to_array());
        assert_eq!(na.cmp_lt(nb), pa.cmp_lt(pb));
        assert_eq!(na.hadd(), pa.hadd());
        assert_eq!(na.degrade().to_array(), I64S.map(|x| x as i32));

        let amounts = NL::from_array([1, 63, 64, -1]);
        let p_amounts = PL::from_array(amounts.to_array());
        assert_eq!(na.shl(amounts).to_array(), pa.shl(p_amounts).to_array());
        assert_eq!(na.shr(amounts).to_array(), pa.shr(p_amounts).to_array());
        assert_eq!(na.rotl(amounts).to_array(), pa.rotl(p_amounts).to_array());
    }

    #[test]
    fn test_u64_parity() {
        let (na, pa) = (NQ::from_array(U64S), PQ::from_array(U64S));
        let rot: [u64; 4] = std::array::from_fn(|i| U64S[(i + 1) % 4]);
        let (nb, pb) = (NQ::from_array(rot), PQ::from_array(rot));
        assert_eq!(na.mul(nb).to_array(), pa.mul(pb).to_array());
        assert_eq!(na.min(nb).to_array(), pa.min(pb).to_array());
        assert_eq!(na.max(nb).to_array(), pa.max(pb).to_array());
        assert_eq!(na.cmp_gt(nb), pa.cmp_gt(pb));
        assert_eq!(na.hmax(), pa.hmax());
        assert_eq!(na.rotr(nb).to_array(), pa.rotr(pb).to_array());
        assert_eq!(na.degrade().to_array(), U64S.map(|x| x as u32));
        for amount in [0, 1, 63, 64, 100] {
            assert_eq!(na.shr_scalar(amount).to_array(), pa.shr_scalar(amount).to_array());
            assert_eq!(na.rotr_scalar(amount).to_array(), pa.rotr_scalar(amount).to_array());
        }
    }
}
