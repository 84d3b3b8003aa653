//! Reduction constants and minimax coefficients for the emulated functions.
//!
//! The split constants (`*_HI` + `*_LO`) carry more precision than one
//! float: the high part has trailing zero bits so `k * HI` is exact for the
//! integer multiples produced by range reduction.

/// Per-precision constants used by the emulation layer.
pub trait Coefficients: Copy + Sized + 'static {
    /// `1 / ln(2)`
    const LOG2_E: Self;
    /// `log10(e)`
    const LOG10_E: Self;
    /// `log10(2)`
    const LOG10_2: Self;

    /// `ln(2)` split for the exp reduction.
    const EXP_LN2_HI: Self;
    const EXP_LN2_LO: Self;
    /// exp clamps its argument to `[EXP_MIN_ARG, EXP_MAX_ARG]`; outside it the
    /// result is already 0 or +inf.
    const EXP_MIN_ARG: Self;
    const EXP_MAX_ARG: Self;
    /// `P1..Pn` of `c = r - r^2 * (P1 + r^2 * P2 + ..)`.
    const EXP_POLY: &'static [Self];

    /// `ln(2)` split for the log recombination.
    const LOG_LN2_HI: Self;
    const LOG_LN2_LO: Self;
    /// `Lg1..Lgn` of `R(z) = z * (Lg1 + z * Lg2 + ..)` with `z = s^2`.
    const LOG_POLY: &'static [Self];
    /// Bit pattern of the largest float below `sqrt(1/2)`: the reduced
    /// mantissa lands in `[sqrt(1/2), sqrt(2))`.
    const SQRT_HALF_BITS: u64;
    /// Subnormal inputs are multiplied by `2^SUBNORMAL_EXPONENT` before the split.
    const SUBNORMAL_SCALE: Self;
    const SUBNORMAL_EXPONENT: Self;
    /// Exponent bias as a float, for building powers of two.
    const EXPONENT_BIAS_F: Self;

    /// `4 / pi`
    const FOUR_OVER_PI: Self;
    /// `pi / 4` split in three parts for the sin/cos reduction.
    const PIO4_A: Self;
    const PIO4_B: Self;
    const PIO4_C: Self;
    /// Largest `|x|` the three-part reduction handles; larger lanes go
    /// through the scalar reference.
    const TRIG_REDUCTION_LIMIT: Self;
    /// `S1..Sn` of `sin(r) = r + r^3 * (S1 + z * S2 + ..)` with `z = r^2`.
    const SIN_POLY: &'static [Self];
    /// `cos(r) = C0 + z * C1 + z^2 * C2 + ..` with `z = r^2`, `C0 = 1`.
    const COS_POLY: &'static [Self];
}

impl Coefficients for f32 {
    const LOG2_E: f32 = 1.442_695_04;
    const LOG10_E: f32 = 0.434_294_48;
    const LOG10_2: f32 = 0.301_029_99;

    const EXP_LN2_HI: f32 = 6.931_457_519_5e-1;
    const EXP_LN2_LO: f32 = 1.428_606_765_3e-6;
    const EXP_MIN_ARG: f32 = -104.0;
    const EXP_MAX_ARG: f32 = 89.0;
    const EXP_POLY: &'static [f32] = &[1.666_662_544_0e-1, -2.766_733_290_6e-3];

    const LOG_LN2_HI: f32 = 6.931_381_225_6e-1;
    const LOG_LN2_LO: f32 = 9.058_000_614_5e-6;
    const LOG_POLY: &'static [f32] = &[
        0.666_666_626_93,
        0.400_009_721_52,
        0.284_987_866_88,
        0.242_790_788_41,
    ];
    const SQRT_HALF_BITS: u64 = 0x3f35_04f3;
    const SUBNORMAL_SCALE: f32 = 33_554_432.0;
    const SUBNORMAL_EXPONENT: f32 = 25.0;
    const EXPONENT_BIAS_F: f32 = 127.0;

    const FOUR_OVER_PI: f32 = 1.273_239_54;
    const PIO4_A: f32 = 0.785_156_25;
    const PIO4_B: f32 = 2.418_756_484_985_351_562_5e-4;
    const PIO4_C: f32 = 3.774_894_977_445_941_08e-8;
    const TRIG_REDUCTION_LIMIT: f32 = 8192.0;
    const SIN_POLY: &'static [f32] = &[
        -0.166_666_666_416_265_235_595,
        0.008_333_329_385_889_463_175_6,
        -0.000_198_393_348_360_966_317_347,
        0.000_002_718_311_493_989_821_906_4,
    ];
    const COS_POLY: &'static [f32] = &[
        1.0,
        -0.499_999_997_251_031_003_120,
        0.041_666_623_323_739_063_189_4,
        -0.001_388_676_377_460_992_946_92,
        0.000_024_390_448_796_277_409_065_4,
    ];
}

impl Coefficients for f64 {
    const LOG2_E: f64 = 1.442_695_040_888_963_387_00e+00;
    const LOG10_E: f64 = 0.434_294_481_903_251_827_65;
    const LOG10_2: f64 = 0.301_029_995_663_981_195_21;

    const EXP_LN2_HI: f64 = 6.931_471_803_691_238_164_90e-01;
    const EXP_LN2_LO: f64 = 1.908_214_929_270_587_700_02e-10;
    const EXP_MIN_ARG: f64 = -746.0;
    const EXP_MAX_ARG: f64 = 710.0;
    const EXP_POLY: &'static [f64] = &[
        1.666_666_666_666_660_190_37e-01,
        -2.777_777_777_701_559_338_42e-03,
        6.613_756_321_437_934_361_17e-05,
        -1.653_390_220_546_525_153_90e-06,
        4.138_136_797_057_238_460_39e-08,
    ];

    const LOG_LN2_HI: f64 = 6.931_471_803_691_238_164_90e-01;
    const LOG_LN2_LO: f64 = 1.908_214_929_270_587_700_02e-10;
    const LOG_POLY: &'static [f64] = &[
        6.666_666_666_666_735_130e-01,
        3.999_999_999_940_941_908e-01,
        2.857_142_874_366_239_149e-01,
        2.222_219_843_214_978_396e-01,
        1.818_357_216_161_805_012e-01,
        1.531_383_769_920_937_332e-01,
        1.479_819_860_511_658_591e-01,
    ];
    const SQRT_HALF_BITS: u64 = 0x3fe6_a09e_667f_3bcd;
    const SUBNORMAL_SCALE: f64 = 18_014_398_509_481_984.0;
    const SUBNORMAL_EXPONENT: f64 = 54.0;
    const EXPONENT_BIAS_F: f64 = 1023.0;

    const FOUR_OVER_PI: f64 = 1.273_239_544_735_162_686_15;
    const PIO4_A: f64 = 7.853_981_256_484_985_351_56e-1;
    const PIO4_B: f64 = 3.774_894_707_930_798_176_68e-8;
    const PIO4_C: f64 = 2.695_151_429_079_059_526_45e-15;
    const TRIG_REDUCTION_LIMIT: f64 = 1_048_576.0;
    const SIN_POLY: &'static [f64] = &[
        -1.666_666_666_666_663_243_48e-01,
        8.333_333_333_322_489_461_24e-03,
        -1.984_126_982_985_794_931_34e-04,
        2.755_731_370_707_006_767_89e-06,
        -2.505_076_025_340_686_341_95e-08,
        1.589_690_995_211_550_102_21e-10,
    ];
    const COS_POLY: &'static [f64] = &[
        1.0,
        -0.5,
        4.166_666_666_666_660_190_37e-02,
        -1.388_888_888_887_410_957_49e-03,
        2.480_158_728_947_672_941_78e-05,
        -2.755_731_435_139_066_330_35e-07,
        2.087_572_321_298_174_827_90e-09,
        -1.135_964_755_778_819_482_65e-11,
    ];
}
