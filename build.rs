use std::cmp::Ordering;
use std::env;
use std::process::Command;

// Setting this to `1` skips detection and builds the fallback target
const FORCE_FALLBACK_ENV: &str = "SIMDLANE_FORCE_FALLBACK";

// A hardware target this crate can be specialized for
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    // every CPU flag the specialization relies on
    required_flags: &'static [&'static str],
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![CpuFeature {
            name: "avx2",
            required_flags: &["avx2", "fma"],
            cfg_flag: "avx2",
            detected: false,
        }]
    }

    fn all_cfg_flags() -> [&'static str; 2] {
        ["avx2", "fallback"]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            let flags: Vec<&str> = contents
                .lines()
                .filter(|line| line.starts_with("flags"))
                .flat_map(|line| line.split_whitespace())
                .collect();

            for feature in features.iter_mut() {
                feature.detected = feature
                    .required_flags
                    .iter()
                    .all(|required| flags.contains(required));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                feature.detected = feature.required_flags.iter().all(|flag| match *flag {
                    "avx2" => contents.contains("hw.optional.avx2_0: 1"),
                    "fma" => contents.contains("hw.optional.fma: 1"),
                    _ => false,
                });
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature]) {
        features.sort();

        // The highest priority detected feature wins, otherwise every
        // vector type resolves to the portable fallback target
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        println!("cargo:rustc-cfg={cfg_flag}");

        for flag in CpuFeature::all_cfg_flags() {
            println!("cargo::rustc-check-cfg=cfg({flag})");
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={FORCE_FALLBACK_ENV}");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let is_native_build = host == target;
    let is_x86 = target_arch == "x86_64" || target_arch == "x86";
    let forced_fallback = env::var(FORCE_FALLBACK_ENV).is_ok_and(|value| value == "1");

    // Only run CPU detection for native x86 builds
    if is_native_build && is_x86 && !forced_fallback {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features);
}
