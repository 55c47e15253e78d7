// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr + Ord>(name: &str, default: T, min: T, max: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

/// Criterion settings shared by every bench; `PROFILE_FREQ=0` turns the flamegraph off.
pub fn criterion() -> Criterion {
    let sample_size = env_or("BENCH_SAMPLE_SIZE", 40usize, 10, 200);
    let warmup = Duration::from_secs(env_or("BENCH_WARMUP_SECS", 2u64, 1, 60));
    let measurement = Duration::from_secs(env_or("BENCH_MEASUREMENT_SECS", 4u64, 1, 120));

    let criterion = Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(warmup)
        .measurement_time(measurement);
    match env_or("PROFILE_FREQ", 100i32, 0, 1000) {
        0 => criterion,
        frequency => criterion.with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None))),
    }
}
