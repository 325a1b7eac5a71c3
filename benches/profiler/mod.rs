// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Criterion settings shared by every bench target.
//
// `WEEKGRID_PROFILE=0` skips pprof; otherwise a flamegraph is written per benchmark while
// profiling (`cargo bench -- --profile-time 5`).

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn criterion() -> Criterion {
    // Layout runs in microseconds, so the defaults are shorter than for IO-heavy suites.
    let sample_size = env_or("WEEKGRID_BENCH_SAMPLES", 50_usize).clamp(10, 200);
    let warmup = env_or("WEEKGRID_BENCH_WARMUP_SECS", 2_u64).clamp(1, 60);
    let measurement = env_or("WEEKGRID_BENCH_MEASUREMENT_SECS", 4_u64).clamp(1, 120);

    let criterion = Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measurement));

    if env_or("WEEKGRID_PROFILE", 1_u8) == 0 {
        return criterion;
    }
    let frequency = env_or("WEEKGRID_PROFILE_FREQ", 100_i32).clamp(1, 1000);
    criterion.with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
