//! Calling an entry point and checking what comes back

use crate::config::StressConfig;
use crate::entry::EntryPoint;
use crate::error::{ProbeError, Result};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Outcome of a successful concurrent check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressReport {
    /// Number of calls made
    pub calls: usize,

    /// Worker threads the calls were spread over
    pub threads: usize,

    /// The value every call returned
    pub value: i32,

    /// Wall-clock time for all calls
    pub elapsed: Duration,
}

/// Calls `entry` once and checks the result
///
/// # Errors
///
/// Returns [`ProbeError::UnexpectedValue`] if the call returns anything but
/// `expected`.
#[instrument(skip(entry), fields(origin = entry.origin()))]
pub fn verify_once(entry: &EntryPoint<'_>, expected: i32) -> Result<i32> {
    let actual = entry.call();
    debug!(actual, "entry point returned");

    if actual == expected {
        Ok(actual)
    } else {
        Err(ProbeError::UnexpectedValue {
            call: 0,
            expected,
            actual,
        })
    }
}

/// Calls `entry` `settings.calls` times across a dedicated thread pool
///
/// All calls run to completion before results are checked, so a mismatch
/// report counts every disagreeing call.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidConfig`] for zero calls or threads,
/// [`ProbeError::ThreadPool`] if the pool cannot start, and
/// [`ProbeError::ConcurrentMismatch`] if any call disagrees with `expected`.
#[instrument(skip(entry), fields(origin = entry.origin()))]
pub fn verify_concurrent(entry: &EntryPoint<'_>, expected: i32, settings: &StressConfig) -> Result<StressReport> {
    settings.validate()?;

    let mut builder = ThreadPoolBuilder::new().thread_name(|index| format!("fx-probe-{index}"));
    if let Some(threads) = settings.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    let threads = pool.current_num_threads();
    debug!(threads, calls = settings.calls, "starting concurrent calls");

    let started = Instant::now();
    let results: Vec<i32> = pool.install(|| (0..settings.calls).into_par_iter().map(|_| entry.call()).collect());
    let elapsed = started.elapsed();

    let mut mismatches = results
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != expected);

    if let Some((first_call, &first_value)) = mismatches.next() {
        let mismatches = 1 + mismatches.count();
        warn!(mismatches, first_call, first_value, "concurrent calls disagreed");
        return Err(ProbeError::ConcurrentMismatch {
            mismatches,
            calls: results.len(),
            expected,
            first_call,
            first_value,
        });
    }

    debug!(?elapsed, "concurrent calls agreed");
    Ok(StressReport {
        calls: results.len(),
        threads,
        value: expected,
        elapsed,
    })
}
