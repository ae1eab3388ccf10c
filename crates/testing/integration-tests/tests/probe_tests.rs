//! End-to-end probe tests: config files on disk, the linked fixture and
//! real shared libraries loaded at runtime.

use fx_probe::config::{ProbeConfig, StressConfig, TargetConfig};
use fx_probe::error::ProbeError;
use fx_probe::library::{NativeLibrary, library_file_name};
use fx_probe::verify::{verify_concurrent, verify_once};
use fx_probe::{Target, run};
use integration_tests::{ConfigFixture, fixture_cdylib_path, system_library_with_int_symbol};
use std::process;
use std::thread;

#[test]
fn linked_fixture_single_call() {
    assert_eq!(fx_answer::fixture_entry_point(), 42);
}

#[test]
fn linked_fixture_thousand_threads() {
    let results: Vec<i32> = thread::scope(|scope| {
        let handles: Vec<_> = (0..1000)
            .map(|_| scope.spawn(|| fx_answer::fixture_entry_point()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });

    assert!(results.iter().all(|&value| value == 42));
}

#[test]
fn probe_from_config_file() {
    let fixture = ConfigFixture::new()
        .and_then(|fixture| {
            fixture.with_config(
                r#"
                [target]
                symbol = "fixture_entry_point"
                expected = 42

                [stress]
                calls = 1000
                threads = 4
                "#,
            )
        })
        .expect("Failed to set up fixture");

    let config = fixture.load().expect("Failed to load config");
    let report = run(&config).expect("probe failed");

    assert_eq!(report.value, 42);
    assert_eq!(report.stress.calls, 1000);
    assert_eq!(report.stress.threads, 4);
}

#[test]
fn wrong_expectation_fails_on_first_call() {
    let fixture = ConfigFixture::new()
        .and_then(|fixture| fixture.with_config("[target]\nexpected = 41\n"))
        .expect("Failed to set up fixture");

    let config = fixture.load().expect("Failed to load config");
    let err = run(&config).expect_err("probe should fail");

    assert!(matches!(
        err,
        ProbeError::UnexpectedValue {
            expected: 41,
            actual: 42,
            ..
        }
    ));
}

#[test]
fn zero_threads_are_rejected() {
    let fixture = ConfigFixture::new()
        .and_then(|fixture| fixture.with_config("[stress]\nthreads = 0\n"))
        .expect("Failed to set up fixture");

    let config = fixture.load().expect("Failed to load config");
    assert!(matches!(run(&config), Err(ProbeError::InvalidConfig { .. })));
}

#[test]
fn missing_library_is_reported_with_configured_path() {
    let fixture = ConfigFixture::new().expect("Failed to set up fixture");
    let library = library_file_name("fx_missing");
    let contents = format!("[target]\nlibrary = \"{}\"\n", library.to_string_lossy());
    let fixture = fixture.with_config(&contents).expect("Failed to write config");

    let config = fixture.load().expect("Failed to load config");
    let err = run(&config).expect_err("probe should fail");

    match err {
        ProbeError::LibraryLoad { path, .. } => assert_eq!(path, fixture.dir().join(library)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn system_library_symbol_is_callable() {
    let Some((library, symbol)) = system_library_with_int_symbol() else {
        return;
    };

    let library = NativeLibrary::open(library).expect("Failed to load system library");
    let entry = library.entry_point(symbol).expect("Failed to resolve symbol");
    let pid = process::id() as i32;

    assert_eq!(verify_once(&entry, pid).expect("pid mismatch"), pid);

    let settings = StressConfig {
        calls: 1000,
        threads: Some(8),
    };
    let report = verify_concurrent(&entry, pid, &settings).expect("concurrent pid mismatch");
    assert_eq!(report.calls, 1000);
}

#[test]
fn system_library_missing_symbol_is_reported() {
    let Some((library, _)) = system_library_with_int_symbol() else {
        return;
    };

    let target = Target::from_config(&TargetConfig {
        library: Some(library.into()),
        ..TargetConfig::default()
    })
    .expect("Failed to load system library");

    let err = target
        .entry_point("fx_symbol_that_does_not_exist")
        .expect_err("symbol should be missing");
    assert!(matches!(err, ProbeError::SymbolMissing { ref symbol, .. } if symbol == "fx_symbol_that_does_not_exist"));
}

#[test]
fn default_config_round_trips_through_disk() {
    let fixture = ConfigFixture::new()
        .and_then(|fixture| fixture.with_config(""))
        .expect("Failed to set up fixture");

    assert_eq!(fixture.load().expect("Failed to load config"), ProbeConfig::default());
}

#[test]
fn fixture_cdylib_is_loadable() {
    let path = fixture_cdylib_path().expect("Failed to locate cdylib");
    let library = NativeLibrary::open(&path).expect("Failed to load fixture cdylib");
    let entry = library
        .entry_point(fx_answer::ENTRY_POINT_SYMBOL)
        .expect("Failed to resolve fixture symbol");

    assert_eq!(entry.origin(), library_file_name("fx_answer").to_string_lossy());
    assert_eq!(verify_once(&entry, 42).expect("single call mismatch"), 42);

    let settings = StressConfig {
        calls: 1000,
        threads: Some(8),
    };
    let report = verify_concurrent(&entry, fx_answer::ANSWER, &settings).expect("concurrent mismatch");
    assert_eq!(report.calls, 1000);
    assert_eq!(report.value, 42);
}

#[test]
fn fixture_cdylib_through_full_run() {
    let path = fixture_cdylib_path().expect("Failed to locate cdylib");
    let config = ProbeConfig {
        target: TargetConfig {
            library: Some(path.clone()),
            ..TargetConfig::default()
        },
        ..ProbeConfig::default()
    };

    let report = run(&config).expect("probe failed");
    assert_eq!(report.target, path.display().to_string());
    assert_eq!(report.value, 42);
    assert_eq!(report.stress.calls, 1000);
}
