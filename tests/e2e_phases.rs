#![cfg(unix)]


use std::time::Duration;

use tempfile::tempdir;

use support_phases::{
    fake_hey, recorded_invocations, run_hey_phases, spawn_hey_phases, terminate, wait_until,
};

const TARGET: &str = "http://127.0.0.1:9/";
const EXIT_TIMEOUT: Duration = Duration::from_secs(10);
const SIGNAL_SETTLE: Duration = Duration::from_millis(200);

fn describe(output: &std::process::Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_explicit_phases_run_in_order() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let hey = fake_hey(dir.path(), "exit 0")?;
    let log = dir.path().join("calls.log");

    let output = run_hey_phases(
        [
            "--executable",
            &hey.to_string_lossy(),
            "--url",
            TARGET,
            "--periods",
            "1m,2m",
            "--connections",
            "10",
        ],
        &log,
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let calls = recorded_invocations(&log);
    let expected = [
        format!("-z 1m0s -c 10 {}", TARGET),
        format!("-z 2m0s {}", TARGET),
    ];
    if calls != expected {
        return Err(format!("Unexpected invocations: {:?}", calls));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    for needle in ["finished", "all commands finished, exiting...", "good bye!"] {
        if !stderr.contains(needle) {
            return Err(format!("Missing '{}' in logs:\n{}", needle, stderr));
        }
    }
    Ok(())
}

#[test]
fn e2e_failed_phase_is_skipped() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let hey = fake_hey(dir.path(), "exit 2")?;
    let log = dir.path().join("calls.log");

    let output = run_hey_phases(
        [
            "--executable",
            &hey.to_string_lossy(),
            "--url",
            TARGET,
            "--periods",
            "10s,20s,30s",
            "--rate",
            "5,6,7",
        ],
        &log,
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let calls = recorded_invocations(&log);
    if calls.len() != 3 {
        return Err(format!("Expected three attempts, got {:?}", calls));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("could not execute command, skipping...") {
        return Err(format!("Missing skip log:\n{}", stderr));
    }
    Ok(())
}

#[test]
fn e2e_default_phase_when_no_periods() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let hey = fake_hey(dir.path(), "exit 0")?;
    let log = dir.path().join("calls.log");

    let output = run_hey_phases(
        ["--executable", &hey.to_string_lossy(), "--url", TARGET],
        &log,
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    if recorded_invocations(&log) != [format!("-z 1m0s {}", TARGET)] {
        return Err(format!(
            "Unexpected invocations: {:?}",
            recorded_invocations(&log)
        ));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("no periods provided, going to use a default 1m period") {
        return Err(format!("Missing default period notice:\n{}", stderr));
    }
    Ok(())
}

#[test]
fn e2e_random_phases_override_explicit_ones() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let hey = fake_hey(dir.path(), "exit 0")?;
    let log = dir.path().join("calls.log");

    let output = run_hey_phases(
        [
            "--executable",
            &hey.to_string_lossy(),
            "--url",
            TARGET,
            "--periods",
            "7s",
            "--random",
            "3",
            "--seed",
            "11",
        ],
        &log,
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let calls = recorded_invocations(&log);
    if calls.len() != 3 {
        return Err(format!("Expected three random phases, got {:?}", calls));
    }
    for call in &calls {
        let parts = call.split(' ').collect::<Vec<_>>();
        let valid = matches!(
            parts.as_slice(),
            ["-z", duration, "-c", _, "-q", _, url]
                if duration.ends_with("m0s") && *url == TARGET
        );
        if !valid {
            return Err(format!("Unexpected random invocation: {}", call));
        }
    }
    Ok(())
}

#[test]
fn e2e_missing_url_exits_with_error() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let log = dir.path().join("calls.log");

    let output = run_hey_phases(["--periods", "1m"], &log)?;
    if output.status.success() {
        return Err(describe(&output));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("no url provided") {
        return Err(format!("Missing url error:\n{}", stderr));
    }
    if !recorded_invocations(&log).is_empty() {
        return Err("No phase may run without a url".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_sigterm_stops_running_phase() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let hey = fake_hey(dir.path(), "exec sleep 30")?;
    let log = dir.path().join("calls.log");

    let mut child = spawn_hey_phases(
        [
            "--executable",
            &hey.to_string_lossy(),
            "--url",
            TARGET,
            "--periods",
            "1m,1m",
        ],
        &log,
    )?;

    if !wait_until(EXIT_TIMEOUT, || recorded_invocations(&log).len() == 1) {
        drop(child.kill());
        return Err("First phase never started".to_owned());
    }
    std::thread::sleep(SIGNAL_SETTLE);
    terminate(&child)?;

    if !wait_until(EXIT_TIMEOUT, || matches!(child.try_wait(), Ok(Some(_)))) {
        drop(child.kill());
        return Err("hey-phases did not exit after SIGTERM".to_owned());
    }
    let output = child
        .wait_with_output()
        .map_err(|err| format!("collect output failed: {}", err))?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let calls = recorded_invocations(&log);
    if calls.len() != 1 {
        return Err(format!("Second phase must not start: {:?}", calls));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    for needle in ["operation canceled", "good bye!"] {
        if !stderr.contains(needle) {
            return Err(format!("Missing '{}' in logs:\n{}", needle, stderr));
        }
    }
    Ok(())
}
