//! Cross-process determinism for search runs.
//!
//! Spawns the `search_fixture` binary under 5 environment variants
//! and asserts all produce identical output.

use std::path::Path;
use std::process::Command;

fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_search_fixture")
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_five_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    // Sanity checks.
    for expected in [
        "river_crossing.termination=goal_found",
        "river_crossing.path_length=7",
        "river_crossing.path=[||FWDC] -> [FD||WC] -> [D||FWC] -> [FWD||C] -> [W||FDC] -> [FWC||D] -> [WC||FD] -> [FWDC||]",
        "river_crossing.expansions=9",
        "river_crossing.transcript_digest=sha256:",
        "river_crossing.policy_digest=sha256:",
        "road_map.termination=goal_found",
        "road_map.path=S -> A -> X -> Y -> Z -> G",
        "road_map.revisions=3",
    ] {
        assert!(
            baseline.contains(expected),
            "baseline output missing {expected}:\n{baseline}"
        );
    }

    // Variant 2: different cwd.
    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    let variant_cwd = run_variant(alt_cwd, &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    // Variant 3: different locale env.
    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(
        baseline, variant_locale,
        "output differs when LC_ALL=C LANG=C"
    );

    // Variant 4: spurious env vars.
    let variant_noise = run_variant(
        &root,
        &[
            ("WAYFIND_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(
        baseline, variant_noise,
        "output differs with spurious env vars"
    );

    // Variant 5: logging requested. Diagnostics must not reach stdout.
    let variant_log = run_variant(&root, &[("RUST_LOG", "trace")]);
    assert_eq!(baseline, variant_log, "output differs with RUST_LOG=trace");
}
