//! Solve the farmer, wolf, duck and corn river crossing and print the path.
//!
//! Runs the default search policy from everyone on the right bank. Set
//! `RUST_LOG=debug` (or `trace` for frontier snapshots) to follow the
//! search step by step. Always exits successfully; "no path" is an outcome,
//! not a failure.

use wayfind_harness::runner::run_world_traced;
use wayfind_harness::worlds::river_crossing::RiverCrossing;
use wayfind_search::policy::SearchPolicyV1;
use wayfind_search::trace::LogTrace;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run_world_traced(&RiverCrossing, &SearchPolicyV1::default(), &mut LogTrace) {
        Ok(report) => match report.rendered_path() {
            Some(path) => {
                println!("Winning state reached.");
                println!("{path}");
            }
            None => println!("No path to goal!"),
        },
        Err(e) => {
            log::error!("river crossing failed: {e}");
            println!("No path to goal!");
        }
    }
}
