mod common;

use clap::Parser;
use rebound_markov::{
    cli::commands::run::{RunArgs, execute},
    export::{
        BASELINE_FILE, LAPLACE_MATRIX_FILE, PREDICTION_FILE, RAW_MATRIX_FILE, STEADY_STATE_FILE,
    },
    state::GameState::*,
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> RunArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    RunArgs::parse_from(args)
}

#[test]
fn run_writes_all_reports() {
    let tmp = tempdir().unwrap();
    let csv = common::write_states(
        tmp.path(),
        "duke2025.csv",
        &[HighWin, HighWin, HighLoss, HighWin, MediumWin, LowLoss, MediumWin],
    );
    let out_dir = tmp.path().join("reports");

    let args = parse_args([
        "rebound-run",
        csv.to_str().unwrap(),
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    execute(args).expect("run should succeed");

    for name in [
        RAW_MATRIX_FILE,
        LAPLACE_MATRIX_FILE,
        STEADY_STATE_FILE,
        PREDICTION_FILE,
        BASELINE_FILE,
    ] {
        assert!(out_dir.join(name).exists(), "missing report {name}");
    }

    let raw = std::fs::read_to_string(out_dir.join(RAW_MATRIX_FILE)).unwrap();
    assert!(raw.starts_with("Transition Matrix (From → To):\n    HW     HL"));

    let steady = std::fs::read_to_string(out_dir.join(STEADY_STATE_FILE)).unwrap();
    assert!(steady.starts_with("Steady-State Distribution (Laplace-smoothed):\nHW: "));
    assert_eq!(steady.matches("Expected Return Time: ").count(), 6);
    assert!(!steady.contains("Warning"));

    let predictions = std::fs::read_to_string(out_dir.join(PREDICTION_FILE)).unwrap();
    assert!(predictions.contains("Total Predictions: 6\n"));
    assert_eq!(predictions.lines().filter(|l| l.ends_with(",YES") || l.ends_with(",NO")).count(), 6);

    let baseline = std::fs::read_to_string(out_dir.join(BASELINE_FILE)).unwrap();
    assert!(baseline.contains("Most Frequent State: HW\n"));
}

#[test]
fn run_summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let csv = common::write_states(tmp.path(), "s.csv", &[LowWin, LowWin, LowWin, HighLoss]);
    let summary_stem = tmp.path().join("season_overview");

    let args = parse_args([
        "rebound-run",
        csv.to_str().unwrap(),
        "--output-dir",
        tmp.path().to_str().unwrap(),
        "--summary",
        summary_stem.to_str().unwrap(),
        "--smoothing",
        "raw",
    ]);
    execute(args).expect("run with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["games"], 4);
    assert_eq!(parsed["baseline"]["most_frequent"], "LowWin");
    assert_eq!(parsed["baseline"]["correct"], 2);
    assert_eq!(parsed["steady_state"]["matrix"], "none");
    assert_eq!(parsed["raw_matrix"]["transitions_observed"], 3);
}

#[test]
fn run_reports_malformed_rows() {
    let tmp = tempdir().unwrap();
    let rows = vec![
        common::box_score_row(0, "W", "40"),
        common::box_score_row(1, "W", "lots"),
    ];
    let csv = common::write_season(tmp.path(), "bad.csv", &rows);

    let args = parse_args([
        "rebound-run",
        csv.to_str().unwrap(),
        "--output-dir",
        tmp.path().join("out").to_str().unwrap(),
    ]);
    let err = execute(args).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("line 3"), "unexpected message: {message}");
    assert!(message.contains("lots"));
}

#[test]
fn run_honours_config_file() {
    let tmp = tempdir().unwrap();
    let csv = common::write_states(tmp.path(), "s.csv", &[MediumWin, HighWin, LowLoss, HighWin, LowLoss]);
    let config_path = tmp.path().join("config.json");
    std::fs::write(&config_path, r#"{ "solver": { "max_iterations": 3 } }"#).unwrap();

    let out_dir = tmp.path().join("out");
    let args = parse_args([
        "rebound-run",
        csv.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--smoothing",
        "raw",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    execute(args).unwrap();

    // MW feeds HW once, then mass swings between HW and LL
    let steady = std::fs::read_to_string(out_dir.join(STEADY_STATE_FILE)).unwrap();
    assert!(steady.starts_with("Steady-State Distribution (raw):\n"));
    assert!(steady.contains("Expected Return Time: undefined\n"));
    assert!(steady.ends_with("Warning: did not converge within 3 iterations\n"));
}
