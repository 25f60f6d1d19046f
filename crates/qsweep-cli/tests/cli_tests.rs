//! End-to-end tests of the `qsweep` binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn qsweep(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qsweep"))
        .args(args)
        .current_dir(dir)
        .env_remove("QSWEEP_SAMPLES")
        .env_remove("QSWEEP_OUTPUT")
        .env_remove("QSWEEP_SEED")
        .output()
        .expect("failed to spawn qsweep")
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

#[test]
fn test_run_writes_csv() {
    let dir = TempDir::new().unwrap();
    let out = qsweep(
        &[
            "run", "--variant", "random", "--samples", "2", "--min-qubits", "2", "--qubits",
            "3", "--depth", "2", "--seed", "5", "--out", "data.csv",
        ],
        dir.path(),
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let (header, rows) = read_rows(&dir.path().join("data.csv"));
    assert_eq!(header, ["name", "num_qubits", "depth", "time"]);
    // 2 widths x 2 depths x 2 samples
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|r| r[0] == "sim_random"));
    assert!(rows.iter().all(|r| r[3].parse::<f64>().unwrap() >= 0.0));
}

#[test]
fn test_run_appends_without_second_header() {
    let dir = TempDir::new().unwrap();
    let args = [
        "run", "--variant", "qft", "--samples", "1", "--min-qubits", "2", "--qubits", "4",
        "--out", "qft.csv",
    ];
    assert!(qsweep(&args, dir.path()).status.success());
    assert!(qsweep(&args, dir.path()).status.success());

    let (header, rows) = read_rows(&dir.path().join("qft.csv"));
    assert_eq!(header, ["name", "num_qubits", "time"]);
    assert_eq!(rows.len(), 6);
}

#[test]
fn test_run_over_simulator_limit_records_sentinel() {
    let dir = TempDir::new().unwrap();
    let out = qsweep(
        &[
            "run", "--variant", "qft", "--samples", "1", "--min-qubits", "3", "--qubits", "4",
            "--max-sim-qubits", "3", "--out", "limit.csv",
        ],
        dir.path(),
    );
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("exceed the simulator limit"));

    let (_, rows) = read_rows(&dir.path().join("limit.csv"));
    assert_eq!(rows.len(), 2);
    assert!(rows[0][2].parse::<f64>().unwrap() >= 0.0);
    assert_eq!(rows[1][2].parse::<f64>().unwrap(), -999.0);
}

#[test]
fn test_run_summary_and_measurement() {
    let dir = TempDir::new().unwrap();
    let out = qsweep(
        &[
            "run", "--variant", "sycamore", "--samples", "3", "--qubits", "4", "--depth", "3",
            "--single", "both", "--measurement", "--seed", "1", "--out", "syc.csv",
            "--summary", "summary.json",
        ],
        dir.path(),
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("median"));

    let (header, rows) = read_rows(&dir.path().join("syc.csv"));
    assert_eq!(header, ["name", "num_qubits", "depth", "time", "measurement"]);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r[1] == "4" && r[2] == "3"));
    assert!(rows.iter().all(|r| r[4].parse::<u64>().unwrap() < 16));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["name"], "sim_sycamore");
    assert_eq!(summary["cells"].as_array().unwrap().len(), 1);
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let out = qsweep(
        &["run", "--variant", "random", "--samples", "0", "--out", "never.csv"],
        dir.path(),
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
    assert!(!dir.path().join("never.csv").exists());
}

#[test]
fn test_run_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("sweep.yaml"),
        "samples: 1\nqubits:\n  start: 2\n  end: 4\ndepths:\n  list: [1, 4]\noutput: cfg.csv\n",
    )
    .unwrap();
    let out = qsweep(
        &["run", "--variant", "nearest-neighbor", "--config", "sweep.yaml"],
        dir.path(),
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let (_, rows) = read_rows(&dir.path().join("cfg.csv"));
    let cells: Vec<(&str, &str)> = rows.iter().map(|r| (r[1].as_str(), r[2].as_str())).collect();
    assert_eq!(cells, [("2", "1"), ("2", "4"), ("3", "1"), ("3", "4")]);
}

#[test]
fn test_mirror_and_dense_sweeps_succeed() {
    let dir = TempDir::new().unwrap();
    for variant in ["mirror", "dense"] {
        let out_file = format!("{variant}.csv");
        let out = qsweep(
            &[
                "run", "--variant", variant, "--samples", "2", "--min-qubits", "3", "--qubits",
                "5", "--depth", "3", "--seed", "4", "--out", &out_file,
            ],
            dir.path(),
        );
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

        let (_, rows) = read_rows(&dir.path().join(&out_file));
        assert_eq!(rows.len(), 3 * 3 * 2);
        assert!(rows.iter().all(|r| r[0] == format!("sim_{variant}")));
        assert!(rows.iter().all(|r| r[3].parse::<f64>().unwrap() >= 0.0));
    }
}

#[test]
fn test_generate_prints_json() {
    let dir = TempDir::new().unwrap();
    let out = qsweep(
        &["generate", "--variant", "qft", "--qubits", "3", "--seed", "2"],
        dir.path(),
    );
    assert!(out.status.success());
    let circuit: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(circuit["num_qubits"], 3);
}

#[test]
fn test_variants_lists_generators() {
    let dir = TempDir::new().unwrap();
    let out = qsweep(&["variants"], dir.path());
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for name in ["random", "random-extended", "qft", "sycamore", "dense", "mirror"] {
        assert!(stdout.contains(name), "missing {name}");
    }
}
