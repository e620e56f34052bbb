use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::Source;
use crate::pipeline::stage3_render::{PAIRWISE_FIGURE, PAIRWISE_SVG, SCAN_FIGURE, SCAN_SVG};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("stim_paperplots_main_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_inputs(dir: &Path, scan_rows: usize) {
    for (i, a) in Source::ALL.iter().enumerate() {
        for b in &Source::ALL[i + 1..] {
            write_file(
                &dir.join(format!("compare-{a}-{b}.csv")),
                "meanError\n0.8\n1.1\n1.3\n0.9\n4.2\n",
            );
        }
    }
    let mut scan = String::from("scale,renderFactor,mean\n");
    for r in 0..scan_rows {
        scan.push_str(&format!("{},{},{}\n", 0.1 * (r / 6 + 1) as f64, r % 6, r as f64));
    }
    write_file(&dir.join("comparison-parameter-scan.csv"), &scan);
}

fn config(input: &Path, out: &Path) -> RunConfig {
    RunConfig {
        input_dir: input.to_path_buf(),
        out_dir: out.to_path_buf(),
        lookup: LookupPolicy::ReversedFallback,
        unit: Unit::Micrometers,
        keep_svg: false,
        summary_path: None,
    }
}

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["stim-paperplots"]).unwrap();
    let cfg = RunConfig::from(cli);
    assert_eq!(cfg.input_dir, PathBuf::from("."));
    assert_eq!(cfg.out_dir, PathBuf::from("."));
    assert_eq!(cfg.lookup, LookupPolicy::ReversedFallback);
    assert_eq!(cfg.unit, Unit::Micrometers);
    assert!(!cfg.keep_svg);
    assert!(cfg.summary_path.is_none());
}

#[test]
fn test_cli_flags() {
    let cli = Cli::try_parse_from([
        "stim-paperplots",
        "--input",
        "data",
        "--out",
        "figs",
        "--strict-names",
        "--unit",
        "px",
        "--svg",
        "--summary",
        "figs/summary.json",
    ])
    .unwrap();
    let cfg = RunConfig::from(cli);
    assert_eq!(cfg.input_dir, PathBuf::from("data"));
    assert_eq!(cfg.lookup, LookupPolicy::Strict);
    assert_eq!(cfg.unit, Unit::Pixels);
    assert!(cfg.keep_svg);
    assert_eq!(cfg.summary_path, Some(PathBuf::from("figs/summary.json")));
}

#[test]
fn test_cli_rejects_unknown_unit() {
    assert!(Cli::try_parse_from(["stim-paperplots", "--unit", "mm"]).is_err());
}

#[test]
fn test_run_produces_both_figures() {
    let input = make_temp_dir();
    let out = make_temp_dir().join("out");
    write_inputs(&input, 20);

    let mut cfg = config(&input, &out);
    cfg.summary_path = Some(out.join("summary.json"));
    run(cfg).unwrap();

    for name in [PAIRWISE_FIGURE, SCAN_FIGURE, "summary.json"] {
        let meta = fs::metadata(out.join(name)).unwrap();
        assert!(meta.len() > 0, "{name} is empty");
    }
    for name in [PAIRWISE_FIGURE, SCAN_FIGURE] {
        let bytes = fs::read(out.join(name)).unwrap();
        assert!(bytes.starts_with(b"%PDF-"), "{name} is not a PDF");
    }
    assert!(!out.join(PAIRWISE_SVG).exists());
    assert!(!out.join(SCAN_SVG).exists());
}

#[test]
fn test_run_keeps_svg_on_request() {
    let input = make_temp_dir();
    let out = make_temp_dir();
    write_inputs(&input, 12);

    let mut cfg = config(&input, &out);
    cfg.keep_svg = true;
    run(cfg).unwrap();

    for name in [PAIRWISE_FIGURE, SCAN_FIGURE, PAIRWISE_SVG, SCAN_SVG] {
        assert!(out.join(name).exists(), "{name} missing");
    }
}

#[test]
fn test_run_fails_without_comparisons() {
    let input = make_temp_dir();
    let out = make_temp_dir();
    let err = run(config(&input, &out)).unwrap_err();
    assert!(err.contains("missing input"));
    assert!(!out.join(PAIRWISE_FIGURE).exists());
}

#[test]
fn test_missing_scan_keeps_first_figure() {
    let input = make_temp_dir();
    let out = make_temp_dir();
    write_inputs(&input, 6);
    fs::remove_file(input.join("comparison-parameter-scan.csv")).unwrap();

    assert!(run(config(&input, &out)).is_err());
    assert!(out.join(PAIRWISE_FIGURE).exists());
    assert!(!out.join(SCAN_FIGURE).exists());
}
