use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::{ComparisonRecord, ScanRow};
use crate::pipeline::stage1_pairwise::run_stage1;
use crate::pipeline::stage2_scan::run_stage2;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("stim_paperplots_summary_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_summary_json_shape() {
    let records = vec![ComparisonRecord {
        reference: Source::Automatic,
        other: Source::Dlp,
        path: PathBuf::from("/data/compare-automatic-DLP.csv"),
        mean_errors: vec![1.0, 2.0, 3.0],
        color: Source::Dlp.color(),
    }];
    let rows: Vec<ScanRow> = (0..7)
        .map(|i| ScanRow {
            scale: "0.1".to_string(),
            render_factor: i.to_string(),
            mean: i as f64,
        })
        .collect();
    let boxes = run_stage1(&records).unwrap();
    let scan = run_stage2(&rows);

    let summary = build_summary(
        &boxes,
        &scan,
        Unit::Micrometers,
        LookupPolicy::ReversedFallback,
        &[PathBuf::from("pairwise_error.pdf")],
    );
    let path = make_temp_dir().join("nested").join("summary.json");
    write_summary(&summary, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["tool"], "stim-paperplots");
    assert_eq!(value["unit"], "um");
    assert_eq!(value["lookup"], "reversed_fallback");
    assert_eq!(value["boxes"][0]["reference"], "automatic");
    assert_eq!(value["boxes"][0]["other"], "DLP");
    assert_eq!(value["boxes"][0]["source_file"], "compare-automatic-DLP.csv");
    assert_eq!(value["boxes"][0]["color"], "#d62728");
    assert_eq!(value["boxes"][0]["stats"]["median"], 2.0);
    assert_eq!(value["scan_groups"].as_array().unwrap().len(), 1);
    assert_eq!(value["scan_groups"][0]["label"], "Scale 0.1");
    assert_eq!(value["scan_rows_dropped"], 1);
}
