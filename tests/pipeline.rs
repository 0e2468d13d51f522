use diabetes_brackets::charts::ChartError;
use diabetes_brackets::data::{load_csv, DataProcessor, LoaderError};
use diabetes_brackets::stats::{bracket_aggregates, bracket_counts, percentage_aggregates};
use diabetes_brackets::{run, Config};
use std::fs;
use std::path::Path;

const DATASET: &str = "\
gender,age,hypertension,heart_disease,smoking_history,bmi,HbA1c_level,blood_glucose_level,diabetes
Female,80.0,0,1,never,25.19,6.6,140,0
Female,54.0,0,0,No Info,27.32,6.6,80,0
Male,28.0,0,0,never,27.32,5.7,158,0
Female,36.0,0,0,current,23.45,5.0,155,0
Male,76.0,1,1,current,20.14,4.8,155,0
Female,20.0,0,0,never,27.32,6.6,85,0
Female,44.0,0,0,never,19.31,6.5,200,1
Female,79.0,0,0,No Info,23.86,5.7,85,0
Male,42.0,0,0,never,33.64,4.8,145,0
Female,32.0,0,0,never,27.32,5.0,100,0
Female,53.0,0,0,never,27.32,6.1,85,0
Female,54.0,0,0,former,54.7,6.0,100,0
Female,78.0,0,0,former,36.05,5.0,130,1
Female,67.0,0,0,never,25.69,5.8,200,0
Female,76.0,0,0,No Info,27.32,5.0,160,0
Male,78.0,0,0,No Info,27.32,6.6,126,0
Male,15.0,0,0,never,30.36,6.1,200,0
Female,42.0,0,0,never,24.48,5.7,158,0
Female,42.0,0,0,No Info,27.32,5.7,80,0
Male,37.0,0,0,ever,25.72,3.5,159,0
Male,40.0,0,0,current,36.38,6.0,90,1
Male,5.0,0,0,No Info,18.8,6.2,85,0
Female,69.0,0,0,never,21.24,4.8,85,0
Female,72.0,0,1,former,27.94,6.5,130,0
Male,4.0,0,0,No Info,13.99,4.0,140,0
Female,0.88,0,0,No Info,17.5,4.5,145,0
";

fn write_dataset(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("diabetes_prediction_dataset.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn config(dir: &Path, input: std::path::PathBuf) -> Config {
    Config {
        input,
        out_dir: dir.join("charts"),
        dpi: 40,
        diagnostics: false,
        show: false,
    }
}

fn is_font_failure(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ChartError>(), Some(ChartError::Font(_))))
}

/// Bracket totals and (negative, positive) pairs computed without drawing.
fn bracket_numbers(input: &Path) -> (Vec<usize>, Vec<(usize, usize)>) {
    let table = DataProcessor::normalize_age(&load_csv(input).unwrap()).unwrap();
    let totals = bracket_counts(&table)
        .unwrap()
        .iter()
        .map(|c| c.total)
        .collect();
    let pairs = bracket_aggregates(&table)
        .unwrap()
        .iter()
        .map(|a| (a.negative, a.positive))
        .collect();
    (totals, pairs)
}

#[test]
fn full_run_writes_four_charts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), DATASET);

    let (totals, pairs) = bracket_numbers(&input);
    assert_eq!(totals, vec![3, 1, 13, 9]);
    assert_eq!(totals.iter().sum::<usize>(), 26);
    assert_eq!(pairs, vec![(3, 0), (1, 0), (11, 2), (8, 1)]);

    let report = match run(&config(dir.path(), input)) {
        Ok(report) => report,
        Err(e) if is_font_failure(&e) => {
            eprintln!("skipping, no usable font: {e:#}");
            return;
        }
        Err(e) => panic!("run failed: {e:?}"),
    };

    assert_eq!(report.rows, 26);
    for path in report.chart_paths() {
        assert!(path.exists(), "{} missing", path.display());
    }

    let drawn_totals: Vec<usize> = report.bracket_counts.data.iter().map(|c| c.total).collect();
    assert_eq!(drawn_totals, totals);
    assert_eq!(drawn_totals.iter().sum::<usize>(), report.rows);

    let drawn_pairs: Vec<(usize, usize)> = report
        .stacked_counts
        .data
        .iter()
        .map(|a| (a.negative, a.positive))
        .collect();
    assert_eq!(drawn_pairs, pairs);

    for pct in &report.stacked_percentages.data {
        assert!((pct.negative_pct + pct.positive_pct - 100.0).abs() < 1e-9);
    }
    assert_eq!(report.histogram.data.len(), 30);
}

#[test]
fn header_only_file_writes_four_empty_charts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), "age,diabetes\n");

    let (totals, pairs) = bracket_numbers(&input);
    assert_eq!(totals, vec![0; 4]);
    assert_eq!(pairs, vec![(0, 0); 4]);
    let table = DataProcessor::normalize_age(&load_csv(&input).unwrap()).unwrap();
    let percentages = percentage_aggregates(&table).unwrap();
    assert!(percentages.iter().all(|p| p.is_empty()));

    let report = match run(&config(dir.path(), input)) {
        Ok(report) => report,
        Err(e) if is_font_failure(&e) => {
            eprintln!("skipping, no usable font: {e:#}");
            return;
        }
        Err(e) => panic!("run failed: {e:?}"),
    };

    assert_eq!(report.rows, 0);
    for path in report.chart_paths() {
        assert!(path.exists(), "{} missing", path.display());
    }
    assert!(report.histogram.data.is_empty());
    assert!(report.bracket_counts.data.iter().all(|c| c.total == 0));
    assert!(report.stacked_counts.data.iter().all(|a| a.total() == 0));
    assert_eq!(report.stacked_percentages.data, percentages);
}

#[test]
fn missing_input_fails_before_any_chart() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), dir.path().join("absent.csv"));

    let err = run(&cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoaderError>(),
        Some(LoaderError::FileNotFound(_))
    ));
    assert!(!cfg.out_dir.exists());
}

#[test]
fn non_numeric_age_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), "age,diabetes\n44,0\nforty,1\n");
    let cfg = config(dir.path(), input);

    let err = run(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("Cannot convert column 'age'"));
    assert!(!cfg.out_dir.exists());
}
