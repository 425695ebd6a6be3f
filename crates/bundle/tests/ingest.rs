//! End-to-end bundle ingestion over a temporary quote tree.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use fxbundle_bundle::{
    ingest, AdjustmentWriter, AssetDbWriter, DailyBarWriter, MinuteBarWriter,
};
use fxbundle_calendar::BuiltinCalendars;
use fxbundle_core::{Bar, BundleConfig, Error, Result, Sid, SymbolMetadata};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "date,bidopen,bidhigh,bidlow,bidclose,askopen,askhigh,asklow,askclose";

#[derive(Default)]
struct RecordBars {
    data: Vec<(Sid, Vec<Bar>)>,
}

impl DailyBarWriter for RecordBars {
    fn write(&mut self, data: &[(Sid, Vec<Bar>)]) -> Result<()> {
        self.data = data.to_vec();
        Ok(())
    }
}

impl MinuteBarWriter for RecordBars {
    fn write(&mut self, data: &[(Sid, Vec<Bar>)]) -> Result<()> {
        self.data = data.to_vec();
        Ok(())
    }
}

#[derive(Default)]
struct RecordAssets {
    rows: Vec<SymbolMetadata>,
    called: bool,
}

impl AssetDbWriter for RecordAssets {
    fn write(&mut self, equities: &[SymbolMetadata]) -> Result<()> {
        self.rows = equities.to_vec();
        self.called = true;
        Ok(())
    }
}

#[derive(Default)]
struct RecordAdjustments {
    called: bool,
}

impl AdjustmentWriter for RecordAdjustments {
    fn write(&mut self) -> Result<()> {
        self.called = true;
        Ok(())
    }
}

struct FailingDailyWriter;

impl DailyBarWriter for FailingDailyWriter {
    fn write(&mut self, _data: &[(Sid, Vec<Bar>)]) -> Result<()> {
        Err(Error::writer("disk full"))
    }
}

fn write_quotes(dir: &Path, name: &str, rows: &[(&str, f64, f64)]) {
    let mut contents = String::from(HEADER);
    for (ts, bid, ask) in rows {
        contents.push('\n');
        contents.push_str(&format!(
            "{ts},{bid},{bid},{bid},{bid},{ask},{ask},{ask},{ask}"
        ));
    }
    contents.push('\n');
    fs::write(dir.join(name), contents).expect("write quote file");
}

/// Two symbols across the week of 2021-03-01 (a Monday).
///
/// Daily candles are stamped at their 21:00 open, so a row dated Sunday
/// 2021-02-28 labels the Monday session. AUDUSD is missing its Wednesday
/// candle; EURUSD is gap-free. Files are created in non-lexicographic
/// order to exercise the discovery sort.
fn make_tree() -> TempDir {
    let root = TempDir::new().expect("temp root");
    let daily = root.path().join("D1");
    let minute = root.path().join("m1");
    fs::create_dir_all(&daily).expect("mkdir D1");
    fs::create_dir_all(&minute).expect("mkdir m1");

    write_quotes(
        &daily,
        "EURUSD_D1.csv",
        &[
            ("2021-02-28 21:00:00", 1.2000, 1.2002),
            ("2021-03-01 21:00:00", 1.2000, 1.2002),
            ("2021-03-02 21:00:00", 1.2000, 1.2002),
        ],
    );
    // unsorted on purpose, Wednesday (label 2021-03-03) absent
    write_quotes(
        &daily,
        "AUDUSD_D1.csv",
        &[
            ("2021-03-03 21:00:00", 1.1000, 1.1002),
            ("2021-02-28 21:00:00", 1.1000, 1.1002),
            ("2021-03-01 21:00:00", 1.1000, 1.1002),
        ],
    );

    // Friday minutes straddling the 20:00 early close
    write_quotes(
        &minute,
        "AUDUSD_m1.csv",
        &[
            ("2021-03-05 19:58:00", 1.1000, 1.1002),
            ("2021-03-05 19:59:00", 1.1000, 1.1002),
            ("2021-03-05 20:00:00", 1.1000, 1.1002),
            ("2021-03-05 20:01:00", 1.1000, 1.1002),
        ],
    );
    // Sunday minutes straddling the 22:00 late open
    write_quotes(
        &minute,
        "EURUSD_m1.csv",
        &[
            ("2021-03-07 21:58:00", 1.2000, 1.2002),
            ("2021-03-07 21:59:00", 1.2000, 1.2002),
            ("2021-03-07 22:00:00", 1.2000, 1.2002),
            ("2021-03-07 22:01:00", 1.2000, 1.2002),
        ],
    );
    root
}

fn run(config: &BundleConfig) -> Result<fxbundle_core::BundleOutput> {
    let provider = BuiltinCalendars::new();
    let mut daily = RecordBars::default();
    let mut minute = RecordBars::default();
    let mut assets = RecordAssets::default();
    let mut adjustments = RecordAdjustments::default();
    ingest(
        config,
        &provider,
        &mut daily,
        &mut minute,
        &mut assets,
        &mut adjustments,
    )
}

fn d(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

#[test]
fn sids_follow_lexicographic_discovery_order() {
    let root = make_tree();
    let output = run(&BundleConfig::with_root(root.path())).expect("ingest");

    assert_eq!(output.metadata.len(), 2);
    assert_eq!(output.metadata[0].sid, 0);
    assert_eq!(output.metadata[0].symbol, "AUDUSD");
    assert_eq!(output.metadata[1].sid, 1);
    assert_eq!(output.metadata[1].symbol, "EURUSD");
}

#[test]
fn metadata_stays_parallel_with_bar_series() {
    let root = make_tree();
    let output = run(&BundleConfig::with_root(root.path())).expect("ingest");

    assert_eq!(output.metadata.len(), output.daily.len());
    assert_eq!(output.metadata.len(), output.minute.len());
    for (i, row) in output.metadata.iter().enumerate() {
        assert_eq!(row.sid, i as u32);
        assert_eq!(output.daily[i].0, row.sid);
        assert_eq!(output.minute[i].0, row.sid);
    }
}

#[test]
fn missing_day_is_forward_filled() {
    let root = make_tree();
    let output = run(&BundleConfig::with_root(root.path())).expect("ingest");

    // AUDUSD: Mon, Tue, Wed (filled), Thu
    let (_, bars) = &output.daily[0];
    assert_eq!(bars.len(), 4);
    let wednesday = &bars[2];
    assert_eq!(wednesday.ts.date_naive(), d("2021-03-03"));
    assert_eq!(wednesday.volume, 0);
    assert_relative_eq!(wednesday.open, 1.1001, epsilon = 1e-9);
    assert_relative_eq!(wednesday.close, 1.1001, epsilon = 1e-9);
    // identical to Tuesday's bar apart from the label
    assert_eq!(wednesday.open, bars[1].open);
    assert_eq!(wednesday.high, bars[1].high);
    assert_eq!(wednesday.low, bars[1].low);
    assert_eq!(wednesday.close, bars[1].close);
}

#[test]
fn gap_free_symbol_passes_through() {
    let root = make_tree();
    let output = run(&BundleConfig::with_root(root.path())).expect("ingest");

    let (_, bars) = &output.daily[1];
    assert_eq!(bars.len(), 3);
    for bar in bars {
        assert_relative_eq!(bar.open, 1.2001, epsilon = 1e-9);
        assert_eq!(bar.volume, 0);
    }
}

#[test]
fn minute_bars_respect_session_windows() {
    let root = make_tree();
    let output = run(&BundleConfig::with_root(root.path())).expect("ingest");

    let friday_close = chrono::NaiveTime::from_hms_opt(20, 0, 0).expect("valid time");
    let sunday_open = chrono::NaiveTime::from_hms_opt(22, 0, 0).expect("valid time");

    // AUDUSD Friday: 19:58, 19:59, 20:00 kept; 20:01 dropped
    let (_, aud) = &output.minute[0];
    assert_eq!(aud.len(), 3);
    assert!(aud.iter().all(|b| b.ts.time() <= friday_close));

    // EURUSD Sunday: 22:00, 22:01 kept; pre-open dropped
    let (_, eur) = &output.minute[1];
    assert_eq!(eur.len(), 2);
    assert!(eur.iter().all(|b| b.ts.time() >= sunday_open));
}

#[test]
fn metadata_arithmetic_holds() {
    let root = make_tree();
    let config = BundleConfig::with_root(root.path());
    let output = run(&config).expect("ingest");

    for row in &output.metadata {
        assert_eq!(row.auto_close_date, row.end_date + chrono::Duration::days(1));
        assert_eq!(row.first_traded, row.start_date);
        assert!(row.start_date >= config.earliest_date);
        assert_eq!(row.exchange, "FXCM");
    }
    assert_eq!(output.metadata[0].start_date, d("2021-03-01"));
    assert_eq!(output.metadata[0].end_date, d("2021-03-04"));
    assert_eq!(output.metadata[0].auto_close_date, d("2021-03-05"));
    assert_eq!(output.metadata[1].end_date, d("2021-03-03"));
}

#[test]
fn window_clipping_shifts_metadata() {
    let root = make_tree();
    let mut config = BundleConfig::with_root(root.path());
    config.start = Some(d("2021-03-02"));
    let output = run(&config).expect("ingest");

    let (_, bars) = &output.daily[0];
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].ts.date_naive(), d("2021-03-02"));
    assert_eq!(output.metadata[0].start_date, d("2021-03-02"));
}

#[test]
fn runs_are_deterministic_across_worker_counts() {
    let root = make_tree();
    let mut serial = BundleConfig::with_root(root.path());
    serial.workers = 1;
    let mut parallel = BundleConfig::with_root(root.path());
    parallel.workers = 4;

    let a = run(&serial).expect("serial run");
    let b = run(&parallel).expect("parallel run");

    assert_eq!(a.daily, b.daily);
    assert_eq!(a.minute, b.minute);
    assert_eq!(a.metadata, b.metadata);
}

#[test]
fn missing_minute_file_aborts_the_run() {
    let root = make_tree();
    fs::remove_file(root.path().join("m1").join("EURUSD_m1.csv")).expect("remove");
    let err = run(&BundleConfig::with_root(root.path())).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn malformed_row_aborts_the_run() {
    let root = make_tree();
    let path = root.path().join("D1").join("AUDUSD_D1.csv");
    let mut contents = fs::read_to_string(&path).expect("read");
    contents.push_str("2021-03-04 21:00:00,not-a-price,1,1,1,1,1,1,1\n");
    fs::write(&path, contents).expect("write");

    let err = run(&BundleConfig::with_root(root.path())).unwrap_err();
    match err {
        Error::Parse { path, .. } => {
            assert!(path.to_string_lossy().contains("AUDUSD_D1.csv"));
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn writer_failure_skips_remaining_writes() {
    let root = make_tree();
    let config = BundleConfig::with_root(root.path());
    let provider = BuiltinCalendars::new();
    let mut daily = FailingDailyWriter;
    let mut minute = RecordBars::default();
    let mut assets = RecordAssets::default();
    let mut adjustments = RecordAdjustments::default();

    let err = ingest(
        &config,
        &provider,
        &mut daily,
        &mut minute,
        &mut assets,
        &mut adjustments,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Writer(_)));
    assert!(minute.data.is_empty());
    assert!(!assets.called);
    assert!(!adjustments.called);
}

#[test]
fn empty_root_is_config_error() {
    let root = TempDir::new().expect("temp root");
    fs::create_dir_all(root.path().join("D1")).expect("mkdir");
    let err = run(&BundleConfig::with_root(root.path())).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
