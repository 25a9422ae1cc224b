use include_locator::{
    build_catalog,
    resolve,
    LocalDirectorySet,
};
use log::{
    Level,
    LevelFilter,
    Log,
    Metadata,
    Record
};
use std::sync::{
    Mutex,
    Once
};

/// Keeps every record so the test can check which level each diagnostic used.
struct Capture;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.lock().unwrap().push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn install() {
    INSTALL.call_once(|| {
        log::set_logger(&Capture).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

#[test]
fn per_item_diagnostics_stay_below_warn() {
    install();
    let tmp = tempfile::tempdir().unwrap();
    let missing_root = tmp.path().join("no-such-root");
    let cat = build_catalog(&[missing_root], &[] as &[&str]);

    let includes = ["quiet_missing_header.h".to_string()].into_iter().collect();
    let res = resolve(&includes, &cat, &LocalDirectorySet::new(Vec::new()).with_base(tmp.path()));
    assert_eq!(res.not_found(), &["quiet_missing_header.h".to_string()]);
    assert_eq!(cat.skipped().len(), 1);

    let records = RECORDS.lock().unwrap();
    let loud: Vec<_> = records.iter().filter(|(lvl, _)| *lvl <= Level::Warn).collect();
    assert!(loud.is_empty(), "unexpected warn/error records: {loud:?}");

    // Still visible once the filter is lowered for verbose runs.
    assert!(records
        .iter()
        .any(|(lvl, msg)| *lvl == Level::Info && msg == "NOT FOUND: quiet_missing_header.h"));
    assert!(records
        .iter()
        .any(|(lvl, msg)| *lvl == Level::Info && msg.contains("no-such-root")));
}
