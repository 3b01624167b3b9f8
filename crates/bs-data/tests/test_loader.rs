//! Loader precedence, caching, and ingestion against real files.

use std::sync::Arc;

use bs_core::errors::ValidationError;
use bs_core::EngineConfig;
use bs_data::{render_legacy, validate_legacy_dataset, FileSource, Loader, SourceKind, StructuredDataset};
use bs_time::{AdDate, BsDate};
use proptest::prelude::*;

/// `n` consecutive days starting at 2081-01-01 = 2024-04-13, with 30-day
/// months so that BS dates stay valid.
fn pairs(n: usize) -> Vec<(BsDate, AdDate)> {
    let start = AdDate::from_ymd(2024, 4, 13).unwrap();
    (0..n)
        .map(|i| {
            let bs = BsDate::new(2081 + (i / 360) as i32, (i % 360 / 30) as u32 + 1, (i % 30) as u32 + 1)
                .unwrap();
            (bs, start.add_days(i as i64).unwrap())
        })
        .collect()
}

fn config(dir: &std::path::Path) -> EngineConfig {
    EngineConfig::from_toml_str("min_entries = 100").unwrap().rooted_at(dir)
}

#[test]
fn validator_threshold_is_inclusive() {
    let short = render_legacy(&pairs(99));
    assert_eq!(
        validate_legacy_dataset(short.as_bytes(), 100),
        Err(ValidationError::TooFewEntries { found: 99, required: 100 })
    );
    let enough = render_legacy(&pairs(100));
    assert_eq!(validate_legacy_dataset(enough.as_bytes(), 100), Ok(100));
}

#[test]
fn structured_file_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    std::fs::create_dir_all(cfg.structured_path.parent().unwrap()).unwrap();
    std::fs::write(
        &cfg.structured_path,
        r#"{"mappings": {"2082-04-01": "2025-07-17"}, "daysPerMonth": {}, "range": {"min": "2082-04-01", "max": "2082-04-01"}}"#,
    )
    .unwrap();

    let loader = Loader::from_config(&cfg);
    let active = loader.resolve();
    assert_eq!(active.kind(), SourceKind::Structured);
    let conv = active.converter();
    assert_eq!(conv.bs_to_ad(2082, 4, 1).unwrap().to_string(), "2025-07-17");
    assert_eq!(conv.ad_to_bs(2025, 7, 17).unwrap().to_string(), "2082-04-01");
}

#[test]
fn promotion_replaces_file_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let loader = Loader::from_config(&cfg);
    assert_eq!(loader.resolve().kind(), SourceKind::None);

    let raw = render_legacy(&pairs(400));
    assert_eq!(loader.promote_legacy(&raw).unwrap(), 400);
    assert!(cfg.legacy_path.exists());

    let active = loader.resolve();
    assert_eq!(active.kind(), SourceKind::Legacy);
    assert_eq!(active.index().len(), 400);
    // All twelve 30-day months of 2081 are complete; 2082 is partial.
    assert!(active.table().contains_year(2081));
    assert!(!active.table().contains_year(2082));
}

#[test]
fn promoted_legacy_does_not_override_structured() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let ds = StructuredDataset {
        mappings: vec![("2082-04-01".parse().unwrap(), "2025-07-17".parse().unwrap())],
        ..StructuredDataset::default()
    };
    std::fs::create_dir_all(cfg.structured_path.parent().unwrap()).unwrap();
    std::fs::write(&cfg.structured_path, ds.to_json_string().unwrap()).unwrap();

    let loader = Loader::from_config(&cfg);
    loader.promote_legacy(&render_legacy(&pairs(120))).unwrap();
    assert_eq!(loader.resolve().kind(), SourceKind::Structured);
}

#[test]
fn ambiguous_legacy_is_rejected_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let loader = Loader::from_config(&cfg);
    let mut p = pairs(150);
    p[10].1 = p[11].1;
    let raw = render_legacy(&p);
    assert!(matches!(loader.validate(raw.as_bytes()), Err(ValidationError::Conflicting(_))));
    let err = loader.promote_legacy(&raw).unwrap_err();
    assert!(matches!(err, bs_core::Error::Validation(ValidationError::Conflicting(_))));
    assert!(!cfg.legacy_path.exists());
}

#[test]
fn repeated_rows_count_once() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Loader::from_config(&config(dir.path()));
    let mut p = pairs(60);
    p.extend(pairs(60));
    let raw = render_legacy(&p);
    assert_eq!(
        loader.validate(raw.as_bytes()),
        Err(ValidationError::TooFewEntries { found: 60, required: 100 })
    );
    assert!(loader.promote_legacy(&raw).is_err());

    let mut p = pairs(100);
    p.extend(pairs(100));
    assert_eq!(loader.promote_legacy(&render_legacy(&p)).unwrap(), 100);
    assert_eq!(loader.resolve().index().len(), 100);
}

#[test]
fn exported_structured_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let source = FileSource::from_config(&cfg);
    let loader = Loader::new(source.clone());
    loader.promote_legacy(&render_legacy(&pairs(360))).unwrap();
    let legacy = loader.resolve();

    std::fs::write(source.structured_path(), legacy.to_structured().to_json_string().unwrap()).unwrap();
    loader.invalidate();
    let structured = loader.resolve();
    assert_eq!(structured.kind(), SourceKind::Structured);
    assert_eq!(structured.index().sorted_pairs(), legacy.index().sorted_pairs());
    assert_eq!(structured.table(), legacy.table());
}

#[test]
fn concurrent_resolution_shares_one_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let loader = Loader::from_config(&cfg);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let loader = loader.clone();
            std::thread::spawn(move || loader.resolve())
        })
        .collect();
    let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for s in &snapshots[1..] {
        assert!(Arc::ptr_eq(&snapshots[0], s));
    }
}

proptest! {
    #[test]
    fn ad_day_padding_is_irrelevant(serial in 0i32..40_000) {
        let ad = AdDate::from_serial(serial).unwrap();
        let (y, m, d) = ad.ymd();
        let month = bs_time::Month::from_number(m).unwrap();
        let bare = format!(r#"<b class="bs-date">2081-01-01</b><b class="ad-date">{d} {} {y}</b>"#, month.long_name());
        let padded = format!(r#"<b class="bs-date">2081-01-01</b><b class="ad-date">{d:02} {} {y}</b>"#, month.short_name());
        let a = bs_data::extract(&bare).pairs;
        let b = bs_data::extract(&padded).pairs;
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a[0].1, ad);
    }
}
