use std::sync::Arc;

use candle_canvas::api::ChartEngineConfig;
use candle_canvas::error::ChartError;
use candle_canvas::module::{
    ModuleDescriptor, ModuleLoader, ModuleSource, load_module, MODULE_DESCRIPTOR_SCHEMA_V1,
};
use indexmap::IndexMap;

fn write_descriptor(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("write descriptor");
    path
}

#[tokio::test]
async fn concurrent_gets_share_one_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_descriptor(
        &dir,
        "engine.json",
        r#"{"schema_version":1,"name":"shared"}"#,
    );
    let loader = ModuleLoader::new(ModuleSource::descriptor(path));

    let (a, b, c) = tokio::join!(loader.get(), loader.get(), loader.get());
    let a = a.expect("a");
    let b = b.expect("b");
    let c = c.expect("c");

    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&b, &c));
    assert_eq!(loader.attempts(), 1);
    assert!(loader.is_loaded());
}

#[tokio::test]
async fn repeated_gets_return_the_memoized_module() {
    let loader = ModuleLoader::default();
    let first = loader.get().await.expect("first");
    let second = loader.get().await.expect("second");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.attempts(), 1);
    assert!(Arc::ptr_eq(&first, &loader.loaded().expect("loaded")));
}

#[tokio::test]
async fn failed_load_can_be_retried() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("late.json");
    let loader = ModuleLoader::new(ModuleSource::descriptor(&path));

    let err = loader.get().await.expect_err("missing descriptor");
    assert!(matches!(err, ChartError::ModuleLoad { .. }));
    assert!(!loader.is_loaded());
    assert!(loader.loaded().is_none());

    std::fs::write(&path, r#"{"schema_version":1,"name":"late"}"#).expect("write");
    let module = loader.get().await.expect("retry succeeds");

    assert_eq!(module.name(), "late");
    assert_eq!(loader.attempts(), 2);
}

#[tokio::test]
async fn descriptor_carries_config_and_metadata() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_descriptor(
        &dir,
        "desk.json",
        r#"{
            "schema_version": 1,
            "name": "desk",
            "config": { "max_live_charts": 3, "style": { "grid_rows": 6 } },
            "metadata": { "build": "2024.1", "owner": "charts" }
        }"#,
    );

    let module = load_module(&ModuleSource::descriptor(path))
        .await
        .expect("load");

    assert_eq!(module.name(), "desk");
    assert_eq!(module.config().max_live_charts, 3);
    assert_eq!(module.config().style.grid_rows, 6);
    assert_eq!(module.config().max_title_chars, 256);
    assert_eq!(
        module.metadata().keys().collect::<Vec<_>>(),
        vec!["build", "owner"]
    );
}

#[tokio::test]
async fn bad_descriptors_reject_with_module_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cases = [
        ("garbage.json", "not json"),
        ("future.json", r#"{"schema_version":9,"name":"x"}"#),
        (
            "invalid_config.json",
            r#"{"schema_version":1,"name":"x","config":{"max_live_charts":0}}"#,
        ),
    ];

    for (file, body) in cases {
        let path = write_descriptor(&dir, file, body);
        let err = load_module(&ModuleSource::descriptor(&path))
            .await
            .expect_err(file);
        match err {
            ChartError::ModuleLoad { origin, .. } => {
                assert_eq!(origin, path.display().to_string());
            }
            other => panic!("unexpected error for {file}: {other}"),
        }
    }
}

#[tokio::test]
async fn invalid_builtin_config_fails_to_load() {
    let source = ModuleSource::builtin(ChartEngineConfig::default().with_max_live_charts(0));
    let err = load_module(&source).await.expect_err("invalid config");

    match err {
        ChartError::ModuleLoad { origin, .. } => assert_eq!(origin, "builtin:candle-canvas"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn descriptor_json_round_trips_metadata_order() {
    let mut metadata = IndexMap::new();
    metadata.insert("zeta".to_owned(), "1".to_owned());
    metadata.insert("alpha".to_owned(), "2".to_owned());
    let descriptor = ModuleDescriptor {
        schema_version: MODULE_DESCRIPTOR_SCHEMA_V1,
        name: "ordered".to_owned(),
        config: ChartEngineConfig::default(),
        metadata,
    };

    let json = descriptor.to_json_pretty().expect("serialize");
    let parsed = ModuleDescriptor::from_json_str(&json).expect("parse");

    assert_eq!(parsed.name, descriptor.name);
    assert_eq!(parsed.config.max_live_charts, descriptor.config.max_live_charts);
    assert_eq!(
        parsed.metadata.keys().collect::<Vec<_>>(),
        vec!["zeta", "alpha"]
    );
}
