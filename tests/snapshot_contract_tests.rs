use candle_canvas::api::{
    ChartEngine, ChartEngineConfig, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot,
};
use candle_canvas::core::{Candle, Viewport};
use candle_canvas::render::NullRenderer;

fn engine_with_data() -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        Viewport::new(640, 360),
        ChartEngineConfig::default(),
    )
    .expect("engine");
    engine.set_title("Snapshot").expect("title");
    engine
        .append_candle(Candle::new(1_000, 10.0, 12.0, 9.0, 11.0, 5.0).expect("candle"))
        .expect("append");
    engine
        .append_candle(Candle::new(4_000, 11.0, 11.5, 8.0, 8.5, 9.0).expect("candle"))
        .expect("append");
    engine.set_series(vec![9.5, 10.5, 11.0]).expect("series");
    engine
}

#[test]
fn snapshot_captures_state_and_geometry() {
    let mut engine = engine_with_data();
    engine.render().expect("render");
    let snapshot = engine.snapshot().expect("snapshot");

    assert_eq!(snapshot.viewport, Viewport::new(640, 360));
    assert_eq!(snapshot.title, "Snapshot");
    assert_eq!(snapshot.time_range, Some((1_000, 4_000)));
    assert_eq!(snapshot.candle_geometry.len(), 2);
    assert!(!snapshot.candle_geometry[1].is_bullish);
    assert_eq!(snapshot.render_count, 1);
    assert_eq!(snapshot.price_domain, engine.price_domain().expect("domain"));
}

#[test]
fn json_contract_v1_round_trips() {
    let snapshot = engine_with_data().snapshot().expect("snapshot");
    let json = snapshot.to_json_contract_v1_pretty().expect("json");

    let value: serde_json::Value = serde_json::from_str(&json).expect("value");
    assert_eq!(value["schema_version"], ENGINE_SNAPSHOT_JSON_SCHEMA_V1);

    let parsed = EngineSnapshot::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed.title, snapshot.title);
    assert_eq!(parsed.candles, snapshot.candles);
    assert_eq!(parsed.series, snapshot.series);
    assert_eq!(parsed.time_range, snapshot.time_range);
    assert_eq!(parsed.candle_geometry.len(), snapshot.candle_geometry.len());
    assert!((parsed.price_domain.0 - snapshot.price_domain.0).abs() <= 1e-9);
    assert!((parsed.price_domain.1 - snapshot.price_domain.1).abs() <= 1e-9);
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let snapshot = engine_with_data().snapshot().expect("snapshot");
    let bare = serde_json::to_string_pretty(&snapshot).expect("bare json");
    let contract = snapshot.to_json_contract_v1_pretty().expect("contract json");

    let from_bare = EngineSnapshot::from_json_compat_str(&bare).expect("parse bare");
    let from_contract = EngineSnapshot::from_json_compat_str(&contract).expect("parse contract");
    assert_eq!(from_bare, from_contract);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let snapshot = engine_with_data().snapshot().expect("snapshot");
    let json = serde_json::json!({ "schema_version": 2, "snapshot": snapshot }).to_string();

    assert!(EngineSnapshot::from_json_compat_str(&json).is_err());
}

#[test]
fn empty_chart_has_no_time_range() {
    let engine = ChartEngine::new(
        NullRenderer::default(),
        Viewport::new(10, 10),
        ChartEngineConfig::default(),
    )
    .expect("engine");
    let snapshot = engine.snapshot().expect("snapshot");

    assert_eq!(snapshot.time_range, None);
    assert!(snapshot.candle_geometry.is_empty());
    assert_eq!(snapshot.price_domain, (0.0, 1.0));
}
