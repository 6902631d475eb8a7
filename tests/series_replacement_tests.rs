use candle_canvas::api::ChartEngineConfig;
use candle_canvas::core::Candle;
use candle_canvas::error::ChartError;
use candle_canvas::module::EngineModule;

fn seeded_candles() -> Vec<Candle> {
    vec![
        Candle::new(1_000, 100.0, 104.0, 98.0, 103.0, 1_200.0).expect("candle"),
        Candle::new(2_000, 103.0, 106.0, 101.0, 102.0, 900.0).expect("candle"),
    ]
}

#[test]
fn second_series_fully_replaces_the_first() {
    let module = EngineModule::new("series", ChartEngineConfig::default()).expect("module");
    let replaced = module.create(200, 120).expect("create");
    let fresh = module.create(200, 120).expect("create");

    for handle in [replaced, fresh] {
        module.set_title(handle, "Series").expect("title");
        for candle in seeded_candles() {
            module.add_candle(handle, candle).expect("candle");
        }
    }

    let first: Vec<f64> = (0..256).map(|i| 150.0 + f64::from(i % 40)).collect();
    let second = vec![101.0, 99.5, 102.25, 100.0];
    module.set_series(replaced, &first).expect("first series");
    module.set_series(replaced, &second).expect("second series");
    module.set_series(fresh, &second).expect("only series");

    let replaced_snapshot = module.snapshot(replaced).expect("snapshot");
    let fresh_snapshot = module.snapshot(fresh).expect("snapshot");
    assert_eq!(replaced_snapshot.series, second);
    assert_eq!(replaced_snapshot, fresh_snapshot);

    assert_eq!(
        module.render(replaced).expect("render"),
        module.render(fresh).expect("render")
    );
}

#[test]
fn rejected_series_keeps_previous_samples() {
    let module = EngineModule::new("series", ChartEngineConfig::default()).expect("module");
    let handle = module.create(64, 64).expect("create");
    module.set_series(handle, &[1.0, 2.0, 3.0]).expect("series");

    assert!(matches!(
        module.set_series(handle, &[1.0, f64::NAN]),
        Err(ChartError::InvalidData(_))
    ));
    assert_eq!(
        module.snapshot(handle).expect("snapshot").series,
        vec![1.0, 2.0, 3.0]
    );
}

#[test]
fn empty_series_clears_the_line() {
    let module = EngineModule::new("series", ChartEngineConfig::default()).expect("module");
    let with_line = module.create(64, 48).expect("create");
    let bare = module.create(64, 48).expect("create");

    module.set_series(with_line, &[10.0, 20.0, 15.0]).expect("series");
    module.set_series(with_line, &[]).expect("clear");

    assert_eq!(
        module.render(with_line).expect("render"),
        module.render(bare).expect("render")
    );
}
