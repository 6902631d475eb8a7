use candle_canvas::api::{ChartEngine, ChartEngineConfig};
use candle_canvas::core::{
    Candle, LinearScale, PlotArea, PriceScale, PriceScaleTuning, SlotScale, Viewport,
    project_candles,
};
use candle_canvas::module::EngineModule;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            Candle::new(i as i64 * 60_000, open, high, low, close, 1_000.0 + (i % 17) as f64)
                .expect("valid generated candle")
        })
        .collect()
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0, 0.0, 1920.0).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.domain_to_pixel(black_box(4_321.123)).expect("to pixel");
            let _ = scale.pixel_to_domain(px).expect("from pixel");
        })
    });
}

fn bench_candle_projection_10k(c: &mut Criterion) {
    let candles = generated_candles(10_000);
    let plot = PlotArea::full(Viewport::new(1920, 1080)).expect("plot");
    let slots = SlotScale::new(candles.len(), 32, plot).expect("slots");
    let price_scale =
        PriceScale::from_data(&candles, &[], plot, PriceScaleTuning::default()).expect("price");

    c.bench_function("candle_projection_10k", |b| {
        b.iter(|| {
            let _ = project_candles(
                black_box(&candles),
                black_box(slots),
                black_box(price_scale),
                black_box(0.7),
            )
            .expect("projection should succeed");
        })
    });
}

fn bench_raster_render_800x480(c: &mut Criterion) {
    let mut engine =
        ChartEngine::new_raster(Viewport::new(800, 480), ChartEngineConfig::default())
            .expect("engine init");
    engine.set_title("Bench").expect("title");
    for candle in generated_candles(200) {
        engine.append_candle(candle).expect("append");
    }
    let series: Vec<f64> = (0..256).map(|i| 100.0 + (i % 50) as f64).collect();
    engine.set_series(series).expect("series");

    c.bench_function("raster_render_800x480", |b| {
        b.iter(|| {
            let pixels = engine.render_rgba().expect("render should succeed");
            black_box(pixels);
        })
    });
}

fn bench_module_boundary_round_trip(c: &mut Criterion) {
    let module = EngineModule::new("bench", ChartEngineConfig::default()).expect("module");
    let candle = Candle::new(1_000, 10.0, 12.0, 9.0, 11.0, 5.0).expect("candle");

    c.bench_function("module_create_add_render_destroy_160x90", |b| {
        b.iter(|| {
            let handle = module.create(160, 90).expect("create");
            module.add_candle(handle, black_box(candle)).expect("add");
            black_box(module.render(handle).expect("render"));
            module.destroy(handle).expect("destroy");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_candle_projection_10k,
    bench_raster_render_800x480,
    bench_module_boundary_round_trip
);
criterion_main!(benches);
