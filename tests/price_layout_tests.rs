use approx::assert_relative_eq;
use candle_canvas::api::{ChartEngine, ChartEngineConfig};
use candle_canvas::core::{
    Candle, LinearScale, PlotArea, PriceScale, PriceScaleTuning, SlotScale, Viewport,
    project_candles, project_series, project_volume_bars,
};
use candle_canvas::render::NullRenderer;

fn plot() -> PlotArea {
    PlotArea::new(0.0, 0.0, 100.0, 200.0).expect("plot")
}

#[test]
fn autoscale_pads_candle_extremes() {
    let candles = [Candle::new(1_000, 10.0, 12.0, 9.0, 11.0, 5.0).expect("candle")];
    let scale = PriceScale::from_data(&candles, &[], plot(), PriceScaleTuning::default())
        .expect("scale");

    let (min, max) = scale.domain();
    assert_relative_eq!(min, 8.7, epsilon = 1e-9);
    assert_relative_eq!(max, 12.3, epsilon = 1e-9);
    assert_relative_eq!(scale.price_to_pixel(min).expect("px"), 200.0, epsilon = 1e-9);
    assert_relative_eq!(scale.price_to_pixel(max).expect("px"), 0.0, epsilon = 1e-9);
}

#[test]
fn series_values_extend_the_domain() {
    let candles = [Candle::new(1_000, 10.0, 12.0, 9.0, 11.0, 5.0).expect("candle")];
    let tuning = PriceScaleTuning {
        top_padding_ratio: 0.0,
        bottom_padding_ratio: 0.0,
        ..PriceScaleTuning::default()
    };
    let scale = PriceScale::from_data(&candles, &[4.0, 20.0], plot(), tuning).expect("scale");

    assert_eq!(scale.domain(), (4.0, 20.0));
}

#[test]
fn flat_data_is_widened_around_its_value() {
    let scale = PriceScale::from_data(&[], &[5.0, 5.0], plot(), PriceScaleTuning::default())
        .expect("scale");

    let (min, max) = scale.domain();
    assert_relative_eq!(min, 4.85, epsilon = 1e-9);
    assert_relative_eq!(max, 5.15, epsilon = 1e-9);
}

#[test]
fn empty_data_falls_back_to_unit_domain() {
    let scale =
        PriceScale::from_data(&[], &[], plot(), PriceScaleTuning::default()).expect("scale");
    assert_eq!(scale.domain(), (0.0, 1.0));
}

#[test]
fn pixel_round_trip_is_stable() {
    let scale = PriceScale::new(100.0, 250.0, plot()).expect("scale");
    let pixel = scale.price_to_pixel(173.25).expect("pixel");
    assert_relative_eq!(scale.pixel_to_price(pixel).expect("price"), 173.25, epsilon = 1e-9);
}

#[test]
fn degenerate_linear_scale_is_rejected() {
    assert!(LinearScale::new(1.0, 1.0, 0.0, 10.0).is_err());
    assert!(LinearScale::new(0.0, 1.0, 5.0, 5.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0, 0.0, 10.0).is_err());
}

#[test]
fn slot_scale_centres_candles_in_slots() {
    let plot = PlotArea::new(0.0, 0.0, 320.0, 100.0).expect("plot");
    let slots = SlotScale::new(2, 32, plot).expect("slots");

    assert_eq!(slots.slots(), 32);
    assert_relative_eq!(slots.spacing(), 10.0, epsilon = 1e-9);
    assert_relative_eq!(slots.slot_center(0).expect("center"), 5.0, epsilon = 1e-9);
    assert_eq!(slots.slot_at(14.9).expect("slot"), Some(1));
    assert_eq!(slots.slot_at(-1.0).expect("slot"), None);
    assert_eq!(slots.slot_at(320.0).expect("slot"), None);
}

#[test]
fn candle_bodies_and_wicks_follow_prices() {
    let plot = PlotArea::new(0.0, 0.0, 320.0, 200.0).expect("plot");
    let slots = SlotScale::new(1, 32, plot).expect("slots");
    let price = PriceScale::new(0.0, 20.0, plot).expect("price");
    let candle = Candle::new(1_000, 10.0, 15.0, 5.0, 12.0, 1.0).expect("candle");

    let geometry = project_candles(&[candle], slots, price, 0.5).expect("projection")[0];
    assert_relative_eq!(geometry.center_x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(geometry.body_right - geometry.body_left, 5.0, epsilon = 1e-9);
    assert_relative_eq!(geometry.body_top, 80.0, epsilon = 1e-9);
    assert_relative_eq!(geometry.body_bottom, 100.0, epsilon = 1e-9);
    assert_relative_eq!(geometry.wick_top, 50.0, epsilon = 1e-9);
    assert_relative_eq!(geometry.wick_bottom, 150.0, epsilon = 1e-9);
    assert!(geometry.is_bullish);
}

#[test]
fn series_spreads_across_plot_width() {
    let plot = PlotArea::new(10.0, 0.0, 100.0, 100.0).expect("plot");
    let price = PriceScale::new(0.0, 10.0, plot).expect("price");

    let segments = project_series(&[0.0, 5.0, 10.0], plot, price).expect("segments");
    assert_eq!(segments.len(), 2);
    assert_relative_eq!(segments[0].x1, 10.0, epsilon = 1e-9);
    assert_relative_eq!(segments[1].x2, 110.0, epsilon = 1e-9);
    assert_relative_eq!(segments[1].y2, 0.0, epsilon = 1e-9);
    assert!(project_series(&[3.0], plot, price).expect("single").is_empty());
}

#[test]
fn volume_bars_scale_to_largest_volume() {
    let plot = PlotArea::new(0.0, 100.0, 320.0, 50.0).expect("band");
    let slots = SlotScale::new(2, 32, plot).expect("slots");
    let candles = [
        Candle::new(1, 10.0, 11.0, 9.0, 10.5, 400.0).expect("candle"),
        Candle::new(2, 10.5, 11.0, 9.0, 9.5, 100.0).expect("candle"),
    ];

    let bars = project_volume_bars(&candles, slots, plot, 0.8).expect("bars");
    assert_relative_eq!(bars[0].y_top, 100.0, epsilon = 1e-9);
    assert_relative_eq!(bars[1].y_top, 137.5, epsilon = 1e-9);
    assert_relative_eq!(bars[1].y_bottom, 150.0, epsilon = 1e-9);
    assert!(!bars[1].is_bullish);
}

#[test]
fn title_band_only_exists_with_a_title() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        Viewport::new(400, 300),
        ChartEngineConfig::default(),
    )
    .expect("engine");

    let bare = engine.layout().expect("layout");
    assert_eq!(bare.title_band_px, 0.0);
    assert_relative_eq!(bare.price_plot.top, 8.0, epsilon = 1e-9);

    engine.set_title("Title").expect("title");
    let titled = engine.layout().expect("layout");
    assert_relative_eq!(titled.title_band_px, 24.0, epsilon = 1e-9);
    assert_relative_eq!(titled.price_plot.top, 32.0, epsilon = 1e-9);
    assert_relative_eq!(
        titled.volume_band.bottom(),
        300.0 - 8.0,
        epsilon = 1e-9
    );
}

#[test]
fn tiny_viewports_still_lay_out() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        Viewport::new(1, 1),
        ChartEngineConfig::default(),
    )
    .expect("engine");
    engine.set_title("T").expect("title");

    let layout = engine.layout().expect("layout");
    assert!(layout.price_plot.height > 0.0);
    engine.render().expect("render");
}
