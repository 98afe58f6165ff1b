use super::*;
use duplex_ui_graphics::Color;
use crate::config::hover_travel_between;

#[test]
fn default_thresholds_match_platform_metrics() {
    let thresholds = Thresholds::resolve(&RefreshConfig::default(), 800.0);

    assert_eq!(thresholds.diameter, 40.0);
    assert_eq!(thresholds.trigger, 64.0);
    assert_eq!(thresholds.rest, EdgeMap::new(-40.0, 800.0));
    assert_eq!(thresholds.hover, EdgeMap::new(24.0, 736.0));
    assert_eq!(thresholds.slingshot(Edge::Top), 64.0);
    assert_eq!(thresholds.slingshot(Edge::Bottom), 64.0);
    assert_eq!(thresholds.touch_slop, 8.0);
}

#[test]
fn density_scales_every_default() {
    let config = RefreshConfig::new()
        .with_density(2.0)
        .with_indicator_size(IndicatorSize::Large);
    let thresholds = Thresholds::resolve(&config, 1000.0);

    assert_eq!(thresholds.diameter, 112.0);
    assert_eq!(thresholds.trigger, 128.0);
    assert_eq!(thresholds.rest.top, -112.0);
    assert_eq!(thresholds.hover.top, 16.0);
    assert_eq!(thresholds.touch_slop, 16.0);
}

#[test]
fn custom_offsets_are_independent_per_edge() {
    let config = RefreshConfig::new()
        .with_offsets(Edge::Top, 10.0, 90.0)
        .with_hover_travel(Edge::Bottom, 100.0)
        .with_slingshot_distance(30.0);
    let thresholds = Thresholds::resolve(&config, 600.0);

    assert_eq!(thresholds.rest.top, 10.0);
    assert_eq!(thresholds.hover.top, 90.0);
    assert_eq!(thresholds.rest.bottom, 600.0);
    assert_eq!(thresholds.hover.bottom, 500.0);
    assert_eq!(thresholds.travel(Edge::Top), 80.0);
    assert_eq!(thresholds.slingshot(Edge::Bottom), 30.0);
}

#[test]
fn offsets_with_hover_behind_rest_are_ignored() {
    let config = RefreshConfig::new()
        .with_offsets(Edge::Bottom, 500.0, 560.0)
        .with_offsets(Edge::Top, 20.0, -40.0);
    let thresholds = Thresholds::resolve(&config, 600.0);

    assert_eq!(thresholds.rest, EdgeMap::new(-40.0, 600.0));
    assert_eq!(thresholds.hover, EdgeMap::new(24.0, 536.0));
    assert_eq!(hover_travel_between(Edge::Bottom, 560.0, 500.0), Some(60.0));
    assert_eq!(hover_travel_between(Edge::Bottom, 500.0, 560.0), None);
}

#[test]
fn validate_rejects_bad_values() {
    assert_eq!(RefreshConfig::default().validate(), Ok(()));
    assert_eq!(
        RefreshConfig::new().with_trigger_distance(0.0).validate(),
        Err(ConfigError::NonPositiveTrigger(0.0))
    );
    assert_eq!(
        RefreshConfig::new().with_slingshot_distance(-1.0).validate(),
        Err(ConfigError::NonPositiveSlingshot(-1.0))
    );
    assert!(matches!(
        RefreshConfig::new().with_density(f32::NAN).validate(),
        Err(ConfigError::NonPositiveDensity(_))
    ));
    assert_eq!(
        RefreshConfig::new()
            .with_color_scheme(Vec::<Color>::new())
            .validate(),
        Err(ConfigError::EmptyColorScheme)
    );
    assert!(matches!(
        RefreshConfig::new()
            .with_offsets(Edge::Bottom, f32::INFINITY, 0.0)
            .validate(),
        Err(ConfigError::NonFiniteOffset {
            edge: Edge::Bottom,
            ..
        })
    ));
}

#[test]
fn config_error_messages() {
    assert_eq!(
        ConfigError::NonPositiveTrigger(-2.0).to_string(),
        "trigger distance must be positive, got -2"
    );
    assert_eq!(
        ConfigError::NonFiniteOffset {
            edge: Edge::Top,
            value: f32::INFINITY
        }
        .to_string(),
        "top indicator offset must be finite, got inf"
    );
}

#[test]
fn size_styles() {
    assert_eq!(IndicatorSize::from_style(0), Some(IndicatorSize::Large));
    assert_eq!(IndicatorSize::from_style(1), Some(IndicatorSize::Default));
    assert_eq!(IndicatorSize::from_style(7), None);
    assert_eq!(IndicatorSize::Large.diameter().0, 56.0);
}

#[test]
fn default_background_is_light_disc() {
    let config = RefreshConfig::default();
    assert_eq!(config.background_color, Color::from_argb(0xFFFA_FAFA));
    assert_eq!(config.color_scheme.as_slice(), &[Color::BLACK]);
}
