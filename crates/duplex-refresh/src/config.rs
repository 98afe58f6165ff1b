//! Tunable distances, colors and presets, and their resolution into pixels.

use crate::edge::{Edge, EdgeMap};
use duplex_foundation::gesture_constants::scaled_touch_slop;
use duplex_ui_graphics::{Color, Dp};
use smallvec::SmallVec;

/// Default distance from the rest offset to the hover offset, which is also
/// the default trigger distance.
pub const DEFAULT_CIRCLE_TARGET: Dp = Dp(64.0);
/// Background of the indicator disc.
pub const CIRCLE_BG_LIGHT: u32 = 0xFFFA_FAFA;

/// Indicator diameter presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndicatorSize {
    #[default]
    Default,
    Large,
}

impl IndicatorSize {
    /// Raw style value of [`IndicatorSize::Large`].
    pub const LARGE: i32 = 0;
    /// Raw style value of [`IndicatorSize::Default`].
    pub const DEFAULT: i32 = 1;

    /// Maps a raw style value; anything but the two presets is `None`.
    pub fn from_style(style: i32) -> Option<Self> {
        match style {
            Self::LARGE => Some(IndicatorSize::Large),
            Self::DEFAULT => Some(IndicatorSize::Default),
            _ => None,
        }
    }

    pub fn diameter(self) -> Dp {
        match self {
            IndicatorSize::Default => Dp(40.0),
            IndicatorSize::Large => Dp(56.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveDensity(f32),
    NonPositiveTrigger(f32),
    NonPositiveSlingshot(f32),
    NonPositiveTouchSlop(f32),
    NonFiniteOffset { edge: Edge, value: f32 },
    EmptyColorScheme,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveDensity(v) => write!(f, "density must be positive, got {v}"),
            ConfigError::NonPositiveTrigger(v) => {
                write!(f, "trigger distance must be positive, got {v}")
            }
            ConfigError::NonPositiveSlingshot(v) => {
                write!(f, "slingshot distance must be positive, got {v}")
            }
            ConfigError::NonPositiveTouchSlop(v) => {
                write!(f, "touch slop must be positive, got {v}")
            }
            ConfigError::NonFiniteOffset { edge, value } => {
                write!(f, "{edge} indicator offset must be finite, got {value}")
            }
            ConfigError::EmptyColorScheme => f.write_str("color scheme needs at least one color"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Container configuration. Distances are in pixels unless typed as [`Dp`].
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    pub density: f32,
    pub indicator_size: IndicatorSize,
    pub background_color: Color,
    /// First color doubles as the arc color while dragging.
    pub color_scheme: SmallVec<[Color; 4]>,
    /// Pull distance (after drag rate) beyond which a release refreshes.
    /// Defaults to [`DEFAULT_CIRCLE_TARGET`].
    pub trigger_distance: Option<f32>,
    /// Absolute rest offset per edge. Defaults: just above the top for the
    /// top indicator, the container height for the bottom one.
    pub rest_offset: EdgeMap<Option<f32>>,
    /// Distance from rest to hover offset per edge. Defaults to
    /// [`DEFAULT_CIRCLE_TARGET`].
    pub hover_travel: EdgeMap<Option<f32>>,
    /// Extra pull allowed past the hover offset. Defaults to the edge's
    /// hover travel.
    pub slingshot_distance: Option<f32>,
    /// Grow the indicator with the pull and shrink it when dismissed.
    pub scale_with_drag: bool,
    pub enabled: bool,
    /// Defaults to the platform slop scaled by `density`.
    pub touch_slop: Option<f32>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        let mut color_scheme = SmallVec::new();
        color_scheme.push(Color::BLACK);
        Self {
            density: 1.0,
            indicator_size: IndicatorSize::Default,
            background_color: Color::from_argb(CIRCLE_BG_LIGHT),
            color_scheme,
            trigger_distance: None,
            rest_offset: EdgeMap::default(),
            hover_travel: EdgeMap::default(),
            slingshot_distance: None,
            scale_with_drag: false,
            enabled: true,
            touch_slop: None,
        }
    }
}

impl RefreshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_indicator_size(mut self, size: IndicatorSize) -> Self {
        self.indicator_size = size;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_color_scheme(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.color_scheme = colors.into_iter().collect();
        self
    }

    pub fn with_trigger_distance(mut self, px: f32) -> Self {
        self.trigger_distance = Some(px);
        self
    }

    /// Places `edge`'s indicator at `rest` when hidden and `hover` while
    /// refreshing, both absolute. `hover` must lie on the content side of
    /// `rest`, otherwise the offsets are ignored.
    pub fn with_offsets(mut self, edge: Edge, rest: f32, hover: f32) -> Self {
        match hover_travel_between(edge, rest, hover) {
            Some(travel) => {
                self.rest_offset[edge] = Some(rest);
                self.hover_travel[edge] = Some(travel);
            }
            None => log::warn!("ignoring {edge} offsets {rest}..{hover}: hover lies behind rest"),
        }
        self
    }

    pub fn with_hover_travel(mut self, edge: Edge, px: f32) -> Self {
        self.hover_travel[edge] = Some(px);
        self
    }

    pub fn with_slingshot_distance(mut self, px: f32) -> Self {
        self.slingshot_distance = Some(px);
        self
    }

    pub fn with_scale_with_drag(mut self, scale: bool) -> Self {
        self.scale_with_drag = scale;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_touch_slop(mut self, px: f32) -> Self {
        self.touch_slop = Some(px);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.density) {
            return Err(ConfigError::NonPositiveDensity(self.density));
        }
        if let Some(trigger) = self.trigger_distance {
            if !is_positive(trigger) {
                return Err(ConfigError::NonPositiveTrigger(trigger));
            }
        }
        if let Some(slingshot) = self.slingshot_distance {
            if !is_positive(slingshot) {
                return Err(ConfigError::NonPositiveSlingshot(slingshot));
            }
        }
        if let Some(slop) = self.touch_slop {
            if !is_positive(slop) {
                return Err(ConfigError::NonPositiveTouchSlop(slop));
            }
        }
        for edge in Edge::ALL {
            for value in [self.rest_offset[edge], self.hover_travel[edge]]
                .into_iter()
                .flatten()
            {
                if !value.is_finite() {
                    return Err(ConfigError::NonFiniteOffset { edge, value });
                }
            }
        }
        if self.color_scheme.is_empty() {
            return Err(ConfigError::EmptyColorScheme);
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// [`RefreshConfig`] resolved into pixels for one container height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub trigger: f32,
    pub rest: EdgeMap<f32>,
    pub hover: EdgeMap<f32>,
    pub slingshot_override: Option<f32>,
    pub diameter: f32,
    pub touch_slop: f32,
    pub scale_with_drag: bool,
}

impl Thresholds {
    pub fn resolve(config: &RefreshConfig, container_height: f32) -> Self {
        let density = config.density;
        let diameter = config.indicator_size.diameter().to_px(density);
        let default_target = DEFAULT_CIRCLE_TARGET.to_px(density);
        let default_rest = EdgeMap::new(-diameter, container_height);
        let rest = EdgeMap::from_fn(|edge| config.rest_offset[edge].unwrap_or(default_rest[edge]));
        let hover = EdgeMap::from_fn(|edge| {
            rest[edge] + edge.sign() * config.hover_travel[edge].unwrap_or(default_target)
        });
        Self {
            trigger: config.trigger_distance.unwrap_or(default_target),
            rest,
            hover,
            slingshot_override: config.slingshot_distance,
            diameter,
            touch_slop: config
                .touch_slop
                .unwrap_or_else(|| scaled_touch_slop(density)),
            scale_with_drag: config.scale_with_drag,
        }
    }

    pub fn travel(&self, edge: Edge) -> f32 {
        (self.hover[edge] - self.rest[edge]).abs()
    }

    /// How far past the pull the indicator may travel.
    pub fn slingshot(&self, edge: Edge) -> f32 {
        self.slingshot_override.unwrap_or_else(|| self.travel(edge))
    }
}

/// Travel from `rest` to `hover` toward the content, `None` when `hover` sits
/// on the wrong side of `rest` for `edge`.
pub(crate) fn hover_travel_between(edge: Edge, rest: f32, hover: f32) -> Option<f32> {
    let travel = (hover - rest) * edge.sign();
    if travel < 0.0 {
        None
    } else {
        Some(travel)
    }
}
