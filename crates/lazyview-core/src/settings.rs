//! Loader configuration.
//!
//! [`LazyLoadSettings`] is a plain struct with defaults and builder methods.
//! Hosts that receive options as text (HTML data attributes, a JS options
//! object) feed them through [`LazyLoadSettings::apply_option`], which also
//! understands the older spellings `failurelimit` and `effectspeed`.

use smallvec::SmallVec;

use crate::error::SettingsError;
use crate::host::Container;

/// 1x1 grey GIF used as `src` for images that have none yet.
pub const DEFAULT_PLACEHOLDER: &str =
    "data:image/gif;base64,R0lGODdhAQABAPAAAMPDwwAAACwAAAAAAQABAAACAkQBADs=";

/// Default name of the data attribute holding the real URL (`data-original`).
pub const DEFAULT_DATA_ATTRIBUTE: &str = "original";

/// Default name of the data attribute holding the srcset (`data-srcset`).
pub const DEFAULT_DATA_SRCSET: &str = "srcset";

/// What drives appearance checks.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Trigger {
    /// Container scroll runs an update pass (plus resize and startup).
    #[default]
    Scroll,
    /// Each element appears when it receives the named event; scrolling
    /// alone never loads anything.
    Custom(String),
}

impl Trigger {
    /// Parses an event name. Anything starting with `scroll` (including
    /// namespaced names like `scroll.lazyload`) means [`Trigger::Scroll`].
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("scroll") {
            Trigger::Scroll
        } else {
            Trigger::Custom(name.to_string())
        }
    }

    pub fn is_scroll(&self) -> bool {
        matches!(self, Trigger::Scroll)
    }
}

/// How a swapped element is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    Show,
    FadeIn,
    SlideDown,
}

impl Effect {
    pub fn from_name(name: &str) -> Result<Self, SettingsError> {
        match name {
            "show" => Ok(Effect::Show),
            "fadeIn" | "fade_in" | "fade-in" => Ok(Effect::FadeIn),
            "slideDown" | "slide_down" | "slide-down" => Ok(Effect::SlideDown),
            other => Err(SettingsError::InvalidEffect(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Effect::Show => "show",
            Effect::FadeIn => "fadeIn",
            Effect::SlideDown => "slideDown",
        }
    }

    /// Inline styles that reveal a hidden element with this effect.
    ///
    /// Animated effects reference the keyframes in [`EFFECT_KEYFRAMES`],
    /// which the host installs once per document.
    pub fn reveal_styles(self, speed: Option<u32>) -> SmallVec<[(&'static str, String); 2]> {
        let speed = speed.unwrap_or(DEFAULT_EFFECT_SPEED_MS);
        let mut styles = SmallVec::new();
        styles.push(("display", String::new()));
        match self {
            Effect::Show => {}
            Effect::FadeIn => {
                styles.push(("animation", format!("lazyview-fade-in {speed}ms ease-out")));
            }
            Effect::SlideDown => {
                styles.push(("animation", format!("lazyview-slide-down {speed}ms ease-out")));
            }
        }
        styles
    }
}

/// Effect duration when none is configured, in milliseconds.
pub const DEFAULT_EFFECT_SPEED_MS: u32 = 400;

/// Keyframes used by [`Effect::reveal_styles`].
pub const EFFECT_KEYFRAMES: &str = "\
@keyframes lazyview-fade-in { from { opacity: 0; } to { opacity: 1; } }
@keyframes lazyview-slide-down { from { clip-path: inset(0 0 100% 0); } to { clip-path: inset(0); } }
";

/// Configuration for a [`LazyLoader`](crate::LazyLoader).
#[derive(Clone, Debug)]
pub struct LazyLoadSettings<E> {
    /// Margin around the visible area, in pixels. Elements within this
    /// distance of a fold count as visible.
    pub threshold: f32,

    /// Consecutive below/right candidates tolerated before a pass stops.
    ///
    /// The early stop assumes candidates were registered in document order,
    /// so that once a few are past the fold the rest are too. If elements are
    /// registered out of visual order, raise this or some of them will only
    /// load on a later pass.
    pub failure_limit: usize,

    pub trigger: Trigger,

    pub effect: Effect,

    /// Effect duration in milliseconds. `None` uses the host's default.
    pub effect_speed: Option<u32>,

    pub container: Container<E>,

    /// Suffix of the data attribute carrying the real URL.
    pub data_attribute: String,

    /// Suffix of the data attribute carrying the srcset.
    pub data_srcset: String,

    /// Skip candidates the host reports as not rendered.
    pub skip_invisible: bool,

    pub placeholder: String,
}

impl<E> Default for LazyLoadSettings<E> {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            failure_limit: 0,
            trigger: Trigger::Scroll,
            effect: Effect::Show,
            effect_speed: None,
            container: Container::Viewport,
            data_attribute: DEFAULT_DATA_ATTRIBUTE.to_string(),
            data_srcset: DEFAULT_DATA_SRCSET.to_string(),
            skip_invisible: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl<E> LazyLoadSettings<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    pub fn with_failure_limit(mut self, failure_limit: usize) -> Self {
        self.failure_limit = failure_limit;
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_effect(mut self, effect: Effect, speed: Option<u32>) -> Self {
        self.effect = effect;
        self.effect_speed = speed;
        self
    }

    pub fn with_container(mut self, container: Container<E>) -> Self {
        self.container = container;
        self
    }

    pub fn with_skip_invisible(mut self, skip_invisible: bool) -> Self {
        self.skip_invisible = skip_invisible;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_data_attributes(
        mut self,
        original: impl Into<String>,
        srcset: impl Into<String>,
    ) -> Self {
        self.data_attribute = original.into();
        self.data_srcset = srcset.into();
        self
    }

    /// Full attribute name holding the real URL, e.g. `data-original`.
    pub fn original_attribute_name(&self) -> String {
        format!("data-{}", self.data_attribute)
    }

    /// Full attribute name holding the srcset, e.g. `data-srcset`.
    pub fn srcset_attribute_name(&self) -> String {
        format!("data-{}", self.data_srcset)
    }

    /// Applies one string-keyed option.
    ///
    /// `failurelimit` and `effectspeed` are accepted as aliases of
    /// `failure_limit` and `effect_speed`. `container` is rejected since a
    /// handle cannot be spelled as text; use [`with_container`](Self::with_container).
    pub fn apply_option(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "threshold" => {
                let threshold = parse_number(key, value)?;
                if threshold < 0.0 {
                    return Err(SettingsError::Negative {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                self.threshold = threshold;
            }
            "failure_limit" | "failurelimit" => {
                let limit = parse_count(key, value)?;
                self.failure_limit =
                    usize::try_from(limit).map_err(|_| invalid_number(key, value))?;
            }
            "event" => self.trigger = Trigger::from_name(value),
            "effect" => self.effect = Effect::from_name(value)?,
            "effect_speed" | "effectspeed" => {
                let speed = parse_count(key, value)?;
                let speed = u32::try_from(speed).map_err(|_| invalid_number(key, value))?;
                self.effect_speed = Some(speed);
            }
            "data_attribute" => self.data_attribute = value.to_string(),
            "data_srcset" => self.data_srcset = value.to_string(),
            "skip_invisible" => self.skip_invisible = parse_flag(key, value)?,
            "placeholder" => self.placeholder = value.to_string(),
            "container" | "appear" | "load" => {
                return Err(SettingsError::NotTextual {
                    key: key.to_string(),
                })
            }
            other => {
                log::warn!("ignoring unknown lazy load option `{other}`");
                return Err(SettingsError::UnknownKey(other.to_string()));
            }
        }
        Ok(())
    }

    /// Applies every pair in order, stopping at the first error.
    pub fn apply_options<'a, I>(&mut self, options: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in options {
            self.apply_option(key, value)?;
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<f32, SettingsError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| invalid_number(key, value))
}

fn invalid_number(key: &str, value: &str) -> SettingsError {
    SettingsError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Whole, non-negative count. Parsed as an integer so large values are
/// not rounded through `f32`.
fn parse_count(key: &str, value: &str) -> Result<u64, SettingsError> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<u64>() {
        return Ok(count);
    }
    let number = parse_number(key, value)?;
    if number < 0.0 {
        return Err(SettingsError::Negative {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Err(invalid_number(key, value))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Settings = LazyLoadSettings<()>;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.threshold, 0.0);
        assert_eq!(settings.failure_limit, 0);
        assert_eq!(settings.trigger, Trigger::Scroll);
        assert_eq!(settings.effect, Effect::Show);
        assert!(settings.container.is_viewport());
        assert_eq!(settings.original_attribute_name(), "data-original");
        assert_eq!(settings.srcset_attribute_name(), "data-srcset");
        assert!(!settings.skip_invisible);
        assert_eq!(settings.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn legacy_aliases_are_accepted() {
        let mut settings = Settings::default();
        settings
            .apply_options([("failurelimit", "10"), ("effectspeed", "250")])
            .unwrap();
        assert_eq!(settings.failure_limit, 10);
        assert_eq!(settings.effect_speed, Some(250));
    }

    #[test]
    fn namespaced_scroll_event_is_scroll() {
        let mut settings = Settings::default();
        settings.apply_option("event", "scroll.lazyload").unwrap();
        assert!(settings.trigger.is_scroll());

        settings.apply_option("event", "sporty").unwrap();
        assert_eq!(settings.trigger, Trigger::Custom("sporty".into()));
    }

    #[test]
    fn rejects_bad_values() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.apply_option("threshold", "-5"),
            Err(SettingsError::Negative {
                key: "threshold".into(),
                value: "-5".into()
            })
        );
        assert!(matches!(
            settings.apply_option("threshold", "far"),
            Err(SettingsError::InvalidNumber { .. })
        ));
        assert_eq!(
            settings.apply_option("effect", "explode"),
            Err(SettingsError::InvalidEffect("explode".into()))
        );
        assert!(matches!(
            settings.apply_option("container", "#main"),
            Err(SettingsError::NotTextual { .. })
        ));
        assert_eq!(
            settings.apply_option("colour", "red"),
            Err(SettingsError::UnknownKey("colour".into()))
        );
        assert_eq!(settings.threshold, 0.0);
    }

    #[test]
    fn counts_must_be_whole_and_in_range() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.apply_option("effect_speed", "5000000000"),
            Err(SettingsError::InvalidNumber {
                key: "effect_speed".into(),
                value: "5000000000".into()
            })
        );
        assert_eq!(settings.effect_speed, None);
        assert!(matches!(
            settings.apply_option("failure_limit", "2.9"),
            Err(SettingsError::InvalidNumber { .. })
        ));
        assert!(matches!(
            settings.apply_option("failure_limit", "-1"),
            Err(SettingsError::Negative { .. })
        ));
        assert_eq!(settings.failure_limit, 0);

        settings.apply_option("effect_speed", "4294967295").unwrap();
        assert_eq!(settings.effect_speed, Some(u32::MAX));
        settings.apply_option("failure_limit", " 3 ").unwrap();
        assert_eq!(settings.failure_limit, 3);
    }

    #[test]
    fn reveal_styles_per_effect() {
        assert_eq!(
            Effect::Show.reveal_styles(Some(100)).as_slice(),
            &[("display", String::new())]
        );
        let fade = Effect::FadeIn.reveal_styles(None);
        assert_eq!(fade[1], ("animation", "lazyview-fade-in 400ms ease-out".to_string()));
        assert!(EFFECT_KEYFRAMES.contains("lazyview-fade-in"));
        assert!(EFFECT_KEYFRAMES.contains("lazyview-slide-down"));
    }

    #[test]
    fn builder_clamps_negative_threshold() {
        let settings = Settings::new().with_threshold(-10.0);
        assert_eq!(settings.threshold, 0.0);
    }
}
