//! Wire models of the emote aggregation API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Service an emote is sourced from.
///
/// Encoded on the wire as a number. Anything outside the known range decodes
/// to [`Provider::Unknown`]: integers keep their raw value so they
/// re-serialise as-is, any other JSON value (fractions, strings, `null`,
/// integers beyond `i64`) is kept as `None` and re-serialises as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Twitch,
    SevenTv,
    Bttv,
    Ffz,
    Unknown(Option<i64>),
}

/// (display name, badge colour) per known provider, indexed by wire value.
const PROVIDER_TABLE: [(&str, &str); 4] = [
    ("Twitch", "purple"),
    ("7TV", "blue"),
    ("BTTV", "red"),
    ("FFZ", "green"),
];

const UNKNOWN_PROVIDER: (&str, &str) = ("Unknown", "gray");

/// Largest integer an f64 represents exactly (2^53).
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

impl Provider {
    /// Wire value of this provider, `None` for non-integer unknown values.
    pub fn code(self) -> Option<i64> {
        match self {
            Self::Twitch => Some(0),
            Self::SevenTv => Some(1),
            Self::Bttv => Some(2),
            Self::Ffz => Some(3),
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    fn entry(self) -> (&'static str, &'static str) {
        match self {
            Self::Twitch => PROVIDER_TABLE[0],
            Self::SevenTv => PROVIDER_TABLE[1],
            Self::Bttv => PROVIDER_TABLE[2],
            Self::Ffz => PROVIDER_TABLE[3],
            Self::Unknown(_) => UNKNOWN_PROVIDER,
        }
    }

    /// Display name shown on the provider badge.
    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// Badge colour key understood by the frontend stylesheet.
    pub fn badge(self) -> &'static str {
        self.entry().1
    }

    /// Map any JSON value onto a provider. Whole floats count as integers.
    fn from_json(value: &serde_json::Value) -> Self {
        let raw = value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_F64)
                .map(|f| f as i64)
        });
        match raw {
            Some(n) => Self::from(n),
            None => Self::Unknown(None),
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::Unknown(None)
    }
}

impl From<i64> for Provider {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Self::Twitch,
            1 => Self::SevenTv,
            2 => Self::Bttv,
            3 => Self::Ffz,
            other => Self::Unknown(Some(other)),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.code().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// One rendition of an emote image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// Scale label such as `"1x"` or `"4x"`.
    #[serde(rename = "size")]
    pub size_label: String,
    pub url: String,
}

/// A single emote as returned by the aggregation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    pub code: String,
    #[serde(default)]
    pub provider: Provider,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub zero_width: bool,
    #[serde(rename = "urls", default)]
    pub image_variants: Vec<ImageVariant>,
}

impl Emote {
    /// URL of the highest-scale image, if the emote has any.
    pub fn best_image_url(&self) -> Option<&str> {
        crate::image::best_variant(&self.image_variants).map(|v| v.url.as_str())
    }
}
