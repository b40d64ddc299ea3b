use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses the persisted literal. Anything but `"dark"`/`"light"` is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

/// Cosmetic configuration persisted under the `themeConfig` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub font_family: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary_color: "blue".to_string(),
            secondary_color: "gray".to_string(),
            accent_color: "red".to_string(),
            font_family: "Inter".to_string(),
        }
    }
}

/// Partial update for [`ThemeConfig`]. Absent fields keep their prior value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfigPatch {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_family: Option<String>,
}

impl ThemeConfigPatch {
    pub fn primary_color(color: impl Into<String>) -> Self {
        Self {
            primary_color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn font_family(font: impl Into<String>) -> Self {
        Self {
            font_family: Some(font.into()),
            ..Self::default()
        }
    }

    pub fn apply(self, base: &ThemeConfig) -> ThemeConfig {
        ThemeConfig {
            primary_color: self
                .primary_color
                .unwrap_or_else(|| base.primary_color.clone()),
            secondary_color: self
                .secondary_color
                .unwrap_or_else(|| base.secondary_color.clone()),
            accent_color: self
                .accent_color
                .unwrap_or_else(|| base.accent_color.clone()),
            font_family: self.font_family.unwrap_or_else(|| base.font_family.clone()),
        }
    }
}

impl From<ThemeConfig> for ThemeConfigPatch {
    fn from(config: ThemeConfig) -> Self {
        Self {
            primary_color: Some(config.primary_color),
            secondary_color: Some(config.secondary_color),
            accent_color: Some(config.accent_color),
            font_family: Some(config.font_family),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
    pub username: String,
}

/// Normalized article shape handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub tags: Vec<String>,
    pub published_at: String,
    pub read_time: u32,
    pub author: Author,
    pub url: String,
    pub reactions: u64,
}
