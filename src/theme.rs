use crate::types::{ThemeConfig, ThemeMode};

/// Fallback chain appended after the configured font family.
pub const FONT_FALLBACK: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen', 'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue', sans-serif";

pub const SHADES: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

type Ramp = [&'static str; 10];

const BLUE: Ramp = [
    "239 246 255",
    "219 234 254",
    "191 219 254",
    "147 197 253",
    "96 165 250",
    "59 130 246",
    "37 99 235",
    "29 78 216",
    "30 64 175",
    "30 58 138",
];

const PURPLE: Ramp = [
    "250 245 255",
    "243 232 255",
    "233 213 255",
    "196 181 253",
    "167 139 250",
    "139 92 246",
    "124 58 237",
    "109 40 217",
    "91 33 182",
    "76 29 149",
];

const GREEN: Ramp = [
    "240 253 244",
    "220 252 231",
    "187 247 208",
    "134 239 172",
    "74 222 128",
    "34 197 94",
    "22 163 74",
    "21 128 61",
    "22 101 52",
    "20 83 45",
];

const RED: Ramp = [
    "254 242 242",
    "254 226 226",
    "254 202 202",
    "252 165 165",
    "248 113 113",
    "239 68 68",
    "220 38 38",
    "185 28 28",
    "153 27 27",
    "127 29 29",
];

/// Shade ramp for a named color. Names are matched exactly; anything else,
/// including a differently cased name, uses the blue ramp.
pub fn palette(name: &str) -> &'static Ramp {
    match name {
        "purple" => &PURPLE,
        "green" => &GREEN,
        "red" => &RED,
        _ => &BLUE,
    }
}

/// Style properties derived from the current preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleVars {
    pub mode: ThemeMode,
    pub properties: Vec<(String, String)>,
    pub body_font: String,
}

impl StyleVars {
    pub fn derive(is_dark: bool, config: &ThemeConfig) -> Self {
        let mut properties: Vec<(String, String)> = SHADES
            .iter()
            .zip(palette(&config.primary_color).iter())
            .map(|(shade, value)| (format!("--primary-{shade}"), (*value).to_string()))
            .collect();
        properties.push(("--font-family".to_string(), config.font_family.clone()));

        Self {
            mode: ThemeMode::from_dark(is_dark),
            properties,
            body_font: format!("{}, {}", config.font_family, FONT_FALLBACK),
        }
    }

    /// Class toggled on the document root.
    pub fn root_class(&self) -> Option<&'static str> {
        match self.mode {
            ThemeMode::Dark => Some("dark"),
            ThemeMode::Light => None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            css.push_str(&format!("    {name}: {value};\n"));
        }
        css.push_str("}\n");
        css.push_str(&format!("body {{ font-family: {}; }}\n", self.body_font));
        css.push_str(mode_css(self.mode));
        css
    }
}

fn mode_css(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Dark => DARK_THEME,
        ThemeMode::Light => LIGHT_THEME,
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0f172a;
    --color-bg-secondary: #1e293b;
    --color-text-primary: #f1f5f9;
    --color-text-muted: #94a3b8;
    --color-border: #334155;
    --color-card-bg: rgba(30, 41, 59, 0.6);
    --color-banner-error: #7f1d1d;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.post-card { background: var(--color-card-bg); border-color: var(--color-border); }
.tag-chip.active { background: rgb(var(--primary-500)); color: #ffffff; }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f8fafc;
    --color-text-primary: #0f172a;
    --color-text-muted: #475569;
    --color-border: #e2e8f0;
    --color-card-bg: rgba(255, 255, 255, 0.8);
    --color-banner-error: #fee2e2;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.post-card { background: var(--color-card-bg); border-color: var(--color-border); }
.tag-chip.active { background: rgb(var(--primary-600)); color: #ffffff; }
"#;
