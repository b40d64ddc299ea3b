use crate::app::AppServices;
use crate::prefs::ThemeSnapshot;
use crate::types::ThemeConfigPatch;
use dioxus::prelude::*;

const COLOR_OPTIONS: &[(&str, &str)] = &[("Purple", "purple"), ("Green", "green"), ("Red", "red")];

const FONT_OPTIONS: &[&str] = &["Inter", "Roboto", "Poppins"];

#[component]
pub fn ThemeCustomizer(open: Signal<bool>, theme: Signal<ThemeSnapshot>) -> Element {
    let services = use_context::<AppServices>();
    let mut open = open;
    let config = theme().config;
    let reset_prefs = services.prefs.clone();

    rsx! {
        div { class: "customizer-backdrop", onclick: move |_| open.set(false) }
        aside { class: "customizer-panel",
            div { class: "customizer-header",
                h2 { "Theme Customizer" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| open.set(false),
                    "Close"
                }
            }
            div { class: "settings-section",
                h3 { class: "section-title", "Primary Color" }
                div { class: "option-grid",
                    for (name, value) in COLOR_OPTIONS.iter().copied() {
                        ConfigOption {
                            key: "{value}",
                            label: name,
                            active: config.primary_color == value,
                            patch: ThemeConfigPatch::primary_color(value),
                        }
                    }
                }
            }
            div { class: "settings-section",
                h3 { class: "section-title", "Font Family" }
                div { class: "option-grid",
                    for font in FONT_OPTIONS.iter().copied() {
                        ConfigOption {
                            key: "{font}",
                            label: font,
                            active: config.font_family == font,
                            patch: ThemeConfigPatch::font_family(font),
                        }
                    }
                }
            }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| {
                    reset_prefs.reset_config();
                },
                "Reset to Default"
            }
        }
    }
}

#[component]
fn ConfigOption(label: &'static str, active: bool, patch: ThemeConfigPatch) -> Element {
    let services = use_context::<AppServices>();
    let class = if active { "theme-option active" } else { "theme-option" };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| {
                services.prefs.update_config(patch.clone());
            },
            "{label}"
        }
    }
}
