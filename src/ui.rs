use crate::app::AppServices;
use crate::config::AppConfig;
use crate::prefs::ThemeSnapshot;
use crate::views::{BlogView, ContactView, ThemeCustomizer};
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Home,
    Blog,
    Contact,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Blog => "Blog",
            Section::Contact => "Contact",
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let services = use_context_provider(|| AppServices::from_config(&config));
    let theme = use_signal(|| services.prefs.theme());
    let active = use_signal(|| Section::Home);
    let customizer_open = use_signal(|| false);

    use_theme_subscription(services.clone(), theme);

    let root_class = if theme().is_dark { "app dark" } else { "app" };
    let body = match active() {
        Section::Home => rsx! { HomeView {} },
        Section::Blog => rsx! { BlogView {} },
        Section::Contact => rsx! { ContactView {} },
    };
    rsx! {
        ThemeStyles { theme }
        div { class: root_class,
            AppHeader { active, theme, customizer_open }
            if customizer_open() {
                ThemeCustomizer { open: customizer_open, theme }
            }
            main { class: "sections", {body} }
        }
    }
}

/// Mirrors preference changes into the `theme` signal.
fn use_theme_subscription(services: AppServices, theme: Signal<ThemeSnapshot>) {
    use_hook(move || {
        let mut receiver = services.prefs.subscribe();
        let mut theme = theme;
        spawn(async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                theme.set(next);
            }
        });
    });
}

#[component]
fn ThemeStyles(theme: Signal<ThemeSnapshot>) -> Element {
    let css = theme().styles().to_css();
    rsx! {
        style { dangerous_inner_html: "{css}" }
    }
}

#[component]
fn AppHeader(
    active: Signal<Section>,
    theme: Signal<ThemeSnapshot>,
    customizer_open: Signal<bool>,
) -> Element {
    let services = use_context::<AppServices>();
    let mut customizer_open = customizer_open;
    let mode_label = if theme().is_dark { "Light" } else { "Dark" };

    rsx! {
        header { class: "header",
            nav { class: "tabs",
                SectionButton { active, section: Section::Home }
                SectionButton { active, section: Section::Blog }
                SectionButton { active, section: Section::Contact }
            }
            div { class: "header-actions",
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        services.prefs.toggle_dark();
                    },
                    "{mode_label}"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| customizer_open.set(!customizer_open()),
                    "Customize"
                }
            }
        }
    }
}

#[component]
fn SectionButton(active: Signal<Section>, section: Section) -> Element {
    let mut active = active;
    let class = if active() == section { "tab active" } else { "tab" };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| active.set(section),
            "{section.label()}"
        }
    }
}

#[component]
fn HomeView() -> Element {
    rsx! {
        section { class: "hero",
            h1 { "Hi, I build things for the web." }
            p { class: "text-muted",
                "Full-stack developer focused on fast, accessible interfaces and reliable services."
            }
        }
    }
}
