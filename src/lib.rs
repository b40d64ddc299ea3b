//! Core of a personal portfolio site: the blog feed, the theme preference
//! store and the contact relay. The Dioxus presentation layer is behind the
//! `dioxus` feature.

pub mod app;
pub mod blog;
pub mod config;
pub mod contact;
pub mod logging;
pub mod prefs;
pub mod storage;
pub mod theme;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;

pub use app::AppServices;
