pub mod blog;
pub mod contact;
pub mod customizer;

pub use blog::BlogView;
pub use contact::ContactView;
pub use customizer::ThemeCustomizer;
