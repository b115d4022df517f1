use tracing::{info, warn};

const SUPPORTED_LOCALES: [&str; 1] = ["en"];

/// Switch the output language, keeping English for unknown locales
pub fn set_locale(locale: &str) {
    let locale = locale.trim().to_ascii_lowercase();
    if SUPPORTED_LOCALES.contains(&locale.as_str()) {
        rust_i18n::set_locale(&locale);
        info!("Setting locale to {}", locale);
    } else {
        warn!("Unsupported locale {}, using en", locale);
        rust_i18n::set_locale("en");
    }
}
