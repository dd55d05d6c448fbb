//! Platform detection for keybindings and shortcut labels.

use std::sync::OnceLock;

/// Cached platform detection results.
#[derive(Debug, Clone, Default)]
pub struct Platform {
    pub mac: bool,
    pub ios: bool,
    pub mobile: bool,
}

impl Platform {
    /// Label of the primary shortcut modifier, for toolbar tooltips.
    pub fn primary_label(&self) -> &'static str {
        if self.mac || self.ios { "⌘" } else { "Ctrl" }
    }

    /// Whether Cmd rather than Ctrl is the primary modifier.
    pub fn uses_meta(&self) -> bool {
        self.mac || self.ios
    }
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Get cached platform info. Detection runs once on first call.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(detect_platform)
}

fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };

    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default().to_lowercase();
    let platform_str = navigator.platform().unwrap_or_default().to_lowercase();

    // iPadOS reports a Mac platform; touch points give it away.
    let ios = user_agent.contains("iphone")
        || user_agent.contains("ipad")
        || (platform_str.contains("mac") && navigator.max_touch_points() > 0);
    let mac = platform_str.contains("mac") && !ios;
    let mobile = ios || user_agent.contains("android") || user_agent.contains("mobile");

    Platform { mac, ios, mobile }
}
