use log::Level;

/// Scroll offset past which the sticky header is shown.
pub const HEADER_SCROLL_THRESHOLD: f64 = 100.0;
/// Scroll offset past which the back-to-top button is shown.
pub const BACK_TO_TOP_SCROLL_THRESHOLD: f64 = 300.0;
/// Height reserved for the fixed header when jumping to an anchor.
pub const ANCHOR_SCROLL_OFFSET: f64 = 80.0;

pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const CARD_STAGGER_MS: u32 = 100;

pub const TYPING_TEXT: &str = "Building beautiful, responsive, and user-friendly web experiences";
pub const TYPING_START_DELAY_MS: u32 = 500;
pub const TYPING_INTERVAL_MS: u32 = 50;

pub const MESSAGE_DISMISS_MS: u32 = 5_000;

/// Ids and selectors the page markup has to provide.
pub mod selectors {
    pub const NAVBAR: &str = "navbar";
    pub const HAMBURGER: &str = "hamburger";
    pub const NAV_MENU: &str = "navMenu";
    pub const NAV_LINKS: &str = ".nav-link";
    pub const IN_PAGE_ANCHORS: &str = "a[href^=\"#\"]";

    pub const TYPED_TEXT: &str = "typedText";

    pub const FADE_IN: &str = ".fade-in";
    pub const PROJECT_CARDS: &str = ".project-card";

    pub const CONTACT_FORM: &str = "contactForm";
    pub const NAME_FIELD: &str = "name";
    pub const EMAIL_FIELD: &str = "email";
    pub const MESSAGE_FIELD: &str = "message";
    pub const SUBMIT_BUTTON: &str = "submitBtn";
    pub const BUTTON_TEXT: &str = ".btn-text";
    pub const BUTTON_LOADER: &str = ".btn-loader";
    pub const FORM_MESSAGE: &str = "formMessage";

    pub const BACK_TO_TOP: &str = "backToTop";
}

/// Class names the stylesheet reacts to.
pub mod classes {
    pub const VISIBLE: &str = "visible";
    pub const ACTIVE: &str = "active";
    pub const FORM_MESSAGE: &str = "form-message";
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: &'static str,
    pub card_stagger_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypingConfig {
    pub text: &'static str,
    pub start_delay_ms: u32,
    pub interval_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub header_threshold: f64,
    pub back_to_top_threshold: f64,
    pub anchor_offset: f64,
    pub reveal: RevealConfig,
    pub typing: TypingConfig,
    pub message_dismiss_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_threshold: HEADER_SCROLL_THRESHOLD,
            back_to_top_threshold: BACK_TO_TOP_SCROLL_THRESHOLD,
            anchor_offset: ANCHOR_SCROLL_OFFSET,
            reveal: RevealConfig {
                threshold: REVEAL_THRESHOLD,
                root_margin: REVEAL_ROOT_MARGIN,
                card_stagger_ms: CARD_STAGGER_MS,
            },
            typing: TypingConfig {
                text: TYPING_TEXT,
                start_delay_ms: TYPING_START_DELAY_MS,
                interval_ms: TYPING_INTERVAL_MS,
            },
            message_dismiss_ms: MESSAGE_DISMISS_MS,
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
