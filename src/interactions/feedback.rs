use std::rc::Rc;

use crate::config::InteractionConfig;
use crate::dom::{Browser, ElementRef, NewElement};
use crate::utils::scheduler::Scheduler;

pub const STYLESHEET_ID: &str = "dynamic-animations";
pub const PAGE_LOADED_CLASS: &str = "page-loaded";
pub const OVERLAY_CLASS: &str = "loading-overlay";
pub const SPINNER_CLASS: &str = "loading-spinner";

const SLIDE_OUT_MS: u32 = 300;

const OVERLAY_CSS: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
    background: rgba(10, 10, 10, 0.9); display: flex; align-items: center; \
    justify-content: center; z-index: 9998;";

const SPINNER_CSS: &str = "width: 50px; height: 50px; border: 3px solid rgba(255, 69, 0, 0.3); \
    border-radius: 50%; border-top-color: #FF4500; animation: spin 1s linear infinite;";

pub const ANIMATION_STYLES: &str = r#"
@keyframes fadeInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}
@keyframes shake {
    0%, 100% { transform: translateX(0); }
    25% { transform: translateX(-5px); }
    75% { transform: translateX(5px); }
}
@keyframes spin {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}
@keyframes slideInRight {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOutRight {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}
.shake {
    animation: shake 0.5s ease-in-out;
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

impl NotificationKind {
    pub fn class_name(self) -> &'static str {
        match self {
            NotificationKind::Error => "notification notification-error",
            NotificationKind::Success => "notification notification-success",
            NotificationKind::Info => "notification notification-info",
        }
    }

    fn background(self) -> &'static str {
        match self {
            NotificationKind::Error => "#ff4444",
            NotificationKind::Success => "#00C851",
            NotificationKind::Info => "#33b5e5",
        }
    }
}

/// Transient UI feedback: toasts, the loading overlay, press effects.
pub struct Feedback {
    browser: Rc<dyn Browser>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<InteractionConfig>,
}

impl Feedback {
    pub fn new(
        browser: Rc<dyn Browser>,
        scheduler: Rc<dyn Scheduler>,
        config: Rc<InteractionConfig>,
    ) -> Self {
        Self {
            browser,
            scheduler,
            config,
        }
    }

    /// Shows a toast that slides out after the notification delay and is then removed.
    pub fn notify(&self, message: &str, kind: NotificationKind) -> ElementRef {
        let css = format!(
            "position: fixed; top: 20px; right: 20px; background: {}; color: white; \
             padding: 15px 25px; border-radius: 5px; box-shadow: 0 4px 15px rgba(0,0,0,0.2); \
             z-index: 9999; animation: slideInRight 0.3s ease-out;",
            kind.background()
        );
        let toast = self.browser.mount(&NewElement {
            class: kind.class_name(),
            text: Some(message),
            css: &css,
            children: &[],
        });

        let scheduler = self.scheduler.clone();
        let handle = toast.clone();
        self.scheduler
            .schedule(
                self.config.notification_ms,
                Box::new(move || {
                    handle.set_style("animation", "slideOutRight 0.3s ease-out forwards");
                    scheduler
                        .schedule(SLIDE_OUT_MS, Box::new(move || handle.remove()))
                        .detach();
                }),
            )
            .detach();
        toast
    }

    /// Covers the page with a spinner for `duration_ms`.
    pub fn show_loading(&self, duration_ms: u32) -> ElementRef {
        let overlay = self.browser.mount(&NewElement {
            class: OVERLAY_CLASS,
            text: None,
            css: OVERLAY_CSS,
            children: &[NewElement {
                class: SPINNER_CLASS,
                text: None,
                css: SPINNER_CSS,
                children: &[],
            }],
        });
        let handle = overlay.clone();
        self.scheduler
            .schedule(duration_ms, Box::new(move || handle.remove()))
            .detach();
        overlay
    }

    /// Briefly shrinks a button to acknowledge the click.
    pub fn press(&self, button: &ElementRef) {
        button.set_style("transform", "scale(0.95)");
        let button = button.clone();
        self.scheduler
            .schedule(
                self.config.durations.short,
                Box::new(move || button.set_style("transform", "")),
            )
            .detach();
    }

    /// Injects the keyframes once and flags the body as loaded shortly after.
    pub fn initialize_page(&self) {
        if !self.browser.inject_stylesheet(STYLESHEET_ID, ANIMATION_STYLES) {
            tracing::debug!("Animation stylesheet already present");
        }
        let browser = self.browser.clone();
        self.scheduler
            .schedule(
                self.config.page_loaded_delay_ms,
                Box::new(move || browser.add_body_class(PAGE_LOADED_CLASS)),
            )
            .detach();
    }
}
