//! Page-wide interactions: menu, consultation form, scrolling and entrance animations.

pub mod consultation;
pub mod entrance;
pub mod feedback;
pub mod navigation;
pub mod scroll;

use std::rc::Rc;

use crate::config::InteractionConfig;
use crate::dom::{Browser, ElementRef, Form, Subscription};
use crate::error::ValidationError;
use crate::utils::scheduler::Scheduler;

pub use consultation::{messaging_link, Consultation, FormSubmission};
pub use entrance::EntranceAnimations;
pub use feedback::{Feedback, NotificationKind};
pub use navigation::Navigation;
pub use scroll::ScrollEffects;

/// Elements the interaction manager works on. Every hook is optional; a missing one only
/// disables its own behavior.
#[derive(Default)]
pub struct PageHooks {
    pub nav_toggle: Option<ElementRef>,
    pub nav_icon: Option<ElementRef>,
    pub nav_menu: Option<ElementRef>,
    pub form: Option<Rc<dyn Form>>,
    pub messaging_button: Option<ElementRef>,
    pub header: Option<ElementRef>,
    pub hero: Option<ElementRef>,
    pub animated: Vec<ElementRef>,
}

/// Façade over the page behaviors. Each `on_*` method is one DOM event.
pub struct PageInteractions {
    navigation: Navigation,
    consultation: Option<Consultation>,
    scroll: ScrollEffects,
    entrance: EntranceAnimations,
    feedback: Rc<Feedback>,
    messaging_button: Option<ElementRef>,
    config: Rc<InteractionConfig>,
}

impl PageInteractions {
    pub fn new(
        hooks: PageHooks,
        browser: Rc<dyn Browser>,
        scheduler: Rc<dyn Scheduler>,
        config: InteractionConfig,
    ) -> Self {
        let config = Rc::new(config);
        let feedback = Rc::new(Feedback::new(browser.clone(), scheduler.clone(), config.clone()));
        let consultation = hooks.form.map(|form| {
            Consultation::new(
                form,
                browser.clone(),
                scheduler.clone(),
                feedback.clone(),
                config.clone(),
            )
        });
        Self {
            navigation: Navigation::new(hooks.nav_toggle, hooks.nav_icon, hooks.nav_menu),
            consultation,
            scroll: ScrollEffects::new(
                hooks.header,
                hooks.hero,
                browser,
                config.thresholds.scroll,
                config.fallback_header_height,
            ),
            entrance: EntranceAnimations::new(hooks.animated, config.thresholds.intersection),
            feedback,
            messaging_button: hooks.messaging_button,
            config,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn entrance(&self) -> &EntranceAnimations {
        &self.entrance
    }

    /// Injects the animation keyframes and schedules the `page-loaded` body class.
    pub fn initialize_page(&self) {
        self.feedback.initialize_page();
        tracing::info!(
            "Page interactions ready ({} animated elements)",
            self.entrance.len()
        );
    }

    pub fn on_nav_toggle(&self) -> Option<bool> {
        self.navigation.toggle()
    }

    pub fn on_nav_link(&self) {
        self.navigation.close();
    }

    /// Returns `None` when the page has no consultation form.
    pub fn on_submit(&self) -> Option<Result<(), ValidationError>> {
        self.consultation.as_ref().map(Consultation::submit)
    }

    pub fn on_messaging_click(&self) {
        if let Some(button) = &self.messaging_button {
            self.feedback.press(button);
            tracing::info!("Messaging consultation initiated");
        }
    }

    pub fn on_anchor_click(&self, href: &str) -> bool {
        self.scroll.scroll_to_anchor(href)
    }

    pub fn on_scroll(&self) {
        self.scroll.on_scroll();
    }

    pub fn on_resize(&self) {
        self.navigation.close();
    }

    pub fn watch_entrance(&self, index: usize, subscription: Box<dyn Subscription>) {
        self.entrance.watch(index, subscription);
    }

    pub fn on_intersection(&self, index: usize, ratio: f64, is_intersecting: bool) -> bool {
        self.entrance.on_intersection(index, ratio, is_intersecting)
    }

    pub fn notify(&self, message: &str, kind: NotificationKind) {
        self.feedback.notify(message, kind);
    }
}
