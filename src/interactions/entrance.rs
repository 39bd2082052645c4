use std::cell::{Cell, RefCell};

use crate::dom::{ElementRef, Subscription};

pub const ANIMATED_CLASS: &str = "animate-in-view";
pub const SERVICE_CARD_CLASS: &str = "service-card";
pub const SERVICE_CARD_ANIMATION: &str = "fadeInUp 0.8s ease-out";

/// Slack for ratios the browser reports just under the threshold after subpixel rounding.
const RATIO_TOLERANCE: f64 = 0.01;

struct Target {
    element: ElementRef,
    subscription: RefCell<Option<Box<dyn Subscription>>>,
    revealed: Cell<bool>,
}

/// One-shot entrance animations. Each element is revealed at most once, and its viewport
/// observation is cancelled the moment it fires.
pub struct EntranceAnimations {
    targets: Vec<Target>,
    threshold: f64,
}

impl EntranceAnimations {
    pub fn new(elements: Vec<ElementRef>, threshold: f64) -> Self {
        let targets = elements
            .into_iter()
            .map(|element| Target {
                element,
                subscription: RefCell::new(None),
                revealed: Cell::new(false),
            })
            .collect();
        Self { targets, threshold }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&ElementRef> {
        self.targets.get(index).map(|target| &target.element)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.targets
            .get(index)
            .map(|target| target.revealed.get())
            .unwrap_or(false)
    }

    /// Attaches the observation for the target at `index`.
    pub fn watch(&self, index: usize, subscription: Box<dyn Subscription>) {
        match self.targets.get(index) {
            Some(target) if !target.revealed.get() => {
                *target.subscription.borrow_mut() = Some(subscription);
            }
            _ => subscription.cancel(),
        }
    }

    /// Handles an intersection report. Returns true when this call revealed the element.
    pub fn on_intersection(&self, index: usize, ratio: f64, is_intersecting: bool) -> bool {
        let Some(target) = self.targets.get(index) else {
            return false;
        };
        if target.revealed.get() || !is_intersecting || ratio + RATIO_TOLERANCE < self.threshold {
            return false;
        }
        target.revealed.set(true);
        target.element.add_class(ANIMATED_CLASS);
        if target.element.has_class(SERVICE_CARD_CLASS) {
            target.element.set_style("animation", SERVICE_CARD_ANIMATION);
        }
        if let Some(subscription) = target.subscription.borrow().as_ref() {
            subscription.cancel();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MockSubscription};
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Default)]
    struct Card {
        classes: RefCell<HashSet<String>>,
        animation: RefCell<String>,
    }

    impl Element for Card {
        fn add_class(&self, class: &str) {
            self.classes.borrow_mut().insert(class.to_string());
        }
        fn remove_class(&self, class: &str) {
            self.classes.borrow_mut().remove(class);
        }
        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().contains(class)
        }
        fn attribute(&self, _name: &str) -> Option<String> {
            None
        }
        fn set_attribute(&self, _name: &str, _value: &str) {}
        fn set_style(&self, property: &str, value: &str) {
            if property == "animation" {
                *self.animation.borrow_mut() = value.to_string();
            }
        }
        fn set_text(&self, _text: &str) {}
        fn offset_top(&self) -> f64 {
            0.0
        }
        fn offset_height(&self) -> f64 {
            0.0
        }
        fn remove(&self) {}
    }

    fn service_card() -> Rc<Card> {
        let card = Rc::new(Card::default());
        card.add_class(SERVICE_CARD_CLASS);
        card
    }

    #[test]
    fn reveals_once_and_cancels_observation() {
        let card = service_card();
        let animations = EntranceAnimations::new(vec![card.clone() as ElementRef], 0.1);

        let mut subscription = MockSubscription::new();
        subscription.expect_cancel().times(1).return_const(());
        animations.watch(0, Box::new(subscription));

        assert!(animations.on_intersection(0, 0.4, true));
        assert!(!animations.on_intersection(0, 0.9, true));
        assert!(card.has_class(ANIMATED_CLASS));
        assert_eq!(*card.animation.borrow(), SERVICE_CARD_ANIMATION);
    }

    #[test]
    fn below_threshold_keeps_watching() {
        let card = service_card();
        let animations = EntranceAnimations::new(vec![card.clone() as ElementRef], 0.1);

        let mut subscription = MockSubscription::new();
        subscription.expect_cancel().never();
        animations.watch(0, Box::new(subscription));

        assert!(!animations.on_intersection(0, 0.05, true));
        assert!(!animations.on_intersection(0, 0.5, false));
        assert!(!card.has_class(ANIMATED_CLASS));
        assert!(!animations.is_revealed(0));
    }

    #[test]
    fn ratio_rounded_under_threshold_still_reveals() {
        let card = service_card();
        let animations = EntranceAnimations::new(vec![card.clone() as ElementRef], 0.1);

        let mut subscription = MockSubscription::new();
        subscription.expect_cancel().times(1).return_const(());
        animations.watch(0, Box::new(subscription));

        assert!(animations.on_intersection(0, 0.0999, true));
        assert!(card.has_class(ANIMATED_CLASS));
    }

    #[test]
    fn leaving_viewport_does_not_unmark() {
        let card = Rc::new(Card::default());
        let animations = EntranceAnimations::new(vec![card.clone() as ElementRef], 0.1);

        assert!(animations.on_intersection(0, 1.0, true));
        animations.on_intersection(0, 0.0, false);

        assert!(card.has_class(ANIMATED_CLASS));
        assert!(card.animation.borrow().is_empty());
    }

    #[test]
    fn watching_unknown_target_cancels_immediately() {
        let animations = EntranceAnimations::new(Vec::new(), 0.1);
        let mut subscription = MockSubscription::new();
        subscription.expect_cancel().times(1).return_const(());
        animations.watch(3, Box::new(subscription));
    }
}
