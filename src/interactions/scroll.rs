use std::rc::Rc;

use crate::dom::{Browser, ElementRef};

pub const STICKY_CLASS: &str = "sticky";
pub const HEADER_SHADOW: &str = "0 5px 20px rgba(139, 0, 0, 0.4)";
pub const PARALLAX_FACTOR: f64 = 0.5;

/// Where to scroll so the target clears the header.
pub fn target_position(element_top: f64, header_height: f64) -> f64 {
    element_top - header_height
}

/// Header and hero effects driven by the window's scroll offset, plus anchor scrolling.
pub struct ScrollEffects {
    header: Option<ElementRef>,
    hero: Option<ElementRef>,
    browser: Rc<dyn Browser>,
    threshold: f64,
    fallback_header_height: f64,
}

impl ScrollEffects {
    pub fn new(
        header: Option<ElementRef>,
        hero: Option<ElementRef>,
        browser: Rc<dyn Browser>,
        threshold: f64,
        fallback_header_height: f64,
    ) -> Self {
        Self {
            header,
            hero,
            browser,
            threshold,
            fallback_header_height,
        }
    }

    pub fn on_scroll(&self) {
        let offset = self.browser.scroll_offset();
        self.update_header(offset);
        self.apply_parallax(offset);
    }

    pub fn update_header(&self, offset: f64) {
        let Some(header) = &self.header else {
            return;
        };
        let sticky = offset > self.threshold;
        header.set_class(STICKY_CLASS, sticky);
        header.set_style("box-shadow", if sticky { HEADER_SHADOW } else { "" });
    }

    pub fn apply_parallax(&self, offset: f64) {
        if let Some(hero) = &self.hero {
            hero.set_style(
                "transform",
                &format!("translateY({}px)", offset * PARALLAX_FACTOR),
            );
        }
    }

    /// Scrolls to the element named by an in-page `href`. Returns true when a scroll started.
    pub fn scroll_to_anchor(&self, href: &str) -> bool {
        if href == "#" || !href.starts_with('#') {
            return false;
        }
        let Some(target) = self.browser.find(href) else {
            tracing::debug!("No element matches anchor {}", href);
            return false;
        };
        let header_height = self
            .header
            .as_ref()
            .map(|header| header.offset_height())
            .filter(|height| *height > 0.0)
            .unwrap_or(self.fallback_header_height);
        self.browser
            .scroll_to(target_position(target.offset_top(), header_height));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_clears_header() {
        assert_eq!(target_position(900.0, 80.0), 820.0);
        assert_eq!(target_position(40.0, 80.0), -40.0);
    }
}
