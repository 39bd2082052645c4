use crate::dom::ElementRef;

pub const OPEN_CLASS: &str = "active";
pub const ICON_CLOSED: &str = "fa-bars";
pub const ICON_OPEN: &str = "fa-times";
pub const MENU_SHADOW: &str = "0 10px 30px rgba(139, 0, 0, 0.4)";

/// Mobile menu: the toggle button, its icon and the link list.
pub struct Navigation {
    toggle: Option<ElementRef>,
    icon: Option<ElementRef>,
    menu: Option<ElementRef>,
}

impl Navigation {
    pub fn new(
        toggle: Option<ElementRef>,
        icon: Option<ElementRef>,
        menu: Option<ElementRef>,
    ) -> Self {
        Self { toggle, icon, menu }
    }

    pub fn is_open(&self) -> bool {
        self.menu
            .as_ref()
            .map(|menu| menu.has_class(OPEN_CLASS))
            .unwrap_or(false)
    }

    /// Flips the menu. Returns the new open state, or `None` when the page has no menu.
    pub fn toggle(&self) -> Option<bool> {
        let menu = self.menu.as_ref()?;
        self.toggle.as_ref()?;
        let open = !menu.has_class(OPEN_CLASS);
        self.apply(menu, open);
        Some(open)
    }

    /// Forces the menu closed. Does nothing if it already is.
    pub fn close(&self) {
        let Some(menu) = self.menu.as_ref() else {
            return;
        };
        if menu.has_class(OPEN_CLASS) {
            self.apply(menu, false);
        }
    }

    fn apply(&self, menu: &ElementRef, open: bool) {
        menu.set_class(OPEN_CLASS, open);
        if let Some(icon) = &self.icon {
            icon.set_class(ICON_CLOSED, !open);
            icon.set_class(ICON_OPEN, open);
        }
        menu.set_style("box-shadow", if open { MENU_SHADOW } else { "" });
    }
}
