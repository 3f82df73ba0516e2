use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use crate::app::Enhancement;
use crate::config::{classes, selectors, Config};
use crate::dom::{Listener, Page};
use crate::error::InitError;
use crate::scroll::ScrollToggle;
use crate::surface::ClassToggle;

/// Hamburger menu. The open flag is mirrored as `active` on both the
/// toggle button and the menu container.
#[derive(Debug)]
pub struct MobileMenu<E> {
    toggle: E,
    menu: E,
    open: Cell<bool>,
}

impl<E: ClassToggle> MobileMenu<E> {
    pub fn new(toggle: E, menu: E) -> Self {
        Self {
            toggle,
            menu,
            open: Cell::new(false),
        }
    }

    pub fn toggle(&self) {
        self.set_open(!self.open.get());
    }

    /// Safe to call when already closed.
    pub fn close(&self) {
        self.set_open(false);
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    fn set_open(&self, open: bool) {
        self.open.set(open);
        self.toggle.set_class(classes::ACTIVE, open);
        self.menu.set_class(classes::ACTIVE, open);
    }
}

/// Selector for an in-page link, or `None` when the browser should handle
/// the click itself (bare `#`, empty or external hrefs).
pub fn anchor_target(href: &str) -> Option<&str> {
    let href = href.trim();
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

/// Scroll position that leaves the target just below the fixed header.
pub fn anchor_scroll_top(target_top: f64, header_offset: f64) -> f64 {
    target_top - header_offset
}

/// Where a click on `href` should scroll to, given the top of the element
/// it resolved to. `None` means the click is left to the browser.
pub fn anchor_jump(href: &str, target_top: Option<f64>, header_offset: f64) -> Option<f64> {
    anchor_target(href)?;
    target_top.map(|top| anchor_scroll_top(top, header_offset))
}

pub struct Navigation {
    _listeners: Vec<Listener>,
}

impl Enhancement for Navigation {
    const NAME: &'static str = "navigation";

    fn init(page: &Page, config: &Config) -> Result<Self, InitError> {
        let navbar: Element = page.by_id(selectors::NAVBAR)?;
        let hamburger: Element = page.by_id(selectors::HAMBURGER)?;
        let menu: Element = page.by_id(selectors::NAV_MENU)?;

        let header = Rc::new(ScrollToggle::at(
            navbar,
            config.header_threshold,
            page.scroll_offset(),
        ));
        let mobile = Rc::new(MobileMenu::new(hamburger.clone(), menu));

        let mut listeners = Vec::new();
        {
            let header = header.clone();
            let page_handle = page.clone();
            listeners.push(Listener::new(&page.window, "scroll", move |_| {
                header.on_scroll(page_handle.scroll_offset());
            })?);
        }
        {
            let mobile = mobile.clone();
            listeners.push(Listener::new(&hamburger, "click", move |_| mobile.toggle())?);
        }
        for link in page.all(selectors::NAV_LINKS)? {
            let mobile = mobile.clone();
            listeners.push(Listener::new(&link, "click", move |_| mobile.close())?);
        }
        for anchor in page.all(selectors::IN_PAGE_ANCHORS)? {
            let page_handle = page.clone();
            let offset = config.anchor_offset;
            listeners.push(Listener::new(&anchor, "click", move |event| {
                scroll_to_anchor(&page_handle, &event, offset);
            })?);
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn scroll_to_anchor(page: &Page, event: &Event, offset: f64) {
    let Some(link) = event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return;
    };
    let Some(href) = link.get_attribute("href") else {
        return;
    };
    let target_top = anchor_target(&href)
        .and_then(|selector| page.find(selector))
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        .map(|target| f64::from(target.offset_top()));
    match anchor_jump(&href, target_top, offset) {
        Some(top) => {
            event.prevent_default();
            page.smooth_scroll_to(top);
        }
        None => log::debug!("leaving the jump to {} to the browser", href),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::fake::FakeElement;

    fn menu() -> (MobileMenu<FakeElement>, FakeElement, FakeElement) {
        let toggle = FakeElement::new(1);
        let container = FakeElement::new(2);
        (
            MobileMenu::new(toggle.clone(), container.clone()),
            toggle,
            container,
        )
    }

    #[test]
    fn toggle_flips_both_elements() {
        let (menu, toggle, container) = menu();
        menu.toggle();
        assert!(menu.is_open());
        assert!(toggle.has_class("active") && container.has_class("active"));
        menu.toggle();
        assert!(!menu.is_open());
        assert!(!toggle.has_class("active") && !container.has_class("active"));
    }

    #[test]
    fn link_click_closes_open_menu() {
        let (menu, _, container) = menu();
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
        assert!(!container.has_class("active"));
    }

    #[test]
    fn link_click_on_closed_menu_keeps_it_closed() {
        let (menu, toggle, container) = menu();
        menu.close();
        menu.close();
        assert!(!menu.is_open());
        assert!(!toggle.has_class("active") && !container.has_class("active"));
    }

    #[test]
    fn only_real_fragments_are_intercepted() {
        assert_eq!(anchor_target("#projects"), Some("#projects"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target(""), None);
        assert_eq!(anchor_target("/cv.pdf"), None);
        assert_eq!(anchor_target("https://example.com/#about"), None);
    }

    #[test]
    fn leaves_room_for_the_header() {
        assert_eq!(anchor_scroll_top(1200.0, 80.0), 1120.0);
        assert_eq!(anchor_scroll_top(0.0, 80.0), -80.0);
    }

    #[test]
    fn resolved_anchor_scrolls_below_the_header() {
        assert_eq!(anchor_jump("#projects", Some(1200.0), 80.0), Some(1120.0));
    }

    #[test]
    fn unresolved_anchor_keeps_the_default_jump() {
        // Missing section, or a selector the browser refused (`#1-intro`).
        assert_eq!(anchor_jump("#missing", None, 80.0), None);
        assert_eq!(anchor_jump("#1-intro", None, 80.0), None);
    }

    #[test]
    fn bare_and_external_links_are_never_intercepted() {
        assert_eq!(anchor_jump("#", Some(0.0), 80.0), None);
        assert_eq!(anchor_jump("", Some(0.0), 80.0), None);
        assert_eq!(anchor_jump("/cv.pdf", Some(300.0), 80.0), None);
    }

    #[test]
    fn header_visible_at_init_when_opened_mid_page() {
        let header = ScrollToggle::at(
            FakeElement::new(4),
            crate::config::HEADER_SCROLL_THRESHOLD,
            750.0,
        );
        assert!(header.element().has_class("visible"));
    }

    #[test]
    fn header_hidden_up_to_threshold() {
        let header = ScrollToggle::new(FakeElement::new(3), crate::config::HEADER_SCROLL_THRESHOLD);
        for offset in [0.0, 50.0, 99.9, 100.0] {
            header.on_scroll(offset);
            assert!(!header.element().has_class("visible"), "offset {}", offset);
        }
        for offset in [100.1, 101.0, 5_000.0] {
            header.on_scroll(offset);
            assert!(header.element().has_class("visible"), "offset {}", offset);
        }
    }
}
