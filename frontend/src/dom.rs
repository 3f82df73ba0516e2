use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Window,
};

use crate::error::InitError;
use crate::surface::{ClassToggle, TextSink};

/// Handles to the browser globals every component starts from.
#[derive(Debug, Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
}

impl Page {
    pub fn current() -> Result<Self, InitError> {
        let window = web_sys::window().ok_or_else(|| InitError::Js("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| InitError::Js("no document".into()))?;
        Ok(Self { window, document })
    }

    /// Element by id, cast to the concrete element type the caller needs.
    pub fn by_id<T: JsCast>(&self, id: &str) -> Result<T, InitError> {
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| InitError::MissingElement(format!("#{}", id)))?;
        cast(element, &format!("#{}", id))
    }

    /// Every element matching `selector`, in document order.
    pub fn all(&self, selector: &str) -> Result<Vec<Element>, InitError> {
        let nodes = self.document.query_selector_all(selector)?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    /// First element matching `selector`; `None` for no match or a selector
    /// the browser refuses to parse (e.g. `#1-intro`).
    pub fn find(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    pub fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Descendant of `parent` matching `selector`.
pub fn child<T: JsCast>(parent: &Element, selector: &str) -> Result<T, InitError> {
    let element = parent
        .query_selector(selector)?
        .ok_or_else(|| InitError::MissingElement(selector.to_string()))?;
    cast(element, selector)
}

fn cast<T: JsCast>(element: Element, selector: &str) -> Result<T, InitError> {
    element.dyn_into::<T>().map_err(|_| InitError::WrongElement {
        selector: selector.to_string(),
        expected: std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("element"),
    })
}

/// An event listener that stays attached for as long as the value lives.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, InitError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Inline style write; a refusal is logged, not raised.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if element.style().set_property(property, value).is_err() {
        log::warn!("could not set `{}: {}`", property, value);
    }
}

/// Shows or hides an element through its inline `display`.
pub fn set_display(element: &HtmlElement, value: &str) {
    set_style(element, "display", value);
}

impl ClassToggle for Element {
    fn set_class(&self, class: &str, on: bool) {
        let list = self.class_list();
        let result = if on { list.add_1(class) } else { list.remove_1(class) };
        if result.is_err() {
            log::warn!("could not update class `{}`", class);
        }
    }

    #[cfg(test)]
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }
}

impl TextSink for Element {
    fn push_char(&self, ch: char) {
        let mut text = self.text_content().unwrap_or_default();
        text.push(ch);
        self.set_text_content(Some(&text));
    }
}
