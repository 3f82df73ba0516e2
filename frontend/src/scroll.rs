use crate::config::classes;
use crate::surface::ClassToggle;

/// Shows an element (class `visible`) while the page is scrolled past a
/// fixed offset. Stateless: every call recomputes from the offset alone.
#[derive(Debug, Clone)]
pub struct ScrollToggle<E> {
    element: E,
    threshold: f64,
}

impl<E: ClassToggle> ScrollToggle<E> {
    pub fn new(element: E, threshold: f64) -> Self {
        Self { element, threshold }
    }

    /// Builds the toggle already matching `offset`, so a page opened
    /// mid-scroll is right before the first scroll event.
    pub fn at(element: E, threshold: f64, offset: f64) -> Self {
        let toggle = Self::new(element, threshold);
        toggle.on_scroll(offset);
        toggle
    }

    pub fn on_scroll(&self, offset: f64) {
        self.element
            .set_class(classes::VISIBLE, is_past(offset, self.threshold));
    }

    #[cfg(test)]
    pub fn element(&self) -> &E {
        &self.element
    }
}

pub fn is_past(offset: f64, threshold: f64) -> bool {
    offset > threshold
}
