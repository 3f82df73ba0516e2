//! The small slice of the DOM the components write to.
//!
//! Components are generic over these traits so their behavior can be
//! exercised against [`fake::FakeElement`] in host tests; the browser
//! implementations live in `dom.rs`.

pub trait ClassToggle {
    fn set_class(&self, class: &str, on: bool);
    #[cfg(test)]
    fn has_class(&self, class: &str) -> bool;
}

pub trait TextSink {
    fn push_char(&self, ch: char);
}
