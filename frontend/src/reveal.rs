//! Reveal-on-scroll.
//!
//! Marked elements get the `visible` class the first time at least
//! `threshold` of them is inside the (bottom-inset) viewport, and are then
//! dropped from observation. The transition is one-way: scrolling the
//! element back out never removes the class.

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use crate::app::Enhancement;
use crate::config::{classes, selectors, Config};
use crate::dom::{set_style, Page};
use crate::error::InitError;
use crate::surface::ClassToggle;

/// Slack below the threshold still counted as a crossing. Browsers report
/// ratios like 0.1499 for the notification fired at the 0.15 threshold, so
/// anything within 0.001 of it reveals; 0.148 does not.
const RATIO_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl Intersection {
    pub fn qualifies(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio + RATIO_TOLERANCE >= threshold
    }
}

#[derive(Debug)]
pub struct RevealTracker<E> {
    threshold: f64,
    tracked: Vec<E>,
}

impl<E: ClassToggle + PartialEq> RevealTracker<E> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            tracked: Vec::new(),
        }
    }

    /// Returns `false` when the element is already tracked.
    pub fn track(&mut self, element: E) -> bool {
        if self.tracked.contains(&element) {
            return false;
        }
        self.tracked.push(element);
        true
    }

    pub fn tracked(&self) -> &[E] {
        &self.tracked
    }

    /// Applies one notification batch and returns the elements revealed by
    /// it, in batch order. Entries for untracked elements are ignored.
    pub fn process<I>(&mut self, batch: I) -> Vec<E>
    where
        I: IntoIterator<Item = (E, Intersection)>,
    {
        let mut revealed = Vec::new();
        for (element, hit) in batch {
            if !hit.qualifies(self.threshold) {
                continue;
            }
            let Some(pos) = self.tracked.iter().position(|e| *e == element) else {
                continue;
            };
            let element = self.tracked.swap_remove(pos);
            element.set_class(classes::VISIBLE, true);
            revealed.push(element);
        }
        revealed
    }
}

/// `transition-delay` for the card at `index`.
pub fn stagger_delay(index: usize, step_ms: u32) -> String {
    format!("{}ms", index as u64 * u64::from(step_ms))
}

pub fn observer_supported(window: &Window) -> bool {
    Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// A live observer the component can shut down.
pub trait Disconnect {
    fn disconnect(&self);
}

pub struct BrowserObserver {
    handle: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Disconnect for BrowserObserver {
    fn disconnect(&self) {
        self.handle.disconnect();
    }
}

/// Inert (no observer) when the runtime lacks `IntersectionObserver`.
/// Dropping it disconnects the observer.
pub struct RevealOnScroll<O: Disconnect = BrowserObserver> {
    observer: Option<O>,
}

impl<O: Disconnect> RevealOnScroll<O> {
    /// `connect` only runs when the observer API is `supported`.
    pub fn setup<F>(supported: bool, connect: F) -> Result<Self, InitError>
    where
        F: FnOnce() -> Result<O, InitError>,
    {
        if !supported {
            warn!("IntersectionObserver unavailable, reveal animations disabled");
            return Ok(Self { observer: None });
        }
        Ok(Self {
            observer: Some(connect()?),
        })
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }
}

impl<O: Disconnect> Drop for RevealOnScroll<O> {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl Enhancement for RevealOnScroll {
    const NAME: &'static str = "reveal-on-scroll";

    fn init(page: &Page, config: &Config) -> Result<Self, InitError> {
        Self::setup(observer_supported(&page.window), || connect(page, config))
    }
}

fn connect(page: &Page, config: &Config) -> Result<BrowserObserver, InitError> {
    let mut tracker = RevealTracker::new(config.reveal.threshold);
    for element in page.all(selectors::FADE_IN)? {
        tracker.track(element);
    }
    for (index, card) in page.all(selectors::PROJECT_CARDS)?.into_iter().enumerate() {
        if let Some(card) = card.dyn_ref::<HtmlElement>() {
            let delay = stagger_delay(index, config.reveal.card_stagger_ms);
            set_style(card, "transition-delay", &delay);
        }
        tracker.track(card);
    }
    let targets: Vec<Element> = tracker.tracked().to_vec();

    let callback = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            let batch: Vec<(Element, Intersection)> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| {
                    let hit = Intersection {
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    (entry.target(), hit)
                })
                .collect();
            for element in tracker.process(batch) {
                observer.unobserve(&element);
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root_margin(config.reveal.root_margin);
    options.set_threshold(&JsValue::from_f64(config.reveal.threshold));
    let handle =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for target in &targets {
        handle.observe(target);
    }
    debug!("observing {} elements for reveal", targets.len());

    Ok(BrowserObserver {
        handle,
        _callback: callback,
    })
}
