use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Element;

use crate::app::Enhancement;
use crate::config::{selectors, Config, TypingConfig};
use crate::dom::Page;
use crate::error::InitError;
use crate::surface::TextSink;
use crate::timer::{BrowserTimers, Scheduler};

/// Single forward pass over a fixed string.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    next: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            next: 0,
        }
    }

    /// Next character to emit, `None` once the text is exhausted.
    pub fn tick(&mut self) -> Option<char> {
        let ch = self.chars.get(self.next).copied()?;
        self.next += 1;
        Some(ch)
    }

    #[cfg(test)]
    pub fn typed(&self) -> String {
        self.chars[..self.next].iter().collect()
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.next >= self.chars.len()
    }
}

/// Drives a [`Typewriter`] into a text sink on a timer. Holds the one
/// pending tick; dropping the animation cancels it.
pub struct TypingAnimation<S: Scheduler> {
    pending: Rc<RefCell<Option<S::Handle>>>,
}

impl<S> TypingAnimation<S>
where
    S: Scheduler + Clone + 'static,
{
    pub fn start<T>(scheduler: S, target: T, config: &TypingConfig) -> Self
    where
        T: TextSink + 'static,
    {
        let pending = Rc::new(RefCell::new(None));
        let run = Run {
            scheduler,
            target: Rc::new(target),
            writer: Rc::new(RefCell::new(Typewriter::new(config.text))),
            pending: pending.clone(),
            interval_ms: config.interval_ms,
        };
        run.schedule(config.start_delay_ms);
        Self { pending }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

impl<S: Scheduler> Drop for TypingAnimation<S> {
    fn drop(&mut self) {
        // The scheduled tick holds the other references; break the cycle here.
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }
}

struct Run<S: Scheduler, T> {
    scheduler: S,
    target: Rc<T>,
    writer: Rc<RefCell<Typewriter>>,
    pending: Rc<RefCell<Option<S::Handle>>>,
    interval_ms: u32,
}

impl<S: Scheduler, T> Clone for Run<S, T>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            target: self.target.clone(),
            writer: self.writer.clone(),
            pending: self.pending.clone(),
            interval_ms: self.interval_ms,
        }
    }
}

impl<S, T> Run<S, T>
where
    S: Scheduler + Clone + 'static,
    T: TextSink + 'static,
{
    fn schedule(self, delay_ms: u32) {
        let next = self.clone();
        let handle = self.scheduler.after(delay_ms, Box::new(move || next.step()));
        *self.pending.borrow_mut() = Some(handle);
    }

    fn step(self) {
        let ch = self.writer.borrow_mut().tick();
        match ch {
            Some(ch) => {
                self.target.push_char(ch);
                let interval = self.interval_ms;
                self.schedule(interval);
            }
            None => {
                self.pending.borrow_mut().take();
            }
        }
    }
}

/// Hero tagline typed into `#typedText`.
pub struct HeroTyping {
    _animation: TypingAnimation<BrowserTimers>,
}

impl Enhancement for HeroTyping {
    const NAME: &'static str = "typing";

    fn init(page: &Page, config: &Config) -> Result<Self, InitError> {
        let target: Element = page.by_id(selectors::TYPED_TEXT)?;
        Ok(Self {
            _animation: TypingAnimation::start(BrowserTimers, target, &config.typing),
        })
    }
}
