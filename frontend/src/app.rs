use log::{error, info};

use crate::back_to_top::BackToTop;
use crate::config::Config;
use crate::contact::form::ContactForm;
use crate::dom::Page;
use crate::error::InitError;
use crate::nav::Navigation;
use crate::reveal::RevealOnScroll;
use crate::typing::HeroTyping;

/// One independently mounted piece of page behavior. Teardown is `Drop`:
/// listeners, observers and timers are released with the value.
pub trait Enhancement: Sized {
    const NAME: &'static str;

    fn init(page: &Page, config: &Config) -> Result<Self, InitError>;
}

/// Everything mounted on the page. Missing markup only disables the
/// component that needs it.
pub struct App {
    navigation: Option<Navigation>,
    typing: Option<HeroTyping>,
    reveal: Option<RevealOnScroll>,
    contact: Option<ContactForm>,
    back_to_top: Option<BackToTop>,
}

impl App {
    pub fn mount(page: &Page, config: &Config) -> Self {
        Self {
            navigation: mount(page, config),
            typing: mount(page, config),
            reveal: mount(page, config),
            contact: mount(page, config),
            back_to_top: mount(page, config),
        }
    }

    pub fn mounted(&self) -> usize {
        [
            self.navigation.is_some(),
            self.typing.is_some(),
            self.reveal.is_some(),
            self.contact.is_some(),
            self.back_to_top.is_some(),
        ]
        .iter()
        .filter(|m| **m)
        .count()
    }
}

fn mount<E: Enhancement>(page: &Page, config: &Config) -> Option<E> {
    match E::init(page, config) {
        Ok(enhancement) => {
            info!("{} ready", E::NAME);
            Some(enhancement)
        }
        Err(e) => {
            error!("{} disabled: {}", E::NAME, e);
            None
        }
    }
}
