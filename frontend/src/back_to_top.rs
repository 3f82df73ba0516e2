use std::rc::Rc;

use web_sys::Element;

use crate::app::Enhancement;
use crate::config::{selectors, Config};
use crate::dom::{Listener, Page};
use crate::error::InitError;
use crate::scroll::ScrollToggle;

pub struct BackToTop {
    _listeners: [Listener; 2],
}

impl Enhancement for BackToTop {
    const NAME: &'static str = "back-to-top";

    fn init(page: &Page, config: &Config) -> Result<Self, InitError> {
        let button: Element = page.by_id(selectors::BACK_TO_TOP)?;
        let toggle = Rc::new(ScrollToggle::at(
            button.clone(),
            config.back_to_top_threshold,
            page.scroll_offset(),
        ));

        let on_scroll = {
            let page_handle = page.clone();
            Listener::new(&page.window, "scroll", move |_| {
                toggle.on_scroll(page_handle.scroll_offset());
            })?
        };
        let on_click = {
            let page_handle = page.clone();
            Listener::new(&button, "click", move |_| page_handle.smooth_scroll_to(0.0))?
        };

        Ok(Self {
            _listeners: [on_scroll, on_click],
        })
    }
}
