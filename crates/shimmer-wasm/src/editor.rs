//! The page-level editor: one session wired to the page's controls.
//!
//! ```typescript
//! import init, { Editor } from '@shimmer/wasm';
//!
//! await init();
//! const editor = new Editor({ previewWidth: 300 });
//! editor.start();
//! ```
//!
//! Clicking the close control shuts the session down. Listener teardown runs
//! on the next task tick, after the click handler has returned.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shimmer_core::{ControlEvent, ControlId, Flow, HandlerRegistry, Publisher, Session, SessionState};
use wasm_bindgen::prelude::*;

use crate::config::{EditorConfig, ElementIds};
use crate::dom::{self, Dispatch, DomHost, DomPublisher};
use crate::logger;

struct Inner {
    session: RefCell<Session<DomPublisher>>,
    registry: RefCell<Option<HandlerRegistry<DomHost>>>,
    ids: ElementIds,
}

impl Inner {
    fn dispatch(self: &Rc<Self>, input: Result<ControlEvent, String>) {
        let event = match input {
            Ok(event) => event,
            Err(message) => {
                log::warn!("{}", message);
                self.session.borrow_mut().publisher_mut().status(&message);
                return;
            }
        };

        let control = event.control();
        let started = js_sys::Date::now();
        let flow = self.session.borrow_mut().handle(event);
        log::debug!("{:?} handled in {:.1}ms", control, js_sys::Date::now() - started);

        if flow == Flow::Shutdown {
            self.schedule_teardown();
        }
    }

    /// Release the listeners once the current event handler has returned.
    fn schedule_teardown(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let teardown = Closure::once_into_js(move || {
            if let Some(inner) = weak.upgrade() {
                inner.teardown();
            }
        });
        let scheduled = web_sys::window().map(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(teardown.unchecked_ref(), 0)
        });
        match scheduled {
            Some(Ok(_)) => {}
            Some(Err(e)) => log::warn!("could not schedule teardown: {:?}", e),
            None => log::warn!("could not schedule teardown: no window"),
        }
    }

    fn teardown(&self) {
        let registry = self.registry.borrow_mut().take();
        if let Some(registry) = registry {
            registry.release();
            log::info!("Shimmer stopped");
        }
    }
}

/// An image editing session bound to the page.
#[wasm_bindgen]
pub struct Editor {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor. `config` is optional; see `EditorConfig` for keys.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Editor, JsValue> {
        let config = EditorConfig::from_js(config)?;
        logger::init(logger::parse_level(&config.log_level));

        let publisher = DomPublisher::new(dom::document()?, config.ids.clone());
        let session = Session::new(config.session(), publisher)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Editor {
            inner: Rc::new(Inner {
                session: RefCell::new(session),
                registry: RefCell::new(None),
                ids: config.ids,
            }),
        })
    }

    /// Attach listeners to every control. Fails if any control element is
    /// missing, in which case nothing stays attached.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.inner.session.borrow().state() == SessionState::Closed {
            return Err(JsValue::from_str("editor has been shut down"));
        }
        if self.inner.registry.borrow().is_some() {
            return Ok(());
        }

        let weak = Rc::downgrade(&self.inner);
        let dispatch: Dispatch = Rc::new(move |input: Result<ControlEvent, String>| {
            if let Some(inner) = weak.upgrade() {
                inner.dispatch(input);
            }
        });
        let host = DomHost::new(dom::document()?, self.inner.ids.clone(), dispatch);
        let registry = HandlerRegistry::register(host, &ControlId::ALL)?;

        *self.inner.registry.borrow_mut() = Some(registry);
        log::info!("Shimmer started");
        Ok(())
    }

    /// Load a `data:image/...;base64,` string as if it had been uploaded.
    pub fn load_data_url(&self, data_url: String) {
        self.inner.dispatch(Ok(ControlEvent::Upload(data_url)));
    }

    /// Same as clicking the close control.
    pub fn shutdown(&self) {
        self.inner.dispatch(Ok(ControlEvent::Close));
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.inner.session.borrow().state() {
            SessionState::Empty => "empty",
            SessionState::Ready => "ready",
            SessionState::Closed => "closed",
        }
        .to_string()
    }

    /// Whether listeners are currently attached.
    #[wasm_bindgen(getter)]
    pub fn listening(&self) -> bool {
        self.inner.registry.borrow().is_some()
    }
}
