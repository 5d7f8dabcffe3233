//! DOM side of the session: publishing into page elements and attaching
//! control listeners.

use std::rc::Rc;

use shimmer_core::{ControlEvent, ControlId, EncodedPayload, ListenerHost, Publisher, Slot};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, FileReader, HtmlElement, HtmlImageElement, HtmlInputElement,
};

use crate::config::ElementIds;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no browser window")]
    NoWindow,

    #[error("no element with id '{0}'")]
    MissingElement(String),

    #[error("{0}")]
    Js(String),
}

impl DomError {
    fn from_js(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<DomError> for JsValue {
    fn from(e: DomError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub fn document() -> Result<Document, DomError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DomError::NoWindow)
}

/// Writes renders into the preview and target `<img>` elements and
/// diagnostics into the status element.
pub struct DomPublisher {
    document: Document,
    ids: ElementIds,
}

impl DomPublisher {
    pub fn new(document: Document, ids: ElementIds) -> Self {
        Self { document, ids }
    }

    fn element<T: JsCast>(&self, id: &str) -> Option<T> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            log::warn!("no element with id '{}'", id);
        }
        element?.dyn_into::<T>().ok()
    }
}

impl Publisher for DomPublisher {
    fn publish(&mut self, slot: Slot, payload: &EncodedPayload) {
        if let Some(img) = self.element::<HtmlImageElement>(self.ids.slot(slot)) {
            img.set_src(&payload.to_data_url());
        }
    }

    fn status(&mut self, message: &str) {
        if let Some(el) = self.element::<HtmlElement>(&self.ids.status) {
            el.set_inner_text(message);
        }
    }
}

/// Receives control events, or a message for a control whose value could
/// not be read.
pub type Dispatch = Rc<dyn Fn(Result<ControlEvent, String>)>;

/// An attached listener. Dropping it frees the callback.
pub struct Listener {
    target: EventTarget,
    callback: Closure<dyn FnMut(Event)>,
}

/// Attaches control listeners to page elements.
pub struct DomHost {
    document: Document,
    ids: ElementIds,
    dispatch: Dispatch,
}

impl DomHost {
    pub fn new(document: Document, ids: ElementIds, dispatch: Dispatch) -> Self {
        Self {
            document,
            ids,
            dispatch,
        }
    }

    fn callback(&self, control: ControlId) -> Closure<dyn FnMut(Event)> {
        let dispatch = Rc::clone(&self.dispatch);
        match control {
            ControlId::Upload => Closure::new(move |event: Event| {
                event.prevent_default();
                if let Err(e) = read_upload(&event, &dispatch) {
                    dispatch(Err(DomError::from_js(e).to_string()));
                }
            }),
            ControlId::Close => Closure::new(move |event: Event| {
                event.prevent_default();
                dispatch(Ok(ControlEvent::Close));
            }),
            slider => Closure::new(move |event: Event| {
                let raw = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                let result = ControlEvent::from_slider(slider, &raw)
                    .ok_or_else(|| format!("invalid {:?} value '{}'", slider, raw));
                dispatch(result);
            }),
        }
    }
}

impl ListenerHost for DomHost {
    type Handle = Listener;
    type Error = DomError;

    fn attach(&mut self, control: ControlId) -> Result<Listener, DomError> {
        let id = self.ids.control(control);
        let target: EventTarget = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))?
            .into();
        let callback = self.callback(control);
        target
            .add_event_listener_with_callback(control.event_type(), callback.as_ref().unchecked_ref())
            .map_err(DomError::from_js)?;
        Ok(Listener { target, callback })
    }

    fn detach(&mut self, control: ControlId, listener: Listener) {
        let removed = listener.target.remove_event_listener_with_callback(
            control.event_type(),
            listener.callback.as_ref().unchecked_ref(),
        );
        if let Err(e) = removed {
            log::warn!("removing {:?} listener: {}", control, DomError::from_js(e));
        }
    }
}

/// Read the selected file as a data URL and dispatch it once loaded.
fn read_upload(event: &Event, dispatch: &Dispatch) -> Result<(), JsValue> {
    let input: HtmlInputElement = event
        .target()
        .ok_or_else(|| JsValue::from_str("upload event without a target"))?
        .dyn_into()?;
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(());
    };

    let reader = FileReader::new()?;
    let loaded = reader.clone();
    let on_load = Rc::clone(dispatch);
    let onload = Closure::once_into_js(move || {
        on_load(upload_result(loaded.result().ok()));
    });
    let on_error = Rc::clone(dispatch);
    let onerror = Closure::once_into_js(move || {
        on_error(upload_result(None));
    });
    reader.set_onload(Some(onload.unchecked_ref()));
    reader.set_onerror(Some(onerror.unchecked_ref()));
    reader.read_as_data_url(&file)?;
    Ok(())
}

const UNREADABLE_FILE: &str = "could not read the selected file";

/// What a finished `FileReader` produced: a data URL string, or nothing
/// usable.
fn upload_result(result: Option<JsValue>) -> Result<ControlEvent, String> {
    result
        .and_then(|r| r.as_string())
        .map(ControlEvent::Upload)
        .ok_or_else(|| UNREADABLE_FILE.to_string())
}
