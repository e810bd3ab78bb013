//! DOM lookup and event helpers.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, EventTarget, HtmlElement, MouseEvent, NodeList,
    SvgElement, Window,
};

use crate::error::{DomError, FxError};
use crate::geometry::{Point, Rect};

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(format!("{value:?}"))
    }
}

impl From<JsValue> for FxError {
    fn from(value: JsValue) -> Self {
        FxError::Dom(value.into())
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, DomError> {
    window.document().ok_or(DomError::NoDocument)
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Every element in the document matching `selector`. An invalid selector
/// matches nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(e) => {
            log::warn!("Bad selector '{selector}': {e:?}");
            Vec::new()
        }
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// First descendant of `root` matching `selector`, cast to `T`.
pub fn find_in<T: JsCast>(root: &Element, selector: &str) -> Result<T, DomError> {
    let element = root
        .query_selector(selector)?
        .ok_or_else(|| DomError::MissingElement { selector: selector.to_string() })?;
    element.dyn_into::<T>().map_err(|_| DomError::WrongElementType {
        selector: selector.to_string(),
        expected: std::any::type_name::<T>(),
    })
}

/// Like [`find_in`] but absence is not an error.
pub fn find_optional(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Inline style of an HTML or SVG element.
fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

/// Set an inline style property; failures are logged and ignored.
pub fn set_style(element: &Element, property: &str, value: &str) {
    let Some(style) = inline_style(element) else {
        return;
    };
    if let Err(e) = style.set_property(property, value) {
        log::warn!("Could not set {property}: {e:?}");
    }
}

pub fn style_value(element: &Element, property: &str) -> Option<String> {
    inline_style(element)?.get_property_value(property).ok()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(e) = result {
        log::warn!("Could not toggle class '{class}': {e:?}");
    }
}

pub fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Client coordinates of a mouse event.
pub fn pointer(event: &Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(mouse.client_x() as f64, mouse.client_y() as f64))
}

/// Whether a media query currently matches.
pub fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .is_some_and(|list| list.matches())
}

/// An event listener removed from its target when dropped.
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, DomError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(EventListener {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}
