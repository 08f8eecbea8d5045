use std::cell::RefCell;
use std::rc::Rc;

use board_core::Board;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlImageElement, HtmlInputElement};

mod canvas;
mod constants;
mod state;
mod utils;

use crate::canvas::{ImageElementLoader, mount_canvas};
use crate::constants::{
    BOARD_CONTAINER_ID, CANVAS_SIZE, DARK_INPUT_ID, IMAGE_DIR, LIGHT_INPUT_ID,
};
use crate::state::{State, read_palette};
use crate::utils::{asset_url, get_query_param, log};

fn input_by_id(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("input #{id} not found")))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an input")))
}

// Both inputs re-read both colors: `change` on the light one, `input` on the dark one.
fn attach_color_inputs(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (light, dark) = {
        let s = state.borrow();
        (s.light_input.clone(), s.dark_input.clone())
    };
    for (input, event) in [(light, "change"), (dark, "input")] {
        let st = state.clone();
        let handler = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            st.borrow_mut().update();
        }));
        input.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(())
}

// Repaint once each placed piece's image finishes loading so the first frame
// is not left without its pieces. Unplaced images never trigger a repaint.
fn attach_image_reload(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let images: Vec<HtmlImageElement> = {
        let s = state.borrow();
        s.board
            .placed_names()
            .iter()
            .filter_map(|name| s.board.images().get(name))
            .filter(|img| !img.complete())
            .cloned()
            .collect()
    };
    for img in images {
        let st = state.clone();
        let onload = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            st.borrow_mut().draw();
        }));
        img.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
        onload.forget();
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let container = document
        .get_element_by_id(BOARD_CONTAINER_ID)
        .ok_or_else(|| JsValue::from_str("board container #chess-board-container not found"))?;
    let light_input = input_by_id(&document, LIGHT_INPUT_ID)?;
    let dark_input = input_by_id(&document, DARK_INPUT_ID)?;

    // ?light=...&dark=... overrides the colors the page was rendered with
    if let Ok(search) = window.location().search() {
        if let Some(c) = get_query_param(&search, "light") {
            light_input.set_value(&c);
        }
        if let Some(c) = get_query_param(&search, "dark") {
            dark_input.set_value(&c);
        }
    }

    // The server writes the canvas edge into data-size; fall back to the default.
    let canvas_size = container
        .get_attribute("data-size")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(CANVAS_SIZE);
    let surface = mount_canvas(&document, &container, canvas_size)?;
    let board = Board::with_default_size(
        canvas_size as f64,
        read_palette(&light_input, &dark_input),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let state = Rc::new(RefCell::new(State {
        light_input,
        dark_input,
        surface,
        loader: ImageElementLoader {
            base: asset_url(IMAGE_DIR),
        },
        board,
    }));
    state.borrow_mut().draw();
    attach_color_inputs(state.clone())?;
    attach_image_reload(state.clone())?;
    log(&format!(
        "Board ready: {}x{} squares on a {}px canvas",
        state.borrow().board.size(),
        state.borrow().board.size(),
        canvas_size
    ));
    Ok(())
}
