use board_core::{ImageLoader, Surface};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement};

use crate::constants::CANVAS_ID;
use crate::utils::log;

// Non-deprecated helper to set the fill style via property assignment.
pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

/// Board surface backed by a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        set_fill_style(&self.ctx, color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f64, y: f64, w: f64, h: f64) {
        // An image still loading draws nothing without error; the load
        // listener repaints later. Broken images throw and are logged.
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
        {
            log(&format!("draw_image failed for {}: {e:?}", image.src()));
        }
    }
}

/// Create the `width × width` canvas and append it to `container`.
pub fn mount_canvas(
    document: &Document,
    container: &Element,
    width: u32,
) -> Result<CanvasSurface, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(width);
    canvas.set_height(width);
    canvas.set_id(CANVAS_ID);
    container.append_child(&canvas)?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok(CanvasSurface { ctx })
}

/// Creates `<img>` elements pointing at `<base>/<name>.svg`. Load failures
/// are left to the browser.
pub struct ImageElementLoader {
    pub base: String,
}

impl ImageLoader for ImageElementLoader {
    type Handle = HtmlImageElement;

    fn load(&self, name: &str) -> Option<HtmlImageElement> {
        let img = HtmlImageElement::new().ok()?;
        img.set_src(&format!("{}/{}.svg", self.base.trim_end_matches('/'), name));
        Some(img)
    }
}
