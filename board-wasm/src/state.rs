use board_core::{Board, Palette};
use web_sys::{HtmlImageElement, HtmlInputElement};

use crate::canvas::{CanvasSurface, ImageElementLoader};

/// Runtime state shared between the DOM callbacks through `Rc<RefCell<_>>`.
pub struct State {
    pub light_input: HtmlInputElement,
    pub dark_input: HtmlInputElement,
    pub surface: CanvasSurface,
    pub loader: ImageElementLoader,
    pub board: Board<HtmlImageElement>,
}

impl State {
    /// Current values of the two color inputs.
    pub fn read_palette(&self) -> Palette {
        read_palette(&self.light_input, &self.dark_input)
    }

    pub fn draw(&mut self) {
        self.board.draw(&mut self.surface, &self.loader);
    }

    /// Re-read both inputs and repaint.
    pub fn update(&mut self) {
        let palette = self.read_palette();
        self.board.update(palette, &mut self.surface, &self.loader);
    }
}

pub fn read_palette(light: &HtmlInputElement, dark: &HtmlInputElement) -> Palette {
    Palette::new(light.value(), dark.value())
}
