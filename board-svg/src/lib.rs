//! Off-screen board rendering: SVG document output, rasterization and PNG
//! encoding.

use std::fmt::Write as _;
use std::path::Path;

use board_core::{Board, ImageLoader, Surface};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),

    #[error("PNG encode error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("pixmap alloc failed for {0}x{0}")]
    Pixmap(u32),
}

/// Resolves a piece name to an image reference, `<base>/<name>.svg`.
pub struct HrefLoader {
    pub base: String,
}

impl ImageLoader for HrefLoader {
    type Handle = String;

    fn load(&self, name: &str) -> Option<String> {
        let base = self.base.trim_end_matches('/');
        if base.is_empty() {
            Some(format!("{name}.svg"))
        } else {
            Some(format!("{base}/{name}.svg"))
        }
    }
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Surface that accumulates SVG elements.
pub struct SvgSurface {
    width: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64) -> Self {
        SvgSurface {
            width,
            body: String::new(),
        }
    }

    /// Wrap the drawn elements into a complete document.
    pub fn finish(self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{w}\" viewBox=\"0 0 {w} {w}\">",
            w = self.width
        );
        s.push_str(&self.body);
        s.push_str("</svg>\n");
        s
    }
}

impl Surface for SvgSurface {
    type Image = String;

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{}\" shape-rendering=\"crispEdges\"/>",
            svg_escape(color)
        );
    }

    fn draw_image(&mut self, image: &String, x: f64, y: f64, w: f64, h: f64) {
        let _ = writeln!(
            self.body,
            "<image xlink:href=\"{}\" x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\"/>",
            svg_escape(image)
        );
    }
}

/// Draw `board` into a standalone SVG document.
pub fn render_svg(board: &mut Board<String>, loader: &HrefLoader) -> String {
    let mut surface = SvgSurface::new(board.width());
    board.draw(&mut surface, loader);
    surface.finish()
}

/// Rasterize an SVG document. Relative image references resolve against
/// `resources_dir`; missing images are skipped by the renderer.
pub fn rasterize(
    svg: &str,
    resources_dir: Option<&Path>,
) -> Result<tiny_skia::Pixmap, RenderError> {
    let opt = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or(RenderError::Pixmap(size.width()))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

// Shared PNG encoder: RGBA -> PNG bytes (deterministic for same input)
pub fn encode_rgba_to_png_bytes(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf)
}

/// SVG -> PNG in one step.
pub fn render_png(svg: &str, resources_dir: Option<&Path>) -> Result<Vec<u8>, RenderError> {
    let pixmap = rasterize(svg, resources_dir)?;
    Ok(encode_rgba_to_png_bytes(
        pixmap.width(),
        pixmap.height(),
        pixmap.data(),
    )?)
}
