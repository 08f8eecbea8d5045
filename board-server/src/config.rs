use std::net::SocketAddr;
use std::path::PathBuf;

use board_core::{DEFAULT_DARK, DEFAULT_LIGHT, Palette};
use clap::Parser;

/// Serve the chessboard page and its static assets.
#[derive(Parser, Debug, Clone)]
#[command(name = "board-server", version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// Directory containing index.html; the built-in page is used when absent
    #[arg(long, env = "BOARD_WEB_DIR", default_value = "web")]
    pub web_dir: PathBuf,

    /// Directory served under /images
    #[arg(long, env = "BOARD_IMAGES_DIR", default_value = "images")]
    pub images_dir: PathBuf,

    /// wasm-pack output served under /pkg
    #[arg(long, env = "BOARD_PKG_DIR", default_value = "board-wasm/pkg")]
    pub pkg_dir: PathBuf,

    /// Initial light square color written into the page
    #[arg(long, default_value = DEFAULT_LIGHT)]
    pub light: String,

    /// Initial dark square color written into the page
    #[arg(long, default_value = DEFAULT_DARK)]
    pub dark: String,

    /// Canvas edge in pixels
    #[arg(long, default_value_t = 600)]
    pub canvas_size: u32,
}

impl Config {
    pub fn palette(&self) -> Palette {
        Palette::new(self.light.clone(), self.dark.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_8080() {
        let cfg = Config::parse_from(["board-server"]);
        assert_eq!(cfg.addr.port(), 8080);
        assert_eq!(cfg.palette(), Palette::default());
        assert_eq!(cfg.canvas_size, 600);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::parse_from([
            "board-server",
            "--addr",
            "127.0.0.1:9000",
            "--light",
            "#eeeeee",
            "--canvas-size",
            "480",
        ]);
        assert_eq!(cfg.addr.to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.light, "#eeeeee");
        assert_eq!(cfg.canvas_size, 480);
    }
}
