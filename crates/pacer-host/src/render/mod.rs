pub mod terminal;

use std::io;

use pacer_core::render::Screen;

pub trait ScreenRenderer {
    fn render(&mut self, screen: Screen<'_>) -> io::Result<()>;
}
