//! Library scanning: turns a directory tree into the ordered catalog shown on
//! the library screen.

mod display;
mod model;
mod scan;

pub use display::display_name;
pub use model::Track;
pub use scan::scan;
