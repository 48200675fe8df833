mod help;
mod util;

pub use help::render_help_overlay;
