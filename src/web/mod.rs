// Browser content-script host (WASM only)

pub mod console;
pub mod container;
pub mod content_script;

pub use console::init_console_logging;
pub use container::DomContainer;
pub use content_script::{launch, stop_stream, ContentScript};
