pub mod locator_handler;

pub use locator_handler::{__path_locate, __path_options, locate, options};
