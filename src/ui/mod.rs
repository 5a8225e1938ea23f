//! GTK presentation: the main window and its four card areas

mod main_window;

pub use main_window::{load_css, MainWindow};
