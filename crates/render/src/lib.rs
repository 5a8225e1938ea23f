//! devreport-render: Cairo renderers for the four dashboard cards.
//!
//! Each `render_*_card` function paints a complete card into the given
//! width and height. A `None` snapshot draws the card's loading state.

pub mod battery_card;
pub mod card;
pub mod device_card;
pub mod display_card;
pub mod pango_text;
pub mod performance_card;

pub use battery_card::render_battery_card;
pub use device_card::render_device_card;
pub use display_card::render_display_card;
pub use performance_card::render_performance_card;

/// Preferred heights for each card's drawing area
pub mod heights {
    pub const BATTERY: i32 = 220;
    pub const PERFORMANCE: i32 = 250;
    pub const DISPLAY: i32 = 270;
    pub const DEVICE: i32 = 200;
}

#[cfg(test)]
pub(crate) mod test_surface {
    use gtk4::cairo;

    /// Offscreen ARGB surface for render smoke tests
    pub fn context(width: i32, height: i32) -> cairo::Context {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        cairo::Context::new(&surface).unwrap()
    }
}
