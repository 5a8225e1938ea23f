//! Display card: brightness bar and a 2x2 stat grid

use gtk4::cairo;

use crate::card::{self, draw_frame, draw_label_value, draw_loading, draw_progress_bar};
use crate::pango_text::{self, show_text, Align};
use devreport_types::{palette, DisplayInfo};

/// The four grid cells as `(label, value)` pairs, row-major
pub fn stat_cells(info: &DisplayInfo) -> [(&'static str, String); 4] {
    [
        ("Resolution", format!("{} \u{d7} {}", info.width, info.height)),
        ("DPI", info.density_dpi.to_string()),
        ("Screen Size", format!("{:.1}\"", info.screen_size)),
        ("Refresh Rate", format!("{:.0} Hz", info.refresh_rate)),
    ]
}

pub fn brightness_text(info: &DisplayInfo) -> String {
    info.brightness_percent()
        .map_or_else(|| "Unknown".to_string(), |p| format!("{}%", p))
}

pub fn render_display_card(
    cr: &cairo::Context,
    display: Option<&DisplayInfo>,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let content = draw_frame(cr, "Display", width, height)?;

    let Some(info) = display else {
        draw_loading(cr, content, "Loading Display Data...");
        return Ok(());
    };

    let section = show_text(
        cr,
        "Brightness",
        pango_text::BODY,
        palette::SECONDARY,
        content.x,
        content.y,
        Align::Left,
    );
    show_text(
        cr,
        &brightness_text(info),
        pango_text::BODY,
        palette::TEXT,
        content.x + content.width,
        content.y,
        Align::Right,
    );

    let bar_y = content.y + section.height + 4.0;
    let fraction = info.brightness_percent().map_or(0.0, |p| p as f64 / 100.0);
    draw_progress_bar(cr, content.x, bar_y, content.width, fraction, palette::AMBER)?;

    let grid_y = bar_y + card::BAR_HEIGHT + card::PADDING;
    let cell_w = content.width / 2.0;
    let mut row_h = 0.0f64;

    for (i, (label, value)) in stat_cells(info).iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        let y = grid_y + row * (row_h + card::PADDING);
        let used = draw_label_value(cr, content.x + col * cell_w, y, label, value, palette::TEXT);
        row_h = row_h.max(used);
    }

    Ok(())
}
