//! Device Information card

use gtk4::cairo;

use crate::card::{self, draw_divider, draw_frame, draw_loading};
use crate::pango_text::{self, show_text, Align};
use devreport_types::{palette, DeviceInfo};

pub fn render_device_card(
    cr: &cairo::Context,
    device: Option<&DeviceInfo>,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let content = draw_frame(cr, "Device Information", width, height)?;

    let Some(info) = device else {
        draw_loading(cr, content, "Loading device info...");
        return Ok(());
    };

    let rows = [
        ("Brand", info.brand.as_str()),
        ("Model", info.model.as_str()),
        ("OS Version", info.os_version.as_str()),
    ];

    let mut y = content.y;
    for (i, (label, value)) in rows.iter().enumerate() {
        if i > 0 {
            draw_divider(cr, content.x, y, content.width)?;
            y += card::PADDING / 2.0;
        }

        let label_h = show_text(
            cr,
            label,
            pango_text::BODY,
            palette::LABEL,
            content.x,
            y,
            Align::Left,
        )
        .height;
        let value_h = show_text(
            cr,
            value,
            pango_text::VALUE,
            palette::TEXT,
            content.x + content.width,
            y,
            Align::Right,
        )
        .height;

        y += label_h.max(value_h) + card::PADDING / 2.0;
    }

    Ok(())
}
