//! Battery Health card

use gtk4::cairo;

use crate::card::{self, draw_badge, draw_frame, draw_label_value, rounded_rectangle};
use crate::pango_text::{self, show_text, Align};
use devreport_types::format::{battery_color, battery_status_text, temperature_text, voltage_text};
use devreport_types::{palette, BatteryInfo};

const ICON_WIDTH: f64 = 96.0;
const ICON_HEIGHT: f64 = 40.0;
const NUB_WIDTH: f64 = 6.0;

/// Render the battery card. `None` means no battery event has arrived yet.
pub fn render_battery_card(
    cr: &cairo::Context,
    battery: Option<&BatteryInfo>,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let content = draw_frame(cr, "Battery Health", width, height)?;

    let level = battery.map(|b| b.percentage);
    let color = battery_color(level);

    let badge_color = match battery {
        Some(b) if b.is_charging => palette::GREEN,
        Some(_) => palette::SECONDARY,
        None => palette::LOADING,
    };
    draw_badge(
        cr,
        content.x + content.width,
        card::MARGIN + card::PADDING,
        battery_status_text(battery),
        badge_color,
    )?;

    let level_text = level.map_or_else(|| "--".to_string(), |l| format!("{}%", l));
    let hero = show_text(
        cr,
        &level_text,
        pango_text::HERO,
        color,
        content.x,
        content.y,
        Align::Left,
    );

    draw_battery_icon(
        cr,
        content.x + content.width - ICON_WIDTH - NUB_WIDTH,
        content.y + (hero.height - ICON_HEIGHT) / 2.0,
        level,
        color,
    )?;

    let details_y = content.y + hero.height + card::PADDING;
    card::draw_divider(cr, content.x, details_y - card::PADDING / 2.0, content.width)?;

    let (temperature, voltage) = match battery {
        Some(b) => (temperature_text(b.temperature), voltage_text(b.voltage)),
        None => ("--".to_string(), "--".to_string()),
    };
    draw_label_value(cr, content.x, details_y, "Temperature", &temperature, palette::TEXT);
    draw_label_value(
        cr,
        content.x + content.width / 2.0,
        details_y,
        "Voltage",
        &voltage,
        palette::TEXT,
    );

    Ok(())
}

/// Outlined battery with a fill proportional to `level`
fn draw_battery_icon(
    cr: &cairo::Context,
    x: f64,
    y: f64,
    level: Option<u8>,
    color: devreport_types::Color,
) -> Result<(), cairo::Error> {
    rounded_rectangle(cr, x, y, ICON_WIDTH, ICON_HEIGHT, 6.0);
    palette::ICON_OUTLINE.apply_to_cairo(cr);
    cr.set_line_width(2.0);
    cr.stroke()?;

    cr.rectangle(
        x + ICON_WIDTH,
        y + ICON_HEIGHT * 0.3,
        NUB_WIDTH,
        ICON_HEIGHT * 0.4,
    );
    cr.fill()?;

    let fraction = level.map_or(0.0, |l| l as f64 / 100.0);
    let inset = 4.0;
    let fill_w = (ICON_WIDTH - inset * 2.0) * fraction;
    if fill_w > 0.0 {
        rounded_rectangle(
            cr,
            x + inset,
            y + inset,
            fill_w,
            ICON_HEIGHT - inset * 2.0,
            3.0,
        );
        color.apply_to_cairo(cr);
        cr.fill()?;
    }

    Ok(())
}
