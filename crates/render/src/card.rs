//! Shared card chrome: frame, title, bars, label/value pairs

use gtk4::cairo;

use crate::pango_text::{self, show_text, Align};
use devreport_types::{palette, Color};

pub const MARGIN: f64 = 8.0;
pub const PADDING: f64 = 16.0;
pub const CORNER_RADIUS: f64 = 12.0;
pub const BAR_HEIGHT: f64 = 10.0;

/// Inner area of a card, below its title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Content {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn rounded_rectangle(cr: &cairo::Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    let radius = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    let pi = std::f64::consts::PI;

    cr.new_path();
    cr.arc(x + radius, y + radius, radius, pi, 1.5 * pi);
    cr.arc(x + width - radius, y + radius, radius, 1.5 * pi, 0.0);
    cr.arc(x + width - radius, y + height - radius, radius, 0.0, 0.5 * pi);
    cr.arc(x + radius, y + height - radius, radius, 0.5 * pi, pi);
    cr.close_path();
}

/// Paint the window background, the card surface and its title.
///
/// Returns the content area below the title.
pub fn draw_frame(
    cr: &cairo::Context,
    title: &str,
    width: f64,
    height: f64,
) -> Result<Content, cairo::Error> {
    palette::WINDOW_BACKGROUND.apply_to_cairo(cr);
    cr.paint()?;

    let card_w = (width - MARGIN * 2.0).max(1.0);
    let card_h = (height - MARGIN * 2.0).max(1.0);

    rounded_rectangle(cr, MARGIN, MARGIN, card_w, card_h, CORNER_RADIUS);
    palette::CARD_BACKGROUND.apply_to_cairo(cr);
    cr.fill_preserve()?;
    palette::CARD_BORDER.apply_to_cairo(cr);
    cr.set_line_width(1.0);
    cr.stroke()?;

    let x = MARGIN + PADDING;
    let y = MARGIN + PADDING;
    let title_h = show_text(cr, title, pango_text::TITLE, palette::TITLE, x, y, Align::Left).height;
    let top = y + title_h + PADDING * 0.75;

    Ok(Content {
        x,
        y: top,
        width: (card_w - PADDING * 2.0).max(0.0),
        height: (MARGIN + card_h - PADDING - top).max(0.0),
    })
}

/// Centered placeholder text for a card whose snapshot is not set yet
pub fn draw_loading(cr: &cairo::Context, content: Content, text: &str) {
    let extents = pango_text::text_extents(cr, text, pango_text::BODY);
    show_text(
        cr,
        text,
        pango_text::BODY,
        palette::LOADING,
        content.x + content.width / 2.0,
        content.y + (content.height - extents.height) / 2.0,
        Align::Center,
    );
}

/// Rounded horizontal bar filled to `fraction` (clamped to 0..=1)
pub fn draw_progress_bar(
    cr: &cairo::Context,
    x: f64,
    y: f64,
    width: f64,
    fraction: f64,
    color: Color,
) -> Result<(), cairo::Error> {
    let radius = BAR_HEIGHT / 2.0;

    rounded_rectangle(cr, x, y, width, BAR_HEIGHT, radius);
    palette::TRACK.apply_to_cairo(cr);
    cr.fill()?;

    let fill = width * fraction.clamp(0.0, 1.0);
    if fill > 0.0 {
        rounded_rectangle(cr, x, y, fill.max(BAR_HEIGHT), BAR_HEIGHT, radius);
        color.apply_to_cairo(cr);
        cr.fill()?;
    }

    Ok(())
}

/// Small grey label above a bold value; returns the height used
pub fn draw_label_value(
    cr: &cairo::Context,
    x: f64,
    y: f64,
    label: &str,
    value: &str,
    value_color: Color,
) -> f64 {
    let label_h = show_text(cr, label, pango_text::LABEL, palette::LABEL, x, y, Align::Left).height;
    let value_h = show_text(
        cr,
        value,
        pango_text::VALUE,
        value_color,
        x,
        y + label_h + 2.0,
        Align::Left,
    )
    .height;
    label_h + 2.0 + value_h
}

/// Rounded pill with centered text, anchored at its right edge
pub fn draw_badge(
    cr: &cairo::Context,
    right: f64,
    y: f64,
    text: &str,
    color: Color,
) -> Result<(), cairo::Error> {
    let extents = pango_text::text_extents(cr, text, pango_text::BADGE);
    let w = extents.width + 16.0;
    let h = extents.height + 6.0;

    rounded_rectangle(cr, right - w, y, w, h, h / 2.0);
    color.with_alpha(0.2).apply_to_cairo(cr);
    cr.fill()?;

    show_text(cr, text, pango_text::BADGE, color, right - w / 2.0, y + 3.0, Align::Center);
    Ok(())
}

pub fn draw_divider(cr: &cairo::Context, x: f64, y: f64, width: f64) -> Result<(), cairo::Error> {
    palette::CARD_BORDER.apply_to_cairo(cr);
    cr.set_line_width(1.0);
    cr.move_to(x, y.floor() + 0.5);
    cr.line_to(x + width, y.floor() + 0.5);
    cr.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_surface::context;

    #[test]
    fn test_frame_content_is_inside_card() {
        let cr = context(400, 200);
        let content = draw_frame(&cr, "Title", 400.0, 200.0).unwrap();

        assert_eq!(content.x, MARGIN + PADDING);
        assert!(content.y > MARGIN + PADDING);
        assert_eq!(content.width, 400.0 - 2.0 * (MARGIN + PADDING));
        assert!(content.y + content.height <= 200.0 - MARGIN);
    }

    #[test]
    fn test_tiny_frame_does_not_go_negative() {
        let cr = context(10, 10);
        let content = draw_frame(&cr, "Title", 10.0, 10.0).unwrap();
        assert!(content.width >= 0.0);
        assert!(content.height >= 0.0);
    }

    #[test]
    fn test_progress_bar_out_of_range_fraction() {
        let cr = context(200, 20);
        draw_progress_bar(&cr, 0.0, 0.0, 200.0, 1.7, palette::BLUE).unwrap();
        draw_progress_bar(&cr, 0.0, 0.0, 200.0, -0.5, palette::BLUE).unwrap();
    }
}
