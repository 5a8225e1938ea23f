//! Performance card: CPU cores, RAM and storage usage

use gtk4::cairo;

use crate::card::{self, draw_frame, draw_loading, draw_progress_bar, Content};
use crate::pango_text::{self, show_text, Align};
use devreport_types::format::{format_bytes, percent_text};
use devreport_types::{palette, usage_percent, Color, PerformanceInfo};

pub fn render_performance_card(
    cr: &cairo::Context,
    performance: Option<&PerformanceInfo>,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let content = draw_frame(cr, "Performance", width, height)?;

    let Some(info) = performance else {
        draw_loading(cr, content, "Loading Performance Data...");
        return Ok(());
    };

    let label = show_text(
        cr,
        "CPU Cores:",
        pango_text::BODY,
        palette::LABEL,
        content.x,
        content.y,
        Align::Left,
    );
    show_text(
        cr,
        &info.cpu_cores.to_string(),
        pango_text::VALUE,
        palette::TEXT,
        content.x + label.width + 8.0,
        content.y,
        Align::Left,
    );

    let mut y = content.y + label.height + card::PADDING;
    y += draw_usage(
        cr,
        content,
        y,
        "RAM Usage",
        info.used_memory(),
        info.total_memory,
        palette::BLUE,
    )?;
    y += card::PADDING;
    draw_usage(
        cr,
        content,
        y,
        "Storage Usage",
        info.used_storage(),
        info.total_storage,
        palette::ORANGE,
    )?;

    Ok(())
}

/// Label row, bar and `used / total` line; returns the height used
fn draw_usage(
    cr: &cairo::Context,
    content: Content,
    y: f64,
    label: &str,
    used: u64,
    total: u64,
    color: Color,
) -> Result<f64, cairo::Error> {
    let percent = usage_percent(used, total);

    let row = show_text(cr, label, pango_text::BODY, palette::SECONDARY, content.x, y, Align::Left);
    show_text(
        cr,
        &percent_text(percent),
        pango_text::BODY,
        palette::TEXT,
        content.x + content.width,
        y,
        Align::Right,
    );

    let bar_y = y + row.height + 4.0;
    draw_progress_bar(cr, content.x, bar_y, content.width, percent / 100.0, color)?;

    let details_y = bar_y + card::BAR_HEIGHT + 4.0;
    let details = show_text(
        cr,
        &format!("{} / {}", format_bytes(used), format_bytes(total)),
        pango_text::LABEL,
        palette::LABEL,
        content.x,
        details_y,
        Align::Left,
    );

    Ok(details_y + details.height - y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heights;
    use crate::test_surface::context;

    #[test]
    fn test_render_loading_and_data() {
        let cr = context(420, heights::PERFORMANCE);
        let info = PerformanceInfo {
            total_memory: 8_000_000_000,
            available_memory: 2_000_000_000,
            low_memory: false,
            total_storage: 0,
            available_storage: 0,
            cpu_cores: 8,
        };

        render_performance_card(&cr, None, 420.0, heights::PERFORMANCE as f64).unwrap();
        render_performance_card(&cr, Some(&info), 420.0, heights::PERFORMANCE as f64).unwrap();
    }
}
