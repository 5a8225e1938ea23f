//! Main application window

use crate::dashboard::DashboardState;
use devreport_core::constants::REDRAW_CHECK_INTERVAL;
use devreport_render::{
    heights, render_battery_card, render_device_card, render_display_card,
    render_performance_card,
};
use gtk4::gdk::Display;
use gtk4::prelude::*;
use gtk4::{cairo, glib};
use gtk4::{Box as GtkBox, CssProvider, DrawingArea, Label, Orientation, ScrolledWindow, Widget};
use std::cell::Cell;
use std::sync::Arc;

const CSS: &str = "
    window {
        background-color: #121212;
    }

    .app-title {
        color: #FFFFFF;
        font-size: 22px;
        font-weight: bold;
        margin: 16px 16px 4px 16px;
    }

    drawingarea {
        border-radius: 0;
    }
";

/// Install the dark stylesheet on the default display
pub fn load_css() {
    let Some(display) = Display::default() else {
        log::warn!("No display available, skipping stylesheet");
        return;
    };

    let provider = CssProvider::new();
    provider.load_from_data(CSS);
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

/// Title plus a scrolling column of card areas
pub struct MainWindow {
    container: GtkBox,
    cards: Vec<DrawingArea>,
}

impl MainWindow {
    pub fn new(state: Arc<DashboardState>) -> Self {
        let container = GtkBox::new(Orientation::Vertical, 0);

        let title = Label::new(Some("Device Report"));
        title.add_css_class("app-title");
        title.set_halign(gtk4::Align::Start);
        container.append(&title);

        let cards = vec![
            {
                let state = state.clone();
                card_area(heights::BATTERY, move |cr, w, h| {
                    render_battery_card(cr, state.battery.load().as_deref(), w, h)
                })
            },
            {
                let state = state.clone();
                card_area(heights::PERFORMANCE, move |cr, w, h| {
                    render_performance_card(cr, state.performance.load().as_deref(), w, h)
                })
            },
            {
                let state = state.clone();
                card_area(heights::DISPLAY, move |cr, w, h| {
                    render_display_card(cr, state.display.load().as_deref(), w, h)
                })
            },
            {
                let state = state.clone();
                card_area(heights::DEVICE, move |cr, w, h| {
                    render_device_card(cr, state.device.load().as_deref(), w, h)
                })
            },
        ];

        let column = GtkBox::new(Orientation::Vertical, 0);
        column.set_margin_start(8);
        column.set_margin_end(8);
        column.set_margin_bottom(8);
        for card in &cards {
            column.append(card);
        }

        let scrolled_window = ScrolledWindow::new();
        scrolled_window.set_policy(gtk4::PolicyType::Never, gtk4::PolicyType::Automatic);
        scrolled_window.set_vexpand(true);
        scrolled_window.set_child(Some(&column));
        container.append(&scrolled_window);

        let window = Self { container, cards };
        window.start_redraw_timer(state);
        window
    }

    pub fn widget(&self) -> Widget {
        self.container.clone().upcast()
    }

    /// Queue a redraw of every card whenever a snapshot changes.
    /// The timer ends once the cards are gone.
    fn start_redraw_timer(&self, state: Arc<DashboardState>) {
        let cards: Vec<_> = self.cards.iter().map(|card| card.downgrade()).collect();
        let last_version = Cell::new(state.version());

        glib::timeout_add_local(REDRAW_CHECK_INTERVAL, move || {
            let version = state.version();
            if version == last_version.get() {
                return glib::ControlFlow::Continue;
            }
            last_version.set(version);

            let mut alive = false;
            for card in cards.iter().filter_map(|weak| weak.upgrade()) {
                card.queue_draw();
                alive = true;
            }

            if alive {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
    }
}

/// Drawing area of fixed height whose draw function renders one card
fn card_area<R>(height: i32, render: R) -> DrawingArea
where
    R: Fn(&cairo::Context, f64, f64) -> Result<(), cairo::Error> + 'static,
{
    let area = DrawingArea::new();
    area.set_content_height(height);
    area.set_hexpand(true);
    area.set_draw_func(move |_, cr, width, height| {
        if let Err(e) = render(cr, width as f64, height as f64) {
            log::debug!("Card render failed: {}", e);
        }
    });
    area
}
