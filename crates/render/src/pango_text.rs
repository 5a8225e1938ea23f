//! Pango text drawing for the cards
//!
//! Cairo's toy font API keeps growing internal font caches, so all card
//! text goes through Pango layouts instead.

use gtk4::cairo::Context;
use pango::{FontDescription, Weight};
use pangocairo::functions::{create_layout, show_layout};
use std::cell::RefCell;
use std::collections::HashMap;

use devreport_types::Color;

/// Font used by a piece of card text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: &'static str,
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub const fn new(family: &'static str, size: f64, bold: bool) -> Self {
        Self { family, size, bold }
    }
}

pub const TITLE: Font = Font::new("Sans", 16.0, true);
pub const BADGE: Font = Font::new("Sans", 10.0, true);
pub const HERO: Font = Font::new("Sans", 36.0, true);
pub const LABEL: Font = Font::new("Sans", 10.0, false);
pub const VALUE: Font = Font::new("Sans", 13.0, true);
pub const BODY: Font = Font::new("Sans", 12.0, false);

/// Horizontal anchor for [`show_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Logical size of laid-out text in pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

#[derive(Hash, Eq, PartialEq)]
struct FontKey {
    family: &'static str,
    bold: bool,
    size_pango: i32,
}

const MAX_CACHED_FONTS: usize = 32;

thread_local! {
    static FONT_DESC_CACHE: RefCell<HashMap<FontKey, FontDescription>> =
        RefCell::new(HashMap::new());
}

fn font_description(font: Font) -> FontDescription {
    let key = FontKey {
        family: font.family,
        bold: font.bold,
        size_pango: (font.size * pango::SCALE as f64) as i32,
    };

    FONT_DESC_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(desc) = cache.get(&key) {
            return desc.clone();
        }
        if cache.len() >= MAX_CACHED_FONTS {
            log::debug!("Font description cache full, clearing");
            cache.clear();
        }

        let mut desc = FontDescription::new();
        desc.set_family(font.family);
        desc.set_weight(if font.bold { Weight::Bold } else { Weight::Normal });
        desc.set_size(key.size_pango);
        cache.insert(key, desc.clone());
        desc
    })
}

fn layout(cr: &Context, text: &str, font: Font) -> pango::Layout {
    let layout = create_layout(cr);
    layout.set_font_description(Some(&font_description(font)));
    layout.set_text(text);
    layout
}

pub fn text_extents(cr: &Context, text: &str, font: Font) -> TextExtents {
    let (width, height) = layout(cr, text, font).pixel_size();
    TextExtents {
        width: width as f64,
        height: height as f64,
    }
}

/// Draw `text` with its logical box top at `y`, anchored at `x` by `align`.
/// Returns the drawn extents.
pub fn show_text(
    cr: &Context,
    text: &str,
    font: Font,
    color: Color,
    x: f64,
    y: f64,
    align: Align,
) -> TextExtents {
    let layout = layout(cr, text, font);
    let (width, height) = layout.pixel_size();
    let (width, height) = (width as f64, height as f64);

    let left = match align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    };

    color.apply_to_cairo(cr);
    cr.move_to(left, y);
    show_layout(cr, &layout);

    TextExtents { width, height }
}
