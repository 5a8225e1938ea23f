//! Minimal EDID parsing: physical size and preferred timing

const HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
const BASE_BLOCK_LEN: usize = 128;
const FIRST_DESCRIPTOR: usize = 54;

/// Preferred timing from the first detailed timing descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DetailedTiming {
    pub pixel_clock_hz: u64,
    pub h_active: u32,
    pub h_blank: u32,
    pub v_active: u32,
    pub v_blank: u32,
    pub width_mm: u32,
    pub height_mm: u32,
}

impl DetailedTiming {
    pub fn refresh_rate(&self) -> Option<f64> {
        let total = (self.h_active + self.h_blank) as u64 * (self.v_active + self.v_blank) as u64;
        (total > 0 && self.pixel_clock_hz > 0)
            .then(|| self.pixel_clock_hz as f64 / total as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edid {
    /// From the basic display parameters block; 0 means unknown/projector
    pub width_cm: u32,
    pub height_cm: u32,
    pub timing: Option<DetailedTiming>,
}

impl Edid {
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < BASE_BLOCK_LEN || bytes[..8] != HEADER {
            return None;
        }

        Some(Self {
            width_cm: bytes[21] as u32,
            height_cm: bytes[22] as u32,
            timing: parse_detailed_timing(&bytes[FIRST_DESCRIPTOR..FIRST_DESCRIPTOR + 18]),
        })
    }

    /// Physical size in millimetres, preferring the detailed descriptor
    pub fn physical_size_mm(&self) -> Option<(f64, f64)> {
        if let Some(t) = self.timing {
            if t.width_mm > 0 && t.height_mm > 0 {
                return Some((t.width_mm as f64, t.height_mm as f64));
            }
        }
        (self.width_cm > 0 && self.height_cm > 0)
            .then(|| (self.width_cm as f64 * 10.0, self.height_cm as f64 * 10.0))
    }
}

fn parse_detailed_timing(d: &[u8]) -> Option<DetailedTiming> {
    let clock = u16::from_le_bytes([d[0], d[1]]) as u64;
    // A zero pixel clock marks a display descriptor, not a timing
    if clock == 0 {
        return None;
    }

    let hi = |byte: u8, shift: u8| ((byte >> shift) & 0x0F) as u32;
    Some(DetailedTiming {
        pixel_clock_hz: clock * 10_000,
        h_active: d[2] as u32 | hi(d[4], 4) << 8,
        h_blank: d[3] as u32 | hi(d[4], 0) << 8,
        v_active: d[5] as u32 | hi(d[7], 4) << 8,
        v_blank: d[6] as u32 | hi(d[7], 0) << 8,
        width_mm: d[12] as u32 | hi(d[14], 4) << 8,
        height_mm: d[13] as u32 | hi(d[14], 0) << 8,
    })
}
