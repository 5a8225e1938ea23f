//! Derived text and colors shown on the cards

use crate::battery::BatteryInfo;
use crate::color::{palette, Color};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable byte count with 1024-based units.
///
/// Two decimals at most, trailing zeros dropped: `1536` -> `"1.5 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let k = 1024f64;
    let value = bytes as f64;
    let index = ((value.ln() / k.ln()).floor() as usize).min(BYTE_UNITS.len() - 1);
    let scaled = value / k.powi(index as i32);

    format!("{} {}", trim_decimals(scaled, 2), BYTE_UNITS[index])
}

/// Fixed-precision rendering without trailing zeros
fn trim_decimals(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Level color: red at or below 20%, amber at or below 50%, green above
pub fn battery_color(level: Option<u8>) -> Color {
    match level {
        None => palette::GREY,
        Some(l) if l <= 20 => palette::RED,
        Some(l) if l <= 50 => palette::AMBER,
        Some(_) => palette::GREEN,
    }
}

pub fn battery_status_text(battery: Option<&BatteryInfo>) -> &'static str {
    match battery {
        None => "Reading...",
        Some(b) if b.is_charging => "Charging \u{26a1}\u{fe0f}",
        Some(b) if b.percentage == 100 => "Fully Charged",
        Some(_) => "Discharging",
    }
}

pub fn temperature_text(celsius: f64) -> String {
    format!("{:.1}\u{b0}C", celsius)
}

pub fn voltage_text(voltage: Option<f64>) -> String {
    match voltage {
        Some(v) => format!("{:.2} V", v),
        None => "--".to_string(),
    }
}

pub fn percent_text(percent: f64) -> String {
    format!("{}%", percent.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(8_000_000_000), "7.45 GB");
    }

    #[test]
    fn test_format_bytes_caps_at_tb() {
        assert_eq!(format_bytes(1024u64.pow(5)), "1024 TB");
    }

    #[test]
    fn test_battery_color_thresholds() {
        assert_eq!(battery_color(None), palette::GREY);
        assert_eq!(battery_color(Some(20)), palette::RED);
        assert_eq!(battery_color(Some(21)), palette::AMBER);
        assert_eq!(battery_color(Some(50)), palette::AMBER);
        assert_eq!(battery_color(Some(51)), palette::GREEN);
    }

    #[test]
    fn test_status_text() {
        let mut info = BatteryInfo {
            percentage: 100,
            is_charging: false,
            temperature: 25.0,
            voltage: None,
        };
        assert_eq!(battery_status_text(None), "Reading...");
        assert_eq!(battery_status_text(Some(&info)), "Fully Charged");
        info.is_charging = true;
        assert_eq!(battery_status_text(Some(&info)), "Charging \u{26a1}\u{fe0f}");
        info.is_charging = false;
        info.percentage = 40;
        assert_eq!(battery_status_text(Some(&info)), "Discharging");
    }

    #[test]
    fn test_detail_text() {
        assert_eq!(temperature_text(21.5), "21.5\u{b0}C");
        assert_eq!(voltage_text(Some(4.2)), "4.20 V");
        assert_eq!(voltage_text(None), "--");
        assert_eq!(percent_text(74.6), "75%");
    }
}
