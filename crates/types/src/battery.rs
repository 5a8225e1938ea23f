//! Battery change events and the record derived from them

use serde::{Deserialize, Serialize};

/// Charge state reported by the power supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BatteryStatus {
    #[default]
    Unknown,
    Charging,
    Discharging,
    NotCharging,
    Full,
}

impl BatteryStatus {
    /// Parse the kernel's `POWER_SUPPLY_STATUS` text
    pub fn from_sysfs(value: &str) -> Self {
        match value.trim() {
            "Charging" => BatteryStatus::Charging,
            "Discharging" => BatteryStatus::Discharging,
            "Not charging" => BatteryStatus::NotCharging,
            "Full" => BatteryStatus::Full,
            _ => BatteryStatus::Unknown,
        }
    }

    /// Charging or full counts as "plugged in"
    pub fn is_charging(&self) -> bool {
        matches!(self, BatteryStatus::Charging | BatteryStatus::Full)
    }
}

/// One raw battery-change event, before any derivation.
///
/// `level`/`scale` are the integer charge ratio; `temperature` is in tenths
/// of a degree Celsius (-1 when the platform does not report it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBatteryEvent {
    pub level: i64,
    pub scale: i64,
    pub status: BatteryStatus,
    pub temperature: i32,
    /// Volts, when the platform reports it
    pub voltage: Option<f64>,
}

/// Battery snapshot pushed to the subscriber on every change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryInfo {
    /// 0 to 100
    pub percentage: u8,
    pub is_charging: bool,
    /// Degrees Celsius
    pub temperature: f64,
    pub voltage: Option<f64>,
}

impl BatteryInfo {
    /// Derive a record from a raw event. Malformed events yield `None`.
    pub fn from_event(event: &RawBatteryEvent) -> Option<Self> {
        if event.level < 0 || event.scale <= 0 {
            return None;
        }

        let ratio = event.level as f64 * 100.0 / event.scale as f64;
        let percentage = ratio.round().clamp(0.0, 100.0) as u8;

        Some(Self {
            percentage,
            is_charging: event.status.is_charging(),
            temperature: event.temperature as f64 / 10.0,
            voltage: event.voltage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event(level: i64, scale: i64, status: BatteryStatus, temperature: i32) -> RawBatteryEvent {
        RawBatteryEvent {
            level,
            scale,
            status,
            temperature,
            voltage: None,
        }
    }

    #[test]
    fn test_charging_event() {
        let info = BatteryInfo::from_event(&event(45, 100, BatteryStatus::Charging, 215)).unwrap();
        assert_eq!(info.percentage, 45);
        assert!(info.is_charging);
        assert_eq!(info.temperature, 21.5);
    }

    #[test]
    fn test_malformed_events_are_dropped() {
        assert!(BatteryInfo::from_event(&event(-1, 100, BatteryStatus::Full, 0)).is_none());
        assert!(BatteryInfo::from_event(&event(50, 0, BatteryStatus::Full, 0)).is_none());
        assert!(BatteryInfo::from_event(&event(50, -5, BatteryStatus::Full, 0)).is_none());
    }

    #[test]
    fn test_percentage_rounds() {
        // 2/3 -> 66.67%
        let info = BatteryInfo::from_event(&event(2, 3, BatteryStatus::Unknown, 0)).unwrap();
        assert_eq!(info.percentage, 67);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(BatteryStatus::from_sysfs("Not charging\n"), BatteryStatus::NotCharging);
        assert_eq!(BatteryStatus::from_sysfs("Full"), BatteryStatus::Full);
        assert_eq!(BatteryStatus::from_sysfs("bogus"), BatteryStatus::Unknown);
    }

    #[test]
    fn test_serializes_camel_case() {
        let info = BatteryInfo::from_event(&event(45, 100, BatteryStatus::Charging, 215)).unwrap();
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"isCharging\":true"));
    }

    fn any_status() -> impl Strategy<Value = BatteryStatus> {
        prop_oneof![
            Just(BatteryStatus::Unknown),
            Just(BatteryStatus::Charging),
            Just(BatteryStatus::Discharging),
            Just(BatteryStatus::NotCharging),
            Just(BatteryStatus::Full),
        ]
    }

    proptest! {
        #[test]
        fn percentage_stays_in_range(scale in 1i64..10_000, frac in 0.0f64..=1.0) {
            let level = (scale as f64 * frac) as i64;
            let info = BatteryInfo::from_event(&event(level, scale, BatteryStatus::Unknown, 0)).unwrap();
            prop_assert!(info.percentage <= 100);
        }

        #[test]
        fn charging_matches_status(status in any_status()) {
            let info = BatteryInfo::from_event(&event(10, 100, status, 0)).unwrap();
            let expected = matches!(status, BatteryStatus::Charging | BatteryStatus::Full);
            prop_assert_eq!(info.is_charging, expected);
        }

        #[test]
        fn temperature_is_tenths(raw in any::<i32>()) {
            let info = BatteryInfo::from_event(&event(1, 1, BatteryStatus::Unknown, raw)).unwrap();
            prop_assert_eq!(info.temperature, raw as f64 / 10.0);
        }
    }
}
