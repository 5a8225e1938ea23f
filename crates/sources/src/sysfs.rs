//! Small helpers for reading sysfs/procfs attribute files

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read an attribute file and trim whitespace and trailing NULs
pub(crate) fn read_trimmed(path: &Path) -> Result<String> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = String::from_utf8_lossy(&raw);
    Ok(text.trim_matches(|c: char| c.is_whitespace() || c == '\0').to_string())
}

/// Like [`read_trimmed`] but treats missing or empty files as `None`
pub(crate) fn read_optional(path: &Path) -> Option<String> {
    read_trimmed(path).ok().filter(|s| !s.is_empty())
}

pub(crate) fn read_parsed<T: std::str::FromStr>(path: &Path) -> Option<T> {
    read_optional(path)?.parse().ok()
}

/// Parse a power-supply `uevent` file into `KEY -> value`, with the
/// `POWER_SUPPLY_` prefix stripped.
pub(crate) fn parse_uevent(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim();
            let key = key.strip_prefix("POWER_SUPPLY_").unwrap_or(key);
            (key.to_string(), value.trim().to_string())
        })
        .collect()
}

/// Entries of a class directory, sorted by name for stable selection
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Throwaway directory tree standing in for /sys
    pub struct TempTree {
        root: PathBuf,
    }

    impl TempTree {
        pub fn new() -> Self {
            let root = std::env::temp_dir().join(format!("devreport-{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&root).unwrap();
            Self { root }
        }

        pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> &Self {
            let path = self.root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
            self
        }

        pub fn mkdir(&self, relative: &str) -> &Self {
            fs::create_dir_all(self.root.join(relative)).unwrap();
            self
        }

        pub fn path(&self) -> &Path {
            &self.root
        }

        pub fn join(&self, relative: &str) -> String {
            self.root.join(relative).to_string_lossy().to_string()
        }
    }

    impl Drop for TempTree {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::TempTree;
    use super::*;

    #[test]
    fn test_parse_uevent() {
        let map = parse_uevent(
            "POWER_SUPPLY_NAME=BAT0\nPOWER_SUPPLY_STATUS=Not charging\nPOWER_SUPPLY_CAPACITY=87\n",
        );
        assert_eq!(map.get("NAME").map(String::as_str), Some("BAT0"));
        assert_eq!(map.get("STATUS").map(String::as_str), Some("Not charging"));
        assert_eq!(map.get("CAPACITY").map(String::as_str), Some("87"));
    }

    #[test]
    fn test_read_trimmed_strips_nul() {
        let tree = TempTree::new();
        tree.write("model", b"Raspberry Pi 4 Model B\0");
        assert_eq!(
            read_trimmed(&tree.path().join("model")).unwrap(),
            "Raspberry Pi 4 Model B"
        );
    }

    #[test]
    fn test_read_optional_missing_and_empty() {
        let tree = TempTree::new();
        tree.write("empty", "\n");
        assert!(read_optional(&tree.path().join("empty")).is_none());
        assert!(read_optional(&tree.path().join("missing")).is_none());
        assert_eq!(read_parsed::<u32>(&tree.path().join("missing")), None);
    }
}
