//! Output filename resolution.
//!
//! Two-phase string rewrite, kept pure so it is testable apart from file
//! I/O: placeholder substitution first, then strftime expansion against the
//! file's epoch start in the local time zone. Deterministic for identical
//! inputs; avoiding collisions across restarts is the template's problem.

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::error::WriterError;

/// Core-identifier placeholder, expanded zero-padded to 2 digits.
pub const CORE_ID_TOKEN: &str = "%COREID";
/// Rotation sequence placeholder, expanded zero-padded to 3 digits.
pub const FILE_SEQ_TOKEN: &str = "%FCOUNT";

/// Longest path the resolver will produce.
pub const MAX_PATH_LENGTH: usize = 4096;

/// Expands `template` into a concrete output path.
///
/// Substitutes every `%COREID` and `%FCOUNT` occurrence, then interprets
/// the remainder as a strftime pattern anchored to `epoch_start`.
pub fn resolve(
    template: &str,
    core_id: u32,
    file_seq: u32,
    epoch_start: SystemTime,
) -> Result<PathBuf, WriterError> {
    let pattern = template
        .replace(CORE_ID_TOKEN, &format!("{:02}", core_id))
        .replace(FILE_SEQ_TOKEN, &format!("{:03}", file_seq));

    let items: Vec<Item> = StrftimeItems::new(&pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(WriterError::PathFormat(format!(
            "invalid time format specifier in template '{}'",
            template
        )));
    }

    let timestamp: DateTime<Local> = DateTime::from(epoch_start);
    let path = timestamp.format_with_items(items.into_iter()).to_string();

    if path.len() > MAX_PATH_LENGTH {
        return Err(WriterError::PathFormat(format!(
            "expanded path exceeds {} bytes",
            MAX_PATH_LENGTH
        )));
    }

    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn noon() -> SystemTime {
        Local
            .with_ymd_and_hms(2024, 3, 15, 12, 30, 45)
            .unwrap()
            .into()
    }

    #[test]
    fn substitutes_and_pads_tokens() {
        let path = resolve("cap_%COREID_%FCOUNT.pcap.zst", 7, 42, noon()).unwrap();
        assert_eq!(path, PathBuf::from("cap_07_042.pcap.zst"));
    }

    #[test]
    fn substitutes_repeated_tokens() {
        let path = resolve("%COREID/%COREID_%FCOUNT", 3, 1, noon()).unwrap();
        assert_eq!(path, PathBuf::from("03/03_001"));
    }

    #[test]
    fn expands_time_pattern_against_epoch_start() {
        let path = resolve("cap_%Y%m%d_%H%M%S_%FCOUNT.pcap.zst", 0, 0, noon()).unwrap();
        assert_eq!(path, PathBuf::from("cap_20240315_123045_000.pcap.zst"));
    }

    #[test]
    fn rejects_invalid_time_specifier() {
        assert!(matches!(
            resolve("cap_%Q.pcap.zst", 0, 0, noon()),
            Err(WriterError::PathFormat(_))
        ));
    }

    #[test]
    fn rejects_over_length_expansion() {
        let template = "x".repeat(MAX_PATH_LENGTH + 1);
        assert!(matches!(
            resolve(&template, 0, 0, noon()),
            Err(WriterError::PathFormat(_))
        ));
    }

    proptest! {
        #[test]
        fn deterministic_for_identical_inputs(core_id in 0u32..64, file_seq in 0u32..1000) {
            let a = resolve("cap_%COREID_%FCOUNT_%Y%m%d.pcap.zst", core_id, file_seq, noon()).unwrap();
            let b = resolve("cap_%COREID_%FCOUNT_%Y%m%d.pcap.zst", core_id, file_seq, noon()).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn padding_is_fixed_width_for_small_values(core_id in 0u32..100, file_seq in 0u32..1000) {
            let path = resolve("%COREID-%FCOUNT", core_id, file_seq, noon()).unwrap();
            let s = path.to_string_lossy().into_owned();
            let (core_part, seq_part) = s.split_once('-').unwrap();
            prop_assert_eq!(core_part.len(), 2);
            prop_assert_eq!(seq_part.len(), 3);
        }
    }
}
