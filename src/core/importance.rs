use crate::error::{Result, SegmentError};
use crate::SegmentKind;
use serde::{Deserialize, Serialize};

/// Weight assigned to each segment kind, with subtitles split by depth.
///
/// Recognized keys: `title`, `subtitle_l2`, `subtitle_l3plus`, `paragraph`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportanceTable {
    pub title: f64,
    pub subtitle_l2: f64,
    pub subtitle_l3plus: f64,
    pub paragraph: f64,
}

impl Default for ImportanceTable {
    fn default() -> Self {
        Self {
            title: 2.0,
            subtitle_l2: 1.8,
            subtitle_l3plus: 1.6,
            paragraph: 1.0,
        }
    }
}

impl ImportanceTable {
    pub const KEYS: [&'static str; 4] = ["title", "subtitle_l2", "subtitle_l3plus", "paragraph"];

    /// Weights of the older title/subtitle scheme (1.0 / 0.8).
    pub fn legacy() -> Self {
        Self {
            title: 1.0,
            subtitle_l2: 0.8,
            subtitle_l3plus: 0.8,
            paragraph: 1.0,
        }
    }

    /// Weight for a segment of `kind` at heading `level`.
    pub fn weight(&self, kind: SegmentKind, level: Option<u8>) -> f64 {
        match kind {
            SegmentKind::Title => self.title,
            SegmentKind::Subtitle => match level {
                Some(l) if l >= 3 => self.subtitle_l3plus,
                _ => self.subtitle_l2,
            },
            SegmentKind::Paragraph => self.paragraph,
        }
    }

    /// Weight for a heading level; level 0 has no kind and falls back to paragraph.
    pub fn for_level(&self, level: u8) -> f64 {
        match SegmentKind::from_level(level) {
            Some(kind) => self.weight(kind, Some(level)),
            None => self.paragraph,
        }
    }

    /// Override one entry by its key.
    pub fn set(&mut self, key: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(SegmentError::InvalidConfig(format!(
                "importance '{}' must be finite, got {}",
                key, value
            )));
        }
        match key {
            "title" => self.title = value,
            "subtitle_l2" => self.subtitle_l2 = value,
            "subtitle_l3plus" => self.subtitle_l3plus = value,
            "paragraph" => self.paragraph = value,
            other => {
                return Err(SegmentError::InvalidConfig(format!(
                    "unknown importance key '{}', expected one of {:?}",
                    other,
                    Self::KEYS
                )))
            }
        }
        Ok(())
    }

    /// Parse a `key=value` override, as given on the command line.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            SegmentError::InvalidConfig(format!("expected key=value, got '{}'", assignment))
        })?;
        let value: f64 = value.trim().parse().map_err(|_| {
            SegmentError::InvalidConfig(format!("importance '{}' is not a number", value.trim()))
        })?;
        self.set(key.trim(), value)
    }

    pub fn validate(&self) -> Result<()> {
        let entries = [self.title, self.subtitle_l2, self.subtitle_l3plus, self.paragraph];
        for (key, value) in Self::KEYS.iter().zip(entries) {
            if !value.is_finite() {
                return Err(SegmentError::InvalidConfig(format!(
                    "importance '{}' must be finite",
                    key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Vec<ImportanceTable> {
        vec![ImportanceTable::default(), ImportanceTable::legacy()]
    }

    #[test]
    fn test_weight_follows_configured_table() {
        for table in tables() {
            assert_eq!(table.weight(SegmentKind::Title, Some(1)), table.title);
            assert_eq!(table.weight(SegmentKind::Subtitle, Some(2)), table.subtitle_l2);
            assert_eq!(table.weight(SegmentKind::Subtitle, Some(3)), table.subtitle_l3plus);
            assert_eq!(table.weight(SegmentKind::Subtitle, Some(9)), table.subtitle_l3plus);
            assert_eq!(table.weight(SegmentKind::Paragraph, None), table.paragraph);
        }
    }

    #[test]
    fn test_default_table_values() {
        let table = ImportanceTable::default();
        assert_eq!(table.for_level(1), 2.0);
        assert_eq!(table.for_level(2), 1.8);
        assert_eq!(table.for_level(4), 1.6);
    }

    #[test]
    fn test_apply_override() {
        let mut table = ImportanceTable::default();
        table.apply_override("subtitle_l2 = 1.25").unwrap();
        assert_eq!(table.subtitle_l2, 1.25);
        assert_eq!(table.title, 2.0);
    }

    #[test]
    fn test_override_rejects_unknown_key_and_bad_value() {
        let mut table = ImportanceTable::default();
        assert!(matches!(
            table.apply_override("heading=3"),
            Err(SegmentError::InvalidConfig(_))
        ));
        assert!(table.apply_override("title").is_err());
        assert!(table.apply_override("title=abc").is_err());
        assert!(table.set("title", f64::NAN).is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let table: ImportanceTable = serde_json::from_str(r#"{"title": 5.0}"#).unwrap();
        assert_eq!(table.title, 5.0);
        assert_eq!(table.paragraph, 1.0);
        assert!(serde_json::from_str::<ImportanceTable>(r#"{"heading": 1.0}"#).is_err());
    }
}
