use std::collections::HashSet;

use lottery_logging::lottery_warn;

use crate::DrawError;

/// Maximum number of duplicate names carried in a [`DuplicateNamesDetected`] preview.
pub const DUPLICATE_PREVIEW_LIMIT: usize = 5;

/// Notification that the pasted list contained repeated names.
///
/// Parsing still succeeds; only the first occurrence of each name is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateNamesDetected {
    /// Up to [`DUPLICATE_PREVIEW_LIMIT`] distinct duplicated names, in first-seen order.
    pub preview: Vec<String>,
    /// Number of distinct names that occurred more than once.
    pub total: usize,
}

impl DuplicateNamesDetected {
    /// Human readable summary, e.g. `2 duplicate names removed: Ann, Bob`.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} duplicate name{} removed: {}",
            self.total,
            if self.total == 1 { "" } else { "s" },
            self.preview.join(", ")
        );
        if self.total > self.preview.len() {
            text.push_str(&format!(" and {} more", self.total - self.preview.len()));
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNames {
    pub names: Vec<String>,
    pub duplicates: Option<DuplicateNamesDetected>,
}

/// Parses pasted text (one name per line) into a deduplicated list.
pub fn parse_names(raw: &str) -> Result<ParsedNames, DrawError> {
    let (names, duplicates) = dedupe(
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned),
    );
    if names.is_empty() {
        return Err(DrawError::EmptyInput);
    }

    let duplicates = (!duplicates.is_empty()).then(|| {
        lottery_warn!("Removed {} duplicated names from input", duplicates.len());
        DuplicateNamesDetected {
            total: duplicates.len(),
            preview: duplicates
                .into_iter()
                .take(DUPLICATE_PREVIEW_LIMIT)
                .collect(),
        }
    });

    Ok(ParsedNames { names, duplicates })
}

/// Keeps the first occurrence of every name. Returns the unique names and
/// the distinct values that were repeated.
pub(crate) fn dedupe(input: impl IntoIterator<Item = String>) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    let mut repeated = Vec::new();
    for name in input {
        if seen.insert(name.clone()) {
            unique.push(name);
        } else if !repeated.contains(&name) {
            repeated.push(name);
        }
    }
    (unique, repeated)
}

/// Sample participant list offered on the setup screen.
pub const SAMPLE_NAMES: &str = "Ahmet Yılmaz
Mehmet Kaya
Ayşe Demir
Fatma Çelik
Mustafa Koç
Ali Özkan
Zeynep Şahin
Hüseyin Yıldız
Emine Arslan
Hasan Doğan
Hatice Yalçın
Ömer Aydın
İbrahim Erdoğan
Elif Güneş
Murat Çetin";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_reports_each_repeated_value_once() {
        let input = ["a", "b", "a", "a", "c", "b"].map(String::from);
        let (unique, repeated) = dedupe(input);
        assert_eq!(unique, vec!["a", "b", "c"]);
        assert_eq!(repeated, vec!["a", "b"]);
    }

    #[test]
    fn summary_mentions_overflow() {
        let notice = DuplicateNamesDetected {
            preview: vec!["a".into(), "b".into()],
            total: 4,
        };
        assert_eq!(notice.summary(), "4 duplicate names removed: a, b and 2 more");
    }
}
