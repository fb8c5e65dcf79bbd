use crate::calendar::YMD_FMT;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

/// The days that have offers and the days that already have orders, as ISO
/// `YYYY-MM-DD` strings.  Membership is by exact string comparison.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct MarkerSet {
    #[serde(default)]
    offer_days: HashSet<String>,
    #[serde(default)]
    order_days: HashSet<String>,
}

impl MarkerSet {
    pub(crate) fn new<I, J>(offer_days: I, order_days: J) -> MarkerSet
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        MarkerSet {
            offer_days: offer_days.into_iter().map(Into::into).collect(),
            order_days: order_days.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn from_json_str(s: &str) -> Result<MarkerSet, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub(crate) fn from_json_file(path: &Path) -> Result<MarkerSet, MarkersError> {
        let raw = fs::read_to_string(path).map_err(|source| MarkersError::Read {
            path: path.to_owned(),
            source,
        })?;
        MarkerSet::from_json_str(&raw).map_err(|source| MarkersError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub(crate) fn has_offer(&self, iso_date: &str) -> bool {
        self.offer_days.contains(iso_date)
    }

    pub(crate) fn has_order(&self, iso_date: &str) -> bool {
        self.order_days.contains(iso_date)
    }

    pub(crate) fn offer_count(&self) -> usize {
        self.offer_days.len()
    }

    pub(crate) fn order_count(&self) -> usize {
        self.order_days.len()
    }

    /// Add all of `other`'s days to `self`
    pub(crate) fn merge(&mut self, other: MarkerSet) {
        self.offer_days.extend(other.offer_days);
        self.order_days.extend(other.order_days);
    }

    /// Returns the entries that are not valid `YYYY-MM-DD` dates and thus can
    /// never match a calendar day
    pub(crate) fn malformed(&self) -> Vec<&str> {
        let mut bad = self
            .offer_days
            .iter()
            .chain(&self.order_days)
            .map(String::as_str)
            .filter(|s| Date::parse(s, &YMD_FMT).is_err())
            .collect::<Vec<_>>();
        bad.sort_unstable();
        bad.dedup();
        bad
    }
}

#[derive(Debug, Error)]
pub(crate) enum MarkersError {
    #[error("failed to read markers file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse markers file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let markers = MarkerSet::new(["2024-02-14", "2024-02-15"], ["2024-02-15"]);
        assert!(markers.has_offer("2024-02-14"));
        assert!(markers.has_offer("2024-02-15"));
        assert!(!markers.has_offer("2024-02-16"));
        assert!(markers.has_order("2024-02-15"));
        assert!(!markers.has_order("2024-02-14"));
        assert_eq!(markers.offer_count(), 2);
        assert_eq!(markers.order_count(), 1);
    }

    #[test]
    fn test_membership_is_exact() {
        let markers = MarkerSet::new(["2024-2-14", "2024-02-14T00:00:00Z"], Vec::<String>::new());
        assert!(!markers.has_offer("2024-02-14"));
    }

    #[test]
    fn test_from_json_str() {
        let markers = MarkerSet::from_json_str(
            r#"{"offer_days": ["2024-06-03", "2024-06-04"], "order_days": ["2024-06-04"]}"#,
        )
        .unwrap();
        assert_eq!(
            markers,
            MarkerSet::new(["2024-06-03", "2024-06-04"], ["2024-06-04"])
        );
    }

    #[test]
    fn test_from_json_str_missing_fields() {
        let markers = MarkerSet::from_json_str(r#"{"offer_days": ["2024-06-03"]}"#).unwrap();
        assert_eq!(markers.offer_count(), 1);
        assert_eq!(markers.order_count(), 0);
    }

    #[test]
    fn test_from_json_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("markers.json");
        fs::write(&path, r#"{"offer_days": ["2024-06-03"], "order_days": []}"#).unwrap();
        let markers = MarkerSet::from_json_file(&path).unwrap();
        assert!(markers.has_offer("2024-06-03"));
    }

    #[test]
    fn test_from_json_file_errors() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing.json");
        assert!(matches!(
            MarkerSet::from_json_file(&missing),
            Err(MarkersError::Read { .. })
        ));
        let garbage = temp.path().join("garbage.json");
        fs::write(&garbage, "[1, 2").unwrap();
        assert!(matches!(
            MarkerSet::from_json_file(&garbage),
            Err(MarkersError::Parse { .. })
        ));
    }

    #[test]
    fn test_merge() {
        let mut markers = MarkerSet::new(["2024-06-03"], ["2024-06-01"]);
        markers.merge(MarkerSet::new(["2024-06-03", "2024-06-05"], ["2024-06-02"]));
        assert_eq!(
            markers,
            MarkerSet::new(["2024-06-03", "2024-06-05"], ["2024-06-01", "2024-06-02"])
        );
    }

    #[test]
    fn test_malformed() {
        let markers = MarkerSet::new(["2024-06-03", "tomorrow"], ["2024-13-01", "tomorrow"]);
        assert_eq!(markers.malformed(), ["2024-13-01", "tomorrow"]);
    }
}
