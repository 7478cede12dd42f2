use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{normalize_date, normalize_mileage, parse_date, ServiceRecord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Mileage,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort of a history view. Starts at newest date first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Re-selecting the active key flips the direction; a new key starts
    /// descending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Desc;
        }
    }
}

/// Both filters are optional; an empty one lets everything through.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub parts: String,
}

impl HistoryFilter {
    pub fn matches(&self, rec: &ServiceRecord) -> bool {
        let date_ok = self.date.is_empty() || normalize_date(&rec.date).contains(&self.date);
        let parts_ok = self.parts.is_empty()
            || rec
                .parts
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&self.parts.to_lowercase());
        date_ok && parts_ok
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub filter: HistoryFilter,
    #[serde(default)]
    pub sort: SortState,
}

impl HistoryQuery {
    /// Filtered and sorted copy of `records`. The sort is stable in both
    /// directions, so records with equal keys keep their stored
    /// (newest-first) order.
    pub fn apply(&self, records: &[ServiceRecord]) -> Vec<ServiceRecord> {
        let mut keyed: Vec<(SortValue, &ServiceRecord)> = records
            .iter()
            .filter(|r| self.filter.matches(r))
            .map(|r| (SortValue::of(self.sort.key, r), r))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match self.sort.direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        });
        keyed.into_iter().map(|(_, r)| r.clone()).collect()
    }
}

// Unparseable dates compare as None, below every real date.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Date(Option<NaiveDate>),
    Mileage(i64),
}

impl SortValue {
    fn of(key: SortKey, rec: &ServiceRecord) -> Self {
        match key {
            SortKey::Date => SortValue::Date(parse_date(&rec.date)),
            SortKey::Mileage => SortValue::Mileage(normalize_mileage(&rec.mileage)),
        }
    }
}

/// One row of the history view: the stored record plus the canonical forms
/// shown to the user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: ServiceRecord,
    pub normalized_date: String,
    pub normalized_mileage: i64,
}

impl From<ServiceRecord> for HistoryEntry {
    fn from(record: ServiceRecord) -> Self {
        Self {
            normalized_date: normalize_date(&record.date),
            normalized_mileage: normalize_mileage(&record.mileage),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mileage;

    fn rec(id: &str, date: &str, mileage: Mileage, parts: Option<&str>) -> ServiceRecord {
        ServiceRecord {
            id: id.into(),
            date: date.into(),
            mileage,
            works: "Scheduled maintenance".into(),
            parts: parts.map(Into::into),
            photo: None,
        }
    }

    fn ids(out: &[ServiceRecord]) -> Vec<&str> {
        out.iter().map(|r| r.id.as_str()).collect()
    }

    fn query(date: &str, parts: &str, key: SortKey, direction: SortDirection) -> HistoryQuery {
        HistoryQuery {
            filter: HistoryFilter { date: date.into(), parts: parts.into() },
            sort: SortState { key, direction },
        }
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let records = vec![
            rec("a", "01-10-2025", Mileage::Number(100), Some("brake pad")),
            rec("b", "02-10-2025", Mileage::Number(200), Some("oil filter")),
        ];

        let out = query("01-10", "brake", SortKey::Date, SortDirection::Desc).apply(&records);
        assert_eq!(ids(&out), vec!["a"]);

        let out = query("01-10", "oil", SortKey::Date, SortDirection::Desc).apply(&records);
        assert!(out.is_empty());
    }

    #[test]
    fn test_date_filter_uses_normalized_date() {
        let records = vec![rec("a", "2025-10-01", Mileage::Number(1), None)];
        let out = query("01-10-2025", "", SortKey::Date, SortDirection::Asc).apply(&records);
        assert_eq!(ids(&out), vec!["a"]);

        // raw year-first text is not searched
        let out = query("2025-10", "", SortKey::Date, SortDirection::Asc).apply(&records);
        assert!(out.is_empty());
    }

    #[test]
    fn test_parts_filter_case_insensitive_and_absent_parts() {
        let records = vec![
            rec("a", "01-10-2025", Mileage::Number(1), Some("Масляный ФИЛЬТР")),
            rec("b", "01-10-2025", Mileage::Number(1), None),
        ];
        let out = query("", "фильтр", SortKey::Date, SortDirection::Asc).apply(&records);
        assert_eq!(ids(&out), vec!["a"]);

        let out = query("", "", SortKey::Date, SortDirection::Asc).apply(&records);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_sort_by_mileage() {
        let records = vec![
            rec("500", "01-01-2024", Mileage::Number(500), None),
            rec("1200", "01-01-2024", Mileage::from("1,200"), None),
            rec("300", "01-01-2024", Mileage::Number(300), None),
        ];
        let asc = query("", "", SortKey::Mileage, SortDirection::Asc).apply(&records);
        assert_eq!(ids(&asc), vec!["300", "500", "1200"]);

        let desc = query("", "", SortKey::Mileage, SortDirection::Desc).apply(&records);
        assert_eq!(ids(&desc), vec!["1200", "500", "300"]);
    }

    #[test]
    fn test_sort_by_date_mixed_formats() {
        let records = vec![
            rec("old", "2023-12-31", Mileage::Number(1), None),
            rec("new", "01-01-2024", Mileage::Number(1), None),
        ];
        let desc = query("", "", SortKey::Date, SortDirection::Desc).apply(&records);
        assert_eq!(ids(&desc), vec!["new", "old"]);

        let asc = query("", "", SortKey::Date, SortDirection::Asc).apply(&records);
        assert_eq!(ids(&asc), vec!["old", "new"]);
    }

    #[test]
    fn test_unparseable_dates_sort_first_ascending() {
        let records = vec![
            rec("real", "01-01-2024", Mileage::Number(1), None),
            rec("junk", "someday", Mileage::Number(1), None),
        ];
        let asc = query("", "", SortKey::Date, SortDirection::Asc).apply(&records);
        assert_eq!(ids(&asc), vec!["junk", "real"]);
    }

    #[test]
    fn test_ties_keep_input_order_both_directions() {
        let records = vec![
            rec("x", "05-05-2024", Mileage::Number(10), None),
            rec("y", "2024-05-05", Mileage::Number(10), None),
            rec("z", "01-01-2020", Mileage::Number(5), None),
        ];
        let desc = query("", "", SortKey::Date, SortDirection::Desc).apply(&records);
        assert_eq!(ids(&desc), vec!["x", "y", "z"]);

        let asc = query("", "", SortKey::Mileage, SortDirection::Asc).apply(&records);
        assert_eq!(ids(&asc), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_sort_toggle() {
        let mut s = SortState::default();
        assert_eq!(s, SortState { key: SortKey::Date, direction: SortDirection::Desc });

        s.select(SortKey::Date);
        assert_eq!(s.direction, SortDirection::Asc);

        s.select(SortKey::Mileage);
        assert_eq!(s, SortState { key: SortKey::Mileage, direction: SortDirection::Desc });

        s.select(SortKey::Mileage);
        assert_eq!(s.direction, SortDirection::Asc);

        s.select(SortKey::Date);
        assert_eq!(s, SortState { key: SortKey::Date, direction: SortDirection::Desc });
    }

    #[test]
    fn test_history_entry_carries_canonical_forms() {
        let e = HistoryEntry::from(rec("a", "2025-10-01", Mileage::from("12 345 km"), None));
        assert_eq!(e.normalized_date, "01-10-2025");
        assert_eq!(e.normalized_mileage, 12345);

        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["id"], "a");
        assert_eq!(v["normalized_mileage"], 12345);
    }
}
