//! Economic calendar filtering and impact labels

use serde::Serialize;

use crate::types::EconomicEvent;

/// Market impact of an event, from the backend's 1-3 importance scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    Low,
    Medium,
    High,
    Unknown,
}

impl Impact {
    pub fn from_importance(importance: u8) -> Self {
        match importance {
            1 => Impact::Low,
            2 => Impact::Medium,
            3 => Impact::High,
            _ => Impact::Unknown,
        }
    }
}

/// Calendar row sent to the page
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    #[serde(flatten)]
    pub event: EconomicEvent,
    pub impact: Impact,
}

/// Keep events whose country contains `country` (case-insensitive); blank keeps all
pub fn filter_by_country(events: Vec<EconomicEvent>, country: Option<&str>) -> Vec<CalendarEntry> {
    let needle = country.map(str::trim).unwrap_or_default().to_lowercase();

    events
        .into_iter()
        .filter(|e| needle.is_empty() || e.country.to_lowercase().contains(&needle))
        .map(|event| CalendarEntry {
            impact: Impact::from_importance(event.importance),
            event,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, country: &str, importance: u8) -> EconomicEvent {
        EconomicEvent {
            event: name.to_string(),
            country: country.to_string(),
            date: "2024-02-02T13:30:00Z".to_string(),
            importance,
        }
    }

    fn events() -> Vec<EconomicEvent> {
        vec![
            event("Non-Farm Payrolls", "United States", 3),
            event("CPI y/y", "United Kingdom", 2),
            event("Retail Sales m/m", "Australia", 1),
        ]
    }

    #[test]
    fn test_filter_substring_case_insensitive() {
        let rows = filter_by_country(events(), Some("united"));
        assert_eq!(rows.len(), 2);

        let rows = filter_by_country(events(), Some("AUSTRAL"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].impact, Impact::Low);
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        assert_eq!(filter_by_country(events(), None).len(), 3);
        assert_eq!(filter_by_country(events(), Some("  ")).len(), 3);
    }

    #[test]
    fn test_impact_labels() {
        assert_eq!(Impact::from_importance(3), Impact::High);
        assert_eq!(Impact::from_importance(2), Impact::Medium);
        assert_eq!(Impact::from_importance(0), Impact::Unknown);
        assert_eq!(Impact::from_importance(7), Impact::Unknown);
    }

    #[test]
    fn test_entry_keeps_backend_field_names() {
        let rows = filter_by_country(events(), Some("kingdom"));
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["Country"], "United Kingdom");
        assert_eq!(json["Importance"], 2);
        assert_eq!(json["impact"], "Medium");
    }
}
