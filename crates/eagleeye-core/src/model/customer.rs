// ── Customer domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// Summary of a device attached to a customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDevice {
    pub dev_id: Option<i64>,
    pub mac: Option<MacAddress>,
    pub version: Option<String>,
    pub connected: Option<bool>,
    pub demo: Option<bool>,
    pub last_connection_at: Option<DateTime<Utc>>,
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub devices: Vec<CustomerDevice>,
}

impl Customer {
    /// Count of attached devices currently connected.
    pub fn connected_count(&self) -> usize {
        self.devices
            .iter()
            .filter(|d| d.connected == Some(true))
            .count()
    }

    /// Filter attached devices by exact version / connected / demo values.
    /// `None` predicates match everything, like the blank dropdowns on the
    /// customer page.
    pub fn filtered_devices(
        &self,
        version: Option<&str>,
        connected: Option<bool>,
        demo: Option<bool>,
    ) -> Vec<&CustomerDevice> {
        self.devices
            .iter()
            .filter(|d| version.is_none_or(|v| d.version.as_deref() == Some(v)))
            .filter(|d| connected.is_none_or(|c| d.connected == Some(c)))
            .filter(|d| demo.is_none_or(|x| d.demo == Some(x)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_with_devices() -> Customer {
        Customer {
            id: Some(1),
            code: None,
            name: Some("Asha".into()),
            email: None,
            mobile: None,
            created_at: None,
            updated_at: None,
            devices: vec![
                CustomerDevice {
                    dev_id: Some(1),
                    mac: None,
                    version: Some("2.4.1".into()),
                    connected: Some(true),
                    demo: Some(false),
                    last_connection_at: None,
                },
                CustomerDevice {
                    dev_id: Some(2),
                    mac: None,
                    version: Some("2.3.0".into()),
                    connected: Some(false),
                    demo: Some(true),
                    last_connection_at: None,
                },
            ],
        }
    }

    #[test]
    fn blank_predicates_match_everything() {
        let customer = customer_with_devices();
        assert_eq!(customer.filtered_devices(None, None, None).len(), 2);
    }

    #[test]
    fn version_predicate_is_exact() {
        let customer = customer_with_devices();
        assert_eq!(customer.filtered_devices(Some("2.4.1"), None, None).len(), 1);
        assert!(customer.filtered_devices(Some("2.4"), None, None).is_empty());
    }

    #[test]
    fn predicates_stack() {
        let customer = customer_with_devices();
        let hits = customer.filtered_devices(None, Some(false), Some(true));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].dev_id, Some(2));
    }

    #[test]
    fn connected_count_counts_true_only() {
        assert_eq!(customer_with_devices().connected_count(), 1);
    }
}
