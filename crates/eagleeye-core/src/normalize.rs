// ── Entity normalization ──
//
// Every poll tick replaces a view's collection wholesale with the output of
// `normalize`: a single pass that deduplicates raw records by collapse key,
// last record wins. Insertion order of the first-seen key is preserved.

use indexmap::IndexMap;

use crate::model::{Alarm, Customer, Device, ProvisionedDevice};

/// An entity that can be collapsed into a deduplicated collection.
///
/// `None` means the record carries no usable identity and is dropped
/// during normalization.
pub trait Collapse {
    fn collapse_key(&self) -> Option<String>;
}

impl Collapse for Device {
    /// Lowercase MAC address, falling back to `id-<deviceId>` when the MAC
    /// is absent. Records with neither are dropped.
    fn collapse_key(&self) -> Option<String> {
        self.mac
            .as_ref()
            .map(|m| m.as_str().to_owned())
            .or_else(|| self.device_id.map(|id| format!("id-{id}")))
    }
}

impl Collapse for Customer {
    fn collapse_key(&self) -> Option<String> {
        self.id.map(|id| format!("id-{id}"))
    }
}

impl Collapse for Alarm {
    /// Alarms have no backend id; identity is the
    /// `(entityId, key, startTime)` tuple. Missing components collapse into
    /// the same empty slot, so fully anonymous alarms merge last-one-wins.
    fn collapse_key(&self) -> Option<String> {
        let entity = self.entity_id.map_or_else(String::new, |id| id.to_string());
        let key = self.key.clone().unwrap_or_default();
        let start = self
            .start_time
            .map(|t| t.timestamp().to_string())
            .unwrap_or_default();
        Some(format!("{entity}:{key}:{start}"))
    }
}

impl Collapse for ProvisionedDevice {
    fn collapse_key(&self) -> Option<String> {
        self.mac
            .as_ref()
            .map(|m| m.as_str().to_owned())
            .or_else(|| Some(format!("id-{}", self.dev_id)))
    }
}

/// Deduplicate a raw sequence into a `NormalizedCollection`.
///
/// Later records overwrite earlier ones with the same key; the output keeps
/// the insertion order of each key's first appearance.
pub fn normalize<T: Collapse>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut collapsed: IndexMap<String, T> = IndexMap::new();
    for record in records {
        if let Some(key) = record.collapse_key() {
            collapsed.insert(key, record);
        }
    }
    collapsed.into_values().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ActiveState, MacAddress};
    use std::collections::HashSet;

    fn device(id: Option<i64>, mac: Option<&str>, version: &str) -> Device {
        Device {
            device_id: id,
            name: None,
            ssid: None,
            mac: mac.map(MacAddress::new),
            ip: None,
            online: false,
            state: ActiveState::Unknown,
            code_version: Some(version.to_owned()),
            appliance_state: None,
            powersave: None,
            username: None,
            created_at: None,
            updated_at: None,
            boot_time: None,
            sync_time: None,
            millis: None,
            signal_strength_dbm: None,
            boot_status_code: None,
            message_publish_status: None,
            signal_history: Vec::new(),
            nvs_history: Vec::new(),
            spiffs_history: Vec::new(),
            users: Vec::new(),
        }
    }

    #[test]
    fn duplicate_macs_collapse_last_wins() {
        let stale = device(Some(1), Some("AA:BB:CC:DD:EE:FF"), "1.0.0");
        let fresh = device(Some(1), Some("aa:bb:cc:dd:ee:ff"), "2.0.0");

        let out = normalize(vec![stale, fresh]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code_version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn missing_mac_falls_back_to_id_key() {
        let with_mac = device(Some(1), Some("aa:aa:aa:aa:aa:01"), "1.0");
        let without_mac = device(Some(2), None, "1.1");

        let out = normalize(vec![with_mac, without_mac]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn missing_mac_and_id_is_dropped() {
        let anonymous = device(None, None, "1.0");
        let keyed = device(Some(3), None, "1.1");

        let out = normalize(vec![anonymous, keyed]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].device_id, Some(3));
    }

    #[test]
    fn no_two_output_records_share_a_key() {
        let records = vec![
            device(Some(1), Some("aa:aa:aa:aa:aa:01"), "a"),
            device(Some(2), Some("aa:aa:aa:aa:aa:02"), "b"),
            device(Some(1), Some("AA:AA:AA:AA:AA:01"), "c"),
            device(Some(3), None, "d"),
            device(Some(3), None, "e"),
        ];

        let out = normalize(records);

        let keys: Vec<String> = out.iter().map(|d| d.collapse_key().unwrap()).collect();
        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
    }

    #[test]
    fn output_preserves_first_seen_order() {
        let records = vec![
            device(Some(1), Some("aa:aa:aa:aa:aa:01"), "a"),
            device(Some(2), Some("aa:aa:aa:aa:aa:02"), "b"),
            device(Some(1), Some("aa:aa:aa:aa:aa:01"), "a2"),
        ];

        let out = normalize(records);

        assert_eq!(out.len(), 2);
        // Key 1 keeps its original slot, with the later record's content.
        assert_eq!(out[0].code_version.as_deref(), Some("a2"));
        assert_eq!(out[1].code_version.as_deref(), Some("b"));
    }
}
