// ── Alarm ordering ──
//
// Severity descending per the fixed rank table {4:error, 3:warn, 2:ok,
// 1:info}; ties break on start time descending. Sorting is pure — the
// dashboards' in-place `Array.sort` was a shared-state bug, not behavior
// to keep.

use crate::model::Alarm;

/// Return a new sequence ordered by severity rank descending, then start
/// time descending. Stable: records equal on both keys keep input order.
pub fn sort_alarms(records: &[Alarm]) -> Vec<Alarm> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        b.severity_rank()
            .cmp(&a.severity_rank())
            .then_with(|| b.start_time.cmp(&a.start_time))
    });
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use chrono::{TimeZone, Utc};

    fn alarm(severity: Option<Severity>, key: &str) -> Alarm {
        Alarm {
            severity,
            entity_type: None,
            entity_id: None,
            key: Some(key.to_owned()),
            status: None,
            start_time: None,
            duration_secs: None,
        }
    }

    #[test]
    fn severity_2_4_1_sorts_to_4_2_1() {
        let input = vec![
            alarm(Severity::from_code(2), "ok"),
            alarm(Severity::from_code(4), "error"),
            alarm(Severity::from_code(1), "info"),
        ];

        let out = sort_alarms(&input);
        let codes: Vec<i64> = out.iter().filter_map(|a| a.severity.map(|s| s.code())).collect();
        assert_eq!(codes, vec![4, 2, 1]);
    }

    #[test]
    fn output_is_non_increasing_in_rank() {
        let input = vec![
            alarm(Severity::from_code(1), "a"),
            alarm(Severity::from_code(3), "b"),
            alarm(None, "c"),
            alarm(Severity::from_code(4), "d"),
            alarm(Severity::from_code(2), "e"),
            alarm(Severity::from_code(4), "f"),
        ];

        let out = sort_alarms(&input);
        let ranks: Vec<i64> = out.iter().map(Alarm::severity_rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ties_break_on_start_time_descending() {
        let older = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        let mut first = alarm(Severity::from_code(4), "older");
        first.start_time = Some(older);
        let mut second = alarm(Severity::from_code(4), "newer");
        second.start_time = Some(newer);

        let out = sort_alarms(&[first, second]);
        assert_eq!(out[0].key.as_deref(), Some("newer"));
        assert_eq!(out[1].key.as_deref(), Some("older"));
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let a = alarm(Severity::from_code(3), "first");
        let b = alarm(Severity::from_code(3), "second");

        let out = sort_alarms(&[a, b]);
        assert_eq!(out[0].key.as_deref(), Some("first"));
        assert_eq!(out[1].key.as_deref(), Some("second"));
    }

    #[test]
    fn unknown_severity_sorts_last() {
        let input = vec![alarm(None, "unknown"), alarm(Severity::from_code(1), "info")];

        let out = sort_alarms(&input);
        assert_eq!(out[0].key.as_deref(), Some("info"));
        assert_eq!(out[1].key.as_deref(), Some("unknown"));
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let input = vec![
            alarm(Severity::from_code(1), "a"),
            alarm(Severity::from_code(4), "b"),
        ];
        let before = input.clone();

        let _ = sort_alarms(&input);
        assert_eq!(input, before);
    }
}
