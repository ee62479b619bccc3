use serde::{Deserialize, Serialize};

use super::NotificationKind;

/// One notification write that did not happen. The recipient id and
/// channel are enough for an operator to replay by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchFailure {
    pub recipient_id: String,
    pub kind: NotificationKind,
    pub error: String,
}

/// Request-scoped summary of one fan-out run. Never persisted; a partial
/// fan-out is a degraded delivery, not a failed alert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchReport {
    pub delivered: u32,
    pub failed: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_delivered(&mut self) {
        self.delivered += 1;
    }

    pub fn record_failure(&mut self, recipient_id: String, kind: NotificationKind, error: String) {
        self.failed.push(DispatchFailure {
            recipient_id,
            kind,
            error,
        });
    }

    pub fn attempted(&self) -> usize {
        self.delivered as usize + self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = DispatchReport::new();
        report.record_delivered();
        report.record_delivered();
        report.record_failure("u3".into(), NotificationKind::SosCircle, "db closed".into());

        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.attempted(), 3);
    }
}
