//! Run configuration shared by the processor and the publisher.

use thiserror::Error;

pub const DEFAULT_ACTIVE_STATUS: &str = "Attiva";
pub const DEFAULT_URGENCY_THRESHOLD: i64 = 7;
pub const DEFAULT_MAX_RECORDS: usize = 6;
pub const MISSING_MARKER: &str = "N/A";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("urgency threshold must not be negative (got {0})")]
    NegativeThreshold(i64),
    #[error("record cap must be at least 1")]
    ZeroCap,
}

/// Which offsets count as urgent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrgencyPolicy {
    /// Within the threshold on either side of today, today included.
    #[default]
    Absolute,
    /// Strictly in the future and within the threshold.
    FutureOnly,
}

impl UrgencyPolicy {
    pub fn is_urgent(self, offset: Option<i64>, threshold: i64) -> bool {
        match (self, offset) {
            (_, None) => false,
            (UrgencyPolicy::Absolute, Some(d)) => d.abs() <= threshold,
            (UrgencyPolicy::FutureOnly, Some(d)) => d > 0 && d <= threshold,
        }
    }
}

/// Order of the processed records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Nearest upcoming milestone first; ties keep sheet order.
    #[default]
    Urgency,
    /// Sheet order.
    Source,
}

/// How an unparsable milestone appears in the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingStyle {
    /// Offset `"N/A"`, date `""`.
    #[default]
    Marker,
    /// Offset and date keys left out of the record.
    Omit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfig {
    pub active_status: String,
    pub threshold: i64,
    pub urgency: UrgencyPolicy,
    pub order: OrderPolicy,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            active_status: DEFAULT_ACTIVE_STATUS.to_string(),
            threshold: DEFAULT_URGENCY_THRESHOLD,
            urgency: UrgencyPolicy::default(),
            order: OrderPolicy::default(),
        }
    }
}

impl ProcessConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold < 0 {
            return Err(ConfigError::NegativeThreshold(self.threshold));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishConfig {
    pub max_records: usize,
    pub missing: MissingStyle,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            missing: MissingStyle::default(),
        }
    }
}

impl PublishConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_records == 0 {
            return Err(ConfigError::ZeroCap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_policy_covers_both_sides() {
        let p = UrgencyPolicy::Absolute;
        assert!(p.is_urgent(Some(0), 7));
        assert!(p.is_urgent(Some(7), 7));
        assert!(p.is_urgent(Some(-7), 7));
        assert!(!p.is_urgent(Some(8), 7));
        assert!(!p.is_urgent(Some(-8), 7));
        assert!(!p.is_urgent(None, 7));
    }

    #[test]
    fn future_only_policy_excludes_today_and_past() {
        let p = UrgencyPolicy::FutureOnly;
        assert!(!p.is_urgent(Some(0), 7));
        assert!(!p.is_urgent(Some(-3), 7));
        assert!(p.is_urgent(Some(1), 7));
        assert!(p.is_urgent(Some(7), 7));
        assert!(!p.is_urgent(Some(8), 7));
        assert!(!p.is_urgent(None, 7));
    }

    #[test]
    fn defaults() {
        let pc = ProcessConfig::default();
        assert_eq!(pc.active_status, "Attiva");
        assert_eq!(pc.threshold, 7);
        assert_eq!(pc.urgency, UrgencyPolicy::Absolute);
        assert_eq!(pc.order, OrderPolicy::Urgency);
        assert_eq!(PublishConfig::default().max_records, 6);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let pc = ProcessConfig {
            threshold: -1,
            ..Default::default()
        };
        assert_eq!(pc.validate(), Err(ConfigError::NegativeThreshold(-1)));
        let pub_cfg = PublishConfig {
            max_records: 0,
            ..Default::default()
        };
        assert_eq!(pub_cfg.validate(), Err(ConfigError::ZeroCap));
    }
}
