use serde::{Deserialize, Serialize};

use super::{NewsIncident, SosAlert, User, UserReportIncident};

/// How an alert entered the feed. Tags accumulate when the same alert is
/// reachable through more than one source, so clients can render origin
/// badges without a second query. Variant order is the display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Friend,
    Circle,
    Nearby,
}

impl SourceTag {
    /// True for the tags that come from the caller's trust graph rather
    /// than from proximity.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Friend | Self::Circle)
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Friend => write!(f, "friend"),
            Self::Circle => write!(f, "circle"),
            Self::Nearby => write!(f, "nearby"),
        }
    }
}

impl std::str::FromStr for SourceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "friend" => Ok(Self::Friend),
            "circle" => Ok(Self::Circle),
            "nearby" => Ok(Self::Nearby),
            _ => Err(format!("Unknown source tag: {s}")),
        }
    }
}

/// One SOS entry on the map: the alert, its sender's profile, and every
/// source tag that matched it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SosFeedItem {
    pub alert: SosAlert,
    pub user: User,
    pub sources: Vec<SourceTag>,
}

/// The tiered incident feed. Each list is ordered newest first; an alert
/// appears in exactly one of the two SOS tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentFeed {
    pub p0_sos_friends: Vec<SosFeedItem>,
    pub p1_sos_nearby_strangers: Vec<SosFeedItem>,
    pub p1_user_reports: Vec<UserReportIncident>,
    pub p2_news_warnings: Vec<NewsIncident>,
}

impl IncidentFeed {
    pub fn total_items(&self) -> usize {
        self.p0_sos_friends.len()
            + self.p1_sos_nearby_strangers.len()
            + self.p1_user_reports.len()
            + self.p2_news_warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tag_round_trip() {
        for tag in [SourceTag::Friend, SourceTag::Circle, SourceTag::Nearby] {
            let parsed: SourceTag = tag.to_string().parse().unwrap();
            assert_eq!(parsed, tag);
        }
        assert!("satellite".parse::<SourceTag>().is_err());
    }

    #[test]
    fn test_source_tag_network_split() {
        assert!(SourceTag::Friend.is_network());
        assert!(SourceTag::Circle.is_network());
        assert!(!SourceTag::Nearby.is_network());
    }

    #[test]
    fn test_source_tag_display_order() {
        let mut tags = vec![SourceTag::Nearby, SourceTag::Friend, SourceTag::Circle];
        tags.sort();
        assert_eq!(
            tags,
            vec![SourceTag::Friend, SourceTag::Circle, SourceTag::Nearby]
        );
    }
}
