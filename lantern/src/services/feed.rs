use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::db::SafetyBackend;
use crate::error::Result;
use crate::geo;
use crate::models::{IncidentFeed, SosAlert, SosFeedItem, SourceTag, User};
use crate::services::trust_graph::TrustGraphResolver;

/// Builds the tiered incident feed for one user and map viewport out of the
/// four signal sources: trusted-network SOS alerts, nearby SOS alerts,
/// user-submitted reports, and news-derived warnings.
#[derive(Clone)]
pub struct FeedService {
    db: Arc<dyn SafetyBackend>,
    resolver: TrustGraphResolver,
    news_max_age_days: i64,
}

impl FeedService {
    pub fn new(db: Arc<dyn SafetyBackend>, news_max_age_days: i64) -> Self {
        let resolver = TrustGraphResolver::new(Arc::clone(&db));
        Self {
            db,
            resolver,
            news_max_age_days,
        }
    }

    /// Any failed source fetch fails the whole feed; a source is never
    /// silently treated as empty.
    pub async fn incident_feed(
        &self,
        user_id: &str,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<IncidentFeed> {
        geo::validate_query(latitude, longitude, radius_deg)?;

        let graph = self.resolver.resolve(user_id).await?;
        let network_ids: Vec<String> = graph.all().into_iter().collect();

        let (network_alerts, nearby_alerts, mut reports, mut news) = futures::try_join!(
            self.db.get_open_alerts_by_sender_ids(&network_ids),
            self.db
                .get_open_alerts_within_radius(latitude, longitude, radius_deg),
            self.db
                .get_reports_within_radius(latitude, longitude, radius_deg),
            self.db.get_news_within_radius(
                latitude,
                longitude,
                radius_deg,
                self.news_max_age_days
            ),
        )?;

        // Keyed accumulation: one entry per alert id, tags from every source
        // that produced it. The querying user's own alerts never appear.
        let mut merged: HashMap<String, (SosAlert, BTreeSet<SourceTag>)> = HashMap::new();

        for alert in network_alerts {
            if alert.sender_id == user_id {
                continue;
            }
            let mut tags = BTreeSet::new();
            if graph.friend_ids.contains(&alert.sender_id) {
                tags.insert(SourceTag::Friend);
            }
            if graph.circle_peer_ids.contains(&alert.sender_id) {
                tags.insert(SourceTag::Circle);
            }
            match merged.entry(alert.id.clone()) {
                Entry::Occupied(mut entry) => entry.get_mut().1.extend(tags),
                Entry::Vacant(entry) => {
                    entry.insert((alert, tags));
                }
            }
        }

        for alert in nearby_alerts {
            if alert.sender_id == user_id {
                continue;
            }
            match merged.entry(alert.id.clone()) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().1.insert(SourceTag::Nearby);
                }
                Entry::Vacant(entry) => {
                    entry.insert((alert, BTreeSet::from([SourceTag::Nearby])));
                }
            }
        }

        let sender_profiles = self.sender_profiles(&merged).await?;

        let mut p0_sos_friends = Vec::new();
        let mut p1_sos_nearby_strangers = Vec::new();
        for (alert, tags) in merged.into_values() {
            let Some(user) = sender_profiles.get(&alert.sender_id).cloned() else {
                // The sender row vanished between the alert fetch and the
                // profile fetch; one broken item must not break the map.
                tracing::warn!(
                    alert_id = %alert.id,
                    sender_id = %alert.sender_id,
                    "Dropping feed item with unknown sender"
                );
                continue;
            };
            let is_network = tags.iter().any(|tag| tag.is_network());
            let item = SosFeedItem {
                alert,
                user,
                sources: tags.into_iter().collect(),
            };
            if is_network {
                p0_sos_friends.push(item);
            } else {
                p1_sos_nearby_strangers.push(item);
            }
        }

        p0_sos_friends.sort_by(|a, b| b.alert.created_at.cmp(&a.alert.created_at));
        p1_sos_nearby_strangers.sort_by(|a, b| b.alert.created_at.cmp(&a.alert.created_at));
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        news.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let feed = IncidentFeed {
            p0_sos_friends,
            p1_sos_nearby_strangers,
            p1_user_reports: reports,
            p2_news_warnings: news,
        };
        tracing::debug!(
            user_id = user_id,
            p0 = feed.p0_sos_friends.len(),
            p1_sos = feed.p1_sos_nearby_strangers.len(),
            p1_reports = feed.p1_user_reports.len(),
            p2_news = feed.p2_news_warnings.len(),
            "Incident feed assembled"
        );
        Ok(feed)
    }

    /// One batched lookup for every distinct sender in the merged set.
    async fn sender_profiles(
        &self,
        merged: &HashMap<String, (SosAlert, BTreeSet<SourceTag>)>,
    ) -> Result<HashMap<String, User>> {
        let sender_ids: Vec<String> = merged
            .values()
            .map(|(alert, _)| alert.sender_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let users = self.db.get_users_by_ids(&sender_ids).await?;
        Ok(users.into_iter().map(|user| (user.id.clone(), user)).collect())
    }
}
