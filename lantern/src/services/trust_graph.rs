use std::collections::HashSet;
use std::sync::Arc;

use crate::db::SafetyBackend;
use crate::error::Result;
use crate::models::CircleStatus;

/// The peers one user trusts, split by how the trust was formed so feed
/// entries can be tagged with their origin. The user's own id never
/// appears in either set.
#[derive(Debug, Clone, Default)]
pub struct TrustGraph {
    pub friend_ids: HashSet<String>,
    pub circle_peer_ids: HashSet<String>,
}

impl TrustGraph {
    /// Union of both channels.
    pub fn all(&self) -> HashSet<String> {
        self.friend_ids
            .union(&self.circle_peer_ids)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.friend_ids.is_empty() && self.circle_peer_ids.is_empty()
    }
}

#[derive(Clone)]
pub struct TrustGraphResolver {
    db: Arc<dyn SafetyBackend>,
}

impl TrustGraphResolver {
    pub fn new(db: Arc<dyn SafetyBackend>) -> Self {
        Self { db }
    }

    /// Recomputed from storage on every call; nothing here is cached.
    /// Peers come from friendship edges, circles the user owns, and
    /// circles the user joined. Only active circles contribute. A user
    /// with no friends and no circles gets an empty graph, not an error.
    pub async fn resolve(&self, user_id: &str) -> Result<TrustGraph> {
        let mut graph = TrustGraph::default();

        for friend in self.db.get_friends_by_user_id(user_id).await? {
            if friend.id != user_id {
                graph.friend_ids.insert(friend.id);
            }
        }

        for circle in self.db.get_circles_by_owner(user_id).await? {
            if circle.status != CircleStatus::Active {
                continue;
            }
            self.collect_circle_peers(&circle.id, user_id, &mut graph)
                .await?;
        }

        for membership in self.db.get_memberships_by_member(user_id).await? {
            match self.db.get_circle(&membership.circle_id).await? {
                Some(circle) if circle.status == CircleStatus::Active => {
                    self.collect_circle_peers(&circle.id, user_id, &mut graph)
                        .await?;
                }
                _ => {}
            }
        }

        Ok(graph)
    }

    async fn collect_circle_peers(
        &self,
        circle_id: &str,
        user_id: &str,
        graph: &mut TrustGraph,
    ) -> Result<()> {
        for member in self.db.get_members_by_circle(circle_id).await? {
            if member.member_id != user_id {
                graph.circle_peer_ids.insert(member.member_id);
            }
        }
        Ok(())
    }
}
