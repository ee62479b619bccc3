//! Demo dataset for local development: three users, two friendships, an
//! active circle, one user report, and one news hazard, all around downtown
//! San Francisco so a single map view shows everything.

use std::sync::Arc;

use chrono::Utc;
use nanoid::nanoid;

use crate::db::SafetyBackend;
use crate::error::Result;
use crate::models::{
    CircleRole, FriendRequest, Friendship, NewsIncident, ReportStatus, User, UserReportIncident,
};
use crate::services::news::source_url_hash;
use crate::services::CircleService;

const ALICE: &str = "demo-alice";
const BOB: &str = "demo-bob";
const CHARLIE: &str = "demo-charlie";

/// Seed the demo dataset. Skips everything when the demo users already
/// exist, so rerunning with `--seed-demo` is harmless.
pub async fn seed_demo(db: Arc<dyn SafetyBackend>) -> Result<()> {
    if db.get_user(ALICE).await?.is_some() {
        tracing::info!("Demo dataset already present, skipping seed");
        return Ok(());
    }

    for (id, name) in [
        (ALICE, "Alice Rivera"),
        (BOB, "Bob Okafor"),
        (CHARLIE, "Charlie Nguyen"),
    ] {
        db.create_user(&User::new(id.to_string(), name.to_string()))
            .await?;
    }

    // Alice is friends with both Bob and Charlie; Bob and Charlie are not
    // friends with each other, which keeps the trust graphs distinct.
    db.create_friendship(&Friendship::new(
        nanoid!(),
        ALICE.to_string(),
        BOB.to_string(),
    ))
    .await?;
    db.create_friendship(&Friendship::new(
        nanoid!(),
        ALICE.to_string(),
        CHARLIE.to_string(),
    ))
    .await?;

    // A pending request so the requests inbox has something to show.
    db.create_friend_request(&FriendRequest::new(
        nanoid!(),
        CHARLIE.to_string(),
        BOB.to_string(),
    ))
    .await?;

    // Going through the service keeps the owner enrolled and the
    // single-active rule applied.
    let circles = CircleService::new(db.clone());
    let family = circles
        .create_circle(ALICE, "Family", Some("Alice's emergency circle"))
        .await?;
    circles
        .add_member(&family.id, ALICE, BOB, CircleRole::Member)
        .await?;
    circles
        .add_member(&family.id, ALICE, CHARLIE, CircleRole::Member)
        .await?;

    db.create_report(&UserReportIncident {
        id: nanoid!(),
        reporter_id: BOB.to_string(),
        title: "Streetlights out near Mission Creek".to_string(),
        description: "Whole block is dark between 4th and 5th, watch your step.".to_string(),
        category: "infrastructure".to_string(),
        latitude: 37.7706,
        longitude: -122.3932,
        severity: Some(30),
        status: ReportStatus::Active,
        created_at: Utc::now(),
    })
    .await?;

    let source_url = "https://news.example.com/sf-storm-warning".to_string();
    let now = Utc::now();
    db.upsert_news_by_source_url(&NewsIncident {
        id: nanoid!(),
        title: "Storm warning issued for the Bay Area".to_string(),
        summary: "High winds and heavy rain expected through Friday evening.".to_string(),
        category: "weather".to_string(),
        location_name: "San Francisco".to_string(),
        latitude: 37.7749,
        longitude: -122.4194,
        source_url_hash: source_url_hash(&source_url),
        source_url,
        published_at: Some(now),
        severity: Some(40),
        created_at: now,
        updated_at: now,
    })
    .await?;

    tracing::info!("Demo dataset seeded: users {ALICE}, {BOB}, {CHARLIE}");
    Ok(())
}
