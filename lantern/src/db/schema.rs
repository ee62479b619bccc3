use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Users known to the service. Accounts are managed elsewhere; rows
        -- here exist so alerts and notifications can resolve display names.
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            avatar_url TEXT,
            created_at TEXT NOT NULL
        );

        -- One row per undirected friendship edge; lookups match either column.
        CREATE TABLE IF NOT EXISTS friendships (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            friend_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (user_id, friend_id),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (friend_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_friendships_user_id ON friendships(user_id);
        CREATE INDEX IF NOT EXISTS idx_friendships_friend_id ON friendships(friend_id);

        CREATE TABLE IF NOT EXISTS friend_requests (
            id TEXT PRIMARY KEY,
            sender_id TEXT NOT NULL,
            receiver_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL,
            responded_at TEXT,
            FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (receiver_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_friend_requests_receiver
            ON friend_requests(receiver_id, status);
        CREATE INDEX IF NOT EXISTS idx_friend_requests_sender
            ON friend_requests(sender_id, status);

        -- The single-active-circle rule is enforced by the service layer,
        -- so no partial unique index on (owner_id, status) here.
        CREATE TABLE IF NOT EXISTS circles (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            owner_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TEXT NOT NULL,
            FOREIGN KEY (owner_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_circles_owner ON circles(owner_id, status);

        CREATE TABLE IF NOT EXISTS circle_members (
            id TEXT PRIMARY KEY,
            circle_id TEXT NOT NULL,
            member_id TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'member',
            joined_at TEXT NOT NULL,
            UNIQUE (circle_id, member_id),
            FOREIGN KEY (circle_id) REFERENCES circles(id) ON DELETE CASCADE,
            FOREIGN KEY (member_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_circle_members_circle ON circle_members(circle_id);
        CREATE INDEX IF NOT EXISTS idx_circle_members_member ON circle_members(member_id);

        CREATE TABLE IF NOT EXISTS sos_alerts (
            id TEXT PRIMARY KEY,
            sender_id TEXT NOT NULL,
            circle_id TEXT,
            message TEXT,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TEXT NOT NULL,
            resolved_at TEXT,
            FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_sos_alerts_sender ON sos_alerts(sender_id, status);
        CREATE INDEX IF NOT EXISTS idx_sos_alerts_location ON sos_alerts(latitude, longitude);

        CREATE TABLE IF NOT EXISTS user_reports (
            id TEXT PRIMARY KEY,
            reporter_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            severity INTEGER,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TEXT NOT NULL,
            FOREIGN KEY (reporter_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_user_reports_status ON user_reports(status);
        CREATE INDEX IF NOT EXISTS idx_user_reports_location ON user_reports(latitude, longitude);

        -- source_url_hash is the upsert identity: re-ingesting an article
        -- refreshes the row instead of duplicating it.
        CREATE TABLE IF NOT EXISTS news_incidents (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            summary TEXT NOT NULL,
            category TEXT NOT NULL,
            location_name TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            source_url TEXT NOT NULL,
            source_url_hash TEXT NOT NULL UNIQUE,
            published_at TEXT,
            severity INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_news_incidents_location
            ON news_incidents(latitude, longitude);

        CREATE TABLE IF NOT EXISTS notifications (
            id TEXT PRIMARY KEY,
            recipient_id TEXT NOT NULL,
            title TEXT NOT NULL,
            message TEXT NOT NULL,
            kind TEXT NOT NULL,
            is_read INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY (recipient_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_recipient
            ON notifications(recipient_id, created_at);
        "#,
    )
    .await?;

    Ok(())
}
