use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{FriendRequest, FriendRequestStatus, Friendship, User};

use super::UserRepository;

pub struct FriendRepository;

impl FriendRepository {
    // -- Friendship edges ---------------------------------------------------

    pub async fn create_friendship(conn: &Connection, friendship: &Friendship) -> Result<()> {
        conn.execute(
            "INSERT INTO friendships (id, user_id, friend_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                friendship.id.clone(),
                friendship.user_id.clone(),
                friendship.friend_id.clone(),
                friendship.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    /// The edge is undirected, so both column orders match.
    pub async fn get_friendship(
        conn: &Connection,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<Friendship>> {
        let mut rows = conn
            .query(
                "SELECT id, user_id, friend_id, created_at FROM friendships
                 WHERE (user_id = ?1 AND friend_id = ?2)
                    OR (user_id = ?2 AND friend_id = ?1)",
                params![user_id, friend_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_friendship(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn delete_friendship(
        conn: &Connection,
        user_id: &str,
        friend_id: &str,
    ) -> Result<bool> {
        let affected = conn
            .execute(
                "DELETE FROM friendships
                 WHERE (user_id = ?1 AND friend_id = ?2)
                    OR (user_id = ?2 AND friend_id = ?1)",
                params![user_id, friend_id],
            )
            .await?;

        Ok(affected > 0)
    }

    /// Every friend of `user_id`, whichever column the edge stores them in.
    pub async fn get_friends_by_user_id(conn: &Connection, user_id: &str) -> Result<Vec<User>> {
        let mut rows = conn
            .query(
                "SELECT u.id, u.display_name, u.avatar_url, u.created_at
                 FROM friendships f
                 JOIN users u
                   ON u.id = CASE WHEN f.user_id = ?1 THEN f.friend_id ELSE f.user_id END
                 WHERE f.user_id = ?1 OR f.friend_id = ?1
                 ORDER BY u.display_name",
                params![user_id],
            )
            .await?;

        let mut friends = Vec::new();
        while let Some(row) = rows.next().await? {
            friends.push(UserRepository::row_to_user(&row)?);
        }
        Ok(friends)
    }

    // -- Friend requests ----------------------------------------------------

    pub async fn create_request(conn: &Connection, request: &FriendRequest) -> Result<()> {
        conn.execute(
            "INSERT INTO friend_requests (id, sender_id, receiver_id, status, created_at, responded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                request.id.clone(),
                request.sender_id.clone(),
                request.receiver_id.clone(),
                request.status.to_string(),
                request.created_at.to_rfc3339(),
                request.responded_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_request(conn: &Connection, id: &str) -> Result<Option<FriendRequest>> {
        let mut rows = conn
            .query(
                "SELECT id, sender_id, receiver_id, status, created_at, responded_at
                 FROM friend_requests WHERE id = ?1",
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_request(&row)?))
        } else {
            Ok(None)
        }
    }

    /// A pending request between the pair, sent in either direction.
    pub async fn get_pending_between(
        conn: &Connection,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<FriendRequest>> {
        let mut rows = conn
            .query(
                "SELECT id, sender_id, receiver_id, status, created_at, responded_at
                 FROM friend_requests
                 WHERE status = 'pending'
                   AND ((sender_id = ?1 AND receiver_id = ?2)
                     OR (sender_id = ?2 AND receiver_id = ?1))",
                params![user_a, user_b],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_request(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_pending_for(conn: &Connection, receiver_id: &str) -> Result<Vec<FriendRequest>> {
        let mut rows = conn
            .query(
                "SELECT id, sender_id, receiver_id, status, created_at, responded_at
                 FROM friend_requests
                 WHERE receiver_id = ?1 AND status = 'pending'
                 ORDER BY created_at DESC",
                params![receiver_id],
            )
            .await?;

        let mut requests = Vec::new();
        while let Some(row) = rows.next().await? {
            requests.push(Self::row_to_request(&row)?);
        }
        Ok(requests)
    }

    pub async fn set_request_status(
        conn: &Connection,
        id: &str,
        status: FriendRequestStatus,
    ) -> Result<()> {
        conn.execute(
            "UPDATE friend_requests SET status = ?2, responded_at = ?3 WHERE id = ?1",
            params![id, status.to_string(), Utc::now().to_rfc3339()],
        )
        .await?;

        Ok(())
    }

    // -- Row converters -----------------------------------------------------

    pub fn row_to_friendship(row: &libsql::Row) -> Result<Friendship> {
        Ok(Friendship {
            id: row.get(0)?,
            user_id: row.get(1)?,
            friend_id: row.get(2)?,
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(3)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    pub fn row_to_request(row: &libsql::Row) -> Result<FriendRequest> {
        Ok(FriendRequest {
            id: row.get(0)?,
            sender_id: row.get(1)?,
            receiver_id: row.get(2)?,
            status: row.get::<String>(3)?.parse().unwrap_or_default(),
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(4)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            responded_at: row
                .get::<Option<String>>(5)?
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::models::User;

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        schema::init_schema(&conn).await.unwrap();

        for (id, name) in [("u1", "Alice"), ("u2", "Bob"), ("u3", "Charlie")] {
            crate::db::repository::UserRepository::create(&conn, &User::new(id.into(), name.into()))
                .await
                .unwrap();
        }
        conn
    }

    #[tokio::test]
    async fn test_friendship_is_visible_from_both_sides() {
        let conn = setup_test_db().await;
        FriendRepository::create_friendship(
            &conn,
            &Friendship::new("f1".into(), "u1".into(), "u2".into()),
        )
        .await
        .unwrap();

        let from_u1 = FriendRepository::get_friends_by_user_id(&conn, "u1")
            .await
            .unwrap();
        let from_u2 = FriendRepository::get_friends_by_user_id(&conn, "u2")
            .await
            .unwrap();
        assert_eq!(from_u1.len(), 1);
        assert_eq!(from_u1[0].id, "u2");
        assert_eq!(from_u2.len(), 1);
        assert_eq!(from_u2[0].id, "u1");

        assert!(FriendRepository::get_friendship(&conn, "u2", "u1")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_friendship_either_order() {
        let conn = setup_test_db().await;
        FriendRepository::create_friendship(
            &conn,
            &Friendship::new("f1".into(), "u1".into(), "u2".into()),
        )
        .await
        .unwrap();

        assert!(FriendRepository::delete_friendship(&conn, "u2", "u1")
            .await
            .unwrap());
        assert!(!FriendRepository::delete_friendship(&conn, "u1", "u2")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_pending_request_lookup_both_directions() {
        let conn = setup_test_db().await;
        FriendRepository::create_request(
            &conn,
            &FriendRequest::new("r1".into(), "u1".into(), "u2".into()),
        )
        .await
        .unwrap();

        assert!(FriendRepository::get_pending_between(&conn, "u1", "u2")
            .await
            .unwrap()
            .is_some());
        assert!(FriendRepository::get_pending_between(&conn, "u2", "u1")
            .await
            .unwrap()
            .is_some());
        assert!(FriendRepository::get_pending_between(&conn, "u1", "u3")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_responded_request_is_not_pending() {
        let conn = setup_test_db().await;
        FriendRepository::create_request(
            &conn,
            &FriendRequest::new("r1".into(), "u1".into(), "u2".into()),
        )
        .await
        .unwrap();
        FriendRepository::set_request_status(&conn, "r1", FriendRequestStatus::Rejected)
            .await
            .unwrap();

        assert!(FriendRepository::get_pending_between(&conn, "u1", "u2")
            .await
            .unwrap()
            .is_none());
        let request = FriendRepository::get_request(&conn, "r1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(request.status, FriendRequestStatus::Rejected);
        assert!(request.responded_at.is_some());
    }
}
