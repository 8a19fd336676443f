use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, PgPool};

use crate::models::event::{EventDetail, EventFightRow, EventRequest};

#[derive(Debug)]
pub struct EventQueries {
    pool: PgPool,
}

impl EventQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, event_id: i64) -> Result<Option<EventDetail>, sqlx::Error> {
        sqlx::query_as::<_, EventDetail>(
            r#"
            SELECT events.event_name, events.event_date, venue.venue_name AS venue, events.attendance
            FROM events
                INNER JOIN venue ON events.venue_id = venue.venue_id
            WHERE events.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Every fight of every event whose name contains `event_name`, newest event first
    pub async fn fights_by_event_name(&self, event_name: &str) -> Result<Vec<EventFightRow>, sqlx::Error> {
        sqlx::query_as::<_, EventFightRow>(
            r#"
            SELECT
                fights.fight_id,
                CONCAT(f1.first_name, ' ', f1.last_name) AS fighter1,
                f1.fighter_id AS fighter1_id,
                CONCAT(f2.first_name, ' ', f2.last_name) AS fighter2,
                f2.fighter_id AS fighter2_id,
                victory_methods.method,
                fights.result,
                events.event_name,
                events.event_id,
                DATE(events.event_date) AS event_date,
                venue.venue_name
            FROM fights
                INNER JOIN fighters AS f1 ON f1.fighter_id = fights.fighter1_id
                INNER JOIN fighters AS f2 ON f2.fighter_id = fights.fighter2_id
                INNER JOIN events ON events.event_id = fights.event_id
                INNER JOIN venue ON venue.venue_id = events.venue_id
                LEFT JOIN victory_methods ON fights.method_of_vic = victory_methods.id
            WHERE events.event_name ILIKE $1
            ORDER BY DATE(events.event_date) DESC, fights.fight_id
            "#,
        )
        .bind(format!("%{}%", event_name))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn venue_exists(conn: &mut PgConnection, venue_id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM venue WHERE venue_id = $1)")
            .bind(venue_id)
            .fetch_one(conn)
            .await
    }

    pub async fn insert(
        conn: &mut PgConnection,
        event: &EventRequest,
        event_date: NaiveDate,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO events (event_name, event_date, venue_id, attendance)
            VALUES ($1, $2, $3, $4)
            RETURNING event_id
            "#,
        )
        .bind(&event.event_name)
        .bind(event_date.and_time(NaiveTime::MIN))
        .bind(event.venue_id)
        .bind(event.attendance)
        .fetch_one(conn)
        .await
    }
}
