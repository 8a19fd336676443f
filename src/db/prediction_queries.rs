use sqlx::{PgConnection, PgPool};

use crate::models::prediction::{FightParticipantsRow, PredictionTallyRow, PredictionTargetRow};

#[derive(Debug)]
pub struct PredictionQueries {
    pool: PgPool,
}

impl PredictionQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Both fighters' names and how the fight ended
    pub async fn find_participants(&self, fight_id: i64) -> Result<Option<FightParticipantsRow>, sqlx::Error> {
        sqlx::query_as::<_, FightParticipantsRow>(
            r#"
            SELECT
                fights.fighter1_id,
                CONCAT(f1.first_name, ' ', f1.last_name) AS fighter1,
                fights.fighter2_id,
                CONCAT(f2.first_name, ' ', f2.last_name) AS fighter2,
                fights.result,
                victory_methods.method
            FROM fights
                INNER JOIN fighters AS f1 ON f1.fighter_id = fights.fighter1_id
                INNER JOIN fighters AS f2 ON f2.fighter_id = fights.fighter2_id
                LEFT JOIN victory_methods ON fights.method_of_vic = victory_methods.id
            WHERE fights.fight_id = $1
            "#,
        )
        .bind(fight_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Predictions per side; zero when nobody has predicted the fight yet
    pub async fn tally(&self, fight_id: i64) -> Result<PredictionTallyRow, sqlx::Error> {
        sqlx::query_as::<_, PredictionTallyRow>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE predictions.fighter_id = fights.fighter1_id) AS fighter1_count,
                COUNT(*) FILTER (WHERE predictions.fighter_id = fights.fighter2_id) AS fighter2_count
            FROM predictions
                INNER JOIN fights ON predictions.fight_id = fights.fight_id
            WHERE predictions.fight_id = $1
            "#,
        )
        .bind(fight_id)
        .fetch_one(&self.pool)
        .await
    }

    /// The fight and its event date, only when `fighter_id` fought in it
    pub async fn find_target(
        conn: &mut PgConnection,
        fight_id: i64,
        fighter_id: i32,
    ) -> Result<Option<PredictionTargetRow>, sqlx::Error> {
        sqlx::query_as::<_, PredictionTargetRow>(
            r#"
            SELECT fights.fight_id, events.event_date
            FROM fights
                INNER JOIN events ON fights.event_id = events.event_id
            WHERE fights.fight_id = $1
                AND (fights.fighter1_id = $2 OR fights.fighter2_id = $2)
            "#,
        )
        .bind(fight_id)
        .bind(fighter_id)
        .fetch_optional(conn)
        .await
    }

    pub async fn insert(
        conn: &mut PgConnection,
        fight_id: i64,
        fighter_id: i32,
        user_id: i32,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO predictions (fight_id, fighter_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING prediction_id
            "#,
        )
        .bind(fight_id)
        .bind(fighter_id)
        .bind(user_id)
        .fetch_one(conn)
        .await
    }
}
