use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::models::fight::{FightPayload, FightRecord, FightSummaryRow, FighterStatsPayload};

#[derive(Debug)]
pub struct FightQueries {
    pool: PgPool,
}

impl FightQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, fight_id: i64) -> Result<Option<FightRecord>, sqlx::Error> {
        sqlx::query_as::<_, FightRecord>(
            r#"
            SELECT
                fight_id, event_id, fighter1_id, fighter2_id, result, method_of_vic,
                round_num, round_time, stats1_id, stats2_id
            FROM fights
            WHERE fight_id = $1
            "#,
        )
        .bind(fight_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Event, fighter names, method text and both stats records of one fight
    pub async fn find_summary(&self, fight_id: i64) -> Result<Option<FightSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, FightSummaryRow>(
            r#"
            SELECT
                events.event_name,
                events.event_date,
                weight_classes.class AS weight_class,
                fights.result,
                victory_methods.method,
                fights.round_num,
                fights.round_time,
                fights.fighter1_id,
                CONCAT(f1.first_name, ' ', f1.last_name) AS fighter1,
                fights.fighter2_id,
                CONCAT(f2.first_name, ' ', f2.last_name) AS fighter2,
                s1.kd AS kd1,
                s2.kd AS kd2,
                s1.strikes AS strikes1,
                s2.strikes AS strikes2,
                s1.td AS td1,
                s2.td AS td2,
                s1.sub AS sub1,
                s2.sub AS sub2
            FROM fights
                INNER JOIN events ON fights.event_id = events.event_id
                INNER JOIN weight_classes ON fights.weight_class = weight_classes.id
                LEFT JOIN victory_methods ON fights.method_of_vic = victory_methods.id
                INNER JOIN fighters AS f1 ON f1.fighter_id = fights.fighter1_id
                INNER JOIN fighters AS f2 ON f2.fighter_id = fights.fighter2_id
                INNER JOIN fighter_stats AS s1 ON s1.stats_id = fights.stats1_id
                INNER JOIN fighter_stats AS s2 ON s2.stats_id = fights.stats2_id
            WHERE fights.fight_id = $1
            "#,
        )
        .bind(fight_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn event_exists(conn: &mut PgConnection, event_id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM events WHERE event_id = $1)")
            .bind(event_id)
            .fetch_one(conn)
            .await
    }

    /// How many of the given ids name stored fighters
    pub async fn count_fighters(conn: &mut PgConnection, fighter_ids: &[i32]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fighters WHERE fighter_id = ANY($1)")
            .bind(fighter_ids)
            .fetch_one(conn)
            .await
    }

    pub async fn insert_stats(conn: &mut PgConnection, stats: &FighterStatsPayload) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO fighter_stats (kd, strikes, td, sub, fighter_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING stats_id
            "#,
        )
        .bind(stats.kd)
        .bind(stats.strikes)
        .bind(stats.td)
        .bind(stats.sub)
        .bind(stats.fighter_id)
        .fetch_one(conn)
        .await
    }

    pub async fn insert_fight(
        conn: &mut PgConnection,
        fight: &FightPayload,
        stats1_id: i64,
        stats2_id: i64,
    ) -> Result<i64, sqlx::Error> {
        let fight_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO fights (
                event_id, fighter1_id, fighter2_id, round_num, round_time,
                result, method_of_vic, weight_class, stats1_id, stats2_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING fight_id
            "#,
        )
        .bind(fight.event_id)
        .bind(fight.fighter1_id)
        .bind(fight.fighter2_id)
        .bind(fight.round_num)
        .bind(&fight.round_time)
        .bind(fight.result)
        .bind(fight.method_of_vic)
        .bind(fight.weight_class)
        .bind(stats1_id)
        .bind(stats2_id)
        .fetch_one(conn)
        .await?;

        info!("Inserted fight {} ({} vs {})", fight_id, fight.fighter1_id, fight.fighter2_id);
        Ok(fight_id)
    }
}
