use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::models::fighter::{
    FighterDetailRow, FighterListQuery, FighterRecord, FighterSummaryRow, FighterUpdateRequest,
    RecentFightRow,
};

/// One row per fighter per fight (left joins keep fighters without fights), with the
/// win/draw/loss counts windowed over the fighter. Fight-level filters go in the CTE's
/// WHERE so the window only counts matching fights.
const WINDOWED_FIGHTERS: &str = r#"
    WITH windowed AS (
        SELECT
            fighters.fighter_id,
            CONCAT(fighters.first_name, ' ', fighters.last_name) AS name,
            fighters.height,
            fighters.reach,
            stances.stance,
            COUNT(*) FILTER (WHERE fights.result = fighters.fighter_id)
                OVER (PARTITION BY fighters.fighter_id) AS wins,
            COUNT(*) FILTER (WHERE fights.result IS NULL AND fights.method_of_vic IS NOT NULL)
                OVER (PARTITION BY fighters.fighter_id) AS draws,
            COUNT(*) FILTER (
                WHERE fights.result <> fighters.fighter_id
                    AND fights.result IS NOT NULL
                    AND fights.method_of_vic IS NOT NULL
            ) OVER (PARTITION BY fighters.fighter_id) AS losses
        FROM fighters
            LEFT JOIN stances ON fighters.stance_id = stances.id
            LEFT JOIN fights ON fighters.fighter_id = fights.fighter1_id
                OR fighters.fighter_id = fights.fighter2_id
            LEFT JOIN events ON events.event_id = fights.event_id
            LEFT JOIN weight_classes ON fights.weight_class = weight_classes.id
        WHERE TRUE"#;

const DISTINCT_FIGHTERS: &str = r#"
    )
    SELECT DISTINCT fighter_id, name, height, reach, stance, wins, draws, losses
    FROM windowed
    WHERE "#;

fn push_ilike<'args>(
    query_builder: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    needle: &str,
) {
    if needle.is_empty() {
        return;
    }
    query_builder.push(" AND ");
    query_builder.push(column);
    query_builder.push(" ILIKE ");
    query_builder.push_bind(format!("%{}%", needle));
}

/// Builds the filtered, sorted and paginated fighter listing.
///
/// Substring filters are only added when non-empty so that an empty filter also matches
/// fighters without a stance or without fights. Event and weight class narrow the fights
/// being counted; every other filter applies to the windowed rows.
pub fn build_list_query(filter: &FighterListQuery) -> QueryBuilder<'_, Postgres> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(WINDOWED_FIGHTERS);

    push_ilike(&mut query_builder, "events.event_name", &filter.event);
    push_ilike(&mut query_builder, "weight_classes.class", &filter.weight_class);

    query_builder.push(DISTINCT_FIGHTERS);

    query_builder.push("height BETWEEN ");
    query_builder.push_bind(filter.height_min);
    query_builder.push(" AND ");
    query_builder.push_bind(filter.height_max);

    query_builder.push(" AND reach BETWEEN ");
    query_builder.push_bind(filter.reach_min);
    query_builder.push(" AND ");
    query_builder.push_bind(filter.reach_max);

    query_builder.push(" AND wins BETWEEN ");
    query_builder.push_bind(filter.wins_min);
    query_builder.push(" AND ");
    query_builder.push_bind(filter.wins_max);

    query_builder.push(" AND draws BETWEEN ");
    query_builder.push_bind(filter.draws_min);
    query_builder.push(" AND ");
    query_builder.push_bind(filter.draws_max);

    query_builder.push(" AND losses BETWEEN ");
    query_builder.push_bind(filter.losses_min);
    query_builder.push(" AND ");
    query_builder.push_bind(filter.losses_max);

    push_ilike(&mut query_builder, "name", &filter.name);
    push_ilike(&mut query_builder, "stance", &filter.stance);

    // Sort column and direction come from closed enums, never from raw input
    query_builder.push(" ORDER BY ");
    query_builder.push(filter.sort.column());
    query_builder.push(" ");
    query_builder.push(filter.order.keyword());
    query_builder.push(", fighter_id ASC");

    query_builder.push(" LIMIT ");
    query_builder.push_bind(filter.limit);
    query_builder.push(" OFFSET ");
    query_builder.push_bind(filter.offset);

    query_builder
}

#[derive(Debug)]
pub struct FighterQueries {
    pool: PgPool,
}

impl FighterQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Page of fighters with their win/draw/loss record
    pub async fn list(&self, filter: &FighterListQuery) -> Result<Vec<FighterSummaryRow>, sqlx::Error> {
        debug!("Listing fighters with {:?}", filter);

        let mut query_builder = build_list_query(filter);
        query_builder
            .build_query_as::<FighterSummaryRow>()
            .fetch_all(&self.pool)
            .await
    }

    /// Identity attributes plus the full win/draw/loss record
    pub async fn find_detail(&self, fighter_id: i64) -> Result<Option<FighterDetailRow>, sqlx::Error> {
        sqlx::query_as::<_, FighterDetailRow>(
            r#"
            SELECT
                fighters.fighter_id,
                CONCAT(fighters.first_name, ' ', fighters.last_name) AS name,
                fighters.height,
                fighters.reach,
                stances.stance,
                COUNT(fights.fight_id) FILTER (WHERE fights.result = fighters.fighter_id) AS wins,
                COUNT(fights.fight_id) FILTER (
                    WHERE fights.result IS NULL AND fights.method_of_vic IS NOT NULL
                ) AS draws,
                COUNT(fights.fight_id) FILTER (
                    WHERE fights.result <> fighters.fighter_id AND fights.method_of_vic IS NOT NULL
                ) AS losses
            FROM fighters
                LEFT JOIN stances ON fighters.stance_id = stances.id
                LEFT JOIN fights ON fighters.fighter_id = fights.fighter1_id
                    OR fighters.fighter_id = fights.fighter2_id
            WHERE fighters.fighter_id = $1
            GROUP BY fighters.fighter_id, stances.stance
            "#,
        )
        .bind(fighter_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Most recent fights first, with the opponent resolved
    pub async fn recent_fights(&self, fighter_id: i64, limit: i64) -> Result<Vec<RecentFightRow>, sqlx::Error> {
        sqlx::query_as::<_, RecentFightRow>(
            r#"
            SELECT
                fights.fight_id,
                events.event_name,
                opponent.fighter_id AS opponent_id,
                CONCAT(opponent.first_name, ' ', opponent.last_name) AS opponent_name,
                fights.result,
                victory_methods.method,
                weight_classes.class AS weight
            FROM fights
                INNER JOIN events ON fights.event_id = events.event_id
                INNER JOIN weight_classes ON fights.weight_class = weight_classes.id
                LEFT JOIN victory_methods ON fights.method_of_vic = victory_methods.id
                INNER JOIN fighters AS opponent ON opponent.fighter_id = CASE
                    WHEN fights.fighter1_id = $1 THEN fights.fighter2_id
                    ELSE fights.fighter1_id
                END
            WHERE fights.fighter1_id = $1 OR fights.fighter2_id = $1
            ORDER BY DATE(events.event_date) DESC NULLS LAST, fights.fight_id DESC
            LIMIT $2
            "#,
        )
        .bind(fighter_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Id of a stored fighter with the same case-insensitive name, height, reach and
    /// stance, ignoring `exclude_id`.
    pub async fn find_duplicate(
        conn: &mut PgConnection,
        fighter: &FighterRecord,
        exclude_id: Option<i64>,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            SELECT fighter_id
            FROM fighters
            WHERE LOWER(first_name || last_name) = LOWER($1::text || $2::text)
                AND height = $3
                AND reach = $4
                AND stance_id IS NOT DISTINCT FROM $5
                AND ($6::bigint IS NULL OR fighter_id <> $6)
            LIMIT 1
            "#,
        )
        .bind(&fighter.first_name)
        .bind(&fighter.last_name)
        .bind(fighter.height)
        .bind(fighter.reach)
        .bind(fighter.stance_id)
        .bind(exclude_id)
        .fetch_optional(conn)
        .await
    }

    pub async fn insert(conn: &mut PgConnection, fighter: &FighterRecord) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO fighters (first_name, last_name, height, reach, stance_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING fighter_id
            "#,
        )
        .bind(&fighter.first_name)
        .bind(&fighter.last_name)
        .bind(fighter.height)
        .bind(fighter.reach)
        .bind(fighter.stance_id)
        .fetch_one(conn)
        .await
    }

    /// Stored row, locked for the rest of the transaction
    pub async fn find_record_for_update(
        conn: &mut PgConnection,
        fighter_id: i64,
    ) -> Result<Option<FighterRecord>, sqlx::Error> {
        sqlx::query_as::<_, FighterRecord>(
            r#"
            SELECT first_name, last_name, height, reach, stance_id
            FROM fighters
            WHERE fighter_id = $1
            FOR UPDATE
            "#,
        )
        .bind(fighter_id)
        .fetch_optional(conn)
        .await
    }

    /// Writes only the fields present in `update` and returns the resulting row.
    /// `update` must not be empty.
    pub async fn update(
        conn: &mut PgConnection,
        fighter_id: i64,
        update: &FighterUpdateRequest,
    ) -> Result<FighterRecord, sqlx::Error> {
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE fighters SET ");
        let mut assignments = query_builder.separated(", ");

        if let Some(first_name) = &update.first_name {
            assignments.push("first_name = ");
            assignments.push_bind_unseparated(first_name);
        }
        if let Some(last_name) = &update.last_name {
            assignments.push("last_name = ");
            assignments.push_bind_unseparated(last_name);
        }
        if let Some(height) = update.height {
            assignments.push("height = ");
            assignments.push_bind_unseparated(height);
        }
        if let Some(reach) = update.reach {
            assignments.push("reach = ");
            assignments.push_bind_unseparated(reach);
        }
        if let Some(stance_id) = update.stance_id {
            assignments.push("stance_id = ");
            assignments.push_bind_unseparated(stance_id);
        }

        query_builder.push(" WHERE fighter_id = ");
        query_builder.push_bind(fighter_id);
        query_builder.push(" RETURNING first_name, last_name, height, reach, stance_id");

        query_builder
            .build_query_as::<FighterRecord>()
            .fetch_one(conn)
            .await
    }
}
