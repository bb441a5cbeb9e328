//! The seeding orchestrator.
//!
//! Seeding runs the entity steps in dependency order. Each step returns an
//! [`IdMap`] from fixture key to the id the server generated, and later steps
//! resolve their references through those maps.
//!
//! Guarded seeding is skipped as soon as the anchor table holds any rows.
//! Only the anchor is inspected, so a database whose earlier seed failed
//! half-way stays half-seeded until a forced seed runs.
//!
//! Forced seeding empties every table first with foreign-key checks
//! suspended. The truncates are separate statements; an interruption between
//! them leaves some tables emptied and others not.

use std::collections::HashMap;
use std::time::Instant;

use seangkatan_mysql::SqlValue;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{MigrateResult, MigrationError};
use crate::executor::Executor;
use crate::fixtures::{ALBUMS, BADGES, CHAT_ROOMS, CLASSES, EVENTS, QUIZZES, STICKERS, USERS};
use crate::password::PasswordHasher;
use crate::schema::{ANCHOR_TABLE, TableDefinition, truncation_order};

const INSERT_USER: &str =
    "INSERT INTO users (username, email, password_hash, role, full_name, phone) \
     VALUES (?, ?, ?, ?, ?, ?)";
const INSERT_CLASS: &str =
    "INSERT INTO classes (name, grade_level, academic_year, teacher_id) VALUES (?, ?, ?, ?)";
const INSERT_BADGE: &str =
    "INSERT INTO badges (name, description, icon, category, criteria_type, \
     criteria_value, criteria_category) VALUES (?, ?, ?, ?, ?, ?, ?)";
const INSERT_STICKER: &str =
    "INSERT INTO stickers (name, category, image_path, image_url, pack_name, \
     description) VALUES (?, ?, ?, ?, ?, ?)";
const INSERT_EVENT: &str =
    "INSERT INTO events (title, description, type, event_date, start_time, \
     end_time, location, created_by, max_participants, class_id) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const INSERT_QUIZ: &str =
    "INSERT INTO quizzes (title, description, category, difficulty, time_limit, \
     created_by, class_id) VALUES (?, ?, ?, ?, ?, ?, ?)";
const INSERT_ALBUM: &str =
    "INSERT INTO albums (title, description, class_id, created_by, is_public, \
     allow_download, tags) VALUES (?, ?, ?, ?, ?, ?, ?)";
const INSERT_CHAT_ROOM: &str =
    "INSERT INTO chat_rooms (name, type, class_id, description, members, \
     moderators, settings, created_by) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

/// How seeding treats existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Skip when the anchor table already has rows.
    #[default]
    Guarded,
    /// Empty every table, then seed.
    Force,
}

impl SeedMode {
    /// `Force` when `force` is set.
    pub fn from_force(force: bool) -> Self {
        if force { Self::Force } else { Self::Guarded }
    }
}

/// What a seed run did. Failures are the `Err` side of [`seed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SeedOutcome {
    /// Fixture data was inserted.
    Applied(SeedReport),
    /// The anchor table already held rows; nothing was changed.
    SkippedAlreadySeeded {
        /// Rows found in the anchor table.
        anchor_rows: u64,
    },
}

/// Summary of an applied seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Tables emptied beforehand, in truncation order. Empty unless forced.
    pub truncated: Vec<&'static str>,
    /// Rows inserted per table, in seeding order.
    pub inserted: Vec<(&'static str, usize)>,
    /// Wall time in milliseconds.
    #[serde(skip)]
    pub duration_ms: u64,
}

impl SeedReport {
    /// Total rows inserted.
    pub fn total_rows(&self) -> usize {
        self.inserted.iter().map(|(_, n)| n).sum()
    }
}

/// Fixture key to generated id, for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdMap {
    entity: &'static str,
    ids: HashMap<&'static str, u64>,
}

impl IdMap {
    fn new(entity: &'static str) -> Self {
        Self {
            entity,
            ids: HashMap::new(),
        }
    }

    fn record(&mut self, key: &'static str, id: u64) {
        self.ids.insert(key, id);
    }

    /// Id generated for `key`.
    pub fn resolve(&self, key: &str) -> MigrateResult<u64> {
        self.ids
            .get(key)
            .copied()
            .ok_or_else(|| MigrationError::UnresolvedReference {
                entity: self.entity,
                key: key.to_string(),
            })
    }

    fn resolve_opt(&self, key: Option<&str>) -> MigrateResult<Option<u64>> {
        key.map(|k| self.resolve(k)).transpose()
    }

    fn resolve_all(&self, keys: &[&str]) -> MigrateResult<Vec<u64>> {
        keys.iter().map(|k| self.resolve(k)).collect()
    }

    /// Number of recorded ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Ids generated by every entity step of one seed run.
#[derive(Debug, Clone)]
pub struct SeededIds {
    /// User ids by username.
    pub users: IdMap,
    /// Class ids by class name.
    pub classes: IdMap,
    /// Badge ids by name.
    pub badges: IdMap,
    /// Sticker ids by name.
    pub stickers: IdMap,
    /// Event ids by title.
    pub events: IdMap,
    /// Quiz ids by title.
    pub quizzes: IdMap,
    /// Album ids by title.
    pub albums: IdMap,
    /// Chat room ids by name.
    pub chat_rooms: IdMap,
}

impl SeededIds {
    /// Rows inserted per table, in seeding order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("users", self.users.len()),
            ("classes", self.classes.len()),
            ("badges", self.badges.len()),
            ("stickers", self.stickers.len()),
            ("events", self.events.len()),
            ("quizzes", self.quizzes.len()),
            ("albums", self.albums.len()),
            ("chat_rooms", self.chat_rooms.len()),
        ]
    }
}

/// Seed the fixture data set.
pub async fn seed<E>(
    executor: &mut E,
    hasher: &dyn PasswordHasher,
    tables: &[TableDefinition],
    mode: SeedMode,
) -> MigrateResult<SeedOutcome>
where
    E: Executor + ?Sized,
{
    let started = Instant::now();

    let truncated = match mode {
        SeedMode::Guarded => {
            let anchor_rows = executor
                .count(&format!("SELECT COUNT(*) FROM `{}`", ANCHOR_TABLE))
                .await?;
            if anchor_rows > 0 {
                warn!(
                    table = ANCHOR_TABLE,
                    rows = anchor_rows,
                    "Database already seeded, skipping"
                );
                return Ok(SeedOutcome::SkippedAlreadySeeded { anchor_rows });
            }
            Vec::new()
        }
        SeedMode::Force => {
            warn!("Force mode: emptying every table before seeding");
            truncate_all(executor, tables).await?
        }
    };

    let ids = seed_all(executor, hasher).await?;
    let report = SeedReport {
        truncated,
        inserted: ids.counts(),
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        rows = report.total_rows(),
        duration_ms = report.duration_ms,
        "Seeding complete"
    );
    Ok(SeedOutcome::Applied(report))
}

/// Empty every table, children first, with foreign-key checks suspended.
///
/// Checks are switched back on even when a truncate fails.
pub async fn truncate_all<E>(
    executor: &mut E,
    tables: &[TableDefinition],
) -> MigrateResult<Vec<&'static str>>
where
    E: Executor + ?Sized,
{
    executor.execute("SET FOREIGN_KEY_CHECKS = 0").await?;

    let result = truncate_each(executor, &truncation_order(tables)).await;
    let restored = executor.execute("SET FOREIGN_KEY_CHECKS = 1").await;

    match (result, restored) {
        (Ok(truncated), Ok(_)) => Ok(truncated),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(_)) => Err(e),
        (Err(e), Err(restore_err)) => {
            warn!(error = %restore_err, "Could not re-enable foreign key checks");
            Err(e)
        }
    }
}

async fn truncate_each<E>(
    executor: &mut E,
    order: &[&'static str],
) -> MigrateResult<Vec<&'static str>>
where
    E: Executor + ?Sized,
{
    let mut truncated = Vec::with_capacity(order.len());
    for &table in order {
        executor
            .execute(&format!("TRUNCATE TABLE `{}`", table))
            .await
            .map_err(|source| MigrationError::Truncate { table, source })?;
        debug!(table, "Table emptied");
        truncated.push(table);
    }
    Ok(truncated)
}

/// Run every entity step in dependency order.
pub async fn seed_all<E>(executor: &mut E, hasher: &dyn PasswordHasher) -> MigrateResult<SeededIds>
where
    E: Executor + ?Sized,
{
    let users = seed_users(executor, hasher).await?;
    let classes = seed_classes(executor, &users).await?;
    let badges = seed_badges(executor).await?;
    let stickers = seed_stickers(executor).await?;
    let events = seed_events(executor, &users, &classes).await?;
    let quizzes = seed_quizzes(executor, &users, &classes).await?;
    let albums = seed_albums(executor, &users, &classes).await?;
    let chat_rooms = seed_chat_rooms(executor, &users, &classes).await?;

    Ok(SeededIds {
        users,
        classes,
        badges,
        stickers,
        events,
        quizzes,
        albums,
        chat_rooms,
    })
}

async fn insert_row<E>(
    executor: &mut E,
    table: &'static str,
    sql: &str,
    params: Vec<SqlValue>,
) -> MigrateResult<u64>
where
    E: Executor + ?Sized,
{
    executor
        .insert(sql, params)
        .await
        .map_err(|source| MigrationError::Seed { table, source })
}

/// Insert the sample accounts with hashed passwords, keyed by username.
pub async fn seed_users<E>(executor: &mut E, hasher: &dyn PasswordHasher) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = USERS.len(), "Seeding users");
    let mut ids = IdMap::new("user");

    for user in USERS {
        let password_hash = hasher.hash(user.password)?;
        let id = insert_row(
            executor,
            "users",
            INSERT_USER,
            vec![
                user.username.into(),
                user.email.into(),
                password_hash.into(),
                user.role.as_str().into(),
                user.full_name.into(),
                user.phone.into(),
            ],
        )
        .await?;
        debug!(username = user.username, id, "User added");
        ids.record(user.username, id);
    }

    Ok(ids)
}

/// Insert the classes, resolving each homeroom teacher. Keyed by class name.
pub async fn seed_classes<E>(executor: &mut E, users: &IdMap) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = CLASSES.len(), "Seeding classes");
    let mut ids = IdMap::new("class");

    for class in CLASSES {
        let teacher_id = users.resolve_opt(class.teacher)?;
        let id = insert_row(
            executor,
            "classes",
            INSERT_CLASS,
            vec![
                class.name.into(),
                class.grade_level.into(),
                class.academic_year.into(),
                teacher_id.into(),
            ],
        )
        .await?;
        debug!(class = class.name, id, "Class added");
        ids.record(class.name, id);
    }

    Ok(ids)
}

/// Insert the badge catalogue, keyed by badge name.
pub async fn seed_badges<E>(executor: &mut E) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = BADGES.len(), "Seeding badges");
    let mut ids = IdMap::new("badge");

    for badge in BADGES {
        let id = insert_row(
            executor,
            "badges",
            INSERT_BADGE,
            vec![
                badge.name.into(),
                badge.description.into(),
                badge.icon.into(),
                badge.category.into(),
                badge.criteria_type.into(),
                badge.criteria_value.into(),
                badge.criteria_category.into(),
            ],
        )
        .await?;
        debug!(badge = badge.name, id, "Badge added");
        ids.record(badge.name, id);
    }

    Ok(ids)
}

/// Insert the sticker packs, keyed by sticker name.
pub async fn seed_stickers<E>(executor: &mut E) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = STICKERS.len(), "Seeding stickers");
    let mut ids = IdMap::new("sticker");

    for sticker in STICKERS {
        let id = insert_row(
            executor,
            "stickers",
            INSERT_STICKER,
            vec![
                sticker.name.into(),
                sticker.category.into(),
                sticker.image_path.into(),
                sticker.image_url.into(),
                sticker.pack_name.into(),
                sticker.description.into(),
            ],
        )
        .await?;
        debug!(sticker = sticker.name, id, "Sticker added");
        ids.record(sticker.name, id);
    }

    Ok(ids)
}

/// Insert the calendar events, keyed by title.
///
/// Events without a class are school-wide and get a NULL `class_id`.
pub async fn seed_events<E>(
    executor: &mut E,
    users: &IdMap,
    classes: &IdMap,
) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = EVENTS.len(), "Seeding events");
    let mut ids = IdMap::new("event");

    for event in EVENTS {
        let created_by = users.resolve(event.created_by)?;
        let class_id = classes.resolve_opt(event.class)?;
        let id = insert_row(
            executor,
            "events",
            INSERT_EVENT,
            vec![
                event.title.into(),
                event.description.into(),
                event.kind.into(),
                event.event_date.into(),
                event.start_time.into(),
                event.end_time.into(),
                event.location.into(),
                created_by.into(),
                event.max_participants.into(),
                class_id.into(),
            ],
        )
        .await?;
        debug!(event = event.title, id, "Event added");
        ids.record(event.title, id);
    }

    Ok(ids)
}

/// Insert the quizzes, keyed by title.
pub async fn seed_quizzes<E>(
    executor: &mut E,
    users: &IdMap,
    classes: &IdMap,
) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = QUIZZES.len(), "Seeding quizzes");
    let mut ids = IdMap::new("quiz");

    for quiz in QUIZZES {
        let created_by = users.resolve(quiz.created_by)?;
        let class_id = classes.resolve_opt(quiz.class)?;
        let id = insert_row(
            executor,
            "quizzes",
            INSERT_QUIZ,
            vec![
                quiz.title.into(),
                quiz.description.into(),
                quiz.category.into(),
                quiz.difficulty.into(),
                quiz.time_limit.into(),
                created_by.into(),
                class_id.into(),
            ],
        )
        .await?;
        debug!(quiz = quiz.title, id, "Quiz added");
        ids.record(quiz.title, id);
    }

    Ok(ids)
}

/// Insert the photo albums with their tags as a JSON array, keyed by title.
pub async fn seed_albums<E>(
    executor: &mut E,
    users: &IdMap,
    classes: &IdMap,
) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = ALBUMS.len(), "Seeding albums");
    let mut ids = IdMap::new("album");

    for album in ALBUMS {
        let created_by = users.resolve(album.created_by)?;
        let class_id = classes.resolve_opt(album.class)?;
        let id = insert_row(
            executor,
            "albums",
            INSERT_ALBUM,
            vec![
                album.title.into(),
                album.description.into(),
                class_id.into(),
                created_by.into(),
                album.is_public.into(),
                album.allow_download.into(),
                json!(album.tags).into(),
            ],
        )
        .await?;
        debug!(album = album.title, id, "Album added");
        ids.record(album.title, id);
    }

    Ok(ids)
}

/// Insert the chat rooms, keyed by name.
///
/// Members and moderators are stored as JSON arrays of user ids.
pub async fn seed_chat_rooms<E>(
    executor: &mut E,
    users: &IdMap,
    classes: &IdMap,
) -> MigrateResult<IdMap>
where
    E: Executor + ?Sized,
{
    info!(count = CHAT_ROOMS.len(), "Seeding chat rooms");
    let mut ids = IdMap::new("chat room");

    for room in CHAT_ROOMS {
        let class_id = classes.resolve_opt(room.class)?;
        let members = users.resolve_all(room.members)?;
        let moderators = users.resolve_all(room.moderators)?;
        let created_by = users.resolve(room.created_by)?;
        let id = insert_row(
            executor,
            "chat_rooms",
            INSERT_CHAT_ROOM,
            vec![
                room.name.into(),
                room.kind.into(),
                class_id.into(),
                room.description.into(),
                json!(members).into(),
                json!(moderators).into(),
                json!(room.settings).into(),
                created_by.into(),
            ],
        )
        .await?;
        debug!(room = room.name, id, "Chat room added");
        ids.record(room.name, id);
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use seangkatan_mysql::MysqlError;
    use serde_json::json;

    use super::*;
    use crate::fixtures::expected_row_counts;
    use crate::password::Argon2Hasher;
    use crate::schema::{TABLES, apply_schema};
    use crate::testing::{FakeExecutor, PlainHasher};

    async fn with_schema() -> FakeExecutor {
        let mut db = FakeExecutor::new();
        apply_schema(&mut db, TABLES).await.unwrap();
        db
    }

    fn seeded_counts(db: &FakeExecutor) -> Vec<(&'static str, usize)> {
        expected_row_counts()
            .into_iter()
            .map(|(table, _)| (table, db.row_count(table) as usize))
            .collect()
    }

    #[test]
    fn test_seed_mode_from_force() {
        assert_eq!(SeedMode::from_force(true), SeedMode::Force);
        assert_eq!(SeedMode::from_force(false), SeedMode::Guarded);
        assert_eq!(SeedMode::default(), SeedMode::Guarded);
    }

    #[tokio::test]
    async fn test_guarded_seed_on_empty_schema() {
        let mut db = with_schema().await;

        let outcome = seed(&mut db, &PlainHasher, TABLES, SeedMode::Guarded)
            .await
            .unwrap();

        let SeedOutcome::Applied(report) = outcome else {
            panic!("expected seed to apply, got {outcome:?}");
        };
        assert!(report.truncated.is_empty());
        assert_eq!(report.inserted, expected_row_counts());
        assert_eq!(report.total_rows(), 27);
        assert_eq!(seeded_counts(&db), expected_row_counts());
    }

    #[tokio::test]
    async fn test_guarded_seed_skips_when_anchor_has_rows() {
        let mut db = with_schema().await.with_rows("users", 3);

        let outcome = seed(&mut db, &PlainHasher, TABLES, SeedMode::Guarded)
            .await
            .unwrap();

        assert_eq!(outcome, SeedOutcome::SkippedAlreadySeeded { anchor_rows: 3 });
        for table in TABLES {
            let expected = if table.name == "users" { 3 } else { 0 };
            assert_eq!(db.row_count(table.name), expected, "{}", table.name);
        }
        assert!(db.inserted("users").is_empty());
    }

    #[tokio::test]
    async fn test_guarded_seed_only_checks_anchor() {
        // A half-finished earlier run: classes seeded, users empty.
        let mut db = with_schema().await.with_rows("classes", 2);

        let outcome = seed(&mut db, &PlainHasher, TABLES, SeedMode::Guarded)
            .await
            .unwrap();

        assert!(matches!(outcome, SeedOutcome::Applied(_)));
        assert_eq!(db.row_count("classes"), 2 + CLASSES.len() as u64);
    }

    #[tokio::test]
    async fn test_forced_seed_replaces_existing_rows() {
        let mut db = with_schema().await;
        seed(&mut db, &PlainHasher, TABLES, SeedMode::Guarded)
            .await
            .unwrap();

        let outcome = seed(&mut db, &PlainHasher, TABLES, SeedMode::Force)
            .await
            .unwrap();

        let SeedOutcome::Applied(report) = outcome else {
            panic!("expected seed to apply, got {outcome:?}");
        };
        assert_eq!(report.truncated, truncation_order(TABLES));
        assert_eq!(seeded_counts(&db), expected_row_counts());
        assert!(db.foreign_key_checks());
    }

    #[tokio::test]
    async fn test_forced_seed_suspends_foreign_key_checks_around_truncates() {
        let mut db = with_schema().await;
        seed(&mut db, &PlainHasher, TABLES, SeedMode::Force)
            .await
            .unwrap();

        let statements = db.statements();
        let first_truncate = statements
            .iter()
            .position(|s| s.starts_with("TRUNCATE"))
            .unwrap();
        let last_truncate = statements
            .iter()
            .rposition(|s| s.starts_with("TRUNCATE"))
            .unwrap();

        assert_eq!(statements[first_truncate - 1], "SET FOREIGN_KEY_CHECKS = 0");
        assert_eq!(statements[last_truncate + 1], "SET FOREIGN_KEY_CHECKS = 1");
        assert_eq!(last_truncate - first_truncate + 1, TABLES.len());
    }

    #[tokio::test]
    async fn test_failed_truncate_restores_checks_and_leaves_partial_state() {
        let mut db = with_schema().await;
        seed(&mut db, &PlainHasher, TABLES, SeedMode::Guarded)
            .await
            .unwrap();
        let mut db = db.fail_on("TRUNCATE TABLE `classes`");

        let err = seed(&mut db, &PlainHasher, TABLES, SeedMode::Force)
            .await
            .unwrap_err();

        assert!(matches!(err, MigrationError::Truncate { table: "classes", .. }));
        assert!(db.foreign_key_checks());
        // Known gap: children emptied before the failure stay empty.
        assert_eq!(db.row_count("chat_rooms"), 0);
        assert_eq!(db.row_count("events"), 0);
        assert_eq!(db.row_count("classes"), CLASSES.len() as u64);
        assert_eq!(db.row_count("users"), USERS.len() as u64);
    }

    #[tokio::test]
    async fn test_references_use_generated_ids() {
        // Existing rows shift the auto-increment sequence.
        let mut db = with_schema().await.with_rows("users", 10);

        let ids = seed_all(&mut db, &PlainHasher).await.unwrap();

        let teacher1 = ids.users.resolve("teacher1").unwrap();
        assert_eq!(teacher1, 13);

        let classes = db.inserted("classes");
        assert_eq!(classes[0][3], SqlValue::Int(13));

        let rooms = db.inserted("chat_rooms");
        let student1 = ids.users.resolve("student1").unwrap();
        let student2 = ids.users.resolve("student2").unwrap();
        assert_eq!(
            rooms[0][4],
            SqlValue::Json(json!([teacher1, student1, student2]))
        );
        assert_eq!(rooms[0][5], SqlValue::Json(json!([teacher1])));
        assert_eq!(
            rooms[0][6],
            SqlValue::Json(json!({
                "allow_media": true,
                "allow_stickers": true,
                "moderation_enabled": true
            }))
        );
    }

    #[tokio::test]
    async fn test_school_wide_records_have_null_class() {
        let mut db = with_schema().await;
        seed_all(&mut db, &PlainHasher).await.unwrap();

        let events = db.inserted("events");
        assert!(!events[0][9].is_null());
        assert!(events[1][9].is_null());

        let albums = db.inserted("albums");
        assert_eq!(albums[1][2], SqlValue::Null);
        assert_eq!(
            albums[1][6],
            SqlValue::Json(json!(["lomba", "2024", "kompetisi"]))
        );
    }

    #[tokio::test]
    async fn test_passwords_are_hashed() {
        let mut db = with_schema().await;
        let hasher = Argon2Hasher::new();
        seed_users(&mut db, &hasher).await.unwrap();

        let users = db.inserted("users");
        assert_eq!(users.len(), USERS.len());
        let mut hashes = std::collections::HashSet::new();
        for row in users {
            let SqlValue::Text(hash) = &row[2] else {
                panic!("password hash should be text");
            };
            assert_ne!(hash, "password123");
            assert!(hasher.verify("password123", hash).unwrap());
            assert!(hashes.insert(hash.clone()), "hashes must be salted per user");
        }
    }

    #[tokio::test]
    async fn test_insert_failure_names_table() {
        let mut db = with_schema().await.fail_on("INSERT INTO events");

        let err = seed(&mut db, &PlainHasher, TABLES, SeedMode::Guarded)
            .await
            .unwrap_err();

        match err {
            MigrationError::Seed { table, source } => {
                assert_eq!(table, "events");
                assert!(matches!(source, MysqlError::Query(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Steps before the failure are kept.
        assert_eq!(db.row_count("stickers"), STICKERS.len() as u64);
        assert_eq!(db.row_count("quizzes"), 0);
    }

    #[tokio::test]
    async fn test_seed_without_schema_fails() {
        let mut db = FakeExecutor::new();

        let err = seed(&mut db, &PlainHasher, TABLES, SeedMode::Guarded)
            .await
            .unwrap_err();

        assert!(matches!(err, MigrationError::Database(MysqlError::Query(_))));
    }

    #[test]
    fn test_unresolved_reference() {
        let ids = IdMap::new("user");
        let err = ids.resolve("ghost").unwrap_err();
        assert_eq!(err.to_string(), "Fixture references unknown user 'ghost'");
    }
}
