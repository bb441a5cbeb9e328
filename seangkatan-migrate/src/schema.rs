//! The fixed table graph and the schema applier.
//!
//! [`TABLES`] is ordered so that every table comes after the tables its
//! foreign keys reference. Creation walks it forward; forced truncation walks
//! it backward.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{MigrateResult, MigrationError};
use crate::executor::Executor;

/// One table of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name.
    pub name: &'static str,
    /// Other tables referenced by foreign keys. Self references are omitted.
    pub depends_on: &'static [&'static str],
    /// Idempotent `CREATE TABLE IF NOT EXISTS` statement.
    pub ddl: &'static str,
}

/// Table whose row count decides whether guarded seeding runs.
pub const ANCHOR_TABLE: &str = "users";

/// Every table, in dependency order.
pub const TABLES: &[TableDefinition] = &[
    TableDefinition {
        name: "users",
        depends_on: &[],
        ddl: r#"CREATE TABLE IF NOT EXISTS users (
        id INT PRIMARY KEY AUTO_INCREMENT,
        username VARCHAR(50) UNIQUE NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        role ENUM('owner', 'school_admin', 'teacher', 'parent', 'student') NOT NULL,
        full_name VARCHAR(100) NOT NULL,
        phone VARCHAR(20),
        is_active BOOLEAN DEFAULT TRUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
      )"#,
    },
    TableDefinition {
        name: "classes",
        depends_on: &["users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS classes (
        id INT PRIMARY KEY AUTO_INCREMENT,
        name VARCHAR(100) NOT NULL,
        grade_level VARCHAR(20) NOT NULL,
        academic_year VARCHAR(20) NOT NULL,
        teacher_id INT,
        is_active BOOLEAN DEFAULT TRUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (teacher_id) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "events",
        depends_on: &["users", "classes"],
        ddl: r#"CREATE TABLE IF NOT EXISTS events (
        id INT PRIMARY KEY AUTO_INCREMENT,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        type ENUM('parent_meeting', 'class_competition') NOT NULL,
        event_date DATE NOT NULL,
        start_time TIME NOT NULL,
        end_time TIME NOT NULL,
        location VARCHAR(200),
        created_by INT NOT NULL,
        max_participants INT DEFAULT 0,
        status ENUM('active', 'cancelled', 'completed') DEFAULT 'active',
        class_id INT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        FOREIGN KEY (created_by) REFERENCES users(id),
        FOREIGN KEY (class_id) REFERENCES classes(id)
      )"#,
    },
    TableDefinition {
        name: "event_bookings",
        depends_on: &["events", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS event_bookings (
        id INT PRIMARY KEY AUTO_INCREMENT,
        event_id INT NOT NULL,
        user_id INT NOT NULL,
        student_id INT,
        time_slot DATETIME NOT NULL,
        status ENUM('pending', 'confirmed', 'cancelled') DEFAULT 'pending',
        notes TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE,
        FOREIGN KEY (user_id) REFERENCES users(id),
        FOREIGN KEY (student_id) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "quizzes",
        depends_on: &["users", "classes"],
        ddl: r#"CREATE TABLE IF NOT EXISTS quizzes (
        id INT PRIMARY KEY AUTO_INCREMENT,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        category ENUM('reading', 'writing', 'math', 'science') NOT NULL,
        difficulty ENUM('easy', 'medium', 'hard') NOT NULL,
        time_limit INT DEFAULT 0,
        created_by INT NOT NULL,
        class_id INT,
        is_active BOOLEAN DEFAULT TRUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        FOREIGN KEY (created_by) REFERENCES users(id),
        FOREIGN KEY (class_id) REFERENCES classes(id)
      )"#,
    },
    TableDefinition {
        name: "quiz_questions",
        depends_on: &["quizzes", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS quiz_questions (
        id INT PRIMARY KEY AUTO_INCREMENT,
        quiz_id INT,
        question TEXT NOT NULL,
        type ENUM('multiple_choice', 'true_false', 'fill_blank') NOT NULL,
        options JSON,
        correct_answer TEXT NOT NULL,
        points INT DEFAULT 1,
        difficulty ENUM('easy', 'medium', 'hard') DEFAULT 'medium',
        explanation TEXT,
        order_number INT DEFAULT 1,
        created_by INT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (quiz_id) REFERENCES quizzes(id) ON DELETE CASCADE,
        FOREIGN KEY (created_by) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "quiz_question_options",
        depends_on: &["quiz_questions"],
        ddl: r#"CREATE TABLE IF NOT EXISTS quiz_question_options (
        id INT PRIMARY KEY AUTO_INCREMENT,
        question_id INT NOT NULL,
        option_text VARCHAR(500) NOT NULL,
        option_order INT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (question_id) REFERENCES quiz_questions(id) ON DELETE CASCADE
      )"#,
    },
    TableDefinition {
        name: "quiz_attempts",
        depends_on: &["quizzes", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS quiz_attempts (
        id INT PRIMARY KEY AUTO_INCREMENT,
        quiz_id INT NOT NULL,
        student_id INT NOT NULL,
        total_score INT DEFAULT 0,
        max_score INT NOT NULL,
        percentage DECIMAL(5,2) DEFAULT 0,
        time_spent INT DEFAULT 0,
        completed_at TIMESTAMP NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (quiz_id) REFERENCES quizzes(id),
        FOREIGN KEY (student_id) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "quiz_answers",
        depends_on: &["quiz_attempts", "quiz_questions"],
        ddl: r#"CREATE TABLE IF NOT EXISTS quiz_answers (
        id INT PRIMARY KEY AUTO_INCREMENT,
        attempt_id INT NOT NULL,
        question_id INT NOT NULL,
        answer TEXT,
        is_correct BOOLEAN DEFAULT FALSE,
        points INT DEFAULT 0,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (attempt_id) REFERENCES quiz_attempts(id) ON DELETE CASCADE,
        FOREIGN KEY (question_id) REFERENCES quiz_questions(id)
      )"#,
    },
    TableDefinition {
        name: "badges",
        depends_on: &[],
        ddl: r#"CREATE TABLE IF NOT EXISTS badges (
        id INT PRIMARY KEY AUTO_INCREMENT,
        name VARCHAR(100) NOT NULL,
        description TEXT,
        icon VARCHAR(255),
        category VARCHAR(50),
        criteria_type ENUM('quiz_score', 'quiz_count', 'streak') NOT NULL,
        criteria_value INT NOT NULL,
        criteria_category VARCHAR(50),
        is_active BOOLEAN DEFAULT TRUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
      )"#,
    },
    TableDefinition {
        name: "user_badges",
        depends_on: &["users", "badges", "quiz_attempts"],
        ddl: r#"CREATE TABLE IF NOT EXISTS user_badges (
        id INT PRIMARY KEY AUTO_INCREMENT,
        user_id INT NOT NULL,
        badge_id INT NOT NULL,
        quiz_attempt_id INT,
        earned_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users(id),
        FOREIGN KEY (badge_id) REFERENCES badges(id),
        FOREIGN KEY (quiz_attempt_id) REFERENCES quiz_attempts(id),
        UNIQUE KEY unique_user_badge (user_id, badge_id)
      )"#,
    },
    TableDefinition {
        name: "posts",
        depends_on: &["users", "classes"],
        ddl: r#"CREATE TABLE IF NOT EXISTS posts (
        id INT PRIMARY KEY AUTO_INCREMENT,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        type ENUM('artwork', 'assignment', 'project') NOT NULL,
        media_files JSON,
        author_id INT NOT NULL,
        class_id INT,
        subject VARCHAR(100),
        tags JSON,
        status ENUM('draft', 'pending', 'approved', 'rejected') DEFAULT 'pending',
        approved_by INT,
        approved_at TIMESTAMP NULL,
        likes JSON,
        views INT DEFAULT 0,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        FOREIGN KEY (author_id) REFERENCES users(id),
        FOREIGN KEY (class_id) REFERENCES classes(id),
        FOREIGN KEY (approved_by) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "comments",
        depends_on: &["posts", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS comments (
        id INT PRIMARY KEY AUTO_INCREMENT,
        post_id INT NOT NULL,
        author_id INT NOT NULL,
        content TEXT NOT NULL,
        parent_comment_id INT,
        status ENUM('pending', 'approved', 'rejected') DEFAULT 'pending',
        moderated_by INT,
        moderated_at TIMESTAMP NULL,
        likes JSON,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
        FOREIGN KEY (author_id) REFERENCES users(id),
        FOREIGN KEY (parent_comment_id) REFERENCES comments(id),
        FOREIGN KEY (moderated_by) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "albums",
        depends_on: &["classes", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS albums (
        id INT PRIMARY KEY AUTO_INCREMENT,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        cover_photo VARCHAR(255),
        class_id INT,
        created_by INT NOT NULL,
        is_public BOOLEAN DEFAULT TRUE,
        allow_download BOOLEAN DEFAULT TRUE,
        tags JSON,
        photo_count INT DEFAULT 0,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        FOREIGN KEY (class_id) REFERENCES classes(id),
        FOREIGN KEY (created_by) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "photos",
        depends_on: &["albums", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS photos (
        id INT PRIMARY KEY AUTO_INCREMENT,
        album_id INT NOT NULL,
        filename VARCHAR(255) NOT NULL,
        original_name VARCHAR(255) NOT NULL,
        path VARCHAR(500) NOT NULL,
        thumbnail_path VARCHAR(500),
        watermarked_path VARCHAR(500),
        size INT NOT NULL,
        width INT,
        height INT,
        uploaded_by INT NOT NULL,
        caption TEXT,
        tags JSON,
        likes JSON,
        views INT DEFAULT 0,
        uploaded_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (album_id) REFERENCES albums(id) ON DELETE CASCADE,
        FOREIGN KEY (uploaded_by) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "chat_rooms",
        depends_on: &["classes", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS chat_rooms (
        id INT PRIMARY KEY AUTO_INCREMENT,
        name VARCHAR(200) NOT NULL,
        type ENUM('class_chat', 'parent_channel', 'teacher_room') NOT NULL,
        class_id INT,
        description TEXT,
        members JSON,
        moderators JSON,
        settings JSON,
        is_active BOOLEAN DEFAULT TRUE,
        created_by INT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (class_id) REFERENCES classes(id),
        FOREIGN KEY (created_by) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "messages",
        depends_on: &["chat_rooms", "users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS messages (
        id INT PRIMARY KEY AUTO_INCREMENT,
        room_id INT NOT NULL,
        sender_id INT NOT NULL,
        content TEXT,
        type ENUM('text', 'sticker', 'file', 'image') DEFAULT 'text',
        file_data JSON,
        sticker_id INT,
        reply_to INT,
        is_edited BOOLEAN DEFAULT FALSE,
        edited_at TIMESTAMP NULL,
        is_deleted BOOLEAN DEFAULT FALSE,
        deleted_by INT,
        deleted_at TIMESTAMP NULL,
        reactions JSON,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (room_id) REFERENCES chat_rooms(id) ON DELETE CASCADE,
        FOREIGN KEY (sender_id) REFERENCES users(id),
        FOREIGN KEY (reply_to) REFERENCES messages(id),
        FOREIGN KEY (deleted_by) REFERENCES users(id)
      )"#,
    },
    TableDefinition {
        name: "stickers",
        depends_on: &[],
        ddl: r#"CREATE TABLE IF NOT EXISTS stickers (
        id INT PRIMARY KEY AUTO_INCREMENT,
        name VARCHAR(100) NOT NULL,
        category VARCHAR(50) NOT NULL,
        image_path VARCHAR(255) NOT NULL,
        image_url VARCHAR(255),
        pack_name VARCHAR(100) DEFAULT 'default',
        description TEXT,
        is_active BOOLEAN DEFAULT TRUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
      )"#,
    },
    TableDefinition {
        name: "user_chat_settings",
        depends_on: &["users"],
        ddl: r#"CREATE TABLE IF NOT EXISTS user_chat_settings (
        id INT PRIMARY KEY AUTO_INCREMENT,
        user_id INT NOT NULL,
        notifications_enabled BOOLEAN DEFAULT TRUE,
        sound_enabled BOOLEAN DEFAULT TRUE,
        theme ENUM('light', 'dark') DEFAULT 'light',
        font_size ENUM('small', 'medium', 'large') DEFAULT 'medium',
        auto_download_media BOOLEAN DEFAULT TRUE,
        show_read_receipts BOOLEAN DEFAULT TRUE,
        language VARCHAR(10) DEFAULT 'id',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
        UNIQUE KEY unique_user (user_id)
      )"#,
    },
];

/// Tables created by a schema run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    /// Tables whose DDL ran, in order.
    pub tables: Vec<&'static str>,
}

/// Check that every table is declared after the tables it depends on.
pub fn validate_order(tables: &[TableDefinition]) -> MigrateResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tables.len());

    for table in tables {
        if let Some(dependency) = table.depends_on.iter().find(|dep| !seen.contains(*dep)) {
            return Err(MigrationError::InvalidOrder {
                table: table.name,
                dependency: *dependency,
            });
        }
        seen.insert(table.name);
    }

    Ok(())
}

/// Children-first order for emptying every table.
pub fn truncation_order(tables: &[TableDefinition]) -> Vec<&'static str> {
    tables.iter().rev().map(|table| table.name).collect()
}

/// Create every table that does not exist yet, in order.
///
/// Stops at the first failing statement. Tables created before it are left
/// in place.
pub async fn apply_schema<E>(
    executor: &mut E,
    tables: &[TableDefinition],
) -> MigrateResult<SchemaReport>
where
    E: Executor + ?Sized,
{
    validate_order(tables)?;
    info!(count = tables.len(), "Creating tables");

    let mut created = Vec::with_capacity(tables.len());
    for table in tables {
        executor
            .execute(table.ddl)
            .await
            .map_err(|source| MigrationError::Schema {
                table: table.name,
                source,
            })?;
        debug!(table = table.name, "Table ready");
        created.push(table.name);
    }

    Ok(SchemaReport { tables: created })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use seangkatan_mysql::MysqlError;

    use super::*;
    use crate::testing::FakeExecutor;

    fn referenced_tables(ddl: &str) -> Vec<String> {
        ddl.split("REFERENCES ")
            .skip(1)
            .filter_map(|rest| rest.split('(').next())
            .map(|name| name.trim().to_string())
            .collect()
    }

    #[test]
    fn test_schema_has_nineteen_tables() {
        assert_eq!(TABLES.len(), 19);
        let names: HashSet<_> = TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 19, "table names must be unique");
    }

    #[test]
    fn test_anchor_is_first_table() {
        assert_eq!(TABLES[0].name, ANCHOR_TABLE);
    }

    #[test]
    fn test_declared_dependencies_match_foreign_keys() {
        for table in TABLES {
            let mut from_ddl: Vec<String> = referenced_tables(table.ddl)
                .into_iter()
                .filter(|name| name != table.name)
                .collect();
            from_ddl.sort();
            from_ddl.dedup();

            let mut declared: Vec<String> =
                table.depends_on.iter().map(|d| d.to_string()).collect();
            declared.sort();

            assert_eq!(declared, from_ddl, "dependencies of '{}'", table.name);
        }
    }

    #[test]
    fn test_every_ddl_is_idempotent() {
        for table in TABLES {
            let prefix = format!("CREATE TABLE IF NOT EXISTS {} (", table.name);
            assert!(table.ddl.starts_with(&prefix), "{}", table.name);
        }
    }

    #[test]
    fn test_fixed_order_is_valid() {
        validate_order(TABLES).unwrap();
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let tables = [TABLES[1], TABLES[0]];
        let err = validate_order(&tables).unwrap_err();
        assert!(matches!(
            err,
            MigrationError::InvalidOrder {
                table: "classes",
                dependency: "users"
            }
        ));
    }

    #[test]
    fn test_truncation_order_empties_children_first() {
        let order = truncation_order(TABLES);
        assert_eq!(order.len(), TABLES.len());
        assert_eq!(order.first(), Some(&"user_chat_settings"));
        assert_eq!(order.last(), Some(&"users"));

        let position = |name: &str| order.iter().position(|t| *t == name).unwrap();
        for table in TABLES {
            for parent in table.depends_on {
                assert!(
                    position(table.name) < position(parent),
                    "'{}' must be emptied before '{}'",
                    table.name,
                    parent
                );
            }
        }
    }

    #[tokio::test]
    async fn test_apply_schema_twice_is_idempotent() {
        let mut db = FakeExecutor::new();

        let first = apply_schema(&mut db, TABLES).await.unwrap();
        let tables_after_first = db.tables();
        let second = apply_schema(&mut db, TABLES).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(db.tables(), tables_after_first);
        assert_eq!(db.tables().len(), TABLES.len());
    }

    #[tokio::test]
    async fn test_apply_schema_stops_at_failing_table() {
        let mut db = FakeExecutor::new().fail_on("CREATE TABLE IF NOT EXISTS quizzes");

        let err = apply_schema(&mut db, TABLES).await.unwrap_err();

        match err {
            MigrationError::Schema { table, source } => {
                assert_eq!(table, "quizzes");
                assert!(matches!(source, MysqlError::Query(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Tables before the failure stay; nothing after it ran.
        assert_eq!(
            db.tables(),
            vec!["classes", "event_bookings", "events", "users"]
        );
    }
}
