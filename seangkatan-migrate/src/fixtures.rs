//! Sample records inserted by the seeder.
//!
//! Records refer to each other by natural keys (usernames, class names).
//! The seeder resolves those keys against the ids its earlier steps
//! received from the server, so nothing here assumes a particular
//! auto-increment sequence.

use serde::Serialize;

/// Password given to every sample account.
pub const SAMPLE_PASSWORD: &str = "password123";

/// Account role, mirroring the `users.role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    SchoolAdmin,
    Teacher,
    Parent,
    Student,
}

impl Role {
    /// Enum literal stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::SchoolAdmin => "school_admin",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }
}

/// A sample account. `password` is hashed before it is stored.
#[derive(Debug, Clone, Copy)]
pub struct UserFixture {
    pub username: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub full_name: &'static str,
    pub phone: Option<&'static str>,
}

/// A class, linked to its homeroom teacher by username.
#[derive(Debug, Clone, Copy)]
pub struct ClassFixture {
    pub name: &'static str,
    pub grade_level: &'static str,
    pub academic_year: &'static str,
    /// Username of the homeroom teacher.
    pub teacher: Option<&'static str>,
}

/// An achievement badge and the rule that awards it.
#[derive(Debug, Clone, Copy)]
pub struct BadgeFixture {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub criteria_type: &'static str,
    pub criteria_value: i64,
    pub criteria_category: &'static str,
}

/// A chat sticker in one of the sample packs.
#[derive(Debug, Clone, Copy)]
pub struct StickerFixture {
    pub name: &'static str,
    pub category: &'static str,
    pub image_path: &'static str,
    pub image_url: &'static str,
    pub pack_name: &'static str,
    pub description: &'static str,
}

/// A calendar event. `kind` is stored in the `type` column.
#[derive(Debug, Clone, Copy)]
pub struct EventFixture {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    pub event_date: &'static str,
    pub start_time: &'static str,
    pub end_time: &'static str,
    pub location: &'static str,
    /// Username of the organiser.
    pub created_by: &'static str,
    pub max_participants: i64,
    /// Class name, `None` for school-wide events.
    pub class: Option<&'static str>,
}

/// A quiz, optionally limited to one class.
#[derive(Debug, Clone, Copy)]
pub struct QuizFixture {
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub difficulty: &'static str,
    /// Seconds.
    pub time_limit: i64,
    /// Username of the author.
    pub created_by: &'static str,
    /// Class name, `None` for quizzes open to everyone.
    pub class: Option<&'static str>,
}

/// A photo album; `tags` become a JSON array.
#[derive(Debug, Clone, Copy)]
pub struct AlbumFixture {
    pub title: &'static str,
    pub description: &'static str,
    pub class: Option<&'static str>,
    pub created_by: &'static str,
    pub is_public: bool,
    pub allow_download: bool,
    pub tags: &'static [&'static str],
}

/// Moderation switches stored in `chat_rooms.settings`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChatSettings {
    pub allow_media: bool,
    pub allow_stickers: bool,
    pub moderation_enabled: bool,
}

/// A chat room. `kind` is stored in the `type` column.
#[derive(Debug, Clone, Copy)]
pub struct ChatRoomFixture {
    pub name: &'static str,
    pub kind: &'static str,
    pub class: Option<&'static str>,
    pub description: &'static str,
    /// Usernames of the members.
    pub members: &'static [&'static str],
    /// Usernames of the moderators.
    pub moderators: &'static [&'static str],
    pub settings: ChatSettings,
    pub created_by: &'static str,
}

pub const USERS: &[UserFixture] = &[
    UserFixture {
        username: "owner",
        email: "owner@seangkatan.com",
        password: SAMPLE_PASSWORD,
        role: Role::Owner,
        full_name: "System Owner",
        phone: Some("081234567890"),
    },
    UserFixture {
        username: "admin",
        email: "admin@seangkatan.com",
        password: SAMPLE_PASSWORD,
        role: Role::SchoolAdmin,
        full_name: "School Administrator",
        phone: Some("081234567891"),
    },
    UserFixture {
        username: "teacher1",
        email: "teacher1@seangkatan.com",
        password: SAMPLE_PASSWORD,
        role: Role::Teacher,
        full_name: "Guru Matematika",
        phone: Some("081234567892"),
    },
    UserFixture {
        username: "teacher2",
        email: "teacher2@seangkatan.com",
        password: SAMPLE_PASSWORD,
        role: Role::Teacher,
        full_name: "Guru Bahasa Indonesia",
        phone: Some("081234567893"),
    },
    UserFixture {
        username: "parent1",
        email: "parent1@seangkatan.com",
        password: SAMPLE_PASSWORD,
        role: Role::Parent,
        full_name: "Orang Tua Siswa 1",
        phone: Some("081234567894"),
    },
    UserFixture {
        username: "student1",
        email: "student1@seangkatan.com",
        password: SAMPLE_PASSWORD,
        role: Role::Student,
        full_name: "Siswa Pertama",
        phone: Some("081234567895"),
    },
    UserFixture {
        username: "student2",
        email: "student2@seangkatan.com",
        password: SAMPLE_PASSWORD,
        role: Role::Student,
        full_name: "Siswa Kedua",
        phone: Some("081234567896"),
    },
];

pub const CLASSES: &[ClassFixture] = &[
    ClassFixture {
        name: "Kelas 1A",
        grade_level: "1",
        academic_year: "2024/2025",
        teacher: Some("teacher1"),
    },
    ClassFixture {
        name: "Kelas 1B",
        grade_level: "1",
        academic_year: "2024/2025",
        teacher: Some("teacher2"),
    },
    ClassFixture {
        name: "Kelas 2A",
        grade_level: "2",
        academic_year: "2024/2025",
        teacher: Some("teacher1"),
    },
];

pub const BADGES: &[BadgeFixture] = &[
    BadgeFixture {
        name: "Quiz Master",
        description: "Menyelesaikan 10 quiz dengan skor minimal 80%",
        icon: "🏆",
        category: "achievement",
        criteria_type: "quiz_count",
        criteria_value: 10,
        criteria_category: "all",
    },
    BadgeFixture {
        name: "Perfect Score",
        description: "Mendapat skor 100% dalam quiz",
        icon: "⭐",
        category: "achievement",
        criteria_type: "quiz_score",
        criteria_value: 100,
        criteria_category: "all",
    },
    BadgeFixture {
        name: "Math Genius",
        description: "Menyelesaikan 5 quiz matematika dengan skor minimal 90%",
        icon: "🧮",
        category: "subject",
        criteria_type: "quiz_count",
        criteria_value: 5,
        criteria_category: "math",
    },
    BadgeFixture {
        name: "Reading Champion",
        description: "Menyelesaikan 5 quiz membaca dengan skor minimal 90%",
        icon: "📚",
        category: "subject",
        criteria_type: "quiz_count",
        criteria_value: 5,
        criteria_category: "reading",
    },
];

pub const STICKERS: &[StickerFixture] = &[
    StickerFixture {
        name: "Happy Face",
        category: "emotions",
        image_path: "/stickers/happy.png",
        image_url: "/stickers/happy.png",
        pack_name: "Basic Emotions",
        description: "Stiker wajah bahagia",
    },
    StickerFixture {
        name: "Thumbs Up",
        category: "gestures",
        image_path: "/stickers/thumbs-up.png",
        image_url: "/stickers/thumbs-up.png",
        pack_name: "Basic Gestures",
        description: "Stiker jempol ke atas",
    },
    StickerFixture {
        name: "Star",
        category: "rewards",
        image_path: "/stickers/star.png",
        image_url: "/stickers/star.png",
        pack_name: "Rewards",
        description: "Stiker bintang",
    },
    StickerFixture {
        name: "Heart",
        category: "emotions",
        image_path: "/stickers/heart.png",
        image_url: "/stickers/heart.png",
        pack_name: "Basic Emotions",
        description: "Stiker hati",
    },
];

pub const EVENTS: &[EventFixture] = &[
    EventFixture {
        title: "Pertemuan Orang Tua Kelas 1A",
        description: "Pertemuan rutin orang tua siswa kelas 1A untuk membahas perkembangan anak",
        kind: "parent_meeting",
        event_date: "2024-02-15",
        start_time: "09:00:00",
        end_time: "11:00:00",
        location: "Ruang Kelas 1A",
        created_by: "teacher1",
        max_participants: 30,
        class: Some("Kelas 1A"),
    },
    EventFixture {
        title: "Lomba Matematika Antar Kelas",
        description: "Kompetisi matematika untuk siswa kelas 1 dan 2",
        kind: "class_competition",
        event_date: "2024-02-20",
        start_time: "08:00:00",
        end_time: "12:00:00",
        location: "Aula Sekolah",
        created_by: "admin",
        max_participants: 50,
        class: None,
    },
];

pub const QUIZZES: &[QuizFixture] = &[
    QuizFixture {
        title: "Quiz Matematika Dasar",
        description: "Quiz tentang penjumlahan dan pengurangan untuk kelas 1",
        category: "math",
        difficulty: "easy",
        time_limit: 1800,
        created_by: "teacher1",
        class: Some("Kelas 1A"),
    },
    QuizFixture {
        title: "Quiz Membaca Pemahaman",
        description: "Quiz pemahaman bacaan sederhana untuk kelas 1",
        category: "reading",
        difficulty: "easy",
        time_limit: 1200,
        created_by: "teacher2",
        class: Some("Kelas 1B"),
    },
];

pub const ALBUMS: &[AlbumFixture] = &[
    AlbumFixture {
        title: "Kegiatan Kelas 1A",
        description: "Dokumentasi kegiatan belajar mengajar di kelas 1A",
        class: Some("Kelas 1A"),
        created_by: "teacher1",
        is_public: true,
        allow_download: true,
        tags: &["kelas1a", "belajar", "aktivitas"],
    },
    AlbumFixture {
        title: "Lomba Sekolah 2024",
        description: "Dokumentasi berbagai lomba yang diadakan sekolah tahun 2024",
        class: None,
        created_by: "admin",
        is_public: true,
        allow_download: false,
        tags: &["lomba", "2024", "kompetisi"],
    },
];

pub const CHAT_ROOMS: &[ChatRoomFixture] = &[
    ChatRoomFixture {
        name: "Chat Kelas 1A",
        kind: "class_chat",
        class: Some("Kelas 1A"),
        description: "Ruang chat untuk kelas 1A",
        members: &["teacher1", "student1", "student2"],
        moderators: &["teacher1"],
        settings: ChatSettings {
            allow_media: true,
            allow_stickers: true,
            moderation_enabled: true,
        },
        created_by: "teacher1",
    },
    ChatRoomFixture {
        name: "Channel Orang Tua",
        kind: "parent_channel",
        class: None,
        description: "Channel komunikasi untuk orang tua siswa",
        members: &["admin", "parent1"],
        moderators: &["admin"],
        settings: ChatSettings {
            allow_media: true,
            allow_stickers: false,
            moderation_enabled: true,
        },
        created_by: "admin",
    },
    ChatRoomFixture {
        name: "Ruang Guru",
        kind: "teacher_room",
        class: None,
        description: "Ruang diskusi khusus guru",
        members: &["admin", "teacher1", "teacher2"],
        moderators: &["admin"],
        settings: ChatSettings {
            allow_media: true,
            allow_stickers: true,
            moderation_enabled: false,
        },
        created_by: "admin",
    },
];

/// Rows each seeded table holds after a successful seed, in seeding order.
pub fn expected_row_counts() -> Vec<(&'static str, usize)> {
    vec![
        ("users", USERS.len()),
        ("classes", CLASSES.len()),
        ("badges", BADGES.len()),
        ("stickers", STICKERS.len()),
        ("events", EVENTS.len()),
        ("quizzes", QUIZZES.len()),
        ("albums", ALBUMS.len()),
        ("chat_rooms", CHAT_ROOMS.len()),
    ]
}
