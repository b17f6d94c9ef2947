pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- departments table
CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(trim(name)) > 0)
);

-- subjects table
CREATE TABLE IF NOT EXISTS subjects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    syllabus TEXT,
    department_id INTEGER NOT NULL REFERENCES departments(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_subjects_department_id ON subjects(department_id);

-- contents table
CREATE TABLE IF NOT EXISTS contents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    content_type TEXT NOT NULL CHECK (content_type IN ('Theory', 'Lab')),
    youtube_link TEXT,
    notes TEXT,
    viva_questions TEXT,
    problem_statement TEXT,
    solution_code TEXT,
    explanation TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    helpful_votes INTEGER NOT NULL DEFAULT 0 CHECK (helpful_votes >= 0),
    unhelpful_votes INTEGER NOT NULL DEFAULT 0 CHECK (unhelpful_votes >= 0)
);

CREATE INDEX IF NOT EXISTS idx_contents_subject_id ON contents(subject_id);
CREATE INDEX IF NOT EXISTS idx_contents_created_at ON contents(created_at);

-- content_votes table (the voter set of each content item)
CREATE TABLE IF NOT EXISTS content_votes (
    content_id INTEGER NOT NULL REFERENCES contents(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind TEXT NOT NULL CHECK (kind IN ('helpful', 'unhelpful')),
    voted_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (content_id, user_id)
);

-- users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK (length(trim(username)) > 0),
    name TEXT NOT NULL DEFAULT '',
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- user_profiles table (one row per user)
CREATE TABLE IF NOT EXISTS user_profiles (
    user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
    current_streak INTEGER NOT NULL DEFAULT 0 CHECK (current_streak >= 0),
    last_login_date TEXT,
    department_id INTEGER REFERENCES departments(id) ON DELETE SET NULL
);

-- user_content_states table (one row per user and content item)
CREATE TABLE IF NOT EXISTS user_content_states (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content_id INTEGER NOT NULL REFERENCES contents(id) ON DELETE CASCADE,
    is_completed INTEGER NOT NULL DEFAULT 0,
    marked_for_revision INTEGER NOT NULL DEFAULT 0,
    UNIQUE(user_id, content_id)
);

CREATE INDEX IF NOT EXISTS idx_user_content_states_revision
    ON user_content_states(user_id, marked_for_revision);
"#;
