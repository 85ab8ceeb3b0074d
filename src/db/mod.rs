//! Database module - SQLite storage for users, logs and settings

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::content::{Budget, HealthRating, MealPack, MealType, TimeOfDay};
use crate::i18n::Lang;

/// Registered bot user with profile data.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub tg_id: i64,
    pub name: Option<String>,
    pub language: Lang,
    pub age: Option<i64>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub budget: Option<Budget>,
    pub workout_pref: Option<TimeOfDay>,
    pub reminders_enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-user reminder times, "HH:MM". Row is created lazily on first edit.
#[derive(Debug, Clone, Default)]
pub struct UserSettings {
    pub tg_id: i64,
    pub sleep_time: Option<String>,
    pub wake_time: Option<String>,
    pub breakfast_time: Option<String>,
    pub lunch_time: Option<String>,
    pub dinner_time: Option<String>,
}

/// Which settings field a "HH:MM" edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Sleep,
    Wake,
    Breakfast,
    Lunch,
    Dinner,
}

impl TimeField {
    pub fn key(self) -> &'static str {
        match self {
            TimeField::Sleep => "sleep",
            TimeField::Wake => "wake",
            TimeField::Breakfast => "breakfast",
            TimeField::Lunch => "lunch",
            TimeField::Dinner => "dinner",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "sleep" => TimeField::Sleep,
            "wake" => TimeField::Wake,
            "breakfast" => TimeField::Breakfast,
            "lunch" => TimeField::Lunch,
            "dinner" => TimeField::Dinner,
            _ => return None,
        })
    }

    fn column(self) -> &'static str {
        match self {
            TimeField::Sleep => "sleep_time",
            TimeField::Wake => "wake_time",
            TimeField::Breakfast => "breakfast_time",
            TimeField::Lunch => "lunch_time",
            TimeField::Dinner => "dinner_time",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepLogEntry {
    pub sleep_time: String,
    pub wake_time: String,
    pub duration_hours: f64,
    pub evaluation: String,
    pub electronics_used: bool,
    pub quality_rating: i64,
}

#[derive(Debug, Clone, Default)]
pub struct WorkoutStats {
    pub total: i64,
    pub this_week: i64,
    pub by_group: Vec<(String, i64)>,
}

#[derive(Debug, Clone, Default)]
pub struct MealStats {
    pub total: i64,
    pub healthy: i64,
    pub unsure: i64,
    pub unhealthy: i64,
}

impl MealStats {
    /// Share of healthy meals, in percent.
    pub fn healthiness_pct(&self) -> i64 {
        if self.total == 0 {
            return 0;
        }
        (self.healthy as f64 / self.total as f64 * 100.0).round() as i64
    }
}

#[derive(Debug, Clone, Default)]
pub struct SleepStats {
    pub nights: i64,
    pub avg_duration: f64,
    pub optimal_nights: i64,
}

#[derive(Debug, Clone, Default)]
pub struct BotStats {
    pub total_users: i64,
    pub users_this_week: i64,
    pub notifications_sent: i64,
    pub notifications_responded: i64,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    const USER_COLUMNS: &'static str = "id, tg_id, name, language, age, height, weight, budget, workout_pref, reminders_enabled, created_at";

    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tg_id INTEGER NOT NULL UNIQUE,
                name TEXT,
                language TEXT NOT NULL DEFAULT 'ru',
                age INTEGER,
                height INTEGER,
                weight INTEGER,
                budget TEXT,
                workout_pref TEXT,
                reminders_enabled INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS user_settings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tg_id INTEGER NOT NULL UNIQUE,
                sleep_time TEXT,
                wake_time TEXT,
                breakfast_time TEXT,
                lunch_time TEXT,
                dinner_time TEXT,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS workout_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tg_id INTEGER NOT NULL,
                muscle_group TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS meal_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tg_id INTEGER NOT NULL,
                meal_type TEXT NOT NULL,
                is_pack INTEGER NOT NULL,
                pack_id TEXT,
                pack_name TEXT,
                calories INTEGER,
                custom_description TEXT,
                health_rating TEXT,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS sleep_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tg_id INTEGER NOT NULL,
                sleep_time TEXT NOT NULL,
                wake_time TEXT NOT NULL,
                duration_hours REAL NOT NULL,
                evaluation TEXT NOT NULL,
                electronics_used INTEGER NOT NULL,
                quality_rating INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS notification_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tg_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                sent_at TEXT NOT NULL,
                responded INTEGER NOT NULL,
                action TEXT
            );
            CREATE TABLE IF NOT EXISTS admins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tg_id INTEGER NOT NULL UNIQUE,
                username TEXT,
                role TEXT NOT NULL DEFAULT 'admin',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_workout_logs_tg ON workout_logs(tg_id);
            CREATE INDEX IF NOT EXISTS idx_meal_logs_tg ON meal_logs(tg_id);
            CREATE INDEX IF NOT EXISTS idx_sleep_logs_tg ON sleep_logs(tg_id);
            CREATE INDEX IF NOT EXISTS idx_notification_logs_tg ON notification_logs(tg_id);",
        )?;
        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        let language: String = row.get(3)?;
        let budget: Option<String> = row.get(7)?;
        let workout_pref: Option<String> = row.get(8)?;
        let created_at: String = row.get(10)?;
        Ok(User {
            id: row.get(0)?,
            tg_id: row.get(1)?,
            name: row.get(2)?,
            language: Lang::from_code(&language),
            age: row.get(4)?,
            height: row.get(5)?,
            weight: row.get(6)?,
            budget: budget.as_deref().and_then(Budget::from_key),
            workout_pref: workout_pref.as_deref().and_then(TimeOfDay::from_key),
            reminders_enabled: row.get(9)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    /// Fetch user by chat id.
    pub fn get_user(&self, tg_id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE tg_id = ?1", Self::USER_COLUMNS);
        let user = self
            .conn
            .query_row(&sql, params![tg_id], Self::row_to_user)
            .optional()?;
        Ok(user)
    }

    /// Fetch user by chat id, creating an empty profile on first contact.
    pub fn ensure_user(&self, tg_id: i64) -> Result<User> {
        if let Some(user) = self.get_user(tg_id)? {
            return Ok(user);
        }
        self.conn.execute(
            "INSERT INTO users (tg_id, created_at) VALUES (?1, ?2)",
            params![tg_id, Utc::now().to_rfc3339()],
        )?;
        let sql = format!("SELECT {} FROM users WHERE tg_id = ?1", Self::USER_COLUMNS);
        let user = self.conn.query_row(&sql, params![tg_id], Self::row_to_user)?;
        Ok(user)
    }

    pub fn user_lang(&self, tg_id: i64) -> Lang {
        self.get_user(tg_id)
            .ok()
            .flatten()
            .map(|u| u.language)
            .unwrap_or_default()
    }

    pub fn set_language(&self, tg_id: i64, lang: Lang) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET language = ?2 WHERE tg_id = ?1",
            params![tg_id, lang.code()],
        )?;
        Ok(())
    }

    pub fn set_name(&self, tg_id: i64, name: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET name = ?2 WHERE tg_id = ?1",
            params![tg_id, name],
        )?;
        Ok(())
    }

    pub fn set_age(&self, tg_id: i64, age: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET age = ?2 WHERE tg_id = ?1",
            params![tg_id, age],
        )?;
        Ok(())
    }

    pub fn set_height(&self, tg_id: i64, height: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET height = ?2 WHERE tg_id = ?1",
            params![tg_id, height],
        )?;
        Ok(())
    }

    pub fn set_weight(&self, tg_id: i64, weight: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET weight = ?2 WHERE tg_id = ?1",
            params![tg_id, weight],
        )?;
        Ok(())
    }

    pub fn set_budget(&self, tg_id: i64, budget: Budget) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET budget = ?2 WHERE tg_id = ?1",
            params![tg_id, budget.key()],
        )?;
        Ok(())
    }

    pub fn set_workout_pref(&self, tg_id: i64, pref: TimeOfDay) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET workout_pref = ?2 WHERE tg_id = ?1",
            params![tg_id, pref.key()],
        )?;
        Ok(())
    }

    pub fn set_reminders_enabled(&self, tg_id: i64, enabled: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET reminders_enabled = ?2 WHERE tg_id = ?1",
            params![tg_id, enabled],
        )?;
        Ok(())
    }

    /// Hard delete on explicit user reset. Log history is kept.
    pub fn delete_user(&self, tg_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM user_settings WHERE tg_id = ?1", params![tg_id])?;
        self.conn
            .execute("DELETE FROM users WHERE tg_id = ?1", params![tg_id])?;
        Ok(())
    }

    pub fn all_users(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id", Self::USER_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    // --- settings ---

    pub fn get_settings(&self, tg_id: i64) -> Result<Option<UserSettings>> {
        let settings = self
            .conn
            .query_row(
                "SELECT tg_id, sleep_time, wake_time, breakfast_time, lunch_time, dinner_time
                 FROM user_settings WHERE tg_id = ?1",
                params![tg_id],
                |row| {
                    Ok(UserSettings {
                        tg_id: row.get(0)?,
                        sleep_time: row.get(1)?,
                        wake_time: row.get(2)?,
                        breakfast_time: row.get(3)?,
                        lunch_time: row.get(4)?,
                        dinner_time: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    /// Set one "HH:MM" field, creating the settings row on first edit.
    pub fn set_time(&self, tg_id: i64, field: TimeField, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO user_settings (tg_id, created_at) VALUES (?1, ?2)
             ON CONFLICT(tg_id) DO NOTHING",
            params![tg_id, Utc::now().to_rfc3339()],
        )?;
        let sql = format!(
            "UPDATE user_settings SET {} = ?2 WHERE tg_id = ?1",
            field.column()
        );
        self.conn.execute(&sql, params![tg_id, value])?;
        Ok(())
    }

    pub fn all_settings(&self) -> Result<Vec<UserSettings>> {
        let mut stmt = self.conn.prepare(
            "SELECT tg_id, sleep_time, wake_time, breakfast_time, lunch_time, dinner_time
             FROM user_settings ORDER BY id",
        )?;
        let settings = stmt
            .query_map([], |row| {
                Ok(UserSettings {
                    tg_id: row.get(0)?,
                    sleep_time: row.get(1)?,
                    wake_time: row.get(2)?,
                    breakfast_time: row.get(3)?,
                    lunch_time: row.get(4)?,
                    dinner_time: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(settings)
    }

    // --- workout logs ---

    pub fn add_workout_log(&self, tg_id: i64, group: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO workout_logs (tg_id, muscle_group, created_at) VALUES (?1, ?2, ?3)",
            params![tg_id, group, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn last_workout_group(&self, tg_id: i64) -> Result<Option<String>> {
        let group = self
            .conn
            .query_row(
                "SELECT muscle_group FROM workout_logs WHERE tg_id = ?1 ORDER BY id DESC LIMIT 1",
                params![tg_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(group)
    }

    pub fn workout_stats(&self, tg_id: i64) -> Result<WorkoutStats> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workout_logs WHERE tg_id = ?1",
            params![tg_id],
            |row| row.get(0),
        )?;
        let cutoff = (Utc::now() - Duration::days(7)).to_rfc3339();
        let this_week: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workout_logs WHERE tg_id = ?1 AND created_at >= ?2",
            params![tg_id, cutoff],
            |row| row.get(0),
        )?;
        let mut stmt = self.conn.prepare(
            "SELECT muscle_group, COUNT(*) FROM workout_logs WHERE tg_id = ?1
             GROUP BY muscle_group ORDER BY COUNT(*) DESC",
        )?;
        let by_group = stmt
            .query_map(params![tg_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WorkoutStats {
            total,
            this_week,
            by_group,
        })
    }

    // --- meal logs ---

    pub fn add_meal_pack_log(&self, tg_id: i64, pack: &MealPack) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO meal_logs (tg_id, meal_type, is_pack, pack_id, pack_name, calories, created_at)
             VALUES (?1, ?2, 1, ?3, ?4, ?5, ?6)",
            params![
                tg_id,
                pack.category.key(),
                pack.id,
                pack.name,
                pack.calories,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_custom_meal_log(
        &self,
        tg_id: i64,
        meal_type: MealType,
        description: &str,
        rating: HealthRating,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO meal_logs (tg_id, meal_type, is_pack, custom_description, health_rating, created_at)
             VALUES (?1, ?2, 0, ?3, ?4, ?5)",
            params![
                tg_id,
                meal_type.key(),
                description,
                rating.key(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Meal stats over the last `days` days. Packs count as healthy;
    /// custom meals count by their self-assessed rating.
    pub fn meal_stats(&self, tg_id: i64, days: i64) -> Result<MealStats> {
        let cutoff = (Utc::now() - Duration::days(days)).to_rfc3339();
        let mut stmt = self.conn.prepare(
            "SELECT is_pack, health_rating FROM meal_logs
             WHERE tg_id = ?1 AND created_at >= ?2",
        )?;
        let rows = stmt
            .query_map(params![tg_id, cutoff], |row| {
                let is_pack: bool = row.get(0)?;
                let rating: Option<String> = row.get(1)?;
                Ok((is_pack, rating))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stats = MealStats::default();
        for (is_pack, rating) in rows {
            stats.total += 1;
            let rating = rating.as_deref().and_then(HealthRating::from_key);
            match (is_pack, rating) {
                (true, _) | (false, Some(HealthRating::Healthy)) => stats.healthy += 1,
                (false, Some(HealthRating::Unhealthy)) => stats.unhealthy += 1,
                _ => stats.unsure += 1,
            }
        }
        Ok(stats)
    }

    // --- sleep logs ---

    pub fn add_sleep_log(&self, tg_id: i64, entry: &SleepLogEntry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sleep_logs (tg_id, sleep_time, wake_time, duration_hours, evaluation, electronics_used, quality_rating, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                tg_id,
                entry.sleep_time,
                entry.wake_time,
                entry.duration_hours,
                entry.evaluation,
                entry.electronics_used,
                entry.quality_rating,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn sleep_stats(&self, tg_id: i64, days: i64) -> Result<SleepStats> {
        let cutoff = (Utc::now() - Duration::days(days)).to_rfc3339();
        let mut stmt = self.conn.prepare(
            "SELECT duration_hours, evaluation FROM sleep_logs
             WHERE tg_id = ?1 AND created_at >= ?2",
        )?;
        let rows = stmt
            .query_map(params![tg_id, cutoff], |row| {
                let duration: f64 = row.get(0)?;
                let evaluation: String = row.get(1)?;
                Ok((duration, evaluation))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let nights = rows.len() as i64;
        if nights == 0 {
            return Ok(SleepStats::default());
        }
        let total: f64 = rows.iter().map(|(d, _)| d).sum();
        let optimal_nights = rows
            .iter()
            .filter(|(_, eval)| eval.starts_with("7_8"))
            .count() as i64;
        Ok(SleepStats {
            nights,
            avg_duration: (total / nights as f64 * 10.0).round() / 10.0,
            optimal_nights,
        })
    }

    // --- notification log ---

    /// Append-only send/response record. `action` present means the user
    /// reacted (logged / later / skipped).
    pub fn log_notification(&self, tg_id: i64, kind: &str, action: Option<&str>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO notification_logs (tg_id, kind, sent_at, responded, action)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tg_id,
                kind,
                Utc::now().to_rfc3339(),
                action.is_some(),
                action,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn notification_count(&self, tg_id: i64, kind: &str) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM notification_logs WHERE tg_id = ?1 AND kind = ?2",
            params![tg_id, kind],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // --- admin ---

    pub fn is_admin(&self, tg_id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM admins WHERE tg_id = ?1 AND is_active = 1",
                params![tg_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn add_admin(&self, tg_id: i64, username: Option<&str>, role: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO admins (tg_id, username, role, created_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(tg_id) DO UPDATE SET is_active = 1, role = excluded.role",
            params![tg_id, username, role, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn bot_stats(&self) -> Result<BotStats> {
        let total_users: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        let cutoff = (Utc::now() - Duration::days(7)).to_rfc3339();
        let users_this_week: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE created_at >= ?1",
            params![cutoff],
            |row| row.get(0),
        )?;
        let notifications_sent: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notification_logs WHERE responded = 0",
            [],
            |row| row.get(0),
        )?;
        let notifications_responded: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notification_logs WHERE responded = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(BotStats {
            total_users,
            users_this_week,
            notifications_sent,
            notifications_responded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pack() -> MealPack {
        MealPack {
            id: "mid_breakfast_1".to_string(),
            pack_number: 1,
            budget: Budget::Mid,
            category: MealType::Breakfast,
            name: "Овсянка с бананом".to_string(),
            ingredients: "овсянка, банан, мёд".to_string(),
            price: 15000,
            currency: "UZS".to_string(),
            calories: 420,
            prep_time_min: 10,
        }
    }

    #[test]
    fn test_ensure_user_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let a = db.ensure_user(100).unwrap();
        let b = db.ensure_user(100).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.language, Lang::Ru);
        assert!(a.reminders_enabled);
    }

    #[test]
    fn test_profile_updates() {
        let db = Database::open_in_memory().unwrap();
        db.ensure_user(100).unwrap();
        db.set_name(100, "Азиз").unwrap();
        db.set_age(100, 17).unwrap();
        db.set_height(100, 180).unwrap();
        db.set_weight(100, 70).unwrap();
        db.set_budget(100, Budget::Mid).unwrap();
        db.set_workout_pref(100, TimeOfDay::Morning).unwrap();
        db.set_language(100, Lang::En).unwrap();

        let user = db.get_user(100).unwrap().unwrap();
        assert_eq!(user.name.as_deref(), Some("Азиз"));
        assert_eq!(user.age, Some(17));
        assert_eq!(user.height, Some(180));
        assert_eq!(user.weight, Some(70));
        assert_eq!(user.budget, Some(Budget::Mid));
        assert_eq!(user.workout_pref, Some(TimeOfDay::Morning));
        assert_eq!(user.language, Lang::En);
    }

    #[test]
    fn test_delete_user_removes_profile_and_settings() {
        let db = Database::open_in_memory().unwrap();
        db.ensure_user(100).unwrap();
        db.set_time(100, TimeField::Sleep, "23:00").unwrap();
        db.delete_user(100).unwrap();
        assert!(db.get_user(100).unwrap().is_none());
        assert!(db.get_settings(100).unwrap().is_none());
    }

    #[test]
    fn test_settings_created_lazily() {
        let db = Database::open_in_memory().unwrap();
        db.ensure_user(100).unwrap();
        assert!(db.get_settings(100).unwrap().is_none());

        db.set_time(100, TimeField::Breakfast, "08:30").unwrap();
        db.set_time(100, TimeField::Sleep, "23:00").unwrap();
        let settings = db.get_settings(100).unwrap().unwrap();
        assert_eq!(settings.breakfast_time.as_deref(), Some("08:30"));
        assert_eq!(settings.sleep_time.as_deref(), Some("23:00"));
        assert!(settings.wake_time.is_none());
    }

    #[test]
    fn test_set_time_replaces_value() {
        let db = Database::open_in_memory().unwrap();
        db.ensure_user(100).unwrap();
        db.set_time(100, TimeField::Lunch, "13:00").unwrap();
        db.set_time(100, TimeField::Lunch, "14:15").unwrap();
        let settings = db.get_settings(100).unwrap().unwrap();
        assert_eq!(settings.lunch_time.as_deref(), Some("14:15"));
    }

    #[test]
    fn test_workout_stats() {
        let db = Database::open_in_memory().unwrap();
        db.add_workout_log(100, "chest").unwrap();
        db.add_workout_log(100, "chest").unwrap();
        db.add_workout_log(100, "legs").unwrap();
        db.add_workout_log(200, "back").unwrap();

        let stats = db.workout_stats(100).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.this_week, 3);
        assert_eq!(stats.by_group[0], ("chest".to_string(), 2));
        assert_eq!(db.last_workout_group(100).unwrap().as_deref(), Some("legs"));
    }

    #[test]
    fn test_meal_stats_counts_packs_as_healthy() {
        let db = Database::open_in_memory().unwrap();
        db.add_meal_pack_log(100, &test_pack()).unwrap();
        db.add_custom_meal_log(100, MealType::Lunch, "плов", HealthRating::Normal)
            .unwrap();
        db.add_custom_meal_log(100, MealType::Dinner, "бургер", HealthRating::Unhealthy)
            .unwrap();

        let stats = db.meal_stats(100, 7).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.healthy, 1);
        assert_eq!(stats.unsure, 1);
        assert_eq!(stats.unhealthy, 1);
        assert_eq!(stats.healthiness_pct(), 33);
    }

    #[test]
    fn test_sleep_stats() {
        let db = Database::open_in_memory().unwrap();
        let entry = SleepLogEntry {
            sleep_time: "23:00".to_string(),
            wake_time: "07:00".to_string(),
            duration_hours: 8.0,
            evaluation: "7_8_correct".to_string(),
            electronics_used: false,
            quality_rating: 4,
        };
        db.add_sleep_log(100, &entry).unwrap();
        db.add_sleep_log(
            100,
            &SleepLogEntry {
                duration_hours: 5.0,
                evaluation: "under_6".to_string(),
                ..entry.clone()
            },
        )
        .unwrap();

        let stats = db.sleep_stats(100, 7).unwrap();
        assert_eq!(stats.nights, 2);
        assert_eq!(stats.avg_duration, 6.5);
        assert_eq!(stats.optimal_nights, 1);
    }

    #[test]
    fn test_notification_log_rows_are_appended() {
        let db = Database::open_in_memory().unwrap();
        db.log_notification(100, "breakfast", None).unwrap();
        db.log_notification(100, "breakfast", Some("logged")).unwrap();
        assert_eq!(db.notification_count(100, "breakfast").unwrap(), 2);

        let stats = db.bot_stats().unwrap();
        assert_eq!(stats.notifications_sent, 1);
        assert_eq!(stats.notifications_responded, 1);
    }

    #[test]
    fn test_admin_flag() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.is_admin(100).unwrap());
        db.add_admin(100, Some("thesekron"), "admin").unwrap();
        assert!(db.is_admin(100).unwrap());
    }
}
