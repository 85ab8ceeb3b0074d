//! Content catalogs - workout exercises and meal packs

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::i18n::Lang;

/// Muscle groups selectable in the workout flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MuscleGroup {
    Full,
    Chest,
    Arms,
    Legs,
    Shoulders,
    Back,
}

impl MuscleGroup {
    /// Stable key used in callback data and the workout_logs table.
    pub fn key(self) -> &'static str {
        match self {
            MuscleGroup::Full => "full",
            MuscleGroup::Chest => "chest",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Back => "back",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "full" => MuscleGroup::Full,
            "chest" => MuscleGroup::Chest,
            "arms" => MuscleGroup::Arms,
            "legs" => MuscleGroup::Legs,
            "shoulders" => MuscleGroup::Shoulders,
            "back" => MuscleGroup::Back,
            _ => return None,
        })
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            MuscleGroup::Full => "group.full",
            MuscleGroup::Chest => "group.chest",
            MuscleGroup::Arms => "group.arms",
            MuscleGroup::Legs => "group.legs",
            MuscleGroup::Shoulders => "group.shoulders",
            MuscleGroup::Back => "group.back",
        }
    }

    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Full,
            MuscleGroup::Chest,
            MuscleGroup::Arms,
            MuscleGroup::Legs,
            MuscleGroup::Shoulders,
            MuscleGroup::Back,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct WorkoutExercise {
    pub group: MuscleGroup,
    pub title_ru: &'static str,
    pub title_uz: &'static str,
    pub title_en: &'static str,
    /// Suggested volume, shown under the title.
    pub volume: &'static str,
}

impl WorkoutExercise {
    pub fn title(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Ru => self.title_ru,
            Lang::Uz => self.title_uz,
            Lang::En => self.title_en,
        }
    }
}

/// Домашняя программа без оборудования.
pub const WORKOUTS: &[WorkoutExercise] = &[
    WorkoutExercise {
        group: MuscleGroup::Full,
        title_ru: "Бёрпи",
        title_uz: "Berpi",
        title_en: "Burpees",
        volume: "3 x 10",
    },
    WorkoutExercise {
        group: MuscleGroup::Full,
        title_ru: "Джампинг джек",
        title_uz: "Sakrash mashqi",
        title_en: "Jumping jacks",
        volume: "3 x 20",
    },
    WorkoutExercise {
        group: MuscleGroup::Full,
        title_ru: "Планка",
        title_uz: "Planka",
        title_en: "Plank",
        volume: "3 x 45s",
    },
    WorkoutExercise {
        group: MuscleGroup::Chest,
        title_ru: "Отжимания",
        title_uz: "Yotgan holda siqilish",
        title_en: "Push-ups",
        volume: "4 x 12",
    },
    WorkoutExercise {
        group: MuscleGroup::Chest,
        title_ru: "Отжимания с широкой постановкой",
        title_uz: "Keng qo‘l siqilish",
        title_en: "Wide push-ups",
        volume: "3 x 10",
    },
    WorkoutExercise {
        group: MuscleGroup::Arms,
        title_ru: "Обратные отжимания от стула",
        title_uz: "Stuldan teskari siqilish",
        title_en: "Chair dips",
        volume: "3 x 12",
    },
    WorkoutExercise {
        group: MuscleGroup::Arms,
        title_ru: "Узкие отжимания",
        title_uz: "Tor qo‘l siqilish",
        title_en: "Diamond push-ups",
        volume: "3 x 8",
    },
    WorkoutExercise {
        group: MuscleGroup::Legs,
        title_ru: "Приседания",
        title_uz: "Cho‘qqayib turish",
        title_en: "Squats",
        volume: "4 x 15",
    },
    WorkoutExercise {
        group: MuscleGroup::Legs,
        title_ru: "Выпады",
        title_uz: "Oldinga qadam tashlash",
        title_en: "Lunges",
        volume: "3 x 12",
    },
    WorkoutExercise {
        group: MuscleGroup::Legs,
        title_ru: "Подъём на носки",
        title_uz: "Oyoq uchida ko‘tarilish",
        title_en: "Calf raises",
        volume: "3 x 20",
    },
    WorkoutExercise {
        group: MuscleGroup::Shoulders,
        title_ru: "Отжимания уголком",
        title_uz: "Burchak siqilish",
        title_en: "Pike push-ups",
        volume: "3 x 8",
    },
    WorkoutExercise {
        group: MuscleGroup::Shoulders,
        title_ru: "Круги руками",
        title_uz: "Qo‘l aylantirish",
        title_en: "Arm circles",
        volume: "3 x 30s",
    },
    WorkoutExercise {
        group: MuscleGroup::Back,
        title_ru: "Супермен",
        title_uz: "Supermen",
        title_en: "Superman hold",
        volume: "3 x 30s",
    },
    WorkoutExercise {
        group: MuscleGroup::Back,
        title_ru: "Тяга у двери",
        title_uz: "Eshik oldida tortish",
        title_en: "Doorway rows",
        volume: "3 x 10",
    },
];

pub fn exercises_for(group: MuscleGroup) -> Vec<&'static WorkoutExercise> {
    WORKOUTS.iter().filter(|e| e.group == group).collect()
}

/// Budget tier for meal packs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Mid,
    High,
}

impl Budget {
    pub fn key(self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Mid => "mid",
            Budget::High => "high",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "low" => Budget::Low,
            "mid" => Budget::Mid,
            "high" => Budget::High,
            _ => return None,
        })
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            Budget::Low => "budget.low",
            Budget::Mid => "budget.mid",
            Budget::High => "budget.high",
        }
    }
}

/// Meal slot; doubles as the reminder kind discriminator for meals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn key(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            _ => return None,
        })
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            MealType::Breakfast => "meals.category.breakfast",
            MealType::Lunch => "meals.category.lunch",
            MealType::Dinner => "meals.category.dinner",
        }
    }
}

/// Preferred workout slot; drives the daily workout reminder hour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Day,
    Evening,
}

impl TimeOfDay {
    pub fn key(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Day => "day",
            TimeOfDay::Evening => "evening",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "morning" => TimeOfDay::Morning,
            "day" => TimeOfDay::Day,
            "evening" => TimeOfDay::Evening,
            _ => return None,
        })
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "workout_time.morning",
            TimeOfDay::Day => "workout_time.day",
            TimeOfDay::Evening => "workout_time.evening",
        }
    }
}

/// Self-assessed healthiness of a custom meal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthRating {
    Healthy,
    Normal,
    Unhealthy,
}

impl HealthRating {
    pub fn key(self) -> &'static str {
        match self {
            HealthRating::Healthy => "healthy",
            HealthRating::Normal => "normal",
            HealthRating::Unhealthy => "unhealthy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "healthy" => HealthRating::Healthy,
            "normal" => HealthRating::Normal,
            "unhealthy" => HealthRating::Unhealthy,
            _ => return None,
        })
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            HealthRating::Healthy => "meals.health.healthy",
            HealthRating::Normal => "meals.health.normal",
            HealthRating::Unhealthy => "meals.health.unhealthy",
        }
    }
}

/// One ready-made meal pack from the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPack {
    pub id: String,
    pub pack_number: u32,
    pub budget: Budget,
    pub category: MealType,
    pub name: String,
    pub ingredients: String,
    pub price: u32,
    pub currency: String,
    pub calories: u32,
    pub prep_time_min: u32,
}

/// Meal packs loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    packs: Vec<MealPack>,
}

impl MealCatalog {
    /// Load from JSON; a missing or invalid file yields an empty catalog
    /// with a warning, not an error.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("meals data not found at {}: {}", path.display(), err);
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<MealPack>>(&raw) {
            Ok(packs) => Self { packs },
            Err(err) => {
                warn!("invalid meals data at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn from_packs(packs: Vec<MealPack>) -> Self {
        Self { packs }
    }

    pub fn packs_for(&self, budget: Budget, category: MealType) -> Vec<&MealPack> {
        self.packs
            .iter()
            .filter(|p| p.budget == budget && p.category == category)
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&MealPack> {
        self.packs.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(id: &str, budget: Budget, category: MealType) -> MealPack {
        MealPack {
            id: id.to_string(),
            pack_number: 1,
            budget,
            category,
            name: "Овсянка с бананом".to_string(),
            ingredients: "овсянка, банан, мёд".to_string(),
            price: 15000,
            currency: "UZS".to_string(),
            calories: 420,
            prep_time_min: 10,
        }
    }

    #[test]
    fn test_every_group_has_exercises() {
        for group in MuscleGroup::all() {
            assert!(!exercises_for(*group).is_empty(), "empty group {:?}", group);
        }
    }

    #[test]
    fn test_group_key_roundtrip() {
        for group in MuscleGroup::all() {
            assert_eq!(MuscleGroup::from_key(group.key()), Some(*group));
        }
        assert_eq!(MuscleGroup::from_key("cardio"), None);
    }

    #[test]
    fn test_catalog_filters_by_budget_and_category() {
        let catalog = MealCatalog::from_packs(vec![
            pack("low_b1", Budget::Low, MealType::Breakfast),
            pack("mid_b1", Budget::Mid, MealType::Breakfast),
            pack("mid_l1", Budget::Mid, MealType::Lunch),
        ]);
        let found = catalog.packs_for(Budget::Mid, MealType::Breakfast);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "mid_b1");
        assert!(catalog.packs_for(Budget::High, MealType::Dinner).is_empty());
    }

    #[test]
    fn test_missing_file_gives_empty_catalog() {
        let catalog = MealCatalog::load(Path::new("/nonexistent/meals.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_pack_json_shape() {
        let json = r#"[{
            "id": "mid_breakfast_1",
            "pack_number": 1,
            "budget": "mid",
            "category": "breakfast",
            "name": "Овсянка с бананом",
            "ingredients": "овсянка, банан, мёд",
            "price": 15000,
            "currency": "UZS",
            "calories": 420,
            "prep_time_min": 10
        }]"#;
        let packs: Vec<MealPack> = serde_json::from_str(json).unwrap();
        assert_eq!(packs[0].budget, Budget::Mid);
        assert_eq!(packs[0].category, MealType::Breakfast);
    }
}
