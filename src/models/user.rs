use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use indexmap::IndexMap;

use super::recipe::Recipe;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const MEAL_SLOTS: [&str; 3] = ["breakfast", "lunch", "dinner"];

pub const DEFAULT_PANTRY: [&str; 5] = ["Salt", "Black Pepper", "Olive Oil", "Garlic", "Onion"];

/// Weekday -> meal slot -> recipe reference (or null). Stored as supplied.
pub type MealPlan = Map<String, Value>;

pub type Preferences = Map<String, Value>;

/// Everything persisted for one user id, keyed by that id. Users stay in
/// first-seen order on disk.
pub type UserDirectory = IndexMap<String, UserRecord>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub cookbook: Vec<Recipe>,
    pub pantry: Vec<String>,
    pub meal_plan: MealPlan,
    pub preferences: Preferences,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            cookbook: Vec::new(),
            pantry: DEFAULT_PANTRY.iter().map(|s| s.to_string()).collect(),
            meal_plan: empty_meal_plan(),
            preferences: default_preferences(),
        }
    }
}

impl UserRecord {
    /// Shallow merge: incoming keys overwrite, everything else is kept.
    pub fn merge_preferences(&mut self, partial: Preferences) {
        self.preferences.extend(partial);
    }
}

pub fn empty_meal_plan() -> MealPlan {
    WEEKDAYS
        .iter()
        .map(|day| {
            let slots: Map<String, Value> = MEAL_SLOTS
                .iter()
                .map(|slot| (slot.to_string(), Value::Null))
                .collect();
            (day.to_string(), Value::Object(slots))
        })
        .collect()
}

fn default_preferences() -> Preferences {
    let mut prefs = Map::new();
    prefs.insert("theme".to_string(), Value::from("light"));
    prefs.insert("default_diet".to_string(), Value::from("None"));
    prefs
}
