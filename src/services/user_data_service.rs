// ==================== USER DATA OPERATIONS ====================
// Every operation is a full-document transaction: load -> mutate -> save.
// Nothing is cached between calls, so a failed save leaves the previous
// file contents as the only visible state.

use serde_json::{Map, Value};

use crate::{
    database::UserStore,
    models::{MealPlan, Preferences, Recipe, UserRecord},
    utils::AppError,
};

/// Appends `details` to the user's cookbook under a freshly generated id.
/// Creates the user with defaults if needed.
pub fn add_recipe<S: UserStore + ?Sized>(
    store: &S,
    user_id: &str,
    details: Map<String, Value>,
) -> Result<Recipe, AppError> {
    let mut users = store.load()?;
    let recipe = Recipe::with_new_id(details);

    users
        .entry(user_id.to_string())
        .or_insert_with(UserRecord::default)
        .cookbook
        .push(recipe.clone());

    store.save(&users)?;
    Ok(recipe)
}

/// Drops every cookbook entry with `recipe_id`. Nothing is written when no
/// entry matched.
pub fn remove_recipe<S: UserStore + ?Sized>(
    store: &S,
    user_id: &str,
    recipe_id: &str,
) -> Result<(), AppError> {
    let mut users = store.load()?;
    let record = users
        .get_mut(user_id)
        .ok_or_else(|| AppError::NotFound(format!("user '{}'", user_id)))?;

    let before = record.cookbook.len();
    record.cookbook.retain(|recipe| recipe.id != recipe_id);

    if record.cookbook.len() == before {
        return Err(AppError::NotFound(format!("recipe '{}'", recipe_id)));
    }

    store.save(&users)
}

/// Replaces the pantry wholesale.
pub fn set_pantry<S: UserStore + ?Sized>(
    store: &S,
    user_id: &str,
    items: Vec<String>,
) -> Result<(), AppError> {
    update_record(store, user_id, |record| record.pantry = items)
}

/// Replaces the meal plan wholesale. The shape is trusted as given.
pub fn set_meal_plan<S: UserStore + ?Sized>(
    store: &S,
    user_id: &str,
    plan: MealPlan,
) -> Result<(), AppError> {
    update_record(store, user_id, |record| record.meal_plan = plan)
}

/// Shallow merge into the existing preferences.
pub fn merge_preferences<S: UserStore + ?Sized>(
    store: &S,
    user_id: &str,
    partial: Preferences,
) -> Result<(), AppError> {
    update_record(store, user_id, |record| record.merge_preferences(partial))
}

fn update_record<S, F>(store: &S, user_id: &str, mutate: F) -> Result<(), AppError>
where
    S: UserStore + ?Sized,
    F: FnOnce(&mut UserRecord),
{
    let mut users = store.load()?;
    let record = users
        .entry(user_id.to_string())
        .or_insert_with(UserRecord::default);
    mutate(record);
    store.save(&users)
}
