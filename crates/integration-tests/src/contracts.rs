//! Store scenarios observed through the ports only. Each backend's test
//! target runs every scenario against a fresh, empty store.

use domains::ports::{DataSession, SessionFactory};
use domains::{
    DomainError, Ingredient, MeasurementUnit, Recipe, RecipeContent, RecipeDifficulty, RecipeId,
    Tag, UserId,
};
use rust_decimal::Decimal;

use crate::{seed_ingredient, seed_tag, seed_user};

fn content(title: &str) -> RecipeContent<'_> {
    RecipeContent {
        title,
        description: Some("Slow cooked"),
        prep_time_minutes: 10,
        cook_time_minutes: 90,
        servings: 6,
        difficulty: RecipeDifficulty::Medium,
    }
}

async fn new_recipe(
    session: &dyn DataSession,
    author: UserId,
    slug: &str,
    title: &str,
) -> Recipe {
    let id = session.recipes().next_id().await.expect("recipe id");
    Recipe::create(id, author, slug, content(title)).expect("valid recipe")
}

async fn load(session: &dyn DataSession, id: RecipeId) -> Option<Recipe> {
    session.recipes().find_by_id(id).await.expect("recipe lookup")
}

/// Changes staged in one session are invisible to others until committed.
pub async fn staged_changes_are_private_to_their_session(store: &dyn SessionFactory) {
    let writer = store.open_session();
    let reader = store.open_session();

    let id = writer.ingredients().next_id().await.unwrap();
    writer
        .ingredients()
        .add(Ingredient::create(id, "paprika", None, None).unwrap());
    assert!(reader.ingredients().find_by_id(id).await.unwrap().is_none());

    assert_eq!(writer.unit_of_work().save_changes().await.unwrap(), 1);
    assert!(reader.ingredients().find_by_id(id).await.unwrap().is_some());
}

/// One failing change rolls back everything staged alongside it.
pub async fn a_rejected_commit_applies_none_of_its_changes(store: &dyn SessionFactory) {
    let session = store.open_session();
    let ingredient = session.ingredients().next_id().await.unwrap();
    session
        .ingredients()
        .add(Ingredient::create(ingredient, "cumin", None, None).unwrap());
    let tags = session.tags();
    let first = tags.next_id().await.unwrap();
    let second = tags.next_id().await.unwrap();
    tags.add(Tag::create(first, "Spicy", "spicy").unwrap());
    tags.add(Tag::create(second, "Hot", "spicy").unwrap());

    let err = session.unit_of_work().save_changes().await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("ux_tags_slug")));

    let after = store.open_session();
    assert!(after.tags().list().await.unwrap().is_empty());
    assert!(after.ingredients().list().await.unwrap().is_empty());
    // The failed changes were taken; a retry has nothing left to write.
    assert_eq!(session.unit_of_work().save_changes().await.unwrap(), 0);
}

/// Issued ids keep increasing across sessions and are not handed out twice,
/// even when the work that claimed them was never committed.
pub async fn identifiers_are_never_reused(store: &dyn SessionFactory) {
    let first = store.open_session().tags().next_id().await.unwrap();
    let second = store.open_session().tags().next_id().await.unwrap();
    assert!(second.value() > first.value());

    let session = store.open_session();
    let step = session.recipes().next_step_id().await.unwrap();
    let next_step = session.recipes().next_step_id().await.unwrap();
    assert!(next_step.value() > step.value());
    let entry = session.recipes().next_ingredient_entry_id().await.unwrap();
    let next_entry = session.recipes().next_ingredient_entry_id().await.unwrap();
    assert!(next_entry.value() > entry.value());
}

/// An author cannot own two recipes with the same title, and a recipe
/// needs an existing author.
pub async fn recipe_constraints_are_enforced_on_commit(store: &dyn SessionFactory) {
    let author = seed_user(store, "Ada").await;
    let session = store.open_session();

    let chili = new_recipe(session.as_ref(), author, "chili", "Chili").await;
    let again = new_recipe(session.as_ref(), author, "chili-2", "Chili").await;
    session.recipes().add(chili);
    session.recipes().add(again);
    let err = session.unit_of_work().save_changes().await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ref m) if m.contains("ux_recipes_author_title")
    ));

    let orphan = new_recipe(session.as_ref(), UserId::generate(), "stew", "Stew").await;
    session.recipes().add(orphan);
    let err = session.unit_of_work().save_changes().await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("fk_recipes_author")));

    assert!(session.recipes().list().await.unwrap().is_empty());
}

/// Steps, ingredient entries and tags are stored with the recipe; an
/// update replaces them and bumps the row version.
pub async fn recipe_children_are_replaced_on_update(store: &dyn SessionFactory) {
    let author = seed_user(store, "Ada").await;
    let beans = seed_ingredient(store, "Beans").await;
    let onion = seed_ingredient(store, "Onion").await;
    let spicy = seed_tag(store, "Spicy").await;
    let dinner = seed_tag(store, "Dinner").await;

    let session = store.open_session();
    let recipes = session.recipes();
    let mut recipe = new_recipe(session.as_ref(), author, "chili", "Chili").await;
    let id = recipe.id();
    for (number, instruction) in [(1, "Soak beans"), (2, "Simmer")] {
        let step_id = recipes.next_step_id().await.unwrap();
        recipe
            .add_step(step_id, number, instruction, Some(30), None)
            .unwrap();
    }
    let entry_id = recipes.next_ingredient_entry_id().await.unwrap();
    recipe
        .add_ingredient(entry_id, beans, Decimal::new(2505, 3), MeasurementUnit::Cup, None)
        .unwrap();
    recipe.add_tag(spicy);
    recipe.add_tag(dinner);
    recipes.add(recipe);
    session.unit_of_work().save_changes().await.unwrap();

    let mut stored = load(session.as_ref(), id).await.expect("stored recipe");
    assert_eq!(stored.version(), 0);
    assert_eq!(stored.author_id(), author);
    assert_eq!(stored.description(), Some("Slow cooked"));
    assert_eq!(stored.steps().len(), 2);
    assert_eq!(stored.tags().len(), 2);
    let [entry] = stored.ingredients() else {
        panic!("expected one ingredient entry");
    };
    assert_eq!(entry.id(), entry_id);
    assert_eq!(entry.amount(), Decimal::new(251, 2));
    assert_eq!(entry.unit(), MeasurementUnit::Cup);

    assert!(stored.remove_step(1));
    assert!(stored.remove_tag(spicy));
    let onion_entry = recipes.next_ingredient_entry_id().await.unwrap();
    stored
        .add_ingredient(onion_entry, onion, Decimal::ONE, MeasurementUnit::Piece, Some("diced"))
        .unwrap();
    recipes.update(stored);
    session.unit_of_work().save_changes().await.unwrap();

    let updated = load(session.as_ref(), id).await.expect("updated recipe");
    assert_eq!(updated.version(), 1);
    let steps: Vec<_> = updated.steps().iter().map(|s| s.instruction()).collect();
    assert_eq!(steps, ["Simmer"]);
    let tags: Vec<_> = updated.tags().iter().map(|t| t.tag_id()).collect();
    assert_eq!(tags, [dinner]);
    let mut ingredients: Vec<_> = updated
        .ingredients()
        .iter()
        .map(|e| (e.ingredient_id(), e.note().map(str::to_owned)))
        .collect();
    ingredients.sort_by_key(|(ingredient, _)| ingredient.value());
    assert_eq!(
        ingredients,
        [(beans, None), (onion, Some("diced".to_owned()))]
    );
}

/// Removing a recipe takes its children with it and leaves the shared
/// ingredients and tags in place.
pub async fn removing_a_recipe_cascades_to_its_children(store: &dyn SessionFactory) {
    let author = seed_user(store, "Ada").await;
    let beans = seed_ingredient(store, "Beans").await;
    let spicy = seed_tag(store, "Spicy").await;

    let session = store.open_session();
    let recipes = session.recipes();
    let mut recipe = new_recipe(session.as_ref(), author, "chili", "Chili").await;
    let id = recipe.id();
    let step_id = recipes.next_step_id().await.unwrap();
    recipe.add_step(step_id, 1, "Simmer", None, None).unwrap();
    let entry_id = recipes.next_ingredient_entry_id().await.unwrap();
    recipe
        .add_ingredient(entry_id, beans, Decimal::TWO, MeasurementUnit::Cup, None)
        .unwrap();
    recipe.add_tag(spicy);
    recipes.add(recipe);
    session.unit_of_work().save_changes().await.unwrap();

    recipes.remove(id);
    assert_eq!(session.unit_of_work().save_changes().await.unwrap(), 1);
    assert!(load(session.as_ref(), id).await.is_none());
    assert_eq!(session.ingredients().list().await.unwrap().len(), 1);
    assert_eq!(session.tags().list().await.unwrap().len(), 1);

    recipes.remove(id);
    let err = session.unit_of_work().save_changes().await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "recipe", .. }));

    // Title and slug are free again.
    let replacement = new_recipe(session.as_ref(), author, "chili", "Chili").await;
    recipes.add(replacement);
    session.unit_of_work().save_changes().await.unwrap();
}
