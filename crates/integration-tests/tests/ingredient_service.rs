use integration_tests::{seed_ingredient, store};
use services::ingredients::{
    CreateIngredientCommand, CreateIngredientError, CreateIngredientHandler, ListIngredientsHandler,
    RenameIngredientCommand, RenameIngredientError, RenameIngredientHandler,
};
use domains::IngredientId;
use tokio_test::assert_ok;

fn create(name: &str) -> CreateIngredientCommand {
    CreateIngredientCommand {
        name: name.to_owned(),
        plural_name: None,
        default_unit: None,
        is_active: true,
    }
}

#[tokio::test]
async fn duplicate_names_are_rejected_regardless_of_case_and_whitespace() {
    let store = store();
    let session = store.session();
    let handler = CreateIngredientHandler::from_session(&session);

    assert_ok!(handler.handle(create("Garlic")).await);
    let err = handler.handle(create("  gARLIC ")).await.unwrap_err();
    assert!(matches!(err, CreateIngredientError::NameAlreadyExists(ref name) if name == "garlic"));

    let listed = ListIngredientsHandler::from_session(&session).handle().await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn blank_name_persists_nothing() {
    let store = store();
    let session = store.session();

    let err = CreateIngredientHandler::from_session(&session)
        .handle(create("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, CreateIngredientError::InvalidName));
    assert!(ListIngredientsHandler::from_session(&session).handle().await.unwrap().is_empty());
}

#[tokio::test]
async fn inactive_flag_is_honoured() {
    let store = store();
    let session = store.session();
    let dto = CreateIngredientHandler::from_session(&session)
        .handle(CreateIngredientCommand {
            is_active: false,
            ..create("Saffron")
        })
        .await
        .unwrap();
    assert!(!dto.is_active);
}

#[tokio::test]
async fn rename_into_an_existing_name_leaves_both_untouched() {
    let store = store();
    seed_ingredient(&store, "Basil").await;
    let thyme = seed_ingredient(&store, "Thyme").await;
    let session = store.session();

    let err = RenameIngredientHandler::from_session(&session)
        .handle(RenameIngredientCommand {
            id: thyme,
            name: "BASIL".to_owned(),
            plural_name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RenameIngredientError::NameAlreadyExists(_)));

    let names: Vec<_> = ListIngredientsHandler::from_session(&session)
        .handle()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, ["basil", "thyme"]);
}

#[tokio::test]
async fn rename_to_its_own_name_is_allowed() {
    let store = store();
    let id = seed_ingredient(&store, "Leek").await;
    let session = store.session();

    assert_ok!(
        RenameIngredientHandler::from_session(&session)
            .handle(RenameIngredientCommand {
                id,
                name: " LEEK ".to_owned(),
                plural_name: Some("Leeks".to_owned()),
            })
            .await
    );
    let listed = ListIngredientsHandler::from_session(&session).handle().await.unwrap();
    assert_eq!(listed[0].plural_name.as_deref(), Some("leeks"));
}

#[tokio::test]
async fn renaming_a_missing_ingredient_is_not_found() {
    let store = store();
    let session = store.session();
    let err = RenameIngredientHandler::from_session(&session)
        .handle(RenameIngredientCommand {
            id: IngredientId::new(99),
            name: "Dill".to_owned(),
            plural_name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RenameIngredientError::NotFound(id) if id == IngredientId::new(99)));
}
