use integration_tests::{seed_user, store};
use services::tags::{CreateTagCommand, CreateTagError, CreateTagHandler, ListTagsHandler};
use services::users::{CreateUserCommand, CreateUserError, CreateUserHandler, ListUsersHandler};
use tokio_test::assert_ok;

fn user(name: &str) -> CreateUserCommand {
    CreateUserCommand { name: name.to_owned() }
}

fn tag(name: &str, slug: Option<&str>) -> CreateTagCommand {
    CreateTagCommand {
        name: name.to_owned(),
        slug: slug.map(str::to_owned),
    }
}

#[tokio::test]
async fn users_get_distinct_ids_and_trimmed_names() {
    let store = store();
    let session = store.session();
    let handler = CreateUserHandler::from_session(&session);

    let grace = handler.handle(user("  Grace ")).await.unwrap();
    let ada = handler.handle(user("Ada")).await.unwrap();
    assert_eq!(grace.name, "Grace");
    assert_ne!(grace.id, ada.id);
    assert!(!grace.id.is_nil());

    let names: Vec<_> = ListUsersHandler::from_session(&session)
        .handle()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(names, ["Ada", "Grace"]);
}

#[tokio::test]
async fn user_names_are_unique_and_bounded() {
    let store = store();
    seed_user(&store, "Ada").await;
    let session = store.session();
    let handler = CreateUserHandler::from_session(&session);

    let err = handler.handle(user(" Ada ")).await.unwrap_err();
    assert!(matches!(err, CreateUserError::NameAlreadyExists(ref name) if name == "Ada"));
    assert!(matches!(handler.handle(user("")).await, Err(CreateUserError::InvalidName)));
    assert!(matches!(
        handler.handle(user(&"x".repeat(201))).await,
        Err(CreateUserError::InvalidName)
    ));
    assert_ok!(handler.handle(user(&"x".repeat(200))).await);
}

#[tokio::test]
async fn tag_slugs_default_to_the_slugified_name() {
    let store = store();
    let session = store.session();
    let handler = CreateTagHandler::from_session(&session);

    let tag_dto = handler.handle(tag("Quick Weeknight", None)).await.unwrap();
    assert_eq!(tag_dto.slug, "quick-weeknight");

    let err = handler.handle(tag("Quick weeknight!", None)).await.unwrap_err();
    assert!(matches!(
        err,
        CreateTagError::SlugAlreadyExists(ref slug) if slug == "quick-weeknight"
    ));

    assert_ok!(handler.handle(tag("Vegan", Some("  PLANT-BASED "))).await);
    assert!(matches!(handler.handle(tag("!!!", None)).await, Err(CreateTagError::InvalidSlug)));

    let slugs: Vec<_> = ListTagsHandler::from_session(&session)
        .handle()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.slug)
        .collect();
    assert_eq!(slugs, ["quick-weeknight", "plant-based"]);
}
