//! End-to-end studio workflows against offline designers.

use std::sync::Arc;

use mock_designer::{DelayedDesigner, ImageMode, StaticDesigner, STATIC_IMAGE, STATIC_SCORE};
use studio::{
    ComparisonOutcome, DesignRequest, Designer, DesignerFactory, MemoryStore, StorageService,
    Studio, StudioError, User, UserRole,
};
use studio_core::fallback;

fn storage() -> StorageService {
    StorageService::new(Arc::new(MemoryStore::new()))
}

fn studio_with(designer: StaticDesigner) -> Studio {
    Studio::new(storage(), Arc::new(designer))
}

fn keyed_factory() -> DesignerFactory {
    Arc::new(|_key: &str| -> Result<Arc<dyn Designer>, StudioError> {
        Ok(Arc::new(StaticDesigner::new()))
    })
}

async fn learner(studio: &Studio) -> User {
    studio
        .storage()
        .login("Mia", UserRole::Hobbyist)
        .await
        .unwrap()
}

async fn owner(studio: &Studio) -> User {
    studio
        .storage()
        .login("Lin", UserRole::Owner)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_generate_from_prompt_saves_newest_first() {
    let studio = studio_with(StaticDesigner::new());
    let user = learner(&studio).await;
    let before = studio.storage().user_history(&user.id).await.unwrap().len();

    let generation = studio
        .generate(&user, &DesignRequest::from_prompt("a cobalt bowl"))
        .await
        .unwrap();

    let history = studio.storage().user_history(&user.id).await.unwrap();
    assert_eq!(history.len(), before + 1);
    assert_eq!(history[0], generation.item);
    assert_eq!(generation.item.design.image_url, STATIC_IMAGE);
    assert!(!generation.image.unwrap().is_fallback());
}

#[tokio::test]
async fn test_generate_from_image_keeps_photo() {
    let studio = studio_with(StaticDesigner::new());
    let user = learner(&studio).await;

    let request = DesignRequest::from_image(STATIC_IMAGE).with_prompt("swirl");
    let generation = studio.generate(&user, &request).await.unwrap();

    assert_eq!(generation.item.design.image_url, STATIC_IMAGE);
    assert!(generation.item.design.recipe.title.contains("swirl"));
    assert!(generation.image.is_none());
}

#[tokio::test]
async fn test_generate_needs_prompt_or_image() {
    let studio = studio_with(StaticDesigner::new());
    let user = learner(&studio).await;

    let err = studio
        .generate(&user, &DesignRequest::from_prompt("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput(_)));

    let err = studio
        .generate(&user, &DesignRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput(_)));
}

#[tokio::test]
async fn test_generate_without_key_is_missing_api_key() {
    let studio = studio_with(StaticDesigner::without_key());
    let user = learner(&studio).await;
    let before = studio.storage().all_history().await.unwrap().len();

    let requests = [
        DesignRequest::from_prompt("a cobalt bowl"),
        DesignRequest::from_image(STATIC_IMAGE),
        DesignRequest::from_image(STATIC_IMAGE).with_prompt("swirl"),
    ];
    for request in &requests {
        let err = studio.generate(&user, request).await.unwrap_err();
        assert!(err.is_missing_api_key(), "{:?} gave {}", request, err);
    }

    assert_eq!(studio.storage().all_history().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_render_failure_falls_back() {
    let studio = studio_with(StaticDesigner::new().with_image_mode(ImageMode::Fallback));
    let user = learner(&studio).await;

    let generation = studio
        .generate(&user, &DesignRequest::from_prompt("a cobalt bowl"))
        .await
        .unwrap();

    let image = generation.image.unwrap();
    assert!(image.is_fallback());
    assert!(fallback::MOCK_IMAGES.contains(&generation.item.design.image_url.as_str()));
}

#[tokio::test]
async fn test_generate_with_key_retries() {
    let studio = studio_with(StaticDesigner::without_key()).with_factory(keyed_factory());
    let user = learner(&studio).await;
    let request = DesignRequest::from_prompt("a cobalt bowl");

    let err = studio.generate(&user, &request).await.unwrap_err();
    assert!(err.is_missing_api_key());

    let (rekeyed, generation) = studio
        .generate_with_key(&user, &request, " new-key ")
        .await
        .unwrap();
    assert!(generation.item.design.recipe.title.contains("cobalt"));
    assert_eq!(
        studio.storage().stored_api_key().await.unwrap().as_deref(),
        Some("new-key")
    );

    // The first studio keeps its keyless designer.
    assert!(studio.generate(&user, &request).await.unwrap_err().is_missing_api_key());
    assert!(rekeyed.generate(&user, &request).await.is_ok());
}

#[tokio::test]
async fn test_with_api_key_requires_factory_and_key() {
    let studio = studio_with(StaticDesigner::without_key());
    let err = studio.with_api_key("key").await.unwrap_err();
    assert!(matches!(err, StudioError::Configuration(_)));

    let studio = studio.with_factory(keyed_factory());
    let err = studio.with_api_key("  ").await.unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput(_)));
    assert!(studio.storage().stored_api_key().await.unwrap().is_none());
}

#[tokio::test]
async fn test_attempts_are_numbered() {
    let studio = studio_with(StaticDesigner::new());
    let user = learner(&studio).await;
    let generation = studio
        .generate(&user, &DesignRequest::from_prompt("a cobalt bowl"))
        .await
        .unwrap();
    let id = generation.item.id;

    let (item, outcome) = studio.submit_attempt(&id, STATIC_IMAGE).await.unwrap();
    assert!(outcome.is_scored());
    assert_eq!(item.latest_score(), Some(STATIC_SCORE));
    assert_eq!(item.user_uploaded_image_url.as_deref(), Some(STATIC_IMAGE));

    let (item, _) = studio.submit_attempt(&id, STATIC_IMAGE).await.unwrap();
    let numbers: Vec<u32> = item.iterations().iter().map(|it| it.attempt_number).collect();
    assert_eq!(numbers, vec![1, 2]);

    let stored = studio.storage().history_item(&id).await.unwrap();
    assert_eq!(stored, item);
}

#[tokio::test]
async fn test_unreadable_attempt_is_not_recorded() {
    let studio = studio_with(StaticDesigner::new());
    let user = learner(&studio).await;
    let generation = studio
        .generate(&user, &DesignRequest::from_prompt("a cobalt bowl"))
        .await
        .unwrap();
    let id = generation.item.id;

    let (item, outcome) = studio
        .submit_attempt(&id, "https://cdn.example.com/me.jpg")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ComparisonOutcome::Unavailable(fallback::unavailable_comparison())
    );
    assert!(item.iterations().is_empty());
    assert!(item.user_uploaded_image_url.is_none());
    assert_eq!(studio.storage().history_item(&id).await.unwrap(), item);
}

#[tokio::test]
async fn test_remote_prototype_gets_demo_result() {
    let studio = studio_with(StaticDesigner::without_key());
    let user = learner(&studio).await;

    // Seeded demo items point at bundled images, not model renders.
    let history = studio.storage().user_history(&user.id).await.unwrap();
    let (item, outcome) = studio
        .submit_attempt(&history[0].id, STATIC_IMAGE)
        .await
        .unwrap();

    assert_eq!(outcome, ComparisonOutcome::Demo(fallback::demo_comparison()));
    assert_eq!(item.latest_score(), Some(88));
}

#[tokio::test]
async fn test_attempt_on_unknown_item() {
    let studio = studio_with(StaticDesigner::new());
    let err = studio.submit_attempt("missing", STATIC_IMAGE).await.unwrap_err();
    assert!(matches!(err, StudioError::NotFound { .. }));
}

#[tokio::test]
async fn test_owner_review() {
    let studio = studio_with(StaticDesigner::new());
    let student = learner(&studio).await;
    let generation = studio
        .generate(&student, &DesignRequest::from_prompt("a cobalt bowl"))
        .await
        .unwrap();
    let id = generation.item.id;
    studio.submit_attempt(&id, STATIC_IMAGE).await.unwrap();

    let reviewer = owner(&studio).await;

    let item = studio
        .endorse_attempt(&reviewer, &id, 1, "Great wall thickness")
        .await
        .unwrap();
    assert_eq!(
        item.iterations()[0].master_endorsement.as_deref(),
        Some("Great wall thickness")
    );

    let err = studio
        .endorse_attempt(&reviewer, &id, 7, "Nice")
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::NotFound { .. }));

    assert!(!studio
        .storage()
        .portfolio_items(&student.id)
        .await
        .unwrap()
        .iter()
        .any(|i| i.id == id));

    let item = studio
        .leave_feedback(&reviewer, &id, "Ready for the gallery")
        .await
        .unwrap();
    assert_eq!(item.owner_feedback.as_deref(), Some("Ready for the gallery"));

    let portfolio = studio.storage().portfolio_items(&student.id).await.unwrap();
    assert!(portfolio.iter().any(|i| i.id == id));
}

#[tokio::test]
async fn test_review_requires_owner_and_text() {
    let studio = studio_with(StaticDesigner::new());
    let student = learner(&studio).await;
    let id = studio.storage().user_history(&student.id).await.unwrap()[1]
        .id
        .clone();

    let err = studio
        .leave_feedback(&student, &id, "Looks great")
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::NotPermitted(_)));

    let reviewer = owner(&studio).await;
    let err = studio.leave_feedback(&reviewer, &id, "  ").await.unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput(_)));
}

#[tokio::test]
async fn test_publish_work() {
    let studio = studio_with(StaticDesigner::new());
    let user = learner(&studio).await;

    let item = studio.publish_work(&user, STATIC_IMAGE, None).await.unwrap();
    assert_eq!(item.design.recipe.title, "My new piece");
    assert_eq!(item.design.recipe.description, "My latest glass artwork.");
    assert!(item.design.recipe.steps.is_empty());

    let item = studio
        .publish_work(&user, STATIC_IMAGE, Some("Amber bowl"))
        .await
        .unwrap();
    assert_eq!(item.design.recipe.description, "Amber bowl");
    assert_eq!(studio.storage().user_history(&user.id).await.unwrap()[0], item);

    let err = studio.publish_work(&user, "", None).await.unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput(_)));
}

#[tokio::test]
async fn test_caption() {
    let studio = studio_with(StaticDesigner::without_key());
    assert_eq!(studio.caption(STATIC_IMAGE).await, fallback::TRIAL_CAPTION);

    let studio = studio_with(StaticDesigner::new());
    assert_ne!(studio.caption(STATIC_IMAGE).await, fallback::TRIAL_CAPTION);
}

#[tokio::test]
async fn test_delayed_designer_behaves_the_same() {
    let designer = DelayedDesigner::with_millis(StaticDesigner::new(), 5);
    let studio = Studio::new(storage(), Arc::new(designer));
    let user = learner(&studio).await;

    let generation = studio
        .generate(&user, &DesignRequest::from_prompt("a cobalt bowl"))
        .await
        .unwrap();
    assert_eq!(generation.item.design.image_url, STATIC_IMAGE);
}
