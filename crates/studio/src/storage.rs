//! Persistence for users, design history and the community gallery.

use std::sync::Arc;

use studio_core::{
    AnalyticsData, Collection, CommunityComment, CommunityPost, GeneratedDesign, HistoryItem,
    RecordStore, StudioError, User, UserRole,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::demo;

const CURRENT_USER: Collection<User> = Collection::new("current_user");
const HISTORY: Collection<HistoryItem> = Collection::new("history");
const COMMUNITY_POSTS: Collection<CommunityPost> = Collection::new("community_posts");
const SETTINGS: Collection<String> = Collection::new("settings");

const CURRENT_USER_ID: &str = "current";
const API_KEY_ID: &str = "api_key";

/// Time label for comments posted now.
pub const JUST_NOW: &str = "just now";

/// Current time in milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Studio storage on top of any [`RecordStore`].
///
/// Each operation reads and rewrites whole records; nothing guards against
/// two writers updating the same record at once.
#[derive(Clone)]
pub struct StorageService {
    store: Arc<dyn RecordStore>,
    asset_base: String,
}

impl StorageService {
    /// Create a storage service serving bundled assets from `/`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            asset_base: "/".to_string(),
        }
    }

    /// Serve bundled assets (mock images) under a different base path.
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.asset_base = base;
        self
    }

    /// Resolve a bundled asset path against the asset base.
    pub fn asset_path(&self, path: &str) -> String {
        format!("{}{}", self.asset_base, path.trim_start_matches('/'))
    }

    fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Log a user in, replacing any current user.
    ///
    /// Every login creates a fresh user id. Hobbyists without history get
    /// the demo history.
    pub async fn login(&self, username: &str, role: UserRole) -> Result<User, StudioError> {
        // Palette slot comes from the name as typed, before trimming.
        let avatar_index = username.chars().count() % demo::AVATAR_COLORS.len();
        let name = username.trim();

        let username = if name.is_empty() {
            match role {
                UserRole::Hobbyist => "Apprentice",
                UserRole::Owner => "Studio Owner",
            }
            .to_string()
        } else {
            name.to_string()
        };

        let user = User {
            id: Uuid::new_v4().simple().to_string(),
            username,
            avatar_color: demo::AVATAR_COLORS[avatar_index].to_string(),
            role,
            level: match role {
                UserRole::Hobbyist => Some("Intermediate class".to_string()),
                UserRole::Owner => None,
            },
        };

        CURRENT_USER.put(self.store(), CURRENT_USER_ID, &user).await?;

        if role == UserRole::Hobbyist && self.user_history(&user.id).await?.is_empty() {
            self.init_demo_history(&user.id).await?;
        }

        info!("User {} logged in as {:?}", user.username, user.role);
        Ok(user)
    }

    /// The logged-in user, if any.
    pub async fn current_user(&self) -> Result<Option<User>, StudioError> {
        CURRENT_USER.get(self.store(), CURRENT_USER_ID).await
    }

    /// Forget the current user. History and posts are kept.
    pub async fn logout(&self) -> Result<(), StudioError> {
        CURRENT_USER.delete(self.store(), CURRENT_USER_ID).await?;
        Ok(())
    }

    /// Save a design as the newest history item.
    pub async fn save_design(
        &self,
        user_id: &str,
        design: GeneratedDesign,
    ) -> Result<HistoryItem, StudioError> {
        let item = HistoryItem::new(Uuid::new_v4().simple().to_string(), user_id, design, now_ms());
        HISTORY.put(self.store(), &item.id, &item).await?;

        debug!("Saved design {} for user {}", item.id, user_id);
        Ok(item)
    }

    /// Every history item, newest first.
    pub async fn all_history(&self) -> Result<Vec<HistoryItem>, StudioError> {
        HISTORY.list(self.store()).await
    }

    /// One user's history, newest first.
    pub async fn user_history(&self, user_id: &str) -> Result<Vec<HistoryItem>, StudioError> {
        let mut items = self.all_history().await?;
        items.retain(|item| item.user_id == user_id);
        Ok(items)
    }

    /// Pieces accepted into the user's portfolio (those an owner reviewed).
    pub async fn portfolio_items(&self, user_id: &str) -> Result<Vec<HistoryItem>, StudioError> {
        let mut items = self.user_history(user_id).await?;
        items.retain(|item| item.owner_feedback.is_some());
        Ok(items)
    }

    /// Fetch one history item.
    pub async fn history_item(&self, id: &str) -> Result<HistoryItem, StudioError> {
        HISTORY
            .get(self.store(), id)
            .await?
            .ok_or_else(|| StudioError::NotFound {
                entity: "HistoryItem",
                id: id.to_string(),
            })
    }

    /// Rewrite an existing history item in place.
    pub async fn update_history_item(&self, item: &HistoryItem) -> Result<(), StudioError> {
        if HISTORY.get(self.store(), &item.id).await?.is_none() {
            return Err(StudioError::NotFound {
                entity: "HistoryItem",
                id: item.id.clone(),
            });
        }

        HISTORY.put(self.store(), &item.id, item).await
    }

    /// Delete one user's history. Returns how many items were removed.
    pub async fn clear_history(&self, user_id: &str) -> Result<usize, StudioError> {
        let mut removed = 0;
        for item in self.user_history(user_id).await? {
            if HISTORY.delete(self.store(), &item.id).await? {
                removed += 1;
            }
        }

        info!("Cleared {} history items for user {}", removed, user_id);
        Ok(removed)
    }

    /// Seed a user's history with the demo pieces.
    pub async fn init_demo_history(&self, user_id: &str) -> Result<(), StudioError> {
        let items = demo::demo_history(user_id, now_ms(), |path| self.asset_path(path));

        // Oldest first, so the list reads newest first.
        for item in items.iter().rev() {
            HISTORY.put(self.store(), &item.id, item).await?;
        }

        debug!("Seeded {} demo items for user {}", items.len(), user_id);
        Ok(())
    }

    /// The community gallery, seeded with demo posts on first read.
    pub async fn community_posts(&self) -> Result<Vec<CommunityPost>, StudioError> {
        let posts = COMMUNITY_POSTS.list(self.store()).await?;
        if !posts.is_empty() {
            return Ok(posts);
        }

        let seeded = demo::community_posts(|path| self.asset_path(path));
        for post in seeded.iter().rev() {
            COMMUNITY_POSTS.put(self.store(), &post.id, post).await?;
        }

        debug!("Seeded {} community posts", seeded.len());
        Ok(seeded)
    }

    /// Add a comment to the top of a post. Unknown posts are left alone.
    pub async fn add_community_comment(
        &self,
        post_id: &str,
        content: &str,
        user: &User,
    ) -> Result<Vec<CommunityPost>, StudioError> {
        let posts = self.community_posts().await?;
        let Some(mut post) = posts.into_iter().find(|p| p.id == post_id) else {
            debug!("Comment on unknown post {}", post_id);
            return self.community_posts().await;
        };

        let avatar = if user.avatar_color.is_empty() {
            demo::DEFAULT_AVATAR.to_string()
        } else {
            user.avatar_color.clone()
        };

        post.comments.insert(
            0,
            CommunityComment {
                user: user.username.clone(),
                avatar: Some(avatar),
                content: content.to_string(),
                time: JUST_NOW.to_string(),
                is_master: user.is_owner().then_some(true),
            },
        );

        COMMUNITY_POSTS.put(self.store(), &post.id, &post).await?;
        self.community_posts().await
    }

    /// Like or unlike a post. Unknown posts are left alone.
    pub async fn toggle_like(&self, post_id: &str) -> Result<Vec<CommunityPost>, StudioError> {
        let posts = self.community_posts().await?;
        if let Some(mut post) = posts.into_iter().find(|p| p.id == post_id) {
            post.toggle_like();
            COMMUNITY_POSTS.put(self.store(), &post.id, &post).await?;
        }

        self.community_posts().await
    }

    /// Dashboard numbers for studio owners.
    pub fn analytics(&self) -> AnalyticsData {
        demo::analytics()
    }

    /// Every learner submission, or a single mock one while history is empty.
    pub async fn student_submissions(&self) -> Result<Vec<HistoryItem>, StudioError> {
        let history = self.all_history().await?;
        if !history.is_empty() {
            return Ok(history);
        }

        Ok(vec![demo::mock_submission(now_ms(), |path| {
            self.asset_path(path)
        })])
    }

    /// Persist the model API key.
    pub async fn save_api_key(&self, key: &str) -> Result<(), StudioError> {
        SETTINGS
            .put(self.store(), API_KEY_ID, &key.trim().to_string())
            .await
    }

    /// The persisted model API key, if one was saved.
    pub async fn stored_api_key(&self) -> Result<Option<String>, StudioError> {
        Ok(SETTINGS
            .get(self.store(), API_KEY_ID)
            .await?
            .filter(|key| !key.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::{Difficulty, GlassRecipe, MemoryStore};

    fn storage() -> StorageService {
        StorageService::new(Arc::new(MemoryStore::new()))
    }

    fn design(title: &str) -> GeneratedDesign {
        GeneratedDesign {
            image_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            recipe: GlassRecipe {
                title: title.to_string(),
                description: "desc".to_string(),
                techniques: vec![],
                difficulty: Difficulty::Beginner,
                estimated_time: "1 hour".to_string(),
                materials: vec![],
                steps: vec![],
                visual_prompt: "prompt".to_string(),
            },
        }
    }

    #[test]
    fn test_asset_path() {
        let storage = storage();
        assert_eq!(
            storage.asset_path("/images/mock/glass-blown.png"),
            "/images/mock/glass-blown.png"
        );

        let storage = storage.with_asset_base("/studio");
        assert_eq!(
            storage.asset_path("/images/mock/glass-blown.png"),
            "/studio/images/mock/glass-blown.png"
        );
    }

    #[tokio::test]
    async fn test_login_hobbyist_seeds_demo() {
        let storage = storage();
        let user = storage.login("Mia", UserRole::Hobbyist).await.unwrap();

        assert_eq!(user.username, "Mia");
        assert_eq!(user.avatar_color, demo::AVATAR_COLORS[3]);
        assert_eq!(user.level.as_deref(), Some("Intermediate class"));
        assert_eq!(storage.current_user().await.unwrap(), Some(user.clone()));

        let history = storage.user_history(&user.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, format!("{}-demo-1", user.id));
        assert!(history[0].owner_feedback.is_some());

        let portfolio = storage.portfolio_items(&user.id).await.unwrap();
        assert_eq!(portfolio.len(), 1);
    }

    #[tokio::test]
    async fn test_login_defaults_and_owner() {
        let storage = storage();

        let owner = storage.login("  ", UserRole::Owner).await.unwrap();
        assert_eq!(owner.username, "Studio Owner");
        assert_eq!(owner.avatar_color, demo::AVATAR_COLORS[2]);
        assert!(owner.level.is_none());
        assert!(storage.user_history(&owner.id).await.unwrap().is_empty());

        let learner = storage.login("", UserRole::Hobbyist).await.unwrap();
        assert_eq!(learner.username, "Apprentice");
        assert_eq!(learner.avatar_color, demo::AVATAR_COLORS[0]);
        assert_ne!(learner.id, owner.id);
        assert_eq!(storage.current_user().await.unwrap(), Some(learner));
    }

    #[tokio::test]
    async fn test_logout_keeps_history() {
        let storage = storage();
        let user = storage.login("Mia", UserRole::Hobbyist).await.unwrap();

        storage.logout().await.unwrap();
        assert!(storage.current_user().await.unwrap().is_none());
        assert_eq!(storage.user_history(&user.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_design_prepends() {
        let storage = storage();
        storage.save_design("u1", design("first")).await.unwrap();
        let before = storage.all_history().await.unwrap().len();

        let item = storage.save_design("u1", design("second")).await.unwrap();
        let after = storage.all_history().await.unwrap();

        assert_eq!(after.len(), before + 1);
        assert_eq!(after[0], item);
        assert_eq!(after[0].design.recipe.title, "second");
    }

    #[tokio::test]
    async fn test_history_item_not_found() {
        let storage = storage();
        let err = storage.history_item("nope").await.unwrap_err();
        assert!(matches!(err, StudioError::NotFound { entity: "HistoryItem", .. }));

        let item = HistoryItem::new("nope", "u1", design("x"), 0);
        let err = storage.update_history_item(&item).await.unwrap_err();
        assert!(matches!(err, StudioError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_student_submissions_mock_when_empty() {
        let storage = storage();
        let submissions = storage.student_submissions().await.unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].id, "mock1");

        storage.save_design("u1", design("real")).await.unwrap();
        let submissions = storage.student_submissions().await.unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].design.recipe.title, "real");
    }

    #[tokio::test]
    async fn test_api_key_mirror() {
        let storage = storage();
        assert!(storage.stored_api_key().await.unwrap().is_none());

        storage.save_api_key(" secret ").await.unwrap();
        assert_eq!(storage.stored_api_key().await.unwrap().as_deref(), Some("secret"));

        storage.save_api_key("").await.unwrap();
        assert!(storage.stored_api_key().await.unwrap().is_none());
    }

    #[test]
    fn test_analytics() {
        assert_eq!(storage().analytics().active_students, 42);
    }
}
