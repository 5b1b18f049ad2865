//! Studio records.
//!
//! Field names serialize in camelCase so stored documents keep the shape the
//! web client reads.

use serde::{Deserialize, Serialize};

use crate::error::StudioError;

/// Role of a logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A learner working through designs.
    #[default]
    Hobbyist,
    /// A studio owner reviewing learners.
    Owner,
}

/// A studio user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// CSS gradient classes for the avatar badge.
    pub avatar_color: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl User {
    pub fn is_owner(&self) -> bool {
        self.role == UserRole::Owner
    }
}

/// Difficulty rating of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Master,
}

impl Difficulty {
    /// All ratings, in schema order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Master,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Master => "Master",
        }
    }
}

/// One instruction in a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub step_number: u32,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// A structured glass-art recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlassRecipe {
    pub title: String,
    pub description: String,
    pub techniques: Vec<String>,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub materials: Vec<String>,
    pub steps: Vec<Step>,
    /// English prompt used to render the piece.
    pub visual_prompt: String,
}

impl GlassRecipe {
    /// Check that the text fields a model must fill are not blank.
    pub fn validate(&self) -> Result<(), StudioError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("visualPrompt", &self.visual_prompt),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(StudioError::MalformedResponse(format!(
                    "recipe field '{}' is empty",
                    field
                )));
            }
        }

        Ok(())
    }
}

/// A recipe together with its illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDesign {
    /// Data URI, remote URL, or local asset path.
    pub image_url: String,
    pub recipe: GlassRecipe,
}

/// Score and critique of a physical attempt against its prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// 0 to 100.
    pub score: u8,
    pub comment: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// A comment left on a history item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialComment {
    pub user: String,
    pub content: String,
    pub time: String,
}

/// Community interaction attached to a history item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialRecords {
    pub likes: u32,
    pub comments: Vec<SocialComment>,
}

/// One scored attempt at replicating a design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonIteration {
    /// Starts at 1.
    pub attempt_number: u32,
    pub user_image_url: String,
    pub ai_score: u8,
    pub ai_feedback: String,
    pub ai_strengths: Vec<String>,
    pub ai_improvements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_endorsement: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ComparisonIteration {
    /// Build an iteration record from a comparison result.
    pub fn from_result(
        attempt_number: u32,
        user_image_url: impl Into<String>,
        result: &ComparisonResult,
        timestamp: i64,
    ) -> Self {
        Self {
            attempt_number,
            user_image_url: user_image_url.into(),
            ai_score: result.score,
            ai_feedback: result.comment.clone(),
            ai_strengths: result.strengths.clone(),
            ai_improvements: result.improvements.clone(),
            master_endorsement: None,
            timestamp,
        }
    }
}

/// A design saved to a user's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(flatten)]
    pub design: GeneratedDesign,
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_uploaded_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_records: Option<SocialRecords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_iterations: Option<Vec<ComparisonIteration>>,
}

impl HistoryItem {
    /// Create a bare history item for a design.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        design: GeneratedDesign,
        timestamp: i64,
    ) -> Self {
        Self {
            design,
            id: id.into(),
            timestamp,
            user_id: user_id.into(),
            user_uploaded_image_url: None,
            owner_feedback: None,
            social_records: None,
            comparison_iterations: None,
        }
    }

    /// Comparison iterations recorded so far (empty if none).
    pub fn iterations(&self) -> &[ComparisonIteration] {
        self.comparison_iterations.as_deref().unwrap_or(&[])
    }

    /// Score of the latest attempt, if any.
    pub fn latest_score(&self) -> Option<u8> {
        self.iterations().last().map(|it| it.ai_score)
    }

    /// Number the next attempt will carry.
    pub fn next_attempt_number(&self) -> u32 {
        self.iterations()
            .iter()
            .map(|it| it.attempt_number)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// A comment on a community post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityComment {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub content: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_master: Option<bool>,
}

/// A piece shared in the community gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: String,
    pub author: String,
    pub author_avatar: String,
    pub image_url: String,
    pub title: String,
    pub likes: u32,
    pub is_liked: bool,
    pub comments: Vec<CommunityComment>,
}

impl CommunityPost {
    /// Flip the like state, adjusting the counter.
    pub fn toggle_like(&mut self) {
        self.is_liked = !self.is_liked;
        self.likes = if self.is_liked {
            self.likes.saturating_add(1)
        } else {
            self.likes.saturating_sub(1)
        };
    }
}

/// Studio-wide numbers shown on the owner dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub total_generations: u32,
    pub compute_cost: f64,
    pub active_students: u32,
    pub avg_score: f64,
}
