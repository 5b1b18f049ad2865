//! Seed data for new users, the community gallery and the owner dashboard.

use studio_core::{
    AnalyticsData, CommunityComment, CommunityPost, Difficulty, GeneratedDesign, GlassRecipe,
    HistoryItem, SocialComment, SocialRecords,
};

/// Avatar gradients, picked by username length.
pub const AVATAR_COLORS: [&str; 4] = [
    "from-cyan-400 to-blue-600",
    "from-purple-400 to-pink-600",
    "from-emerald-400 to-teal-600",
    "from-orange-400 to-red-600",
];

/// Avatar used for comments from users without one.
pub const DEFAULT_AVATAR: &str = "from-gray-400 to-gray-600";

const MASTER_AVATAR: &str = "from-blue-600 to-indigo-600";
const MASTER_NAME: &str = "Lumina Master";

const DAY_MS: i64 = 86_400_000;

fn placeholder_recipe(
    title: &str,
    description: &str,
    techniques: &[&str],
    difficulty: Difficulty,
    estimated_time: &str,
    materials: &[&str],
    visual_prompt: &str,
) -> GlassRecipe {
    GlassRecipe {
        title: title.to_string(),
        description: description.to_string(),
        techniques: techniques.iter().map(|s| s.to_string()).collect(),
        difficulty,
        estimated_time: estimated_time.to_string(),
        materials: materials.iter().map(|s| s.to_string()).collect(),
        steps: Vec::new(),
        visual_prompt: visual_prompt.to_string(),
    }
}

fn master_comment(content: &str, time: &str) -> CommunityComment {
    CommunityComment {
        user: MASTER_NAME.to_string(),
        avatar: Some(MASTER_AVATAR.to_string()),
        content: content.to_string(),
        time: time.to_string(),
        is_master: Some(true),
    }
}

fn learner_comment(user: &str, content: &str, time: &str) -> CommunityComment {
    CommunityComment {
        user: user.to_string(),
        avatar: None,
        content: content.to_string(),
        time: time.to_string(),
        is_master: None,
    }
}

/// Two demo history items for a new hobbyist, newest first.
///
/// Ids are prefixed with the user id so seeding one user never overwrites
/// another user's demo items.
pub fn demo_history(user_id: &str, now_ms: i64, asset: impl Fn(&str) -> String) -> Vec<HistoryItem> {
    let mut crackle = HistoryItem::new(
        format!("{}-demo-1", user_id),
        user_id,
        GeneratedDesign {
            image_url: asset("/images/mock/glass-blown.png"),
            recipe: placeholder_recipe(
                "Ice Crackle Cup",
                "Natural texture formed by rapid quenching.",
                &["Blowing", "Quench crackle"],
                Difficulty::Intermediate,
                "3 hours",
                &["High-clarity batch", "Ice water bath"],
                "Ice crackle glass cup",
            ),
        },
        now_ms - DAY_MS,
    );
    crackle.user_uploaded_image_url = Some(asset("/images/mock/glass-student.png"));
    crackle.owner_feedback = Some(
        "The crackle on this piece is wonderfully natural, and the transition at the lip shows \
real control of the heat. Next time, try working a trace of silver leaf powder into the layer \
for a dawn-like shimmer."
            .to_string(),
    );
    crackle.social_records = Some(SocialRecords {
        likes: 42,
        comments: vec![
            SocialComment {
                user: "Wang Xiaomei".to_string(),
                content: "This texture is stunning! How did you get it?".to_string(),
                time: "2 hours ago".to_string(),
            },
            SocialComment {
                user: "Master Chen".to_string(),
                content: "A piece with a lot of spirit.".to_string(),
                time: "5 hours ago".to_string(),
            },
        ],
    });

    let paperweight = HistoryItem::new(
        format!("{}-demo-2", user_id),
        user_id,
        GeneratedDesign {
            image_url: asset("/images/mock/glass-lampwork.png"),
            recipe: placeholder_recipe(
                "Millefiori Paperweight",
                "A first attempt at classic Murano millefiori.",
                &["Lampworking", "Mould pressing"],
                Difficulty::Advanced,
                "5 hours",
                &["Coloured glass rods", "Clear casing glass"],
                "Millefiori glass paperweight",
            ),
        },
        now_ms - 2 * DAY_MS,
    );

    vec![crackle, paperweight]
}

/// The gallery shown before anyone has posted.
pub fn community_posts(asset: impl Fn(&str) -> String) -> Vec<CommunityPost> {
    vec![
        CommunityPost {
            id: "1".to_string(),
            author: "Lin Xiaoming".to_string(),
            author_avatar: "from-purple-400 to-pink-600".to_string(),
            image_url: asset("/images/mock/glass-blown.png"),
            title: "Morning Light Vase".to_string(),
            likes: 124,
            is_liked: false,
            comments: vec![
                master_comment(
                    "Rich layers of light, especially the gradient at the lip. Excellent heat control.",
                    "1 hour ago",
                ),
                learner_comment(
                    "Zhang Yaqi",
                    "Wow, this blue is so clear! Any tips for avoiding bubbles?",
                    "2 hours ago",
                ),
            ],
        },
        CommunityPost {
            id: "2".to_string(),
            author: "Chen Daqiang".to_string(),
            author_avatar: "from-emerald-400 to-teal-600".to_string(),
            image_url: asset("/images/mock/glass-fused.png"),
            title: "Echoes of the Deep".to_string(),
            likes: 89,
            is_liked: true,
            comments: vec![master_comment(
                "Bold composition with a mysterious deep-sea palette. Polish the edges a little finer.",
                "10 minutes ago",
            )],
        },
        CommunityPost {
            id: "3".to_string(),
            author: "Wang Xiaomei".to_string(),
            author_avatar: "from-orange-400 to-red-600".to_string(),
            image_url: asset("/images/mock/glass-masterpiece.png"),
            title: "Lava Sculpture".to_string(),
            likes: 256,
            is_liked: false,
            comments: vec![
                learner_comment("Liu Chuan", "Breathtaking. Is this fused or blown?", "5 minutes ago"),
                master_comment(
                    "A perfect marriage of fluid dynamics and form. Not just craft, but art.",
                    "1 minute ago",
                ),
                learner_comment("Lin Xiaoming", "Hats off!", "3 minutes ago"),
            ],
        },
    ]
}

/// Fixed numbers for the owner dashboard.
pub fn analytics() -> AnalyticsData {
    AnalyticsData {
        total_generations: 1248,
        compute_cost: 452.30,
        active_students: 42,
        avg_score: 84.5,
    }
}

/// Submission shown to owners while no learner has saved anything.
pub fn mock_submission(now_ms: i64, asset: impl Fn(&str) -> String) -> HistoryItem {
    HistoryItem::new(
        "mock1",
        "student_021",
        GeneratedDesign {
            image_url: asset("/images/mock/glass-student.png"),
            recipe: placeholder_recipe(
                "Practice: Gradient Texture Cup",
                "A first try at glassblowing.",
                &["Blowing"],
                Difficulty::Beginner,
                "2 hours",
                &["Clear batch"],
                "",
            ),
        },
        now_ms - 1_000_000,
    )
}
