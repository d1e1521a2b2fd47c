//! 受保护的笑话资源

use crate::{auth::AuthContext, models::joke::Joke};
use axum::Json;

const JOKES: &[Joke] = &[
    Joke {
        id: "0189hNRf2g",
        joke: "I'm tired of following my dreams. I'm just going to ask them where they are going and meet up with them later.",
    },
    Joke {
        id: "08EQZ8EQukb",
        joke: "Did you hear about the guy whose whole left side was cut off? He's all right now.",
    },
    Joke {
        id: "08xHQCdx5Ed",
        joke: "Why didn't the skeleton cross the road? Because he had no guts.",
    },
];

/// 列出笑话（需经过令牌网关）
pub async fn list_jokes(auth_context: AuthContext) -> Json<&'static [Joke]> {
    tracing::debug!(user_id = auth_context.user_id, "Serving jokes");
    Json(JOKES)
}
