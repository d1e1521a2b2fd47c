//! Jokes resource models

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Joke {
    pub id: &'static str,
    pub joke: &'static str,
}
