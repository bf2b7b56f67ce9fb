use serde::{Deserialize, Serialize};

/// One posted video and whatever music metadata came attached to it.
/// Produced by a `VideoSource`, consumed once by the song extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub description: String,
    pub created_time: String, // ISO-8601
    pub music: Option<MusicInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicInfo {
    pub title: String,
    pub author: String,
    pub duration: u64, // seconds
}

impl VideoRecord {
    pub fn has_music(&self) -> bool {
        self.music
            .as_ref()
            .map_or(false, |m| !m.title.is_empty())
    }
}
