use chrono::Utc;
use tracing::info;

use super::{MusicInfo, VideoRecord};
use crate::error::Result;

/// Where videos come from. The only implementation today synthesizes data,
/// but a real network-backed client slots in here without touching the
/// extractor or the exporters.
pub trait VideoSource: Send + Sync {
    /// Fetch up to `max_videos` of the profile's posted videos, newest first.
    fn fetch_videos(&self, handle: &str, max_videos: usize) -> Result<Vec<VideoRecord>>;
}

/// Placeholder source. TikTok's API wants authentication we don't do, so
/// this fabricates a small, predictable batch instead of going out on the
/// wire. Capped at 10 records no matter what the caller asks for.
pub struct SimulatedSource;

impl SimulatedSource {
    const MAX_RECORDS: usize = 10;

    pub fn new() -> Self {
        Self
    }
}

impl VideoSource for SimulatedSource {
    fn fetch_videos(&self, handle: &str, max_videos: usize) -> Result<Vec<VideoRecord>> {
        info!("Fetching videos for user: {handle}");

        let count = max_videos.min(Self::MAX_RECORDS);
        let now = Utc::now().to_rfc3339();

        let videos = (1..=count)
            .map(|i| VideoRecord {
                id: format!("video_{i}"),
                description: format!("Sample video {i}"),
                created_time: now.clone(),
                music: Some(MusicInfo {
                    title: format!("Song Title {i}"),
                    author: format!("Artist {i}"),
                    duration: 30,
                }),
            })
            .collect();

        Ok(videos)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_binds_over_large_requests() {
        let source = SimulatedSource::new();

        let videos = source.fetch_videos("jane_doe", 50).unwrap();
        assert_eq!(videos.len(), 10);

        let videos = source.fetch_videos("jane_doe", 3).unwrap();
        assert_eq!(videos.len(), 3);
    }

    #[test]
    fn test_every_record_carries_music() {
        let source = SimulatedSource::new();

        for video in source.fetch_videos("jane_doe", 10).unwrap() {
            let music = video.music.expect("simulated videos always have music");
            assert!(!music.title.is_empty());
        }
    }

    #[test]
    fn test_records_are_ordered() {
        let source = SimulatedSource::new();

        let videos = source.fetch_videos("jane_doe", 5).unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["video_1", "video_2", "video_3", "video_4", "video_5"]);
    }
}
