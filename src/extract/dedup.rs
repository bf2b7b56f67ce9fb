use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::VideoRecord;

/// One distinct music track found across a profile's videos. What the
/// exporters actually write out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub duration: u64,
    pub video_id: String,
    pub video_description: String,
    pub created_time: String,
}

const DESCRIPTION_CAP: usize = 100;

/// Single pass over the videos, first occurrence of each (title, artist)
/// pair wins. Videos with no music or an untitled track contribute nothing.
pub fn extract_songs(videos: &[VideoRecord]) -> Vec<SongRecord> {
    let mut songs = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for video in videos {
        let Some(music) = &video.music else {
            continue;
        };
        if music.title.is_empty() {
            continue;
        }

        let key = (music.title.clone(), music.author.clone());
        if seen.contains(&key) {
            continue;
        }

        songs.push(SongRecord {
            title: music.title.clone(),
            artist: music.author.clone(),
            duration: music.duration,
            video_id: video.id.clone(),
            video_description: truncate_description(&video.description),
            created_time: video.created_time.clone(),
        });
        seen.insert(key);
    }

    songs
}

// Char-based so multi-byte descriptions never split mid-scalar
fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_CAP {
        let truncated: String = description.chars().take(DESCRIPTION_CAP).collect();
        format!("{truncated}...")
    } else {
        description.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MusicInfo;

    fn video(id: &str, title: &str, artist: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            description: format!("description of {id}"),
            created_time: "2025-08-07T12:00:00+00:00".to_string(),
            music: Some(MusicInfo {
                title: title.to_string(),
                author: artist.to_string(),
                duration: 30,
            }),
        }
    }

    #[test]
    fn test_duplicate_pair_keeps_first_occurrence() {
        let videos = vec![
            video("video_1", "Midnight", "Nova"),
            video("video_2", "Midnight", "Nova"),
        ];

        let songs = extract_songs(&videos);
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].video_id, "video_1");
        assert_eq!(songs[0].video_description, "description of video_1");
    }

    #[test]
    fn test_same_title_different_artist_is_distinct() {
        let videos = vec![
            video("video_1", "Midnight", "Nova"),
            video("video_2", "Midnight", "Eclipse"),
        ];

        assert_eq!(extract_songs(&videos).len(), 2);
    }

    #[test]
    fn test_missing_or_untitled_music_is_skipped() {
        let mut no_music = video("video_1", "", "");
        no_music.music = None;
        let untitled = video("video_2", "", "Nova");

        assert!(extract_songs(&[no_music, untitled]).is_empty());
    }

    #[test]
    fn test_order_follows_first_encounter() {
        let videos = vec![
            video("video_1", "Charlie", "C"),
            video("video_2", "Alpha", "A"),
            video("video_3", "Charlie", "C"),
            video("video_4", "Bravo", "B"),
        ];

        let songs = extract_songs(&videos);
        let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Charlie", "Alpha", "Bravo"]);
    }

    #[test]
    fn test_long_description_is_capped() {
        let mut long = video("video_1", "Midnight", "Nova");
        long.description = "x".repeat(150);

        let songs = extract_songs(&[long]);
        assert_eq!(songs[0].video_description.chars().count(), 103);
        assert!(songs[0].video_description.ends_with("..."));
    }

    #[test]
    fn test_multibyte_description_truncates_on_char_boundary() {
        let mut long = video("video_1", "Midnight", "Nova");
        long.description = "é".repeat(150);

        let songs = extract_songs(&[long]);
        assert_eq!(songs[0].video_description, format!("{}...", "é".repeat(100)));
    }
}
