// Extraction pipeline: profile input -> videos -> deduplicated songs

pub mod dedup;
pub mod profile;
pub mod source;
pub mod video;

pub use dedup::{extract_songs, SongRecord};
pub use profile::ProfileParser;
pub use source::{SimulatedSource, VideoSource};
pub use video::{MusicInfo, VideoRecord};

#[cfg(test)]
mod tests {
    use super::*;

    // The whole pipeline end to end, minus the file write
    #[test]
    fn test_extraction_pipeline_for_profile() {
        let handle = ProfileParser::new().normalize("jane_doe").unwrap();
        let videos = SimulatedSource::new().fetch_videos(&handle, 5).unwrap();
        let songs = extract_songs(&videos);

        assert_eq!(songs.len(), 5);
        for (i, song) in songs.iter().enumerate() {
            assert_eq!(song.title, format!("Song Title {}", i + 1));
            assert_eq!(song.artist, format!("Artist {}", i + 1));
            assert_eq!(song.video_id, format!("video_{}", i + 1));
        }
    }
}
