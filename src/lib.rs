// TikTunes Library - extract the songs behind a TikTok profile's videos
// Modular design keeps the video source swappable

pub mod cli;     // argument parsing + one-shot batch mode
pub mod config;  // settings and preferences
pub mod error;   // shared error types
pub mod export;  // CSV/JSON/TXT song list exports
pub mod extract; // profile parsing, video source, dedup
#[cfg(feature = "tui")]
pub mod ui;      // terminal interface

// Export the stuff other modules actually use
pub use config::Config;
pub use error::{Error, Result};
pub use extract::{
    extract_songs, MusicInfo, ProfileParser, SimulatedSource, SongRecord, VideoRecord, VideoSource,
};
