// Command-line front end: argument parsing plus the one-shot batch mode

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Parser;

use crate::error::Error;
use crate::export;
use crate::extract::{extract_songs, ProfileParser, SimulatedSource, VideoSource};

#[derive(Parser)]
#[command(name = "tiktunes")]
#[command(about = "Extract the songs used across a TikTok profile's videos")]
pub struct Args {
    /// TikTok username or profile URL; omit to open the interactive shell
    pub profile: Option<String>,

    /// Maximum number of videos to scan
    #[arg(default_value_t = 50)]
    pub max_videos: usize,

    /// Enable developer logging (stderr + debug output)
    #[arg(long)]
    pub dev: bool,
}

/// Batch mode: normalize -> fetch -> dedupe, print a numbered summary, save
/// the result as JSON next to the working directory. Always writes the file,
/// even when nothing was found.
pub fn run_batch(profile: &str, max_videos: usize) -> Result<()> {
    let handle = match ProfileParser::new().normalize(profile) {
        Ok(handle) => handle,
        Err(Error::InvalidProfile(_)) => {
            println!("Error: Invalid username or URL format");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Extracting songs from @{handle}...");

    let source = SimulatedSource::new();
    let videos = source.fetch_videos(&handle, max_videos)?;
    let songs = extract_songs(&videos);

    println!("\nFound {} unique songs:", songs.len());
    println!("{}", "-".repeat(50));

    for (i, song) in songs.iter().enumerate() {
        println!("{}. {} - {}", i + 1, song.title, song.artist);
        println!("   Duration: {}s", song.duration);
        println!("   Video ID: {}", song.video_id);
        println!();
    }

    let filename = output_filename(&handle, Local::now());
    export::write_json(&songs, &filename)?;

    println!("Songs saved to: {filename}");
    Ok(())
}

fn output_filename(handle: &str, now: DateTime<Local>) -> String {
    format!("tiktok_songs_{}_{}.json", handle, now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_output_filename_shape() {
        let now = Local.with_ymd_and_hms(2025, 8, 7, 9, 5, 3).unwrap();
        assert_eq!(
            output_filename("jane_doe", now),
            "tiktok_songs_jane_doe_20250807_090503.json"
        );
    }
}
