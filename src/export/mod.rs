// Export module - writes the extracted song list as CSV, JSON, or plain text

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::extract::SongRecord;

const CSV_HEADER: &str = "title,artist,duration,video_id,video_description,created_time";

/// One row per song under a fixed header. Fields with embedded delimiters
/// get standard double-quote escaping.
pub fn export_csv<P: AsRef<Path>>(songs: &[SongRecord], path: P) -> Result<()> {
    require_songs(songs)?;

    let mut file = fs::File::create(path.as_ref())?;
    writeln!(file, "{CSV_HEADER}")?;
    for song in songs {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            csv_field(&song.title),
            csv_field(&song.artist),
            song.duration,
            csv_field(&song.video_id),
            csv_field(&song.video_description),
            csv_field(&song.created_time),
        )?;
    }

    info!("Exported {} songs to {}", songs.len(), path.as_ref().display());
    Ok(())
}

/// Pretty-printed JSON, field order and song order preserved. Non-ASCII text
/// goes through unescaped.
pub fn export_json<P: AsRef<Path>>(songs: &[SongRecord], path: P) -> Result<()> {
    require_songs(songs)?;
    write_json(songs, &path)?;

    info!("Exported {} songs to {}", songs.len(), path.as_ref().display());
    Ok(())
}

/// The raw JSON write with no empty-set guard. Batch mode saves its result
/// unconditionally, even when the extraction found nothing.
pub fn write_json<P: AsRef<Path>>(songs: &[SongRecord], path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(songs)?;
    fs::write(path, json)?;
    Ok(())
}

/// Numbered human-readable blocks under a title banner.
pub fn export_txt<P: AsRef<Path>>(songs: &[SongRecord], path: P) -> Result<()> {
    require_songs(songs)?;

    let mut file = fs::File::create(path.as_ref())?;
    writeln!(file, "TikTok Songs Extracted")?;
    writeln!(file, "{}", "=".repeat(50))?;
    writeln!(file)?;

    for (i, song) in songs.iter().enumerate() {
        writeln!(file, "{}. {} - {}", i + 1, song.title, song.artist)?;
        writeln!(file, "   Duration: {}s", song.duration)?;
        writeln!(file, "   Video ID: {}", song.video_id)?;
        writeln!(file, "   Description: {}", song.video_description)?;
        writeln!(file, "   Created: {}", song.created_time)?;
        writeln!(file)?;
    }

    info!("Exported {} songs to {}", songs.len(), path.as_ref().display());
    Ok(())
}

fn require_songs(songs: &[SongRecord]) -> Result<()> {
    if songs.is_empty() {
        return Err(Error::NothingToExport);
    }
    Ok(())
}

// RFC 4180 style: quote when the field holds a comma, quote, or line break
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn song(title: &str, artist: &str) -> SongRecord {
        SongRecord {
            title: title.to_string(),
            artist: artist.to_string(),
            duration: 30,
            video_id: "video_1".to_string(),
            video_description: "Sample video 1".to_string(),
            created_time: "2025-08-07T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_list_refuses_and_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.csv");

        for result in [
            export_csv(&[], &path),
            export_json(&[], &path),
            export_txt(&[], &path),
        ] {
            assert!(matches!(result, Err(Error::NothingToExport)));
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_csv_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.csv");

        export_csv(&[song("Midnight", "Nova")], &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("Midnight,Nova,30,video_1,Sample video 1,2025-08-07T12:00:00+00:00")
        );
    }

    #[test]
    fn test_csv_quotes_embedded_delimiters() {
        assert_eq!(csv_field("Hello, World"), "\"Hello, World\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn test_json_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.json");

        let songs = vec![song("Midnight", "Nova"), song("Daybreak", "Eclipse")];
        export_json(&songs, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: Vec<SongRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, songs);
    }

    #[test]
    fn test_json_keeps_non_ascii_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.json");

        export_json(&[song("真夜中のドア", "松原みき")], &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("真夜中のドア"));
        assert!(!written.contains("\\u"));
    }

    #[test]
    fn test_write_json_accepts_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.json");

        write_json(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_txt_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.txt");

        export_txt(&[song("Midnight", "Nova")], &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("TikTok Songs Extracted\n"));
        assert!(written.contains(&"=".repeat(50)));
        assert!(written.contains("1. Midnight - Nova\n"));
        assert!(written.contains("   Duration: 30s\n"));
        assert!(written.contains("   Video ID: video_1\n"));
        assert!(written.ends_with("\n\n"));
    }

    #[test]
    fn test_unwritable_destination_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("songs.csv");

        let result = export_csv(&[song("Midnight", "Nova")], &path);
        assert!(matches!(result, Err(Error::ExportIo(_))));
    }
}
