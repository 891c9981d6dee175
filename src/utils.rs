//! Utility helpers for MediaView

/// File name offered by the download button: the percent-decoded last path
/// segment of `url`, without query or fragment. Falls back to `fallback` when
/// the url has no usable segment.
pub fn download_name(url: &str, fallback: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default().trim();
    if segment.is_empty() {
        return fallback.to_string();
    }

    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

/// Format seconds as `m:ss`, or `h:mm:ss` past an hour.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_name_decodes_the_last_segment() {
        assert_eq!(download_name("/uploads/My%20Song.mp3", "x"), "My Song.mp3");
        assert_eq!(download_name("https://host/a/b.png?v=2#top", "x"), "b.png");
        assert_eq!(download_name("track.mp3", "x"), "track.mp3");
    }

    #[test]
    fn download_name_falls_back_for_directories() {
        assert_eq!(download_name("/uploads/", "Clip"), "Clip");
        assert_eq!(download_name("", "Clip"), "Clip");
    }

    #[test]
    fn format_time_handles_unknown_and_long_values() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-1.0), "0:00");
        assert_eq!(format_time(75.9), "1:15");
        assert_eq!(format_time(3725.0), "1:02:05");
    }
}
