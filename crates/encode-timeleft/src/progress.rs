//! FFmpeg progress parsing.
//!
//! FFmpeg run with `-progress pipe:2` writes blocks of `key=value` lines,
//! each block closed by `progress=continue` or `progress=end`. The parser
//! folds those lines into an [`FfmpegProgress`] snapshot whose frame number
//! feeds a time-left calculator.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Progress information from FFmpeg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FfmpegProgress {
    /// Current frame number
    pub frame: u64,
    /// Current FPS
    pub fps: f64,
    /// Output time in milliseconds
    pub out_time_ms: i64,
    /// Output time as string (HH:MM:SS.microseconds)
    pub out_time: String,
    /// Encoding speed (e.g., 1.5 = 1.5x realtime)
    pub speed: f64,
    /// Whether encoding is complete
    pub is_complete: bool,
}

impl FfmpegProgress {
    /// Progress percentage given the total number of frames.
    pub fn percentage(&self, total_frames: u64) -> f64 {
        if total_frames == 0 {
            return 0.0;
        }
        ((self.frame as f64 / total_frames as f64) * 100.0).min(100.0)
    }
}

/// Accumulates `-progress` lines into snapshots.
#[derive(Debug, Clone, Default)]
pub struct FfmpegProgressParser {
    current: FfmpegProgress,
}

impl FfmpegProgressParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest accumulated values, including keys of an unfinished block.
    pub fn current(&self) -> &FfmpegProgress {
        &self.current
    }

    /// Feed one line; returns a snapshot when the line closes a block.
    pub fn feed_line(&mut self, line: &str) -> Option<FfmpegProgress> {
        let (key, value) = line.trim().split_once('=')?;
        let (key, value) = (key.trim(), value.trim());

        match key {
            "out_time_ms" | "out_time_us" => {
                // FFmpeg reports both keys in microseconds despite the name.
                match value.parse::<i64>() {
                    Ok(us) => self.current.out_time_ms = us / 1000,
                    Err(_) => trace!("Unparsable {}={}", key, value),
                }
            }
            "out_time" => {
                self.current.out_time = value.to_string();
            }
            "frame" => match value.parse() {
                Ok(frame) => self.current.frame = frame,
                Err(_) => trace!("Unparsable frame={}", value),
            },
            "fps" => match value.parse() {
                Ok(fps) => self.current.fps = fps,
                Err(_) => trace!("Unparsable fps={}", value),
            },
            "speed" => {
                // Format: "1.5x" or "N/A"
                if let Some(speed) = value
                    .strip_suffix('x')
                    .and_then(|s| s.trim().parse().ok())
                {
                    self.current.speed = speed;
                }
            }
            "progress" => {
                // "continue" or "end"
                if value == "end" {
                    self.current.is_complete = true;
                }
                return Some(self.current.clone());
            }
            _ => {}
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "frame=120
fps=29.97
stream_0_0_q=28.0
out_time_us=4004000
out_time_ms=4004000
out_time=00:00:04.004000
speed=1.5x
progress=continue";

    #[test]
    fn test_progress_parsing() {
        let mut parser = FfmpegProgressParser::new();
        let snapshots: Vec<_> = BLOCK.lines().filter_map(|l| parser.feed_line(l)).collect();

        assert_eq!(snapshots.len(), 1);
        let progress = &snapshots[0];
        assert_eq!(progress.frame, 120);
        assert!((progress.fps - 29.97).abs() < 0.001);
        assert_eq!(progress.out_time_ms, 4004);
        assert_eq!(progress.out_time, "00:00:04.004000");
        assert!((progress.speed - 1.5).abs() < 0.01);
        assert!(!progress.is_complete);
    }

    #[test]
    fn test_progress_end_marks_complete() {
        let mut parser = FfmpegProgressParser::new();
        assert!(parser.feed_line("frame=10").is_none());
        assert!(parser.feed_line("speed=N/A").is_none());

        let progress = parser.feed_line("progress=end").unwrap();
        assert!(progress.is_complete);
        assert_eq!(progress.frame, 10);
        assert_eq!(progress.speed, 0.0);
    }

    #[test]
    fn test_bad_values_keep_previous() {
        let mut parser = FfmpegProgressParser::new();
        parser.feed_line("frame=42");
        parser.feed_line("frame=N/A");
        parser.feed_line("garbage without separator");
        assert_eq!(parser.current().frame, 42);
    }

    #[test]
    fn test_progress_percentage() {
        let progress = FfmpegProgress {
            frame: 50,
            ..Default::default()
        };

        assert!((progress.percentage(200) - 25.0).abs() < 0.01);
        assert!((progress.percentage(25) - 100.0).abs() < 0.01);
        assert_eq!(progress.percentage(0), 0.0);
    }

    #[test]
    fn test_progress_serializes() {
        let progress = FfmpegProgress {
            frame: 7,
            is_complete: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["frame"], 7);
        assert_eq!(json["is_complete"], true);
    }
}
