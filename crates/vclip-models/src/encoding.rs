//! Render quality tiers and their FFmpeg encoding parameters.

use serde::{Deserialize, Serialize};

/// Render quality tier, selectable via `--quality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    High,
    Medium,
    Fast,
}

impl Default for Quality {
    fn default() -> Self {
        Quality::Medium
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Quality::High),
            "medium" => Ok(Quality::Medium),
            "fast" => Ok(Quality::Fast),
            other => Err(format!("unknown quality tier: {other}")),
        }
    }
}

impl Quality {
    fn preset_and_level(self) -> (&'static str, u8) {
        match self {
            Quality::High => ("slow", 18),
            Quality::Medium => ("medium", 23),
            Quality::Fast => ("fast", 28),
        }
    }
}

/// Concrete video/audio encoding parameters for one render pass.
#[derive(Debug, Clone)]
pub struct EncodingConfig {
    pub video_codec: String,
    pub preset: String,
    /// CRF for software encoders, CQ for hardware encoders — same field,
    /// different flag name depending on `use_hw`.
    pub quality_level: u8,
    pub use_hw: bool,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl EncodingConfig {
    /// Build the encoding config for a quality tier, selecting the hardware
    /// encoder (`h264_nvenc`) when available, else software `libx264`.
    pub fn for_quality(quality: Quality, hw_available: bool) -> Self {
        let (preset, level) = quality.preset_and_level();
        Self {
            video_codec: if hw_available {
                "h264_nvenc".to_string()
            } else {
                "libx264".to_string()
            },
            preset: preset.to_string(),
            quality_level: level,
            use_hw: hw_available,
            audio_codec: "aac".to_string(),
            audio_bitrate: "128k".to_string(),
        }
    }

    /// FFmpeg output arguments for the video/audio encode step (re-encodes audio).
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
        ];
        if self.use_hw {
            args.push("-cq".to_string());
        } else {
            args.push("-crf".to_string());
        }
        args.push(self.quality_level.to_string());
        args.extend([
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
        ]);
        args
    }

    /// FFmpeg output arguments for the caption burn-in pass, where audio is
    /// copied rather than re-encoded.
    pub fn to_ffmpeg_args_video_only(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
        ];
        if self.use_hw {
            args.push("-cq".to_string());
        } else {
            args.push("-crf".to_string());
        }
        args.push(self.quality_level.to_string());
        args.extend(["-c:a".to_string(), "copy".to_string()]);
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_table_matches_spec() {
        assert_eq!(Quality::High.preset_and_level(), ("slow", 18));
        assert_eq!(Quality::Medium.preset_and_level(), ("medium", 23));
        assert_eq!(Quality::Fast.preset_and_level(), ("fast", 28));
    }

    #[test]
    fn hw_uses_cq_sw_uses_crf() {
        let hw = EncodingConfig::for_quality(Quality::High, true);
        let args = hw.to_ffmpeg_args();
        assert!(args.contains(&"-cq".to_string()));
        assert!(args.contains(&"h264_nvenc".to_string()));

        let sw = EncodingConfig::for_quality(Quality::High, false);
        let args = sw.to_ffmpeg_args();
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&"libx264".to_string()));
    }

    #[test]
    fn video_only_args_copy_audio() {
        let cfg = EncodingConfig::for_quality(Quality::Medium, false);
        let args = cfg.to_ffmpeg_args_video_only();
        assert!(args
            .windows(2)
            .any(|w| w == ["-c:a".to_string(), "copy".to_string()]));
    }

    #[test]
    fn from_str_parses_case_insensitively() {
        assert_eq!("high".parse::<Quality>().unwrap(), Quality::High);
        assert_eq!("FAST".parse::<Quality>().unwrap(), Quality::Fast);
        assert!("bogus".parse::<Quality>().is_err());
    }
}
