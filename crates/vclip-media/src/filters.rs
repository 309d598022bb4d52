//! FFmpeg video filter construction for 9:16 reframing.

const TARGET_ASPECT: f64 = 9.0 / 16.0;
const ASPECT_EPSILON: f64 = 0.01;

/// Build the crop+scale filter that reframes a source of `width`x`height`
/// to a centered 1080x1920 9:16 output.
///
/// When the source is already within `ASPECT_EPSILON` of 9:16 this still
/// scales to the target resolution without cropping.
pub fn build_reframe_filter(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return "scale=1080:1920".to_string();
    }

    let current_aspect = width as f64 / height as f64;

    if (current_aspect - TARGET_ASPECT).abs() <= ASPECT_EPSILON {
        return "scale=1080:1920".to_string();
    }

    if current_aspect > TARGET_ASPECT {
        // Wider than 9:16: crop width down, keep full height, centered.
        "crop=ih*9/16:ih:(iw-ih*9/16)/2:0,scale=1080:1920".to_string()
    } else {
        // Taller than 9:16: crop height down, keep full width, centered.
        "crop=iw:iw*16/9:0:(ih-iw*16/9)/2,scale=1080:1920".to_string()
    }
}

/// Build the subtitle burn-in filter for a given SRT path.
///
/// Matches the fixed caption style: white text, semi-transparent black box,
/// bold, bottom-centered.
pub fn build_caption_filter(srt_path: &str) -> String {
    let escaped = srt_path.replace('\\', "\\\\").replace(':', "\\:");
    format!(
        "subtitles='{escaped}':force_style='FontName=Arial,FontSize=48,\
         PrimaryColour=&HFFFFFF,BackColour=&H80000000,Bold=1,Alignment=2'"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_source_crops_width() {
        let filter = build_reframe_filter(1920, 1080);
        assert!(filter.starts_with("crop=ih*9/16:ih"));
        assert!(filter.ends_with("scale=1080:1920"));
    }

    #[test]
    fn tall_source_crops_height() {
        let filter = build_reframe_filter(1080, 2400);
        assert!(filter.starts_with("crop=iw:iw*16/9"));
    }

    #[test]
    fn already_9x16_just_scales() {
        let filter = build_reframe_filter(1080, 1920);
        assert_eq!(filter, "scale=1080:1920");
    }

    #[test]
    fn caption_filter_escapes_colons() {
        let filter = build_caption_filter("C:/tmp/clip.srt");
        assert!(filter.contains("C\\:/tmp/clip.srt"));
    }
}
