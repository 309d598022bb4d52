//! Ranked and rendered clip types.

use serde::{Deserialize, Serialize};

use crate::score::ScoreBreakdown;
use crate::window::Window;

/// A window after ranking, with its 1-based rank among the top-K.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedClip {
    pub window: Window,
    pub scores: ScoreBreakdown,
    pub rank: usize,
}

/// A `RankedClip` after a successful render. Only constructed on success;
/// a failed render simply omits that window from the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedClip {
    pub ranked: RankedClip,
    pub output_path: String,
    pub filename: String,
}

impl RenderedClip {
    pub fn filename_for(rank: usize, window_id: &str) -> String {
        format!("clip_{rank:02}_{window_id}.mp4")
    }
}
