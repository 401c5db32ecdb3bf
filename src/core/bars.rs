//! Frame bar strips for a quick visual of move timing.

use crate::core::record::MoveRecord;

const FILLED: char = '▮';
const EMPTY: &str = "▯";
const MAX_BARS: i64 = 15;

/// `n` filled bars, capped at 15 with the real count appended.
pub fn frame_bars(frames: i64) -> String {
    if frames <= 0 {
        return EMPTY.to_string();
    }
    if frames > MAX_BARS {
        let bars: String = std::iter::repeat_n(FILLED, MAX_BARS as usize).collect();
        return format!("{} ({})", bars, frames);
    }
    std::iter::repeat_n(FILLED, frames as usize).collect()
}

/// One line per timing phase present in the frame data.
pub fn frame_summary(record: &MoveRecord) -> String {
    ["Startup", "Active", "Recovery"]
        .iter()
        .filter(|phase| record.frame_data.contains_key(**phase))
        .map(|phase| format!("{:<9}{}", phase, frame_bars(record.frame_value(phase))))
        .collect::<Vec<_>>()
        .join("\n")
}
