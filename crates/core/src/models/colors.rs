//! Color mapping for task statuses

use super::task::TaskStatus;

/// RGB color representation (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to CSS rgb() string
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Convert to hex string (#rrggbb)
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Edge stroke when nothing is focused
pub const EDGE_COLOR: RgbColor = RgbColor::new(156, 163, 175); // #9ca3af

/// Edge stroke when the edge touches the selected node
pub const EDGE_HIGHLIGHT_COLOR: RgbColor = RgbColor::new(59, 130, 246); // #3b82f6

/// Title text color
pub const TEXT_COLOR: RgbColor = RgbColor::new(31, 41, 55); // #1f2937

/// Map a task status to its outline color
///
/// Pure function - always returns same color for same status.
pub const fn status_color(status: TaskStatus) -> RgbColor {
    match status {
        TaskStatus::Completed => RgbColor::new(16, 185, 129), // green-500
        TaskStatus::InProgress => RgbColor::new(59, 130, 246), // blue-500
        TaskStatus::Blocked => RgbColor::new(239, 68, 68),     // red-500
        TaskStatus::Pending => RgbColor::new(156, 163, 175),   // gray-400
    }
}

/// Name of the status color as shown in the legend
pub const fn status_color_name(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "Green",
        TaskStatus::InProgress => "Blue",
        TaskStatus::Blocked => "Red",
        TaskStatus::Pending => "Gray",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color_deterministic() {
        let color1 = status_color(TaskStatus::InProgress);
        let color2 = status_color(TaskStatus::InProgress);
        assert_eq!(color1, color2);
    }

    #[test]
    fn test_all_statuses_have_unique_colors() {
        for (i, a) in TaskStatus::ALL.iter().enumerate() {
            for b in TaskStatus::ALL.iter().skip(i + 1) {
                assert_ne!(status_color(*a), status_color(*b));
            }
        }
    }

    #[test]
    fn test_hex_output_all_statuses() {
        assert_eq!(status_color(TaskStatus::Completed).to_hex(), "#10b981");
        assert_eq!(status_color(TaskStatus::InProgress).to_hex(), "#3b82f6");
        assert_eq!(status_color(TaskStatus::Blocked).to_hex(), "#ef4444");
        assert_eq!(status_color(TaskStatus::Pending).to_hex(), "#9ca3af");
    }

    #[test]
    fn test_css_output() {
        assert_eq!(EDGE_COLOR.to_css(), "rgb(156, 163, 175)");
    }
}
