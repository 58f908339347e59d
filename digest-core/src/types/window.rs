//! Analysis windows and the fixed menu choices that select them.

use serde::{Deserialize, Serialize};

/// Day-count window over captured messages. `days == 0` means all time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    days: u32,
}

impl Window {
    pub const ALL_TIME: Window = Window { days: 0 };

    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    pub fn day_count(&self) -> u32 {
        self.days
    }

    pub fn is_all_time(&self) -> bool {
        self.days == 0
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.days {
            0 => f.write_str("all time"),
            1 => f.write_str("1 day"),
            n => write!(f, "{} days", n),
        }
    }
}

/// The three options offered by the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowChoice {
    OneDay,
    ThreeDays,
    AllTime,
}

impl WindowChoice {
    pub const ALL: [WindowChoice; 3] = [
        WindowChoice::OneDay,
        WindowChoice::ThreeDays,
        WindowChoice::AllTime,
    ];

    pub fn window(&self) -> Window {
        match self {
            WindowChoice::OneDay => Window::days(1),
            WindowChoice::ThreeDays => Window::days(3),
            WindowChoice::AllTime => Window::ALL_TIME,
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            WindowChoice::OneDay => "1 day",
            WindowChoice::ThreeDays => "3 days",
            WindowChoice::AllTime => "All time",
        }
    }

    /// Callback payload carried by the button.
    pub fn payload(&self) -> &'static str {
        match self {
            WindowChoice::OneDay => "start_analysis_1_day",
            WindowChoice::ThreeDays => "start_analysis_3_days",
            WindowChoice::AllTime => "start_analysis_all_time",
        }
    }

    pub fn from_payload(payload: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.payload() == payload)
    }
}
