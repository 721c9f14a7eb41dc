use serde::{Deserialize, Serialize};

/// Priority tag of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Lowercase name, as stored and shown in badges
    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse from a stored or typed name like "High"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn is_high(priority: Option<Self>) -> bool {
        priority == Some(Self::High)
    }
}

/// Phase of the focus timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    /// Full length of this phase in seconds
    pub fn total_seconds(&self) -> u32 {
        match self {
            Self::Focus => 25 * 60,
            Self::Break => 5 * 60,
        }
    }

    /// The phase that follows this one
    pub fn next(&self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }

    /// Heading shown above the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Deep Work",
            Self::Break => "Short Break",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Focus => "🎯",
            Self::Break => "☕",
        }
    }
}

/// Which screen is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Dashboard,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Adding,
    Editing,
    Dragging,
}
