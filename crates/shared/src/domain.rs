use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Samples required before a gesture counts as fully trained.
pub const SAMPLE_TARGET: u32 = 30;
/// Longest display name accepted for a gesture, in characters.
pub const MAX_NAME_CHARS: usize = 30;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(GestureId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureRecord {
    pub id: GestureId,
    pub name: String,
    pub samples: u32,
}

impl GestureRecord {
    /// Builds a fresh record with zero samples. Returns `None` when the name is
    /// blank after trimming; longer names are cut to [`MAX_NAME_CHARS`].
    pub fn new(name: &str) -> Option<Self> {
        let name = normalize_gesture_name(name)?;
        Some(Self {
            id: GestureId::new(),
            name,
            samples: 0,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.samples >= SAMPLE_TARGET
    }

    pub fn progress(&self) -> f32 {
        self.samples.min(SAMPLE_TARGET) as f32 / SAMPLE_TARGET as f32
    }
}

pub fn normalize_gesture_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_CHARS).collect())
}

/// Copy of the gesture collection handed from one screen to the next.
pub type GestureSnapshot = Vec<GestureRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Welcome,
    Training,
    Translation,
    VideoCall,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Welcome => "welcome",
            Screen::Training => "training",
            Screen::Translation => "translation",
            Screen::VideoCall => "video_call",
        };
        f.write_str(name)
    }
}
