//! Flower alphabet, game variants and the volume slider model.
//!
//! Every flower is bound to exactly one audio cue and one keyboard shortcut.
//! The classic variant uses the first three flowers; the extended variant
//! adds two more (unlocked late in the progression table).

/// One playable symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flower {
    Blossom,   // 🌸
    Hyacinth,  // 🪻
    Daisy,     // 🌼
    Tulip,     // 🌷
    Sunflower, // 🌻
}

/// All flowers in unlock order.
pub const ALL_FLOWERS: [Flower; 5] = [
    Flower::Blossom,
    Flower::Hyacinth,
    Flower::Daisy,
    Flower::Tulip,
    Flower::Sunflower,
];

impl Flower {
    pub fn glyph(self) -> &'static str {
        match self {
            Flower::Blossom => "🌸",
            Flower::Hyacinth => "🪻",
            Flower::Daisy => "🌼",
            Flower::Tulip => "🌷",
            Flower::Sunflower => "🌻",
        }
    }

    /// Lowercase keyboard shortcut (home row: left hand first, then right hand).
    pub fn key(self) -> char {
        match self {
            Flower::Blossom => 's',
            Flower::Hyacinth => 'd',
            Flower::Daisy => 'f',
            Flower::Tulip => 'j',
            Flower::Sunflower => 'k',
        }
    }

    /// Position in [`ALL_FLOWERS`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Flower> {
        ALL_FLOWERS.get(idx).copied()
    }

    /// Relative URL of the audio cue bound to this flower.
    pub fn cue_url(self) -> String {
        format!("assets/sounds/flower{}.mp3", self.index() + 1)
    }
}

/// Which flower alphabet (and therefore which progression table) a game uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    #[default]
    Classic,
    Extended,
}

impl Variant {
    pub fn flowers(self) -> &'static [Flower] {
        match self {
            Variant::Classic => &ALL_FLOWERS[..3],
            Variant::Extended => &ALL_FLOWERS,
        }
    }
}

/// Slider value in 0..=10. Gain follows a 1.5 power curve so low settings stay quiet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn gain(self) -> f64 {
        (self.0 as f64 / Self::MAX as f64).powf(1.5)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(5)
    }
}
