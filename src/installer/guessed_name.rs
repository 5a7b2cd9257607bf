use derive_more::Display;

/// How much a guessed mod name can be trusted, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Default)]
pub enum GuessQuality {
    #[default]
    Invalid,
    /// Derived from something incidental, such as the archive file name
    Fallback,
    #[allow(dead_code)]
    Good,
    /// Taken from mod metadata
    #[allow(dead_code)]
    Meta,
    /// Supplied up front by whoever started the install
    Preset,
    /// Entered or confirmed by the user
    User,
}

/// The host's current best guess for the name of the mod being installed
#[derive(Debug, Clone, PartialEq, Eq, Default, Display)]
#[display("{value}")]
pub struct GuessedName {
    value: String,
    quality: GuessQuality,
}

impl GuessedName {
    pub fn new(value: impl Into<String>, quality: GuessQuality) -> Self {
        let mut guess = Self::default();
        guess.update(value, quality);
        guess
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn quality(&self) -> GuessQuality {
        self.quality
    }

    /// Replaces the guess if `quality` is at least as good as the current one.
    /// Blank values are ignored. Returns whether the guess changed.
    pub fn update(&mut self, value: impl Into<String>, quality: GuessQuality) -> bool {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() || quality < self.quality {
            return false;
        }
        self.value = value.to_string();
        self.quality = quality;
        true
    }
}
