//! Mood classification of incoming payloads

/// The face to show
///
/// Every payload maps to exactly one mood; anything unrecognized is
/// [`Mood::Neutral`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mood {
    /// Flat eyes, no sound
    #[default]
    Neutral,
    /// Glowing crescent eyes and a rising jingle
    Happy,
    /// Notched eyes and a falling tune
    Sad,
}

impl Mood {
    /// Classify a text label
    ///
    /// Surrounding whitespace is ignored and the comparison is ASCII
    /// case-insensitive: `"positive"` is [`Happy`](Self::Happy), `"negative"`
    /// is [`Sad`](Self::Sad) and everything else is
    /// [`Neutral`](Self::Neutral).
    ///
    /// ```
    /// use moodpanel::Mood;
    ///
    /// assert_eq!(Mood::from_label("  Positive\n"), Mood::Happy);
    /// assert_eq!(Mood::from_label("NEGATIVE"), Mood::Sad);
    /// assert_eq!(Mood::from_label("meh"), Mood::Neutral);
    /// ```
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("positive") {
            Self::Happy
        } else if label.eq_ignore_ascii_case("negative") {
            Self::Sad
        } else {
            Self::Neutral
        }
    }

    /// Classify a raw message payload
    ///
    /// Bytes that are not valid UTF-8 classify as [`Neutral`](Self::Neutral).
    pub fn from_payload(payload: &[u8]) -> Self {
        core::str::from_utf8(payload).map_or(Self::Neutral, Self::from_label)
    }

    /// Lowercase name for logs
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
        }
    }
}

impl core::fmt::Display for Mood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(Mood::from_label("positive"), Mood::Happy);
        assert_eq!(Mood::from_label("negative"), Mood::Sad);
    }

    #[test]
    fn test_case_and_whitespace_ignored() {
        assert_eq!(Mood::from_label("PoSiTiVe"), Mood::Happy);
        assert_eq!(Mood::from_label("\t negative \r\n"), Mood::Sad);
    }

    #[test]
    fn test_unknown_labels_are_neutral() {
        assert_eq!(Mood::from_label(""), Mood::Neutral);
        assert_eq!(Mood::from_label("   "), Mood::Neutral);
        assert_eq!(Mood::from_label("meh"), Mood::Neutral);
        assert_eq!(Mood::from_label("positively"), Mood::Neutral);
        assert_eq!(Mood::from_label("neutral"), Mood::Neutral);
    }

    #[test]
    fn test_invalid_utf8_is_neutral() {
        assert_eq!(Mood::from_payload(&[0xFF, 0xFE, 0x70]), Mood::Neutral);
    }

    #[test]
    fn test_payload_bytes() {
        assert_eq!(Mood::from_payload(b"Positive"), Mood::Happy);
        assert_eq!(Mood::from_payload(b" negative "), Mood::Sad);
        assert_eq!(Mood::from_payload(b""), Mood::Neutral);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(alloc::format!("{}", Mood::Happy), "happy");
        assert_eq!(Mood::default(), Mood::Neutral);
    }
}
