//! Advisory password-strength scorer gating registration.
//!
//! Byte length and ASCII character classes only; non-ASCII characters
//! contribute nothing beyond their byte length. This is a UX gate, not a
//! security boundary.

/// Coarse strength buckets derived from the 0-4 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        Self::from_score(score(password))
    }

    pub fn from_score(score: u8) -> Self {
        match score {
            0 => PasswordStrength::Weak,
            1 => PasswordStrength::Medium,
            2 => PasswordStrength::Strong,
            _ => PasswordStrength::VeryStrong,
        }
    }

    /// Advisory feedback line for UX callers.
    pub fn feedback(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => {
                "Password is too weak. Use at least 8 characters with numbers, special characters, and mixed case."
            }
            PasswordStrength::Medium => {
                "Password could be stronger. Try adding special characters or mixed case."
            }
            PasswordStrength::Strong => "Good password strength.",
            PasswordStrength::VeryStrong => "Excellent password strength!",
        }
    }
}

/// Score 0-4: one point each for length >= 8 bytes, a decimal digit, a
/// special character, and mixed upper/lower case.
pub fn score(password: &str) -> u8 {
    let mut score = 0;

    if password.len() >= 8 {
        score += 1;
    }

    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }

    if password.chars().any(is_special) {
        score += 1;
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower {
        score += 1;
    }

    score
}

// ASCII punctuation blocks surrounding the alphanumeric ranges.
fn is_special(c: char) -> bool {
    matches!(c, '!'..='/' | ':'..='@' | '['..='`' | '{'..='~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_follow_legacy_rules() {
        assert_eq!(score("abc"), 0);
        assert_eq!(score("abcdefgh"), 1); // length only
        assert_eq!(score("abc12345"), 2); // length + digit
        assert_eq!(score("Abc1"), 2); // digit + mixed case
        assert_eq!(score("p@ss"), 1); // special only
        assert_eq!(score("Tr0ub4dor&3"), 4);
    }

    #[test]
    fn non_ascii_contributes_nothing_beyond_length() {
        // 10 bytes, so the length point; no ASCII digit/special/upper.
        assert_eq!(score("pässwörd"), 1);
    }

    #[test]
    fn strength_thresholds() {
        assert_eq!(PasswordStrength::of("abc"), PasswordStrength::Weak);
        assert_eq!(PasswordStrength::of("abcdefgh"), PasswordStrength::Medium);
        assert_eq!(PasswordStrength::of("abc12345"), PasswordStrength::Strong);
        assert_eq!(PasswordStrength::of("Abc123!@#"), PasswordStrength::VeryStrong);
        assert!(PasswordStrength::of("abc12345") >= PasswordStrength::Medium);
    }

    #[test]
    fn feedback_matches_bucket() {
        assert!(PasswordStrength::Weak.feedback().contains("too weak"));
        assert!(PasswordStrength::VeryStrong.feedback().contains("Excellent"));
    }
}
