//! Unicode normalization for pre-tokenization.
//!
//! Text is normalized before it is split. Byte-level vocabularies expect
//! canonical composition (NFC), which is the default.

use std::str::FromStr;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    /// Canonical composition
    #[default]
    NFC,
    /// Canonical decomposition
    NFD,
    /// Compatibility composition
    NFKC,
    /// Compatibility decomposition
    NFKD,
    /// No normalization
    None,
}

impl FromStr for NormalizationForm {
    type Err = String;

    /// Parse the `normalizer.type` names used by HuggingFace configs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NFC" => Ok(Self::NFC),
            "NFD" => Ok(Self::NFD),
            "NFKC" => Ok(Self::NFKC),
            "NFKD" => Ok(Self::NFKD),
            "NONE" => Ok(Self::None),
            _ => Err(format!("unsupported normalization form: {s}")),
        }
    }
}

/// Unicode normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    /// Normalization form to apply
    form: NormalizationForm,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// Create an NFC normalizer (default).
    pub fn nfc() -> Self {
        Self::new(NormalizationForm::NFC)
    }

    /// The configured form.
    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    /// Normalize text.
    pub fn normalize(&self, text: &str) -> String {
        match self.form {
            // most input is already composed
            NormalizationForm::NFC if is_nfc_quick(text.chars()) == IsNormalized::Yes => {
                text.to_string()
            }
            NormalizationForm::NFC => text.nfc().collect(),
            NormalizationForm::NFD => text.nfd().collect(),
            NormalizationForm::NFKC => text.nfkc().collect(),
            NormalizationForm::NFKD => text.nfkd().collect(),
            NormalizationForm::None => text.to_string(),
        }
    }

    /// Check if normalization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_composes() {
        let normalizer = Normalizer::nfc();
        assert_eq!(normalizer.normalize("e\u{0301}"), "\u{00e9}");
        assert_eq!(normalizer.normalize("plain"), "plain");
    }

    #[test]
    fn test_nfkc_folds_compatibility_forms() {
        let normalizer = Normalizer::new(NormalizationForm::NFKC);
        assert_eq!(normalizer.normalize("\u{FF21}"), "A");
    }

    #[test]
    fn test_parse_form() {
        assert_eq!("NFC".parse::<NormalizationForm>(), Ok(NormalizationForm::NFC));
        assert_eq!("nfkd".parse::<NormalizationForm>(), Ok(NormalizationForm::NFKD));
        assert!("Lowercase".parse::<NormalizationForm>().is_err());
    }

    #[test]
    fn test_is_enabled() {
        assert!(Normalizer::nfc().is_enabled());
        assert!(!Normalizer::new(NormalizationForm::None).is_enabled());
        assert_eq!(Normalizer::default().form(), NormalizationForm::NFC);
    }
}
