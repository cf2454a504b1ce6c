//! Static promo code table.

use std::collections::HashMap;

use crate::error::DomainError;

/// Codes shipped with the mobile app, with their discount percentage.
const DEFAULT_CODES: [(&str, u8); 4] = [
    ("PROMO10", 10),
    ("PROMO20", 20),
    ("BLACKFRIDAY", 50),
    ("SOSO70", 70),
];

/// Read-only mapping from promo code to discount percentage.
///
/// Keys are stored normalized (trimmed, uppercase) and every lookup
/// normalizes its input the same way, so `" promo10 "` matches `PROMO10`.
#[derive(Debug, Clone)]
pub struct PromoTable {
    codes: HashMap<String, u8>,
}

impl PromoTable {
    /// Builds a table from custom entries.
    ///
    /// # Validation
    /// - Codes cannot be blank
    /// - Reductions must lie in `1..=100`
    pub fn new<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: AsRef<str>,
    {
        let mut codes = HashMap::new();
        for (code, reduction) in entries {
            let code = normalize(code.as_ref());
            if code.is_empty() || !(1..=100).contains(&reduction) {
                return Err(DomainError::InvalidReduction { code, reduction });
            }
            codes.insert(code, reduction);
        }
        Ok(Self { codes })
    }

    /// Looks up a raw, caller-supplied code.
    pub fn lookup(&self, raw: &str) -> PromoVerdict {
        let code = normalize(raw);
        match self.codes.get(&code) {
            Some(&reduction) => PromoVerdict::Valid { code, reduction },
            None => PromoVerdict::Invalid { code },
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for PromoTable {
    fn default() -> Self {
        Self {
            codes: DEFAULT_CODES
                .iter()
                .map(|(code, reduction)| (code.to_string(), *reduction))
                .collect(),
        }
    }
}

/// Trims and uppercases a code for comparison.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Outcome of a promo lookup. An unknown code is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoVerdict {
    Valid { code: String, reduction: u8 },
    Invalid { code: String },
}

impl PromoVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, PromoVerdict::Valid { .. })
    }

    /// Discount percentage, 0 when the code is unknown.
    pub fn reduction(&self) -> u8 {
        match self {
            PromoVerdict::Valid { reduction, .. } => *reduction,
            PromoVerdict::Invalid { .. } => 0,
        }
    }

    /// The normalized code that was looked up.
    pub fn code(&self) -> &str {
        match self {
            PromoVerdict::Valid { code, .. } | PromoVerdict::Invalid { code } => code,
        }
    }

    /// User-facing message shown by the mobile app.
    pub fn message(&self) -> String {
        match self {
            PromoVerdict::Valid { reduction, .. } => {
                format!("Code promo valide : {}% de réduction !", reduction)
            }
            PromoVerdict::Invalid { .. } => "Code promo invalide".to_string(),
        }
    }
}
