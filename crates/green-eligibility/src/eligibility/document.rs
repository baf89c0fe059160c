use std::fmt;

const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;

/// Tax identifier supplied alongside a request. Record-keeping only, never a decision input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNumber {
    /// Individual taxpayer registry number (11 digits).
    Cpf(String),
    /// Legal entity registry number (14 digits).
    Cnpj(String),
}

impl DocumentNumber {
    /// Shape check only: the digits are not checksum-verified.
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        match raw.len() {
            CPF_DIGITS => Some(Self::Cpf(raw.to_string())),
            CNPJ_DIGITS => Some(Self::Cnpj(raw.to_string())),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cpf(_) => "cpf",
            Self::Cnpj(_) => "cnpj",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cpf(digits) | Self::Cnpj(digits) => digits,
        }
    }

    /// Log-safe rendering keeping the last four digits.
    pub fn masked(&self) -> String {
        let digits = self.as_str();
        let visible = &digits[digits.len() - 4..];
        format!("{}{}", "*".repeat(digits.len() - 4), visible)
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.masked())
    }
}
