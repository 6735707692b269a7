use thiserror::Error;

/// Tokens recognized in a receipt filename.
///
/// `amount` is kept as the raw matched token ("-450.5", "$1,023.76");
/// canonical formatting happens at assembly time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTokens {
    /// Free text preceding the amount, trimmed
    pub title: String,
    /// Monetary token as written in the filename
    pub amount: String,
    /// Lot identifier ("L" + digits)
    pub lot: Option<String>,
    /// Parenthesized sequence counter, digits kept verbatim
    pub counter: Option<String>,
    /// Trailing dotted suffix including the dot, empty if none
    pub extension: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("No amount token found in filename: {0}")]
    NoAmount(String),
}
