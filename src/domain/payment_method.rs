use std::fmt;

/// Raw card data. Held only for the lifetime of the requests built from it,
/// never persisted by this crate.
#[derive(Clone, PartialEq, Eq)]
pub struct CardData {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub holder_name: String,
}

impl CardData {
    /// First six and last four digits, the rest masked. Safe for logs.
    pub fn masked_number(&self) -> String {
        if self.number.len() >= 10 {
            let (head, rest) = self.number.split_at(6);
            let tail = &rest[rest.len() - 4..];
            format!("{head}******{tail}")
        } else {
            "******".to_string()
        }
    }
}

// Keep the PAN out of Debug output.
impl fmt::Debug for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardData")
            .field("number", &self.masked_number())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("holder_name", &self.holder_name)
            .finish()
    }
}

/// Opaque reusable card reference issued by a prior tokenization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub token: String,
    pub holder_name: Option<String>,
}

/// A way to pay: raw card data or a tokenized reference to it.
///
/// Exactly one variant is active per instance. Methods are caller-owned and
/// may back any number of requests; builders borrow and clone them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    Card(CardData),
    Token(TokenData),
}

impl PaymentMethod {
    pub fn card(
        number: impl Into<String>,
        exp_month: u8,
        exp_year: u16,
        holder_name: impl Into<String>,
    ) -> Self {
        Self::Card(CardData {
            number: number.into(),
            exp_month,
            exp_year,
            holder_name: holder_name.into(),
        })
    }

    pub fn from_token(token: impl Into<String>, holder_name: Option<String>) -> Self {
        Self::Token(TokenData {
            token: token.into(),
            holder_name,
        })
    }
}
