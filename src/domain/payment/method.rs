//! Processor payment method tags.
//!
//! PayCard reports which instrument the shopper used in the
//! `paycardPaymentMethod` callback field. The closed set of tags is parsed
//! here; unknown tags are preserved verbatim so the audit trail never loses
//! information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment instrument reported by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Paycard,
    CreditCard,
    OrangeMoney,
    MtnMomo,
    Other(String),
}

impl PaymentMethod {
    /// Parses a processor tag ("paycard", "cc", "orange_money", "mtn_momo").
    pub fn parse(tag: &str) -> Self {
        match tag {
            "paycard" => PaymentMethod::Paycard,
            "cc" => PaymentMethod::CreditCard,
            "orange_money" => PaymentMethod::OrangeMoney,
            "mtn_momo" => PaymentMethod::MtnMomo,
            other => PaymentMethod::Other(other.to_string()),
        }
    }

    /// The processor tag, as persisted in order metadata.
    pub fn tag(&self) -> &str {
        match self {
            PaymentMethod::Paycard => "paycard",
            PaymentMethod::CreditCard => "cc",
            PaymentMethod::OrangeMoney => "orange_money",
            PaymentMethod::MtnMomo => "mtn_momo",
            PaymentMethod::Other(tag) => tag,
        }
    }

    /// Human-readable label for audit notes.
    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Paycard => "PAYCARD",
            PaymentMethod::CreditCard => "Carte de Credit",
            PaymentMethod::OrangeMoney => "Orange Money",
            PaymentMethod::MtnMomo => "MTN Mobile Money",
            PaymentMethod::Other(_) => "----",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl From<String> for PaymentMethod {
    fn from(tag: String) -> Self {
        PaymentMethod::parse(&tag)
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!(PaymentMethod::parse("paycard"), PaymentMethod::Paycard);
        assert_eq!(PaymentMethod::parse("cc"), PaymentMethod::CreditCard);
        assert_eq!(PaymentMethod::parse("orange_money"), PaymentMethod::OrangeMoney);
        assert_eq!(PaymentMethod::parse("mtn_momo"), PaymentMethod::MtnMomo);
    }

    #[test]
    fn preserves_unknown_tags() {
        let method = PaymentMethod::parse("wave");
        assert_eq!(method, PaymentMethod::Other("wave".to_string()));
        assert_eq!(method.tag(), "wave");
        assert_eq!(method.label(), "----");
    }

    #[test]
    fn tag_round_trips() {
        for tag in ["paycard", "cc", "orange_money", "mtn_momo"] {
            assert_eq!(PaymentMethod::parse(tag).tag(), tag);
        }
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(PaymentMethod::OrangeMoney.label(), "Orange Money");
        assert_eq!(PaymentMethod::MtnMomo.label(), "MTN Mobile Money");
    }
}
