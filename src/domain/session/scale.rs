//! Estimation scales and their fixed card sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const FIBONACCI_CARDS: &[&str] = &["0", "1", "2", "3", "5", "8", "13", "21", "34", "?", "☕"];

const MODIFIED_FIBONACCI_CARDS: &[&str] = &[
    "0", "0.5", "1", "2", "3", "5", "8", "13", "20", "40", "100", "?", "☕",
];

const TSHIRT_CARDS: &[&str] = &["XS", "S", "M", "L", "XL", "XXL", "?", "☕"];

const POWERS_OF_2_CARDS: &[&str] = &["1", "2", "4", "8", "16", "32", "64", "?", "☕"];

/// The card scale a session votes with.
///
/// Serialized by its display name (`fibonacci`, `modifiedFibonacci`,
/// `tshirt`, `powersOf2`); parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scale {
    Fibonacci,
    ModifiedFibonacci,
    TShirt,
    PowersOf2,
}

impl Scale {
    /// Every scale, in menu order.
    pub const ALL: [Scale; 4] = [
        Scale::Fibonacci,
        Scale::ModifiedFibonacci,
        Scale::TShirt,
        Scale::PowersOf2,
    ];

    /// The ordered cards a participant can pick from.
    pub fn cards(&self) -> &'static [&'static str] {
        match self {
            Scale::Fibonacci => FIBONACCI_CARDS,
            Scale::ModifiedFibonacci => MODIFIED_FIBONACCI_CARDS,
            Scale::TShirt => TSHIRT_CARDS,
            Scale::PowersOf2 => POWERS_OF_2_CARDS,
        }
    }

    /// Name used on the wire and in logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Scale::Fibonacci => "fibonacci",
            Scale::ModifiedFibonacci => "modifiedFibonacci",
            Scale::TShirt => "tshirt",
            Scale::PowersOf2 => "powersOf2",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Scale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fibonacci" => Ok(Scale::Fibonacci),
            "modifiedfibonacci" => Ok(Scale::ModifiedFibonacci),
            "tshirt" => Ok(Scale::TShirt),
            "powersof2" => Ok(Scale::PowersOf2),
            _ => Err(ValidationError::invalid_format(
                "scale",
                format!("Invalid estimation scale: {}", s),
            )),
        }
    }
}

impl TryFrom<String> for Scale {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scale> for String {
    fn from(scale: Scale) -> Self {
        scale.display_name().to_string()
    }
}
