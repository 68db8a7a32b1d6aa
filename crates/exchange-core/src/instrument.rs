//! The fixed instrument universe of the exchange.
//!
//! The exchange lists exactly five flowers. Orders naming anything else
//! are rejected at validation; nothing downstream of the validator ever
//! sees an unlisted instrument name.

use std::fmt;

/// A listed instrument.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Instrument {
    Rose,
    Lavender,
    Lotus,
    Tulip,
    Orchid,
}

impl Instrument {
    /// Every listed instrument, in listing order.
    pub const ALL: [Instrument; 5] = [
        Instrument::Rose,
        Instrument::Lavender,
        Instrument::Lotus,
        Instrument::Tulip,
        Instrument::Orchid,
    ];

    /// The listing name (case-sensitive, as it appears in order files).
    pub fn as_str(self) -> &'static str {
        match self {
            Instrument::Rose => "Rose",
            Instrument::Lavender => "Lavender",
            Instrument::Lotus => "Lotus",
            Instrument::Tulip => "Tulip",
            Instrument::Orchid => "Orchid",
        }
    }

    /// Look up a listed instrument by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Instrument::ALL
            .into_iter()
            .find(|instrument| instrument.as_str() == name)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
