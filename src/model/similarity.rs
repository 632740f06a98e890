use std::str::FromStr;
use rapidfuzz::distance::levenshtein;
use rapidfuzz::fuzz;
use serde::{Deserialize, Serialize};

///
/// The string-similarity metric used to compare a new password with the old one.
///
/// Both return a normalised percentage (0-100): 100 means identical, 0 means nothing
/// in common. "password" vs "password1" scores around 94 on the indel metric, so a
/// sensible rejection threshold sits well below that.
///
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub enum Metric {
    Indel,
    Levenshtein,
}

impl Metric {
    pub fn ratio(&self, a: &str, b: &str) -> f64 {
        match self {
            Metric::Indel => 100. * fuzz::ratio(a.chars(), b.chars()),
            Metric::Levenshtein => 100. * levenshtein::normalized_similarity(a.chars(), b.chars()),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(input: &str) -> Result<Metric, Self::Err> {
        match input {
            "indel"       => Ok(Metric::Indel),
            "levenshtein" => Ok(Metric::Levenshtein),
            _ => Err(format!("similarity metric {} is un-handled", input)),
        }
    }
}
