use crate::error::SlpError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// German federal state (Bundesland), identified by its two-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    BadenWuerttemberg,
    Bayern,
    Berlin,
    Brandenburg,
    Bremen,
    Hamburg,
    Hessen,
    MecklenburgVorpommern,
    Niedersachsen,
    NordrheinWestfalen,
    RheinlandPfalz,
    Saarland,
    Sachsen,
    SachsenAnhalt,
    SchleswigHolstein,
    Thueringen,
}

impl Region {
    pub const ALL: [Region; 16] = [
        Region::BadenWuerttemberg,
        Region::Bayern,
        Region::Berlin,
        Region::Brandenburg,
        Region::Bremen,
        Region::Hamburg,
        Region::Hessen,
        Region::MecklenburgVorpommern,
        Region::Niedersachsen,
        Region::NordrheinWestfalen,
        Region::RheinlandPfalz,
        Region::Saarland,
        Region::Sachsen,
        Region::SachsenAnhalt,
        Region::SchleswigHolstein,
        Region::Thueringen,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Region::BadenWuerttemberg => "BW",
            Region::Bayern => "BY",
            Region::Berlin => "BE",
            Region::Brandenburg => "BB",
            Region::Bremen => "HB",
            Region::Hamburg => "HH",
            Region::Hessen => "HE",
            Region::MecklenburgVorpommern => "MV",
            Region::Niedersachsen => "NI",
            Region::NordrheinWestfalen => "NW",
            Region::RheinlandPfalz => "RP",
            Region::Saarland => "SL",
            Region::Sachsen => "SN",
            Region::SachsenAnhalt => "ST",
            Region::SchleswigHolstein => "SH",
            Region::Thueringen => "TH",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::BadenWuerttemberg => "Baden-Württemberg",
            Region::Bayern => "Bayern",
            Region::Berlin => "Berlin",
            Region::Brandenburg => "Brandenburg",
            Region::Bremen => "Bremen",
            Region::Hamburg => "Hamburg",
            Region::Hessen => "Hessen",
            Region::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            Region::Niedersachsen => "Niedersachsen",
            Region::NordrheinWestfalen => "Nordrhein-Westfalen",
            Region::RheinlandPfalz => "Rheinland-Pfalz",
            Region::Saarland => "Saarland",
            Region::Sachsen => "Sachsen",
            Region::SachsenAnhalt => "Sachsen-Anhalt",
            Region::SchleswigHolstein => "Schleswig-Holstein",
            Region::Thueringen => "Thüringen",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = SlpError;

    /// Case-insensitive two-letter code; `DE-` prefixes (ISO 3166-2) are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        let code = code.strip_prefix("DE-").unwrap_or(&code);
        Region::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| SlpError::UnknownRegion {
                code: s.to_string(),
                valid: Region::ALL.map(Region::code).join(", "),
            })
    }
}

impl TryFrom<String> for Region {
    type Error = SlpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("RP".parse::<Region>().unwrap(), Region::RheinlandPfalz);
        assert_eq!("by".parse::<Region>().unwrap(), Region::Bayern);
        assert_eq!("DE-SN".parse::<Region>().unwrap(), Region::Sachsen);
    }

    #[test]
    fn test_unknown_code_lists_valid_codes() {
        let err = "XX".parse::<Region>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("XX"));
        assert!(message.contains("NW"));
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = Region::ALL.iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 16);
    }
}
