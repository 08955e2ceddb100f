//! Static reference tables: FAO zones, gear categories and identifier formats.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// EU Community Fleet Register number: 3 letters + 9-12 digits
    pub static ref CFR_FORMAT: Regex = Regex::new(r"^[A-Z]{3}[0-9]{9,12}$").unwrap();

    /// Croatian logbook number: HRVLOG + 13 digits
    pub static ref LOGBOOK_FORMAT: Regex = Regex::new(r"^HRVLOG[0-9]{13}$").unwrap();
}

/// A recognised FAO fishing sub-area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaoZone {
    pub code: &'static str,
    pub description: &'static str,
}

/// Croatian waters FAO zone enumeration
pub const CROATIAN_FAO_ZONES: &[FaoZone] = &[
    FaoZone {
        code: "37.2.1",
        description: "Jadransko more - srednji dio",
    },
    FaoZone {
        code: "37.2.2",
        description: "Jadransko more - južni dio",
    },
    FaoZone {
        code: "37.1.1",
        description: "Jadransko more - sjeverni dio",
    },
    FaoZone {
        code: "37.1.2",
        description: "Jadransko more - sjeverni dio (obalni)",
    },
    FaoZone {
        code: "37.1.3",
        description: "Kvarnerski zaljev",
    },
    FaoZone {
        code: "37.3.1",
        description: "Jonsko more - sjeverni dio",
    },
    FaoZone {
        code: "37.3.2",
        description: "Jonsko more - srednji dio",
    },
];

pub fn find_zone(code: &str) -> Option<&'static FaoZone> {
    CROATIAN_FAO_ZONES.iter().find(|z| z.code == code)
}

pub fn is_croatian_zone(code: &str) -> bool {
    find_zone(code).is_some()
}

/// Description for a zone code, falling back to a generic label for codes
/// outside the table.
pub fn describe_zone(code: &str) -> String {
    match find_zone(code) {
        Some(zone) => zone.description.to_string(),
        None => format!("FAO zona {}", code),
    }
}

/// FAO/EU fishing gear category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GearCategory {
    pub code: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_GEAR: &str = "MIXED";

pub const GEAR_CATEGORIES: &[GearCategory] = &[
    GearCategory {
        code: "MIXED",
        description: "Mixed gear types",
    },
    GearCategory {
        code: "GNS",
        description: "Set gillnets (anchored)",
    },
    GearCategory {
        code: "GND",
        description: "Driftnets",
    },
    GearCategory {
        code: "GTR",
        description: "Trammel nets",
    },
    GearCategory {
        code: "LLS",
        description: "Set longlines",
    },
    GearCategory {
        code: "LLD",
        description: "Drifting longlines",
    },
    GearCategory {
        code: "LHP",
        description: "Handlines and pole-lines (hand operated)",
    },
    GearCategory {
        code: "LHM",
        description: "Handlines and pole-lines (mechanized)",
    },
    GearCategory {
        code: "FPO",
        description: "Pots",
    },
    GearCategory {
        code: "PS1",
        description: "Purse seines",
    },
    GearCategory {
        code: "OTB",
        description: "Bottom otter trawls",
    },
    GearCategory {
        code: "PTB",
        description: "Bottom pair trawls",
    },
    GearCategory {
        code: "TBN",
        description: "Bottom trawls nei",
    },
];

pub fn is_known_gear(code: &str) -> bool {
    GEAR_CATEGORIES.iter().any(|g| g.code == code)
}

pub fn is_valid_cfr(cfr: &str) -> bool {
    CFR_FORMAT.is_match(cfr)
}

pub fn is_valid_logbook(logbook: &str) -> bool {
    LOGBOOK_FORMAT.is_match(logbook)
}
