use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Free-text book title decoded from one voice turn. Consumed once.
#[derive(Debug, Clone)]
pub struct BookQuery {
    pub title: String,
}

/// One raw catalog result row, in the order the catalog returned it.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub isbn: Option<String>,
    pub title: Option<String>,
}

/// The selected catalog item. `isbn` is all digits.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch {
    pub isbn: String,
    pub display_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn to_geocode_param(&self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

/// One physical library branch. `system_id` groups the branches that share
/// a polling endpoint, `branch_key` disambiguates branches within it.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchEntry {
    pub system_id: String,
    pub branch_key: String,
    pub formal_name: String,
}

/// Loan status of one library system as reported by the availability
/// service, possibly still computing.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSnapshot {
    #[serde(
        rename = "continue",
        default,
        deserialize_with = "flag_from_bool_or_int"
    )]
    pub still_running: bool,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub books: HashMap<String, HashMap<String, SystemSnapshot>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SystemSnapshot {
    #[serde(default)]
    pub libkey: HashMap<String, String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reserveurl: String,
}

/// Per-system availability, cached for the duration of one aggregation
/// pass. Computed at most once per system_id per run.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemAvailability {
    pub branch_status: HashMap<String, String>,
    pub reserve_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanableBranch {
    pub formal_name: String,
    pub reserve_url: String,
}

/// Pipeline output handed to speech rendering.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub title: String,
    pub loanable: Vec<LoanableBranch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "postalCode", default)]
    pub postal_code: Option<String>,
}

// The live availability service sends `continue` as 0/1.
fn flag_from_bool_or_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
