//! Campus department taxonomy — the closed set of units a complaint can be
//! routed to, plus each unit's contact address.
//!
//! Classification output and contact resolution are both validated against
//! this enum; strings that do not match a variant are dropped at the parsing
//! boundary, so no unknown department can reach a persisted record.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A campus unit that handles student complaints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Drinking Water")]
    DrinkingWater,
    #[serde(rename = "Network & IT")]
    NetworkIt,
    #[serde(rename = "Housekeeping")]
    Housekeeping,
    #[serde(rename = "Maintenance")]
    Maintenance,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Mess & Dining")]
    MessDining,
    #[serde(rename = "Accounts / Fee Office")]
    Accounts,
    #[serde(rename = "Academics / Registrar")]
    Academics,
    #[serde(rename = "Library")]
    Library,
    #[serde(rename = "Hostel Office / Residence Life")]
    HostelOffice,
}

impl Department {
    /// Every department, in canonical routing order.
    pub const ALL: [Department; 10] = [
        Department::DrinkingWater,
        Department::NetworkIt,
        Department::Housekeeping,
        Department::Maintenance,
        Department::Transport,
        Department::MessDining,
        Department::Accounts,
        Department::Academics,
        Department::Library,
        Department::HostelOffice,
    ];

    /// Display name, as shown to students and embedded in prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Department::DrinkingWater => "Drinking Water",
            Department::NetworkIt => "Network & IT",
            Department::Housekeeping => "Housekeeping",
            Department::Maintenance => "Maintenance",
            Department::Transport => "Transport",
            Department::MessDining => "Mess & Dining",
            Department::Accounts => "Accounts / Fee Office",
            Department::Academics => "Academics / Registrar",
            Department::Library => "Library",
            Department::HostelOffice => "Hostel Office / Residence Life",
        }
    }

    /// Contact address for this department.
    pub fn contact(&self) -> &'static str {
        match self {
            Department::DrinkingWater => "water@iiit-nagpur.ac.in",
            Department::NetworkIt => "it@iiit-nagpur.ac.in",
            Department::Housekeeping => "housekeeping@iiit-nagpur.ac.in",
            Department::Maintenance => "maintenance@iiit-nagpur.ac.in",
            Department::Transport => "transport@iiit-nagpur.ac.in",
            Department::MessDining => "mess@iiit-nagpur.ac.in",
            Department::Accounts => "accounts@iiit-nagpur.ac.in",
            Department::Academics => "academics@iiit-nagpur.ac.in",
            Department::Library => "library@iiit-nagpur.ac.in",
            Department::HostelOffice => "hostel@iiit-nagpur.ac.in",
        }
    }

    /// Strict parse: trims whitespace, then requires an exact display-name
    /// match. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Department> {
        let trimmed = raw.trim();
        Department::ALL.iter().copied().find(|d| d.name() == trimmed)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comma-joined list of all department names, used in the classification prompt.
pub fn department_roster() -> String {
    Department::ALL
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Restricts the contact mapping to the given departments.
/// Pure function; departments with no contact entry are simply absent.
pub fn resolve_contacts(departments: &[Department]) -> BTreeMap<Department, String> {
    departments
        .iter()
        .map(|d| (*d, d.contact().to_string()))
        .collect()
}
