//! Producer licensing requirements for the 50 states and DC

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IllustrationError, IllustrationResult};

pub(crate) const STATE_TABLE: &str = "state requirements";

macro_rules! us_states {
    ($($variant:ident => ($name:literal, $abbr:literal)),+ $(,)?) => {
        /// A licensing jurisdiction: one of the 50 states or the District of Columbia
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum UsState {
            $($variant),+
        }

        impl UsState {
            pub const ALL: [UsState; 51] = [$(UsState::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(UsState::$variant => $name),+
                }
            }

            /// Two-letter postal code
            pub fn abbreviation(&self) -> &'static str {
                match self {
                    $(UsState::$variant => $abbr),+
                }
            }
        }
    };
}

us_states! {
    Alabama => ("Alabama", "AL"),
    Alaska => ("Alaska", "AK"),
    Arizona => ("Arizona", "AZ"),
    Arkansas => ("Arkansas", "AR"),
    California => ("California", "CA"),
    Colorado => ("Colorado", "CO"),
    Connecticut => ("Connecticut", "CT"),
    Delaware => ("Delaware", "DE"),
    DistrictOfColumbia => ("District of Columbia", "DC"),
    Florida => ("Florida", "FL"),
    Georgia => ("Georgia", "GA"),
    Hawaii => ("Hawaii", "HI"),
    Idaho => ("Idaho", "ID"),
    Illinois => ("Illinois", "IL"),
    Indiana => ("Indiana", "IN"),
    Iowa => ("Iowa", "IA"),
    Kansas => ("Kansas", "KS"),
    Kentucky => ("Kentucky", "KY"),
    Louisiana => ("Louisiana", "LA"),
    Maine => ("Maine", "ME"),
    Maryland => ("Maryland", "MD"),
    Massachusetts => ("Massachusetts", "MA"),
    Michigan => ("Michigan", "MI"),
    Minnesota => ("Minnesota", "MN"),
    Mississippi => ("Mississippi", "MS"),
    Missouri => ("Missouri", "MO"),
    Montana => ("Montana", "MT"),
    Nebraska => ("Nebraska", "NE"),
    Nevada => ("Nevada", "NV"),
    NewHampshire => ("New Hampshire", "NH"),
    NewJersey => ("New Jersey", "NJ"),
    NewMexico => ("New Mexico", "NM"),
    NewYork => ("New York", "NY"),
    NorthCarolina => ("North Carolina", "NC"),
    NorthDakota => ("North Dakota", "ND"),
    Ohio => ("Ohio", "OH"),
    Oklahoma => ("Oklahoma", "OK"),
    Oregon => ("Oregon", "OR"),
    Pennsylvania => ("Pennsylvania", "PA"),
    RhodeIsland => ("Rhode Island", "RI"),
    SouthCarolina => ("South Carolina", "SC"),
    SouthDakota => ("South Dakota", "SD"),
    Tennessee => ("Tennessee", "TN"),
    Texas => ("Texas", "TX"),
    Utah => ("Utah", "UT"),
    Vermont => ("Vermont", "VT"),
    Virginia => ("Virginia", "VA"),
    Washington => ("Washington", "WA"),
    WestVirginia => ("West Virginia", "WV"),
    Wisconsin => ("Wisconsin", "WI"),
    Wyoming => ("Wyoming", "WY"),
}

impl UsState {
    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UsState {
    type Err = IllustrationError;

    /// Accepts the full name or postal code, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        UsState::ALL
            .iter()
            .find(|state| state.name().eq_ignore_ascii_case(key) || state.abbreviation().eq_ignore_ascii_case(key))
            .copied()
            .ok_or_else(|| IllustrationError::not_found(STATE_TABLE, key))
    }
}

/// Pre-licensing and continuing-education requirements for a life producer license
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateRequirement {
    pub pre_license_hours: u32,
    /// Exam fee in dollars
    pub exam_fee: f64,
    /// License renewal cycle in years
    pub renewal_years: u32,
    /// Continuing education hours per renewal cycle
    pub ce_hours: u32,
}

impl StateRequirement {
    pub const fn new(pre_license_hours: u32, exam_fee: f64, renewal_years: u32, ce_hours: u32) -> Self {
        Self { pre_license_hours, exam_fee, renewal_years, ce_hours }
    }
}

// (pre-license hours, exam fee, renewal years, CE hours), in UsState order
const DEFAULT_REQUIREMENTS: [StateRequirement; 51] = [
    StateRequirement::new(20, 85.0, 2, 24),  // AL
    StateRequirement::new(0, 100.0, 2, 24),  // AK
    StateRequirement::new(0, 60.0, 4, 48),   // AZ
    StateRequirement::new(0, 75.0, 2, 24),   // AR
    StateRequirement::new(52, 56.0, 2, 24),  // CA
    StateRequirement::new(0, 62.0, 2, 24),   // CO
    StateRequirement::new(0, 59.0, 2, 24),   // CT
    StateRequirement::new(0, 59.0, 2, 24),   // DE
    StateRequirement::new(0, 65.0, 2, 24),   // DC
    StateRequirement::new(40, 44.0, 2, 24),  // FL
    StateRequirement::new(20, 64.0, 2, 24),  // GA
    StateRequirement::new(0, 58.0, 2, 24),   // HI
    StateRequirement::new(0, 72.0, 2, 24),   // ID
    StateRequirement::new(20, 101.0, 2, 24), // IL
    StateRequirement::new(0, 80.0, 2, 24),   // IN
    StateRequirement::new(0, 63.0, 3, 36),   // IA
    StateRequirement::new(0, 72.0, 2, 12),   // KS
    StateRequirement::new(20, 99.0, 2, 24),  // KY
    StateRequirement::new(20, 63.0, 2, 24),  // LA
    StateRequirement::new(0, 85.0, 2, 24),   // ME
    StateRequirement::new(0, 64.0, 2, 24),   // MD
    StateRequirement::new(0, 79.0, 3, 30),   // MA
    StateRequirement::new(20, 72.0, 2, 24),  // MI
    StateRequirement::new(0, 63.0, 2, 24),   // MN
    StateRequirement::new(0, 80.0, 2, 24),   // MS
    StateRequirement::new(20, 66.0, 2, 16),  // MO
    StateRequirement::new(0, 80.0, 2, 24),   // MT
    StateRequirement::new(0, 65.0, 2, 24),   // NE
    StateRequirement::new(0, 76.0, 3, 30),   // NV
    StateRequirement::new(0, 115.0, 2, 24),  // NH
    StateRequirement::new(0, 73.0, 2, 24),   // NJ
    StateRequirement::new(0, 100.0, 2, 24),  // NM
    StateRequirement::new(40, 15.0, 2, 15),  // NY
    StateRequirement::new(20, 79.0, 2, 24),  // NC
    StateRequirement::new(0, 62.0, 2, 24),   // ND
    StateRequirement::new(20, 47.0, 2, 24),  // OH
    StateRequirement::new(0, 59.0, 2, 24),   // OK
    StateRequirement::new(0, 72.0, 2, 24),   // OR
    StateRequirement::new(24, 40.0, 2, 24),  // PA
    StateRequirement::new(0, 60.0, 2, 24),   // RI
    StateRequirement::new(0, 69.0, 2, 24),   // SC
    StateRequirement::new(0, 85.0, 2, 16),   // SD
    StateRequirement::new(0, 65.0, 2, 24),   // TN
    StateRequirement::new(0, 43.0, 2, 24),   // TX
    StateRequirement::new(0, 75.0, 2, 24),   // UT
    StateRequirement::new(0, 61.0, 2, 24),   // VT
    StateRequirement::new(20, 60.0, 2, 24),  // VA
    StateRequirement::new(0, 68.0, 2, 24),   // WA
    StateRequirement::new(0, 65.0, 2, 24),   // WV
    StateRequirement::new(0, 56.0, 2, 24),   // WI
    StateRequirement::new(0, 125.0, 2, 24),  // WY
];

/// Licensing requirements keyed by jurisdiction
#[derive(Debug, Clone, PartialEq)]
pub struct StateRequirementTable {
    requirements: [StateRequirement; 51],
}

impl Default for StateRequirementTable {
    fn default() -> Self {
        Self {
            requirements: DEFAULT_REQUIREMENTS,
        }
    }
}

impl StateRequirementTable {
    /// Look up by state name or postal code
    pub fn requirement(&self, state_name: &str) -> IllustrationResult<StateRequirement> {
        let state: UsState = state_name.parse()?;
        Ok(self.requirement_for(state))
    }

    pub fn requirement_for(&self, state: UsState) -> StateRequirement {
        self.requirements[state.index()]
    }

    /// Replace the entry for one state (used by the CSV loader)
    pub fn set(&mut self, state: UsState, requirement: StateRequirement) {
        self.requirements[state.index()] = requirement;
    }

    pub fn iter(&self) -> impl Iterator<Item = (UsState, StateRequirement)> + '_ {
        UsState::ALL.iter().map(move |&state| (state, self.requirement_for(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_jurisdictions_present() {
        assert_eq!(UsState::ALL.len(), 51);
        for (i, state) in UsState::ALL.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
    }

    #[test]
    fn test_new_york_requirement() {
        let table = StateRequirementTable::default();
        let ny = table.requirement("New York").unwrap();

        assert_eq!(ny.pre_license_hours, 40);
        assert_eq!(ny.exam_fee, 15.0);
        assert_eq!(ny.renewal_years, 2);
        assert_eq!(ny.ce_hours, 15);
    }

    #[test]
    fn test_unknown_state_not_found() {
        let table = StateRequirementTable::default();
        let err = table.requirement("Atlantis").unwrap_err();
        assert!(matches!(err, IllustrationError::NotFound { .. }));
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("ny".parse::<UsState>().unwrap(), UsState::NewYork);
        assert_eq!("  district of columbia ".parse::<UsState>().unwrap(), UsState::DistrictOfColumbia);
        assert_eq!("WY".parse::<UsState>().unwrap(), UsState::Wyoming);
        assert_eq!(UsState::NorthCarolina.to_string(), "North Carolina");
    }

    #[test]
    fn test_set_overrides_single_entry() {
        let mut table = StateRequirementTable::default();
        table.set(UsState::Texas, StateRequirement::new(10, 50.0, 2, 24));

        assert_eq!(table.requirement("TX").unwrap().pre_license_hours, 10);
        assert_eq!(table.requirement("NY").unwrap().pre_license_hours, 40);
    }
}
