//! Enumerated profile attributes.
//!
//! Each choice is stored as its wire value (`as_str` / `as_i16`) and parsed
//! back with `FromStr` / `TryFrom`, both for database rows and query strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Transgender,
    PreferNotToSay,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Transgender => "transgender",
            Gender::PreferNotToSay => "prefer_not_to_say",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "transgender" => Ok(Gender::Transgender),
            "prefer_not_to_say" => Ok(Gender::PreferNotToSay),
            other => Err(ValidationError::invalid_format(
                "gender",
                format!("\"{}\" is not a valid choice.", other),
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Career level, ordered from individual contributor to founder.
///
/// Serialized as its rank (1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum CareerLevel {
    IcAssociate = 1,
    Ic = 2,
    IcSenior = 3,
    IcStaff = 4,
    IcPrincipal = 5,
    Manager = 6,
    Director = 7,
    DirectorSenior = 8,
    Vp = 9,
    VpSenior = 10,
    CSuite = 11,
    Founder = 12,
}

impl CareerLevel {
    const ALL: [CareerLevel; 12] = [
        CareerLevel::IcAssociate,
        CareerLevel::Ic,
        CareerLevel::IcSenior,
        CareerLevel::IcStaff,
        CareerLevel::IcPrincipal,
        CareerLevel::Manager,
        CareerLevel::Director,
        CareerLevel::DirectorSenior,
        CareerLevel::Vp,
        CareerLevel::VpSenior,
        CareerLevel::CSuite,
        CareerLevel::Founder,
    ];

    pub fn as_i16(&self) -> i16 {
        *self as i16
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CareerLevel::IcAssociate => "Individual Contributor, Associate",
            CareerLevel::Ic => "Individual Contributor",
            CareerLevel::IcSenior => "Individual Contributor, Senior",
            CareerLevel::IcStaff => "Individual Contributor, Staff",
            CareerLevel::IcPrincipal => "Individual Contributor, Principal",
            CareerLevel::Manager => "Manager",
            CareerLevel::Director => "Director",
            CareerLevel::DirectorSenior => "Director, Senior",
            CareerLevel::Vp => "VP",
            CareerLevel::VpSenior => "VP, Senior",
            CareerLevel::CSuite => "C-Suite",
            CareerLevel::Founder => "Founder",
        }
    }
}

impl TryFrom<i16> for CareerLevel {
    type Error = ValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        CareerLevel::ALL
            .into_iter()
            .find(|level| level.as_i16() == value)
            .ok_or_else(|| ValidationError::out_of_range("level", 1, 12, value))
    }
}

impl From<CareerLevel> for i16 {
    fn from(level: CareerLevel) -> Self {
        level.as_i16()
    }
}

impl FromStr for CareerLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i16 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format("level", "A valid integer is required."))?;
        CareerLevel::try_from(value)
    }
}

/// Personal finance manager currently in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentPfm {
    #[serde(rename = "mint")]
    Mint,
    #[serde(rename = "rocket money")]
    RocketMoney,
    #[serde(rename = "quicken")]
    Quicken,
    #[serde(rename = "chime")]
    Chime,
    #[serde(rename = "splitwise")]
    Splitwise,
    #[serde(rename = "pen paper")]
    PenPaper,
    #[serde(rename = "none")]
    None,
}

impl CurrentPfm {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentPfm::Mint => "mint",
            CurrentPfm::RocketMoney => "rocket money",
            CurrentPfm::Quicken => "quicken",
            CurrentPfm::Chime => "chime",
            CurrentPfm::Splitwise => "splitwise",
            CurrentPfm::PenPaper => "pen paper",
            CurrentPfm::None => "none",
        }
    }
}

impl FromStr for CurrentPfm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mint" => Ok(CurrentPfm::Mint),
            "rocket money" => Ok(CurrentPfm::RocketMoney),
            "quicken" => Ok(CurrentPfm::Quicken),
            "chime" => Ok(CurrentPfm::Chime),
            "splitwise" => Ok(CurrentPfm::Splitwise),
            "pen paper" => Ok(CurrentPfm::PenPaper),
            "none" => Ok(CurrentPfm::None),
            other => Err(ValidationError::invalid_format(
                "current_pfm",
                format!("\"{}\" is not a valid choice.", other),
            )),
        }
    }
}
