use std::{fmt, str::FromStr};

use machine_learning::arch::activations::sigmoid;
use serde::{Deserialize, Serialize};

use crate::{AppErr, Result};

/// The width of an encoded league.
pub const OUTPUTS: usize = 8;

/// Activation of the output unit matching the league itself.
const BASE_ACTIVATION: f64 = 1.;

/// Activation drop between two consecutive output units.
const STEP: f64 = 2.;

/// A player's ranked league, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum League {
    Unknown = 0,
    Bronze = 1,
    Silver = 2,
    Gold = 3,
    Platinum = 4,
    Diamond = 5,
    Master = 6,
    GrandMaster = 7,
    Professional = 8,
}
use League::*;

impl League {
    pub const ALL: [League; 9] = [
        Unknown,
        Bronze,
        Silver,
        Gold,
        Platinum,
        Diamond,
        Master,
        GrandMaster,
        Professional,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Encodes this league as one sigmoid activation per league, every unit up to the
    /// league's own being above 0.5 and every unit past it below.
    pub fn to_output(self) -> Vec<f64> {
        let league = self.index() as f64;
        (1..=OUTPUTS)
            .map(|i| sigmoid(BASE_ACTIVATION + (league - i as f64) * STEP))
            .collect()
    }

    /// Decodes a network output: the highest unit above 0.5 gives the league.
    ///
    /// An output with no unit above 0.5 decodes to `Professional`, `Unknown` never comes
    /// out of a decoding.
    ///
    /// # Errors
    /// `AppErr::OutputWidth` if `output` doesn't have `OUTPUTS` values.
    pub fn from_output(output: &[f64]) -> Result<Self> {
        if output.len() != OUTPUTS {
            return Err(AppErr::OutputWidth {
                got: output.len(),
                expected: OUTPUTS,
            });
        }

        let league = output
            .iter()
            .rposition(|&a| a > 0.5)
            .and_then(|i| Self::from_index(i + 1))
            .unwrap_or(Professional);

        Ok(league)
    }

    /// How many leagues apart `self` and `other` are.
    pub fn distance(self, other: Self) -> usize {
        self.index().abs_diff(other.index())
    }
}

impl FromStr for League {
    type Err = AppErr;

    /// Parses a league index, `?` meaning `Unknown`.
    fn from_str(s: &str) -> Result<Self> {
        if s == "?" {
            return Ok(Unknown);
        }

        s.parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| AppErr::InvalidLeague(s.to_string()))
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Whether two network outputs decode to the same league.
pub fn same_league(predicted: &[f64], expected: &[f64]) -> bool {
    match (League::from_output(predicted), League::from_output(expected)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
