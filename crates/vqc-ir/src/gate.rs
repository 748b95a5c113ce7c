//! Gate vocabulary of the classifier circuit.
//!
//! Rotation angles are expressed in fractions of a full turn: an angle of
//! `0.25` is a quarter turn (π/2 radians). Rotations are periodic in whole
//! turns, which is why resolved angles are always reduced into `[0, 1)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IrError;

/// Angle of a rotation gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    /// Unresolved: filled from the value stream at this slot index.
    Slot(usize),
    /// Resolved angle in turns.
    Turns(f64),
}

impl Angle {
    /// Check if this angle still refers to a parameter slot.
    pub fn is_slot(&self) -> bool {
        matches!(self, Angle::Slot(_))
    }

    /// Get the slot index, if unresolved.
    pub fn as_slot(&self) -> Option<usize> {
        match self {
            Angle::Slot(s) => Some(*s),
            Angle::Turns(_) => None,
        }
    }

    /// Get the resolved value in turns, if any.
    pub fn as_turns(&self) -> Option<f64> {
        match self {
            Angle::Turns(t) => Some(*t),
            Angle::Slot(_) => None,
        }
    }

    /// Get the resolved value in radians, if any.
    pub fn as_radians(&self) -> Option<f64> {
        self.as_turns().map(|t| t * std::f64::consts::TAU)
    }
}

/// Trainable single-qubit rotation, as named in a gate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationGate {
    /// Rotation around X.
    Rx,
    /// Rotation around Y.
    Ry,
    /// Rotation around Z.
    Rz,
}

impl RotationGate {
    /// Get the lowercase gate name.
    pub fn name(&self) -> &'static str {
        match self {
            RotationGate::Rx => "rx",
            RotationGate::Ry => "ry",
            RotationGate::Rz => "rz",
        }
    }

    /// Build the concrete gate carrying `angle`.
    pub fn with_angle(self, angle: Angle) -> StandardGate {
        match self {
            RotationGate::Rx => StandardGate::Rx(angle),
            RotationGate::Ry => StandardGate::Ry(angle),
            RotationGate::Rz => StandardGate::Rz(angle),
        }
    }

    /// Parse a comma-separated gate list such as `"ry,rz"`.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, IrError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for RotationGate {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rx" => Ok(RotationGate::Rx),
            "ry" => Ok(RotationGate::Ry),
            "rz" => Ok(RotationGate::Rz),
            other => Err(IrError::UnknownGate(other.to_string())),
        }
    }
}

impl fmt::Display for RotationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gates that appear in a classifier circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Rotation around X axis.
    Rx(Angle),
    /// Rotation around Y axis.
    Ry(Angle),
    /// Rotation around Z axis.
    Rz(Angle),
    /// Controlled rotation around Z.
    CRz(Angle),
    /// Controlled-Z gate.
    CZ,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CRz(_) => "crz",
            StandardGate::CZ => "cz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::Rx(_) | StandardGate::Ry(_) | StandardGate::Rz(_) => 1,
            StandardGate::CRz(_) | StandardGate::CZ => 2,
        }
    }

    /// Get the angle of a rotation gate.
    pub fn angle(&self) -> Option<Angle> {
        match self {
            StandardGate::Rx(a) | StandardGate::Ry(a) | StandardGate::Rz(a) | StandardGate::CRz(a) => {
                Some(*a)
            }
            StandardGate::H | StandardGate::CZ => None,
        }
    }

    /// Return a copy of this gate with its angle replaced.
    ///
    /// Gates without an angle are returned unchanged.
    #[must_use]
    pub fn with_angle(self, angle: Angle) -> Self {
        match self {
            StandardGate::Rx(_) => StandardGate::Rx(angle),
            StandardGate::Ry(_) => StandardGate::Ry(angle),
            StandardGate::Rz(_) => StandardGate::Rz(angle),
            StandardGate::CRz(_) => StandardGate::CRz(angle),
            other => other,
        }
    }
}
