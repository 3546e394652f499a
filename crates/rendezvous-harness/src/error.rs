//! Harness error types.

use rendezvous_core::RendezvousError;
use thiserror::Error;

/// Errors from scenario construction and trial execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Channel model name is not recognized.
    #[error("channel model {name} is not supported")]
    UnknownModel {
        /// The name that failed to parse.
        name: String,
    },

    /// Scenario has an empty channel pool.
    #[error("scenario needs at least one channel")]
    NoChannels,

    /// Scenario has no nodes.
    #[error("scenario needs at least one node")]
    NoNodes,

    /// Theta is negative or not finite.
    #[error("theta must be a non-negative number, got {theta}")]
    InvalidTheta {
        /// The rejected value.
        theta: f64,
    },

    /// Node was asked for a channel before a strategy was assigned.
    #[error("node {node_id} has no rendezvous strategy")]
    NotInitialized {
        /// The uninitialized node.
        node_id: u32,
    },

    /// Engine rejected a configuration or produced an invalid decision.
    #[error(transparent)]
    Rendezvous(#[from] RendezvousError),
}

impl SimulationError {
    /// Returns true if the error was caused by invalid input rather than a
    /// defect observed during a trial.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::UnknownModel { .. }
            | Self::NoChannels
            | Self::NoNodes
            | Self::InvalidTheta { .. } => true,

            Self::Rendezvous(e) => e.is_configuration(),

            Self::NotInitialized { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rendezvous_core::Channel;

    use super::*;

    #[test]
    fn engine_configuration_errors_propagate_classification() {
        let err = SimulationError::from(RendezvousError::NoChannels);
        assert!(err.is_configuration());

        let err = SimulationError::from(RendezvousError::RangeViolation {
            algorithm: "Random",
            channel: Channel::new(3),
        });
        assert!(!err.is_configuration());
    }

    #[test]
    fn error_display() {
        let err = SimulationError::UnknownModel { name: "fancy".to_string() };
        assert_eq!(err.to_string(), "channel model fancy is not supported");

        let err = SimulationError::from(RendezvousError::NoChannels);
        assert_eq!(err.to_string(), "no channels available");
    }
}
