//! Engine error types.

use thiserror::Error;

use crate::channel::Channel;

/// Errors from strategy construction and decision validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendezvousError {
    /// Algorithm name does not match any known strategy.
    #[error("rendezvous algorithm {name} is not supported")]
    UnknownAlgorithm {
        /// The name that failed to parse.
        name: String,
    },

    /// Node has no channels to hop over.
    #[error("no channels available")]
    NoChannels,

    /// Channel id appears twice in one channel set.
    #[error("duplicate {channel} in channel set")]
    DuplicateChannel {
        /// The repeated channel.
        channel: Channel,
    },

    /// Master's own channel is missing from the scenario population.
    #[error("{channel} of the master is not part of the channel population")]
    ChannelNotInPopulation {
        /// The channel the population lacks.
        channel: Channel,
    },

    /// Decision fell outside the set the strategy may choose from.
    #[error("{algorithm} selected {channel} outside its channel set")]
    RangeViolation {
        /// Name of the offending strategy.
        algorithm: &'static str,
        /// The out-of-set decision.
        channel: Channel,
    },
}

impl RendezvousError {
    /// Returns true if this error is raised before any slot is simulated.
    ///
    /// Configuration errors are fatal for the whole run. Range violations are
    /// logic defects detected while a trial is running.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::UnknownAlgorithm { .. }
            | Self::NoChannels
            | Self::DuplicateChannel { .. }
            | Self::ChannelNotInPopulation { .. } => true,

            Self::RangeViolation { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_algorithm_is_configuration() {
        let err = RendezvousError::UnknownAlgorithm { name: "foo".to_string() };
        assert!(err.is_configuration());
    }

    #[test]
    fn range_violation_is_not_configuration() {
        let err = RendezvousError::RangeViolation { algorithm: "Random", channel: Channel::new(9) };
        assert!(!err.is_configuration());
    }

    #[test]
    fn error_display() {
        let err = RendezvousError::RangeViolation { algorithm: "JumpStay", channel: Channel::new(4) };
        assert_eq!(err.to_string(), "JumpStay selected channel 4 outside its channel set");

        let err = RendezvousError::UnknownAlgorithm { name: "foo".to_string() };
        assert_eq!(err.to_string(), "rendezvous algorithm foo is not supported");
    }
}
