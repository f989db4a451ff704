//! Error types for sequence operations.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Index out of range | `get`/`set`/`insert`/`remove_at` past the bound | `IndexOutOfRange`, sequence untouched |
//! | Listener failure | a fallible listener returned `Err` | `Listener`, mutation already applied, later listeners skipped |
//! | Short destination | `copy_to` into a slice without room | `DestinationTooSmall`, destination untouched |

use std::fmt;

use crate::event::ChangeKind;

/// Error returned by a fallible listener.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from [`ObservableVec`](crate::ObservableVec) operations.
#[derive(Debug)]
pub enum SeqError {
    /// An index fell outside the valid bound for the operation.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the sequence at the time of the call.
        len: usize,
    },
    /// A listener failed while being notified.
    Listener {
        /// Event kind being delivered.
        kind: ChangeKind,
        /// Error returned by the listener, unchanged.
        source: ListenerError,
    },
    /// `copy_to` was given a destination without enough room.
    DestinationTooSmall {
        /// Slots required starting at the offset.
        needed: usize,
        /// Slots available starting at the offset.
        available: usize,
    },
}

impl SeqError {
    /// Whether this is an [`IndexOutOfRange`](Self::IndexOutOfRange) error.
    #[must_use]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Event kind whose delivery failed, if this is a listener failure.
    #[must_use]
    pub fn listener_kind(&self) -> Option<ChangeKind> {
        match self {
            Self::Listener { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Unwrap the listener's own error, or give `self` back.
    pub fn into_listener_error(self) -> Result<ListenerError, Self> {
        match self {
            Self::Listener { source, .. } => Ok(source),
            other => Err(other),
        }
    }
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::Listener { kind, source } => {
                write!(f, "{} listener failed: {source}", kind.as_str())
            }
            Self::DestinationTooSmall { needed, available } => {
                write!(
                    f,
                    "destination too small: need {needed} slots, {available} available"
                )
            }
        }
    }
}

impl std::error::Error for SeqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Listener { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_index_out_of_range() {
        let err = SeqError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "index 3 out of range for sequence of length 2"
        );
        assert!(err.is_index_out_of_range());
        assert!(err.source().is_none());
    }

    #[test]
    fn listener_error_keeps_source() {
        let err = SeqError::Listener {
            kind: ChangeKind::Removed,
            source: "boom".into(),
        };
        assert_eq!(err.to_string(), "removed listener failed: boom");
        assert_eq!(err.listener_kind(), Some(ChangeKind::Removed));
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".into()));

        let inner = err.into_listener_error().unwrap();
        assert_eq!(inner.to_string(), "boom");
    }

    #[test]
    fn into_listener_error_returns_other_kinds() {
        let err = SeqError::DestinationTooSmall {
            needed: 4,
            available: 1,
        };
        let back = err.into_listener_error().unwrap_err();
        assert!(matches!(
            back,
            SeqError::DestinationTooSmall {
                needed: 4,
                available: 1
            }
        ));
        assert_eq!(back.listener_kind(), None);
    }
}
