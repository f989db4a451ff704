#![forbid(unsafe_code)]

//! Observable ordered sequence.
//!
//! [`ObservableVec<T>`] is a `Vec`-backed, index-addressable sequence that
//! tells registered listeners about every insertion, removal and in-place
//! replacement, synchronously and in registration order.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use obseq::ObservableVec;
//!
//! let mut seq: ObservableVec<&str> = ObservableVec::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! seq.on_inserted(move |_, value, index| sink.borrow_mut().push((*value, index)));
//!
//! seq.append("a").unwrap();
//! seq.append("b").unwrap();
//! assert_eq!(*seen.borrow(), vec![("a", 0), ("b", 1)]);
//! ```
//!
//! # Invariants
//!
//! 1. The index space is always contiguous `[0, len)`.
//! 2. Mutations apply before any listener runs; listeners receive a shared
//!    borrow of the sequence and observe the post-mutation state.
//! 3. Listeners of one event kind run in registration order.
//! 4. A failing listener stops delivery for that call and its error reaches
//!    the caller; the mutation is not rolled back.

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
#[cfg(any(test, feature = "test-helpers"))]
pub mod recorder;
pub mod registry;
pub mod sequence;

pub use config::{ClearNotification, InsertNotification, RemoveMiss, SequenceConfig};
pub use error::{ListenerError, SeqError};
pub use event::{ChangeKind, ListenerId};
#[cfg(any(test, feature = "test-helpers"))]
pub use recorder::{EventRecorder, RecordedEvent};
pub use sequence::{ObservableVec, SequenceId};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
