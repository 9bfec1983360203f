//! A list of deferred cleanup actions.
//!
//! Actions registered on a [`Deferred`] run when it goes out of scope, newest
//! first, whichever way the scope is left: normal return, `?`, or a panic.
//!
//! ```
//! use defer_list::Deferred;
//! use std::cell::RefCell;
//!
//! let log = RefCell::new(vec![]);
//! {
//!     let mut deferred = Deferred::new();
//!     deferred.push(|| log.borrow_mut().push("close file"));
//!     deferred.push(|| log.borrow_mut().push("unlock"));
//! }
//! assert_eq!(*log.borrow(), ["unlock", "close file"]);
//! ```

mod deferred;
mod error;

pub use deferred::Deferred;
pub use error::{Error, Result};
