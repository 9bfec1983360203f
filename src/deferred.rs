use crate::error::{panic_message, Error, Result};
use std::fmt;
use std::ops::AddAssign;
use std::panic::{self, AssertUnwindSafe};

type Action<'a> = Box<dyn FnOnce() + 'a>;

/// Cleanup actions that run, newest first, when the list is dropped.
///
/// Actions may borrow from the enclosing scope. The list can be moved (or
/// `std::mem::take`n) to hand its actions to another owner, but never copied:
///
/// ```compile_fail
/// let deferred = defer_list::Deferred::new();
/// let copy = deferred.clone();
/// ```
///
/// If an action panics, the remaining actions still run and the first panic
/// is resumed once they are done. Use [`Deferred::finish`] to get it as an
/// [`Error`] instead.
#[derive(Default)]
pub struct Deferred<'a>(Vec<Option<Action<'a>>>);

impl<'a> Deferred<'a> {
    pub fn new() -> Self {
        Self(vec![])
    }

    pub fn push<F: FnOnce() + 'a>(&mut self, f: F) {
        self.0.push(Some(Box::new(f)));
    }

    /// Registers an action that may be absent. `None` takes a slot but is
    /// skipped at teardown.
    ///
    /// An empty slot still needs a concrete action type:
    ///
    /// ```
    /// let mut deferred = defer_list::Deferred::new();
    /// deferred.push_opt(None::<fn()>);
    /// deferred.push_opt(Some(|| println!("released")));
    /// assert_eq!(deferred.len(), 2);
    /// ```
    pub fn push_opt<F: FnOnce() + 'a>(&mut self, f: Option<F>) {
        self.0.push(f.map(|f| Box::new(f) as Action<'a>));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Runs all pending actions now and reports panics instead of unwinding.
    pub fn finish(mut self) -> Result<()> {
        self.run()
    }

    fn run(&mut self) -> Result<()> {
        let mut first = None;
        let mut panicked = 0;
        let mut total = 0;

        // taken first so a second run sees nothing
        for deferred in std::mem::take(&mut self.0).into_iter().rev().flatten() {
            total += 1;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(deferred)) {
                panicked += 1;
                if first.is_none() {
                    first = Some(payload);
                }
            }
        }

        match first {
            None => Ok(()),
            Some(payload) => Err(Error::ActionPanicked {
                message: panic_message(&*payload),
                panicked,
                total,
                payload,
            }),
        }
    }
}

impl<'a, F: FnOnce() + 'a> AddAssign<F> for Deferred<'a> {
    fn add_assign(&mut self, f: F) {
        self.push(f);
    }
}

impl fmt::Debug for Deferred<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("pending", &self.0.len())
            .finish()
    }
}

impl Drop for Deferred<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.run() {
            // a second panic while unwinding would abort
            if !std::thread::panicking() {
                panic::resume_unwind(err.into_panic());
            }
        }
    }
}
