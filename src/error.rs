use std::any::Any;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// One or more deferred actions panicked during teardown. The remaining
    /// actions still ran; `payload` is the first panic.
    #[error("deferred action panicked: {message} ({panicked} of {total} actions panicked)")]
    ActionPanicked {
        message: String,
        panicked: usize,
        total: usize,
        payload: Box<dyn Any + Send>,
    },
}

impl Error {
    /// The payload of the first panic, suitable for `std::panic::resume_unwind`.
    pub fn into_panic(self) -> Box<dyn Any + Send> {
        match self {
            Error::ActionPanicked { payload, .. } => payload,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_str_and_string() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "boom");

        let payload: Box<dyn Any + Send> = Box::new(format!("code {}", 3));
        assert_eq!(panic_message(&*payload), "code 3");

        let payload: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(&*payload), "Box<dyn Any>");
    }

    #[test]
    fn display() {
        let err = Error::ActionPanicked {
            message: "boom".to_string(),
            panicked: 1,
            total: 3,
            payload: Box::new("boom"),
        };
        assert_eq!(
            err.to_string(),
            "deferred action panicked: boom (1 of 3 actions panicked)"
        );
        assert_eq!(err.into_panic().downcast_ref::<&str>(), Some(&"boom"));
    }
}
