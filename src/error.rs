use std::fmt::{Debug, Display};
pub struct ClassifierError(pub String);

impl Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ClassifierError").field(&self.0).finish()
    }
}

impl std::error::Error for ClassifierError {}

#[macro_export]
macro_rules! dc_err {
    (@ $msg:expr) => {
        $crate::error::ClassifierError(format!(
            "dog-classifier: {} @ {}:{}:{}",
            $msg,
            file!(),
            line!(),
            column!()
        ))
    };
    ($fmt:literal $(,)?) => {
        $crate::dc_err!(@ format!($fmt))
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::dc_err!(@ format!($fmt, $($arg)+))
    };
    ($err:expr $(,)?) => {
        $crate::dc_err!(@ $err)
    };
}

#[macro_export]
macro_rules! dc_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::dc_err!(err));
            }
        }
    };
}
