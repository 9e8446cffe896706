pub(crate) mod alert;
pub(crate) mod button;
pub(crate) mod spinner;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::Button;
pub(crate) use spinner::Spinner;
