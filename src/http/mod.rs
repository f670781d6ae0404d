mod browse;
mod health;

pub(crate) use browse::browse_library;
pub(crate) use health::readiness_check;
