pub(crate) mod ease;
pub(crate) mod replay;
pub(crate) mod schedule;
