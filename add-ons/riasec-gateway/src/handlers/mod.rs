//! Request handlers that need more than a snapshot lookup.

mod recommend;

pub(crate) use recommend::recommend;
