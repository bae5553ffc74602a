
pub(crate) mod support;
