pub(crate) mod layout;
pub(crate) mod options;
pub(crate) mod tier;
