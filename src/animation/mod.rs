pub(crate) mod ease;
pub(crate) mod oscillator;
pub(crate) mod pulse;
