//! Display names for counties in AP style.

mod county;
mod state;

pub use county::{county_label, has_suffix, suffix_for_state, DEFAULT_SUFFIX, SUFFIXES};
pub use state::ap_state;
