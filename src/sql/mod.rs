//! Statement text handling: verb classification and request source resolution.

mod classify;
pub mod source;
pub use classify::*;
