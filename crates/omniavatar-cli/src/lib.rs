//! OmniAvatar CLI library.
//!
//! Command implementations and input loading for the `omniavatar` binary.

pub mod commands;
pub mod input;
