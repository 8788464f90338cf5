//! Domain services built on top of the provider ports

/// Ordered recipient mailbox
pub mod mailbox;

pub use mailbox::OrderedMailbox;
