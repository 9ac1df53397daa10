//! Common id aliases
//!
//! User and channel identities come from the messaging transport and are
//! opaque numeric ids. They are aliased rather than newtyped so they stay
//! directly usable in transport calls and database rows.

/// Opaque numeric identity of a user, assigned by the messaging transport.
pub type UserId = i64;

/// Opaque numeric identity of a channel. Private channels are negative in
/// the transport's addressable form.
pub type ChannelId = i64;

/// Position of a message within one source channel.
pub type MessageId = i64;
