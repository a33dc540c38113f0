// rill/src/capability/definition.rs

//! The `Capability` trait and the default behaviour of its optional method.

use tracing::{event, Level};

/// Response of [`default_try_me_again`] to an empty message.
pub const EMPTY_MESSAGE_RESPONSE: &str = "You didn't send nothing to me";

/// A capability with one mandatory operation and one operation that carries a
/// built-in fallback.
///
/// `try_me_again` was added after `try_me`. Its provided body delegates to
/// [`default_try_me_again`], so implementations written before it existed keep
/// compiling unchanged. An implementation that overrides it can still call the
/// free function to reuse the default.
pub trait Capability: Send + Sync {
  /// Every implementation supplies its own behaviour.
  fn try_me(&self, message: &str) -> String;

  fn try_me_again(&self, message: &str) -> String {
    default_try_me_again(message)
  }
}

/// The fallback behind [`Capability::try_me_again`].
///
/// Returns [`EMPTY_MESSAGE_RESPONSE`] for an empty message, and echoes any
/// other message.
pub fn default_try_me_again(message: &str) -> String {
  if message.is_empty() {
    event!(Level::DEBUG, "Default try_me_again received an empty message.");
    return EMPTY_MESSAGE_RESPONSE.to_string();
  }
  format!("You sent this message again: {}", message)
}

impl<C> Capability for Box<C>
where
  C: Capability + ?Sized,
{
  fn try_me(&self, message: &str) -> String {
    (**self).try_me(message)
  }

  // Forward explicitly, otherwise an override on `C` would be hidden by the default.
  fn try_me_again(&self, message: &str) -> String {
    (**self).try_me_again(message)
  }
}
