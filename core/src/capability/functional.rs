// rill/src/capability/functional.rs

//! A `Capability` assembled from closures, for one-off implementations that do
//! not deserve a named type.

use crate::capability::definition::{default_try_me_again, Capability};
use std::fmt;
use std::sync::Arc;

type Responder = Arc<dyn Fn(&str) -> String + Send + Sync + 'static>;

/// Implements [`Capability`] with a `try_me` closure and, optionally, a
/// `try_me_again` override. Without the override, `try_me_again` falls back to
/// [`default_try_me_again`].
#[derive(Clone)]
pub struct FunctionalCapability {
  try_me: Responder,
  try_me_again: Option<Responder>,
}

impl FunctionalCapability {
  pub fn new(try_me: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
    Self {
      try_me: Arc::new(try_me),
      try_me_again: None,
    }
  }

  /// Overrides `try_me_again`.
  pub fn with_try_me_again(mut self, try_me_again: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
    self.try_me_again = Some(Arc::new(try_me_again));
    self
  }

  pub fn overrides_try_me_again(&self) -> bool {
    self.try_me_again.is_some()
  }
}

impl Capability for FunctionalCapability {
  fn try_me(&self, message: &str) -> String {
    (self.try_me)(message)
  }

  fn try_me_again(&self, message: &str) -> String {
    match &self.try_me_again {
      Some(responder) => responder(message),
      None => default_try_me_again(message),
    }
  }
}

impl fmt::Debug for FunctionalCapability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FunctionalCapability")
      .field("overrides_try_me_again", &self.overrides_try_me_again())
      .finish()
  }
}
