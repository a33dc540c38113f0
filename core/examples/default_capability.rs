// rill/examples/default_capability.rs

use rill::{Capability, FunctionalCapability};
use tracing::info;

// Written before try_me_again existed; still compiles unchanged.
struct Greeter;

impl Capability for Greeter {
  fn try_me(&self, message: &str) -> String {
    format!("you send this message: {}", message)
  }
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Default Capability Example ---");

  let greeter = Greeter;
  info!("{}", greeter.try_me("my name is marcus"));
  info!("{}", greeter.try_me_again(""));

  let custom = FunctionalCapability::new(|message| format!("You send this message to me: {}", message))
    .with_try_me_again(|message| format!("You send this message, again, to me: {}", message));
  info!("{}", custom.try_me_again("my name is marcus"));
}
