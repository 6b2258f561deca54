//! Result sinks and output types.

mod console;
mod store;
mod types;
mod writer;

pub use console::{ConsoleWriter, format_recognitions};
pub use store::JsonStore;
pub use types::{Drink, DrinksResult};
pub use writer::ResultSink;

/// Spoken answer to "do we have `drink`?" given the latest stored result.
pub fn availability_answer(drink: Drink, result: &DrinksResult) -> String {
    if result.has(drink) {
        format!("We have some {drink}.")
    } else {
        format!("We don't have any {drink}.")
    }
}
