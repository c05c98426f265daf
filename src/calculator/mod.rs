//! Four-function calculator core.
//!
//! This module provides:
//! - The arithmetic evaluator over two operands and an operator
//! - The keypad input controller tracking one session of button presses
//! - The key and layout types shared by every calculator surface

mod arith;
mod session;

pub use arith::{Operator, evaluate, evaluate_symbol};
pub use session::{ERROR_DISPLAY, Key, Layout, Session};
