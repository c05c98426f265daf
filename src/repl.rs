//! Interactive terminal keypad.
//!
//! Every character on a line is dispatched as a keypad press and the display
//! is echoed once the line is processed, so `5+3=` behaves exactly like
//! pressing those four buttons on the page.

use std::io::{Write, stdin, stdout};

use anyhow::Context;

use crate::calculator::{Key, Layout, Session};

pub fn run(layout: Layout) -> anyhow::Result<()> {
    println!("calcboard keypad");
    println!("  keys: 0-9 . + - * / = | c clear, < backspace, ~ sign, % percent");
    println!("  q or Ctrl-D quits; keys outside the chosen layout are ignored");

    let mut session = Session::with_layout(layout);
    let mut input = String::new();
    loop {
        print!("> ");
        stdout().flush().context("failed to flush stdout")?;

        input.clear();
        let read = stdin()
            .read_line(&mut input)
            .context("failed to read input")?;
        if read == 0 {
            println!();
            return Ok(());
        }

        let line = input.trim();
        if matches!(line, "q" | "quit" | "exit") {
            return Ok(());
        }

        for c in line.chars() {
            if c.is_whitespace() {
                continue;
            }
            match Key::from_char(c) {
                Some(key) => session.press(key),
                None => println!("ignored key: {c}"),
            }
        }
        println!("{}", session.display());
    }
}
