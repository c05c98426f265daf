//! Keypad input handling.
//!
//! A [`Session`] holds the transient state of one calculator surface between
//! button presses: the display text, the latched first operand, the pending
//! operator, and whether the next digit starts a fresh entry. Surfaces
//! dispatch every button through [`Session::press`].

use super::arith::{self, Operator};

/// Shown when an operation resolves to an invalid result.
pub const ERROR_DISPLAY: &str = "Error";

/// Which optional keys a keypad surface offers.
///
/// The controller always implements the full union of operations; a layout
/// only gates which keys [`Session::press`] will act on, so the two page
/// variants stay a configuration rather than two controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Sign toggle and percentage, no backspace.
    Standard,
    /// Backspace, no sign toggle or percentage.
    Dashboard,
    /// Every key. Used by the terminal keypad.
    Full,
}

impl Layout {
    /// Whether this layout offers the given key.
    pub fn supports(&self, key: Key) -> bool {
        match key {
            Key::Backspace => matches!(self, Self::Dashboard | Self::Full),
            Key::ToggleSign | Key::Percent => matches!(self, Self::Standard | Self::Full),
            _ => true,
        }
    }
}

/// A single keypad press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Op(Operator),
    Equals,
    Clear,
    Backspace,
    ToggleSign,
    Percent,
}

impl Key {
    /// Map a single typed character to a key.
    ///
    /// `c` clears, `<` is backspace, `~` toggles the sign. Operator symbols
    /// go through [`Operator::from_symbol`], so the `×`/`÷` glyphs work too.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            '<' => Some(Self::Backspace),
            '~' => Some(Self::ToggleSign),
            '%' => Some(Self::Percent),
            _ => {
                let mut buf = [0u8; 4];
                Operator::from_symbol(c.encode_utf8(&mut buf)).map(Self::Op)
            }
        }
    }
}

/// The input state of one calculator surface.
///
/// All mutations happen in place; the caller reads the result back through
/// [`Session::display`]. The session is single-threaded and synchronous,
/// one instance per active surface.
#[derive(Clone, Debug)]
pub struct Session {
    layout: Layout,
    display: String,
    pending: Option<f64>,
    op: Option<Operator>,
    awaiting_operand: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session offering every key.
    pub fn new() -> Self {
        Self::with_layout(Layout::Full)
    }

    /// A fresh session restricted to one keypad layout.
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            display: "0".to_string(),
            pending: None,
            op: None,
            awaiting_operand: false,
        }
    }

    /// The current display text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Dispatch one keypad press. Keys the layout does not offer are ignored.
    pub fn press(&mut self, key: Key) {
        if !self.layout.supports(key) {
            return;
        }
        match key {
            Key::Digit(d) => self.press_digit(d),
            Key::Decimal => self.press_decimal(),
            Key::Op(op) => self.choose_operator(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.percentage(),
        }
    }

    /// Enter one digit (0-9).
    ///
    /// Starts a fresh entry after an operator or an error, collapses a
    /// leading `"0"`, and appends otherwise.
    pub fn press_digit(&mut self, digit: u8) {
        debug_assert!(digit < 10, "digit out of range: {digit}");
        let d = char::from(b'0' + digit);
        if self.awaiting_operand {
            self.display.clear();
            self.display.push(d);
            self.awaiting_operand = false;
        } else if self.display == "0" {
            self.display.clear();
            self.display.push(d);
        } else {
            self.display.push(d);
        }
    }

    /// Enter the decimal point. At most one per entry.
    pub fn press_decimal(&mut self) {
        if self.awaiting_operand {
            self.display.replace_range(.., "0.");
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Reset the whole session to its initial state. The layout survives.
    pub fn clear(&mut self) {
        *self = Self::with_layout(self.layout);
    }

    /// Drop the last entered character, bottoming out at `"0"`.
    pub fn backspace(&mut self) {
        if self.display.chars().count() > 1 {
            self.display.pop();
        } else {
            self.display.replace_range(.., "0");
        }
    }

    /// Latch an operator, folding any completed operation first.
    ///
    /// Pressing another operator while still waiting for the second operand
    /// just replaces the pending operator. Chains fold strictly left to
    /// right; there is no precedence.
    pub fn choose_operator(&mut self, next: Operator) {
        let input_value = self.parse_display();

        if self.pending.is_none() {
            match input_value {
                Some(value) => self.pending = Some(value),
                // Nothing usable on the display and nothing latched; an
                // operator press has no operand to apply to.
                None => return,
            }
        } else if let (Some(a), Some(op)) = (self.pending, self.op) {
            if !self.awaiting_operand {
                let b = input_value.unwrap_or(f64::NAN);
                let result = arith::evaluate(a, op, b);
                if !result.is_finite() {
                    self.enter_error_state();
                    return;
                }
                self.display = format_value(result);
                self.pending = Some(result);
            }
        }

        self.awaiting_operand = true;
        self.op = Some(next);
    }

    /// Resolve the pending operation.
    ///
    /// Does nothing unless a first operand and an operator are latched and a
    /// second operand has been entered.
    pub fn equals(&mut self) {
        let (Some(a), Some(op)) = (self.pending, self.op) else {
            return;
        };
        if self.awaiting_operand {
            return;
        }

        let b = self.parse_display().unwrap_or(f64::NAN);
        let result = arith::evaluate(a, op, b);
        if !result.is_finite() {
            self.enter_error_state();
            return;
        }

        self.display = format_value(result);
        self.pending = None;
        self.op = None;
        self.awaiting_operand = false;
    }

    /// Negate the displayed value.
    pub fn toggle_sign(&mut self) {
        if let Some(value) = self.parse_display() {
            self.display = format_value(-value);
        }
    }

    /// Divide the displayed value by 100.
    pub fn percentage(&mut self) {
        if let Some(value) = self.parse_display() {
            self.display = format_value(value / 100.0);
        }
    }

    fn parse_display(&self) -> Option<f64> {
        self.display.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Show the error literal and drop the pending operation so the next
    /// digit starts a fresh entry.
    fn enter_error_state(&mut self) {
        self.display.replace_range(.., ERROR_DISPLAY);
        self.pending = None;
        self.op = None;
        self.awaiting_operand = true;
    }
}

/// Display text for a value, using the shortest round-trip formatting.
///
/// Negative zero renders as `"0"` so sign-toggling zero stays a no-op.
fn format_value(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(session: &mut Session, keys: &str) {
        for c in keys.chars() {
            session.press(Key::from_char(c).expect("unknown key in test"));
        }
    }

    #[test]
    fn test_initial_display() {
        assert_eq!(Session::new().display(), "0");
    }

    #[test]
    fn test_leading_zero_collapses() {
        let mut s = Session::new();
        s.press_digit(0);
        assert_eq!(s.display(), "0");
        s.press_digit(7);
        assert_eq!(s.display(), "7");
        s.press_digit(0);
        assert_eq!(s.display(), "70");
    }

    #[test]
    fn test_decimal_is_idempotent() {
        let mut s = Session::new();
        s.press_digit(3);
        s.press_decimal();
        assert_eq!(s.display(), "3.");
        s.press_decimal();
        assert_eq!(s.display(), "3.");
        s.press_digit(5);
        assert_eq!(s.display(), "3.5");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh_entry() {
        let mut s = Session::new();
        press_all(&mut s, "7+");
        s.press_decimal();
        assert_eq!(s.display(), "0.");
        s.press_digit(5);
        assert_eq!(s.display(), "0.5");
    }

    #[test]
    fn test_simple_addition() {
        let mut s = Session::new();
        press_all(&mut s, "5+3=");
        assert_eq!(s.display(), "8");
    }

    #[test]
    fn test_decimal_arithmetic() {
        let mut s = Session::new();
        press_all(&mut s, "1.5*4=");
        assert_eq!(s.display(), "6");
    }

    #[test]
    fn test_chained_operations_fold_left_to_right() {
        let mut s = Session::new();
        // 2 + 3 * 4 folds as (2 + 3) * 4, no precedence.
        press_all(&mut s, "2+3*4=");
        assert_eq!(s.display(), "20");
    }

    #[test]
    fn test_operator_repress_replaces_pending_operator() {
        let mut s = Session::new();
        press_all(&mut s, "9-+1=");
        assert_eq!(s.display(), "10");
    }

    #[test]
    fn test_division_by_zero_shows_error_then_fresh_entry() {
        let mut s = Session::new();
        press_all(&mut s, "7/0=");
        assert_eq!(s.display(), ERROR_DISPLAY);
        s.press_digit(2);
        assert_eq!(s.display(), "2");
        // The failed operation is fully discarded.
        press_all(&mut s, "+1=");
        assert_eq!(s.display(), "3");
    }

    #[test]
    fn test_division_by_zero_while_chaining() {
        let mut s = Session::new();
        // The error surfaces on the operator press that folds 8 / 0.
        press_all(&mut s, "8/0+");
        assert_eq!(s.display(), ERROR_DISPLAY);
        // The pressed operator was not latched; equals has nothing to do.
        press_all(&mut s, "5=");
        assert_eq!(s.display(), "5");
    }

    #[test]
    fn test_equals_without_pending_operation_is_noop() {
        let mut s = Session::new();
        press_all(&mut s, "5=");
        assert_eq!(s.display(), "5");
    }

    #[test]
    fn test_equals_before_second_operand_is_noop() {
        let mut s = Session::new();
        press_all(&mut s, "5+=");
        assert_eq!(s.display(), "5");
        // The operation is still pending and resolves normally afterwards.
        press_all(&mut s, "3=");
        assert_eq!(s.display(), "8");
    }

    #[test]
    fn test_result_feeds_next_operation() {
        let mut s = Session::new();
        press_all(&mut s, "5+3=");
        assert_eq!(s.display(), "8");
        press_all(&mut s, "*2=");
        assert_eq!(s.display(), "16");
    }

    #[test]
    fn test_toggle_sign_round_trip() {
        let mut s = Session::new();
        s.press_digit(4);
        s.toggle_sign();
        assert_eq!(s.display(), "-4");
        s.toggle_sign();
        assert_eq!(s.display(), "4");
    }

    #[test]
    fn test_toggle_sign_on_zero_stays_zero() {
        let mut s = Session::new();
        s.toggle_sign();
        assert_eq!(s.display(), "0");
    }

    #[test]
    fn test_percentage() {
        let mut s = Session::new();
        press_all(&mut s, "50");
        s.percentage();
        assert_eq!(s.display(), "0.5");
    }

    #[test]
    fn test_percentage_on_error_display_is_noop() {
        let mut s = Session::new();
        press_all(&mut s, "1/0=");
        assert_eq!(s.display(), ERROR_DISPLAY);
        s.percentage();
        assert_eq!(s.display(), ERROR_DISPLAY);
    }

    #[test]
    fn test_backspace() {
        let mut s = Session::new();
        press_all(&mut s, "123");
        s.backspace();
        assert_eq!(s.display(), "12");
        s.backspace();
        s.backspace();
        assert_eq!(s.display(), "0");
        s.backspace();
        assert_eq!(s.display(), "0");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut s = Session::new();
        press_all(&mut s, "12+34");
        s.clear();
        assert_eq!(s.display(), "0");
        // No operation survives the clear.
        press_all(&mut s, "=");
        assert_eq!(s.display(), "0");
        press_all(&mut s, "5=");
        assert_eq!(s.display(), "5");
    }

    #[test]
    fn test_operator_press_on_error_display_is_ignored() {
        let mut s = Session::new();
        press_all(&mut s, "3/0=");
        assert_eq!(s.display(), ERROR_DISPLAY);
        // No operand is latched from the error text.
        press_all(&mut s, "+");
        press_all(&mut s, "4=");
        assert_eq!(s.display(), "4");
    }

    #[test]
    fn test_standard_layout_ignores_backspace() {
        let mut s = Session::with_layout(Layout::Standard);
        press_all(&mut s, "12");
        s.press(Key::Backspace);
        assert_eq!(s.display(), "12");
        s.press(Key::Percent);
        assert_eq!(s.display(), "0.12");
    }

    #[test]
    fn test_dashboard_layout_ignores_sign_and_percent() {
        let mut s = Session::with_layout(Layout::Dashboard);
        press_all(&mut s, "50");
        s.press(Key::Percent);
        assert_eq!(s.display(), "50");
        s.press(Key::ToggleSign);
        assert_eq!(s.display(), "50");
        s.press(Key::Backspace);
        assert_eq!(s.display(), "5");
    }

    #[test]
    fn test_key_characters() {
        assert_eq!(Key::from_char('7'), Some(Key::Digit(7)));
        assert_eq!(Key::from_char('÷'), Some(Key::Op(Operator::Divide)));
        assert_eq!(Key::from_char('~'), Some(Key::ToggleSign));
        assert_eq!(Key::from_char('<'), Some(Key::Backspace));
        assert_eq!(Key::from_char('='), Some(Key::Equals));
        assert_eq!(Key::from_char('a'), None);
    }
}
