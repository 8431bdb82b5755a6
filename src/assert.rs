//! The assertion engine: evaluate a binary relation between two values of
//! the same comparable type inside a running test; on mismatch, write one
//! structured diagnostic line to the test's failure log and halt the body.
//!
//! Operand rendering is dispatched on the *declared* type of the operands
//! at the call site, through the closed [`Render`] trait: integer and
//! unsigned families as decimal, floats as decimal fractions, text as
//! text, raw pointers as addresses. There is no runtime inspection and no
//! blanket impl; a kind is rendered its own way or the call does not
//! compile.

use crate::suite::{Halt, TestFlow, TestState};

/// The closed set of relations an assertion can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    fn holds<T: PartialOrd>(self, actual: &T, expected: &T) -> bool {
        match self {
            Relation::Eq => actual == expected,
            Relation::Ne => actual != expected,
            Relation::Lt => actual < expected,
            Relation::Le => actual <= expected,
            Relation::Gt => actual > expected,
            Relation::Ge => actual >= expected,
        }
    }

    /// Symbol of the negated relation, for the diagnostic line: a failed
    /// `Eq` check means the operands turned out to be `!=`.
    fn negated_symbol(self) -> &'static str {
        match self {
            Relation::Eq => "!=",
            Relation::Ne => "==",
            Relation::Lt => ">=",
            Relation::Le => ">",
            Relation::Gt => "<=",
            Relation::Ge => "<",
        }
    }
}

/// Compile-time dispatched rendering of assertion operands.
pub trait Render {
    fn render(&self) -> String;
}

macro_rules! render_as_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

render_as_display!(i8, i16, i32, i64, i128, isize);
render_as_display!(u8, u16, u32, u64, u128, usize);
render_as_display!(f32, f64);
render_as_display!(bool, char);

impl Render for &str {
    fn render(&self) -> String {
        (*self).to_string()
    }
}

impl Render for String {
    fn render(&self) -> String {
        self.clone()
    }
}

// Address fallback: anything without a printable kind can still be
// compared by pointer.
impl<T> Render for *const T {
    fn render(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T> Render for *mut T {
    fn render(&self) -> String {
        format!("{:p}", *self)
    }
}

/// Check one relation between two operands. If it holds, nothing happens.
/// If it does not, exactly one line of the form
///
/// ```text
///   Assertion failed: <actual> <negated-op> <expected> (<file>:<line>)
/// ```
///
/// is recorded on the test's failure log and the body is halted through
/// the returned [`Halt`]. Callers normally reach this through the
/// `check_*!` macros, which supply the source location and apply `?`.
pub fn check<T>(
    state: &mut TestState<'_>,
    actual: T,
    expected: T,
    relation: Relation,
    file: &str,
    line: u32,
) -> TestFlow
where
    T: Render + PartialOrd,
{
    if relation.holds(&actual, &expected) {
        return Ok(());
    }
    state.record_failure(&format!(
        "  Assertion failed: {} {} {} ({}:{})",
        actual.render(),
        relation.negated_symbol(),
        expected.render(),
        file,
        line
    ));
    Err(Halt)
}

/// Assert that two values are equal.
#[macro_export]
macro_rules! check_eq {
    ($state:expr, $actual:expr, $expected:expr $(,)?) => {
        $crate::assert::check(
            $state,
            $actual,
            $expected,
            $crate::assert::Relation::Eq,
            file!(),
            line!(),
        )?
    };
}

/// Assert that two values are not equal.
#[macro_export]
macro_rules! check_ne {
    ($state:expr, $actual:expr, $expected:expr $(,)?) => {
        $crate::assert::check(
            $state,
            $actual,
            $expected,
            $crate::assert::Relation::Ne,
            file!(),
            line!(),
        )?
    };
}

/// Assert that the first value is strictly less than the second.
#[macro_export]
macro_rules! check_lt {
    ($state:expr, $actual:expr, $expected:expr $(,)?) => {
        $crate::assert::check(
            $state,
            $actual,
            $expected,
            $crate::assert::Relation::Lt,
            file!(),
            line!(),
        )?
    };
}

/// Assert that the first value is less than or equal to the second.
#[macro_export]
macro_rules! check_le {
    ($state:expr, $actual:expr, $expected:expr $(,)?) => {
        $crate::assert::check(
            $state,
            $actual,
            $expected,
            $crate::assert::Relation::Le,
            file!(),
            line!(),
        )?
    };
}

/// Assert that the first value is strictly greater than the second.
#[macro_export]
macro_rules! check_gt {
    ($state:expr, $actual:expr, $expected:expr $(,)?) => {
        $crate::assert::check(
            $state,
            $actual,
            $expected,
            $crate::assert::Relation::Gt,
            file!(),
            line!(),
        )?
    };
}

/// Assert that the first value is greater than or equal to the second.
#[macro_export]
macro_rules! check_ge {
    ($state:expr, $actual:expr, $expected:expr $(,)?) => {
        $crate::assert::check(
            $state,
            $actual,
            $expected,
            $crate::assert::Relation::Ge,
            file!(),
            line!(),
        )?
    };
}
