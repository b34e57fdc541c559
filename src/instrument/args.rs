//! Argument Rendering
//!
//! Turns call arguments into the text recorded in an operation's input history.

// == Repr ==
/// Literal, unambiguous rendering of a single argument.
///
/// Text is quoted and escaped, bytes render as `b"..."`, numbers plainly.
pub trait Repr {
    fn repr(&self) -> String;
}

impl Repr for str {
    fn repr(&self) -> String {
        format!("{:?}", self)
    }
}

impl Repr for String {
    fn repr(&self) -> String {
        self.as_str().repr()
    }
}

impl Repr for [u8] {
    fn repr(&self) -> String {
        format!("b\"{}\"", self.escape_ascii())
    }
}

impl Repr for Vec<u8> {
    fn repr(&self) -> String {
        self.as_slice().repr()
    }
}

impl Repr for f64 {
    fn repr(&self) -> String {
        format!("{:?}", self)
    }
}

impl<T: Repr + ?Sized> Repr for &T {
    fn repr(&self) -> String {
        (**self).repr()
    }
}

macro_rules! impl_repr_display {
    ($($ty:ty),*) => {
        $(impl Repr for $ty {
            fn repr(&self) -> String {
                self.to_string()
            }
        })*
    };
}

impl_repr_display!(i32, i64, u32, u64, usize, bool);

// == Call Args ==
/// Positional arguments of one tracked call.
pub trait CallArgs {
    /// Each positional argument, rendered with [`Repr`].
    fn positional(&self) -> Vec<String>;

    /// The whole argument list as a tuple literal: `()`, `(a,)`, `(a, b)`.
    fn render(&self) -> String {
        format_args_tuple(&self.positional())
    }
}

impl CallArgs for () {
    fn positional(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<A: Repr> CallArgs for (A,) {
    fn positional(&self) -> Vec<String> {
        vec![self.0.repr()]
    }
}

impl<A: Repr, B: Repr> CallArgs for (A, B) {
    fn positional(&self) -> Vec<String> {
        vec![self.0.repr(), self.1.repr()]
    }
}

impl<A: Repr, B: Repr, C: Repr> CallArgs for (A, B, C) {
    fn positional(&self) -> Vec<String> {
        vec![self.0.repr(), self.1.repr(), self.2.repr()]
    }
}

/// Formats rendered arguments as a tuple literal.
///
/// A single argument keeps its trailing comma so `(1,)` is never confused
/// with a parenthesized value.
pub fn format_args_tuple(args: &[String]) -> String {
    match args {
        [single] => format!("({},)", single),
        _ => format!("({})", args.join(", ")),
    }
}
