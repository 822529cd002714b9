//! Primitive leaf values
//!
//! Leaves carry either text or a number. Both render as a text node; the
//! kind still matters for change detection, since switching between text and
//! number counts as a change of node type.

use std::fmt;

use compact_str::{CompactString, format_compact};

/// Text or numeric leaf content
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Text content, rendered verbatim
    Text(CompactString),
    /// Numeric content, rendered with `Display`
    Number(f64),
}

impl Primitive {
    /// Whether both values are of the same primitive kind
    #[inline]
    pub fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Text(_), Self::Text(_)) | (Self::Number(_), Self::Number(_))
        )
    }

    /// String form placed into a live text node
    pub fn to_text(&self) -> CompactString {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_compact!("{n}"),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Primitive {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<CompactString> for Primitive {
    fn from(s: CompactString) -> Self {
        Self::Text(s)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(n: $ty) -> Self {
                    Self::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
