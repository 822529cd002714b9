//! Virtual node model
//!
//! A virtual tree is made of `VNode`s: either an `Element` with attributes
//! and ordered children, or a `Primitive` leaf holding text or a number.
//! Virtual nodes are plain immutable data. They are rebuilt every render
//! pass and never touched by the reconciler.

mod element;
mod primitive;

pub use element::{Element, VALUE_ATTR};
pub use primitive::Primitive;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::{AttrKey, AttrValue, AttrsExt};

/// Tag name of an element
pub type Tag = CompactString;

/// Type alias for children collection.
pub type Children = SmallVec<[VNode; 4]>;

/// Node in a virtual tree - either Element or Leaf.
#[derive(Debug, Clone)]
pub enum VNode {
    /// Element with tag, attributes and children
    Element(Box<Element>),
    /// Text or number leaf
    Leaf(Primitive),
}

impl VNode {
    // Generates for each variant (element -> Element, leaf -> Leaf):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    impl_enum_accessors!(element => Element(Element), leaf => Leaf(Primitive));

    /// Children of an element; leaves have none
    pub fn children(&self) -> &[VNode] {
        match self {
            Self::Element(e) => &e.children,
            Self::Leaf(_) => &[],
        }
    }
}

/// Build an element node from a tag, attributes and ordered children.
///
/// Fields are taken verbatim. When the attribute list repeats a key the
/// later value wins.
///
/// ```ignore
/// let node = element("h1", [("class", "title".into())], ["Hello"]);
/// ```
pub fn element<K, C>(
    tag: impl Into<Tag>,
    attrs: impl IntoIterator<Item = (K, AttrValue)>,
    children: impl IntoIterator<Item = C>,
) -> VNode
where
    K: Into<AttrKey>,
    C: Into<VNode>,
{
    let mut elem = Element::new(tag);
    for (key, value) in attrs {
        elem.attrs.set_attr(key, value);
    }
    elem.children.extend(children.into_iter().map(Into::into));
    VNode::from(elem)
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Element> for VNode {
    fn from(e: Element) -> Self {
        Self::Element(Box::new(e))
    }
}

impl From<Box<Element>> for VNode {
    fn from(e: Box<Element>) -> Self {
        Self::Element(e)
    }
}

impl From<Primitive> for VNode {
    fn from(p: Primitive) -> Self {
        Self::Leaf(p)
    }
}

// Everything a `Primitive` converts from becomes a leaf.
macro_rules! impl_leaf_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for VNode {
                fn from(v: $ty) -> Self {
                    Self::Leaf(Primitive::from(v))
                }
            }
        )*
    };
}

impl_leaf_from!(&str, String, CompactString);
impl_leaf_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
