//! Construction and accessor macros
//!
//! - `h!` builds an element node from a tag, an attribute block and any
//!   number of children, the variadic form of `node::element`.
//! - `impl_enum_accessors!` generates `is_xxx`/`as_xxx`/`as_xxx_mut`
//!   methods for single-field enum variants.

/// Build an element `VNode`.
///
/// The attribute block is required when children follow, and may be empty.
/// Attribute values go through `Into<AttrValue>`: strings become literals,
/// an `EventHandler` becomes a handler. Children go through `Into<VNode>`.
///
/// # Example
/// ```ignore
/// let title = h!("h1", { "class" => "title" }, "仮想DOM実践入門");
/// let list = h!("ul", {}, h!("li", {}, 1), h!("li", {}, 2));
/// let empty = h!("br");
/// ```
#[macro_export]
macro_rules! h {
    ($tag:expr $(,)?) => {
        $crate::node::VNode::from($crate::node::Element::new($tag))
    };
    ($tag:expr, { $($key:expr => $value:expr),* $(,)? } $(, $child:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut elem = $crate::node::Element::new($tag);
        $( elem = elem.attr($key, $value); )*
        $( elem = elem.child($child); )*
        $crate::node::VNode::from(elem)
    }};
}

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with single-field variants
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// Boxed payloads are handed out as references to the boxed value.
///
/// # Example
/// ```ignore
/// impl VNode {
///     impl_enum_accessors!(element => Element(Element), leaf => Leaf(Primitive));
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($method:ident => $variant:ident($ty:ty)),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " $variant " node"]
                #[inline]
                pub fn [<is_ $method>](&self) -> bool {
                    matches!(self, Self::$variant(_))
                }

                #[doc = "Try to get as " $method " reference"]
                #[inline]
                pub fn [<as_ $method>](&self) -> Option<&$ty> {
                    match self { Self::$variant(v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $method " reference"]
                #[inline]
                pub fn [<as_ $method _mut>](&mut self) -> Option<&mut $ty> {
                    match self { Self::$variant(v) => Some(v), _ => None }
                }
            )*
        }
    };
}
