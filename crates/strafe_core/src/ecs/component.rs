// component.rs - Component marker trait
//
// The World keys storage columns by TypeId and holds instances as
// `Box<dyn Any + Send + Sync>`. Downcasts are checked on every access;
// a failed downcast reads as "component not present".

/// Marker trait for component types.
///
/// Blanket-implemented: anything owned, thread-safe, and `'static`
/// qualifies. Components carry no back-reference to their entity; systems
/// always look them up by entity id.
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}
