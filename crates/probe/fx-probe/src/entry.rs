//! Callable entry points

/// Signature every probed symbol must have: `int32_t name(void)`
pub type EntryFn = extern "C" fn() -> i32;

/// A resolved entry point
///
/// Holds a copy of the function pointer. `origin` is borrowed from the
/// library the pointer was resolved from, which keeps the entry point from
/// outliving the mapping.
#[derive(Debug, Clone, Copy)]
pub struct EntryPoint<'lib> {
    /// Where the function lives, e.g. `libfx_answer.so` or `linked`
    origin: &'lib str,

    /// The function itself
    func: EntryFn,
}

impl<'lib> EntryPoint<'lib> {
    /// The fixture entry point linked into this binary
    pub fn linked() -> EntryPoint<'static> {
        EntryPoint::new("linked", fx_answer::fixture_entry_point)
    }

    /// Wraps a function pointer whose signature has already been checked
    pub fn new(origin: &'lib str, func: EntryFn) -> Self {
        Self { origin, func }
    }

    /// Calls the entry point
    pub fn call(&self) -> i32 {
        (self.func)()
    }

    /// Where this entry point came from
    pub fn origin(&self) -> &'lib str {
        self.origin
    }
}
