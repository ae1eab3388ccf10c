//! Native entry point fixture
//!
//! Exports a single C-ABI symbol, [`fixture_entry_point`], that takes no
//! arguments and always returns [`ANSWER`]. The crate is built as an rlib, a
//! cdylib and a staticlib so the same symbol can be called from Rust, loaded
//! at runtime, or linked into a foreign binary.
//!
//! The entry point performs no I/O and no allocation, holds no state and
//! cannot fail. It is safe to call from any number of threads at once.

mod value;

/// The value every call to [`fixture_entry_point`] returns
pub const ANSWER: i32 = 42;

/// Name of the exported symbol, as seen by a dynamic loader
pub const ENTRY_POINT_SYMBOL: &str = "fixture_entry_point";

/// C-ABI entry point
///
/// Equivalent to `int32_t fixture_entry_point(void)` on the C side.
#[allow(unsafe_code, reason = "exporting an unmangled symbol is the point of this crate")]
#[unsafe(no_mangle)]
pub extern "C" fn fixture_entry_point() -> i32 {
    value::detail::get_value()
}
