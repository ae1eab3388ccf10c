//! Value behind the exported entry point

pub mod detail {
    /// Not exported; only reachable through `fixture_entry_point`.
    pub const fn get_value() -> i32 {
        crate::ANSWER
    }
}
