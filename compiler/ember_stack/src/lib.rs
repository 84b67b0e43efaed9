//! Stack growth guard for recursive compilation.
//!
//! Casts compile their parenthesized argument as an independent
//! sub-expression, so both the lexer and the parser recurse once per level
//! of cast nesting. The nesting limit is host-configurable; wrapping each
//! recursive step in [`ensure_sufficient_stack`] keeps a generous limit from
//! turning into a native stack overflow.
//!
//! On WASM the guard is a plain call.

/// Run `f`, first moving to a fresh stack segment if the current one is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Grow when less than this much stack remains (64KB).
    const RED_ZONE: usize = 64 * 1024;

    /// Size of each newly allocated stack segment (512KB).
    const SEGMENT_SIZE: usize = 512 * 1024;

    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("lexer"));
        assert_eq!(result, Err("lexer"));
    }

    #[test]
    fn test_deep_nesting() {
        assert_eq!(nest(50_000), 50_000);
    }
}
