/// Grow the stack when less than this much is left.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first moving onto a fresh stack segment if the current one is
/// nearly exhausted. Wraps the recursive entry points of the parser and
/// the evaluator so nesting depth is bounded by memory, not the host stack.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deep_recursion_does_not_overflow() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
        }

        assert_eq!(depth(200_000), 200_000);
    }
}
