//! Running the toolchain on a thread with a large stack.
//!
//! The parser, resolver, formatter and code generator recurse once per nesting level of the source, and the
//! interpreter recurses once per Wabbit call. A compiled Wabbit program gets the whole native stack, so the
//! interpreter must not give up long before it would. The CLI and the interpreter entry points therefore run their
//! work through [`with_stack`], and the interpreter measures how much of that stack it has used instead of counting
//! calls against a fixed limit.

use std::io;
use std::panic;
use std::thread;

/// Stack size of the worker thread. Only the pages actually touched are committed.
pub const LARGE_STACK_SIZE: usize = 1024 * 1024 * 1024;

/// Headroom kept below the end of the stack for the frames between two [`stack_position`] checks.
pub const STACK_RESERVE: usize = 8 * 1024 * 1024;

/// Run `f` on a fresh thread with a [`LARGE_STACK_SIZE`] stack and return its result.
pub fn with_large_stack<T, F>(f: F) -> io::Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    with_stack(LARGE_STACK_SIZE, f)
}

/// Run `f` on a fresh thread with `stack_size` bytes of stack.
///
/// `f` may borrow from the caller. A panic inside `f` is resumed on the calling thread.
///
/// ## Errors
/// The operating system refused to create the thread.
pub fn with_stack<T, F>(stack_size: usize, f: F) -> io::Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("wabbit-worker".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, f)?;
        match handle.join() {
            Ok(value) => Ok(value),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

/// Usable recursion budget of a `stack_size` stack once [`STACK_RESERVE`] is set aside.
pub fn budget(stack_size: usize) -> usize {
    stack_size.saturating_sub(STACK_RESERVE.min(stack_size / 2))
}

/// Approximate address of the top of the current thread's stack.
///
/// Differences between two calls on the same thread give the stack used in between.
#[inline(never)]
pub fn stack_position() -> usize {
    let marker = 0u8;
    std::hint::black_box(std::ptr::addr_of!(marker)).addr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn nested(levels: usize) -> usize {
        let padding = std::hint::black_box([0u8; 256]);
        if levels == 0 {
            return stack_position();
        }
        nested(levels - 1) + usize::from(padding[0])
    }

    #[test]
    fn test_result_is_returned_from_worker() {
        let name = with_large_stack(|| thread::current().name().map(str::to_string)).unwrap();
        assert_eq!(name.as_deref(), Some("wabbit-worker"));
    }

    #[test]
    fn test_worker_borrows_from_caller() {
        let words = vec!["a", "b"];
        let joined = with_stack(1024 * 1024, || words.join("+")).unwrap();
        assert_eq!(joined, "a+b");
    }

    #[test]
    fn test_stack_position_tracks_depth() {
        let base = stack_position();
        let deep = nested(64);
        assert!(base.abs_diff(deep) >= 64 * 256, "{base:#x} vs {deep:#x}");
    }

    #[test]
    fn test_budget_keeps_headroom() {
        assert_eq!(budget(LARGE_STACK_SIZE), LARGE_STACK_SIZE - STACK_RESERVE);
        assert_eq!(budget(4 * 1024 * 1024), 2 * 1024 * 1024);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_panics_propagate() {
        let _ = with_stack(1024 * 1024, || -> i32 { panic!("boom") });
    }
}
