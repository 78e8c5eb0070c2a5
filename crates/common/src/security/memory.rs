//! Compiler fences placed around tag comparison and secret wiping.

/// Fences that keep the optimiser from moving secret-dependent work.
pub mod barrier {
    use core::sync::atomic::{compiler_fence, Ordering};

    /// Sequentially consistent compiler fence.
    #[inline(always)]
    pub fn compiler_fence_seq_cst() {
        compiler_fence(Ordering::SeqCst);
    }

    /// Runs `f` between two fences and hands back its value.
    #[inline(always)]
    pub fn with_barriers<T, F: FnOnce() -> T>(f: F) -> T {
        compiler_fence_seq_cst();
        let out = f();
        compiler_fence_seq_cst();
        out
    }

}
