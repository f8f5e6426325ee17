//! Collection types for the triangulator's per-build working state.
//!
//! Everything here is scratch: created at the start of one build and dropped
//! when it returns, on success or error.

pub(crate) mod hull_hash;

use smallvec::SmallVec;

/// Small-optimized Vec that uses stack allocation for small collections.
///
/// Grows onto the heap once more than `N` elements are pushed.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<usize, 4> = SmallBuffer::new();
/// buffer.extend([1, 2, 3]);
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Inline capacity of the legalization edge stack.
///
/// Lawson flips after a single insertion rarely cascade beyond a few dozen
/// edges; deeper cascades spill onto the heap.
pub const EDGE_STACK_INLINE_CAPACITY: usize = 64;

/// Stack of pending half-edges during legalization.
pub type EdgeStack = SmallBuffer<usize, EDGE_STACK_INLINE_CAPACITY>;
