//! Row fan-out shared by every per-row stage.
//!
//! Each row is an independent unit that reads shared immutable inputs and
//! produces its own output vector. With the `parallel` feature rows are
//! distributed over the rayon pool; otherwise they run in order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map `f` over `0..height` and collect the per-row results in order.
pub(crate) fn map_rows<T, F>(height: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..height).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..height).map(f).collect()
    }
}

/// Fallible variant of [`map_rows`]; the first error aborts the collection.
pub(crate) fn try_map_rows<T, E, F>(height: usize, f: F) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    F: Fn(usize) -> Result<T, E> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..height).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..height).map(f).collect()
    }
}

/// Run two independent closures, concurrently when `parallel` is enabled.
pub(crate) fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        rayon::join(a, b)
    }
    #[cfg(not(feature = "parallel"))]
    {
        (a(), b())
    }
}
