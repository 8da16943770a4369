use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records how often every value of a source was produced.
#[derive(Clone)]
pub struct Runs(Arc<Vec<AtomicUsize>>);

impl Runs {
    pub fn new(n: usize) -> Self {
        Self(Arc::new((0..n).map(|_| AtomicUsize::new(0)).collect()))
    }

    fn hit(&self, i: usize) {
        self.0[i].fetch_add(1, Ordering::SeqCst);
    }

    /// Number of values that were produced at least once.
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|r| r.load(Ordering::SeqCst) > 0).count()
    }

    /// Total number of times that any value was produced.
    pub fn total(&self) -> usize {
        self.0.iter().map(|r| r.load(Ordering::SeqCst)).sum()
    }

    /// Assert that `n` values were produced, each of them exactly once.
    pub fn once(&self, n: usize) {
        assert_eq!(self.distinct(), n, "must be {n} run counts");
        assert_eq!(self.total(), n, "all run counts must be 1");
    }
}

/// Produce the numbers `0..n` as strings, recording every production.
pub fn strings(n: usize) -> (Runs, impl Iterator<Item = String> + Send) {
    let runs = Runs::new(n);
    let r = runs.clone();
    let iter = (0..n).map(move |i| {
        r.hit(i);
        i.to_string()
    });
    (runs, iter)
}

/// The numbers `0..n`, separated by commas.
pub fn joined(n: usize) -> String {
    (0..n).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}

pub fn join<'a>(xs: impl IntoIterator<Item = &'a String>) -> String {
    xs.into_iter().map(|s| s.as_str()).collect::<Vec<_>>().join(",")
}
