//! Tests for sequences traversed from a single thread.

pub mod common;

use common::{join, joined, strings};
use once_cell::unsync::OnceCell;
use runonce_core::{run_once, try_run_once, Collection, Frontier, Memo, RunOnce};
use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

const N: usize = 100;

#[test]
fn for_each() {
    let (runs, iter) = strings(N);
    let memo = iter.run_once();

    let mut count = 0;
    for _ in &memo {
        count += 1;
    }
    let mut count2 = 0;
    for _ in &memo {
        count2 += 1;
    }

    assert_eq!(count, N);
    assert_eq!(count2, N);
    runs.once(N);
}

#[test]
fn consecutive_join() {
    let (runs, iter) = strings(N);
    let memo = run_once(iter);

    assert_eq!(join(&memo), joined(N));
    assert_eq!(join(&memo), joined(N));
    runs.once(N);
}

#[test]
fn take_and_skip() {
    let (runs, iter) = strings(N);
    let memo = iter.run_once();

    let first_five: Vec<_> = memo.iter().take(5).collect();
    assert_eq!(first_five.len(), 5);
    runs.once(5);

    let second_ten: Vec<_> = memo.iter().skip(10).take(10).collect();
    assert_eq!(join(second_ten), (10..20).map(|i| i.to_string()).collect::<Vec<_>>().join(","));
    runs.once(20);

    let first_twenty: Vec<_> = memo.iter().take(20).collect();
    assert_eq!(first_twenty.len(), 20);
    runs.once(20);

    let all: Vec<_> = memo.iter().collect();
    assert_eq!(all.len(), N);
    runs.once(N);
}

#[test]
fn nested_loops() {
    let (runs, iter) = strings(10);
    let memo = iter.run_once();

    let mut pairs = 0;
    for x in &memo {
        for y in &memo {
            assert!(x.parse::<usize>().unwrap() < 10);
            assert!(y.parse::<usize>().unwrap() < 10);
            pairs += 1;
        }
    }
    assert_eq!(pairs, 100);
    runs.once(10);
}

#[test]
fn interleaved_traversals() {
    let (runs, iter) = strings(6);
    let memo = iter.run_once();

    let mut a = memo.iter();
    let mut b = memo.iter();
    assert_eq!(a.next().map(String::as_str), Some("0"));
    assert_eq!(a.next().map(String::as_str), Some("1"));
    assert_eq!(b.next().map(String::as_str), Some("0"));
    assert_eq!(a.next().map(String::as_str), Some("2"));
    runs.once(3);

    assert_eq!(join(b), "1,2,3,4,5");
    assert_eq!(join(a), "3,4,5");
    runs.once(6);
}

#[test]
fn random_access() {
    let (runs, iter) = strings(N);
    let memo = iter.run_once();

    assert_eq!(memo.get(41).map(String::as_str), Some("41"));
    runs.once(42);
    assert_eq!(memo.get(3).map(String::as_str), Some("3"));
    assert_eq!(memo.get(N), None);
    assert!(memo.is_exhausted());
    runs.once(N);
}

#[test]
fn len_materializes_once() {
    let (runs, iter) = strings(N);
    let memo = iter.run_once();

    assert!(!memo.is_empty());
    runs.once(1);
    assert_eq!(memo.len(), N);
    assert_eq!(memo.len(), N);
    runs.once(N);
}

#[test]
fn copy_to() {
    let (runs, iter) = strings(5);
    let memo = iter.run_once();

    let mut dst = vec![String::new(); 7];
    assert_eq!(memo.copy_to(&mut dst[2..]), Ok(5));
    assert_eq!(dst, ["", "", "0", "1", "2", "3", "4"]);

    let mut small = vec![String::new(); 4];
    let err = memo.copy_to(&mut small).unwrap_err();
    assert_eq!(
        err,
        runonce_core::Error::TooShort {
            needed: 5,
            available: 4
        }
    );
    assert_eq!(memo.to_vec(), ["0", "1", "2", "3", "4"]);
    runs.once(5);
}

#[test]
fn empty() {
    let memo = run_once(core::iter::empty::<u8>());
    assert!(memo.is_empty());
    assert_eq!(memo.len(), 0);
    assert_eq!(memo.iter().next(), None);
    assert_eq!(memo.copy_to(&mut []), Ok(0));
}

#[test]
fn materialized() {
    let (runs, iter) = strings(N);
    let v: Vec<String> = iter.collect();

    let memo: Memo<_> = (&v).into();
    assert!(memo.is_materialized());
    assert_eq!(join(&memo), joined(N));
    assert_eq!(join(&memo), joined(N));
    assert_eq!(memo.len(), N);
    assert_eq!(memo.to_vec(), v);

    let owned: Memo<_> = v.clone().into();
    assert!(owned.iter().eq(&v));
    let array: Memo<_> = [1, 2, 3].into();
    assert_eq!(array.iter().sum::<i32>(), 6);

    // a deque whose elements wrap around the end of its ring buffer
    let mut deque = VecDeque::with_capacity(N);
    v[N / 2..].iter().for_each(|x| deque.push_back(x.clone()));
    v[..N / 2].iter().rev().for_each(|x| deque.push_front(x.clone()));
    assert!(!deque.as_slices().1.is_empty());
    let memo: Memo<_> = (&deque).into();
    assert!(memo.is_materialized());
    assert_eq!(join(&memo), joined(N));
    assert_eq!(memo.get(N - 1), deque.back());
    assert_eq!(memo.len(), N);

    let set: BTreeSet<&str> = v.iter().map(String::as_str).collect();
    let memo: Memo<_> = (&set).into();
    assert!(memo.is_materialized());
    assert!(memo.iter().eq(&set));
    assert_eq!(memo.get(1), set.iter().nth(1));
    assert_eq!(memo.len(), N);

    let list: LinkedList<String> = v.iter().cloned().collect();
    let memo: Memo<_> = (&list).into();
    assert_eq!(join(&memo), joined(N));
    assert_eq!(memo.to_vec(), v);

    // reading the containers does not produce anything again
    runs.once(N);
}

#[test]
fn failures_are_not_recorded() {
    // the source fails once at every position divisible by 3
    let mut failed = Vec::new();
    let mut next = 0;
    let source = core::iter::from_fn(move || {
        if next == 7 {
            return None;
        }
        if next % 3 == 0 && !failed.contains(&next) {
            failed.push(next);
            return Some(Err(format!("failed at {next}")));
        }
        next += 1;
        Some(Ok(next - 1))
    });
    let memo = try_run_once(source);

    let mut iter = memo.try_iter();
    assert_eq!(iter.next(), Some(Err("failed at 0".to_string())));
    // retrying yields the element that failed before
    assert_eq!(iter.next(), Some(Ok(&0)));
    assert_eq!(iter.next(), Some(Ok(&1)));

    // the failure does not count as an element
    assert_eq!(memo.try_len(), Err("failed at 3".to_string()));
    assert_eq!(memo.try_to_vec(), Err("failed at 6".to_string()));
    assert_eq!(memo.try_len(), Ok(7));
    assert_eq!(memo.try_to_vec(), Ok((0..7).collect::<Vec<_>>()));

    // traversals that started earlier continue where they left
    let rest: Result<Vec<_>, _> = iter.collect();
    assert_eq!(rest, Ok(vec![&2, &3, &4, &5, &6]));
}

#[test]
fn mutation_rejected() {
    use runonce_core::error::{Error, Op};
    let (runs, iter) = strings(3);
    let mut memo = iter.run_once();

    assert!(memo.is_read_only());
    assert_eq!(memo.insert("x".into()), Err(Error::Unsupported(Op::Insert)));
    assert_eq!(memo.remove(&"0".into()), Err(Error::Unsupported(Op::Remove)));
    assert_eq!(memo.clear(), Err(Error::Unsupported(Op::Clear)));
    assert_eq!(memo.contains(&"0".into()), Err(Error::Unsupported(Op::Contains)));
    runs.once(0);

    let mut v: Memo<_> = vec![1].into();
    assert_eq!(v.insert(2), Err(Error::Unsupported(Op::Insert)));
    assert_eq!(v.to_vec(), [1]);
}

#[test]
fn covariant_view() {
    struct Parent(String);
    struct Child {
        parent: Parent,
    }

    fn describe<'a>(xs: impl IntoIterator<Item = &'a Parent>) -> String {
        xs.into_iter().map(|p| p.0.as_str()).collect::<Vec<_>>().join(",")
    }

    let memo = (0..N)
        .map(|i| Child {
            parent: Parent(i.to_string()),
        })
        .run_once();
    assert_eq!(describe(memo.iter().map(|c| &c.parent)), joined(N));
    assert_eq!(describe(memo.iter().map(|c| &c.parent)), joined(N));
}

#[test]
fn source_released_when_exhausted() {
    let guard = Arc::new(());
    let g = Arc::clone(&guard);
    let memo = (0..3)
        .map(move |x| {
            let _ = &g;
            x
        })
        .run_once();

    assert_eq!(Arc::strong_count(&guard), 2);
    assert_eq!(memo.iter().take(3).count(), 3);
    // the source has not yet returned `None`
    assert!(!memo.is_exhausted());
    assert_eq!(Arc::strong_count(&guard), 2);

    assert_eq!(memo.len(), 3);
    assert!(memo.is_exhausted());
    assert_eq!(Arc::strong_count(&guard), 1);
    assert_eq!(memo.to_vec(), [0, 1, 2]);
}

#[test]
#[should_panic]
fn reentrant_source_panics() {
    let cell: Rc<OnceCell<Memo<'static, u32>>> = Rc::new(OnceCell::new());
    let inner = Rc::clone(&cell);
    // while producing the second element, the source asks its own cache for more
    let memo = (0..10u32)
        .map(move |x| {
            if x == 1 {
                let _ = inner.get().and_then(|memo| memo.get(5));
            }
            x
        })
        .run_once();
    assert!(cell.set(memo).is_ok());

    let memo = cell.get().unwrap();
    assert_eq!(memo.get(0), Some(&0));
    let _ = memo.get(1);
}
