//! Quicksort whose two recursive calls are a two-iteration loop.
//!
//! The halves are disjoint, so any execution order must still sort the
//! array. Each call prints its sub-array at its offset, which makes the
//! execution order visible.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use loopweave_core::{ScheduleError, Scheduler};

/// Larger arrays break the column alignment of the printout.
pub const MAX_ARRAY_SIZE: usize = 100;

/// Shared state of one sort run.
#[derive(Debug, Default)]
struct SortState {
    array: Vec<i64>,
    lines: Vec<String>,
}

type Shared = Rc<RefCell<SortState>>;

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRun {
    pub input: Vec<i64>,
    pub output: Vec<i64>,
    pub lines: Vec<String>,
}

impl SortRun {
    pub fn is_sorted(&self) -> bool {
        self.output.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Permutation of `0..size` from `size` random swaps.
pub fn gen_input(size: usize, seed: u64) -> Vec<i64> {
    let mut array: Vec<i64> = (0..size as i64).collect();
    if size == 0 {
        return array;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..size {
        let dest = rng.gen_range(0..size);
        array.swap(i, dest);
    }
    array
}

/// Sort `input` with the scheduler's policy, recording one line per call.
pub fn run(scheduler: &mut Scheduler, input: Vec<i64>) -> Result<SortRun, ScheduleError> {
    let state: Shared = Rc::new(RefCell::new(SortState {
        array: input.clone(),
        lines: Vec::new(),
    }));
    let len = input.len();
    quick_sort(scheduler, &state, 0, len)?;

    let SortState {
        array: output,
        mut lines,
    } = state.take();
    lines.push(format!("Result:   [{}]", render(&output)));
    Ok(SortRun {
        input,
        output,
        lines,
    })
}

fn quick_sort(
    scheduler: &mut Scheduler,
    state: &Shared,
    base: usize,
    size: usize,
) -> Result<(), ScheduleError> {
    let lt_size = {
        let mut st = state.borrow_mut();
        let line = format_call(&st.array, base, size);
        st.lines.push(line);
        if size <= 1 {
            return Ok(());
        }
        partition(&mut st.array, base, size)
    };

    let state = Rc::clone(state);
    scheduler.run_loop(0, 2, move |s, i| {
        if i == 0 {
            quick_sort(s, &state, base, lt_size)
        } else {
            quick_sort(s, &state, base + lt_size + 1, size - lt_size - 1)
        }
    })
}

/// Partition `array[base..base+size]` around its first element.
///
/// Returns how many elements are smaller than the pivot; the pivot ends up at
/// `base + returned`. Requires `size >= 2`.
fn partition(array: &mut [i64], base: usize, size: usize) -> usize {
    let pivot = array[base];
    let mut left = base + 1;
    let mut right = base + size - 1;

    loop {
        while left < right && array[left] < pivot {
            left += 1;
        }
        while right > left && array[right] >= pivot {
            right -= 1;
        }

        if left < right {
            array.swap(left, right);
            left += 1;
            right -= 1;
            continue;
        }

        if array[left] >= pivot {
            left -= 1;
        }
        array[base] = array[left];
        array[left] = pivot;
        return left - base;
    }
}

fn format_call(array: &[i64], base: usize, size: usize) -> String {
    let pad = |n: usize| "   ".repeat(n);
    format!(
        "QuickSort({}[{}]{});",
        pad(base),
        render(&array[base..base + size]),
        pad(array.len() - base - size)
    )
}

fn render(values: &[i64]) -> String {
    values.iter().map(|v| format!("{v:2},")).collect()
}

#[cfg(test)]
mod tests {
    use loopweave_core::{PolicyKind, SchedulerConfig};
    use rstest::rstest;

    use super::*;

    #[test]
    fn gen_input_is_a_seeded_permutation() {
        let a = gen_input(20, 5);
        assert_eq!(a, gen_input(20, 5));
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        assert!(gen_input(0, 5).is_empty());
    }

    #[test]
    fn partition_places_pivot() {
        let mut array = vec![5, 8, 1, 9, 3, 7, 2];
        let lt = partition(&mut array, 0, 7);
        assert_eq!(lt, 3);
        assert_eq!(array[3], 5);
        assert!(array[..3].iter().all(|&v| v < 5));
        assert!(array[4..].iter().all(|&v| v > 5));
    }

    #[test]
    fn format_call_aligns_by_offset() {
        let array = [3, 1, 2];
        assert_eq!(format_call(&array, 1, 1), "QuickSort(   [ 1,]   );");
        assert_eq!(format_call(&array, 0, 3), "QuickSort([ 3, 1, 2,]);");
    }

    #[rstest]
    fn sorts_under_every_policy(
        #[values(PolicyKind::DepthFirst, PolicyKind::BreadthFirst, PolicyKind::Random)]
        kind: PolicyKind,
        #[values(0, 1, 2, 17, 64)] size: usize,
        #[values(1, 42)] seed: u64,
    ) {
        let mut scheduler = Scheduler::new(SchedulerConfig::new(kind).with_seed(seed));
        let result = run(&mut scheduler, gen_input(size, seed)).unwrap();
        assert!(result.is_sorted(), "{:?}", result.output);
        assert_eq!(result.output, (0..size as i64).collect::<Vec<_>>());
        // One line per call plus the result line.
        assert!(result.lines.len() > size);
        assert_eq!(scheduler.depth(), 0);
    }

    #[test]
    fn depth_first_prints_calls_in_recursion_order() {
        let mut scheduler = Scheduler::new(SchedulerConfig::new(PolicyKind::DepthFirst));
        let result = run(&mut scheduler, vec![2, 0, 1]).unwrap();
        assert_eq!(
            result.lines,
            vec![
                "QuickSort([ 2, 0, 1,]);",
                "QuickSort([ 1, 0,]   );",
                "QuickSort([ 0,]      );",
                "QuickSort(      []   );",
                "QuickSort(         []);",
                "Result:   [ 0, 1, 2,]",
            ]
        );
    }
}
