//! Fragment planner.
//!
//! Places one ready job onto a candidate machine set by simulating a
//! concurrent execution front over the machines' gap lists. The
//! simulation advances from event to event, where an event is either
//! - the earliest moment a machine could *end* a minimum-size fragment
//!   (for machines not yet working on the job),
//! - the end of the current gap (for machines already working on it), or
//! - the projected completion of the job at the combined speed of the
//!   machines currently running it.
//!
//! Between events, work is drained at the combined speed. When a machine
//! joins, the stretch of gap between its fragment start and the event is
//! booked immediately — fragments may begin before the previous event
//! timestamp, inside free time other machines could not use.
//!
//! All arithmetic is integer; projected completions round up, so a
//! fragment may process slightly more than the job strictly needs (the
//! remainder tracker goes negative rather than fractional).
//!
//! The same routine serves trial and committed placements: without an
//! output buffer nothing is written through to the shared gap lists, so
//! the driver can compare candidate machines side-effect-free.

use tracing::trace;

use super::gaps::{GapLists, GapCursor};
use crate::models::JobFragment;

/// Equivalent of the unstable `i64::div_ceil`.
fn div_ceil_i64(lhs: i64, rhs: i64) -> i64 {
    let d = lhs / rhs;
    let r = lhs % rhs;
    if (r > 0 && rhs > 0) || (r < 0 && rhs < 0) {
        d + 1
    } else {
        d
    }
}

/// Machines a placement may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Candidates {
    /// Every machine of the instance (multi-machine splitting).
    All,
    /// Exactly one machine (pre-assigned, or chosen by trial placement).
    Single(usize),
}

/// Per-machine placement state, private to one `place_job` call.
struct MachineState {
    machine: usize,
    speed: i64,
    /// Wall-clock length of a minimum-size fragment on this machine.
    min_wall_clock: i64,
    /// Start of the fragment currently open on this machine, if any.
    current_fragment_start: Option<i64>,
    cursor: GapCursor,
}

/// Simulates (and, with an output buffer, commits) the placement of one
/// job. Returns its processing completion time.
///
/// `min_fragment_size` is the instance-wide setting; a non-preemptible
/// job must instead fit en bloc, so its whole size becomes the minimum.
/// Fragments are appended to `out` in `(end, machine)` order. Returns
/// `None` when no candidate machine can ever process the job (all
/// candidate speeds are zero and `size > 0`); in that case nothing has
/// been emitted or committed.
pub(crate) fn place_job(
    gaps: &mut GapLists,
    machine_speeds: &[i64],
    candidates: Candidates,
    size: i64,
    preemptible: bool,
    min_fragment_size: i64,
    earliest_start: i64,
    mut out: Option<&mut Vec<JobFragment>>,
) -> Option<i64> {
    let min_fragment = if preemptible {
        size.min(min_fragment_size)
    } else {
        size
    };
    let commit = out.is_some();

    let machine_indices: Vec<usize> = match candidates {
        Candidates::All => (0..machine_speeds.len()).collect(),
        Candidates::Single(machine) => vec![machine],
    };
    let mut machines: Vec<MachineState> = machine_indices
        .into_iter()
        .map(|machine| {
            let speed = machine_speeds[machine];
            MachineState {
                machine,
                speed,
                min_wall_clock: if speed > 0 {
                    div_ceil_i64(min_fragment, speed)
                } else {
                    0
                },
                current_fragment_start: None,
                cursor: gaps.cursor(machine),
            }
        })
        .collect();

    let mut current_speed: i64 = 0;
    let mut last_timestamp = earliest_start;
    let mut remaining = size;

    while remaining > 0 {
        // Earliest machine state change across the candidates. Strict
        // `<` keeps the first machine in candidate order on a tie.
        let mut machine_event: Option<(i64, usize)> = None;
        for (i, m) in machines.iter_mut().enumerate() {
            if m.speed == 0 {
                continue;
            }
            let t = if m.current_fragment_start.is_some() {
                gaps.gap_end(&m.cursor)
            } else {
                gaps.next_timestamp(&mut m.cursor, m.min_wall_clock, earliest_start)
            };
            if machine_event.is_none_or(|(best, _)| t < best) {
                machine_event = Some((t, i));
            }
        }

        let projected = if current_speed > 0 {
            last_timestamp.saturating_add(div_ceil_i64(remaining, current_speed))
        } else {
            i64::MAX
        };

        match machine_event {
            None if current_speed == 0 => {
                // Every candidate has speed 0: the job can never make
                // progress. Nothing has been emitted yet.
                return None;
            }
            Some((event_time, i)) if projected >= event_time => {
                remaining = remaining
                    .saturating_sub((event_time - last_timestamp).saturating_mul(current_speed));
                let m = &mut machines[i];
                if let Some(start) = m.current_fragment_start.take() {
                    // Gap exhausted: close the fragment at the boundary.
                    close_fragment(gaps, m, start, event_time, commit, &mut out);
                    current_speed -= m.speed;
                } else {
                    // Join: the stretch between the gap edge and the
                    // event is booked at once.
                    let fragment_start = earliest_start.max(gaps.gap_start(&m.cursor));
                    remaining = remaining
                        .saturating_sub((event_time - fragment_start).saturating_mul(m.speed));
                    m.current_fragment_start = Some(fragment_start);
                    current_speed += m.speed;
                }
                last_timestamp = event_time;
            }
            _ => {
                // The job finishes before any machine state changes.
                remaining = remaining
                    .saturating_sub((projected - last_timestamp).saturating_mul(current_speed));
                debug_assert!(remaining <= 0, "projected completion left work behind");
                last_timestamp = projected;
            }
        }
    }

    for m in &mut machines {
        if let Some(start) = m.current_fragment_start.take() {
            close_fragment(gaps, m, start, last_timestamp, commit, &mut out);
        }
    }
    Some(last_timestamp)
}

/// Finalises one fragment against the gap lists and reports it.
///
/// A zero-length fragment can arise when the earliest start falls
/// exactly on a gap boundary; it carries no work and is not reported.
fn close_fragment(
    gaps: &mut GapLists,
    m: &mut MachineState,
    start: i64,
    end: i64,
    commit: bool,
    out: &mut Option<&mut Vec<JobFragment>>,
) {
    gaps.finish_fragment(&mut m.cursor, start, end, commit);
    if start < end {
        if let Some(buffer) = out.as_deref_mut() {
            trace!(machine = m.machine, start, end, "fragment committed");
            buffer.push(JobFragment::processing(m.machine, start, end));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(machine: usize, start: i64, end: i64) -> JobFragment {
        JobFragment::processing(machine, start, end)
    }

    fn commit(
        gaps: &mut GapLists,
        speeds: &[i64],
        candidates: Candidates,
        size: i64,
        preemptible: bool,
        min_fragment: i64,
        earliest: i64,
    ) -> (Vec<JobFragment>, i64) {
        let mut fragments = Vec::new();
        let completion = place_job(
            gaps,
            speeds,
            candidates,
            size,
            preemptible,
            min_fragment,
            earliest,
            Some(&mut fragments),
        )
        .expect("placement must succeed");
        (fragments, completion)
    }

    #[test]
    fn test_single_machine_en_bloc() {
        let speeds = [2];
        let mut gaps = GapLists::new(1);
        let (fragments, completion) =
            commit(&mut gaps, &speeds, Candidates::Single(0), 4, true, 0, 0);
        assert_eq!(fragments, vec![frag(0, 0, 2)]);
        assert_eq!(completion, 2);
        assert_eq!(gaps.gaps_of(0), vec![(2, i64::MAX)]);
    }

    #[test]
    fn test_preemption_splits_around_busy_time() {
        let speeds = [1];
        let mut gaps = GapLists::new(1);
        // Blocker occupies [4, 6].
        commit(&mut gaps, &speeds, Candidates::Single(0), 2, true, 0, 4);
        let (fragments, completion) =
            commit(&mut gaps, &speeds, Candidates::Single(0), 4, true, 0, 1);
        assert_eq!(fragments, vec![frag(0, 1, 4), frag(0, 6, 7)]);
        assert_eq!(completion, 7);
    }

    #[test]
    fn test_non_preemptible_fills_a_sufficient_gap() {
        let speeds = [1];
        let mut gaps = GapLists::new(1);
        commit(&mut gaps, &speeds, Candidates::Single(0), 2, true, 0, 4);
        // [0, 4] holds 3 units from earliest 1.
        let (fragments, _) = commit(&mut gaps, &speeds, Candidates::Single(0), 3, false, 0, 1);
        assert_eq!(fragments, vec![frag(0, 1, 4)]);
    }

    #[test]
    fn test_non_preemptible_skips_a_short_gap() {
        let speeds = [1];
        let mut gaps = GapLists::new(1);
        commit(&mut gaps, &speeds, Candidates::Single(0), 2, true, 0, 4);
        // 4 units no longer fit before the blocker; the job must wait.
        let (fragments, completion) =
            commit(&mut gaps, &speeds, Candidates::Single(0), 4, false, 0, 1);
        assert_eq!(fragments, vec![frag(0, 6, 10)]);
        assert_eq!(completion, 10);
    }

    #[test]
    fn test_multi_machine_concurrent_placement() {
        let speeds = [10, 1];
        let mut gaps = GapLists::new(2);
        // Fast machine is busy during [1, 2].
        commit(&mut gaps, &speeds, Candidates::Single(0), 10, true, 0, 1);
        let (fragments, completion) = commit(&mut gaps, &speeds, Candidates::All, 23, true, 0, 0);
        assert_eq!(
            fragments,
            vec![frag(0, 0, 1), frag(0, 2, 3), frag(1, 0, 3)]
        );
        assert_eq!(completion, 3);
    }

    #[test]
    fn test_minimum_fragment_pads_the_start_booking() {
        let speeds = [1];
        let mut gaps = GapLists::new(1);
        let (fragments, completion) =
            commit(&mut gaps, &speeds, Candidates::Single(0), 5, true, 3, 0);
        assert_eq!(fragments, vec![frag(0, 0, 5)]);
        assert_eq!(completion, 5);
    }

    #[test]
    fn test_minimum_fragment_skips_a_narrow_gap() {
        let speeds = [1];
        let mut gaps = GapLists::new(1);
        commit(&mut gaps, &speeds, Candidates::Single(0), 2, true, 0, 2);
        // [0, 2] cannot host a fragment of at least 3 units.
        let (fragments, _) = commit(&mut gaps, &speeds, Candidates::Single(0), 5, true, 3, 0);
        assert_eq!(fragments, vec![frag(0, 4, 9)]);
    }

    #[test]
    fn test_trial_run_leaves_gaps_untouched() {
        let speeds = [1];
        let mut gaps = GapLists::new(1);
        let trial = place_job(&mut gaps, &speeds, Candidates::Single(0), 4, true, 0, 1, None)
            .expect("trial must succeed");
        assert_eq!(gaps.gaps_of(0), vec![(0, i64::MAX)]);
        // The committed run reproduces the trial's completion time.
        let (_, completion) = commit(&mut gaps, &speeds, Candidates::Single(0), 4, true, 0, 1);
        assert_eq!(trial, completion);
        assert_eq!(completion, 5);
    }

    #[test]
    fn test_zero_size_emits_nothing() {
        let speeds = [3];
        let mut gaps = GapLists::new(1);
        let (fragments, completion) =
            commit(&mut gaps, &speeds, Candidates::Single(0), 0, true, 0, 7);
        assert!(fragments.is_empty());
        assert_eq!(completion, 7);
        assert_eq!(gaps.gaps_of(0), vec![(0, i64::MAX)]);
    }

    #[test]
    fn test_all_zero_speeds_cannot_place() {
        let speeds = [0, 0];
        let mut gaps = GapLists::new(2);
        assert_eq!(
            place_job(&mut gaps, &speeds, Candidates::All, 1, true, 0, 0, None),
            None
        );
        assert_eq!(
            place_job(&mut gaps, &speeds, Candidates::Single(1), 1, true, 0, 0, None),
            None
        );
    }

    #[test]
    fn test_zero_speed_machine_is_skipped() {
        let speeds = [0, 2];
        let mut gaps = GapLists::new(2);
        let (fragments, completion) = commit(&mut gaps, &speeds, Candidates::All, 4, true, 0, 0);
        assert_eq!(fragments, vec![frag(1, 0, 2)]);
        assert_eq!(completion, 2);
    }

    #[test]
    fn test_rounding_overshoot_is_bounded() {
        // Speed 2 cannot hit an odd size exactly; the fragment rounds up
        // to the next integer timestamp.
        let speeds = [2];
        let mut gaps = GapLists::new(1);
        let (fragments, completion) =
            commit(&mut gaps, &speeds, Candidates::Single(0), 3, true, 0, 0);
        assert_eq!(fragments, vec![frag(0, 0, 2)]);
        assert_eq!(completion, 2);
    }
}
