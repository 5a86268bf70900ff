//! Phase schedule compiled from a [`WorkoutConfig`].

use serde::Serialize;

use super::workout::WorkoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    WarmUp,
    Work,
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub label: String,
    pub duration_secs: u64,
    /// 1-based position among phases of the same kind.
    pub ordinal: u32,
}

/// Ordered phases plus totals computed once at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    phases: Vec<Phase>,
    total_secs: u64,
    work_count: usize,
    rest_count: usize,
}

impl Schedule {
    pub fn new(phases: Vec<Phase>) -> Self {
        let total_secs = phases.iter().map(|p| p.duration_secs).sum();
        let count = |kind: PhaseKind| phases.iter().filter(|p| p.kind == kind).count();
        let work_count = count(PhaseKind::Work);
        let rest_count = count(PhaseKind::Rest);
        Self {
            phases,
            total_secs,
            work_count,
            rest_count,
        }
    }

    /// Compile a workout into its phase sequence.
    ///
    /// Warm-up comes first when configured. Each work block is followed by
    /// a rest unless it is the last one or rest is zero. With
    /// `intervals == 0` (ruled out by [`WorkoutConfig::clamped`]) there are
    /// no work blocks, so the result holds at most the warm-up.
    pub fn build(config: &WorkoutConfig) -> Self {
        let mut phases = Vec::with_capacity(config.intervals as usize * 2 + 1);
        if config.warmup_secs > 0 {
            phases.push(Phase {
                kind: PhaseKind::WarmUp,
                label: "Warm-up".into(),
                duration_secs: config.warmup_secs,
                ordinal: 1,
            });
        }

        let rest_total = config.intervals.saturating_sub(1);
        let mut rest_ordinal = 0;
        for i in 1..=config.intervals {
            phases.push(Phase {
                kind: PhaseKind::Work,
                label: format!("Work {i}/{}", config.intervals),
                duration_secs: config.work_secs,
                ordinal: i,
            });
            if i < config.intervals && config.rest_secs > 0 {
                rest_ordinal += 1;
                phases.push(Phase {
                    kind: PhaseKind::Rest,
                    label: format!("Rest {rest_ordinal}/{rest_total}"),
                    duration_secs: config.rest_secs,
                    ordinal: rest_ordinal,
                });
            }
        }

        Self::new(phases)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn work_count(&self) -> usize {
        self.work_count
    }

    pub fn rest_count(&self) -> usize {
        self.rest_count
    }

    /// Seconds scheduled strictly after `index`.
    pub fn secs_after(&self, index: usize) -> u64 {
        self.phases
            .iter()
            .skip(index + 1)
            .map(|p| p.duration_secs)
            .sum()
    }

    /// Index of the last work phase, if any.
    pub fn last_work_index(&self) -> Option<usize> {
        self.phases.iter().rposition(|p| p.kind == PhaseKind::Work)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cfg(warmup: u64, work: u64, rest: u64, intervals: u32) -> WorkoutConfig {
        WorkoutConfig {
            warmup_secs: warmup,
            work_secs: work,
            rest_secs: rest,
            intervals,
        }
    }

    fn summary(s: &Schedule) -> Vec<(PhaseKind, String, u64)> {
        s.phases()
            .iter()
            .map(|p| (p.kind, p.label.clone(), p.duration_secs))
            .collect()
    }

    #[test]
    fn work_rest_alternation_without_warmup() {
        let s = Schedule::build(&cfg(0, 30, 10, 3));
        assert_eq!(
            summary(&s),
            vec![
                (PhaseKind::Work, "Work 1/3".into(), 30),
                (PhaseKind::Rest, "Rest 1/2".into(), 10),
                (PhaseKind::Work, "Work 2/3".into(), 30),
                (PhaseKind::Rest, "Rest 2/2".into(), 10),
                (PhaseKind::Work, "Work 3/3".into(), 30),
            ]
        );
        assert_eq!(s.total_secs(), 110);
        assert_eq!(s.work_count(), 3);
        assert_eq!(s.rest_count(), 2);
    }

    #[test]
    fn zero_rest_omits_rest_phases() {
        let s = Schedule::build(&cfg(5, 20, 0, 4));
        assert_eq!(
            summary(&s),
            vec![
                (PhaseKind::WarmUp, "Warm-up".into(), 5),
                (PhaseKind::Work, "Work 1/4".into(), 20),
                (PhaseKind::Work, "Work 2/4".into(), 20),
                (PhaseKind::Work, "Work 3/4".into(), 20),
                (PhaseKind::Work, "Work 4/4".into(), 20),
            ]
        );
        assert_eq!(s.rest_count(), 0);
        assert_eq!(s.total_secs(), 85);
    }

    #[test]
    fn single_interval_has_no_rest() {
        let s = Schedule::build(&cfg(0, 30, 45, 1));
        assert_eq!(s.len(), 1);
        assert_eq!(s.phases()[0].label, "Work 1/1");
    }

    #[test]
    fn zero_intervals_without_warmup_is_empty() {
        let s = Schedule::build(&cfg(0, 30, 10, 0));
        assert!(s.is_empty());
        assert_eq!(s.total_secs(), 0);
        assert_eq!(s.last_work_index(), None);
    }

    #[test]
    fn zero_intervals_keeps_only_warmup() {
        let s = Schedule::build(&cfg(10, 30, 10, 0));
        assert_eq!(summary(&s), vec![(PhaseKind::WarmUp, "Warm-up".into(), 10)]);
        assert_eq!(s.total_secs(), 10);
        assert_eq!(s.work_count(), 0);
        assert_eq!(s.last_work_index(), None);
    }

    #[test]
    fn ordinals_count_per_kind() {
        let s = Schedule::build(&cfg(3, 20, 10, 3));
        let ordinals: Vec<_> = s.phases().iter().map(|p| (p.kind, p.ordinal)).collect();
        assert_eq!(
            ordinals,
            vec![
                (PhaseKind::WarmUp, 1),
                (PhaseKind::Work, 1),
                (PhaseKind::Rest, 1),
                (PhaseKind::Work, 2),
                (PhaseKind::Rest, 2),
                (PhaseKind::Work, 3),
            ]
        );
    }

    #[test]
    fn secs_after_sums_the_tail() {
        let s = Schedule::build(&cfg(0, 30, 10, 3));
        assert_eq!(s.secs_after(0), 80);
        assert_eq!(s.secs_after(3), 30);
        assert_eq!(s.secs_after(4), 0);
        assert_eq!(s.secs_after(99), 0);
    }

    proptest! {
        #[test]
        fn schedule_shape_matches_config(
            warmup in 0u64..120,
            work in 5u64..600,
            rest in 0u64..120,
            intervals in 1u32..=20,
        ) {
            let s = Schedule::build(&cfg(warmup, work, rest, intervals));
            let n = intervals as usize;
            let expected = usize::from(warmup > 0) + n + if rest > 0 { n - 1 } else { 0 };
            prop_assert_eq!(s.len(), expected);
            prop_assert_eq!(s.work_count(), n);
            prop_assert_eq!(s.phases().last().map(|p| p.kind), Some(PhaseKind::Work));
            prop_assert_eq!(s.last_work_index(), Some(s.len() - 1));
            prop_assert_eq!(
                s.total_secs(),
                warmup + work * n as u64 + if rest > 0 { rest * (n as u64 - 1) } else { 0 }
            );
            if warmup > 0 {
                prop_assert_eq!(s.phases()[0].kind, PhaseKind::WarmUp);
            }
        }
    }
}
