//! Grouping of one-dimensional intervals into bands.
//!
//! Banding runs in two phases per axis:
//!
//! 1. [`merge_bands`] sweeps the intervals in (start, end) order and merges
//!    every interval that overlaps the band being built into it, producing
//!    maximal disjoint bands. Each band is a connected set of overlapping
//!    intervals whatever order they were given in.
//! 2. [`check_band`] verifies that every member of a band overlaps every
//!    other member. A band that fails this was chained together by a member
//!    that overlaps two members which do not overlap each other; that member
//!    straddles a boundary the others imply and is reported.

use serde::{Deserialize, Serialize};

/// How two intervals must relate to fall into the same band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandOverlap {
    /// Open intervals must intersect; sharing an edge keeps them apart.
    #[default]
    Strict,
    /// Closed intervals must intersect; sharing an edge merges them.
    Touching,
}

impl BandOverlap {
    /// Whether an interval ending at `end` and one starting at `start`
    /// (with `start` not before the first one's start) belong together.
    fn joins(self, end: f64, start: f64) -> bool {
        match self {
            BandOverlap::Strict => start < end,
            BandOverlap::Touching => start <= end,
        }
    }

    pub(crate) fn overlaps(self, a: Interval, b: Interval) -> bool {
        self.joins(a.end, b.start) && self.joins(b.end, a.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(a: f64, b: f64) -> Self {
        Interval {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

/// A maximal run of mutually chained intervals on one axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Band {
    pub start: f64,
    pub end: f64,
    /// Indices into the interval slice, in ascending order.
    pub members: Vec<usize>,
}

/// Merge intervals into disjoint bands ordered by ascending position.
pub(crate) fn merge_bands(intervals: &[Interval], overlap: BandOverlap) -> Vec<Band> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&a, &b| {
        let (x, y) = (intervals[a], intervals[b]);
        x.start
            .total_cmp(&y.start)
            .then(x.end.total_cmp(&y.end))
            .then(a.cmp(&b))
    });

    let mut bands: Vec<Band> = Vec::new();
    for idx in order {
        let interval = intervals[idx];
        match bands.last_mut() {
            Some(band) if overlap.joins(band.end, interval.start) => {
                band.end = band.end.max(interval.end);
                band.members.push(idx);
            }
            _ => bands.push(Band {
                start: interval.start,
                end: interval.end,
                members: vec![idx],
            }),
        }
    }

    for band in &mut bands {
        band.members.sort_unstable();
    }
    bands
}

/// Confirm all members of `band` pairwise overlap.
///
/// Returns the index of a straddling member otherwise: the first member
/// whose own neighbours do not all overlap each other. A connected band that
/// is not a clique always has one.
pub(crate) fn check_band(
    band: &Band,
    intervals: &[Interval],
    overlap: BandOverlap,
) -> Result<(), usize> {
    let members: Vec<Interval> = band.members.iter().map(|&i| intervals[i]).collect();
    if is_clique(&members, overlap) {
        return Ok(());
    }

    let straddler = band.members.iter().copied().find(|&candidate| {
        let neighbours: Vec<Interval> = band
            .members
            .iter()
            .filter(|&&other| other != candidate)
            .map(|&other| intervals[other])
            .filter(|&other| overlap.overlaps(intervals[candidate], other))
            .collect();
        !is_clique(&neighbours, overlap)
    });
    straddler.map_or(Ok(()), Err)
}

/// Whether every interval overlaps every other one.
///
/// Pairwise overlap holds exactly when the latest start lies before the
/// earliest end of a *different* interval, so one pass suffices.
fn is_clique(intervals: &[Interval], overlap: BandOverlap) -> bool {
    if intervals.len() < 2 {
        return true;
    }

    let latest = arg_best(intervals, None, |a, b| a.start > b.start);
    let earliest = arg_best(intervals, None, |a, b| a.end < b.end);
    if latest != earliest {
        return overlap.joins(intervals[earliest].end, intervals[latest].start);
    }

    // One interval both starts last and ends first; compare it with the
    // runner-up on each side rather than with itself.
    let k = latest;
    let next_start = arg_best(intervals, Some(k), |a, b| a.start > b.start);
    let next_end = arg_best(intervals, Some(k), |a, b| a.end < b.end);
    overlap.joins(intervals[next_end].end, intervals[k].start)
        && overlap.joins(intervals[k].end, intervals[next_start].start)
}

fn arg_best(
    intervals: &[Interval],
    skip: Option<usize>,
    better: impl Fn(&Interval, &Interval) -> bool,
) -> usize {
    let mut best: Option<usize> = None;
    for (i, interval) in intervals.iter().enumerate() {
        if Some(i) == skip {
            continue;
        }
        match best {
            Some(b) if !better(interval, &intervals[b]) => {}
            _ => best = Some(i),
        }
    }
    best.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: f64, end: f64) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn test_merge_disjoint() {
        let intervals = vec![iv(6.0, 10.0), iv(0.0, 5.0), iv(11.0, 15.0)];
        let bands = merge_bands(&intervals, BandOverlap::Strict);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0].members, vec![1]);
        assert_eq!(bands[1].members, vec![0]);
        assert_eq!(bands[2].members, vec![2]);
    }

    #[test]
    fn test_merge_overlapping() {
        let intervals = vec![iv(0.0, 5.0), iv(1.0, 4.0), iv(3.0, 8.0), iv(9.0, 10.0)];
        let bands = merge_bands(&intervals, BandOverlap::Strict);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].members, vec![0, 1, 2]);
        assert_eq!(bands[0].start, 0.0);
        assert_eq!(bands[0].end, 8.0);
    }

    #[test]
    fn test_touching_intervals() {
        let intervals = vec![iv(0.0, 5.0), iv(5.0, 10.0)];
        assert_eq!(merge_bands(&intervals, BandOverlap::Strict).len(), 2);
        assert_eq!(merge_bands(&intervals, BandOverlap::Touching).len(), 1);
    }

    #[test]
    fn test_check_band_clique() {
        let intervals = vec![iv(0.0, 5.0), iv(1.0, 4.0), iv(2.0, 6.0)];
        let bands = merge_bands(&intervals, BandOverlap::Strict);
        assert_eq!(bands.len(), 1);
        assert_eq!(check_band(&bands[0], &intervals, BandOverlap::Strict), Ok(()));
    }

    #[test]
    fn test_check_band_straddle() {
        // 0..5 and 6..10 are separate columns; 3..8 bridges them.
        let intervals = vec![iv(0.0, 5.0), iv(3.0, 8.0), iv(6.0, 10.0), iv(0.0, 5.0)];
        let bands = merge_bands(&intervals, BandOverlap::Strict);
        assert_eq!(bands.len(), 1);
        assert_eq!(check_band(&bands[0], &intervals, BandOverlap::Strict), Err(1));
    }

    #[test]
    fn test_check_band_chain() {
        // a-b-c-d where only neighbours overlap
        let intervals = vec![iv(0.0, 2.0), iv(1.0, 4.0), iv(3.0, 6.0), iv(5.0, 8.0)];
        let bands = merge_bands(&intervals, BandOverlap::Strict);
        assert_eq!(bands.len(), 1);
        assert_eq!(check_band(&bands[0], &intervals, BandOverlap::Strict), Err(1));
    }

    #[test]
    fn test_degenerate_interval() {
        let intervals = vec![iv(3.0, 3.0), iv(0.0, 2.0)];
        let bands = merge_bands(&intervals, BandOverlap::Strict);
        assert_eq!(bands.len(), 2);
        assert_eq!(check_band(&bands[1], &intervals, BandOverlap::Strict), Ok(()));

        // A zero-height element inside a taller one still shares its band.
        let intervals = vec![iv(0.0, 5.0), iv(3.0, 3.0)];
        let bands = merge_bands(&intervals, BandOverlap::Strict);
        assert_eq!(bands.len(), 1);
        assert_eq!(check_band(&bands[0], &intervals, BandOverlap::Strict), Ok(()));
    }

    #[test]
    fn test_flat_interval_sharing_start() {
        // [0, 0] only touches [0, 5], so they stay apart in either order.
        for intervals in [vec![iv(0.0, 5.0), iv(0.0, 0.0)], vec![iv(0.0, 0.0), iv(0.0, 5.0)]] {
            let bands = merge_bands(&intervals, BandOverlap::Strict);
            assert_eq!(bands.len(), 2);
            for band in &bands {
                assert_eq!(check_band(band, &intervals, BandOverlap::Strict), Ok(()));
            }
        }
    }
}
