//! Contiguous block search: explicit placement and best-available fallback.
//!
//! Everything here is read-only over the [`Auditorium`]; committing a run is
//! done by [`crate::core::reservation`].

use crate::core::{AllocationFailure, Auditorium, SeatRun};
use crate::domain::model::{column_offset, Seat};
use serde::Serialize;

/// Distances closer than this are treated as equal.
pub const DISTANCE_EPSILON: f64 = 1e-6;

/// Where a request ended up and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Placement {
    /// Exactly the seats asked for.
    Explicit(SeatRun),
    /// Best-available seats. `reason` is the explicit failure that triggered
    /// the fallback, `None` when no starting seat was requested.
    BestAvailable {
        run: SeatRun,
        reason: Option<AllocationFailure>,
    },
}

impl Placement {
    pub fn run(&self) -> SeatRun {
        match self {
            Self::Explicit(run) => *run,
            Self::BestAvailable { run, .. } => *run,
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Self::BestAvailable { .. })
    }

    pub fn fallback_reason(&self) -> Option<AllocationFailure> {
        match self {
            Self::Explicit(_) => None,
            Self::BestAvailable { reason, .. } => *reason,
        }
    }
}

/// Number of consecutive empty seats starting at each offset of `row`.
fn free_run_lengths(row: &[Seat]) -> Vec<usize> {
    let mut lengths = vec![0; row.len()];
    let mut current = 0;
    for (offset, seat) in row.iter().enumerate().rev() {
        current = if seat.is_available() { current + 1 } else { 0 };
        lengths[offset] = current;
    }
    lengths
}

/// Checks the `seats` seats starting exactly at `start` in the 0-based row
/// `row_index`. The starting seat itself has to be empty.
pub fn find_explicit(
    auditorium: &Auditorium,
    row_index: usize,
    start: char,
    seats: usize,
) -> Result<SeatRun, AllocationFailure> {
    let row = auditorium
        .row(row_index)
        .ok_or(AllocationFailure::StartNotFound)?;
    let offset = column_offset(start)
        .filter(|offset| *offset < row.len())
        .ok_or(AllocationFailure::StartNotFound)?;

    let available = row[offset..]
        .iter()
        .take(seats)
        .take_while(|seat| seat.is_available())
        .count();

    tracing::debug!(
        row = row_index + 1,
        start = %start,
        requested = seats,
        available,
        "explicit placement check"
    );

    if seats > 0 && available == seats {
        Ok(SeatRun::new(row_index, offset, seats))
    } else {
        Err(AllocationFailure::InsufficientRun)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    run: SeatRun,
    distance: f64,
    row_offset: f64,
}

impl Candidate {
    fn beats(&self, best: &Candidate) -> bool {
        if (self.distance - best.distance).abs() >= DISTANCE_EPSILON {
            return self.distance < best.distance;
        }
        if (self.row_offset - best.row_offset).abs() >= DISTANCE_EPSILON {
            return self.row_offset < best.row_offset;
        }
        if self.run.row != best.run.row {
            // 與中心等距的兩排：取前排
            return self.run.row < best.run.row;
        }
        self.run.start < best.run.start
    }
}

/// Exhaustive scan for the run of `seats` empty seats whose midpoint lies
/// closest to the centre of the auditorium.
///
/// Ties within [`DISTANCE_EPSILON`] go to the row nearer the centre row, then
/// to the lower row index, then to the smaller starting column.
pub fn find_best_available(
    auditorium: &Auditorium,
    seats: usize,
) -> Result<SeatRun, AllocationFailure> {
    if seats == 0 || auditorium.max_columns() == 0 {
        return Err(AllocationFailure::NoneAvailable);
    }

    let center_row = (auditorium.num_rows() as f64 - 1.0) / 2.0;
    let center_col = (auditorium.max_columns() as f64 - 1.0) / 2.0;

    let mut best: Option<Candidate> = None;
    for (row_index, row) in auditorium.rows().enumerate() {
        let free = free_run_lengths(row);
        for (start, available) in free.into_iter().enumerate() {
            if available < seats {
                continue;
            }

            let run = SeatRun::new(row_index, start, seats);
            let mid_col = (run.start + run.end()) as f64 / 2.0;
            let row_offset = (row_index as f64 - center_row).abs();
            let candidate = Candidate {
                run,
                distance: row_offset.hypot(mid_col - center_col),
                row_offset,
            };

            if best.map_or(true, |current| candidate.beats(&current)) {
                best = Some(candidate);
            }
        }
    }

    match best {
        Some(candidate) => {
            tracing::debug!(
                run = %candidate.run,
                distance = candidate.distance,
                "best available run"
            );
            Ok(candidate.run)
        }
        None => Err(AllocationFailure::NoneAvailable),
    }
}

/// Explicit placement when a start seat is given, otherwise (or when it
/// fails) the best-available run. Only `NoneAvailable` is returned as an error.
pub fn locate(
    auditorium: &Auditorium,
    row_index: usize,
    start: Option<char>,
    seats: usize,
) -> Result<Placement, AllocationFailure> {
    let reason = match start {
        Some(start) => match find_explicit(auditorium, row_index, start, seats) {
            Ok(run) => return Ok(Placement::Explicit(run)),
            Err(reason) => {
                tracing::info!(
                    "{}. Searching for best available seats.",
                    reason
                );
                Some(reason)
            }
        },
        None => None,
    };

    let run = find_best_available(auditorium, seats)?;
    Ok(Placement::BestAvailable { run, reason })
}
