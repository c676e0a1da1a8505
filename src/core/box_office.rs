use crate::core::allocation::{locate, Placement};
use crate::core::reservation::{commit, CommitReceipt};
use crate::core::sales::{summarize, Money, SalesSummary};
use crate::core::{AllocationFailure, Auditorium, Confirm, ReservationRequest, SeatRun};
use crate::utils::error::{ReservationError, Result};
use serde::Serialize;

/// A located run that has not been committed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Proposal {
    pub request: ReservationRequest,
    pub placement: Placement,
}

impl Proposal {
    pub fn run(&self) -> SeatRun {
        self.placement.run()
    }

    pub fn needs_confirmation(&self) -> bool {
        self.placement.needs_confirmation()
    }

    pub fn fallback_reason(&self) -> Option<AllocationFailure> {
        self.placement.fallback_reason()
    }

    pub fn amount(&self) -> Money {
        Money::for_tickets(&self.request.tickets)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReservationOutcome {
    pub receipt: CommitReceipt,
    pub placement: Placement,
}

/// Owns the auditorium and runs requests through propose, confirm and commit.
#[derive(Debug, Clone)]
pub struct BoxOffice {
    auditorium: Auditorium,
}

impl BoxOffice {
    pub fn new(auditorium: Auditorium) -> Self {
        Self { auditorium }
    }

    pub fn auditorium(&self) -> &Auditorium {
        &self.auditorium
    }

    /// Checks the request against the auditorium and returns the number of
    /// seats it needs.
    pub fn validate(&self, request: &ReservationRequest) -> Result<usize> {
        let seats = request.seat_count().ok_or_else(|| {
            ReservationError::invalid_request("ticket counts are too large")
        })?;
        if seats == 0 {
            return Err(ReservationError::invalid_request(
                "at least one ticket must be requested",
            ));
        }
        let capacity = self.auditorium.seats().count();
        if seats > capacity {
            return Err(ReservationError::invalid_request(format!(
                "{} tickets requested but the auditorium has only {} seats",
                seats, capacity
            )));
        }
        if request.row == 0 || request.row > self.auditorium.num_rows() {
            return Err(ReservationError::invalid_request(format!(
                "row {} is out of range (1-{})",
                request.row,
                self.auditorium.num_rows()
            )));
        }
        Ok(seats)
    }

    /// Validates the request and finds seats for it without changing anything.
    pub fn propose(&self, request: &ReservationRequest) -> Result<Proposal> {
        let seats = self.validate(request)?;
        let placement = locate(&self.auditorium, request.row - 1, request.start, seats)
            .map_err(|_| ReservationError::NoneAvailable { requested: seats })?;

        Ok(Proposal {
            request: *request,
            placement,
        })
    }

    pub fn commit(&mut self, proposal: &Proposal) -> Result<CommitReceipt> {
        commit(
            &mut self.auditorium,
            &proposal.run(),
            &proposal.request.tickets,
        )
    }

    /// Explicit placements are committed right away; best-available offers go
    /// through `confirmer` first.
    pub fn reserve<C: Confirm + ?Sized>(
        &mut self,
        request: &ReservationRequest,
        confirmer: &mut C,
    ) -> Result<ReservationOutcome> {
        let proposal = self.propose(request)?;

        if proposal.needs_confirmation() && !confirmer.confirm(&proposal) {
            tracing::info!(run = %proposal.run(), "best available offer declined");
            return Err(ReservationError::DeclinedByUser {
                requested: proposal.run().len,
            });
        }

        let receipt = self.commit(&proposal)?;
        Ok(ReservationOutcome {
            receipt,
            placement: proposal.placement,
        })
    }

    pub fn summary(&self) -> SalesSummary {
        summarize(&self.auditorium)
    }
}
