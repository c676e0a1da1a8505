use crate::core::sales::Money;
use crate::core::{Auditorium, SeatRun, TicketCounts};
use crate::utils::error::{ReservationError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitReceipt {
    pub run: SeatRun,
    pub tickets: TicketCounts,
    pub amount: Money,
}

/// Assigns adults, then children, then seniors onto `run` in column order.
///
/// The run is checked in full before any seat is touched: its length must
/// match the ticket total, it must lie inside its row and every seat must
/// still be empty. On error the auditorium is unchanged.
pub fn commit(
    auditorium: &mut Auditorium,
    run: &SeatRun,
    tickets: &TicketCounts,
) -> Result<CommitReceipt> {
    if run.len == 0 || tickets.total() != Some(run.len) {
        return Err(ReservationError::CommitRejected {
            message: format!(
                "run holds {} seats but {} adult, {} child and {} senior tickets were requested",
                run.len, tickets.adults, tickets.children, tickets.seniors
            ),
        });
    }

    let row = auditorium
        .row_mut(run.row)
        .ok_or_else(|| ReservationError::CommitRejected {
            message: format!("row {} does not exist", run.row + 1),
        })?;
    let seats = row
        .get_mut(run.offsets())
        .ok_or_else(|| ReservationError::CommitRejected {
            message: format!("run {} extends past the end of the row", run),
        })?;

    if let Some(taken) = seats.iter().find(|seat| !seat.is_available()) {
        return Err(ReservationError::CommitRejected {
            message: format!("seat {}{} is already taken", taken.row(), taken.column()),
        });
    }

    for (seat, class) in seats.iter_mut().zip(tickets.classes()) {
        seat.assign(class);
    }

    let receipt = CommitReceipt {
        run: *run,
        tickets: *tickets,
        amount: Money::for_tickets(tickets),
    };
    tracing::info!(
        run = %run,
        adults = tickets.adults,
        children = tickets.children,
        seniors = tickets.seniors,
        amount = %receipt.amount,
        "✅ Seats successfully reserved"
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart::parse_chart;
    use crate::core::TicketClass;

    #[test]
    fn test_commit_assigns_classes_in_order() {
        let mut auditorium = Auditorium::empty(1, 5).unwrap();
        let run = SeatRun::new(0, 1, 4);
        let receipt = commit(&mut auditorium, &run, &TicketCounts::new(1, 2, 1)).unwrap();

        let codes: String = auditorium
            .row(0)
            .unwrap()
            .iter()
            .map(|seat| seat.class().code())
            .collect();
        assert_eq!(codes, ".ACCS");
        assert_eq!(receipt.amount, Money::from_cents(2750));
    }

    #[test]
    fn test_commit_rejects_length_mismatch() {
        let mut auditorium = Auditorium::empty(1, 5).unwrap();
        let before = auditorium.clone();
        let result = commit(&mut auditorium, &SeatRun::new(0, 0, 3), &TicketCounts::new(2, 0, 0));
        assert!(matches!(result, Err(ReservationError::CommitRejected { .. })));
        assert_eq!(auditorium, before);
    }

    #[test]
    fn test_commit_rejects_taken_seat_without_partial_write() {
        let mut auditorium = parse_chart("..C..\n").unwrap();
        let result = commit(&mut auditorium, &SeatRun::new(0, 0, 4), &TicketCounts::new(4, 0, 0));
        assert!(result.is_err());
        assert_eq!(auditorium.count_of(TicketClass::Adult), 0);
        assert_eq!(auditorium.count_of(TicketClass::Empty), 4);
    }

    #[test]
    fn test_commit_rejects_run_past_row_end() {
        let mut auditorium = Auditorium::empty(2, 3).unwrap();
        assert!(commit(&mut auditorium, &SeatRun::new(0, 2, 2), &TicketCounts::new(2, 0, 0)).is_err());
        assert!(commit(&mut auditorium, &SeatRun::new(5, 0, 1), &TicketCounts::new(1, 0, 0)).is_err());
        assert_eq!(auditorium.count_of(TicketClass::Empty), 6);
    }
}
