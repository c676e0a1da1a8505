use proptest::prelude::*;
use seat_reserve::core::allocation::{find_best_available, find_explicit};
use seat_reserve::core::chart::{parse_chart, serialize_chart};
use seat_reserve::core::sales::summarize;
use seat_reserve::core::{Auditorium, AutoConfirm, ReservationRequest, TicketClass, TicketCounts};
use seat_reserve::BoxOffice;

fn seat_code() -> impl Strategy<Value = char> {
    prop_oneof![
        4 => Just('.'),
        1 => Just('A'),
        1 => Just('C'),
        1 => Just('S'),
        1 => Just('x'),
    ]
}

fn chart_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec(seat_code(), 0..12), 1..8).prop_map(|rows| {
        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>() + "\n")
            .collect()
    })
}

fn tickets() -> impl Strategy<Value = TicketCounts> {
    (0usize..3, 0usize..3, 0usize..3)
        .prop_filter("at least one ticket", |(a, c, s)| a + c + s > 0)
        .prop_map(|(a, c, s)| TicketCounts::new(a, c, s))
}

fn class_counts(auditorium: &Auditorium) -> (usize, usize, usize, usize) {
    (
        auditorium.count_of(TicketClass::Empty),
        auditorium.count_of(TicketClass::Adult),
        auditorium.count_of(TicketClass::Child),
        auditorium.count_of(TicketClass::Senior),
    )
}

proptest! {
    #[test]
    fn chart_round_trips(text in chart_text()) {
        let auditorium = parse_chart(&text).unwrap();
        let written = serialize_chart(&auditorium);
        prop_assert_eq!(&written, &text);
        prop_assert_eq!(parse_chart(&written).unwrap(), auditorium);
    }

    #[test]
    fn commit_moves_exactly_the_requested_tickets(
        text in chart_text(),
        tickets in tickets(),
        row in 1usize..8,
        start in prop::char::range('A', 'L'),
    ) {
        let auditorium = parse_chart(&text).unwrap();
        let row = row.min(auditorium.num_rows());
        let (empty, adults, children, seniors) = class_counts(&auditorium);
        let mut office = BoxOffice::new(auditorium);

        let request = ReservationRequest::at(row, start, tickets);
        match office.reserve(&request, &mut AutoConfirm(true)) {
            Ok(_) => {
                let after = class_counts(office.auditorium());
                prop_assert_eq!(after.0, empty - tickets.total().unwrap());
                prop_assert_eq!(after.1, adults + tickets.adults);
                prop_assert_eq!(after.2, children + tickets.children);
                prop_assert_eq!(after.3, seniors + tickets.seniors);
            }
            Err(_) => {
                prop_assert_eq!(class_counts(office.auditorium()), (empty, adults, children, seniors));
            }
        }
    }

    #[test]
    fn explicit_runs_only_cover_empty_seats(
        text in chart_text(),
        seats in 1usize..5,
        row in 0usize..8,
        start in prop::char::range('A', 'L'),
    ) {
        let auditorium = parse_chart(&text).unwrap();
        if let Ok(run) = find_explicit(&auditorium, row, start, seats) {
            let covered = run.seats(&auditorium).unwrap();
            prop_assert_eq!(covered.len(), seats);
            prop_assert!(covered.iter().all(|seat| seat.is_available()));
            prop_assert_eq!(covered[0].column(), start);
        }
    }

    #[test]
    fn best_available_is_deterministic_and_valid(text in chart_text(), seats in 1usize..5) {
        let auditorium = parse_chart(&text).unwrap();
        let first = find_best_available(&auditorium, seats);
        prop_assert_eq!(first, find_best_available(&auditorium.clone(), seats));

        if let Ok(run) = first {
            let covered = run.seats(&auditorium).unwrap();
            prop_assert_eq!(covered.len(), seats);
            prop_assert!(covered.iter().all(|seat| seat.is_available()));
            prop_assert!(covered.iter().all(|seat| seat.row() == run.row + 1));
        }
    }

    #[test]
    fn revenue_matches_unit_prices(text in chart_text()) {
        let summary = summarize(&parse_chart(&text).unwrap());
        let expected = 1000 * summary.adult_tickets as u64
            + 500 * summary.child_tickets as u64
            + 750 * summary.senior_tickets as u64;
        prop_assert_eq!(summary.total_sales.cents(), expected);
        prop_assert_eq!(
            summary.total_tickets,
            summary.adult_tickets + summary.child_tickets + summary.senior_tickets + summary.other_tickets
        );
    }
}
