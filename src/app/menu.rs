use crate::core::box_office::{BoxOffice, Proposal};
use crate::core::chart::render_chart;
use crate::core::sales::SalesSummary;
use crate::core::{Confirm, ReservationRequest, TicketCounts};
use crate::utils::error::{ReservationError, Result};
use std::io::{BufRead, Write};

enum MenuChoice {
    Reserve,
    Exit,
    Invalid,
}

/// Menu loop over any line-based input and output, so the whole session can
/// be scripted in tests.
pub struct MenuSession<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> MenuSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user exits (or input ends) and returns the final sales
    /// summary, which has already been printed.
    pub fn run(&mut self, office: &mut BoxOffice) -> Result<SalesSummary> {
        loop {
            write!(
                self.output,
                "\n===== Theater Ticket Reservation System =====\n1. Reserve Seats\n2. Exit\nEnter your choice: "
            )?;
            self.output.flush()?;

            let choice = match read_line(&mut self.input)? {
                Some(line) => parse_choice(&line),
                None => MenuChoice::Exit,
            };

            match choice {
                MenuChoice::Reserve => {
                    write!(self.output, "{}", render_chart(office.auditorium()))?;
                    if !self.reserve_once(office)? {
                        return self.finish(office);
                    }
                }
                MenuChoice::Exit => return self.finish(office),
                MenuChoice::Invalid => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }
    }

    fn finish(&mut self, office: &BoxOffice) -> Result<SalesSummary> {
        let summary = office.summary();
        write!(self.output, "{}", summary.to_text())?;
        writeln!(self.output, "Thanks for using our Ticket Reservation System!")?;
        Ok(summary)
    }

    /// Handles one reservation. Returns `false` when input ran out.
    fn reserve_once(&mut self, office: &mut BoxOffice) -> Result<bool> {
        let request = match self.read_request() {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(false),
            Err(e @ ReservationError::InvalidRequest { .. }) => {
                writeln!(self.output, "❌ {}", e.user_friendly_message())?;
                return Ok(true);
            }
            Err(e) => return Err(e),
        };

        let mut prompt = PromptConfirm {
            input: &mut self.input,
            output: &mut self.output,
        };
        match office.reserve(&request, &mut prompt) {
            Ok(_) => writeln!(self.output, "Seats successfully reserved!")?,
            Err(e) if e.is_recoverable() => {
                tracing::debug!("reservation not completed: {}", e);
                writeln!(self.output, "{}", e.user_friendly_message())?;
            }
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    fn read_request(&mut self) -> Result<Option<ReservationRequest>> {
        let Some(row) = self.prompt("Enter row number: ")? else {
            return Ok(None);
        };
        let Some(seat) = self.prompt("Enter starting seat letter: ")? else {
            return Ok(None);
        };
        let Some(adults) = self.prompt("Enter number of adult tickets: ")? else {
            return Ok(None);
        };
        let Some(children) = self.prompt("Enter number of child tickets: ")? else {
            return Ok(None);
        };
        let Some(seniors) = self.prompt("Enter number of senior tickets: ")? else {
            return Ok(None);
        };

        Ok(Some(ReservationRequest {
            row: parse_count("row number", &row)?,
            start: parse_seat(&seat)?,
            tickets: TicketCounts::new(
                parse_count("adult tickets", &adults)?,
                parse_count("child tickets", &children)?,
                parse_count("senior tickets", &seniors)?,
            ),
        }))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        read_line(&mut self.input)
    }
}

struct PromptConfirm<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> PromptConfirm<'_, R, W> {
    fn ask(&mut self, proposal: &Proposal) -> Result<bool> {
        if let Some(reason) = proposal.fallback_reason() {
            writeln!(self.output, "{}. Searching for best available seats.", reason)?;
        }
        write!(
            self.output,
            "Best available seats found: {}\nWould you like to reserve these {} seats? (Y/N): ",
            proposal.run(),
            proposal.run().len
        )?;
        self.output.flush()?;

        Ok(read_line(&mut *self.input)?
            .map(|answer| answer.trim_start().starts_with(['y', 'Y']))
            .unwrap_or(false))
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<'_, R, W> {
    fn confirm(&mut self, proposal: &Proposal) -> bool {
        self.ask(proposal).unwrap_or_else(|e| {
            tracing::warn!("could not read confirmation, treating as declined: {}", e);
            false
        })
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_choice(line: &str) -> MenuChoice {
    match line {
        "1" => MenuChoice::Reserve,
        "2" => MenuChoice::Exit,
        _ => MenuChoice::Invalid,
    }
}

/// A blank answer leaves the start open and goes straight to best available.
fn parse_seat(value: &str) -> Result<Option<char>> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Ok(Some(c.to_ascii_uppercase())),
        _ => Err(ReservationError::invalid_request(format!(
            "starting seat must be a single letter, got '{}'",
            value
        ))),
    }
}

fn parse_count(field: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| {
        ReservationError::invalid_request(format!("{} must be a whole number, got '{}'", field, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart::{parse_chart, serialize_chart};
    use crate::core::Auditorium;
    use std::io::Cursor;

    fn run_script(office: &mut BoxOffice, script: &str) -> (SalesSummary, String) {
        let mut session = MenuSession::new(Cursor::new(script.to_string()), Vec::new());
        let summary = session.run(office).unwrap();
        (summary, String::from_utf8(session.into_output()).unwrap())
    }

    #[test]
    fn test_explicit_reservation_session() {
        let mut office = BoxOffice::new(Auditorium::empty(3, 5).unwrap());
        let (summary, output) = run_script(&mut office, "1\n2\nB\n2\n0\n0\n2\n");

        assert!(output.contains("  ABCDE\n1 .....\n"));
        assert!(output.contains("Seats successfully reserved!"));
        assert!(!output.contains("Best available"));
        assert!(output.contains("Total Sales:\t$20.00"));
        assert_eq!(summary.adult_tickets, 2);
        assert_eq!(serialize_chart(office.auditorium()), ".....\n.AA..\n.....\n");
    }

    #[test]
    fn test_best_available_offer_accepted() {
        let mut office = BoxOffice::new(parse_chart("A..\n").unwrap());
        let (_, output) = run_script(&mut office, "1\n1\nA\n0\n1\n1\ny\n2\n");

        assert!(output.contains("Seats not available at the specified location"));
        assert!(output.contains("Best available seats found: 1B - 1C"));
        assert!(output.contains("Seats successfully reserved!"));
        assert_eq!(serialize_chart(office.auditorium()), "ACS\n");
    }

    #[test]
    fn test_best_available_offer_declined() {
        let mut office = BoxOffice::new(parse_chart("A..\n").unwrap());
        let (summary, output) = run_script(&mut office, "1\n1\nA\n2\n0\n0\nN\n2\n");

        assert!(output.contains("Reservation declined. Returning to menu."));
        assert_eq!(summary.total_tickets, 1);
        assert_eq!(serialize_chart(office.auditorium()), "A..\n");
    }

    #[test]
    fn test_invalid_input_returns_to_menu() {
        let mut office = BoxOffice::new(Auditorium::empty(2, 2).unwrap());
        let (_, output) = run_script(&mut office, "7\n1\nx\nA\n1\n0\n0\n1\n9\nA\n1\n0\n0\n2\n");

        assert!(output.contains("Invalid choice. Try again."));
        assert!(output.contains("row number must be a whole number"));
        assert!(output.contains("row 9 is out of range"));
        assert_eq!(office.auditorium().count_of(crate::core::TicketClass::Empty), 4);
    }

    #[test]
    fn test_oversized_ticket_counts_are_rejected() {
        let mut office = BoxOffice::new(Auditorium::empty(2, 2).unwrap());
        let (summary, output) =
            run_script(&mut office, "1\n1\nA\n18446744073709551615\n2\n0\n1\n1\nA\n3\n2\n0\n2\n");

        assert!(output.contains("ticket counts are too large"));
        assert!(output.contains("5 tickets requested but the auditorium has only 4 seats"));
        assert!(!output.contains("Seats successfully reserved!"));
        assert_eq!(summary.total_tickets, 0);
        assert_eq!(serialize_chart(office.auditorium()), "..\n..\n");
    }

    #[test]
    fn test_multi_letter_start_seat_is_rejected() {
        let mut office = BoxOffice::new(Auditorium::empty(1, 4).unwrap());
        let (_, output) = run_script(&mut office, "1\n1\nBC\n1\n0\n0\n1\n1\n\n1\n0\n0\ny\n2\n");

        assert!(output.contains("starting seat must be a single letter, got 'BC'"));
        // 空白起始座位：直接找最佳座位，不顯示退回原因
        assert!(output.contains("Best available seats found: 1B - 1B"));
        assert!(!output.contains("Searching for best available seats"));
        assert_eq!(serialize_chart(office.auditorium()), ".A..\n");
    }

    #[test]
    fn test_full_house_and_end_of_input() {
        let mut office = BoxOffice::new(parse_chart("AA\n").unwrap());
        let (summary, output) = run_script(&mut office, "1\n1\nA\n1\n0\n0\n");

        assert!(output.contains("No seats available."));
        assert!(output.contains("Thanks for using our Ticket Reservation System!"));
        assert_eq!(summary.total_sales.cents(), 2000);
    }
}
