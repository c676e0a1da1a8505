use crate::utils::error::{ReservationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 座位欄位以字母 A..=Z 表示
pub const MAX_COLUMNS: usize = 26;

/// Seat state. `Other` holds a pre-seeded code the chart loader keeps verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketClass {
    Empty,
    Adult,
    Child,
    Senior,
    Other(char),
}

impl TicketClass {
    pub fn from_code(code: char) -> Self {
        match code {
            '.' => Self::Empty,
            'A' => Self::Adult,
            'C' => Self::Child,
            'S' => Self::Senior,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Adult => 'A',
            Self::Child => 'C',
            Self::Senior => 'S',
            Self::Other(code) => code,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

pub fn column_label(offset: usize) -> char {
    debug_assert!(offset < MAX_COLUMNS);
    (b'A' + offset as u8) as char
}

pub fn column_offset(label: char) -> Option<usize> {
    let upper = label.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some((upper as u8 - b'A') as usize)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Seat {
    row: usize,
    column: char,
    class: TicketClass,
}

impl Seat {
    fn new(row_index: usize, offset: usize, class: TicketClass) -> Self {
        Self {
            row: row_index + 1,
            column: column_label(offset),
            class,
        }
    }

    /// 1-based row number
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> char {
        self.column
    }

    pub fn class(&self) -> TicketClass {
        self.class
    }

    pub fn is_available(&self) -> bool {
        self.class.is_empty()
    }

    pub(crate) fn assign(&mut self, class: TicketClass) {
        self.class = class;
    }
}

/// The seating grid. Rows keep the length they were loaded with, so the grid
/// may be ragged; only seat classes change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auditorium {
    rows: Vec<Vec<Seat>>,
    max_columns: usize,
}

impl Auditorium {
    pub fn from_classes(rows: Vec<Vec<TicketClass>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(ReservationError::ChartFormatError {
                line: 0,
                message: "seating chart has no rows".to_string(),
            });
        }

        let mut max_columns = 0;
        let mut seats = Vec::with_capacity(rows.len());
        for (row_index, classes) in rows.into_iter().enumerate() {
            if classes.len() > MAX_COLUMNS {
                return Err(ReservationError::ChartFormatError {
                    line: row_index + 1,
                    message: format!(
                        "row has {} seats, at most {} are supported",
                        classes.len(),
                        MAX_COLUMNS
                    ),
                });
            }
            max_columns = max_columns.max(classes.len());
            seats.push(
                classes
                    .into_iter()
                    .enumerate()
                    .map(|(offset, class)| Seat::new(row_index, offset, class))
                    .collect(),
            );
        }

        Ok(Self {
            rows: seats,
            max_columns,
        })
    }

    /// 建立全部為空位的矩形座位表
    pub fn empty(num_rows: usize, num_columns: usize) -> Result<Self> {
        Self::from_classes(vec![vec![TicketClass::Empty; num_columns]; num_rows])
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    /// Seats of a row by 0-based index.
    pub fn row(&self, row_index: usize) -> Option<&[Seat]> {
        self.rows.get(row_index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Seat]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn seat(&self, row_index: usize, offset: usize) -> Option<&Seat> {
        self.rows.get(row_index)?.get(offset)
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.rows.iter().flatten()
    }

    pub fn count_of(&self, class: TicketClass) -> usize {
        self.seats().filter(|seat| seat.class == class).count()
    }

    pub(crate) fn row_mut(&mut self, row_index: usize) -> Option<&mut [Seat]> {
        self.rows.get_mut(row_index).map(Vec::as_mut_slice)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCounts {
    pub adults: usize,
    pub children: usize,
    pub seniors: usize,
}

impl TicketCounts {
    pub fn new(adults: usize, children: usize, seniors: usize) -> Self {
        Self {
            adults,
            children,
            seniors,
        }
    }

    /// `None` when the counts do not fit in a `usize`.
    pub fn total(&self) -> Option<usize> {
        self.adults
            .checked_add(self.children)?
            .checked_add(self.seniors)
    }

    /// Ticket classes in seating order: adults first, then children, then seniors.
    pub fn classes(&self) -> impl Iterator<Item = TicketClass> {
        std::iter::repeat(TicketClass::Adult)
            .take(self.adults)
            .chain(std::iter::repeat(TicketClass::Child).take(self.children))
            .chain(std::iter::repeat(TicketClass::Senior).take(self.seniors))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// 1-based row number as the customer sees it
    pub row: usize,
    pub start: Option<char>,
    pub tickets: TicketCounts,
}

impl ReservationRequest {
    pub fn at(row: usize, start: char, tickets: TicketCounts) -> Self {
        Self {
            row,
            start: Some(start),
            tickets,
        }
    }

    pub fn anywhere(tickets: TicketCounts) -> Self {
        Self {
            row: 1,
            start: None,
            tickets,
        }
    }

    pub fn seat_count(&self) -> Option<usize> {
        self.tickets.total()
    }
}

/// A contiguous same-row block of seats, addressed by 0-based row index and
/// starting column offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRun {
    pub row: usize,
    pub start: usize,
    pub len: usize,
}

impl SeatRun {
    pub fn new(row: usize, start: usize, len: usize) -> Self {
        Self { row, start, len }
    }

    /// Last column offset of the run (inclusive).
    pub fn end(&self) -> usize {
        self.start + self.len - 1
    }

    pub fn offsets(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }

    pub fn seats<'a>(&self, auditorium: &'a Auditorium) -> Option<&'a [Seat]> {
        auditorium.row(self.row)?.get(self.offsets())
    }
}

impl fmt::Display for SeatRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} - {}{}",
            self.row + 1,
            column_label(self.start),
            self.row + 1,
            column_label(self.end())
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationFailure {
    StartNotFound,
    InsufficientRun,
    NoneAvailable,
}

impl fmt::Display for AllocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::StartNotFound => "Starting seat not found",
            Self::InsufficientRun => "Seats not available at the specified location",
            Self::NoneAvailable => "No seats available",
        };
        f.write_str(text)
    }
}
