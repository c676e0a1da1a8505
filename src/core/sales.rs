use crate::core::{Auditorium, TicketClass, TicketCounts};
use crate::utils::error::{ReservationError, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// Amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ADULT: Money = Money(1000);
    pub const CHILD: Money = Money(500);
    pub const SENIOR: Money = Money(750);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Unit price of a ticket class. Empty seats and pre-seeded codes sell nothing.
    pub fn unit_price(class: TicketClass) -> Money {
        match class {
            TicketClass::Adult => Self::ADULT,
            TicketClass::Child => Self::CHILD,
            TicketClass::Senior => Self::SENIOR,
            TicketClass::Empty | TicketClass::Other(_) => Self(0),
        }
    }

    /// Saturates at `u64::MAX` cents instead of wrapping.
    pub fn for_tickets(tickets: &TicketCounts) -> Money {
        let line = |price: Money, count: usize| price.0.saturating_mul(count as u64);
        Money(
            line(Self::ADULT, tickets.adults)
                .saturating_add(line(Self::CHILD, tickets.children))
                .saturating_add(line(Self::SENIOR, tickets.seniors)),
        )
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub total_seats: usize,
    pub total_tickets: usize,
    pub adult_tickets: usize,
    pub child_tickets: usize,
    pub senior_tickets: usize,
    /// Occupied seats carrying a code other than A/C/S.
    pub other_tickets: usize,
    pub total_sales: Money,
    pub generated_at: DateTime<Utc>,
}

/// Single read-only pass over every seat.
pub fn summarize(auditorium: &Auditorium) -> SalesSummary {
    let mut summary = SalesSummary {
        total_seats: 0,
        total_tickets: 0,
        adult_tickets: 0,
        child_tickets: 0,
        senior_tickets: 0,
        other_tickets: 0,
        total_sales: Money::default(),
        generated_at: Utc::now(),
    };

    for seat in auditorium.seats() {
        summary.total_seats += 1;
        let class = seat.class();
        if class.is_empty() {
            continue;
        }

        summary.total_tickets += 1;
        match class {
            TicketClass::Adult => summary.adult_tickets += 1,
            TicketClass::Child => summary.child_tickets += 1,
            TicketClass::Senior => summary.senior_tickets += 1,
            TicketClass::Other(_) => summary.other_tickets += 1,
            TicketClass::Empty => {}
        }
        summary.total_sales += Money::unit_price(class);
    }

    summary
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub const NAMES: [&'static str; 3] = ["text", "json", "csv"];
}

impl FromStr for ReportFormat {
    type Err = ReservationError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ReservationError::InvalidConfigValueError {
                field: "report.format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

impl SalesSummary {
    pub fn to_text(&self) -> String {
        format!(
            "Total Seats:\t{}\nTotal Tickets:\t{}\nAdult Tickets:\t{}\nChild Tickets:\t{}\nSenior Tickets:\t{}\nTotal Sales:\t${}\n",
            self.total_seats,
            self.total_tickets,
            self.adult_tickets,
            self.child_tickets,
            self.senior_tickets,
            self.total_sales
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(self)?;
        let data = writer
            .into_inner()
            .map_err(|e| ReservationError::IoError(e.into_error()))?;
        String::from_utf8(data).map_err(|e| ReservationError::ConfigError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Csv => self.to_csv(),
        }
    }
}
