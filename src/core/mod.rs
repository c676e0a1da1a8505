pub mod allocation;
pub mod box_office;
pub mod chart;
pub mod reservation;
pub mod sales;
pub mod shared;

pub use crate::domain::model::{
    AllocationFailure, Auditorium, ReservationRequest, Seat, SeatRun, TicketClass, TicketCounts,
};
pub use crate::domain::ports::{AutoConfirm, ChartStore, ConfigProvider, Confirm};
pub use crate::utils::error::Result;
