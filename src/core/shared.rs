use crate::core::box_office::{BoxOffice, ReservationOutcome};
use crate::core::sales::SalesSummary;
use crate::core::{Auditorium, Confirm, ReservationRequest};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A [`BoxOffice`] that several tasks can share. Each reservation holds the
/// lock from search to commit, so an offered run cannot be sold twice.
#[derive(Debug, Clone)]
pub struct SharedBoxOffice {
    inner: Arc<Mutex<BoxOffice>>,
}

impl SharedBoxOffice {
    pub fn new(office: BoxOffice) -> Self {
        Self {
            inner: Arc::new(Mutex::new(office)),
        }
    }

    pub async fn reserve<C: Confirm + ?Sized>(
        &self,
        request: &ReservationRequest,
        confirmer: &mut C,
    ) -> Result<ReservationOutcome> {
        let mut office = self.inner.lock().await;
        office.reserve(request, confirmer)
    }

    pub async fn summary(&self) -> SalesSummary {
        self.inner.lock().await.summary()
    }

    pub async fn snapshot(&self) -> Auditorium {
        self.inner.lock().await.auditorium().clone()
    }
}
