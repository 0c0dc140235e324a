//! In-memory ticket store.
//!
//! Substitute backend for tests and credential-free local development. It
//! mirrors the managed database's observable behavior: backend-assigned ids
//! and timestamps, the `Menunggu` column default, and a not-null constraint
//! on `customer_name`.

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, TicketStore};
use crate::models::{Ticket, TicketPayload, TicketStatus};

#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Ticket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TicketStore for MemoryStore {
    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, StoreError> {
        let rows = self.rows.read().await;
        // Walk newest-insertion-first so the stable sort breaks timestamp
        // ties the same way the backend's ordering does.
        let mut tickets: Vec<Ticket> = rows
            .iter()
            .rev()
            .filter(|ticket| status.map_or(true, |wanted| ticket.status == wanted))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    async fn get(&self, id: Uuid) -> Result<Ticket, StoreError> {
        let rows = self.rows.read().await;
        rows.iter()
            .find(|ticket| ticket.id == id)
            .cloned()
            .ok_or(StoreError::RowNotFound)
    }

    async fn insert(&self, payload: TicketPayload) -> Result<Ticket, StoreError> {
        let Some(customer_name) = payload.customer_name else {
            return Err(StoreError::Backend(
                "null value in column \"customer_name\" violates not-null constraint".to_string(),
            ));
        };

        let ticket = Ticket {
            id: Uuid::new_v4(),
            customer_name,
            brand: payload.brand,
            size: payload.size,
            service_type: payload.service_type,
            status: payload.status.unwrap_or_default(),
            drop_off_date: payload.drop_off_date,
            pick_up_date: payload.pick_up_date,
            notes: payload.notes,
            created_at: Utc::now(),
        };

        self.rows.write().await.push(ticket.clone());
        Ok(ticket)
    }

    async fn update(&self, id: Uuid, payload: TicketPayload) -> Result<Ticket, StoreError> {
        let mut rows = self.rows.write().await;
        let ticket = rows
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or(StoreError::RowNotFound)?;

        if let Some(customer_name) = payload.customer_name {
            ticket.customer_name = customer_name;
        }
        if let Some(brand) = payload.brand {
            ticket.brand = Some(brand);
        }
        if let Some(size) = payload.size {
            ticket.size = Some(size);
        }
        if let Some(service_type) = payload.service_type {
            ticket.service_type = Some(service_type);
        }
        if let Some(status) = payload.status {
            ticket.status = status;
        }
        if let Some(drop_off_date) = payload.drop_off_date {
            ticket.drop_off_date = Some(drop_off_date);
        }
        if let Some(pick_up_date) = payload.pick_up_date {
            ticket.pick_up_date = Some(pick_up_date);
        }
        if let Some(notes) = payload.notes {
            ticket.notes = Some(notes);
        }

        Ok(ticket.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.write().await.retain(|ticket| ticket.id != id);
        Ok(())
    }
}
