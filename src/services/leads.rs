use crate::db::DbPool;
use crate::entities::lead;
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Field values accepted from a submission, ready for persistence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLead {
    pub email: String,
    pub name: Option<String>,
    pub company: Option<String>,
}

/// Service for persisting captured leads
#[derive(Clone)]
pub struct LeadService {
    db_pool: Arc<DbPool>,
}

impl LeadService {
    /// Creates a new lead service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Inserts a lead inside an explicit scoped transaction.
    ///
    /// Email uniqueness is enforced solely by the database constraint; a
    /// violation rolls back and surfaces as `ServiceError::DuplicateEmail`.
    /// Any other storage failure also rolls back. Leads are insert-only:
    /// the service exposes no update or delete path.
    #[instrument(skip(self), fields(email = %new_lead.email))]
    pub async fn submit_lead(&self, new_lead: NewLead) -> Result<lead::Model, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let active = lead::ActiveModel {
            email: Set(new_lead.email),
            name: Set(new_lead.name),
            company: Set(new_lead.company),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match active.insert(&txn).await {
            Ok(model) => {
                txn.commit().await?;
                info!(lead_id = model.id, "Lead submitted successfully");
                Ok(model)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!("Failed to roll back lead insert: {}", rollback_err);
                }
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    info!("Rejected duplicate lead email");
                    Err(ServiceError::DuplicateEmail)
                } else {
                    error!("Failed to insert lead: {}", e);
                    Err(ServiceError::DatabaseError(e))
                }
            }
        }
    }

    /// Fetches a lead by email, if present.
    pub async fn get_lead_by_email(
        &self,
        email: &str,
    ) -> Result<Option<lead::Model>, ServiceError> {
        let found = lead::Entity::find()
            .filter(lead::Column::Email.eq(email))
            .one(&*self.db_pool)
            .await?;
        Ok(found)
    }

    /// Total number of captured leads.
    pub async fn count_leads(&self) -> Result<u64, ServiceError> {
        let count = lead::Entity::find().count(&*self.db_pool).await?;
        Ok(count)
    }
}
