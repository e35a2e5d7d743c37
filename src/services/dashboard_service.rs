//! Dashboard service - Admin summary counts.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{ApplicationStatus, UserRole};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Aggregate counts shown on the admin dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummary {
    /// Active animal listings
    #[schema(example = 42)]
    pub total_animals: u64,
    /// Applications still awaiting a decision
    #[schema(example = 7)]
    pub total_pending_applications: u64,
    /// Applications approved so far
    #[schema(example = 12)]
    pub total_approved_applications: u64,
    /// Active adopter accounts
    #[schema(example = 58)]
    pub total_adopters: u64,
}

/// Dashboard service trait for dependency injection.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Collect the summary counts over active rows
    async fn summary(&self) -> AppResult<DashboardSummary>;
}

/// Concrete implementation of DashboardService using Unit of Work.
pub struct DashboardManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardManager<U> {
    /// Create new dashboard service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardManager<U> {
    async fn summary(&self) -> AppResult<DashboardSummary> {
        let total_animals = self.uow.animals().count_active().await?;
        let total_pending_applications = self
            .uow
            .applications()
            .count_by_status(ApplicationStatus::Submitted)
            .await?;
        let total_approved_applications = self
            .uow
            .applications()
            .count_by_status(ApplicationStatus::Approved)
            .await?;
        let total_adopters = self.uow.users().count_by_role(UserRole::Adopter).await?;

        Ok(DashboardSummary {
            total_animals,
            total_pending_applications,
            total_approved_applications,
            total_adopters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::predicate::eq;

    use crate::errors::AppError;
    use crate::infra::{
        AnimalRepository, ApplicationRepository, MockAnimalRepository, MockApplicationRepository,
        MockUserRepository, TransactionContext, UnitOfWork, UserRepository,
    };

    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
        animals: Arc<MockAnimalRepository>,
        applications: Arc<MockApplicationRepository>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn animals(&self) -> Arc<dyn AnimalRepository> {
            self.animals.clone()
        }

        fn applications(&self) -> Arc<dyn ApplicationRepository> {
            self.applications.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    #[tokio::test]
    async fn test_summary_collects_all_counts() {
        let mut users = MockUserRepository::new();
        users
            .expect_count_by_role()
            .with(eq(UserRole::Adopter))
            .returning(|_| Ok(58));

        let mut animals = MockAnimalRepository::new();
        animals.expect_count_active().returning(|| Ok(42));

        let mut applications = MockApplicationRepository::new();
        applications
            .expect_count_by_status()
            .with(eq(ApplicationStatus::Submitted))
            .returning(|_| Ok(7));
        applications
            .expect_count_by_status()
            .with(eq(ApplicationStatus::Approved))
            .returning(|_| Ok(12));

        let uow = TestUnitOfWork {
            users: Arc::new(users),
            animals: Arc::new(animals),
            applications: Arc::new(applications),
        };

        let summary = DashboardManager::new(Arc::new(uow)).summary().await.unwrap();
        assert_eq!(summary.total_animals, 42);
        assert_eq!(summary.total_pending_applications, 7);
        assert_eq!(summary.total_approved_applications, 12);
        assert_eq!(summary.total_adopters, 58);
    }
}
