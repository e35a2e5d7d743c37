//! Application service - Adoption application use cases.
//!
//! Holds the status lifecycle rules: applications start Submitted, only an
//! admin moves them, Approved/Rejected are terminal, and approving an
//! application marks the animal Adopted in the same database transaction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    AdoptionStatus, Application, ApplicationDetails, ApplicationStatus, NewApplication,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Placeholder shown when a referenced row was hard-deleted out from under
/// an application's history.
const UNKNOWN_NAME: &str = "Unknown";

/// Application service trait for dependency injection.
///
/// Operations act on active (non-deleted) applications.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// List active applications, paginated, optionally filtered by status,
    /// enriched with animal and adopter names
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
        params: PaginationParams,
    ) -> AppResult<(Vec<ApplicationDetails>, u64)>;

    /// List all active applications of one adopter
    async fn list_for_adopter(&self, adopter_id: Uuid) -> AppResult<Vec<ApplicationDetails>>;

    /// Get an active application by ID
    async fn get_application(&self, id: Uuid) -> AppResult<ApplicationDetails>;

    /// Submit a new application for an animal
    async fn create_application(
        &self,
        adopter_id: Uuid,
        adopter_name: String,
        animal_id: Uuid,
        reason: Option<String>,
    ) -> AppResult<Application>;

    /// Transition an application to Approved or Rejected (admin only).
    /// Approval also marks the animal Adopted, atomically.
    async fn update_status(
        &self,
        id: Uuid,
        target: ApplicationStatus,
        updated_by: String,
    ) -> AppResult<()>;

    /// Let an adopter update the reason of, or cancel, their own
    /// still-Submitted application
    async fn update_by_adopter(
        &self,
        id: Uuid,
        adopter_id: Uuid,
        reason: Option<String>,
        cancel: bool,
        updated_by: String,
    ) -> AppResult<()>;
}

/// Concrete implementation of ApplicationService using Unit of Work.
pub struct ApplicationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ApplicationManager<U> {
    /// Create new application service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Join applications with the names of their animals and adopters.
    ///
    /// Uses two batched lookups instead of a per-row query; lookups include
    /// soft-deleted referents so history keeps rendering.
    async fn enrich(&self, applications: Vec<Application>) -> AppResult<Vec<ApplicationDetails>> {
        let animal_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = applications.iter().map(|a| a.animal_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let adopter_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = applications.iter().map(|a| a.adopter_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };

        let animal_names: HashMap<Uuid, String> = self
            .uow
            .animals()
            .find_by_ids(animal_ids)
            .await?
            .into_iter()
            .map(|animal| (animal.id, animal.name))
            .collect();

        let adopter_names: HashMap<Uuid, String> = self
            .uow
            .users()
            .find_by_ids(adopter_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.name))
            .collect();

        Ok(applications
            .into_iter()
            .map(|application| {
                let animal_name = animal_names
                    .get(&application.animal_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string());
                let adopter_name = adopter_names
                    .get(&application.adopter_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string());
                ApplicationDetails {
                    application,
                    animal_name,
                    adopter_name,
                }
            })
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> ApplicationService for ApplicationManager<U> {
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
        params: PaginationParams,
    ) -> AppResult<(Vec<ApplicationDetails>, u64)> {
        let (applications, total) = self
            .uow
            .applications()
            .list_paged(status, params.page, params.limit())
            .await?;

        Ok((self.enrich(applications).await?, total))
    }

    async fn list_for_adopter(&self, adopter_id: Uuid) -> AppResult<Vec<ApplicationDetails>> {
        let applications = self.uow.applications().list_for_adopter(adopter_id).await?;
        self.enrich(applications).await
    }

    async fn get_application(&self, id: Uuid) -> AppResult<ApplicationDetails> {
        let application = self
            .uow
            .applications()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut details = self.enrich(vec![application]).await?;
        details.pop().ok_or(AppError::NotFound)
    }

    async fn create_application(
        &self,
        adopter_id: Uuid,
        adopter_name: String,
        animal_id: Uuid,
        reason: Option<String>,
    ) -> AppResult<Application> {
        // The animal must exist and still be open for applications
        let animal = self
            .uow
            .animals()
            .find_by_id(animal_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !animal.is_available() {
            return Err(AppError::conflict(
                "This animal has already been adopted. Applications are no longer accepted.",
            ));
        }

        // One active application per (animal, adopter) pair, whatever its
        // status; re-applying requires the old row to be soft-deleted first
        if self
            .uow
            .applications()
            .find_active(animal_id, adopter_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "You already submitted an application for this animal",
            ));
        }

        let application = self
            .uow
            .applications()
            .create(NewApplication {
                animal_id,
                adopter_id,
                reason,
                created_by: adopter_name,
            })
            .await?;

        tracing::info!(
            application_id = %application.id,
            animal_id = %animal_id,
            "Adoption application submitted"
        );

        Ok(application)
    }

    async fn update_status(
        &self,
        id: Uuid,
        target: ApplicationStatus,
        updated_by: String,
    ) -> AppResult<()> {
        if !matches!(
            target,
            ApplicationStatus::Approved | ApplicationStatus::Rejected
        ) {
            return Err(AppError::validation(
                "Applications can only be moved to Approved or Rejected",
            ));
        }

        let application = self
            .uow
            .applications()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if application.status.is_terminal() {
            return Err(AppError::conflict("Cannot modify a completed application"));
        }

        // Re-check and write inside one transaction so the approval and the
        // animal's status flip land together (or not at all).
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let application = ctx
                        .applications()
                        .find_by_id(id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if !application.status.can_transition_to(target) {
                        return Err(AppError::conflict("Cannot modify a completed application"));
                    }

                    ctx.applications().set_status(id, target, &updated_by).await?;

                    if target == ApplicationStatus::Approved {
                        ctx.animals()
                            .set_adoption_status(
                                application.animal_id,
                                AdoptionStatus::Adopted,
                                &updated_by,
                            )
                            .await?;
                    }

                    Ok(())
                })
            })
            .await?;

        tracing::info!(application_id = %id, status = %target, "Application status updated");
        Ok(())
    }

    async fn update_by_adopter(
        &self,
        id: Uuid,
        adopter_id: Uuid,
        reason: Option<String>,
        cancel: bool,
        updated_by: String,
    ) -> AppResult<()> {
        let application = self
            .uow
            .applications()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if application.adopter_id != adopter_id {
            return Err(AppError::Forbidden);
        }

        if application.status.is_terminal() {
            return Err(AppError::conflict("Cannot modify a completed application"));
        }

        if cancel {
            self.uow.applications().delete(id, updated_by).await?;
            tracing::info!(application_id = %id, "Application cancelled by adopter");
            return Ok(());
        }

        match reason {
            Some(reason) => {
                self.uow
                    .applications()
                    .update_reason(id, reason, updated_by)
                    .await?;
                Ok(())
            }
            None => Err(AppError::BadRequest(
                "Provide a new reason or set cancel".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::Animal;
    use crate::infra::{
        AnimalRepository, ApplicationRepository, MockAnimalRepository, MockApplicationRepository,
        MockUserRepository, TransactionContext, UserRepository,
    };

    fn test_animal(id: Uuid, status: AdoptionStatus) -> Animal {
        Animal {
            id,
            name: "Buddy".to_string(),
            species: "Dog".to_string(),
            breed: "Labrador".to_string(),
            age: Some(3),
            gender: "Male".to_string(),
            description: None,
            photo_url: "/images/buddy.jpg".to_string(),
            adoption_status: status,
            created_at: Utc::now(),
            created_by: "Admin".to_string(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
        }
    }

    fn test_application(id: Uuid, adopter_id: Uuid, status: ApplicationStatus) -> Application {
        Application {
            id,
            animal_id: Uuid::new_v4(),
            adopter_id,
            reason: Some("I have a garden".to_string()),
            status,
            created_at: Utc::now(),
            created_by: "Jane".to_string(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
        }
    }

    #[derive(Default)]
    struct TestUnitOfWork {
        user_repo: Option<Arc<MockUserRepository>>,
        animal_repo: Option<Arc<MockAnimalRepository>>,
        application_repo: Option<Arc<MockApplicationRepository>>,
    }

    impl TestUnitOfWork {
        fn with_animals(mut self, repo: MockAnimalRepository) -> Self {
            self.animal_repo = Some(Arc::new(repo));
            self
        }

        fn with_applications(mut self, repo: MockApplicationRepository) -> Self {
            self.application_repo = Some(Arc::new(repo));
            self
        }

        fn with_users(mut self, repo: MockUserRepository) -> Self {
            self.user_repo = Some(Arc::new(repo));
            self
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo
                .clone()
                .unwrap_or_else(|| Arc::new(MockUserRepository::new()))
        }

        fn animals(&self) -> Arc<dyn AnimalRepository> {
            self.animal_repo
                .clone()
                .unwrap_or_else(|| Arc::new(MockAnimalRepository::new()))
        }

        fn applications(&self) -> Arc<dyn ApplicationRepository> {
            self.application_repo
                .clone()
                .unwrap_or_else(|| Arc::new(MockApplicationRepository::new()))
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

    fn service(uow: TestUnitOfWork) -> ApplicationManager<TestUnitOfWork> {
        ApplicationManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_create_application_success() {
        let animal_id = Uuid::new_v4();
        let adopter_id = Uuid::new_v4();

        let mut animals = MockAnimalRepository::new();
        animals
            .expect_find_by_id()
            .with(eq(animal_id))
            .returning(|id| Ok(Some(test_animal(id, AdoptionStatus::Available))));

        let mut applications = MockApplicationRepository::new();
        applications.expect_find_active().returning(|_, _| Ok(None));
        applications.expect_create().returning(|new_application| {
            Ok(Application {
                id: Uuid::new_v4(),
                animal_id: new_application.animal_id,
                adopter_id: new_application.adopter_id,
                reason: new_application.reason,
                status: ApplicationStatus::Submitted,
                created_at: Utc::now(),
                created_by: new_application.created_by,
                updated_at: None,
                updated_by: None,
                deleted_at: None,
            })
        });

        let uow = TestUnitOfWork::default()
            .with_animals(animals)
            .with_applications(applications);

        let application = service(uow)
            .create_application(
                adopter_id,
                "Jane".to_string(),
                animal_id,
                Some("I have a garden".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(application.status, ApplicationStatus::Submitted);
        assert_eq!(application.animal_id, animal_id);
        assert_eq!(application.adopter_id, adopter_id);
    }

    #[tokio::test]
    async fn test_create_application_missing_animal() {
        let mut animals = MockAnimalRepository::new();
        animals.expect_find_by_id().returning(|_| Ok(None));

        let uow = TestUnitOfWork::default().with_animals(animals);

        let result = service(uow)
            .create_application(Uuid::new_v4(), "Jane".to_string(), Uuid::new_v4(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_create_application_adopted_animal_is_conflict() {
        let mut animals = MockAnimalRepository::new();
        animals
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_animal(id, AdoptionStatus::Adopted))));

        let uow = TestUnitOfWork::default().with_animals(animals);

        let result = service(uow)
            .create_application(Uuid::new_v4(), "Jane".to_string(), Uuid::new_v4(), None)
            .await;

        // A domain conflict, not a server fault
        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_application_duplicate_is_conflict() {
        let adopter_id = Uuid::new_v4();

        let mut animals = MockAnimalRepository::new();
        animals
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_animal(id, AdoptionStatus::Available))));

        let mut applications = MockApplicationRepository::new();
        applications.expect_find_active().returning(move |_, id| {
            Ok(Some(test_application(
                Uuid::new_v4(),
                id,
                ApplicationStatus::Submitted,
            )))
        });

        let uow = TestUnitOfWork::default()
            .with_animals(animals)
            .with_applications(applications);

        let result = service(uow)
            .create_application(adopter_id, "Jane".to_string(), Uuid::new_v4(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_rejected_application_still_blocks_resubmission() {
        let adopter_id = Uuid::new_v4();

        let mut animals = MockAnimalRepository::new();
        animals
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_animal(id, AdoptionStatus::Available))));

        let mut applications = MockApplicationRepository::new();
        applications.expect_find_active().returning(move |_, id| {
            Ok(Some(test_application(
                Uuid::new_v4(),
                id,
                ApplicationStatus::Rejected,
            )))
        });

        let uow = TestUnitOfWork::default()
            .with_animals(animals)
            .with_applications(applications);

        let result = service(uow)
            .create_application(adopter_id, "Jane".to_string(), Uuid::new_v4(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_status_rejects_submitted_target() {
        let uow = TestUnitOfWork::default();

        let result = service(uow)
            .update_status(
                Uuid::new_v4(),
                ApplicationStatus::Submitted,
                "Admin".to_string(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_status_terminal_application_is_conflict() {
        for terminal in [ApplicationStatus::Approved, ApplicationStatus::Rejected] {
            let mut applications = MockApplicationRepository::new();
            applications
                .expect_find_by_id()
                .returning(move |id| Ok(Some(test_application(id, Uuid::new_v4(), terminal))));

            let uow = TestUnitOfWork::default().with_applications(applications);

            let result = service(uow)
                .update_status(Uuid::new_v4(), ApplicationStatus::Approved, "Admin".to_string())
                .await;

            assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
        }
    }

    #[tokio::test]
    async fn test_update_status_missing_application() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_find_by_id().returning(|_| Ok(None));

        let uow = TestUnitOfWork::default().with_applications(applications);

        let result = service(uow)
            .update_status(Uuid::new_v4(), ApplicationStatus::Approved, "Admin".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_update_by_adopter_other_owner_is_forbidden() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_find_by_id().returning(|id| {
            Ok(Some(test_application(
                id,
                Uuid::new_v4(),
                ApplicationStatus::Submitted,
            )))
        });

        let uow = TestUnitOfWork::default().with_applications(applications);

        let result = service(uow)
            .update_by_adopter(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Some("New reason".to_string()),
                false,
                "Jane".to_string(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_update_by_adopter_terminal_is_conflict() {
        let adopter_id = Uuid::new_v4();

        let mut applications = MockApplicationRepository::new();
        applications.expect_find_by_id().returning(move |id| {
            Ok(Some(test_application(
                id,
                adopter_id,
                ApplicationStatus::Approved,
            )))
        });

        let uow = TestUnitOfWork::default().with_applications(applications);

        let result = service(uow)
            .update_by_adopter(
                Uuid::new_v4(),
                adopter_id,
                Some("New reason".to_string()),
                false,
                "Jane".to_string(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_by_adopter_cancel_soft_deletes() {
        let adopter_id = Uuid::new_v4();

        let mut applications = MockApplicationRepository::new();
        applications.expect_find_by_id().returning(move |id| {
            Ok(Some(test_application(
                id,
                adopter_id,
                ApplicationStatus::Submitted,
            )))
        });
        applications.expect_delete().returning(|_, _| Ok(()));

        let uow = TestUnitOfWork::default().with_applications(applications);

        let result = service(uow)
            .update_by_adopter(Uuid::new_v4(), adopter_id, None, true, "Jane".to_string())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_list_applications_enriches_names() {
        let animal_id = Uuid::new_v4();
        let adopter_id = Uuid::new_v4();

        let application = Application {
            id: Uuid::new_v4(),
            animal_id,
            adopter_id,
            reason: None,
            status: ApplicationStatus::Submitted,
            created_at: Utc::now(),
            created_by: "Jane".to_string(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
        };

        let mut applications = MockApplicationRepository::new();
        let listed = application.clone();
        applications
            .expect_list_paged()
            .returning(move |_, _, _| Ok((vec![listed.clone()], 1)));

        let mut animals = MockAnimalRepository::new();
        animals.expect_find_by_ids().returning(move |ids| {
            Ok(ids
                .into_iter()
                .map(|id| test_animal(id, AdoptionStatus::Available))
                .collect())
        });

        let mut users = MockUserRepository::new();
        users.expect_find_by_ids().returning(|ids| {
            Ok(ids
                .into_iter()
                .map(|id| crate::domain::User {
                    id,
                    name: "Jane Doe".to_string(),
                    email: "jane@example.com".to_string(),
                    password_hash: "hashed".to_string(),
                    phone: None,
                    address: None,
                    role: crate::domain::UserRole::Adopter,
                    created_at: Utc::now(),
                    created_by: "Jane Doe".to_string(),
                    updated_at: None,
                    updated_by: None,
                    deleted_at: None,
                })
                .collect())
        });

        let uow = TestUnitOfWork::default()
            .with_applications(applications)
            .with_animals(animals)
            .with_users(users);

        let (details, total) = service(uow)
            .list_applications(None, PaginationParams::default())
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].animal_name, "Buddy");
        assert_eq!(details[0].adopter_name, "Jane Doe");
    }
}
