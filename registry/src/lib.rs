use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    repository::{
        booking::BookingRepositoryImpl, health::HealthCheckRepositoryImpl,
        item::ItemRepositoryImpl, request::ItemRequestRepositoryImpl,
        review::ReviewRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::{
    repository::{
        booking::BookingRepository, health::HealthCheckRepository, item::ItemRepository,
        request::ItemRequestRepository, review::ReviewRepository, user::UserRepository,
    },
    service::{
        booking::BookingService, item::ItemService, request::ItemRequestService,
        review::ReviewService, user::UserService,
    },
};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_service: Arc<UserService>,
    item_service: Arc<ItemService>,
    booking_service: Arc<BookingService>,
    review_service: Arc<ReviewService>,
    item_request_service: Arc<ItemRequestService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(pool.clone()));
        let item_repository: Arc<dyn ItemRepository> =
            Arc::new(ItemRepositoryImpl::new(pool.clone()));
        let booking_repository: Arc<dyn BookingRepository> =
            Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let review_repository: Arc<dyn ReviewRepository> =
            Arc::new(ReviewRepositoryImpl::new(pool.clone()));
        let item_request_repository: Arc<dyn ItemRequestRepository> =
            Arc::new(ItemRequestRepositoryImpl::new(pool));

        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let item_service = Arc::new(ItemService::new(
            item_repository.clone(),
            user_repository.clone(),
            booking_repository.clone(),
            review_repository.clone(),
            item_request_repository.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            booking_repository.clone(),
            item_repository.clone(),
            user_repository.clone(),
        ));
        let review_service = Arc::new(ReviewService::new(
            review_repository,
            item_repository.clone(),
            user_repository.clone(),
            booking_repository,
        ));
        let item_request_service = Arc::new(ItemRequestService::new(
            item_request_repository,
            user_repository,
            item_repository,
        ));

        Self {
            health_check_repository,
            user_service,
            item_service,
            booking_service,
            review_service,
            item_request_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn user_service(&self) -> Arc<UserService> {
        self.user_service.clone()
    }

    pub fn item_service(&self) -> Arc<ItemService> {
        self.item_service.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }

    pub fn review_service(&self) -> Arc<ReviewService> {
        self.review_service.clone()
    }

    pub fn item_request_service(&self) -> Arc<ItemRequestService> {
        self.item_request_service.clone()
    }
}
