//! Service registry
//!
//! One service per entity, built at startup and shared read-only.

use inv_db::Repository;
use inv_models::{
    Article, BillingLine, BillingRecord, Category, City, Consecutive, Country, Department,
    MeasurementUnit, MovementType, Payment, Person, Role, Status, User,
};
use std::sync::Arc;

use crate::service::{AppService, Service};

/// Resolve the service for a record type
pub trait Provides<T> {
    fn service(&self) -> &Arc<dyn Service<T>>;
}

macro_rules! registry {
    ($($field:ident: $record:ty),+ $(,)?) => {
        /// All entity services
        #[derive(Clone)]
        pub struct Services {
            $(pub $field: Arc<dyn Service<$record>>,)+
        }

        impl Services {
            /// Every service delegating to the same repository
            pub fn from_repository(repository: Arc<Repository>) -> Self {
                Self {
                    $($field: AppService::<$record>::shared(repository.clone()),)+
                }
            }
        }

        $(
            impl Provides<$record> for Services {
                fn service(&self) -> &Arc<dyn Service<$record>> {
                    &self.$field
                }
            }
        )+
    };
}

registry! {
    countries: Country,
    departments: Department,
    cities: City,
    measurement_units: MeasurementUnit,
    movement_types: MovementType,
    categories: Category,
    statuses: Status,
    articles: Article,
    people: Person,
    roles: Role,
    users: User,
    payments: Payment,
    billing_records: BillingRecord,
    billing_lines: BillingLine,
    consecutives: Consecutive,
}

impl Services {
    /// The service for `T`
    pub fn get<T>(&self) -> &Arc<dyn Service<T>>
    where
        Self: Provides<T>,
    {
        Provides::<T>::service(self)
    }
}
