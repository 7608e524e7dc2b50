//! Aggregated store for all entities
//!
//! One shared handle per collection, injected into every handler as axum
//! state. Handlers only see `dyn DataService<T>`, so the same routes run
//! over MongoDB in production and over in-memory maps in tests.

use crate::core::entity::Entity;
use crate::core::error::StorageError;
use crate::core::service::DataService;
use crate::entities::{Employee, Food, Invoice, Menu, Order, OrderItem, Table};
use crate::storage::{InMemoryDataService, MongoDataService, TimedDataService};
use mongodb::Database;
use std::sync::Arc;
use std::time::Duration;

/// Aggregated store containing all entity collections
#[derive(Clone)]
pub struct Stores {
    pub foods: Arc<dyn DataService<Food>>,
    pub menus: Arc<dyn DataService<Menu>>,
    pub orders: Arc<dyn DataService<Order>>,
    pub order_items: Arc<dyn DataService<OrderItem>>,
    pub tables: Arc<dyn DataService<Table>>,
    pub invoices: Arc<dyn DataService<Invoice>>,
    pub employees: Arc<dyn DataService<Employee>>,
}

impl Stores {
    /// Empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            foods: Arc::new(InMemoryDataService::<Food>::new()),
            menus: Arc::new(InMemoryDataService::<Menu>::new()),
            orders: Arc::new(InMemoryDataService::<Order>::new()),
            order_items: Arc::new(InMemoryDataService::<OrderItem>::new()),
            tables: Arc::new(InMemoryDataService::<Table>::new()),
            invoices: Arc::new(InMemoryDataService::<Invoice>::new()),
            employees: Arc::new(InMemoryDataService::<Employee>::new()),
        }
    }

    /// Collections of one MongoDB database, with their identifier indexes
    pub async fn mongo(database: &Database) -> Result<Self, StorageError> {
        Ok(Self {
            foods: mongo_service::<Food>(database).await?,
            menus: mongo_service::<Menu>(database).await?,
            orders: mongo_service::<Order>(database).await?,
            order_items: mongo_service::<OrderItem>(database).await?,
            tables: mongo_service::<Table>(database).await?,
            invoices: mongo_service::<Invoice>(database).await?,
            employees: mongo_service::<Employee>(database).await?,
        })
    }

    /// Bound every operation on every collection by `timeout`
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            foods: timed(self.foods, timeout),
            menus: timed(self.menus, timeout),
            orders: timed(self.orders, timeout),
            order_items: timed(self.order_items, timeout),
            tables: timed(self.tables, timeout),
            invoices: timed(self.invoices, timeout),
            employees: timed(self.employees, timeout),
        }
    }
}

async fn mongo_service<T: Entity>(
    database: &Database,
) -> Result<Arc<dyn DataService<T>>, StorageError> {
    let service = MongoDataService::<T>::new(database.clone());
    service.ensure_indexes().await?;
    Ok(Arc::new(service))
}

fn timed<T: Entity>(inner: Arc<dyn DataService<T>>, timeout: Duration) -> Arc<dyn DataService<T>> {
    Arc::new(TimedDataService::new(inner, timeout))
}
