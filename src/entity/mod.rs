pub mod audit_logs;
pub mod categories;
pub mod notifications;
pub mod products;
pub mod shipments;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use notifications::Entity as Notifications;
pub use products::Entity as Products;
pub use shipments::Entity as Shipments;
pub use users::Entity as Users;
