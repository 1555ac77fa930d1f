pub mod dish;
pub mod order;

/// Anything kept in a [`Store`](crate::repositories::Store) is addressed by a string id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}
