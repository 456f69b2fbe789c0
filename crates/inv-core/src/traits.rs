//! Core traits shared by the domain records

/// Primary key type of every table (`INTEGER` identity columns)
pub type Id = i32;

/// Trait for records that have a surrogate primary key
pub trait Identifiable {
    fn id(&self) -> Id;

    /// Zero marks a record the database has not assigned a key to yet
    fn is_new_record(&self) -> bool {
        self.id() == 0
    }

    /// The id to hand to an INSERT: `None` lets the identity column assign one
    fn assigned_id(&self) -> Option<Id> {
        (!self.is_new_record()).then(|| self.id())
    }
}

/// Base trait for all domain records
pub trait Entity: Send + Sync {
    /// The database table name
    const TABLE_NAME: &'static str;

    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}
