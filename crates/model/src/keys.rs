use uuid::Uuid;

/// Source of unique identifiers, used for synthetic group keys and
/// per-message trace ids. Injected so tests can supply deterministic
/// values.
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Production generator backed by random UUIDs.
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
