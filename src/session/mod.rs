/// Session expiry timer driven by the `startdeliver-expires-at` header
pub mod expiry;
