// Domain layer: feed records decoded from the push stream
pub mod models;
