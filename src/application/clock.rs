// Clock port - current instant in the facility's civil timezone
use chrono::{DateTime, FixedOffset};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}
