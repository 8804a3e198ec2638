use chrono::Utc;


pub fn current_millis() -> u64 {
    Utc::now().timestamp_millis() as u64
}
