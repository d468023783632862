use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures::StreamExt;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::RwLock;

/// Expected capacity and false-positive rate.
/// Tune these based on real staff counts.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

static EMAIL_FILTER: Lazy<RwLock<CuckooFilter<String>>> = Lazy::new(|| {
    RwLock::new(CuckooFilter::new(
        FILTER_CAPACITY,
        FALSE_POSITIVE_RATE,
    ))
});

// Emails are unique exactly as stored, so no case normalization here.

/// Check if an email might be registered (false positives possible)
pub fn might_exist(email: &str) -> bool {
    let email = email.to_string();
    EMAIL_FILTER
        .read()
        .expect("email filter poisoned")
        .contains(&email)
}

/// Insert a single email into the filter
pub fn insert(email: &str) {
    let email = email.to_string();
    EMAIL_FILTER
        .write()
        .expect("email filter poisoned")
        .add(&email);
}

/// Remove an email from the filter
pub fn remove(email: &str) {
    let email = email.to_string();
    EMAIL_FILTER
        .write()
        .expect("email filter poisoned")
        .remove(&email);
}

/// Warm up the email filter using streaming + batching
pub async fn warmup_email_filter(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String,)>("SELECT email FROM users").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (email,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

        batch.push(email);
        total += 1;

        if batch.len() == batch_size {
            insert_batch(&batch);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_batch(&batch);
    }

    log::info!("Email filter warmup complete: {} users", total);
    Ok(())
}

/// Insert a batch of emails
fn insert_batch(emails: &[String]) {
    let mut filter = EMAIL_FILTER
        .write()
        .expect("email filter poisoned");

    for email in emails {
        filter.add(email);
    }
}
