//! `refetch backoff` – print the retry schedule.

use refetch_core::config::RefetchConfig;

use super::policy_for;

pub fn run_backoff(cfg: &RefetchConfig) {
    let policy = policy_for(cfg, None);
    println!("{:<8} {:>10} {:>12}", "RETRY", "DELAY", "ELAPSED");
    let mut elapsed = std::time::Duration::ZERO;
    for n in 1..=policy.max_retries {
        let d = policy.delay_for(n);
        elapsed += d;
        println!(
            "{:<8} {:>9.1}s {:>11.1}s",
            n,
            d.as_secs_f64(),
            elapsed.as_secs_f64()
        );
    }
    println!(
        "at most {} request(s), {:.1}s of backoff",
        policy.max_transport_calls(),
        policy.total_delay().as_secs_f64()
    );
}
